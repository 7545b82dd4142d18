//! Terminal event reader thread

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Reads terminal events on a dedicated thread so the game loop never
/// blocks on I/O
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(poll_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let poll_rate = Duration::from_millis(poll_ms);

        thread::spawn(move || {
            loop {
                match event::poll(poll_rate) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        log::warn!("Event poll failed: {}", e);
                        return;
                    }
                }
                let forwarded = match event::read() {
                    Ok(event::Event::Key(key)) => Event::Key(key),
                    Ok(event::Event::Resize(w, h)) => Event::Resize(w, h),
                    Ok(_) => continue,
                    Err(e) => {
                        log::warn!("Event read failed: {}", e);
                        return;
                    }
                };
                // Receiver dropped: the game is exiting
                if tx.send(forwarded).is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    /// Every event received since the last call, without blocking
    pub fn drain(&self) -> Vec<Event> {
        self.rx.try_iter().collect()
    }
}
