//! Shape rasterization for 2D primitives
//!
//! Everything here works in dot space: integer pixel coordinates of the
//! braille grid, x right and y down.

use std::f32::consts::PI;

/// Dots on a straight line between two points (Bresenham)
pub fn line_cells(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut cx, mut cy) = (x0, y0);
    loop {
        cells.push((cx, cy));
        if cx == x1 && cy == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cx += sx;
        }
        if e2 <= dx {
            err += dx;
            cy += sy;
        }
    }
    cells
}

/// Dots on a circle outline, traced as `segments` chords
pub fn circle_outline(cx: f32, cy: f32, radius: f32, segments: u32) -> Vec<(i32, i32)> {
    let segments = segments.max(3);
    let point = |i: u32| {
        let theta = (i as f32 / segments as f32) * 2.0 * PI;
        (
            (cx + radius * theta.cos()).round() as i32,
            (cy + radius * theta.sin()).round() as i32,
        )
    };

    let mut dots = Vec::new();
    for i in 0..segments {
        let (x0, y0) = point(i);
        let (x1, y1) = point(i + 1);
        dots.extend(line_cells(x0, y0, x1, y1));
    }
    dots
}

/// Dots covering a filled disc. Always at least the center dot.
pub fn filled_circle(cx: f32, cy: f32, radius: f32) -> Vec<(i32, i32)> {
    let center = (cx.round() as i32, cy.round() as i32);
    if !(radius.is_finite() && radius > 0.5) {
        return vec![center];
    }

    let mut dots = Vec::new();
    let r = radius.ceil() as i32;
    for dy in -r..=r {
        let y = center.1 + dy;
        let fy = y as f32 - cy;
        let span_sq = radius * radius - fy * fy;
        if span_sq < 0.0 {
            continue;
        }
        let half = span_sq.sqrt();
        let x0 = (cx - half).round() as i32;
        let x1 = (cx + half).round() as i32;
        dots.extend((x0..=x1).map(|x| (x, y)));
    }
    if dots.is_empty() {
        dots.push(center);
    }
    dots
}

/// Dots covering a filled axis-aligned rectangle (corners inclusive)
pub fn filled_rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let (left, right) = (x0.min(x1), x0.max(x1));
    let (top, bottom) = (y0.min(y1), y0.max(y1));
    let mut dots = Vec::with_capacity(((right - left + 1) * (bottom - top + 1)) as usize);
    for y in top..=bottom {
        for x in left..=right {
            dots.push((x, y));
        }
    }
    dots
}
