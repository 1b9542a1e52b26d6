//! Synthetic raster builders shared by unit tests.

use crate::common::Raster;
use crate::constants::{MAX_INTENSITY, MIN_INTENSITY};

/// Build a raster from ASCII rows.
///
/// `.` is [`MIN_INTENSITY`], `#` is [`MAX_INTENSITY`], digits `0`-`9` map to
/// `digit * 25`. All rows must have the same length.
pub fn raster_from_ascii(rows: &[&str]) -> Raster {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());
    let mut pixels = Vec::with_capacity(width * height);
    for row in rows {
        assert_eq!(row.len(), width, "ragged ASCII raster");
        for ch in row.chars() {
            pixels.push(match ch {
                '.' => MIN_INTENSITY,
                '#' => MAX_INTENSITY,
                d if d.is_ascii_digit() => (d as u8 - b'0') * 25,
                other => panic!("unsupported raster character {other:?}"),
            });
        }
    }
    Raster::from_pixels(width, height, pixels).unwrap()
}

/// Render a raster back to ASCII (`.`, `#`, or `?` for anything else).
pub fn raster_to_ascii(raster: &Raster) -> Vec<String> {
    raster
        .pixels()
        .chunks(raster.width())
        .map(|row| {
            row.iter()
                .map(|&v| match v {
                    MIN_INTENSITY => '.',
                    MAX_INTENSITY => '#',
                    _ => '?',
                })
                .collect()
        })
        .collect()
}

/// Fill the inclusive rectangle `[x0, x1] x [y0, y1]` with `value`.
pub fn fill_rect(raster: &mut Raster, x0: usize, x1: usize, y0: usize, y1: usize, value: u8) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            raster[(x, y)] = value;
        }
    }
}

/// Fill a digital disk centered on `(cx, cy)` with `value`.
///
/// Covers samples closer than `radius + 0.5`, so the disk spans exactly
/// `2 * radius + 1` samples on each axis.
pub fn fill_disk(raster: &mut Raster, cx: usize, cy: usize, radius: usize, value: u8) {
    let r2 = (radius * radius + radius) as i64;
    for y in cy.saturating_sub(radius)..=(cy + radius).min(raster.height() - 1) {
        for x in cx.saturating_sub(radius)..=(cx + radius).min(raster.width() - 1) {
            let dx = x as i64 - cx as i64;
            let dy = y as i64 - cy as i64;
            if dx * dx + dy * dy <= r2 {
                raster[(x, y)] = value;
            }
        }
    }
}

/// Number of samples equal to `value`.
pub fn count_value(raster: &Raster, value: u8) -> usize {
    raster.pixels().iter().filter(|&&v| v == value).count()
}
