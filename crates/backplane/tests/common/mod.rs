#![allow(dead_code)]

use backplane::ColorCode;
use image::{Rgb, RgbImage};

pub const GREEN_PLATE: [u8; 3] = [30, 180, 30];
pub const BACKGROUND: [u8; 3] = [128, 128, 128];

pub fn reference_rgb(color: ColorCode) -> [u8; 3] {
    match color {
        ColorCode::White => [255, 255, 255],
        ColorCode::Red => [255, 0, 0],
        ColorCode::Orange => [255, 128, 0],
        ColorCode::Yellow => [255, 255, 0],
        ColorCode::Green => [0, 255, 0],
        ColorCode::Blue => [0, 0, 255],
        ColorCode::Purple => [160, 0, 255],
    }
}

/// Deterministic pattern using every color.
pub fn pattern(row: usize, col: usize) -> ColorCode {
    ColorCode::ALL[(row * 3 + col * 5) % 7]
}

/// 1000×1000 photo of a green-bordered square rotated by 20° whose four
/// quadrants are red, blue (top row) and yellow, white (bottom row) in the
/// square's own frame.
pub fn rotated_quadrant_scene() -> RgbImage {
    let (center, half, border) = (500.0_f32, 300.0_f32, 20.0_f32);
    let (s, c) = 20.0_f32.to_radians().sin_cos();
    RgbImage::from_fn(1000, 1000, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        // back into the square's frame
        let u = c * dx + s * dy;
        let v = -s * dx + c * dy;
        let extent = u.abs().max(v.abs());
        let rgb = if extent >= half {
            BACKGROUND
        } else if extent >= half - border {
            GREEN_PLATE
        } else {
            match (u < 0.0, v < 0.0) {
                (true, true) => [220, 20, 20],
                (false, true) => [20, 20, 220],
                (true, false) => [230, 220, 20],
                (false, false) => [240, 240, 240],
            }
        };
        Rgb(rgb)
    })
}

/// Axis-aligned photo: a green plate at `origin` with a `border`-pixel rim
/// around a `cols × rows` pattern of `cell`-pixel squares.
pub fn pattern_plate(
    cols: usize,
    rows: usize,
    cell: u32,
    border: u32,
    origin: (u32, u32),
) -> RgbImage {
    let plate_w = cols as u32 * cell + 2 * border;
    let plate_h = rows as u32 * cell + 2 * border;
    let (ox, oy) = origin;
    RgbImage::from_fn(plate_w + 2 * ox, plate_h + 2 * oy, |x, y| {
        let inside_plate = (ox..ox + plate_w).contains(&x) && (oy..oy + plate_h).contains(&y);
        if !inside_plate {
            return Rgb(BACKGROUND);
        }
        let (px, py) = (x - ox, y - oy);
        let inside_grid =
            (border..plate_w - border).contains(&px) && (border..plate_h - border).contains(&py);
        if !inside_grid {
            return Rgb(GREEN_PLATE);
        }
        let col = ((px - border) / cell) as usize;
        let row = ((py - border) / cell) as usize;
        Rgb(reference_rgb(pattern(row, col)))
    })
}

/// An already rectified `cols × rows` pattern with `cell`-pixel squares.
pub fn rectified_pattern(cols: usize, rows: usize, cell: u32) -> RgbImage {
    RgbImage::from_fn(cols as u32 * cell, rows as u32 * cell, |x, y| {
        Rgb(reference_rgb(pattern((y / cell) as usize, (x / cell) as usize)))
    })
}
