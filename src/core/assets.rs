//! Placeholder artwork for the front end: colored balls for single picks,
//! labelled squares for merged picks and the final image.

use crate::utils::error::Result;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const OUTLINE_WIDTH: u32 = 4;
const CIRCLE_INSET: u32 = 5;
const SQUARE_INSET: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub file_name: &'static str,
    pub color: [u8; 3],
    pub size: u32,
    pub shape: Shape,
    pub label: Option<&'static str>,
}

pub fn default_assets() -> Vec<AssetSpec> {
    vec![
        // single picks
        AssetSpec { file_name: "202601_r.png", color: [231, 76, 60], size: 128, shape: Shape::Circle, label: None },
        AssetSpec { file_name: "202601_y.png", color: [241, 196, 15], size: 128, shape: Shape::Circle, label: None },
        AssetSpec { file_name: "202601_p.png", color: [155, 89, 182], size: 128, shape: Shape::Circle, label: None },
        // merged
        AssetSpec { file_name: "202601_1.png", color: [192, 57, 43], size: 256, shape: Shape::Square, label: Some("RED+") },
        AssetSpec { file_name: "202601_2.png", color: [243, 156, 18], size: 256, shape: Shape::Square, label: Some("YEL+") },
        AssetSpec { file_name: "202601_3.png", color: [142, 68, 173], size: 256, shape: Shape::Square, label: Some("PUR+") },
        // final
        AssetSpec { file_name: "202601_com.png", color: [46, 204, 113], size: 512, shape: Shape::Square, label: Some("2026") },
    ]
}

pub fn render(spec: &AssetSpec) -> RgbaImage {
    let [r, g, b] = spec.color;
    let fill = Rgba([r, g, b, 255]);
    let mut img = RgbaImage::from_pixel(spec.size, spec.size, TRANSPARENT);

    match spec.shape {
        Shape::Circle => draw_circle(&mut img, fill),
        Shape::Square => draw_square(&mut img, fill),
    }

    if let Some(label) = spec.label {
        let scale = (spec.size / 128).max(1);
        draw_text(&mut img, spec.size / 4, spec.size / 2, label, scale);
    }

    img
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

fn draw_circle(img: &mut RgbaImage, fill: Rgba<u8>) {
    let size = img.width();
    let center = size as f32 / 2.0;
    let radius = (size - 2 * CIRCLE_INSET) as f32 / 2.0;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist <= radius {
            *pixel = if dist > radius - OUTLINE_WIDTH as f32 { WHITE } else { fill };
        }
    }
}

fn draw_square(img: &mut RgbaImage, fill: Rgba<u8>) {
    let size = img.width();
    let lo = SQUARE_INSET;
    let hi = size - SQUARE_INSET;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if x < lo || y < lo || x > hi || y > hi {
            continue;
        }
        let on_edge = x < lo + OUTLINE_WIDTH
            || y < lo + OUTLINE_WIDTH
            || x > hi - OUTLINE_WIDTH
            || y > hi - OUTLINE_WIDTH;
        *pixel = if on_edge { WHITE } else { fill };
    }
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

// 5x7, bit 4 is the leftmost column
fn glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        _ => return None,
    };
    Some(rows)
}

fn draw_text(img: &mut RgbaImage, x0: u32, y0: u32, text: &str, scale: u32) {
    let advance = (GLYPH_WIDTH + 1) * scale;

    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let gx = x0 + i as u32 * advance;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let px = gx + col * scale;
                let py = y0 + row as u32 * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        if px + dx < img.width() && py + dy < img.height() {
                            img.put_pixel(px + dx, py + dy, WHITE);
                        }
                    }
                }
            }
        }
    }
}
