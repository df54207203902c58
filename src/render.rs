//! Text and PNG rendering of a (possibly partial) fill.
//!
//! Both renderers read the grid through [`Assignment::letter_grid`], so they never look at
//! slots directly.

use image::{Rgba, RgbaImage};

use crate::assignment::Assignment;
use crate::puzzle::Puzzle;

/// Drawn for cells that can never hold a letter.
pub const BLOCK: char = '█';

/// Drawn for fillable cells no assigned slot covers.
pub const EMPTY: char = ' ';

/// Side of one grid cell in the PNG output, in pixels.
pub const CELL_SIZE: u32 = 100;

/// Black frame left around every fillable cell, in pixels.
pub const CELL_BORDER: u32 = 2;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// Each glyph pixel becomes a `GLYPH_SCALE`-sided square; 5x7 glyphs fill 50x70 of a cell.
const GLYPH_SCALE: u32 = 10;

/// 5x7 bitmaps for `A`..=`Z`, one byte per row, bit 4 is the leftmost column.
#[rustfmt::skip]
const GLYPHS: [[u8; 7]; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

/// Render `assignment` over `puzzle`, one line per grid row.
///
/// Every line is exactly `puzzle.width()` characters and ends with a newline.
#[must_use]
pub fn render_text(puzzle: &Puzzle, assignment: &Assignment) -> String {
    let letters = assignment.letter_grid(puzzle);
    let mut out = String::with_capacity(puzzle.height() * (puzzle.width() * BLOCK.len_utf8() + 1));

    for (row, cells) in letters.iter().enumerate() {
        for (col, letter) in cells.iter().enumerate() {
            let c = if puzzle.is_fillable(row, col) {
                letter.unwrap_or(EMPTY)
            } else {
                BLOCK
            };
            out.push(c);
        }
        out.push('\n');
    }

    out
}

/// Render `assignment` over `puzzle` as an RGBA image.
///
/// Each cell is [`CELL_SIZE`] pixels square. Blocked cells stay black; fillable cells are
/// white inside a [`CELL_BORDER`]-pixel black frame, with their letter (if any) drawn in
/// black at the centre.
#[must_use]
pub fn render_image(puzzle: &Puzzle, assignment: &Assignment) -> RgbaImage {
    let letters = assignment.letter_grid(puzzle);
    // Grid dimensions are capped by MAX_GRID_DIMENSION, so these fit easily.
    let width = puzzle.width() as u32 * CELL_SIZE;
    let height = puzzle.height() as u32 * CELL_SIZE;
    let mut img = RgbaImage::from_pixel(width, height, BLACK);

    for (row, cells) in letters.iter().enumerate() {
        for (col, letter) in cells.iter().enumerate() {
            if !puzzle.is_fillable(row, col) {
                continue;
            }
            let x0 = col as u32 * CELL_SIZE;
            let y0 = row as u32 * CELL_SIZE;
            fill_rect(
                &mut img,
                x0 + CELL_BORDER,
                y0 + CELL_BORDER,
                CELL_SIZE - 2 * CELL_BORDER,
                CELL_SIZE - 2 * CELL_BORDER,
                WHITE,
            );
            if let Some(glyph) = letter.and_then(glyph_for) {
                draw_glyph(&mut img, glyph, x0, y0);
            }
        }
    }

    img
}

/// Render `assignment` over `puzzle` and write it to `path` as a PNG.
///
/// # Errors
///
/// Returns the underlying [`image::ImageError`] if the file cannot be encoded or written.
#[cfg(not(target_arch = "wasm32"))]
pub fn render_png<P: AsRef<std::path::Path>>(
    puzzle: &Puzzle,
    assignment: &Assignment,
    path: P,
) -> Result<(), image::ImageError> {
    let path = path.as_ref();
    let img = render_image(puzzle, assignment);
    log::debug!("Writing {}x{} PNG to {}", img.width(), img.height(), path.display());
    img.save_with_format(path, image::ImageFormat::Png)
}

/// True if `path` names a `.png` file (extension compared case-insensitively).
#[must_use]
pub fn is_png_path(path: &std::path::Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn glyph_for(letter: char) -> Option<&'static [u8; 7]> {
    let upper = letter.to_ascii_uppercase();
    upper.is_ascii_uppercase().then(|| &GLYPHS[(upper as u8 - b'A') as usize])
}

/// Draw `glyph` centred in the cell whose top-left pixel is (`x0`, `y0`).
fn draw_glyph(img: &mut RgbaImage, glyph: &[u8; 7], x0: u32, y0: u32) {
    let left = x0 + (CELL_SIZE - GLYPH_WIDTH * GLYPH_SCALE) / 2;
    let top = y0 + (CELL_SIZE - GLYPH_HEIGHT * GLYPH_SCALE) / 2;

    for (gy, bits) in (0..GLYPH_HEIGHT).zip(glyph) {
        for gx in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - gx)) != 0 {
                fill_rect(img, left + gx * GLYPH_SCALE, top + gy * GLYPH_SCALE, GLYPH_SCALE, GLYPH_SCALE, BLACK);
            }
        }
    }
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for py in y..y + h {
        for px in x..x + w {
            img.put_pixel(px, py, color);
        }
    }
}
