//! Block letter fonts for the dweets demos.
//!
//! Glyphs are 7 rows of `█` characters. A terminal cell is about twice as tall
//! as it is wide, so strokes are two characters wide; when rasterized into a
//! [`Surface`] each character column becomes half a cell wide to keep the
//! letters square.

use dweets_core::{PixelRect, Rgba, Surface};

/// Rows in every glyph.
pub const GLYPH_HEIGHT: usize = 7;

/// One glyph, row by row.
pub type Glyph = [&'static str; GLYPH_HEIGHT];

/// Large 7-segment style digits (7 lines tall, 6 chars wide)
pub static DIGITS: [Glyph; 10] = [
    // 0
    [
        " ████ ", "██  ██", "██  ██", "██  ██", "██  ██", "██  ██", " ████ ",
    ],
    // 1
    [
        "  ██  ", " ███  ", "  ██  ", "  ██  ", "  ██  ", "  ██  ", " ████ ",
    ],
    // 2
    [
        " ████ ", "██  ██", "    ██", "  ██  ", " ██   ", "██    ", "██████",
    ],
    // 3
    [
        " ████ ", "██  ██", "    ██", "  ███ ", "    ██", "██  ██", " ████ ",
    ],
    // 4
    [
        "██  ██", "██  ██", "██  ██", "██████", "    ██", "    ██", "    ██",
    ],
    // 5
    [
        "██████", "██    ", "██    ", "█████ ", "    ██", "██  ██", " ████ ",
    ],
    // 6
    [
        " ████ ", "██    ", "██    ", "█████ ", "██  ██", "██  ██", " ████ ",
    ],
    // 7
    [
        "██████", "    ██", "   ██ ", "  ██  ", "  ██  ", "  ██  ", "  ██  ",
    ],
    // 8
    [
        " ████ ", "██  ██", "██  ██", " ████ ", "██  ██", "██  ██", " ████ ",
    ],
    // 9
    [
        " ████ ", "██  ██", "██  ██", " █████", "    ██", "    ██", " ████ ",
    ],
];

/// Uppercase letters A-Z.
pub static LETTERS: [Glyph; 26] = [
    // A
    [
        " ████ ", "██  ██", "██  ██", "██████", "██  ██", "██  ██", "██  ██",
    ],
    // B
    [
        "█████ ", "██  ██", "██  ██", "█████ ", "██  ██", "██  ██", "█████ ",
    ],
    // C
    [
        " ████ ", "██  ██", "██    ", "██    ", "██    ", "██  ██", " ████ ",
    ],
    // D
    [
        "█████ ", "██  ██", "██  ██", "██  ██", "██  ██", "██  ██", "█████ ",
    ],
    // E
    [
        "██████", "██    ", "██    ", "█████ ", "██    ", "██    ", "██████",
    ],
    // F
    [
        "██████", "██    ", "██    ", "█████ ", "██    ", "██    ", "██    ",
    ],
    // G
    [
        " ████ ", "██  ██", "██    ", "██ ███", "██  ██", "██  ██", " ████ ",
    ],
    // H
    [
        "██  ██", "██  ██", "██  ██", "██████", "██  ██", "██  ██", "██  ██",
    ],
    // I
    [
        "██████", "  ██  ", "  ██  ", "  ██  ", "  ██  ", "  ██  ", "██████",
    ],
    // J
    [
        "  ████", "    ██", "    ██", "    ██", "    ██", "██  ██", " ████ ",
    ],
    // K
    [
        "██  ██", "██ ██ ", "████  ", "███   ", "████  ", "██ ██ ", "██  ██",
    ],
    // L
    [
        "██    ", "██    ", "██    ", "██    ", "██    ", "██    ", "██████",
    ],
    // M
    [
        "██   ██", "███ ███", "███████", "██ █ ██", "██   ██", "██   ██", "██   ██",
    ],
    // N
    [
        "██   ██", "███  ██", "████ ██", "██ ████", "██  ███", "██   ██", "██   ██",
    ],
    // O
    [
        " ████ ", "██  ██", "██  ██", "██  ██", "██  ██", "██  ██", " ████ ",
    ],
    // P
    [
        "█████ ", "██  ██", "██  ██", "█████ ", "██    ", "██    ", "██    ",
    ],
    // Q
    [
        " ████ ", "██  ██", "██  ██", "██  ██", "██  ██", "██ ██ ", " ██ ██",
    ],
    // R
    [
        "█████ ", "██  ██", "██  ██", "█████ ", "████  ", "██ ██ ", "██  ██",
    ],
    // S
    [
        " ████ ", "██  ██", "██    ", " ████ ", "    ██", "██  ██", " ████ ",
    ],
    // T
    [
        "██████", "  ██  ", "  ██  ", "  ██  ", "  ██  ", "  ██  ", "  ██  ",
    ],
    // U
    [
        "██  ██", "██  ██", "██  ██", "██  ██", "██  ██", "██  ██", " ████ ",
    ],
    // V
    [
        "██  ██", "██  ██", "██  ██", "██  ██", "██  ██", " ████ ", "  ██  ",
    ],
    // W
    [
        "██   ██", "██   ██", "██   ██", "██ █ ██", "███████", "███ ███", "██   ██",
    ],
    // X
    [
        "██  ██", "██  ██", " ████ ", "  ██  ", " ████ ", "██  ██", "██  ██",
    ],
    // Y
    [
        "██  ██", "██  ██", " ████ ", "  ██  ", "  ██  ", "  ██  ", "  ██  ",
    ],
    // Z
    [
        "██████", "    ██", "   ██ ", "  ██  ", " ██   ", "██    ", "██████",
    ],
];

/// Colon separator (7 lines tall, 2 chars wide)
pub static COLON: Glyph = ["  ", "██", "  ", "  ", "  ", "██", "  "];

pub static PERIOD: Glyph = ["  ", "  ", "  ", "  ", "  ", "  ", "██"];

pub static MINUS: Glyph = [
    "      ", "      ", "      ", "██████", "      ", "      ", "      ",
];

pub static SPACE: Glyph = ["   "; GLYPH_HEIGHT];

/// Look up the glyph for a character. Letters are case-insensitive.
pub fn glyph(c: char) -> Option<&'static Glyph> {
    match c.to_ascii_uppercase() {
        d @ '0'..='9' => Some(&DIGITS[d as usize - '0' as usize]),
        l @ 'A'..='Z' => Some(&LETTERS[l as usize - 'A' as usize]),
        ':' => Some(&COLON),
        '.' => Some(&PERIOD),
        '-' => Some(&MINUS),
        ' ' => Some(&SPACE),
        _ => None,
    }
}

/// Build large ASCII art for a line of text.
///
/// Glyphs are separated by one blank column; characters without a glyph
/// render as a space.
pub fn build_text_art(text: &str) -> Vec<String> {
    let glyphs: Vec<&Glyph> = text.chars().map(|c| glyph(c).unwrap_or(&SPACE)).collect();

    (0..GLYPH_HEIGHT)
        .map(|row| {
            let mut line = String::new();
            for (i, g) in glyphs.iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                line.push_str(g[row]);
            }
            line
        })
        .collect()
}

/// Rasterize `text` into a transparent surface.
///
/// `cell_height` is the pixel height of one glyph row; the whole text is
/// `7 * cell_height` pixels tall.
pub fn rasterize(text: &str, color: Rgba, cell_height: u32) -> Surface {
    let cell_h = cell_height.max(1);
    let cell_w = (cell_h / 2).max(1);
    let art = build_text_art(text);
    let columns = art.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;

    let mut surface = Surface::new(columns * cell_w, GLYPH_HEIGHT as u32 * cell_h);
    for (row, line) in art.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch != ' ' {
                surface.fill_rect(
                    PixelRect::new(
                        (col as u32 * cell_w) as i32,
                        (row as u32 * cell_h) as i32,
                        cell_w as i32,
                        cell_h as i32,
                    ),
                    color,
                );
            }
        }
    }
    surface
}
