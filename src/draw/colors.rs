//! EAGLE palette lookup
//!
//! Layer colors in EAGLE files are indices into the editor's palette. The
//! table below mirrors the default palette, zero-indexed from the top left of
//! the color dialog.

const EAGLE_TO_RGB: [(u8, u8, u8); 16] = [
    (255, 255, 255), // 0 white
    (75, 75, 165),   // 1 dark blue
    (75, 165, 75),   // 2 green
    (75, 165, 165),  // 3 teal
    (165, 75, 75),   // 4 dark red
    (165, 75, 165),  // 5 purple
    (165, 165, 75),  // 6 olive
    (165, 165, 165), // 7 medium gray
    (230, 230, 230), // 8 light gray
    (75, 75, 255),   // 9 blue
    (75, 255, 75),   // 10 neon green
    (75, 255, 255),  // 11 cyan
    (255, 75, 75),   // 12 bright red
    (255, 75, 255),  // 13 pink
    (255, 255, 75),  // 14 yellow
    (75, 75, 75),    // 15 dark gray
];

/// Medium gray, used for indices outside the palette
pub const DEFAULT_RGB: (u8, u8, u8) = (165, 165, 165);

/// Convert an EAGLE color index to an `(r, g, b)` triple
pub fn as_rgb(index: i32) -> (u8, u8, u8) {
    usize::try_from(index)
        .ok()
        .and_then(|i| EAGLE_TO_RGB.get(i).copied())
        .unwrap_or(DEFAULT_RGB)
}

/// Convert an EAGLE color index to a CSS `rgb(r, g, b)` string
pub fn as_css(index: i32) -> String {
    let (r, g, b) = as_rgb(index);
    format!("rgb({}, {}, {})", r, g, b)
}
