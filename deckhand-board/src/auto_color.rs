//! Deterministic color assignment for project columns.
//!
//! A project created without an explicit color gets one keyed off its name,
//! so the same project renders the same color everywhere without storing a
//! preference. Colors come from a curated palette that reads well as column
//! headers on light and dark themes.

/// Curated palette of 12 project colors (6-char hex without `#`)
const PALETTE: &[&str] = &[
    "1d76db", // blue
    "0e8a16", // green
    "d73a4a", // red
    "e36209", // orange
    "5319e7", // purple
    "006b75", // teal
    "b60205", // dark red
    "fbca04", // gold
    "d876e3", // pink
    "0075ca", // ocean
    "008672", // sea green
    "7057ff", // violet
];

/// Deterministic palette color for a project name
pub fn project_color(name: &str) -> &'static str {
    let idx = (fnv1a(name) as usize) % PALETTE.len();
    PALETTE[idx]
}

/// FNV-1a hash (32-bit) for short strings
fn fnv1a(s: &str) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in s.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
