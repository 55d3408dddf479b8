//! Central UI style constants and helpers.
pub const COLOR_EVENT_CARD: u32 = 0x5865F2; // Blurple

// Standard target widths for padded button labels so the action row aligns.
pub const BTN_W_STD: usize = 12;

/// Pads a label to a target visible width using spaces. Discord collapses
/// longer runs of trailing spaces, so the pad is clamped to 2.
pub fn pad_label(label: &str, target_min: usize) -> String {
    let len = label.chars().count();
    if len >= target_min {
        return label.to_string();
    }
    format!("{label}{pad}", pad = " ".repeat((target_min - len).min(2)))
}

pub fn pad_std(label: &str) -> String {
    pad_label(label, BTN_W_STD)
}
