// Label colouring.

use serde::{Deserialize, Serialize};

use crate::config::LabelPalette;

/// Colour for `label`; labels missing from the palette get its default.
pub fn label_color<'a>(label: &str, palette: &'a LabelPalette) -> &'a str {
    palette.colors.get(label).map(String::as_str).unwrap_or(&palette.default_color)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelChip {
    pub label: String,
    pub color: String,
}

/// Coloured chips for the first `max` labels, plus how many were cut off.
/// `None` shows every label.
pub fn label_chips(
    labels: &[String],
    palette: &LabelPalette,
    max: Option<usize>,
) -> (Vec<LabelChip>, usize) {
    let shown = max.unwrap_or(labels.len()).min(labels.len());
    let chips = labels[..shown]
        .iter()
        .map(|label| LabelChip {
            label: label.clone(),
            color: label_color(label, palette).to_string(),
        })
        .collect();
    (chips, labels.len() - shown)
}
