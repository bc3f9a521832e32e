//! Font metrics and single-line label fitting.

use egui::{Align2, Color32, FontId, Painter, Rect};

const ELLIPSIS: char = '…';

/// Text metrics for one font.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f32;

    fn line_height(&self) -> f32;
}

/// Measures text with the fonts of a live egui painter.
pub struct PainterMeasure<'a> {
    painter: &'a Painter,
    font: FontId,
}

impl<'a> PainterMeasure<'a> {
    pub fn new(painter: &'a Painter, font: FontId) -> Self {
        Self { painter, font }
    }

    pub fn font(&self) -> &FontId {
        &self.font
    }
}

impl TextMeasure for PainterMeasure<'_> {
    fn text_width(&self, text: &str) -> f32 {
        self.painter
            .layout_no_wrap(text.to_owned(), self.font.clone(), Color32::WHITE)
            .size()
            .x
    }

    fn line_height(&self) -> f32 {
        self.painter.ctx().fonts(|fonts| fonts.row_height(&self.font))
    }
}

/// The longest prefix of `text` that fits in `max_width`, with a trailing
/// ellipsis when anything was cut. `None` if not even the ellipsis fits.
pub fn fit_text(measure: &dyn TextMeasure, text: &str, max_width: f32) -> Option<String> {
    if measure.text_width(text) <= max_width {
        return Some(text.to_owned());
    }

    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    for &end in boundaries.iter().rev() {
        let candidate = format!("{}{}", text[..end].trim_end(), ELLIPSIS);
        if measure.text_width(&candidate) <= max_width {
            return Some(candidate);
        }
    }
    None
}

/// Paint `text` centred in `bounds`, clipped with an ellipsis. Nothing is
/// drawn when the bounds are shorter than one line.
pub fn paint_centered(
    painter: &Painter,
    measure: &PainterMeasure<'_>,
    text: &str,
    bounds: Rect,
    color: Color32,
) {
    if measure.line_height() > bounds.height() {
        return;
    }
    if let Some(label) = fit_text(measure, text, bounds.width()) {
        painter.with_clip_rect(bounds).text(
            bounds.center(),
            Align2::CENTER_CENTER,
            label,
            measure.font().clone(),
            color,
        );
    }
}
