pub mod wrap;

pub use wrap::{balanced_two_line_wrap, truncate_label, wrap_to_budget};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 12.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Average advance of one character, used to turn a pixel budget into a character budget.
    fn char_width(&self, style: &TextStyle) -> f64 {
        let m = self.measure("n", style);
        if m.width.is_finite() && m.width > 0.0 {
            m.width
        } else {
            style.font_size.max(1.0) * 0.6
        }
    }
}

/// Width is `chars * font_size * char_width_factor`; no font tables involved, so label layout is
/// reproducible across platforms.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let font_size = style.font_size.max(1.0);
        let mut line_count = 0usize;
        let mut max_chars = 0usize;
        for line in text.split('\n') {
            line_count += 1;
            max_chars = max_chars.max(line.chars().count());
        }

        TextMetrics {
            width: max_chars as f64 * font_size * char_width_factor,
            height: line_count as f64 * font_size * line_height_factor,
            line_count,
        }
    }
}

#[cfg(test)]
mod tests;
