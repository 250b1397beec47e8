//! Rendered text width measurement.
//!
//! Collision checks need the on-screen width of each label. Hosts that can
//! measure real glyph runs implement `TextMetrics`; everything else uses the
//! fixed per-character advance.

/// Measures rendered label width in layout units.
pub trait TextMetrics {
    fn text_width(&self, text: &str) -> f64;
}

impl<F> TextMetrics for F
where
    F: Fn(&str) -> f64,
{
    fn text_width(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Approximates width as `chars * advance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvanceMetrics {
    pub advance: f64,
}

impl FixedAdvanceMetrics {
    /// Average advance of a bold 24pt system font.
    pub const BOLD_TITLE_ADVANCE: f64 = 14.5;

    pub fn new(advance: f64) -> Self {
        Self { advance }
    }
}

impl Default for FixedAdvanceMetrics {
    fn default() -> Self {
        Self::new(Self::BOLD_TITLE_ADVANCE)
    }
}

impl TextMetrics for FixedAdvanceMetrics {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance
    }
}
