//! Line capacity of the printed page.
//!
//! Tells the user roughly how many characters fit on a printed line before
//! wrapping starts, measured with the real glyph metrics of the loaded font.

use crate::sinks::TextMeasure;

/// Calculates the number of characters that fit on a line of `text_width_mm`.
///
/// Uses uppercase 'M' as the reference character since it's typically the
/// widest in monospace fonts, giving a conservative estimate. Returns 0 for a
/// font that reports a zero width.
pub fn calculate_max_chars_per_line<M: TextMeasure + ?Sized>(
    text_width_mm: f32,
    font: &M,
    font_size_pt: f32,
) -> usize {
    let single_char_width = font.width_of_mm("M", font_size_pt);
    if single_char_width <= 0.0 {
        return 0;
    }
    (text_width_mm / single_char_width).floor() as usize
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sinks::FixedAdvance;

    #[test]
    fn divides_the_width_by_the_widest_glyph() {
        assert_eq!(calculate_max_chars_per_line(188.0, &FixedAdvance(1.9), 9.0), 98);
        assert_eq!(calculate_max_chars_per_line(10.0, &FixedAdvance(2.5), 9.0), 4);
    }

    #[test]
    fn zero_width_fonts_fit_nothing() {
        assert_eq!(calculate_max_chars_per_line(188.0, &FixedAdvance(0.0), 9.0), 0);
    }
}
