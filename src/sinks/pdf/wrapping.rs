//! Width-based line wrapping.
//!
//! Source lines are often wider than the printable area. Each logical line is
//! split into physical lines that fit the text width when set in the active
//! font. Breaks prefer the last whitespace or CJK ideograph seen in the current
//! segment; a segment without such a point is cut at the character that would
//! overflow. A segment always takes at least one character so that a glyph
//! wider than the whole line still makes progress.

use crate::line_analysis::LineStats;
use crate::sinks::pdf::config::{Layout, RenderStrategy};
use crate::source::SourceLine;

/// Measures rendered text.
pub trait TextMeasure {
    /// Advance width of `c` in millimetres at `size_pt`.
    fn char_width_mm(&self, c: char, size_pt: f32) -> f32;

    fn width_of_mm(&self, text: &str, size_pt: f32) -> f32 {
        text.chars().map(|c| self.char_width_mm(c, size_pt)).sum()
    }
}

/// CJK ideographs, kana, hangul, and full-width forms may be broken after
/// without a space.
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}'
        | '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FF00}'..='\u{FFEF}'
        | '\u{20000}'..='\u{2A6DF}')
}

pub struct LineWrapper<'m, M: TextMeasure + ?Sized> {
    measure: &'m M,
    max_width_mm: f32,
    size_pt: f32,
    tab: String,
}

impl<'m, M: TextMeasure + ?Sized> LineWrapper<'m, M> {
    pub fn new(measure: &'m M, layout: &Layout, strategy: RenderStrategy) -> Self {
        LineWrapper {
            measure,
            max_width_mm: layout.text_width_mm(strategy),
            size_pt: layout.font_size_pt,
            tab: " ".repeat(layout.tab_width),
        }
    }

    /// Split one logical line into physical lines.
    ///
    /// Whitespace-only segments (a run of indentation longer than the line, or
    /// trailing spaces after a break) are dropped, so a non-blank input never
    /// produces a blank physical line.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.replace('\t', &self.tab).chars().collect();
        let n = chars.len();

        let mut segments: Vec<String> = Vec::new();
        let mut push = |segment: &[char]| {
            if segment.iter().any(|c| !c.is_whitespace()) {
                segments.push(segment.iter().collect());
            }
        };

        let mut i = 0;
        let mut start = 0;
        let mut sep: Option<usize> = None;
        let mut width = 0.0;
        while i < n {
            let c = chars[i];
            width += self.measure.char_width_mm(c, self.size_pt);

            if width > self.max_width_mm && i > start {
                if c.is_whitespace() {
                    // break on the overflowing space itself and swallow it
                    push(&chars[start..i]);
                    i += 1;
                } else {
                    match sep {
                        Some(s) if chars[s].is_whitespace() => {
                            push(&chars[start..s]);
                            i = s + 1;
                        }
                        Some(s) => {
                            push(&chars[start..=s]);
                            i = s + 1;
                        }
                        None => push(&chars[start..i]),
                    }
                }
                start = i;
                sep = None;
                width = 0.0;
                continue;
            }

            if c.is_whitespace() || is_cjk(c) {
                sep = Some(i);
            }
            i += 1;
        }
        if start < n {
            push(&chars[start..]);
        }

        segments
    }

    /// Wrap every source line in order, collecting statistics as we go.
    pub fn wrap_all(&self, lines: &[SourceLine]) -> (Vec<String>, LineStats) {
        let mut stats = LineStats::default();
        let mut physical = Vec::with_capacity(lines.len());
        for line in lines {
            let segments = self.wrap(&line.text);
            stats.record(line, segments.len());
            physical.extend(segments);
        }
        (physical, stats)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Every character is `width` millimetres wide, CJK twice that, at any size.
    pub struct FixedAdvance(pub f32);

    impl TextMeasure for FixedAdvance {
        fn char_width_mm(&self, c: char, _size_pt: f32) -> f32 {
            if is_cjk(c) {
                self.0 * 2.0
            } else {
                self.0
            }
        }
    }

    fn wrapper(measure: &FixedAdvance, columns: f32) -> LineWrapper<'_, FixedAdvance> {
        let layout = Layout {
            wrap_width_mm: columns,
            ..Layout::default()
        };
        LineWrapper::new(measure, &layout, RenderStrategy::Baseline)
    }

    #[test]
    fn short_lines_are_untouched() {
        let m = FixedAdvance(1.0);
        let w = wrapper(&m, 20.0);
        assert_eq!(w.wrap("    let x = 1;"), vec!["    let x = 1;"]);
    }

    #[test]
    fn breaks_at_the_last_space() {
        let m = FixedAdvance(1.0);
        let w = wrapper(&m, 10.0);
        assert_eq!(w.wrap("hello world again"), vec!["hello", "world", "again"]);
    }

    #[test]
    fn breaks_on_an_overflowing_space() {
        let m = FixedAdvance(1.0);
        let w = wrapper(&m, 10.0);
        assert_eq!(w.wrap("abcdefghij klm"), vec!["abcdefghij", "klm"]);
    }

    #[test]
    fn cuts_long_tokens_hard() {
        let m = FixedAdvance(1.0);
        let w = wrapper(&m, 10.0);
        assert_eq!(w.wrap("abcdefghijklmnop"), vec!["abcdefghij", "klmnop"]);
    }

    #[test]
    fn breaks_after_cjk_ideographs() {
        let m = FixedAdvance(1.0);
        let w = wrapper(&m, 10.0);
        assert_eq!(w.wrap("你好世界你好世界"), vec!["你好世界你", "好世界"]);
    }

    #[test]
    fn oversized_glyphs_still_make_progress() {
        let m = FixedAdvance(15.0);
        let w = wrapper(&m, 10.0);
        assert_eq!(w.wrap("abc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn tabs_expand_to_spaces() {
        let m = FixedAdvance(1.0);
        let w = wrapper(&m, 40.0);
        assert_eq!(w.wrap("\tfoo();"), vec!["    foo();"]);
    }

    #[test]
    fn never_emits_blank_segments() {
        let m = FixedAdvance(1.0);
        let w = wrapper(&m, 10.0);
        let text = format!("a{}b", " ".repeat(30));
        let segments = w.wrap(&text);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].trim(), "a");
        assert_eq!(segments[1].trim(), "b");
        assert!(segments.iter().all(|s| !s.trim().is_empty()));
    }

    #[test]
    fn every_segment_fits() {
        let m = FixedAdvance(1.0);
        let w = wrapper(&m, 12.0);
        let text = "fn render(config: &PDF, doc: &mut Document, font_ids: &FontIds) -> Result<()>";
        for segment in w.wrap(text) {
            assert!(m.width_of_mm(&segment, 9.0) <= 12.0, "{segment:?} overflows");
        }
    }

    #[test]
    fn cells_wrap_narrower_than_baselines() {
        let m = FixedAdvance(1.0);
        let layout = Layout {
            wrap_width_mm: 12.0,
            cell_padding_mm: 1.0,
            ..Layout::default()
        };
        let text = "abcdefghijkl";
        let cells = LineWrapper::new(&m, &layout, RenderStrategy::Cells).wrap(text);
        let baseline = LineWrapper::new(&m, &layout, RenderStrategy::Baseline).wrap(text);
        assert_eq!(cells, vec!["abcdefghij", "kl"]);
        assert_eq!(baseline, vec!["abcdefghijkl"]);
    }
}
