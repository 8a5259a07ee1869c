//! Statistics about how the collected source wrapped onto the page.
//!
//! Gathered while wrapping so the driver can tell the user how much of their
//! code had to be broken across lines, and where the worst offender lives.

use crate::source::SourceLine;
use std::path::PathBuf;

/// Statistics about line lengths in the collected source
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineStats {
    /// Logical (non-blank) lines seen
    pub total_lines: usize,
    /// Physical lines produced by wrapping
    pub physical_lines: usize,
    /// Logical lines that needed more than one physical line
    pub lines_that_wrap: usize,
    /// Longest logical line in characters (tabs count as one)
    pub longest_line_length: usize,
    pub longest_line_file: PathBuf,
    /// 1-indexed line number within `longest_line_file`
    pub longest_line_number: usize,
}

impl LineStats {
    /// Account for one logical line that wrapped into `segments` physical lines.
    pub fn record(&mut self, line: &SourceLine, segments: usize) {
        self.total_lines += 1;
        self.physical_lines += segments;
        if segments > 1 {
            self.lines_that_wrap += 1;
        }

        let length = line.text.chars().count();
        if length > self.longest_line_length {
            self.longest_line_length = length;
            self.longest_line_file = line.origin.to_path_buf();
            self.longest_line_number = line.number;
        }
    }

    /// Percentage of logical lines that wrapped.
    ///
    /// Returns 0.0 if there are no lines to analyse.
    pub fn wrap_percentage(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.lines_that_wrap as f64 / self.total_lines as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::Path;
    use std::rc::Rc;

    fn line(text: &str, file: &str, number: usize) -> SourceLine {
        SourceLine {
            text: text.to_string(),
            origin: Rc::from(Path::new(file)),
            number,
        }
    }

    #[test]
    fn empty_stats_have_no_wrapping() {
        assert_eq!(LineStats::default().wrap_percentage(), 0.0);
    }

    #[test]
    fn tracks_the_longest_line_and_wrap_ratio() {
        let mut stats = LineStats::default();
        stats.record(&line("short", "a.go", 1), 1);
        stats.record(&line("a much longer line", "b.go", 7), 3);
        stats.record(&line("mid length", "a.go", 2), 1);
        stats.record(&line("tiny", "c.go", 4), 1);

        assert_eq!(stats.total_lines, 4);
        assert_eq!(stats.physical_lines, 6);
        assert_eq!(stats.lines_that_wrap, 1);
        assert_eq!(stats.longest_line_length, 18);
        assert_eq!(stats.longest_line_file, PathBuf::from("b.go"));
        assert_eq!(stats.longest_line_number, 7);
        assert!((stats.wrap_percentage() - 25.0).abs() < f64::EPSILON);
    }
}
