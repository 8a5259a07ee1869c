use std::path::Path;
use std::rc::Rc;

/// A single non-blank line of source code, as read from disk.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct SourceLine {
    /// The line's contents, without the line terminator
    pub text: String,
    /// The file the line came from; shared by every line of that file
    pub origin: Rc<Path>,
    /// 1-indexed line number within `origin`, counting blank lines
    pub number: usize,
}

impl SourceLine {
    /// Split file contents into its non-blank lines.
    ///
    /// Lines are split on `\n` and `\r\n`; lines that are empty or contain
    /// only whitespace are dropped. Order is preserved.
    pub fn from_contents(contents: &str, origin: &Path) -> Vec<SourceLine> {
        let origin: Rc<Path> = Rc::from(origin);
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| SourceLine {
                text: line.to_string(),
                origin: origin.clone(),
                number: i + 1,
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn drops_blank_and_whitespace_lines() {
        let lines = SourceLine::from_contents(
            "package main\n\n  \t \r\nfunc main() {}\r\n",
            Path::new("a.go"),
        );
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["package main", "func main() {}"]);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].number, 4);
        assert_eq!(&*lines[1].origin, Path::new("a.go"));
    }

    #[test]
    fn keeps_indentation() {
        let lines = SourceLine::from_contents("def f():\n    return 1", Path::new("f.py"));
        assert_eq!(lines[1].text, "    return 1");
    }
}
