//! Plain text output for comment blocks.

use super::blocks::Block;

/// Greedy word wrapper: fills each line with as many words as fit.
struct LineWrapper<'w> {
    out: &'w mut String,
    width: usize,
    /// Anything written yet; a new paragraph then starts with a blank line.
    printed: bool,
    /// Characters on the current line.
    n: usize,
    pending_space: bool,
}

impl<'w> LineWrapper<'w> {
    fn new(out: &'w mut String, width: usize) -> Self {
        LineWrapper {
            out,
            width,
            printed: false,
            n: 0,
            pending_space: false,
        }
    }

    fn write(&mut self, text: &str) {
        if self.n == 0 && self.printed {
            self.out.push('\n');
        }
        self.printed = true;

        // Wrapped "//" lines continue as comments.
        let is_comment = text.starts_with("//");
        let mut needs_prefix = false;
        for word in text.split_whitespace() {
            let w = word.chars().count();
            let space = usize::from(self.pending_space);
            if self.n > 0 && self.n + space + w > self.width {
                self.out.push('\n');
                self.n = 0;
                self.pending_space = false;
                needs_prefix = is_comment && !word.starts_with("//");
            }
            if needs_prefix {
                self.out.push_str("// ");
                needs_prefix = false;
            }
            if self.pending_space {
                self.out.push(' ');
            }
            self.out.push_str(word);
            self.n += usize::from(self.pending_space) + w;
            self.pending_space = true;
        }
    }

    fn flush(&mut self) {
        if self.n == 0 {
            return;
        }
        self.out.push('\n');
        self.pending_space = false;
        self.n = 0;
    }

    fn write_raw(&mut self, text: &str) {
        self.out.push_str(text);
    }
}

/// Replace ``` `` ``` and `''` with typographic double quotes.
fn convert_quotes(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("``") {
            out.push('“');
            rest = after;
        } else if let Some(after) = rest.strip_prefix("''") {
            out.push('”');
            rest = after;
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// Render blocks: paragraphs wrapped to `width`, preformatted lines behind
/// `pre_indent`, one blank line between blocks.
pub fn write_blocks(blocks: &[Block<'_>], width: usize, pre_indent: &str) -> String {
    let mut out = String::new();
    let mut l = LineWrapper::new(&mut out, width);
    for block in blocks {
        match block {
            Block::Paragraph(lines) => {
                for line in lines {
                    l.write(&convert_quotes(line));
                }
                l.flush();
            }
            Block::Heading(text) => {
                l.write(&convert_quotes(text));
                l.flush();
            }
            Block::Preformatted(lines) => {
                if l.printed {
                    l.write_raw("\n");
                }
                l.printed = true;
                for line in lines {
                    if line.is_empty() || *line == "\n" {
                        l.write_raw("\n");
                    } else {
                        l.write_raw(pre_indent);
                        l.write_raw(line);
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str, width: usize) -> String {
        let mut out = String::new();
        let mut l = LineWrapper::new(&mut out, width);
        l.write(text);
        l.flush();
        out
    }

    #[test]
    fn fills_exactly_to_width() {
        let text = "Command usagegen reads \"main\" package godoc and creates source file that \
                    defines constant holding extracted text.";
        assert_eq!(
            wrap(text, 80),
            "Command usagegen reads \"main\" package godoc and creates source file that defines\n\
             constant holding extracted text.\n"
        );
    }

    #[test]
    fn greedy_fill() {
        assert_eq!(wrap("aaa bb cc ddd", 6), "aaa bb\ncc ddd\n");
    }

    #[test]
    fn overlong_word_stays_whole() {
        assert_eq!(wrap("a verylongword b", 5), "a\nverylongword\nb\n");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(wrap("ééé ééé", 7), "ééé ééé\n");
    }

    #[test]
    fn wrapped_comment_lines_keep_marker() {
        assert_eq!(
            wrap("// one two three", 10),
            "// one two\n// three\n"
        );
    }

    #[test]
    fn blank_lines_only_between_blocks() {
        let blocks = [
            Block::Preformatted(vec!["x := 1\n"]),
            Block::Paragraph(vec!["Text.\n"]),
            Block::Preformatted(vec!["y := 2\n"]),
        ];
        assert_eq!(
            write_blocks(&blocks, 80, "\t"),
            "\tx := 1\n\nText.\n\n\ty := 2\n"
        );
    }

    #[test]
    fn quotes() {
        assert_eq!(convert_quotes("``a'' and 'b'"), "“a” and 'b'");
    }
}
