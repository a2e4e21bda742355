//! Doc comment reflow: turn comment text into wrapped plain text.
//!
//! Comment text is split into blocks following godoc conventions: runs of
//! unindented lines are paragraphs, runs of indented lines are
//! preformatted, and a lone capitalized line between blank lines is a
//! heading. Paragraphs are re-wrapped to [`WIDTH`] columns, preformatted
//! lines are kept verbatim behind [`PRE_INDENT`].

mod blocks;
mod text;

use blocks::blocks;

/// Column width paragraphs are wrapped to.
pub const WIDTH: usize = 80;

/// Prefix written in front of every non-blank preformatted line.
pub const PRE_INDENT: &str = "\t";

/// Reflow comment text to [`WIDTH`] columns.
pub fn to_text(comment: &str) -> String {
    text::write_blocks(&blocks(comment), WIDTH, PRE_INDENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_paragraphs() {
        assert_eq!(to_text("Does X.\n\nDoes Y.\n"), "Does X.\n\nDoes Y.\n");
    }

    #[test]
    fn empty_comment_has_no_text() {
        assert_eq!(to_text(""), "");
        assert_eq!(to_text("\n"), "");
    }

    #[test]
    fn paragraph_lines_are_joined_and_rewrapped() {
        let input = "It is intended to be used by command line tools that print package\n\
                     documentation as part of their usage help, for example, when invoked with -h\n\
                     flag.\n";
        assert_eq!(
            to_text(input),
            "It is intended to be used by command line tools that print package documentation\n\
             as part of their usage help, for example, when invoked with -h flag.\n"
        );
    }

    #[test]
    fn preformatted_block_keeps_indentation() {
        let input = "Example:\n\n\tfunc init() {\n\t\tflag.Parse()\n\n\t}\n\nDone.\n";
        assert_eq!(
            to_text(input),
            "Example:\n\n\tfunc init() {\n\t\tflag.Parse()\n\n\t}\n\nDone.\n"
        );
    }

    #[test]
    fn space_indented_code_is_retabbed() {
        let input = "Run:\n\n    usagegen -autohelp\n      -f out.go\n";
        assert_eq!(to_text(input), "Run:\n\n\tusagegen -autohelp\n\t  -f out.go\n");
    }

    #[test]
    fn heading_between_paragraphs() {
        let input = "Intro text.\n\nFlag Handling\n\nBody text.\n";
        assert_eq!(to_text(input), "Intro text.\n\nFlag Handling\n\nBody text.\n");
    }

    #[test]
    fn typographic_quotes() {
        assert_eq!(to_text("Say ``hi'' twice.\n"), "Say “hi” twice.\n");
    }

    #[test]
    fn usagegen_own_documentation() {
        let input = "\
Command usagegen reads \"main\" package godoc and creates source file that
defines constant holding extracted text.

When run in a directory holding main package source, it extracts its
documentation and creates automatically generated file (usage_generated.go by
default) that defines single constant named \"usage\".

This constant can then be used in code like this:

\tfunc init() {
\t\tflag.Usage = func() {
\t\t\tflag.PrintDefaults()
\t\t}
\t}

If usagegen is called with -autohelp flag, it generates source file that
defines single init() function that sets flag.Usage variable as in above
example, but usage constant instead only scoped to this init function.
";
        let expected = "\
Command usagegen reads \"main\" package godoc and creates source file that defines
constant holding extracted text.

When run in a directory holding main package source, it extracts its
documentation and creates automatically generated file (usage_generated.go by
default) that defines single constant named \"usage\".

This constant can then be used in code like this:

\tfunc init() {
\t\tflag.Usage = func() {
\t\t\tflag.PrintDefaults()
\t\t}
\t}

If usagegen is called with -autohelp flag, it generates source file that defines
single init() function that sets flag.Usage variable as in above example, but
usage constant instead only scoped to this init function.
";
        assert_eq!(to_text(input), expected);
    }
}
