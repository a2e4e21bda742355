//! Split comment text into paragraphs, headings and preformatted blocks.

/// One block of comment text. Lines keep their trailing newline.
#[derive(Debug, PartialEq, Eq)]
pub enum Block<'a> {
    Paragraph(Vec<&'a str>),
    Heading(&'a str),
    /// Indented lines with the common indentation removed
    Preformatted(Vec<&'a str>),
}

/// Characters that never appear in a heading. "(),", possessive "'s" and
/// "." inside a word are the only punctuation allowed.
const HEADING_FORBIDDEN: &[char] = &[
    ';', ':', '!', '?', '+', '*', '/', '=', '[', ']', '{', '}', '_', '^', '°', '&', '§', '~',
    '%', '#', '@', '<', '"', '>', '\\',
];

fn is_blank(line: &str) -> bool {
    line.is_empty() || line == "\n"
}

fn indent_len(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Remove the whitespace prefix shared by all non-blank lines.
fn unindent(lines: &mut [&str]) {
    let Some(&first) = lines.first() else {
        return;
    };
    let mut prefix = &first[..indent_len(first)];
    for &line in lines.iter() {
        if is_blank(line) {
            continue;
        }
        let common = prefix
            .bytes()
            .zip(line.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        prefix = &prefix[..common];
    }
    let n = prefix.len();
    for line in lines.iter_mut() {
        if !is_blank(line) {
            let full = *line;
            *line = &full[n..];
        }
    }
}

/// The heading text if `line` reads like a section title.
fn heading(line: &str) -> Option<&str> {
    let line = line.trim();
    let first = line.chars().next()?;
    if !(first.is_alphabetic() && first.is_uppercase()) {
        return None;
    }
    let last = line.chars().last()?;
    if !(last.is_alphabetic() || last.is_numeric()) {
        return None;
    }
    if line.contains(HEADING_FORBIDDEN) {
        return None;
    }
    for (i, _) in line.match_indices('\'') {
        let after = &line[i + 1..];
        if !(after == "s" || after.starts_with("s ")) {
            return None;
        }
    }
    for (i, _) in line.match_indices('.') {
        let after = &line[i + 1..];
        if after.is_empty() || after.starts_with(' ') {
            return None;
        }
    }
    Some(line)
}

/// Split text after every newline; a trailing newline yields a final
/// empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split_inclusive('\n').collect();
    if text.is_empty() || text.ends_with('\n') {
        lines.push("");
    }
    lines
}

/// Group comment text into blocks.
pub fn blocks(text: &str) -> Vec<Block<'_>> {
    let mut lines = split_lines(text);
    unindent(&mut lines);

    let mut out = Vec::new();
    let mut para: Vec<&str> = Vec::new();
    let mut last_was_blank = false;
    let mut last_was_heading = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if is_blank(line) {
            if !para.is_empty() {
                out.push(Block::Paragraph(std::mem::take(&mut para)));
            }
            last_was_blank = true;
            i += 1;
            continue;
        }

        if indent_len(line) > 0 {
            if !para.is_empty() {
                out.push(Block::Paragraph(std::mem::take(&mut para)));
            }
            let mut j = i + 1;
            while j < lines.len() && (is_blank(lines[j]) || indent_len(lines[j]) > 0) {
                j += 1;
            }
            while j > i && is_blank(lines[j - 1]) {
                j -= 1;
            }
            let mut pre = lines[i..j].to_vec();
            unindent(&mut pre);
            out.push(Block::Preformatted(pre));
            last_was_heading = false;
            i = j;
            continue;
        }

        // A lone line between blank lines, followed by unindented text,
        // may be a heading.
        if last_was_blank
            && !last_was_heading
            && i + 2 < lines.len()
            && is_blank(lines[i + 1])
            && !is_blank(lines[i + 2])
            && indent_len(lines[i + 2]) == 0
        {
            if let Some(head) = heading(line) {
                if !para.is_empty() {
                    out.push(Block::Paragraph(std::mem::take(&mut para)));
                }
                out.push(Block::Heading(head));
                last_was_heading = true;
                i += 2;
                continue;
            }
        }

        last_was_blank = false;
        last_was_heading = false;
        para.push(line);
        i += 1;
    }
    if !para.is_empty() {
        out.push(Block::Paragraph(para));
    }
    out
}
