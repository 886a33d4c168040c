//! Leading front matter blocks (`---` YAML or `+++` TOML).

/// Front matter split off the start of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Content between the delimiters, including its final line break.
    pub content: &'a str,
    /// The document after the closing delimiter line.
    pub rest: &'a str,
    /// Number of line breaks consumed, so positions in `rest` can be mapped
    /// back to source lines.
    pub lines: usize,
}

/// Split front matter off `input`.
///
/// The opening delimiter must be exactly `---` or `+++` at byte 0, optionally
/// followed by blanks. The closing delimiter must match it. Without a closing
/// delimiter there is no front matter.
pub fn extract(input: &str) -> Option<FrontMatter<'_>> {
    let (first, mut pos) = line_at(input, 0)?;
    let delimiter = match first.trim_end_matches([' ', '\t']) {
        d @ ("---" | "+++") => d,
        _ => return None,
    };
    let content_start = pos;
    let mut lines = 1;

    while let Some((line, next)) = line_at(input, pos) {
        if line.trim_end_matches([' ', '\t']) == delimiter {
            let rest = &input[next..];
            if next > pos + line.len() {
                lines += 1;
            }
            return Some(FrontMatter {
                content: &input[content_start..pos],
                rest,
                lines,
            });
        }
        pos = next;
        lines += 1;
    }
    None
}

/// The line at `pos` without its break, and the offset of the next line.
fn line_at(input: &str, pos: usize) -> Option<(&str, usize)> {
    if pos >= input.len() {
        return None;
    }
    let rest = &input[pos..];
    Some(match memchr::memchr(b'\n', rest.as_bytes()) {
        Some(nl) => (rest[..nl].strip_suffix('\r').unwrap_or(&rest[..nl]), pos + nl + 1),
        None => (rest, input.len()),
    })
}
