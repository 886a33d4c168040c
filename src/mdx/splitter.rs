use crate::limits::MAX_ESM_LINES;

use super::Segment;
use super::expr::find_expression_end;
use super::jsx_tag::parse_jsx_tag;

/// Split MDX input into typed segments.
///
/// Line-based: each line is ESM (`import`/`export`), a block-level JSX
/// tag, a block-level expression, or Markdown. Inline JSX inside a
/// paragraph stays Markdown. Lines inside fenced code blocks are always
/// Markdown, so widget tags shown in code samples are left alone.
///
/// The returned segments cover the whole input; no bytes are dropped.
pub fn split(input: &str) -> Vec<Segment<'_>> {
    let mut splitter = Splitter::new(input);
    splitter.run();
    splitter.segments
}

/// An open code fence: its marker byte and run length.
#[derive(Clone, Copy)]
struct Fence {
    marker: u8,
    len: usize,
}

struct Splitter<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    md_start: Option<usize>,
    /// The previous line was paragraph text. ESM cannot interrupt a
    /// paragraph.
    in_paragraph: bool,
    fence: Option<Fence>,
    segments: Vec<Segment<'a>>,
}

impl<'a> Splitter<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            md_start: None,
            in_paragraph: false,
            fence: None,
            segments: Vec::new(),
        }
    }

    fn run(&mut self) {
        while self.pos < self.bytes.len() {
            let line_start = self.pos;
            let first = skip_blanks(self.bytes, line_start);

            if self.fence.is_some() {
                self.fenced_line(line_start, first);
                continue;
            }

            match self.bytes.get(first) {
                None | Some(b'\n' | b'\r') => {
                    self.in_paragraph = false;
                    self.markdown_line(line_start);
                    continue;
                }
                _ => {}
            }

            if self.try_construct(line_start, first) {
                self.in_paragraph = false;
                continue;
            }

            if let Some(fence) = fence_open(self.bytes, first) {
                if first - line_start < 4 {
                    self.fence = Some(fence);
                    self.in_paragraph = false;
                    self.markdown_line(line_start);
                    continue;
                }
            }

            self.in_paragraph = true;
            self.markdown_line(line_start);
        }

        if let Some(start) = self.md_start.take() {
            self.segments.push(Segment::Markdown(&self.input[start..]));
        }
    }

    /// Try ESM, a closing tag, an expression or an opening tag at
    /// `first`, in that order. On success the segment is pushed and the
    /// cursor moved past it.
    fn try_construct(&mut self, line_start: usize, first: usize) -> bool {
        let bytes = self.bytes;

        if first == line_start && !self.in_paragraph {
            if let Some(end) = esm_end(bytes, line_start) {
                self.push(line_start, Segment::Esm(&self.input[line_start..end]), end);
                return true;
            }
        }

        match bytes[first] {
            b'{' => {
                let Some(len) = find_expression_end(&bytes[first..]) else {
                    return false;
                };
                let Some(end) = flow_end(bytes, first + len) else {
                    return false;
                };
                self.push(line_start, Segment::Expression(&self.input[line_start..end]), end);
                true
            }
            b'<' => {
                let starts_tag = bytes
                    .get(first + 1)
                    .is_some_and(|&b| b.is_ascii_alphabetic() || b == b'/' || b == b'>');
                if !starts_tag {
                    return false;
                }
                let Some(tag) = parse_jsx_tag(&bytes[first..]) else {
                    return false;
                };
                let Some(end) = flow_end(bytes, first + tag.end_offset) else {
                    return false;
                };
                let slice = &self.input[line_start..end];
                let segment = if tag.is_closing {
                    Segment::JsxBlockClose(slice)
                } else if tag.is_self_closing {
                    Segment::JsxBlockSelfClose(slice)
                } else {
                    Segment::JsxBlockOpen(slice)
                };
                self.push(line_start, segment, end);
                true
            }
            _ => false,
        }
    }

    fn fenced_line(&mut self, line_start: usize, first: usize) {
        if let (Some(open), Some(close)) = (self.fence, fence_open(self.bytes, first)) {
            let info_blank = flow_end(self.bytes, first + close.len).is_some();
            if close.marker == open.marker && close.len >= open.len && info_blank {
                self.fence = None;
            }
        }
        self.markdown_line(line_start);
    }

    fn markdown_line(&mut self, line_start: usize) {
        if self.md_start.is_none() {
            self.md_start = Some(line_start);
        }
        self.pos = next_line(self.bytes, line_start);
    }

    fn push(&mut self, line_start: usize, segment: Segment<'a>, end: usize) {
        if let Some(start) = self.md_start.take() {
            if start < line_start {
                self.segments.push(Segment::Markdown(&self.input[start..line_start]));
            }
        }
        self.segments.push(segment);
        self.pos = end;
    }
}

/// Offset after the current line's `\n`, or the input length.
fn next_line(bytes: &[u8], pos: usize) -> usize {
    memchr::memchr(b'\n', &bytes[pos..]).map_or(bytes.len(), |nl| pos + nl + 1)
}

fn skip_blanks(bytes: &[u8], mut pos: usize) -> usize {
    while matches!(bytes.get(pos), Some(b' ' | b'\t')) {
        pos += 1;
    }
    pos
}

/// A flow (block) construct ends its line: only blanks may follow. Returns
/// the offset after the line break, or `None` when text follows
/// (`<x />.` is inline, not flow).
fn flow_end(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut pos = skip_blanks(bytes, pos);
    if bytes.get(pos) == Some(&b'\r') {
        pos += 1;
    }
    match bytes.get(pos) {
        None => Some(pos),
        Some(b'\n') => Some(pos + 1),
        Some(_) => None,
    }
}

/// A backtick or tilde run of three or more at `pos`.
fn fence_open(bytes: &[u8], pos: usize) -> Option<Fence> {
    let marker = *bytes.get(pos)?;
    if marker != b'`' && marker != b'~' {
        return None;
    }
    let len = bytes[pos..].iter().take_while(|&&b| b == marker).count();
    (len >= 3).then_some(Fence { marker, len })
}

/// End of an ESM statement starting at column 0 of `pos`, or `None` when
/// the line is not ESM.
///
/// A statement continues over following lines until a blank line, a line
/// that starts another construct, a line ending in `;`, or
/// [`MAX_ESM_LINES`] lines.
fn esm_end(bytes: &[u8], pos: usize) -> Option<usize> {
    let rest = &bytes[pos..];
    let keyword = if rest.starts_with(b"import") {
        "import"
    } else if rest.starts_with(b"export") {
        "export"
    } else {
        return None;
    };
    let after = rest.get(keyword.len()).copied();
    let valid = match keyword {
        // `import(` and `import.meta` are expressions, not statements.
        "import" => matches!(after, Some(b' ' | b'\t' | b'{' | b'"' | b'\'' | b'*')) && {
            let next = skip_blanks(rest, keyword.len());
            !matches!(rest.get(next), Some(b'(' | b'.'))
        },
        _ => matches!(after, Some(b' ' | b'\t' | b'{' | b'*')),
    };
    if !valid {
        return None;
    }

    let mut end = next_line(bytes, pos);
    let mut lines = 1;
    while end < bytes.len() && lines < MAX_ESM_LINES {
        if ends_statement(&bytes[pos..end]) {
            break;
        }
        let next = &bytes[end..];
        let first = skip_blanks(bytes, end);
        let blank = matches!(bytes.get(first), None | Some(b'\n' | b'\r'));
        let new_construct = [b"import ".as_slice(), b"export ", b"<", b"{", b"#"]
            .iter()
            .any(|prefix| next.starts_with(prefix));
        if blank || new_construct {
            break;
        }
        end = next_line(bytes, end);
        lines += 1;
    }
    Some(end)
}

/// The line (including its break) ends in `;`.
fn ends_statement(line: &[u8]) -> bool {
    line.iter()
        .rev()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b';')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_markdown() {
        let input = "# Hello\n\nWorld\n";
        assert_eq!(split(input), vec![Segment::Markdown(input)]);
    }

    #[test]
    fn empty_input() {
        assert!(split("").is_empty());
    }

    #[test]
    fn import_then_markdown() {
        let segs = split("import Foo from 'foo'\n\n# Hello\n");
        assert_eq!(
            segs,
            vec![Segment::Esm("import Foo from 'foo'\n"), Segment::Markdown("\n# Hello\n")]
        );
    }

    #[test]
    fn esm_forms() {
        for line in [
            "import {a, b} from 'x'\n",
            "import * as ns from 'x'\n",
            "import 'side-effect'\n",
            "import \"side-effect\"\n",
            "export const meta = {}\n",
            "export default function Page() {}\n",
            "export * from 'x'\n",
            "export {a} from 'x'\n",
        ] {
            assert_eq!(split(line), vec![Segment::Esm(line)], "{line:?}");
        }
    }

    #[test]
    fn consecutive_imports_are_separate() {
        let segs = split("import A from 'a'\nimport B from 'b'\n");
        assert_eq!(segs, vec![Segment::Esm("import A from 'a'\n"), Segment::Esm("import B from 'b'\n")]);
    }

    #[test]
    fn multiline_export() {
        let input = "export const meta = {\n  title: 'x',\n}\n\nText\n";
        let segs = split(input);
        assert_eq!(segs[0], Segment::Esm("export const meta = {\n  title: 'x',\n}\n"));
        assert_eq!(segs[1], Segment::Markdown("\nText\n"));
    }

    #[test]
    fn semicolon_ends_statement() {
        let segs = split("import A from 'a';\nsome text\n");
        assert_eq!(segs[0], Segment::Esm("import A from 'a';\n"));
        assert_eq!(segs[1], Segment::Markdown("some text\n"));
    }

    #[test]
    fn esm_line_limit() {
        let mut input = String::from("export const big = [\n");
        for _ in 0..MAX_ESM_LINES + 10 {
            input.push_str("  1,\n");
        }
        let segs = split(&input);
        let Segment::Esm(esm) = segs[0] else { panic!("expected ESM") };
        assert_eq!(esm.lines().count(), MAX_ESM_LINES);
        assert!(matches!(segs[1], Segment::Markdown(_)));
    }

    #[test]
    fn not_esm() {
        for input in [
            "important things\n",
            "exporting goods\n",
            "import.meta.url\n",
            "import('x')\n",
            "import ('x')\n",
            " import A from 'a'\n",
        ] {
            assert_eq!(split(input), vec![Segment::Markdown(input)], "{input:?}");
        }
    }

    #[test]
    fn esm_cannot_interrupt_paragraph() {
        let input = "Some text\nimport A from 'a'\n";
        assert_eq!(split(input), vec![Segment::Markdown(input)]);

        let segs = split("Some text\n\nimport A from 'a'\n");
        assert_eq!(segs[1], Segment::Esm("import A from 'a'\n"));
    }

    #[test]
    fn widget_block() {
        let segs = split("<MdxAccordion>\nLabel\n\n---\n\nBody\n</MdxAccordion>\n");
        assert_eq!(
            segs,
            vec![
                Segment::JsxBlockOpen("<MdxAccordion>\n"),
                Segment::Markdown("Label\n\n---\n\nBody\n"),
                Segment::JsxBlockClose("</MdxAccordion>\n"),
            ]
        );
    }

    #[test]
    fn self_closing_and_fragments() {
        assert_eq!(split("  <Card />\n"), vec![Segment::JsxBlockSelfClose("  <Card />\n")]);
        assert_eq!(
            split("<>\nx\n</>\n"),
            vec![
                Segment::JsxBlockOpen("<>\n"),
                Segment::Markdown("x\n"),
                Segment::JsxBlockClose("</>\n"),
            ]
        );
    }

    #[test]
    fn multiline_tag() {
        let input = "<MdxPopover\n  defaultOpen\n>\nx\n</MdxPopover>";
        let segs = split(input);
        assert_eq!(segs[0], Segment::JsxBlockOpen("<MdxPopover\n  defaultOpen\n>\n"));
        assert_eq!(segs[2], Segment::JsxBlockClose("</MdxPopover>"));
    }

    #[test]
    fn trailing_or_leading_text_is_markdown() {
        for input in ["<Foo /> trailing\n", "text <Foo />\n", "</Foo> more\n", "{a} b\n", "< 5 is true\n"] {
            assert_eq!(split(input), vec![Segment::Markdown(input)], "{input:?}");
        }
    }

    #[test]
    fn expressions() {
        assert_eq!(split("{1 + 1}\n"), vec![Segment::Expression("{1 + 1}\n")]);
        assert_eq!(split("  {x}  \n"), vec![Segment::Expression("  {x}  \n")]);
        assert_eq!(split("{\n  a\n}\n"), vec![Segment::Expression("{\n  a\n}\n")]);
        assert_eq!(split("{unterminated\n"), vec![Segment::Markdown("{unterminated\n")]);
    }

    #[test]
    fn crlf_line_endings() {
        let segs = split("<MdxInfo>\r\nHi\r\n</MdxInfo>\r\n");
        assert_eq!(segs[0], Segment::JsxBlockOpen("<MdxInfo>\r\n"));
        assert_eq!(segs[1], Segment::Markdown("Hi\r\n"));
        assert_eq!(segs[2], Segment::JsxBlockClose("</MdxInfo>\r\n"));
    }

    #[test]
    fn fenced_code_is_markdown() {
        let input = "```mdx\n<MdxTabs>\nimport A from 'a'\n{x}\n```\n<MdxTabs>\n";
        let segs = split(input);
        assert_eq!(segs[0], Segment::Markdown("```mdx\n<MdxTabs>\nimport A from 'a'\n{x}\n```\n"));
        assert_eq!(segs[1], Segment::JsxBlockOpen("<MdxTabs>\n"));
    }

    #[test]
    fn fence_needs_matching_marker() {
        let input = "~~~~\n```\n<A />\n~~~~\n<A />\n";
        let segs = split(input);
        assert_eq!(segs[0], Segment::Markdown("~~~~\n```\n<A />\n~~~~\n"));
        assert_eq!(segs[1], Segment::JsxBlockSelfClose("<A />\n"));
    }

    #[test]
    fn segments_cover_input() {
        let input = "import A from 'a'\n\n# T\n\n<MdxTabs>\n# One\n\nx\n</MdxTabs>\n{y}\ntail";
        let joined: String = split(input).iter().map(Segment::as_str).collect();
        assert_eq!(joined, input);
    }
}
