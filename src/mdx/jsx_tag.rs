//! JSX tag parsing: names, kinds and attributes.

use smallvec::SmallVec;

use super::expr::{find_expression_end, skip_quoted};

/// The value side of a JSX attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue<'a> {
    /// `disabled`
    Bare,
    /// `title="x"` or `title='x'`, without the quotes.
    Str(&'a str),
    /// `open={true}`, without the braces.
    Expr(&'a str),
}

/// One attribute of an opening tag. Spread attributes (`{...props}`) are
/// skipped; they carry nothing a static renderer can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attr<'a> {
    pub name: &'a str,
    pub value: AttrValue<'a>,
}

impl Attr<'_> {
    /// Interpret the attribute as a boolean prop: `x`, `x={true}` and
    /// `x="true"` are true; everything else is false.
    pub fn is_true(&self) -> bool {
        match self.value {
            AttrValue::Bare => true,
            AttrValue::Str(s) | AttrValue::Expr(s) => s.trim() == "true",
        }
    }
}

pub type Attrs<'a> = SmallVec<[Attr<'a>; 4]>;

/// A parsed JSX tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo<'a> {
    /// Tag name (`"MdxTabs"`, `"Foo.Bar"`, `""` for fragments).
    pub name: &'a str,
    pub attrs: Attrs<'a>,
    /// `<Foo />`
    pub is_self_closing: bool,
    /// `</Foo>`
    pub is_closing: bool,
    /// Byte offset after the closing `>`.
    pub end_offset: usize,
}

impl<'a> TagInfo<'a> {
    fn new(name: &'a str, end_offset: usize) -> Self {
        Self {
            name,
            attrs: SmallVec::new(),
            is_self_closing: false,
            is_closing: false,
            end_offset,
        }
    }

    /// Look up an attribute by name.
    pub fn attr(&self, name: &str) -> Option<&Attr<'a>> {
        self.attrs.iter().find(|attr| attr.name == name)
    }
}

/// Parse a JSX tag at the start of `input`.
///
/// `input` must begin with `<`. Returns `None` for anything that is not a
/// well-formed tag (`< 5`, `<123>`, an unterminated attribute).
///
/// Accepts opening, closing and self-closing tags, fragments, member
/// expressions (`<Foo.Bar>`), namespaces (`<svg:rect>`), and attributes
/// spread over several lines.
pub fn parse_jsx_tag(input: &[u8]) -> Option<TagInfo<'_>> {
    if input.len() < 2 || input[0] != b'<' {
        return None;
    }

    let mut pos = 1;
    let is_closing = input[pos] == b'/';
    if is_closing {
        pos += 1;
    }

    if input.get(pos) == Some(&b'>') {
        let mut info = TagInfo::new("", pos + 1);
        info.is_closing = is_closing;
        return Some(info);
    }

    let name_end = scan_name(input, pos)?;
    let name = std::str::from_utf8(&input[pos..name_end]).ok()?;
    pos = skip_whitespace(input, name_end);

    if is_closing {
        if input.get(pos) != Some(&b'>') {
            return None;
        }
        let mut info = TagInfo::new(name, pos + 1);
        info.is_closing = true;
        return Some(info);
    }

    let mut info = TagInfo::new(name, 0);
    loop {
        match *input.get(pos)? {
            b'>' => {
                info.end_offset = pos + 1;
                return Some(info);
            }
            b'/' if input.get(pos + 1) == Some(&b'>') => {
                info.is_self_closing = true;
                info.end_offset = pos + 2;
                return Some(info);
            }
            b'{' => pos += find_expression_end(&input[pos..])?,
            b if b.is_ascii_alphabetic() || b == b'_' => {
                let (attr, end) = parse_attr(input, pos)?;
                info.attrs.push(attr);
                pos = end;
            }
            _ => return None,
        }
        pos = skip_whitespace(input, pos);
    }
}

/// Scan `Ident(('.' | ':') Ident)*` from `pos`; returns its end.
fn scan_name(input: &[u8], mut pos: usize) -> Option<usize> {
    loop {
        if !input.get(pos)?.is_ascii_alphabetic() {
            return None;
        }
        while input
            .get(pos)
            .is_some_and(|&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            pos += 1;
        }
        match input.get(pos) {
            Some(b'.' | b':') => pos += 1,
            _ => return Some(pos),
        }
    }
}

fn parse_attr(input: &[u8], start: usize) -> Option<(Attr<'_>, usize)> {
    let mut pos = start;
    while input
        .get(pos)
        .is_some_and(|&b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.'))
    {
        pos += 1;
    }
    let name = std::str::from_utf8(&input[start..pos]).ok()?;

    let after_name = skip_whitespace(input, pos);
    if input.get(after_name) != Some(&b'=') {
        return Some((Attr { name, value: AttrValue::Bare }, pos));
    }

    pos = skip_whitespace(input, after_name + 1);
    let (value, end) = match *input.get(pos)? {
        quote @ (b'"' | b'\'') => {
            let end = skip_quoted(input, pos, quote)?;
            (AttrValue::Str(std::str::from_utf8(&input[pos + 1..end - 1]).ok()?), end)
        }
        b'{' => {
            let end = pos + find_expression_end(&input[pos..])?;
            (AttrValue::Expr(std::str::from_utf8(&input[pos + 1..end - 1]).ok()?), end)
        }
        _ => {
            // Unquoted value; not JSX, but harmless to accept.
            let mut end = pos;
            while input
                .get(end)
                .is_some_and(|&b| !b.is_ascii_whitespace() && b != b'>' && b != b'/')
            {
                end += 1;
            }
            (AttrValue::Str(std::str::from_utf8(&input[pos..end]).ok()?), end)
        }
    };
    Some((Attr { name, value }, end))
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
        pos += 1;
    }
    pos
}
