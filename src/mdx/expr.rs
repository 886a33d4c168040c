//! Brace matching for JSX expressions (`{...}`).

use crate::limits::MAX_EXPRESSION_DEPTH;

/// Find the end of a JSX expression starting at `{`.
///
/// `bytes` must begin with `{`. Returns the byte offset **after** the
/// closing `}`, or `None` if the expression is unterminated or nests deeper
/// than [`MAX_EXPRESSION_DEPTH`].
///
/// Braces inside strings, template literals and comments do not count.
/// Template literal `${...}` holes nest.
pub fn find_expression_end(bytes: &[u8]) -> Option<usize> {
    debug_assert!(bytes.first() == Some(&b'{'));
    scan(bytes, 0, 0)
}

/// Scan from the `{` at `start`. `depth` is the nesting of enclosing
/// template holes.
fn scan(bytes: &[u8], start: usize, depth: usize) -> Option<usize> {
    let len = bytes.len();
    let mut braces = 0usize;
    let mut pos = start;

    while pos < len {
        match bytes[pos] {
            b'{' => {
                braces += 1;
                if braces + depth > MAX_EXPRESSION_DEPTH {
                    return None;
                }
                pos += 1;
            }
            b'}' => {
                braces -= 1;
                pos += 1;
                if braces == 0 {
                    return Some(pos);
                }
            }
            quote @ (b'"' | b'\'') => pos = skip_quoted(bytes, pos, quote)?,
            b'`' => pos = skip_template(bytes, pos, depth + braces)?,
            b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                pos = memchr::memchr(b'\n', &bytes[pos..]).map_or(len, |nl| pos + nl + 1);
            }
            b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                let close = memchr::memmem::find(&bytes[pos + 2..], b"*/")?;
                pos += 2 + close + 2;
            }
            _ => pos += 1,
        }
    }
    None
}

/// Skip a string delimited by `quote`, honouring backslash escapes.
/// `start` points at the opening quote; returns the offset after the
/// closing one.
pub(crate) fn skip_quoted(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b if b == quote => return Some(pos + 1),
            _ => pos += 1,
        }
    }
    None
}

fn skip_template(bytes: &[u8], start: usize, depth: usize) -> Option<usize> {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'`' => return Some(pos + 1),
            b'$' if bytes.get(pos + 1) == Some(&b'{') => pos = scan(bytes, pos + 1, depth)?,
            _ => pos += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_expression() {
        assert_eq!(find_expression_end(b"{x}"), Some(3));
        assert_eq!(find_expression_end(b"{}"), Some(2));
    }

    #[test]
    fn nested_braces() {
        assert_eq!(find_expression_end(b"{a{b}c} tail"), Some(7));
    }

    #[test]
    fn braces_in_strings() {
        assert_eq!(find_expression_end(b"{\"}\"}"), Some(5));
        assert_eq!(find_expression_end(b"{'}'} rest"), Some(5));
        assert_eq!(find_expression_end(b"{\"a\\\"b\"}"), Some(8));
    }

    #[test]
    fn template_literals() {
        assert_eq!(find_expression_end(b"{`}`}"), Some(5));
        assert_eq!(find_expression_end(b"{`${a}`}"), Some(8));
        let input = b"{fn() { return { x: `${y}` }; }}";
        assert_eq!(find_expression_end(input), Some(input.len()));
    }

    #[test]
    fn comments() {
        assert_eq!(find_expression_end(b"{// }\n}"), Some(7));
        assert_eq!(find_expression_end(b"{/* } */}"), Some(9));
        assert_eq!(find_expression_end(b"{a / b}"), Some(7));
    }

    #[test]
    fn unterminated() {
        assert_eq!(find_expression_end(b"{abc"), None);
        assert_eq!(find_expression_end(b"{\"abc}"), None);
        assert_eq!(find_expression_end(b"{/* }"), None);
    }

    #[test]
    fn depth_limit() {
        let deep = format!("{}{}", "{".repeat(MAX_EXPRESSION_DEPTH + 1), "}".repeat(MAX_EXPRESSION_DEPTH + 1));
        assert_eq!(find_expression_end(deep.as_bytes()), None);
        let ok = format!("{}{}", "{".repeat(MAX_EXPRESSION_DEPTH), "}".repeat(MAX_EXPRESSION_DEPTH));
        assert_eq!(find_expression_end(ok.as_bytes()), Some(ok.len()));
    }
}
