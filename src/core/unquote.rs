//! Go string literal unquoting.
//!
//! Mirrors Go's `strconv.Unquote` for the two string literal forms:
//! interpreted (`"..."`) literals with backslash escapes, and raw
//! (`` `...` ``) literals where only carriage returns are discarded.
//! Byte escapes (`\x`, octal) that do not assemble into valid UTF-8 make the
//! whole literal unrepresentable, and `None` is returned.

/// Text between the delimiters of a string literal token, still escaped.
///
/// Returns `None` if the token is not delimited by matching `"` or `` ` ``.
pub fn raw_body(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let quote = bytes[0];
    if (quote != b'"' && quote != b'`') || bytes[bytes.len() - 1] != quote {
        return None;
    }
    Some(&token[1..token.len() - 1])
}

/// Unquote a Go string literal token, including its delimiters.
pub fn unquote(token: &str) -> Option<String> {
    let body = raw_body(token)?;
    if token.starts_with('`') {
        if body.contains('`') {
            return None;
        }
        return Some(body.replace('\r', ""));
    }
    unquote_interpreted(body)
}

fn unquote_interpreted(body: &str) -> Option<String> {
    if !body.contains('\\') {
        if body.contains('"') || body.contains('\n') {
            return None;
        }
        return Some(body.to_string());
    }

    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => {
                let esc = chars.next()?;
                match esc {
                    'a' => out.push(0x07),
                    'b' => out.push(0x08),
                    'f' => out.push(0x0c),
                    'n' => out.push(b'\n'),
                    'r' => out.push(b'\r'),
                    't' => out.push(b'\t'),
                    'v' => out.push(0x0b),
                    '\\' => out.push(b'\\'),
                    '"' => out.push(b'"'),
                    'x' => out.push(read_radix(&mut chars, 16, 2)? as u8),
                    'u' => push_char(&mut out, read_radix(&mut chars, 16, 4)?)?,
                    'U' => push_char(&mut out, read_radix(&mut chars, 16, 8)?)?,
                    '0'..='7' => {
                        let rest = read_radix(&mut chars, 8, 2)?;
                        let value = (esc as u32 - '0' as u32) * 64 + rest;
                        if value > 0xff {
                            return None;
                        }
                        out.push(value as u8);
                    }
                    _ => return None,
                }
            }
            _ => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    String::from_utf8(out).ok()
}

fn read_radix(chars: &mut std::str::Chars<'_>, radix: u32, digits: usize) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars.next()?.to_digit(radix)?;
        value = value * radix + digit;
    }
    Some(value)
}

fn push_char(out: &mut Vec<u8>, code: u32) -> Option<()> {
    let c = char::from_u32(code)?;
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    Some(())
}
