//! Byte-level helpers shared by the pattern scanner and the validator.

use super::ValidationError;

/// Replace string literal contents and comments with spaces.
///
/// The result has exactly the same byte length as the input, so offsets found
/// in it can be used to edit the original query. Backtick-quoted identifiers
/// are left untouched.
pub fn blank_literals(query: &str) -> Result<String, ValidationError> {
    let mut out = String::with_capacity(query.len());
    let mut chars = query.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                out.push(c);
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    if inner == '\\' {
                        push_blank(&mut out, inner);
                        if let Some(escaped) = chars.next() {
                            push_blank(&mut out, escaped);
                        }
                    } else if inner == c {
                        out.push(c);
                        closed = true;
                        break;
                    } else {
                        push_blank(&mut out, inner);
                    }
                }
                if !closed {
                    return Err(ValidationError::Syntax(
                        "unterminated string literal".to_string(),
                    ));
                }
            }
            '`' => {
                out.push(c);
                let mut closed = false;
                for inner in chars.by_ref() {
                    out.push(inner);
                    if inner == '`' {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(ValidationError::Syntax(
                        "unterminated quoted identifier".to_string(),
                    ));
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                push_blank(&mut out, c);
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        out.push('\n');
                        break;
                    }
                    push_blank(&mut out, inner);
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                push_blank(&mut out, c);
                if let Some(star) = chars.next() {
                    push_blank(&mut out, star);
                }
                let mut previous = '\0';
                let mut closed = false;
                for inner in chars.by_ref() {
                    push_blank(&mut out, inner);
                    if previous == '*' && inner == '/' {
                        closed = true;
                        break;
                    }
                    previous = inner;
                }
                if !closed {
                    return Err(ValidationError::Syntax("unterminated comment".to_string()));
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn push_blank(out: &mut String, c: char) {
    for _ in 0..c.len_utf8() {
        out.push(' ');
    }
}

/// Check that (), [] and {} nest properly.
pub fn check_balanced(blanked: &str) -> Result<(), ValidationError> {
    let mut stack = Vec::new();
    let mut in_backticks = false;

    for c in blanked.chars() {
        if c == '`' {
            in_backticks = !in_backticks;
            continue;
        }
        if in_backticks {
            continue;
        }
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return Err(ValidationError::Syntax(format!("unbalanced '{c}'")));
                }
            }
            _ => {}
        }
    }

    match stack.last() {
        Some(open) => Err(ValidationError::Syntax(format!("unclosed '{open}'"))),
        None => Ok(()),
    }
}

pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

pub fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

pub fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Parse a plain or backtick-quoted identifier at `i`, returning it and the next offset.
pub fn parse_ident(text: &str, i: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let first = *bytes.get(i)?;

    if first == b'`' {
        let close = text[i + 1..].find('`')? + i + 1;
        return Some((text[i + 1..close].to_string(), close + 1));
    }
    if !is_ident_start(first) {
        return None;
    }

    let mut end = i + 1;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    Some((text[i..end].to_string(), end))
}
