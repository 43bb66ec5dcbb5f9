//! Scanner for node and relationship patterns in a blanked query.
//!
//! This is not a Cypher parser. It recognises `(var:Label {key: ...})` and
//! `-[var:TYPE|OTHER *1..2 {key: ...}]->` chains, which is what schema
//! checking needs. Anything else is skipped.

use super::lexer::{is_ident_byte, parse_ident, skip_ws};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePattern {
    pub variable: Option<String>,
    pub labels: Vec<String>,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelPattern {
    pub variable: Option<String>,
    pub types: Vec<String>,
    pub keys: Vec<String>,
    pub var_length: bool,
    /// Offset of `<`, if the pattern points left.
    pub left_arrow: Option<usize>,
    /// Offset of `>`, if the pattern points right.
    pub right_arrow: Option<usize>,
    pub left_dash: usize,
    pub right_dash: usize,
}

impl RelPattern {
    pub fn direction(&self) -> Direction {
        match (self.left_arrow, self.right_arrow) {
            (None, Some(_)) => Direction::Outgoing,
            (Some(_), None) => Direction::Incoming,
            _ => Direction::Either,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `(a)-[]->(b)`
    Outgoing,
    /// `(a)<-[]-(b)`
    Incoming,
    /// `(a)-[]-(b)` or `(a)<-[]->(b)`
    Either,
}

/// One relationship between two scanned nodes (indices into `Patterns::nodes`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub left: usize,
    pub rel: RelPattern,
    pub right: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Patterns {
    pub nodes: Vec<NodePattern>,
    pub hops: Vec<Hop>,
}

pub fn scan(blanked: &str) -> Patterns {
    let bytes = blanked.as_bytes();
    let mut patterns = Patterns::default();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'(' || preceded_by_ident(bytes, i) {
            i += 1;
            continue;
        }
        let Some((node, end)) = parse_node(blanked, i) else {
            i += 1;
            continue;
        };

        let mut current = patterns.nodes.len();
        patterns.nodes.push(node);
        i = end;

        while let Some((rel, after_rel)) = parse_rel(blanked, i) {
            let next_start = skip_ws(bytes, after_rel);
            if bytes.get(next_start) != Some(&b'(') {
                break;
            }
            let Some((next, next_end)) = parse_node(blanked, next_start) else {
                break;
            };

            patterns.nodes.push(next);
            let right = patterns.nodes.len() - 1;
            patterns.hops.push(Hop {
                left: current,
                rel,
                right,
            });
            current = right;
            i = next_end;
        }
    }

    patterns
}

fn preceded_by_ident(bytes: &[u8], i: usize) -> bool {
    i > 0 && is_ident_byte(bytes[i - 1])
}

/// Parse `(var:Label:Other {k: v})` at `start`; returns the offset after `)`.
fn parse_node(text: &str, start: usize) -> Option<(NodePattern, usize)> {
    let bytes = text.as_bytes();
    let mut j = skip_ws(bytes, start + 1);

    let mut variable = None;
    if let Some((name, next)) = parse_ident(text, j) {
        variable = Some(name);
        j = skip_ws(bytes, next);
    }

    let mut labels = Vec::new();
    while bytes.get(j) == Some(&b':') {
        j = skip_ws(bytes, j + 1);
        let (label, next) = parse_ident(text, j)?;
        labels.push(label);
        j = skip_ws(bytes, next);
        while matches!(bytes.get(j), Some(b'|') | Some(b'&')) {
            j = skip_ws(bytes, j + 1);
            let (label, next) = parse_ident(text, j)?;
            labels.push(label);
            j = skip_ws(bytes, next);
        }
    }

    let mut keys = Vec::new();
    if bytes.get(j) == Some(&b'{') {
        let (map_keys, next) = parse_map_keys(text, j)?;
        keys = map_keys;
        j = skip_ws(bytes, next);
    }

    // Cypher 5 inline predicate: `(x:Label WHERE x.p = 1)`
    if let Some((word, next)) = parse_ident(text, j) {
        if !word.eq_ignore_ascii_case("WHERE") {
            return None;
        }
        j = closing_paren(bytes, next)?;
    }

    if bytes.get(j) != Some(&b')') {
        return None;
    }

    Some((
        NodePattern {
            variable,
            labels,
            keys,
        },
        j + 1,
    ))
}

/// Offset of the `)` that closes the current group, skipping nested brackets.
fn closing_paren(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, b) in bytes[start..].iter().enumerate() {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' if depth == 0 => return Some(start + offset),
            b')' | b']' | b'}' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }
    None
}

/// Parse `<-[...]-`, `-[...]->`, `--`, `-->` etc. starting at `start` (after a node).
fn parse_rel(text: &str, start: usize) -> Option<(RelPattern, usize)> {
    let bytes = text.as_bytes();
    let mut j = skip_ws(bytes, start);

    let mut left_arrow = None;
    if bytes.get(j) == Some(&b'<') {
        left_arrow = Some(j);
        j += 1;
    }
    if bytes.get(j) != Some(&b'-') {
        return None;
    }
    let left_dash = j;
    j += 1;

    let mut variable = None;
    let mut types = Vec::new();
    let mut keys = Vec::new();
    let mut var_length = false;

    let right_dash = if bytes.get(j) == Some(&b'-') {
        j
    } else {
        j = skip_ws(bytes, j);
        if bytes.get(j) != Some(&b'[') {
            return None;
        }
        j = skip_ws(bytes, j + 1);

        if let Some((name, next)) = parse_ident(text, j) {
            variable = Some(name);
            j = skip_ws(bytes, next);
        }
        if bytes.get(j) == Some(&b':') {
            j = skip_ws(bytes, j + 1);
            let (rel_type, next) = parse_ident(text, j)?;
            types.push(rel_type);
            j = skip_ws(bytes, next);
            while bytes.get(j) == Some(&b'|') {
                j = skip_ws(bytes, j + 1);
                if bytes.get(j) == Some(&b':') {
                    j = skip_ws(bytes, j + 1);
                }
                let (rel_type, next) = parse_ident(text, j)?;
                types.push(rel_type);
                j = skip_ws(bytes, next);
            }
        }
        if bytes.get(j) == Some(&b'*') {
            var_length = true;
            j += 1;
            while j < bytes.len() && (bytes[j].is_ascii_digit() || bytes[j] == b'.' || bytes[j].is_ascii_whitespace()) {
                j += 1;
            }
        }
        if bytes.get(j) == Some(&b'{') {
            let (map_keys, next) = parse_map_keys(text, j)?;
            keys = map_keys;
            j = skip_ws(bytes, next);
        }
        if bytes.get(j) != Some(&b']') {
            return None;
        }
        j = skip_ws(bytes, j + 1);
        if bytes.get(j) != Some(&b'-') {
            return None;
        }
        j
    };
    j = right_dash + 1;

    let mut right_arrow = None;
    if bytes.get(j) == Some(&b'>') {
        right_arrow = Some(j);
        j += 1;
    }

    Some((
        RelPattern {
            variable,
            types,
            keys,
            var_length,
            left_arrow,
            right_arrow,
            left_dash,
            right_dash,
        },
        j,
    ))
}

/// Collect the keys of a `{key: value, ...}` map starting at `start`.
fn parse_map_keys(text: &str, start: usize) -> Option<(Vec<String>, usize)> {
    let bytes = text.as_bytes();
    let mut keys = Vec::new();
    let mut j = skip_ws(bytes, start + 1);

    if bytes.get(j) == Some(&b'}') {
        return Some((keys, j + 1));
    }

    loop {
        let (key, next) = parse_ident(text, j)?;
        keys.push(key);
        j = skip_ws(bytes, next);
        if bytes.get(j) != Some(&b':') {
            return None;
        }
        j += 1;

        // Skip the value up to the next top-level ',' or '}'.
        let mut depth = 0usize;
        loop {
            match bytes.get(j)? {
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' if depth > 0 => depth -= 1,
                b'}' if depth > 0 => depth -= 1,
                b',' if depth == 0 => break,
                b'}' if depth == 0 => return Some((keys, j + 1)),
                b')' | b']' => return None,
                _ => {}
            }
            j += 1;
        }
        j = skip_ws(bytes, j + 1);
    }
}
