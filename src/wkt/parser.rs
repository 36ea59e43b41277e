//!
//! WKT tokenizer
//!
//! A state machine maps the bracketed WKT syntax onto a nested list of
//! nodes. Both `[]` and `()` brackets are accepted, quoted strings may
//! embed doubled quotes and arbitrary whitespace may separate tokens.
//!
use crate::errors::{Error, Result};

/// A node attribute: quoted string, bare word (numbers, direction
/// keywords, ...) or nested node
#[derive(Debug, PartialEq)]
pub(crate) enum Attr<'a> {
    Quoted(&'a str),
    Word(&'a str),
    Node(Node<'a>),
}

/// One `KEYWORD[attr, ...]` element
#[derive(Debug, PartialEq)]
pub(crate) struct Node<'a> {
    pub key: &'a str,
    pub attrs: Vec<Attr<'a>>,
}

impl<'a> Node<'a> {
    /// First quoted attribute, conventionally the name
    pub fn name(&self) -> Option<&'a str> {
        self.attrs.iter().find_map(|a| match a {
            Attr::Quoted(s) => Some(*s),
            _ => None,
        })
    }

    /// Iterate over nested nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node<'a>> {
        self.attrs.iter().filter_map(|a| match a {
            Attr::Node(n) => Some(n),
            _ => None,
        })
    }

    /// First nested node with the given key
    pub fn find(&self, keys: &[&str]) -> Option<&Node<'a>> {
        self.nodes()
            .find(|n| keys.iter().any(|k| n.key.eq_ignore_ascii_case(k)))
    }

    /// Word attribute at position `i` (quoted attributes included)
    pub fn arg(&self, i: usize) -> Option<&'a str> {
        self.attrs
            .iter()
            .filter_map(|a| match a {
                Attr::Quoted(s) | Attr::Word(s) => Some(*s),
                _ => None,
            })
            .nth(i)
    }

    /// Numeric attribute at position `i` among plain values
    pub fn number(&self, i: usize) -> Result<f64> {
        self.arg(i)
            .ok_or_else(|| Error::WktError(format!("Missing value in {}", self.key)))
            .and_then(parse_number)
    }
}

pub(crate) fn parse_number(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|_| Error::WktError(format!("Error parsing number: {s}")))
}

/// Parse a WKT string into its root node
pub(crate) fn parse(s: &str) -> Result<Node<'_>> {
    let (node, rest) = parse_node(s.trim_start())?;
    if !rest.trim_start().is_empty() {
        return Err(Error::WktError("Trailing content after WKT".into()));
    }
    Ok(node)
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse_node(s: &str) -> Result<(Node<'_>, &str)> {
    let key_end = s.find(|c: char| !is_key_char(c)).unwrap_or(s.len());
    if key_end == 0 {
        return Err(Error::WktError(format!(
            "Expected keyword at: {:.20}",
            s
        )));
    }
    let key = &s[..key_end];
    let rest = s[key_end..].trim_start();

    let close = match rest.chars().next() {
        Some('[') => ']',
        Some('(') => ')',
        _ => {
            return Err(Error::WktError(format!(
                "Expected bracket after keyword {key}"
            )))
        }
    };

    let mut rest = &rest[1..];
    let mut attrs = vec![];
    loop {
        rest = rest.trim_start();
        match rest.chars().next() {
            None => return Err(Error::WktError(format!("Unterminated {key}"))),
            Some(c) if c == close => {
                rest = &rest[1..];
                break;
            }
            Some(',') => {
                rest = &rest[1..];
            }
            Some('"') => {
                let (quoted, r) = parse_quoted(rest)?;
                attrs.push(Attr::Quoted(quoted));
                rest = r;
            }
            Some(c) if is_key_char(c) => {
                // Either a nested node or a bare word: look at the next
                // non key character
                let end = rest.find(|c: char| !is_key_char(c)).unwrap_or(rest.len());
                let ahead = rest[end..].trim_start();
                if ahead.starts_with('[') || ahead.starts_with('(') {
                    let (node, r) = parse_node(rest)?;
                    attrs.push(Attr::Node(node));
                    rest = r;
                } else {
                    // Numbers may carry signs, dots and exponents:
                    // extend the word to the next separator
                    let end = rest
                        .find(|c: char| c == ',' || c == close || c.is_whitespace())
                        .unwrap_or(rest.len());
                    attrs.push(Attr::Word(rest[..end].trim_end()));
                    rest = &rest[end..];
                }
            }
            Some(c) if c == '-' || c == '+' || c == '.' => {
                let end = rest
                    .find(|c: char| c == ',' || c == close || c.is_whitespace())
                    .unwrap_or(rest.len());
                attrs.push(Attr::Word(rest[..end].trim_end()));
                rest = &rest[end..];
            }
            Some(c) => {
                return Err(Error::WktError(format!(
                    "Unexpected character '{c}' in {key}"
                )))
            }
        }
    }

    Ok((Node { key, attrs }, rest))
}

/// Parse a quoted string, handling embedded `""` escapes.
/// Returns the raw content between the outer quotes.
fn parse_quoted(s: &str) -> Result<(&str, &str)> {
    debug_assert!(s.starts_with('"'));
    let inner = &s[1..];
    let mut offset = 0;
    let bytes = inner.as_bytes();
    while offset < bytes.len() {
        if bytes[offset] == b'"' {
            if bytes.get(offset + 1) == Some(&b'"') {
                // escaped quote
                offset += 2;
            } else {
                return Ok((&inner[..offset], &inner[offset + 1..]));
            }
        } else {
            offset += 1;
        }
    }
    Err(Error::WktError("Unterminated quoted string".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wkt_parse_simple() {
        let node = parse(r#"UNIT["metre",1,AUTHORITY["EPSG","9001"]]"#).unwrap();
        assert_eq!(node.key, "UNIT");
        assert_eq!(node.name(), Some("metre"));
        assert_eq!(node.arg(1), Some("1"));
        let auth = node.find(&["AUTHORITY"]).unwrap();
        assert_eq!(auth.name(), Some("EPSG"));
    }

    #[test]
    fn wkt_parse_parens_and_whitespace() {
        let node = parse("GEOGCS ( \"x\" , DATUM ( \"d\" , SPHEROID(\"s\", 1, 2) ) )").unwrap();
        assert_eq!(node.key, "GEOGCS");
        let datum = node.find(&["DATUM"]).unwrap();
        let sph = datum.find(&["SPHEROID"]).unwrap();
        assert_eq!(sph.number(1).unwrap(), 1.);
        assert_eq!(sph.number(2).unwrap(), 2.);
    }

    #[test]
    fn wkt_parse_embedded_quotes() {
        let node = parse(r#"UNIT["me""tre",1]"#).unwrap();
        assert_eq!(node.name(), Some(r#"me""tre"#));
    }

    #[test]
    fn wkt_parse_bare_words() {
        let node = parse(r#"AXIS["Easting",EAST]"#).unwrap();
        assert_eq!(node.arg(1), Some("EAST"));
    }

    #[test]
    fn wkt_parse_negative_numbers() {
        let node = parse(r#"PARAMETER["latitude_of_origin",-41.5]"#).unwrap();
        assert_eq!(node.number(1).unwrap(), -41.5);
    }

    #[test]
    fn wkt_parse_errors() {
        assert!(parse("FOO").is_err());
        assert!(parse("FOO[").is_err());
        assert!(parse(r#"FOO["bar"#).is_err());
    }
}
