//! CSS subset reader for flow stylesheets.
//!
//! Only plain rulesets are accepted: a comma-separated selector list followed
//! by a `{ property: value; ... }` block. Selectors are kept as whitespace
//! separated parts; their meaning is decided by the consumer. At-rules,
//! `!important` and nested blocks are rejected.

use crate::cursor::Cursor;
use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

/// One selector of a selector list, e.g. `#menu button` → `["#menu", "button"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub parts: Vec<String>,
    pub line: usize,
    pub col: usize,
}

impl Selector {
    pub fn as_css(&self) -> String {
        self.parts.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub line: usize,
    pub col: usize,
}

/// Parses a stylesheet.
pub fn parse_css(src: &str) -> Result<Stylesheet, ParseError> {
    let cleaned = strip_comments(src)?;
    let mut cur = Cursor::new(&cleaned);
    let mut rules = Vec::new();

    loop {
        cur.skip_whitespace();
        if cur.is_eof() {
            break;
        }
        if cur.starts_with("@") {
            return Err(cur.err("at-rules are not supported"));
        }
        rules.push(parse_rule(&mut cur)?);
    }

    Ok(Stylesheet { rules })
}

/// Blanks out `/* */` comments, keeping newlines so positions stay valid.
fn strip_comments(src: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(src.len());
    let mut cur = Cursor::new(src);
    while !cur.is_eof() {
        if cur.starts_with("/*") {
            let (line, col) = cur.position();
            cur.eat("/*");
            let body = cur
                .take_until("*/", "comment")
                .map_err(|_| ParseError::new("unterminated comment", line, col))?;
            out.push_str("  ");
            out.extend(body.chars().map(|c| if c == '\n' { '\n' } else { ' ' }));
            out.push_str("  ");
        } else if let Some(c) = cur.advance() {
            out.push(c);
        }
    }
    Ok(out)
}

fn parse_rule(cur: &mut Cursor<'_>) -> Result<Rule, ParseError> {
    let selectors = parse_selectors(cur)?;
    cur.expect("{")?;

    let mut declarations = Vec::new();
    loop {
        cur.skip_whitespace();
        if cur.eat("}") {
            break;
        }
        if cur.is_eof() {
            return Err(cur.err("expected `}` before end of input"));
        }
        if cur.eat(";") {
            continue;
        }
        declarations.push(parse_declaration(cur)?);
    }

    Ok(Rule { selectors, declarations })
}

fn parse_selectors(cur: &mut Cursor<'_>) -> Result<Vec<Selector>, ParseError> {
    let mut selectors = Vec::new();
    loop {
        cur.skip_whitespace();
        let (line, col) = cur.position();
        let raw = cur.take_while(|c| c != ',' && c != '{' && c != '}' && c != ';');
        let parts: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
        if parts.is_empty() {
            return Err(ParseError::new("expected a selector", line, col));
        }
        selectors.push(Selector { parts, line, col });

        match cur.peek() {
            Some(',') => {
                cur.advance();
            }
            Some('{') => return Ok(selectors),
            Some(c) => return Err(cur.err(format!("unexpected {c:?} in selector"))),
            None => return Err(cur.err("expected `{` before end of input")),
        }
    }
}

fn is_property_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_declaration(cur: &mut Cursor<'_>) -> Result<Declaration, ParseError> {
    let (line, col) = cur.position();
    let property = cur.take_while(is_property_char);
    if property.is_empty() {
        return Err(cur.err("expected a property name"));
    }
    let property = property.to_ascii_lowercase();

    cur.skip_whitespace();
    cur.expect(":")?;
    cur.skip_whitespace();

    let value = cur.take_while(|c| c != ';' && c != '}' && c != '{').trim().to_string();
    if cur.starts_with("{") {
        return Err(cur.err("nested blocks are not supported"));
    }
    if value.is_empty() {
        return Err(cur.err(format!("missing value for `{property}`")));
    }
    if value.ends_with("!important") {
        return Err(ParseError::new("`!important` is not supported", line, col));
    }
    cur.eat(";");

    Ok(Declaration { property, value, line, col })
}
