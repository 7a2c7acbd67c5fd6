//! Minimal XML reader for flow documents.
//!
//! Supports elements, attributes (single or double quoted), character data,
//! the five predefined entities plus numeric character references, CDATA
//! sections, comments, processing instructions and a DOCTYPE line. No
//! namespaces and no DTD validation.

use crate::cursor::Cursor;
use crate::error::ParseError;

/// One XML element with its attributes, child elements and character data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Concatenated character data directly inside this element.
    pub text: String,
    /// 1-based line of the opening tag.
    pub line: usize,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Character data with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// Parses a complete document and returns its root element.
pub fn parse_xml(src: &str) -> Result<Element, ParseError> {
    let mut cur = Cursor::new(src);
    // Byte order mark.
    cur.eat("\u{feff}");

    skip_misc(&mut cur)?;
    if cur.is_eof() {
        return Err(cur.err("document has no root element"));
    }
    let root = parse_element(&mut cur)?;
    skip_misc(&mut cur)?;
    if !cur.is_eof() {
        return Err(cur.err("unexpected content after root element"));
    }
    Ok(root)
}

/// Skips whitespace, comments, processing instructions and DOCTYPE.
fn skip_misc(cur: &mut Cursor<'_>) -> Result<(), ParseError> {
    loop {
        cur.skip_whitespace();
        if cur.eat("<!--") {
            cur.take_until("-->", "comment")?;
        } else if cur.eat("<?") {
            cur.take_until("?>", "processing instruction")?;
        } else if cur.eat("<!DOCTYPE") {
            cur.take_until(">", "DOCTYPE")?;
        } else {
            return Ok(());
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')
}

fn parse_name(cur: &mut Cursor<'_>) -> Result<String, ParseError> {
    match cur.peek() {
        Some(c) if is_name_start(c) => Ok(cur.take_while(is_name_char).to_string()),
        Some(c) => Err(cur.err(format!("expected a name, found {c:?}"))),
        None => Err(cur.err("expected a name, found end of input")),
    }
}

fn parse_element(cur: &mut Cursor<'_>) -> Result<Element, ParseError> {
    let (line, _) = cur.position();
    cur.expect("<")?;
    let name = parse_name(cur)?;
    let mut element = Element { name, line, ..Element::default() };

    loop {
        cur.skip_whitespace();
        if cur.eat("/>") {
            return Ok(element);
        }
        if cur.eat(">") {
            break;
        }
        let attr_name = parse_name(cur)?;
        if element.attr(&attr_name).is_some() {
            return Err(cur.err(format!("duplicate attribute `{attr_name}`")));
        }
        cur.skip_whitespace();
        cur.expect("=")?;
        cur.skip_whitespace();
        let value = parse_attr_value(cur)?;
        element.attributes.push((attr_name, value));
    }

    parse_content(cur, &mut element)?;
    Ok(element)
}

fn parse_attr_value(cur: &mut Cursor<'_>) -> Result<String, ParseError> {
    let quote = match cur.peek() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err(cur.err("expected quoted attribute value")),
    };
    cur.advance();
    let (line, col) = cur.position();
    let raw = cur.take_until(if quote == '"' { "\"" } else { "'" }, "attribute value")?;
    if raw.contains('<') {
        return Err(ParseError::new("`<` is not allowed in attribute values", line, col));
    }
    decode_entities(raw, line, col)
}

/// Parses children and character data up to the matching end tag.
fn parse_content(cur: &mut Cursor<'_>, element: &mut Element) -> Result<(), ParseError> {
    loop {
        if cur.is_eof() {
            return Err(cur.err(format!("missing end tag for <{}>", element.name)));
        }
        if cur.eat("</") {
            let (line, col) = cur.position();
            let closing = parse_name(cur)?;
            if closing != element.name {
                return Err(ParseError::new(
                    format!("expected </{}>, found </{closing}>", element.name),
                    line,
                    col,
                ));
            }
            cur.skip_whitespace();
            cur.expect(">")?;
            return Ok(());
        }
        if cur.eat("<!--") {
            cur.take_until("-->", "comment")?;
        } else if cur.eat("<![CDATA[") {
            let data = cur.take_until("]]>", "CDATA section")?;
            element.text.push_str(data);
        } else if cur.eat("<?") {
            cur.take_until("?>", "processing instruction")?;
        } else if cur.starts_with("<") {
            let child = parse_element(cur)?;
            element.children.push(child);
        } else {
            let (line, col) = cur.position();
            let raw = cur.take_while(|c| c != '<');
            element.text.push_str(&decode_entities(raw, line, col)?);
        }
    }
}

/// Replaces entity and character references in `raw`.
fn decode_entities(raw: &str, line: usize, col: usize) -> Result<String, ParseError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let Some(semi) = after.find(';') else {
            return Err(ParseError::new("unterminated entity reference", line, col));
        };
        let entity = &after[..semi];
        let ch = match entity {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            _ => numeric_reference(entity).ok_or_else(|| {
                ParseError::new(format!("unknown entity `&{entity};`"), line, col)
            })?,
        };
        out.push(ch);
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn numeric_reference(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_elements_and_text() {
        let root = parse_xml("<a><b>hello</b><b>world</b><c/></a>").unwrap();
        assert_eq!(root.name, "a");
        let texts: Vec<_> = root.children_named("b").map(|b| b.trimmed_text()).collect();
        assert_eq!(texts, ["hello", "world"]);
        assert!(root.child("c").is_some());
    }

    #[test]
    fn attributes_with_both_quote_styles() {
        let root = parse_xml(r#"<screen name="menu" type='select'/>"#).unwrap();
        assert_eq!(root.attr("name"), Some("menu"));
        assert_eq!(root.attr("type"), Some("select"));
        assert_eq!(root.attr("missing"), None);
    }

    #[test]
    fn entities_and_char_refs_are_decoded() {
        let root = parse_xml("<m>a &lt;b&gt; &amp; &#65;&#x42;</m>").unwrap();
        assert_eq!(root.text, "a <b> & AB");
    }

    #[test]
    fn cdata_is_kept_verbatim() {
        let root = parse_xml("<m><![CDATA[<raw> & stuff]]></m>").unwrap();
        assert_eq!(root.text, "<raw> & stuff");
    }

    #[test]
    fn prolog_comments_and_doctype_are_skipped() {
        let src = "<?xml version=\"1.0\"?>\n<!DOCTYPE flow>\n<!-- c -->\n<a><!-- inner -->x</a>\n<!-- tail -->";
        let root = parse_xml(src).unwrap();
        assert_eq!(root.text, "x");
        assert_eq!(root.line, 4);
    }

    #[test]
    fn mismatched_end_tag_is_reported_with_position() {
        let err = parse_xml("<a>\n  <b></c>\n</a>").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("expected </b>"), "{}", err.message);
    }

    #[test]
    fn unknown_entity_is_an_error() {
        assert!(parse_xml("<a>&nbsp;</a>").is_err());
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        assert!(parse_xml("<a/><b/>").is_err());
    }

    #[test]
    fn missing_end_tag_is_an_error() {
        let err = parse_xml("<a><b></b>").unwrap_err();
        assert!(err.message.contains("missing end tag for <a>"));
    }
}
