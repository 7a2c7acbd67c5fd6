//! Readers for the two text formats a screen flow is described with:
//! an **XML subset** for flow documents and a **CSS subset** for stylesheets.
//!
//! This crate is dependency-free. It produces plain trees; interpreting
//! element names, selectors and property values is left to the caller.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`xml`] | `Element`, `parse_xml` |
//! | [`css`] | `Stylesheet`, `Rule`, `Selector`, `Declaration`, `parse_css` |
//! | [`error`] | `ParseError` |
//!
//! ```rust
//! use screenflow_markup::{parse_css, parse_xml};
//!
//! let doc = parse_xml(r#"<screenflow><screen name="a" type="message"/></screenflow>"#).unwrap();
//! assert_eq!(doc.children[0].attr("type"), Some("message"));
//!
//! let sheet = parse_css("#a { color: black }").unwrap();
//! assert_eq!(sheet.rules[0].selectors[0].parts, ["#a"]);
//! ```

mod cursor;
pub mod css;
pub mod error;
pub mod xml;

pub use css::{parse_css, Declaration, Rule, Selector, Stylesheet};
pub use error::ParseError;
pub use xml::{parse_xml, Element};

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok_xml(src: &str) { parse_xml(src).unwrap(); }
    fn err_xml(src: &str) { parse_xml(src).unwrap_err(); }
    fn ok_css(src: &str) { parse_css(src).unwrap(); }
    fn err_css(src: &str) { parse_css(src).unwrap_err(); }

    #[test] fn empty_flow() { ok_xml("<screenflow/>"); }
    #[test] fn message_screen() {
        ok_xml(r#"<screenflow>
            <screen name="welcome" type="message">
                <message>Hello &amp; welcome</message>
            </screen>
        </screenflow>"#);
    }
    #[test] fn select_screen() {
        ok_xml(r#"<screenflow>
            <screen name="menu" type="select">
                <message>Pick one</message>
                <option>first</option>
                <option>second</option>
                <orientation>horizontal</orientation>
            </screen>
        </screenflow>"#);
    }
    #[test] fn whitespace_around_equals() { ok_xml(r#"<a b = "c"/>"#); }
    #[test] fn unicode_text() { ok_xml("<m>héllo wörld ✓</m>"); }
    #[test] fn err_unclosed_tag() { err_xml("<screenflow><screen></screenflow>"); }
    #[test] fn err_unquoted_attr() { err_xml("<a b=c/>"); }
    #[test] fn err_empty_document() { err_xml("   <!-- nothing -->  "); }
    #[test] fn err_duplicate_attr() { err_xml(r#"<a b="1" b="2"/>"#); }

    #[test] fn global_rule() { ok_css("screenflow { background-color: white; padding: 20 }"); }
    #[test] fn type_and_name_rules() {
        ok_css(".message primary { font-size: 20 } #menu button { color: #ff0000 }");
    }
    #[test] fn trailing_semicolons() { ok_css("a { color: red;; }"); }
    #[test] fn err_missing_brace() { err_css("a color: red }"); }
    #[test] fn err_important() { err_css("a { color: red !important }"); }
}
