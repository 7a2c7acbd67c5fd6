//! Screen definitions: the flat key/value form screens are created from.
//!
//! A flow document is XML:
//!
//! ```xml
//! <screenflow>
//!   <screen name="menu" type="select">
//!     <message>Pick one</message>
//!     <option>first</option>
//!     <option>second</option>
//!   </screen>
//! </screenflow>
//! ```
//!
//! Each `<screen>` becomes a [`ScreenDef`]. `name` and `type` come from
//! attributes or child elements. Every other attribute or child element is
//! a value; a key that appears more than once becomes a list.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use screenflow_markup::{parse_xml, Element};

use crate::error::DefinitionError;

pub const ROOT_ELEMENT: &str = "screenflow";
pub const SCREEN_ELEMENT: &str = "screen";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefValue {
    Single(String),
    List(Vec<String>),
}

impl DefValue {
    /// Adds a value, turning a single value into a list.
    pub fn push(&mut self, value: String) {
        match self {
            DefValue::Single(first) => {
                let first = std::mem::take(first);
                *self = DefValue::List(vec![first, value]);
            }
            DefValue::List(values) => values.push(value),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            DefValue::Single(value) => std::slice::from_ref(value),
            DefValue::List(values) => values.as_slice(),
        }
    }
}

/// Definition of one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenDef {
    pub name: String,
    /// Type tag used to pick the factory.
    pub kind: String,
    values: HashMap<String, DefValue>,
}

impl ScreenDef {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { name: name.into(), kind: kind.into(), values: HashMap::new() }
    }

    /// Builder form of [`push`](ScreenDef::push).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.values.entry(key.into()) {
            Entry::Occupied(mut existing) => existing.get_mut().push(value),
            Entry::Vacant(slot) => {
                slot.insert(DefValue::Single(value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&DefValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Required single value.
    pub fn single(&self, key: &str) -> Result<&str, DefinitionError> {
        self.optional(key)?.ok_or_else(|| DefinitionError::MissingKey {
            screen: self.name.clone(),
            key: key.to_string(),
        })
    }

    /// Single value if present.
    pub fn optional(&self, key: &str) -> Result<Option<&str>, DefinitionError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(DefValue::Single(value)) => Ok(Some(value.as_str())),
            Some(DefValue::List(_)) => Err(DefinitionError::ExpectedSingle {
                screen: self.name.clone(),
                key: key.to_string(),
            }),
        }
    }

    /// Required repeated value.
    pub fn list(&self, key: &str) -> Result<&[String], DefinitionError> {
        match self.values.get(key) {
            None => Err(DefinitionError::MissingKey {
                screen: self.name.clone(),
                key: key.to_string(),
            }),
            Some(DefValue::Single(_)) => Err(DefinitionError::ExpectedList {
                screen: self.name.clone(),
                key: key.to_string(),
            }),
            Some(DefValue::List(values)) => Ok(values.as_slice()),
        }
    }

    /// Zero, one or many values.
    pub fn values(&self, key: &str) -> &[String] {
        self.values.get(key).map(DefValue::as_slice).unwrap_or_default()
    }

    /// Optional single value parsed with [`FromStr`].
    pub fn parse<T>(&self, key: &str) -> Result<Option<T>, DefinitionError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let Some(raw) = self.optional(key)? else {
            return Ok(None);
        };
        raw.trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| self.invalid(key, raw, e.to_string()))
    }

    pub fn invalid(&self, key: &str, value: &str, reason: impl Into<String>) -> DefinitionError {
        DefinitionError::InvalidValue {
            screen: self.name.clone(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Builds a definition from a `<screen>` element.
    pub fn from_element(element: &Element) -> Result<Self, DefinitionError> {
        let label = format!("<{}> at line {}", element.name, element.line);
        let lookup = |key: &str| {
            element
                .attr(key)
                .map(str::to_string)
                .or_else(|| element.child(key).map(|c| c.trimmed_text().to_string()))
                .filter(|v| !v.trim().is_empty())
        };

        let name = lookup("name").ok_or_else(|| DefinitionError::MissingKey {
            screen: label.clone(),
            key: "name".to_string(),
        })?;
        let kind = lookup("type").ok_or_else(|| DefinitionError::MissingKey {
            screen: name.clone(),
            key: "type".to_string(),
        })?;

        let mut def = ScreenDef::new(name, kind);
        for (key, value) in &element.attributes {
            if key != "name" && key != "type" {
                def.push(key.as_str(), value.as_str());
            }
        }
        for child in &element.children {
            if child.name != "name" && child.name != "type" {
                def.push(child.name.as_str(), child.trimmed_text());
            }
        }
        Ok(def)
    }
}

/// Parses a whole flow document into screen definitions, in document order.
pub fn parse_flow_document(src: &str) -> Result<Vec<ScreenDef>, DefinitionError> {
    let root = parse_xml(src)?;
    if root.name != ROOT_ELEMENT {
        return Err(DefinitionError::MissingRoot(root.name));
    }

    let defs = root
        .children_named(SCREEN_ELEMENT)
        .map(ScreenDef::from_element)
        .collect::<Result<Vec<_>, _>>()?;
    if defs.is_empty() {
        return Err(DefinitionError::NoScreens);
    }
    Ok(defs)
}
