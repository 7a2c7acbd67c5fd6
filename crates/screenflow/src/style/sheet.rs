use std::collections::HashMap;

use screenflow_markup::{parse_css, Declaration, ParseError, Rule, Selector};

use crate::error::StyleError;

use super::property::{builtin, PropertyParser, StyleTarget};
use super::types::{ScreenStyle, StyleSet};

/// Selector keyword for rules that apply to every screen.
pub const GLOBAL_SELECTOR: &str = "screenflow";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Scope {
    Global,
    Type(String),
    Name(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Base,
    Primary,
    Secondary,
    Button,
}

/// Parsed stylesheet rules, grouped by what they select.
///
/// A screen's style is resolved from four layers, each overriding the one
/// below field by field:
///
/// 1. built-in defaults
/// 2. `screenflow { ... }`
/// 3. `.type { ... }`, e.g. `.select button`
/// 4. `#name { ... }`, e.g. `#menu primary`
///
/// Declarations that cannot be applied are logged with their position and
/// skipped; only syntax errors fail a load.
pub struct StyleSheet {
    global: StyleSet,
    by_type: HashMap<String, StyleSet>,
    by_name: HashMap<String, StyleSet>,
    properties: HashMap<String, PropertyParser>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheet {
    pub fn new() -> Self {
        let properties = builtin()
            .into_iter()
            .map(|(name, parser)| (name.to_string(), parser))
            .collect();
        Self {
            global: StyleSet::default(),
            by_type: HashMap::new(),
            by_name: HashMap::new(),
            properties,
        }
    }

    /// Adds or replaces the handler for a declaration property.
    ///
    /// Property names are matched case-insensitively.
    pub fn register_property<F>(&mut self, name: &str, parser: F)
    where
        F: Fn(&str, StyleTarget<'_>) -> Result<(), StyleError> + 'static,
    {
        let name = name.to_ascii_lowercase();
        if self.properties.insert(name.clone(), Box::new(parser)).is_some() {
            log::debug!("replaced stylesheet property `{name}`");
        }
    }

    /// Parses `src` and merges its rules over the ones already loaded.
    ///
    /// Nothing is merged when `src` has a syntax error.
    pub fn load(&mut self, src: &str) -> Result<(), ParseError> {
        let sheet = parse_css(src)?;
        for rule in &sheet.rules {
            self.apply_rule(rule);
        }
        Ok(())
    }

    /// Effective style for screen `name` of type `kind`.
    pub fn resolve(&self, name: &str, kind: &str) -> ScreenStyle {
        let mut set = StyleSet::defaults();
        set.overlay(&self.global);
        if let Some(layer) = self.by_type.get(kind) {
            set.overlay(layer);
        }
        if let Some(layer) = self.by_name.get(name) {
            set.overlay(layer);
        }
        set.resolve()
    }

    pub fn clear(&mut self) {
        self.global = StyleSet::default();
        self.by_type.clear();
        self.by_name.clear();
    }

    fn apply_rule(&mut self, rule: &Rule) {
        for selector in &rule.selectors {
            let Some((scope, component)) = interpret(selector) else {
                log::warn!(
                    "{}:{}: ignoring unsupported selector `{}`",
                    selector.line,
                    selector.col,
                    selector.as_css()
                );
                continue;
            };
            for decl in &rule.declarations {
                self.apply_declaration(&scope, component, decl);
            }
        }
    }

    fn apply_declaration(&mut self, scope: &Scope, component: Component, decl: &Declaration) {
        let Self { global, by_type, by_name, properties } = self;

        let Some(parser) = properties.get(&decl.property) else {
            log::warn!("{}:{}: unknown property `{}`", decl.line, decl.col, decl.property);
            return;
        };

        let set = match scope {
            Scope::Global => global,
            Scope::Type(kind) => by_type.entry(kind.clone()).or_default(),
            Scope::Name(name) => by_name.entry(name.clone()).or_default(),
        };
        let target = match component {
            Component::Base => StyleTarget::Base(&mut set.base),
            Component::Primary => StyleTarget::Font(&mut set.primary, "primary"),
            Component::Secondary => StyleTarget::Font(&mut set.secondary, "secondary"),
            Component::Button => StyleTarget::Button(&mut set.button),
        };

        if let Err(err) = parser(&decl.value, target) {
            log::warn!("{}:{}: {err}, declaration skipped", decl.line, decl.col);
        }
    }
}

fn interpret(selector: &Selector) -> Option<(Scope, Component)> {
    let (head, component) = match selector.parts.as_slice() {
        [head] => (head, Component::Base),
        [head, component] => (head, parse_component(component)?),
        _ => return None,
    };

    let scope = if head == GLOBAL_SELECTOR {
        Scope::Global
    } else if let Some(name) = head.strip_prefix('#').filter(|n| !n.is_empty()) {
        Scope::Name(name.to_string())
    } else if let Some(kind) = head.strip_prefix('.').filter(|k| !k.is_empty()) {
        Scope::Type(kind.to_string())
    } else {
        return None;
    };
    Some((scope, component))
}

fn parse_component(part: &str) -> Option<Component> {
    match part {
        "primary" => Some(Component::Primary),
        "secondary" => Some(Component::Secondary),
        "button" => Some(Component::Button),
        _ => None,
    }
}
