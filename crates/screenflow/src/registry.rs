//! Type tag → screen factory table.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::definition::ScreenDef;
use crate::error::{DefinitionError, FlowError, LookupError, RegistrationConflict};
use crate::screens::{InputScreen, ListScreen, MessageScreen, Screen, SelectScreen};

/// Builds a screen from its definition.
pub type ScreenFactory = Box<dyn Fn(&ScreenDef) -> Result<Box<dyn Screen>, DefinitionError>>;

/// Error from [`ScreenRegistry::create`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

impl From<CreateError> for FlowError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::Lookup(e) => FlowError::Lookup(e),
            CreateError::Definition(e) => FlowError::Definition(e),
        }
    }
}

#[derive(Default)]
pub struct ScreenRegistry {
    factories: HashMap<String, ScreenFactory>,
}

impl ScreenRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in `message`, `select`, `input` and `list`
    /// types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let builtin = [
            (MessageScreen::KIND, factory(MessageScreen::from_def)),
            (SelectScreen::KIND, factory(SelectScreen::from_def)),
            (InputScreen::KIND, factory(InputScreen::from_def)),
            (ListScreen::KIND, factory(ListScreen::from_def)),
        ];
        for (kind, factory) in builtin {
            registry.factories.insert(kind.to_string(), factory);
        }
        registry
    }

    /// Registers `factory` for `kind`. An existing factory is kept and a
    /// conflict is returned.
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F) -> Result<(), RegistrationConflict>
    where
        F: Fn(&ScreenDef) -> Result<Box<dyn Screen>, DefinitionError> + 'static,
    {
        match self.factories.entry(kind.into()) {
            Entry::Occupied(slot) => Err(RegistrationConflict::ScreenType(slot.key().clone())),
            Entry::Vacant(slot) => {
                log::debug!("registered screen type `{}`", slot.key());
                slot.insert(Box::new(factory));
                Ok(())
            }
        }
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Builds a screen with the factory registered for `def.kind`.
    pub fn create(&self, def: &ScreenDef) -> Result<Box<dyn Screen>, CreateError> {
        let factory = self
            .factories
            .get(def.kind.as_str())
            .ok_or_else(|| LookupError::UnknownScreenType(def.kind.clone()))?;
        Ok(factory(def)?)
    }
}

/// Boxes a typed constructor as a [`ScreenFactory`].
pub fn factory<S: Screen>(build: fn(&ScreenDef) -> Result<S, DefinitionError>) -> ScreenFactory {
    Box::new(move |def: &ScreenDef| -> Result<Box<dyn Screen>, DefinitionError> {
        Ok(Box::new(build(def)?))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_def(name: &str) -> ScreenDef {
        ScreenDef::new(name, "message").with("message", "hi")
    }

    #[test]
    fn defaults_cover_builtin_types() {
        let registry = ScreenRegistry::with_defaults();
        for kind in ["message", "select", "input", "list"] {
            assert!(registry.contains(kind), "{kind}");
        }
        assert!(!ScreenRegistry::new().contains("message"));
    }

    #[test]
    fn create_dispatches_on_kind() {
        let registry = ScreenRegistry::with_defaults();
        let screen = registry.create(&message_def("hello")).unwrap();
        assert_eq!(screen.name(), "hello");
        assert_eq!(screen.kind(), "message");
        assert!(screen.as_any().is::<MessageScreen>());
    }

    #[test]
    fn unknown_kind_is_a_lookup_error() {
        let registry = ScreenRegistry::with_defaults();
        let err = registry.create(&ScreenDef::new("x", "carousel")).err();
        assert_eq!(err, Some(CreateError::Lookup(LookupError::UnknownScreenType("carousel".into()))));
    }

    #[test]
    fn duplicate_type_keeps_first_factory() {
        let mut registry = ScreenRegistry::new();
        registry
            .register("banner", |def| Ok(Box::new(MessageScreen::from_def(def)?)))
            .unwrap();
        let err = registry
            .register("banner", |def| Ok(Box::new(ListScreen::from_def(def)?)))
            .unwrap_err();
        assert_eq!(err, RegistrationConflict::ScreenType("banner".into()));

        let def = ScreenDef::new("b", "banner").with("message", "hi");
        let screen = registry.create(&def).unwrap();
        assert!(screen.as_any().is::<MessageScreen>());
        // The screen reports the alias it was created under.
        assert_eq!(screen.kind(), "banner");
    }

    #[test]
    fn definition_errors_pass_through() {
        let registry = ScreenRegistry::with_defaults();
        let err = registry.create(&ScreenDef::new("m", "message")).err();
        assert!(matches!(err, Some(CreateError::Definition(DefinitionError::MissingKey { .. }))));
    }
}
