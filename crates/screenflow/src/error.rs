use std::path::PathBuf;

use screenflow_markup::ParseError;
use thiserror::Error;

/// Stack and lifecycle violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("cannot navigate back, no more screens")]
    NoPreviousScreen,
    #[error("screen stack is empty, start the flow first")]
    EmptyStack,
    #[error("flow is already started")]
    AlreadyStarted,
    #[error("flow is not started")]
    NotStarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no screen named `{0}`")]
    UnknownScreen(String),
    #[error("no factory registered for screen type `{0}`")]
    UnknownScreenType(String),
    #[error("screen `{name}` is a `{actual}` screen, not `{expected}`")]
    WrongScreenType {
        name: String,
        expected: &'static str,
        actual: String,
    },
}

/// Something with the same key is already registered. The first one is kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationConflict {
    #[error("a factory for screen type `{0}` is already registered")]
    ScreenType(String),
    #[error("a screen named `{0}` is already registered")]
    ScreenName(String),
}

/// Malformed flow document or screen definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("screen `{screen}`: missing required key `{key}`")]
    MissingKey { screen: String, key: String },
    #[error("screen `{screen}`: `{key}` expects several values (repeat the element)")]
    ExpectedList { screen: String, key: String },
    #[error("screen `{screen}`: `{key}` expects a single value")]
    ExpectedSingle { screen: String, key: String },
    #[error("screen `{screen}`: invalid value `{value}` for `{key}`: {reason}")]
    InvalidValue {
        screen: String,
        key: String,
        value: String,
        reason: String,
    },
    #[error("flow document must have a <screenflow> root element, found <{0}>")]
    MissingRoot(String),
    #[error("flow document defines no screens")]
    NoScreens,
    #[error(transparent)]
    Markup(#[from] ParseError),
}

/// A stylesheet declaration that could not be applied. These are logged and
/// skipped while loading, never returned from the load itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("`{property}` is not supported on {component}")]
    Unsupported {
        property: String,
        component: &'static str,
    },
    #[error("invalid value `{value}` for `{property}`: {reason}")]
    InvalidValue {
        property: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("screen `{0}` is not attached to a flow")]
    Detached(String),
}

/// Everything a [`ScreenFlow`](crate::flow::ScreenFlow) operation can fail with.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Registration(#[from] RegistrationConflict),
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Screen(#[from] ScreenError),
    #[error("stylesheet: {0}")]
    Stylesheet(ParseError),
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_previous_screen_message() {
        assert_eq!(
            NavigationError::NoPreviousScreen.to_string(),
            "cannot navigate back, no more screens"
        );
    }

    #[test]
    fn markup_errors_convert_into_definition_errors() {
        let err: DefinitionError = ParseError { message: "boom".into(), line: 2, col: 5 }.into();
        assert_eq!(err.to_string(), "parse error at 2:5: boom");
    }

    #[test]
    fn umbrella_wraps_component_errors() {
        let err: FlowError = LookupError::UnknownScreen("x".into()).into();
        assert!(matches!(err, FlowError::Lookup(LookupError::UnknownScreen(ref n)) if n == "x"));
        assert_eq!(err.to_string(), "no screen named `x`");
    }
}
