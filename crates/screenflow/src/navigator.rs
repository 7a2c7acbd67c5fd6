/// A navigation request recorded by a screen callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    NavigateTo(String),
    NavigateBack,
    Quit,
}

/// Command buffer handed to screen callbacks.
///
/// Callbacks run while the flow is dispatching an event and cannot borrow it,
/// so they record requests here. The flow applies them in order after the
/// dispatching call returns.
///
/// ```rust
/// use screenflow::navigator::{NavCommand, Navigator};
///
/// let mut nav = Navigator::default();
/// nav.navigate_to("settings");
/// nav.quit();
/// assert_eq!(nav.commands(), [NavCommand::NavigateTo("settings".into()), NavCommand::Quit]);
/// ```
#[derive(Debug, Default)]
pub struct Navigator {
    commands: Vec<NavCommand>,
}

impl Navigator {
    /// Slide to the screen registered as `name`.
    pub fn navigate_to(&mut self, name: impl Into<String>) {
        self.commands.push(NavCommand::NavigateTo(name.into()));
    }

    /// Slide back to the previous screen.
    pub fn navigate_back(&mut self) {
        self.commands.push(NavCommand::NavigateBack);
    }

    /// Stop the flow.
    pub fn quit(&mut self) {
        self.commands.push(NavCommand::Quit);
    }

    pub fn commands(&self) -> &[NavCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<NavCommand> {
        std::mem::take(&mut self.commands)
    }
}
