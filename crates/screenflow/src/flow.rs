//! The navigation controller.
//!
//! A [`ScreenFlow`] owns every screen by name, a stack of the names that were
//! navigated to, and the surface the top of that stack is drawn on. Moving
//! between screens plays a horizontal [`Transition`] built from two previews.
//!
//! ```text
//!  Creating ──start──▶ Active ──navigate──▶ InTransition
//!                        ▲                       │
//!                        └──── finished ◀────────┘
//! ```
//!
//! Screen callbacks record navigation requests on a [`Navigator`]; the flow
//! applies them once the callback has returned.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use screenflow_engine::coords::Size;
use screenflow_engine::core::AppControl;
use screenflow_engine::input::InputEvent;
use screenflow_engine::surface::{Image, Surface};

use crate::definition::{parse_flow_document, ScreenDef};
use crate::error::{
    DefinitionError, FlowError, LookupError, NavigationError, RegistrationConflict, StyleError,
};
use crate::navigator::{NavCommand, Navigator};
use crate::registry::ScreenRegistry;
use crate::screens::{Screen, ScreenContext};
use crate::style::{StyleSheet, StyleTarget};
use crate::transition::{Transition, TransitionStatus};
use crate::typeset::Typesetter;

/// Pixels a transition moves per tick unless configured otherwise.
pub const DEFAULT_TRANSITION_SPEED: u32 = 5;
pub const DEFAULT_SURFACE_SIZE: Size = Size::new(480, 320);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    pub transition_speed: u32,
    /// Size of the surface before the first resize.
    pub surface_size: Size,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            transition_speed: DEFAULT_TRANSITION_SPEED,
            surface_size: DEFAULT_SURFACE_SIZE,
        }
    }
}

impl FlowConfig {
    pub fn with_transition_speed(mut self, speed: u32) -> Self {
        self.transition_speed = speed;
        self
    }

    pub fn with_surface_size(mut self, size: Size) -> Self {
        self.surface_size = size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Built, not started yet.
    Creating,
    /// The top screen is drawn and receives events.
    Active,
    /// A transition is playing; events are dropped.
    InTransition,
}

/// Where [`ScreenFlow::run`] gets input from and shows frames on.
pub trait FlowBackend {
    /// Flow errors are converted into this when the loop stops.
    type Error: From<FlowError>;

    /// Events since the last poll. May be empty.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    fn present(&mut self, frame: &Image) -> Result<(), Self::Error>;
}

pub struct ScreenFlow {
    config: FlowConfig,
    fonts: Rc<dyn Typesetter>,
    styles: StyleSheet,
    registry: ScreenRegistry,
    screens: HashMap<String, Box<dyn Screen>>,
    stack: Vec<String>,
    state: FlowState,
    running: bool,
    surface: Image,
    transition: Option<Transition>,
}

impl ScreenFlow {
    /// An empty flow with the built-in screen types registered.
    pub fn new(fonts: Rc<dyn Typesetter>, config: FlowConfig) -> Self {
        Self {
            surface: Image::new(config.surface_size),
            config,
            fonts,
            styles: StyleSheet::new(),
            registry: ScreenRegistry::with_defaults(),
            screens: HashMap::new(),
            stack: Vec::new(),
            state: FlowState::Creating,
            running: false,
            transition: None,
        }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Applies from the next navigation on.
    pub fn set_transition_speed(&mut self, speed: u32) {
        self.config.transition_speed = speed;
    }

    pub fn fonts(&self) -> &Rc<dyn Typesetter> {
        &self.fonts
    }

    // ── registration ──────────────────────────────────────────────────────

    /// Adds a factory for screens of type `kind`. Fails if one exists.
    pub fn register_factory<F>(&mut self, kind: impl Into<String>, factory: F) -> Result<(), RegistrationConflict>
    where
        F: Fn(&ScreenDef) -> Result<Box<dyn Screen>, DefinitionError> + 'static,
    {
        self.registry.register(kind, factory)
    }

    pub fn registry(&self) -> &ScreenRegistry {
        &self.registry
    }

    /// Builds a screen from `def` without adding it.
    pub fn create_screen(&self, def: &ScreenDef) -> Result<Box<dyn Screen>, FlowError> {
        Ok(self.registry.create(def)?)
    }

    /// Registers `screen` under its name and injects the shared fonts and
    /// its resolved style.
    pub fn add_screen(&mut self, mut screen: Box<dyn Screen>) -> Result<(), RegistrationConflict> {
        let name = screen.name().to_string();
        if self.screens.contains_key(&name) {
            return Err(RegistrationConflict::ScreenName(name));
        }
        let context = self.context_for(&name, screen.kind());
        screen.attach(context);
        log::debug!("added `{}` screen `{name}`", screen.kind());
        self.screens.insert(name, screen);
        Ok(())
    }

    /// Creates a screen from `def` and adds it.
    pub fn add_definition(&mut self, def: &ScreenDef) -> Result<(), FlowError> {
        let screen = self.create_screen(def)?;
        Ok(self.add_screen(screen)?)
    }

    fn context_for(&self, name: &str, kind: &str) -> ScreenContext {
        ScreenContext {
            fonts: self.fonts.clone(),
            style: self.styles.resolve(name, kind),
        }
    }

    pub fn contains_screen(&self, name: &str) -> bool {
        self.screens.contains_key(name)
    }

    pub fn screen_names(&self) -> impl Iterator<Item = &str> {
        self.screens.keys().map(String::as_str)
    }

    pub fn get_screen(&self, name: &str) -> Result<&dyn Screen, LookupError> {
        match self.screens.get(name) {
            Some(screen) => Ok(screen.as_ref()),
            None => Err(LookupError::UnknownScreen(name.to_string())),
        }
    }

    pub fn get_screen_mut(&mut self, name: &str) -> Result<&mut dyn Screen, LookupError> {
        match self.screens.get_mut(name) {
            Some(screen) => Ok(screen.as_mut()),
            None => Err(LookupError::UnknownScreen(name.to_string())),
        }
    }

    /// Typed lookup, e.g. `flow.screen::<SelectScreen>("menu")`.
    pub fn screen<T: Screen>(&self, name: &str) -> Result<&T, LookupError> {
        let screen = self.get_screen(name)?;
        screen
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| wrong_type::<T>(name, screen.kind()))
    }

    /// Typed mutable lookup, mostly for wiring callbacks.
    pub fn screen_mut<T: Screen>(&mut self, name: &str) -> Result<&mut T, LookupError> {
        let screen = self
            .screens
            .get_mut(name)
            .ok_or_else(|| LookupError::UnknownScreen(name.to_string()))?;
        let kind = screen.kind().to_string();
        screen
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| wrong_type::<T>(name, &kind))
    }

    // ── loading ───────────────────────────────────────────────────────────

    /// Creates and adds every definition, or none of them.
    ///
    /// Returns the added names in definition order.
    pub fn load_definitions(&mut self, defs: &[ScreenDef]) -> Result<Vec<String>, FlowError> {
        let mut seen = HashSet::new();
        let mut created = Vec::with_capacity(defs.len());
        for def in defs {
            if self.screens.contains_key(&def.name) || !seen.insert(def.name.as_str()) {
                return Err(RegistrationConflict::ScreenName(def.name.clone()).into());
            }
            created.push(self.create_screen(def)?);
        }

        let names: Vec<String> = defs.iter().map(|d| d.name.clone()).collect();
        for screen in created {
            self.add_screen(screen)?;
        }
        log::info!("loaded {} screens", names.len());
        Ok(names)
    }

    /// Loads a `<screenflow>` document. See [`crate::definition`].
    pub fn load_from_str(&mut self, src: &str) -> Result<Vec<String>, FlowError> {
        let defs = parse_flow_document(src)?;
        self.load_definitions(&defs)
    }

    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<String>, FlowError> {
        let src = read(path.as_ref())?;
        self.load_from_str(&src)
    }

    /// Merges a stylesheet and restyles every screen.
    pub fn load_stylesheet(&mut self, src: &str) -> Result<(), FlowError> {
        self.styles.load(src).map_err(FlowError::Stylesheet)?;
        self.restyle()
    }

    pub fn load_stylesheet_file(&mut self, path: impl AsRef<Path>) -> Result<(), FlowError> {
        let src = read(path.as_ref())?;
        self.load_stylesheet(&src)
    }

    /// Adds a declaration handler used by later stylesheet loads.
    pub fn register_style_property<F>(&mut self, name: &str, parser: F)
    where
        F: Fn(&str, StyleTarget<'_>) -> Result<(), StyleError> + 'static,
    {
        self.styles.register_property(name, parser);
    }

    pub fn stylesheet(&self) -> &StyleSheet {
        &self.styles
    }

    /// Re-injects the context into every screen after a style change.
    fn restyle(&mut self) -> Result<(), FlowError> {
        for (name, screen) in self.screens.iter_mut() {
            let style = self.styles.resolve(name, screen.kind());
            screen.attach(ScreenContext { fonts: self.fonts.clone(), style });
        }
        if self.state == FlowState::Active {
            self.redraw()?;
        }
        Ok(())
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Pushes `initial`, draws it and fires its activation hook.
    pub fn start(&mut self, initial: &str) -> Result<(), FlowError> {
        if self.state != FlowState::Creating {
            return Err(NavigationError::AlreadyStarted.into());
        }
        if !self.screens.contains_key(initial) {
            return Err(LookupError::UnknownScreen(initial.to_string()).into());
        }
        log::info!("starting flow at `{initial}`");
        self.get_screen_mut(initial)?.on_arriving();
        self.stack.push(initial.to_string());
        self.running = true;
        self.activate()
    }

    /// Slides to `name`, pushing it on the stack.
    ///
    /// Replaces a transition that is still playing.
    pub fn navigate_to(&mut self, name: &str) -> Result<(), FlowError> {
        if !self.screens.contains_key(name) {
            return Err(LookupError::UnknownScreen(name.to_string()).into());
        }
        let current = self.stack.last().ok_or(NavigationError::EmptyStack)?.clone();

        self.get_screen_mut(name)?.on_arriving();
        let size = self.surface.size();
        let from = self.preview(&current, size)?;
        let to = self.preview(name, size)?;

        log::debug!("navigate `{current}` -> `{name}`");
        self.stack.push(name.to_string());
        self.begin(Transition::forward(from, to, self.config.transition_speed));
        Ok(())
    }

    /// Slides back to the previous screen, popping the current one.
    pub fn navigate_back(&mut self) -> Result<(), FlowError> {
        let depth = self.stack.len();
        if depth <= 1 {
            return Err(NavigationError::NoPreviousScreen.into());
        }
        let popped = self.stack[depth - 1].clone();
        let revealed = self.stack[depth - 2].clone();

        self.get_screen_mut(&revealed)?.on_arriving();
        let size = self.surface.size();
        let from = self.preview(&revealed, size)?;
        let to = self.preview(&popped, size)?;

        log::debug!("navigate back `{popped}` -> `{revealed}`");
        self.stack.pop();
        self.begin(Transition::backward(from, to, self.config.transition_speed));
        Ok(())
    }

    /// Stops the flow. [`tick`](Self::tick) returns `Exit` from now on.
    pub fn quit(&mut self) {
        if self.running {
            log::info!("flow quit");
        }
        self.running = false;
    }

    fn begin(&mut self, transition: Transition) {
        if self.transition.is_some() {
            log::debug!("replacing the running transition");
        }
        self.transition = Some(transition);
        self.state = FlowState::InTransition;
    }

    fn preview(&mut self, name: &str, size: Size) -> Result<Image, FlowError> {
        let screen = self.get_screen_mut(name)?;
        Ok(screen.generate_preview(size)?)
    }

    /// Enters `Active`: draws the top screen and fires its activation hook.
    fn activate(&mut self) -> Result<(), FlowError> {
        self.state = FlowState::Active;
        self.redraw()?;
        if self.current_screen_mut()?.on_activated().is_consumed() {
            self.redraw()?;
        }
        Ok(())
    }

    /// Draws the top screen onto the surface.
    pub fn redraw(&mut self) -> Result<(), FlowError> {
        let screen = match self.stack.last().and_then(|name| self.screens.get_mut(name)) {
            Some(screen) => screen,
            None => return Err(NavigationError::EmptyStack.into()),
        };
        screen.draw(&mut self.surface)?;
        Ok(())
    }

    // ── state ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Screen names from the bottom of the stack to the top.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    pub fn current_screen_name(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    pub fn current_screen(&self) -> Result<&dyn Screen, NavigationError> {
        match self.stack.last().and_then(|name| self.screens.get(name)) {
            Some(screen) => Ok(screen.as_ref()),
            None => Err(NavigationError::EmptyStack),
        }
    }

    pub fn current_screen_mut(&mut self) -> Result<&mut dyn Screen, NavigationError> {
        match self.stack.last().and_then(|name| self.screens.get_mut(name)) {
            Some(screen) => Ok(screen.as_mut()),
            None => Err(NavigationError::EmptyStack),
        }
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn surface(&self) -> &Image {
        &self.surface
    }

    /// Replaces the surface. A playing transition is cut short.
    pub fn resize(&mut self, size: Size) -> Result<(), FlowError> {
        if size == self.surface.size() {
            return Ok(());
        }
        log::debug!("surface resized to {}x{}", size.width, size.height);
        self.surface = Image::new(size);
        match self.state {
            FlowState::Creating => Ok(()),
            FlowState::Active => self.redraw(),
            FlowState::InTransition => {
                self.transition = None;
                self.activate()
            }
        }
    }

    // ── frames ────────────────────────────────────────────────────────────

    /// Runs one frame.
    ///
    /// While a transition plays it advances one step and `events` are
    /// dropped. Otherwise the events go to the top screen in order until one
    /// of them starts a navigation or quits.
    pub fn tick(&mut self, events: &[InputEvent]) -> Result<AppControl, FlowError> {
        if self.state == FlowState::Creating {
            return Err(NavigationError::NotStarted.into());
        }
        if !self.running {
            return Ok(AppControl::Exit);
        }

        if let Some(transition) = self.transition.as_mut() {
            if events.contains(&InputEvent::Quit) {
                self.quit();
                return Ok(AppControl::Exit);
            }
            if transition.update(&mut self.surface) == TransitionStatus::Finished {
                self.transition = None;
                self.activate()?;
            }
            return Ok(AppControl::Continue);
        }

        for event in events {
            if !self.running || self.state != FlowState::Active {
                break;
            }
            self.dispatch(event)?;
        }
        Ok(if self.running { AppControl::Continue } else { AppControl::Exit })
    }

    fn dispatch(&mut self, event: &InputEvent) -> Result<(), FlowError> {
        if *event == InputEvent::Quit {
            self.quit();
            return Ok(());
        }
        let mut nav = Navigator::default();
        if self.current_screen_mut()?.on_event(event, &mut nav).is_consumed() {
            self.redraw()?;
        }
        self.apply(nav.take())
    }

    /// Runs recorded navigation commands in order. The first failure stops
    /// the rest.
    pub fn apply(&mut self, commands: Vec<NavCommand>) -> Result<(), FlowError> {
        for command in commands {
            match command {
                NavCommand::NavigateTo(name) => self.navigate_to(&name)?,
                NavCommand::NavigateBack => self.navigate_back()?,
                NavCommand::Quit => self.quit(),
            }
        }
        Ok(())
    }

    /// Starts at `initial` and loops until the flow quits.
    ///
    /// Every iteration presents the surface, then either steps the
    /// transition or polls and dispatches input.
    pub fn run<B>(&mut self, initial: &str, backend: &mut B) -> Result<(), B::Error>
    where
        B: FlowBackend + ?Sized,
    {
        self.start(initial)?;
        backend.present(&self.surface)?;
        while self.running {
            let events = match self.state {
                FlowState::InTransition => Vec::new(),
                _ => backend.poll_events(),
            };
            if self.tick(&events)? == AppControl::Exit {
                break;
            }
            backend.present(&self.surface)?;
        }
        Ok(())
    }
}

fn wrong_type<T>(name: &str, actual: &str) -> LookupError {
    let full = std::any::type_name::<T>();
    LookupError::WrongScreenType {
        name: name.to_string(),
        expected: full.rsplit("::").next().unwrap_or(full),
        actual: actual.to_string(),
    }
}

fn read(path: &Path) -> Result<String, FlowError> {
    fs::read_to_string(path).map_err(|source| FlowError::Io { path: path.to_path_buf(), source })
}
