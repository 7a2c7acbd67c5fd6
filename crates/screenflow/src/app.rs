use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;

use screenflow_engine::coords::Size;
use screenflow_engine::core::{App as EngineApp, AppControl, FrameCtx};
use screenflow_engine::device::GpuInit;
use screenflow_engine::paint::Color;
use screenflow_engine::text::FontSystem;
use screenflow_engine::window::{Runtime, RuntimeConfig};

use crate::error::FlowError;
use crate::flow::{FlowConfig, ScreenFlow};

type SetupFn = Box<dyn FnOnce(&mut ScreenFlow) -> Result<(), FlowError>>;

/// Where a flow document or stylesheet comes from.
enum Source {
    Text(String),
    File(PathBuf),
}

// ── Application ───────────────────────────────────────────────────────────

/// Builder that assembles a [`ScreenFlow`] and runs it in a window.
///
/// ```rust,ignore
/// Application::new()
///     .title("Kiosk")
///     .font("arial", include_bytes!("arial.ttf").to_vec())
///     .flow(include_str!("flow.xml"))
///     .stylesheet(include_str!("flow.css"))
///     .setup(|flow| {
///         flow.screen_mut::<MessageScreen>("welcome")?
///             .on_touch(|nav| nav.navigate_to("menu"));
///         Ok(())
///     })
///     .run("welcome")?;
/// ```
pub struct Application {
    title: String,
    size: Size,
    fonts: Vec<(String, Vec<u8>)>,
    flows: Vec<Source>,
    stylesheets: Vec<Source>,
    config: FlowConfig,
    setup: Vec<SetupFn>,
}

impl Application {
    pub fn new() -> Self {
        let config = FlowConfig::default();
        Self {
            title: "screenflow".to_string(),
            size: config.surface_size,
            fonts: Vec::new(),
            flows: Vec::new(),
            stylesheets: Vec::new(),
            config,
            setup: Vec::new(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Register a font under a family name used by `font-family`.
    ///
    /// The first font that loads becomes the fallback for unknown families.
    pub fn font(mut self, family: impl Into<String>, data: Vec<u8>) -> Self {
        self.fonts.push((family.into(), data));
        self
    }

    /// Add screens from a `<screenflow>` document.
    pub fn flow(mut self, src: impl Into<String>) -> Self {
        self.flows.push(Source::Text(src.into()));
        self
    }

    pub fn flow_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.flows.push(Source::File(path.into()));
        self
    }

    /// Stylesheets are applied in the order they were added.
    pub fn stylesheet(mut self, src: impl Into<String>) -> Self {
        self.stylesheets.push(Source::Text(src.into()));
        self
    }

    pub fn stylesheet_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stylesheets.push(Source::File(path.into()));
        self
    }

    pub fn transition_speed(mut self, speed: u32) -> Self {
        self.config.transition_speed = speed;
        self
    }

    /// Runs after all documents are loaded, e.g. to wire callbacks.
    pub fn setup(mut self, f: impl FnOnce(&mut ScreenFlow) -> Result<(), FlowError> + 'static) -> Self {
        self.setup.push(Box::new(f));
        self
    }

    /// Loads fonts, stylesheets and documents, then runs the setup hooks.
    pub fn build(self) -> Result<ScreenFlow, FlowError> {
        let mut fonts = FontSystem::new();
        for (family, bytes) in &self.fonts {
            if let Err(e) = fonts.load_family(family, bytes) {
                log::warn!("failed to load font '{family}': {e}");
            }
        }
        if fonts.is_empty() {
            log::warn!("no fonts loaded, text will not be drawn");
        }

        let config = self.config.with_surface_size(self.size);
        let mut flow = ScreenFlow::new(Rc::new(fonts), config);
        for sheet in &self.stylesheets {
            match sheet {
                Source::Text(src) => flow.load_stylesheet(src)?,
                Source::File(path) => flow.load_stylesheet_file(path)?,
            }
        }
        for doc in &self.flows {
            match doc {
                Source::Text(src) => flow.load_from_str(src)?,
                Source::File(path) => flow.load_from_file(path)?,
            };
        }
        for setup in self.setup {
            setup(&mut flow)?;
        }
        Ok(flow)
    }

    /// Builds the flow, starts it at `initial` and opens the window.
    ///
    /// Returns when the flow quits or the window is closed.
    pub fn run(self, initial: &str) -> anyhow::Result<()> {
        let config = RuntimeConfig::default()
            .with_title(self.title.clone())
            .with_size(self.size);
        let mut flow = self.build().context("failed to build the screen flow")?;
        flow.start(initial)
            .with_context(|| format!("failed to start at screen `{initial}`"))?;
        Runtime::run(config, GpuInit::default(), FlowApp { flow })
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── FlowApp ───────────────────────────────────────────────────────────────

/// Drives a started flow from the window runtime, one tick per frame.
pub struct FlowApp {
    flow: ScreenFlow,
}

impl FlowApp {
    pub fn new(flow: ScreenFlow) -> Self {
        Self { flow }
    }

    pub fn flow(&self) -> &ScreenFlow {
        &self.flow
    }
}

impl EngineApp for FlowApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let size = ctx.window.logical_size();
        if size.is_empty() {
            return AppControl::Continue;
        }
        if let Err(e) = self.flow.resize(size) {
            log::error!("resize failed: {e}");
            return AppControl::Exit;
        }

        let events = ctx.input_frame.take_events();
        match self.flow.tick(&events) {
            Ok(AppControl::Continue) => ctx.present(self.flow.surface(), Color::BLACK),
            Ok(AppControl::Exit) => AppControl::Exit,
            Err(e) => {
                log::error!("{e}");
                AppControl::Exit
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::flow::FlowState;
    use crate::screens::MessageScreen;

    const FLOW: &str = r#"<screenflow>
        <screen name="hello" type="message"><message>Hello</message></screen>
        <screen name="bye" type="message"><message>Bye</message></screen>
    </screenflow>"#;

    #[test]
    fn build_loads_documents_and_styles() {
        let flow = Application::new()
            .size(200, 100)
            .flow(FLOW)
            .stylesheet("screenflow { padding: 3 }")
            .transition_speed(7)
            .build()
            .unwrap();

        assert_eq!(flow.config().transition_speed, 7);
        assert_eq!(flow.config().surface_size, Size::new(200, 100));
        assert_eq!(flow.state(), FlowState::Creating);
        let style = &flow.get_screen("bye").unwrap().base().context().unwrap().style;
        assert_eq!(style.padding, 3);
    }

    #[test]
    fn setup_hooks_run_after_loading() {
        let ran = Rc::new(Cell::new(false));
        let seen = ran.clone();
        let flow = Application::new()
            .flow(FLOW)
            .setup(move |flow| {
                flow.screen_mut::<MessageScreen>("hello")?.on_touch(|nav| nav.navigate_to("bye"));
                seen.set(true);
                Ok(())
            })
            .build()
            .unwrap();
        assert!(ran.get());
        assert!(flow.contains_screen("hello"));
    }

    #[test]
    fn setup_errors_fail_the_build() {
        let result = Application::new()
            .flow(FLOW)
            .setup(|flow| {
                flow.screen_mut::<MessageScreen>("missing")?;
                Ok(())
            })
            .build();
        assert!(matches!(result, Err(FlowError::Lookup(_))));
    }

    #[test]
    fn broken_document_fails_the_build() {
        let result = Application::new().flow("<screenflow>").build();
        assert!(matches!(result, Err(FlowError::Definition(_))));
    }
}
