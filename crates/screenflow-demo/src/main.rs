use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use screenflow::prelude::*;
use screenflow_engine::logging::{init_logging, LoggingConfig};

const DEMO_FLOW: &str = include_str!("../flows/demo.xml");
const DEMO_STYLE: &str = include_str!("../flows/demo.css");

/// Family name the system font is registered under. `flows/demo.css` refers to it.
const FONT_FAMILY: &str = "sans";

#[derive(Parser)]
#[command(name = "screenflow-demo")]
#[command(about = "Guest book kiosk built with screenflow")]
#[command(version)]
struct Cli {
    /// Flow document to load instead of the built-in guest book
    #[arg(long)]
    flow: Option<PathBuf>,

    /// Stylesheet to load instead of the built-in one
    #[arg(long)]
    style: Option<PathBuf>,

    /// Name of the first screen
    #[arg(long, default_value = "welcome")]
    start: String,

    #[arg(long, default_value_t = 480)]
    width: u32,

    #[arg(long, default_value_t = 320)]
    height: u32,

    /// Transition speed in pixels per frame
    #[arg(long, default_value_t = 5)]
    speed: u32,

    /// Log filter, e.g. "debug" or "screenflow=debug,wgpu=warn"
    #[arg(long)]
    log: Option<String>,

    /// Render every screen to PNG files in this directory instead of opening a window
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &cli.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    let app = application(&cli);
    match &cli.snapshot {
        Some(dir) => snapshot(app, &cli.start, dir),
        None => app.run(&cli.start),
    }
}

fn application(cli: &Cli) -> Application {
    let mut app = Application::new()
        .title("Guest book")
        .size(cli.width, cli.height)
        .transition_speed(cli.speed)
        .setup(wire_callbacks);

    match load_font() {
        Some(bytes) => app = app.font(FONT_FAMILY, bytes),
        None => log::warn!("no system font found, text will be invisible"),
    }

    app = match &cli.flow {
        Some(path) => app.flow_file(path),
        None => app.flow(DEMO_FLOW),
    };
    match &cli.style {
        Some(path) => app.stylesheet_file(path),
        None => app.stylesheet(DEMO_STYLE),
    }
}

// ── callbacks ─────────────────────────────────────────────────────────────

/// Connects the guest book screens. Screens missing from a custom flow are
/// skipped.
fn wire_callbacks(flow: &mut ScreenFlow) -> Result<(), FlowError> {
    if let Ok(welcome) = flow.screen_mut::<MessageScreen>("welcome") {
        welcome.on_touch(|nav| nav.navigate_to("menu"));
    }

    if let Ok(menu) = flow.screen_mut::<SelectScreen>("menu") {
        menu.on_select(|index, option, nav| {
            log::info!("menu: {option}");
            match index {
                0 => nav.navigate_to("sign"),
                1 => nav.navigate_to("guests"),
                _ => nav.quit(),
            }
        });
    }

    let guests = Rc::new(RefCell::new(Vec::new()));
    if let Ok(list) = flow.screen_mut::<ListScreen>("guests") {
        guests.borrow_mut().extend(list.items().iter().cloned());
        let source = guests.clone();
        list.set_provider(move || source.borrow().clone());
        list.on_item_select(|_, guest, nav| {
            log::info!("selected {guest}");
            nav.navigate_back();
        });
    }

    if let Ok(sign) = flow.screen_mut::<InputScreen>("sign") {
        sign.on_submit(move |name, nav| {
            let name = name.trim();
            if name.is_empty() {
                return;
            }
            log::info!("{name} signed the guest book");
            guests.borrow_mut().push(name.to_string());
            nav.navigate_to("thanks");
        });
    }

    if let Ok(thanks) = flow.screen_mut::<MessageScreen>("thanks") {
        // Back past the input screen to the menu.
        thanks.on_touch(|nav| {
            nav.navigate_back();
            nav.navigate_back();
        });
    }

    Ok(())
}

// ── snapshot mode ─────────────────────────────────────────────────────────

/// Writes a preview of every screen, then runs the flow headless and saves
/// the first frame.
fn snapshot(app: Application, start: &str, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mut flow = app.build().context("failed to build the screen flow")?;
    let size = flow.config().surface_size;

    let mut names: Vec<String> = flow.screen_names().map(str::to_string).collect();
    names.sort();
    for name in &names {
        let preview = flow.get_screen_mut(name)?.generate_preview(size)?;
        let path = dir.join(format!("{name}.png"));
        preview.save_png(&path)?;
        log::info!("wrote {}", path.display());
    }

    let mut backend = HeadlessBackend { dir: dir.to_path_buf(), frames: 0 };
    flow.run(start, &mut backend)?;
    Ok(())
}

/// Saves the first presented frame and quits on the first poll.
struct HeadlessBackend {
    dir: PathBuf,
    frames: usize,
}

impl FlowBackend for HeadlessBackend {
    type Error = anyhow::Error;

    fn poll_events(&mut self) -> Vec<InputEvent> {
        vec![InputEvent::Quit]
    }

    fn present(&mut self, frame: &Image) -> Result<()> {
        if self.frames == 0 {
            frame.save_png(self.dir.join("start.png"))?;
        }
        self.frames += 1;
        Ok(())
    }
}

// ── fonts ─────────────────────────────────────────────────────────────────

fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .find_map(|p| fs::read(p).ok())
}
