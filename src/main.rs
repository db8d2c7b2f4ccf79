//! Terminal entry point.
//!
//! Resolves the configuration, opens the store, starts the worker pool and
//! runs the event loop:
//!
//! ```text
//! loop {
//!     drain worker responses ─▶ router
//!     redraw if anything changed
//!     poll terminal 50 ms ─▶ map_key ─▶ router
//! }
//! ```
//!
//! Actions coming back from the router are either `Quit` or jobs for the
//! worker pool; everything else is handled inside the router.

use clap::Parser;
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use reqtui::app::map_key;
use reqtui::http::{RequestExecutor, ReqwestExecutor};
use reqtui::worker::{WorkerPool, WorkerResponse};
use reqtui::{observability, ui, Action, Config, Event, NavigationRouter, Overrides, Theme};
use std::io::{self, Stdout, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Browse collections of HTTP requests and send them from the terminal.
#[derive(Debug, Parser)]
#[command(name = "reqtui", version, about)]
struct Cli {
    /// Config file [default: <data-dir>/config.toml when present]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the store, logs and traces
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Rows per page in list views
    #[arg(long, value_name = "N")]
    page_size: Option<NonZeroUsize>,

    /// Built-in theme (catppuccin-mocha, -macchiato, -frappe, -latte)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Log filter, e.g. `info` or `reqtui=debug`
    #[arg(long, value_name = "FILTER")]
    trace_level: Option<String>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Do not create demo collections in an empty store
    #[arg(long)]
    no_demo: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.data_dir.clone(),
            page_size: self.page_size,
            theme: self.theme.clone(),
            trace_level: self.trace_level.clone(),
            verbose: self.verbose,
            no_demo: self.no_demo,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            eprintln!("reqtui: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> reqtui::Result<()> {
    let config = Config::resolve(cli.config.as_deref(), cli.overrides())?;
    if let Err(e) = observability::init_tracing(&config) {
        eprintln!("reqtui: logging disabled: {e}");
    }
    tracing::debug!(?config, "configuration resolved");

    let (storage, seeded) = reqtui::open_storage(&config)?;
    let executor: Arc<dyn RequestExecutor> = Arc::new(ReqwestExecutor::new(config.request_timeout())?);
    let theme = reqtui::load_theme(&config);

    let (responses_tx, responses) = mpsc::channel();
    let pool = WorkerPool::spawn(config.worker_threads, responses_tx)?;
    let router = reqtui::build_router(storage, executor, config.page_size);

    let screen = Screen::enter()?;
    let mut session = Session {
        runtime: Runtime::new(router, pool),
        responses,
        theme,
        screen,
        size: terminal::size()?,
    };
    session.run(seeded)
}

/// Raw mode and the alternate screen, restored on drop.
struct Screen {
    stdout: Stdout,
}

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { stdout })
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        self.stdout.write_all(frame.as_bytes())?;
        self.stdout.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Router plus worker pool, with a flag for frames that need redrawing.
struct Runtime {
    router: NavigationRouter,
    pool: WorkerPool,
    dirty: bool,
}

impl Runtime {
    fn new(router: NavigationRouter, pool: WorkerPool) -> Self {
        Self {
            router,
            pool,
            dirty: true,
        }
    }

    fn dispatch(&mut self, event: Event) -> Flow {
        let dispatch = self.router.dispatch(event);
        self.dirty |= dispatch.should_render;
        self.execute(dispatch.actions)
    }

    fn execute(&mut self, actions: Vec<Action>) -> Flow {
        for action in actions {
            match action {
                Action::Quit => return Flow::Quit,
                Action::PostToWorker(message) => {
                    if let Err(e) = self.pool.post(message) {
                        tracing::error!(error = %e, "failed to post worker job");
                        self.router.show_error(e.to_string());
                        self.dirty = true;
                    }
                }
                other => tracing::warn!(action = ?other, "unexpected action reached the runtime"),
            }
        }
        Flow::Continue
    }
}

struct Session {
    runtime: Runtime,
    responses: Receiver<WorkerResponse>,
    theme: Theme,
    screen: Screen,
    size: (u16, u16),
}

impl Session {
    fn run(&mut self, seeded: bool) -> reqtui::Result<()> {
        let _span = tracing::info_span!("session", workers = self.runtime.pool.size()).entered();

        let (width, height) = self.size;
        self.runtime.dispatch(Event::Resize { width, height });
        let initial = self.runtime.router.start();
        if seeded {
            self.runtime
                .router
                .show_info("Created demo collections: JSONPlaceholder, Reqres and HTTPBin");
        }
        if let Flow::Quit = self.runtime.execute(initial) {
            return Ok(());
        }

        loop {
            while let Ok(response) = self.responses.try_recv() {
                if let Flow::Quit = self.runtime.dispatch(Event::Worker(response)) {
                    return Ok(());
                }
            }

            if self.runtime.dirty {
                self.draw()?;
                self.runtime.dirty = false;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let event = match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    match map_key(&key, self.runtime.router.input_context()) {
                        Some(key) => Event::Key(key),
                        None => continue,
                    }
                }
                TermEvent::Resize(width, height) => {
                    self.size = (width, height);
                    Event::Resize { width, height }
                }
                _ => continue,
            };

            if let Flow::Quit = self.runtime.dispatch(event) {
                tracing::info!("quitting");
                return Ok(());
            }
        }
    }

    fn draw(&mut self) -> reqtui::Result<()> {
        let (cols, rows) = self.size;
        let frame = ui::render(
            &self.runtime.router.viewmodel(),
            &self.theme,
            usize::from(rows),
            usize::from(cols),
        );
        self.screen.draw(&frame)?;
        Ok(())
    }
}
