mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn, LevelFilter};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use wordpace::{
    config::{Config, ConfigStore, FileConfigStore},
    controller::{Controller, Flow},
    logging,
    runtime::{terminal_events, Runner, Step},
    samples::{Difficulty, SampleBank},
};

use crate::ui::FeedbackView;

const TICK_RATE_MS: u64 = 100;

/// typing speed test with live per-word feedback
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed test: type the sample sentence, watch each word turn green or red as you go, and get your words per minute when you stop."
)]
pub struct Cli {
    /// difficulty of the sample sentence (defaults to the last one used)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// custom prompt to use instead of the sample sentences
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// JSON file with sample sentences: {"easy": [..], "medium": [..], "hard": [..]}
    #[clap(long)]
    samples: Option<PathBuf>,

    /// where to write the log (defaults to ~/.local/state/wordpace/wordpace.log)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// config file to read and update (defaults to the platform config dir)
    #[clap(long)]
    config: Option<PathBuf>,

    /// log debug details such as every input change
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        self.config
            .as_ref()
            .map(FileConfigStore::with_path)
            .unwrap_or_default()
    }

    fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Pick the sentences to test with: a custom prompt wins, then a samples
    /// file from the command line or config, then the built-in bank.
    fn sample_bank(&self, cfg: &Config) -> SampleBank {
        if let Some(prompt) = &self.prompt {
            return SampleBank::single(prompt);
        }

        match self.samples.as_ref().or(cfg.samples_path.as_ref()) {
            Some(path) => SampleBank::from_path(path).unwrap_or_else(|e| {
                warn!("falling back to built-in samples, {}: {e}", path.display());
                SampleBank::builtin()
            }),
            None => SampleBank::builtin(),
        }
    }
}

pub struct App {
    pub controller: Controller<FeedbackView>,
}

impl App {
    pub fn new(bank: SampleBank, difficulty: Difficulty) -> Self {
        Self {
            controller: Controller::with_thread_rng(bank, difficulty, Some(FeedbackView::default())),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.controller.test().difficulty()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = cli.log_file.clone().or_else(logging::default_log_path) {
        if let Err(e) = logging::init(&log_path, cli.log_level()) {
            eprintln!("logging disabled: {e}");
        }
    }

    let store = cli.config_store();
    let mut cfg = store.load();
    let difficulty = cli.difficulty.unwrap_or(cfg.difficulty);
    let mut app = App::new(cli.sample_bank(&cfg), difficulty);
    info!("wordpace started ({difficulty})");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    cfg.difficulty = app.difficulty();
    if cli.samples.is_some() {
        cfg.samples_path = cli.samples.clone();
    }
    if let Err(e) = store.save(&cfg) {
        warn!("could not save config to {}: {e}", store.path().display());
    }

    outcome
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(terminal_events(), Duration::from_millis(TICK_RATE_MS));

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        let step = runner.step(app.controller.test().accepts_input());
        let now = Instant::now();

        match step {
            Step::Tick => app.controller.tick(now),
            Step::Resize => {}
            Step::Command(command) => {
                if app.controller.handle(command, now) == Flow::Quit {
                    info!("quit");
                    return Ok(());
                }
            }
        }
    }
}
