pub mod confetti;
pub mod config;
pub mod round;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod ui;
pub mod words;

use crate::confetti::ConfettiAnimation;
use crate::config::GameConfig;
use crate::runtime::{EventPump, GameEvent};
use crate::session::{RoundResolution, Session};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// multi-round hangman in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Multi-round hangman: pick a category and difficulty, guess words against the clock, spend hints wisely, and chase the confetti threshold."
)]
pub struct Cli {
    /// word category to play
    #[clap(short = 'c', long, default_value = "Animals")]
    category: String,

    /// difficulty tier
    #[clap(short = 'd', long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// path to a config file overriding the built-in one
    #[clap(long)]
    config: Option<PathBuf>,

    /// override the configured number of rounds per session
    #[clap(short = 'r', long, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: Option<u32>,

    /// seed the word selection for reproducible sessions
    #[clap(long)]
    seed: Option<u64>,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Setup,
    Playing,
    RoundComplete,
    GameComplete,
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub screen: Screen,
    pub confetti: ConfettiAnimation,
    pub last_resolution: Option<RoundResolution>,
    rng: StdRng,
}

impl App {
    pub fn new(session: Session, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            session,
            screen: Screen::Setup,
            confetti: ConfettiAnimation::new(),
            last_resolution: None,
            rng,
        }
    }

    pub fn start_session(&mut self) {
        self.session.start(&mut self.rng);
        self.last_resolution = None;
        self.confetti.stop();
        self.screen = Screen::Playing;
    }

    pub fn advance_round(&mut self) {
        self.session.advance_round(&mut self.rng);
        self.last_resolution = None;
        self.screen = Screen::Playing;
    }

    /// Back to the setup screen, discarding any in-flight round.
    pub fn reset_session(&mut self) {
        self.confetti.stop();
        self.last_resolution = None;
        self.screen = Screen::Setup;
    }

    /// Frame update: run the due whole seconds through the round clock and
    /// keep the confetti animation moving.
    pub fn on_frame(&mut self, seconds: u32, width: u16, height: u16) {
        if self.screen == Screen::Playing {
            for _ in 0..seconds {
                if let Some(round) = self.session.round_mut() {
                    round.tick();
                }
            }
            if seconds > 0 {
                self.check_round_end(width, height);
            }
        }
        self.confetti.update();
    }

    pub fn guess(&mut self, letter: char, width: u16, height: u16) {
        if self.screen != Screen::Playing {
            return;
        }
        if let Some(round) = self.session.round_mut() {
            round.guess(letter);
        }
        self.check_round_end(width, height);
    }

    pub fn reveal_hint1(&mut self) {
        if self.screen == Screen::Playing {
            if let Some(round) = self.session.round_mut() {
                round.reveal_hint1();
            }
        }
    }

    pub fn reveal_hint2(&mut self) {
        if self.screen == Screen::Playing {
            if let Some(round) = self.session.round_mut() {
                round.reveal_hint2();
            }
        }
    }

    /// If the round just hit a terminal phase, fold it into the session and
    /// pick the next screen, firing confetti on a qualifying final score.
    pub fn check_round_end(&mut self, width: u16, height: u16) {
        let Some(resolution) = self.session.resolve_round() else {
            return;
        };
        let session_complete = resolution.session_complete;
        self.last_resolution = Some(resolution);

        if session_complete {
            self.screen = Screen::GameComplete;
            if self.session.summary().is_some_and(|s| s.confetti) {
                self.confetti.start(width, height);
            }
        } else {
            self.screen = Screen::RoundComplete;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match GameConfig::load(cli.config.as_deref()) {
        Ok(mut config) => {
            if let Some(rounds) = cli.rounds {
                config.game_settings.rounds_per_session = rounds;
            }
            config
        }
        Err(e) => Cli::command().error(ErrorKind::Io, e.to_string()).exit(),
    };

    let session = match Session::new(&config, &cli.category, &cli.difficulty.to_string()) {
        Ok(session) => session,
        Err(e) => {
            let known = config.categories.keys().join(", ");
            Cli::command()
                .error(
                    ErrorKind::InvalidValue,
                    format!("{e} (available categories: {known})"),
                )
                .exit()
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, cli.seed);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut events = EventPump::from_terminal(Duration::from_millis(TICK_RATE_MS));

    loop {
        terminal.draw(|f| ui(app, f))?;
        let size = terminal.size().unwrap_or_default();

        match events.next_event() {
            GameEvent::Frame { seconds } => app.on_frame(seconds, size.width, size.height),
            GameEvent::Resize => {}
            GameEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Enter => match app.screen {
                    Screen::Setup | Screen::GameComplete => {
                        app.start_session();
                        events.reset_clock();
                    }
                    Screen::RoundComplete => {
                        app.advance_round();
                        events.reset_clock();
                    }
                    Screen::Playing => {}
                },
                KeyCode::Char(c) => match app.screen {
                    Screen::Playing => match c {
                        '1' => app.reveal_hint1(),
                        '2' => app.reveal_hint2(),
                        _ => app.guess(c, size.width, size.height),
                    },
                    Screen::RoundComplete | Screen::GameComplete if c == 'r' => {
                        app.reset_session()
                    }
                    _ => {}
                },
                _ => {}
            },
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
