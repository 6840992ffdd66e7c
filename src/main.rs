pub mod ui;

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    fs::{self, File},
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use thump::{
    app_dirs::AppDirs,
    celebration::Celebration,
    challenge::ChallengeCatalog,
    config::{Config, ConfigStore, FileConfigStore},
    grading::{display_percentage, Grade},
    insights::GradeInsights,
    intensity::Intensity,
    protocol::ProtocolHandler,
    runtime::{terminal_events, Runner, ThumpEvent},
    service::SessionService,
    session::{Session, TickOutcome},
    stats::{ChallengeResult, ResultsDb, ResultsSummary, StoredResult},
    store::MemorySessionStore,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use webbrowser::Browser;

/// Session key the terminal front-end runs under
const LOCAL_SESSION: &str = "local";

/// heart-rate zone trainer with timed challenges and graded results
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "A terminal heart-rate simulator: pick an intensity, watch your simulated heart respond, and hold the target zone long enough to earn a grade."
)]
pub struct Cli {
    /// name results are stored under (remembered for next time)
    #[clap(short = 'u', long)]
    user: Option<String>,

    /// milliseconds between simulation ticks (remembered for next time)
    #[clap(short = 't', long)]
    tick_rate_ms: Option<u64>,

    /// challenge to start immediately, e.g. cardio-endurance
    #[clap(short = 'c', long)]
    challenge: Option<String>,

    /// serve JSON-lines requests on stdin/stdout instead of the terminal UI
    #[clap(long)]
    headless: bool,

    /// write the user's saved results as CSV to this path and exit
    #[clap(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// open on the saved results screen
    #[clap(long)]
    history: bool,
}

impl Cli {
    /// Fold CLI overrides into the stored config; true if anything changed
    fn apply_to(&self, config: &mut Config) -> bool {
        let before = config.clone();
        if let Some(user) = &self.user {
            config.user = user.clone();
        }
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms.max(1);
        }
        if let Some(id) = &self.challenge {
            config.default_challenge = Some(id.clone());
        }
        *config != before
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Simulation,
    ChallengeSelect,
    Results,
    History,
}

#[derive(Debug, Default)]
pub struct HistoryState {
    pub scroll_offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyAction {
    Continue,
    Quit,
}

pub struct App {
    pub config: Config,
    pub service: SessionService<MemorySessionStore, Option<ResultsDb>>,
    pub insights: GradeInsights,
    pub state: AppState,
    pub selected_challenge: usize,
    pub last_result: Option<ChallengeResult>,
    pub celebration: Celebration,
    pub history_state: HistoryState,
    pub history: Vec<StoredResult>,
    pub best_grades: Vec<(String, Grade)>,
    pub summary: Option<ResultsSummary>,
}

impl App {
    pub fn new(config: Config, db: Option<ResultsDb>) -> thump::Result<Self> {
        let catalog = ChallengeCatalog::bundled()?;
        let selected_challenge = config
            .default_challenge
            .as_deref()
            .and_then(|id| catalog.iter().position(|c| c.id == id))
            .unwrap_or(0);

        let mut service = SessionService::new(MemorySessionStore::new(), db, catalog);
        service.start(LOCAL_SESSION, &config.user)?;

        let mut app = Self {
            config,
            service,
            insights: GradeInsights::bundled()?,
            state: AppState::Simulation,
            selected_challenge,
            last_result: None,
            celebration: Celebration::new(),
            history_state: HistoryState::default(),
            history: Vec::new(),
            best_grades: Vec::new(),
            summary: None,
        };
        app.refresh_history();
        Ok(app)
    }

    pub fn session(&self) -> Option<&Session> {
        self.service.snapshot(LOCAL_SESSION).ok()
    }

    pub fn challenge_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.service
            .catalog()
            .get(id)
            .map(|c| c.name.as_str())
            .unwrap_or(id)
    }

    /// Reload saved results for the history screen
    pub fn refresh_history(&mut self) {
        let Some(db) = self.service.sink() else {
            return;
        };
        match (
            db.results_for(&self.config.user),
            db.best_grades(&self.config.user),
            db.summary(&self.config.user),
        ) {
            (Ok(history), Ok(best), Ok(summary)) => {
                self.history = history;
                self.best_grades = best;
                self.summary = Some(summary);
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                tracing::warn!("could not load result history: {}", e);
            }
        }
    }

    /// Attach a challenge by id and switch to the live view
    pub fn attach_selected(&mut self, challenge_id: &str) {
        match self.service.attach_challenge(LOCAL_SESSION, challenge_id) {
            Ok(_) => {
                self.last_result = None;
                self.celebration.stop();
                self.state = AppState::Simulation;
            }
            Err(e) => tracing::warn!("could not attach challenge: {}", e),
        }
    }

    pub fn set_intensity(&mut self, intensity: Intensity) {
        if let Err(e) = self
            .service
            .set_intensity(LOCAL_SESSION, &intensity.to_string())
        {
            tracing::warn!("could not set intensity: {}", e);
        }
    }

    pub fn toggle_pause(&mut self) {
        let paused = self.session().map(|s| s.is_paused()).unwrap_or(false);
        let outcome = if paused {
            self.service.resume(LOCAL_SESSION)
        } else {
            self.service.stop(LOCAL_SESSION)
        };
        if let Err(e) = outcome {
            tracing::warn!("could not toggle pause: {}", e);
        }
    }

    /// Advance the simulation by real elapsed time; `width`/`height` size the celebration
    pub fn on_tick(&mut self, delta_ms: f64, width: u16, height: u16) -> thump::Result<()> {
        let (outcome, _) = self.service.tick(LOCAL_SESSION, delta_ms)?;
        if let TickOutcome::Completed(result) = outcome {
            if result.grade == Grade::A {
                self.celebration.start(width, height);
            }
            self.last_result = Some(result);
            self.state = AppState::Results;
            self.refresh_history();
        }
        self.celebration.update();
        Ok(())
    }

    fn share_url(&self) -> Option<String> {
        let result = self.last_result.as_ref()?;
        let def = self.service.catalog().get(&result.challenge_id)?;
        let pct = display_percentage(result.time_achieved, def.goal_duration).ok()?;
        let text = format!(
            "Grade {} on {} ({:.0}% of goal) with thump",
            result.grade, def.name, pct
        );
        Some(format!(
            "https://twitter.com/intent/tweet?text={}",
            urlencoding::encode(&text)
        ))
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }
        if key.code == KeyCode::Esc {
            return KeyAction::Quit;
        }

        match self.state {
            AppState::Simulation => match key.code {
                KeyCode::Char('1') => self.set_intensity(Intensity::Rest),
                KeyCode::Char('2') => self.set_intensity(Intensity::Jog),
                KeyCode::Char('3') => self.set_intensity(Intensity::Sprint),
                KeyCode::Char(' ') => self.toggle_pause(),
                KeyCode::Char('c') => self.state = AppState::ChallengeSelect,
                KeyCode::Char('d') => {
                    if let Err(e) = self.service.detach(LOCAL_SESSION) {
                        tracing::warn!("could not detach challenge: {}", e);
                    }
                }
                KeyCode::Char('h') => self.open_history(),
                _ => {}
            },
            AppState::ChallengeSelect => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.selected_challenge = self.selected_challenge.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let last = self.service.catalog().len().saturating_sub(1);
                    self.selected_challenge = (self.selected_challenge + 1).min(last);
                }
                KeyCode::Enter => {
                    let id = self
                        .service
                        .catalog()
                        .as_slice()
                        .get(self.selected_challenge)
                        .map(|c| c.id.clone());
                    if let Some(id) = id {
                        self.attach_selected(&id);
                    }
                }
                KeyCode::Char('b') | KeyCode::Backspace => self.state = AppState::Simulation,
                _ => {}
            },
            AppState::Results => match key.code {
                KeyCode::Char('r') => {
                    if let Some(id) = self.last_result.as_ref().map(|r| r.challenge_id.clone()) {
                        self.attach_selected(&id);
                    }
                }
                KeyCode::Char('n') => {
                    self.celebration.stop();
                    self.state = AppState::ChallengeSelect;
                }
                KeyCode::Char('f') => {
                    if let Err(e) = self.service.detach(LOCAL_SESSION) {
                        tracing::warn!("could not detach challenge: {}", e);
                    }
                    self.celebration.stop();
                    self.state = AppState::Simulation;
                }
                KeyCode::Char('h') => self.open_history(),
                KeyCode::Char('t') => {
                    if Browser::is_available() {
                        if let Some(url) = self.share_url() {
                            webbrowser::open(&url).unwrap_or_default();
                        }
                    }
                }
                _ => {}
            },
            AppState::History => match key.code {
                KeyCode::Char('b') | KeyCode::Backspace => self.state = AppState::Simulation,
                KeyCode::Up => {
                    self.history_state.scroll_offset =
                        self.history_state.scroll_offset.saturating_sub(1);
                }
                KeyCode::Down => {
                    // clamped against the table height when rendering
                    self.history_state.scroll_offset += 1;
                }
                KeyCode::PageUp => {
                    self.history_state.scroll_offset =
                        self.history_state.scroll_offset.saturating_sub(10);
                }
                KeyCode::PageDown => self.history_state.scroll_offset += 10,
                KeyCode::Home => self.history_state.scroll_offset = 0,
                _ => {}
            },
        }
        KeyAction::Continue
    }

    fn open_history(&mut self) {
        self.refresh_history();
        self.history_state = HistoryState::default();
        self.state = AppState::History;
    }
}

/// Send tracing output to the state-dir log file; stdout belongs to the UI or the protocol
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let Some(log_path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = log_path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = File::options().create(true).append(true).open(&log_path) else {
        return;
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    if cli.apply_to(&mut config) {
        if let Err(e) = config_store.save(&config) {
            tracing::warn!(path = %config_store.path().display(), "could not save config: {}", e);
        }
    }
    tracing::info!(user = %config.user, tick_rate_ms = config.tick_rate_ms, "starting thump");

    if let Some(path) = &cli.export {
        return export(&config, path);
    }
    if cli.headless {
        return serve_headless(config);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty (use --headless for piped input)")
            .exit();
    }

    let db = match ResultsDb::new() {
        Ok(db) => Some(db),
        Err(e) => {
            tracing::error!("results will not be saved: {}", e);
            None
        }
    };
    let mut app = App::new(config, db).context("failed to load bundled assets")?;
    if let Some(id) = &cli.challenge {
        app.attach_selected(id);
    }
    if cli.history {
        app.open_history();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn export(config: &Config, path: &Path) -> anyhow::Result<()> {
    let db = ResultsDb::new().context("failed to open results database")?;
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let written = db.export_csv(&config.user, file)?;
    tracing::info!(rows = written, path = %path.display(), "exported results");
    println!("exported {written} results to {}", path.display());
    Ok(())
}

fn serve_headless(config: Config) -> anyhow::Result<()> {
    let db = ResultsDb::new().context("failed to open results database")?;
    let service = SessionService::new(MemorySessionStore::new(), db, ChallengeCatalog::bundled()?);
    let mut handler = ProtocolHandler::new(service, GradeInsights::bundled()?, config.user);

    let stdin = io::stdin();
    let stdout = io::stdout();
    handler.serve(stdin.lock(), stdout.lock())?;
    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let interval = Duration::from_millis(app.config.tick_rate_ms.max(1));
    let mut runner = Runner::new(terminal_events(), interval);

    terminal.draw(|f| ui(app, f))?;
    loop {
        match runner.step() {
            ThumpEvent::Key(key) => {
                if app.handle_key(key) == KeyAction::Quit {
                    break;
                }
            }
            ThumpEvent::Resize => {}
            ThumpEvent::Tick { elapsed_ms } => {
                let size = terminal.size().unwrap_or_default();
                app.on_tick(elapsed_ms, size.width, size.height)?;
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    if let Some(session) = app.session() {
        tracing::info!(phase = %session.phase(), "leaving terminal ui");
    }
    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    let screen = ui::screen::current_screen(&app.state);
    screen.render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use ratatui::{backend::TestBackend, Terminal};
    use thump::session::Phase;
    use thump::zone::Zone;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(Config::default(), Some(ResultsDb::open_in_memory().unwrap())).unwrap()
    }

    fn draw(app: &mut App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["thump"]);
        assert_eq!(cli.user, None);
        assert_eq!(cli.tick_rate_ms, None);
        assert_eq!(cli.challenge, None);
        assert!(!cli.headless);
        assert!(!cli.history);
        assert_eq!(cli.export, None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "thump",
            "--user",
            "ana",
            "-t",
            "50",
            "--challenge",
            "fat-burn-focus",
            "--export",
            "out.csv",
        ]);
        assert_eq!(cli.user.as_deref(), Some("ana"));
        assert_eq!(cli.tick_rate_ms, Some(50));
        assert_eq!(cli.challenge.as_deref(), Some("fat-burn-focus"));
        assert_eq!(cli.export, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::default();
        assert!(!Cli::default().apply_to(&mut config));

        let cli = Cli::parse_from(["thump", "-u", "bo", "--tick-rate-ms", "0"]);
        assert!(cli.apply_to(&mut config));
        assert_eq!(config.user, "bo");
        assert_eq!(config.tick_rate_ms, 1);

        // same values again are not a change
        assert!(!cli.apply_to(&mut config));
    }

    #[test]
    fn test_app_starts_running_session() {
        let app = test_app();
        let session = app.session().unwrap();
        assert_eq!(session.phase(), Phase::Running);
        assert_eq!(app.state, AppState::Simulation);
        assert_eq!(app.selected_challenge, 0);
    }

    #[test]
    fn test_default_challenge_is_preselected() {
        let config = Config {
            default_challenge: Some("peak-performance-intervals".to_string()),
            ..Config::default()
        };
        let app = App::new(config, None).unwrap();
        assert_eq!(app.selected_challenge, 2);
    }

    #[test]
    fn test_intensity_keys() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.session().unwrap().simulation.target_heart_rate, 175.0);
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.session().unwrap().simulation.intensity, Intensity::Jog);
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.session().unwrap().simulation.target_heart_rate, 70.0);
    }

    #[test]
    fn test_pause_key_toggles() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.session().unwrap().is_paused());
        app.on_tick(1_000.0, 80, 24).unwrap();
        assert_eq!(app.session().unwrap().simulation.history.len(), 1);

        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.session().unwrap().is_paused());
    }

    #[test]
    fn test_challenge_selection_flow() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.state, AppState::ChallengeSelect);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_challenge, 2);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected_challenge, 1);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Simulation);
        let session = app.session().unwrap();
        assert_eq!(session.phase(), Phase::ChallengeActive);
        assert_eq!(
            session.challenge().unwrap().definition.target_zone,
            Zone::FatBurn
        );

        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.session().unwrap().phase(), Phase::Running);
    }

    #[test]
    fn test_completion_moves_to_results_and_saves() {
        let mut app = test_app();
        app.attach_selected("peak-performance-intervals");
        app.handle_key(key(KeyCode::Char('3')));
        for _ in 0..1_300 {
            app.on_tick(100.0, 80, 24).unwrap();
            if app.state == AppState::Results {
                break;
            }
        }

        assert_eq!(app.state, AppState::Results);
        let result = app.last_result.clone().unwrap();
        assert_eq!(result.grade, Grade::A);
        assert!(app.celebration.is_active);
        assert_eq!(app.history.len(), 1);
        assert_eq!(
            app.best_grades,
            vec![("peak-performance-intervals".to_string(), Grade::A)]
        );
        let summary = app.summary.unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.average_grade, Some(Grade::A));

        let url = app.share_url().unwrap();
        assert!(url.contains("Grade%20A%20on%20Peak%20Performance%20Intervals"));
        assert!(url.contains("%28100%25%20of%20goal%29"));
    }

    #[test]
    fn test_results_keys() {
        let mut app = test_app();
        app.last_result = Some(ChallengeResult {
            challenge_id: "cardio-endurance".to_string(),
            time_achieved: 12.0,
            grade: Grade::F,
        });
        app.state = AppState::Results;

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Simulation);
        assert!(app.last_result.is_none());
        assert_eq!(app.session().unwrap().phase(), Phase::ChallengeActive);

        app.state = AppState::Results;
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.state, AppState::Simulation);
        assert_eq!(app.session().unwrap().phase(), Phase::Running);

        app.state = AppState::Results;
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::ChallengeSelect);
    }

    #[test]
    fn test_history_screen_scrolls_and_returns() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.state, AppState::History);

        app.handle_key(key(KeyCode::PageDown));
        assert_eq!(app.history_state.scroll_offset, 10);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.history_state.scroll_offset, 9);
        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.history_state.scroll_offset, 0);

        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.state, AppState::Simulation);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        assert_eq!(app.handle_key(key(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(app.handle_key(key(KeyCode::Char('x'))), KeyAction::Continue);
    }

    #[test]
    fn test_ui_function_every_state() {
        let mut app = test_app();
        assert!(draw(&mut app).contains("70 bpm"));

        app.state = AppState::ChallengeSelect;
        assert!(draw(&mut app).contains("Choose a challenge"));

        app.state = AppState::History;
        let text = draw(&mut app);
        assert!(text.contains("History for local"));
        assert!(text.contains("No saved results yet"));

        app.state = AppState::Results;
        assert!(draw(&mut app).contains("No completed challenge yet"));
    }

    #[test]
    fn test_history_scroll_is_clamped_on_render() {
        let mut app = test_app();
        app.open_history();
        app.history_state.scroll_offset = 500;
        draw(&mut app);
        // empty history renders the placeholder and leaves the offset alone
        assert_eq!(app.history_state.scroll_offset, 500);

        app.history = vec![StoredResult {
            user: "local".to_string(),
            challenge_id: "cardio-endurance".to_string(),
            time_achieved: 61.0,
            grade: Grade::A,
            timestamp: chrono::Local::now(),
        }];
        let text = draw(&mut app);
        assert_eq!(app.history_state.scroll_offset, 0);
        assert!(text.contains("Cardio Endurance"));
    }

    #[test]
    fn test_unknown_challenge_is_ignored() {
        let mut app = test_app();
        app.attach_selected("marathon");
        assert_eq!(app.session().unwrap().phase(), Phase::Running);
    }

    #[test]
    fn test_share_url_escapes_reserved_characters() {
        let mut app = test_app();
        app.last_result = Some(ChallengeResult {
            challenge_id: "fat-burn-focus".to_string(),
            time_achieved: 90.0,
            grade: Grade::C,
        });
        let url = app.share_url().unwrap();
        let (base, text) = url.split_once("?text=").unwrap();
        assert_eq!(base, "https://twitter.com/intent/tweet");
        assert!(!text.contains([' ', '=', '?', '/', '&', '(', ')']));
        assert_eq!(
            urlencoding::decode(text).unwrap(),
            "Grade C on Fat Burn Focus (50% of goal) with thump"
        );
    }

    #[test]
    fn test_tick_errors_propagate() {
        let mut app = test_app();
        assert_matches!(app.on_tick(100.0, 80, 24), Ok(()));
        app.service.end(LOCAL_SESSION).unwrap();
        assert!(app.on_tick(100.0, 80, 24).is_err());
    }
}
