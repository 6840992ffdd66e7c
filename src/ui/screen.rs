use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::{ui::history::render_history, App, AppState};

/// A UI Screen boundary: responsible for rendering and optional key handling
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
    /// Optional per-screen key handling. Returns true if the key was handled.
    fn on_key(&mut self, _key: KeyEvent, _app: &mut App) -> bool {
        false
    }
}

/// Live heart-rate view, the home screen
pub struct SimulationScreen;

impl Screen for SimulationScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

pub struct ChallengeSelectScreen;

impl Screen for ChallengeSelectScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Grade and coaching text for the last completed challenge
pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Saved results; needs `&mut App` to clamp its scroll offset
pub struct HistoryScreen;

impl Screen for HistoryScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_history(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Simulation => Box::new(SimulationScreen),
        AppState::ChallengeSelect => Box::new(ChallengeSelectScreen),
        AppState::Results => Box::new(ResultsScreen),
        AppState::History => Box::new(HistoryScreen),
    }
}
