use chrono::{DateTime, Local};
use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use std::time::Duration;
use thump::{grading::Grade, stats::ResultsSummary};
use time_humanize::{Accuracy, HumanTime, Tense};

use super::{charting::fit_width, grade_color};
use crate::App;

const NAME_COLUMN_WIDTH: usize = 28;

pub struct HistoryRowData {
    pub challenge_name: String,
    pub time_achieved: f64,
    pub grade: Grade,
    pub recorded: String,
}

/// "3 hours ago" style age of a stored result
pub fn humanize_age(at: DateTime<Local>, now: DateTime<Local>) -> String {
    let secs = (now - at).num_seconds().max(0) as u64;
    HumanTime::from(Duration::from_secs(secs)).to_text_en(Accuracy::Rough, Tense::Past)
}

/// Header line with the result count and average grade
pub fn summary_line(summary: Option<&ResultsSummary>) -> String {
    match summary {
        Some(ResultsSummary {
            count,
            average_grade: Some(grade),
            average_points,
        }) => format!(
            "{count} result{}   average {grade} ({average_points:.1})",
            if *count == 1 { "" } else { "s" }
        ),
        _ => "0 results   average N/A".to_string(),
    }
}

/// Pure presenter for a single history row
pub fn present_row(data: &HistoryRowData) -> Row<'static> {
    Row::new(vec![
        Cell::from(fit_width(&data.challenge_name, NAME_COLUMN_WIDTH)),
        Cell::from(format!("{:.1}s", data.time_achieved)),
        Cell::from(data.grade.to_string()).style(
            Style::default()
                .fg(grade_color(data.grade))
                .add_modifier(Modifier::BOLD),
        ),
        Cell::from(data.recorded.clone()),
    ])
}

/// Render the saved-results screen
pub fn render_history(app: &mut App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(4), // Title, summary + best grades
            Constraint::Min(0),    // Results table
            Constraint::Length(2), // Instructions
        ])
        .split(area);

    let best = if app.best_grades.is_empty() {
        "no graded challenges yet".to_string()
    } else {
        app.best_grades
            .iter()
            .map(|(id, grade)| format!("{}: {}", app.challenge_name(id), grade))
            .join("   ")
    };
    let title = Paragraph::new(vec![
        Line::from(summary_line(app.summary.as_ref())),
        Line::from(format!("Best  {best}")),
    ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("History for {}", app.config.user)),
        )
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    if app.history.is_empty() {
        let no_data = Paragraph::new("No saved results yet. Finish a challenge to record one.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(no_data, chunks[1]);
    } else {
        let table_height = chunks[1].height.saturating_sub(3) as usize; // borders + header
        let max_scroll = app.history.len().saturating_sub(table_height);
        if app.history_state.scroll_offset > max_scroll {
            app.history_state.scroll_offset = max_scroll;
        }

        let header = Row::new(vec![
            Cell::from("Challenge"),
            Cell::from("In zone"),
            Cell::from("Grade"),
            Cell::from("When"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let now = Local::now();
        let rows: Vec<Row> = app
            .history
            .iter()
            .skip(app.history_state.scroll_offset)
            .take(table_height)
            .map(|stored| {
                present_row(&HistoryRowData {
                    challenge_name: app.challenge_name(&stored.challenge_id).to_string(),
                    time_achieved: stored.time_achieved,
                    grade: stored.grade,
                    recorded: humanize_age(stored.timestamp, now),
                })
            })
            .collect();

        let widths = [
            Constraint::Length(NAME_COLUMN_WIDTH as u16),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Min(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .column_spacing(2);
        f.render_widget(table, chunks[1]);
    }

    let instructions = Paragraph::new("(↑/↓) scroll  (PgUp/PgDn) page  (Home) top  (b/backspace) back  (esc)ape")
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(instructions, chunks[2]);
}
