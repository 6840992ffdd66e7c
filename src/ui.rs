pub mod charting;
pub mod history;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, Gauge, GraphType, Paragraph, Widget, Wrap},
};
use thump::celebration::Celebration;
use itertools::Itertools;
use thump::grading::{display_percentage, Grade};
use thump::intensity::Intensity;
use thump::session::Session;
use thump::time_series::history_points;
use thump::util::{format_clock, summarize};
use thump::zone::Zone;
use webbrowser::Browser;

use crate::{App, AppState};
use charting::{compute_chart_params, fit_width, format_label, zone_guides};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn zone_color(zone: Zone) -> Color {
    match zone {
        Zone::Resting => Color::Blue,
        Zone::FatBurn => Color::Green,
        Zone::Cardio => Color::Yellow,
        Zone::Peak => Color::Red,
    }
}

pub fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::A => Color::Green,
        Grade::B => Color::Cyan,
        Grade::C => Color::Yellow,
        Grade::D => Color::Magenta,
        Grade::F => Color::Red,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Simulation => {
                if let Some(session) = self.session() {
                    render_simulation(self, session, area, buf);
                }
            }
            AppState::ChallengeSelect => render_challenge_select(self, area, buf),
            AppState::Results => render_results(self, area, buf),
            // drawn by ui::history with a mutable app
            AppState::History => {}
        }
    }
}

fn render_simulation(app: &App, session: &Session, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let sim = &session.simulation;
    let challenge = session.challenge();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // bpm readout
            Constraint::Length(1), // target
            Constraint::Min(3),    // chart
            Constraint::Length(if challenge.is_some() { 3 } else { 0 }),
            Constraint::Length(1), // zone key
            Constraint::Length(1), // legend
        ])
        .split(area);

    let zone_style = bold_style.fg(zone_color(sim.zone));
    let mut readout = vec![
        Span::styled(format!("♥ {:.0} bpm", sim.current_heart_rate), zone_style),
        Span::raw("   "),
        Span::styled(sim.zone.label(), zone_style),
        Span::raw("   "),
        Span::styled(format!("{:+.1} bpm/s", sim.heart_rate_velocity), dim_style),
    ];
    if session.is_paused() {
        readout.push(Span::raw("   "));
        readout.push(Span::styled(
            "PAUSED",
            bold_style.fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ));
    }
    Paragraph::new(Line::from(readout))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!("{} → {:.0} bpm", sim.intensity, sim.target_heart_rate),
        dim_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let tick_secs = app.config.tick_rate_ms as f64 / 1000.0;
    let points: Vec<(f64, f64)> = history_points(&sim.history, tick_secs)
        .into_iter()
        .map(Into::into)
        .collect();
    let (x_bounds, y_bounds) = compute_chart_params(&points, tick_secs);
    let guides = challenge
        .map(|c| zone_guides(c.definition.target_zone, x_bounds, y_bounds))
        .unwrap_or_default();

    let mut datasets: Vec<Dataset> = guides
        .iter()
        .map(|guide| {
            Dataset::default()
                .marker(ratatui::symbols::Marker::Dot)
                .style(dim_style.fg(Color::DarkGray))
                .graph_type(GraphType::Line)
                .data(guide)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .marker(ratatui::symbols::Marker::Braille)
            .style(Style::default().fg(zone_color(sim.zone)))
            .graph_type(GraphType::Line)
            .data(&points),
    );

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds(x_bounds)
                .labels(vec![
                    Span::styled(format_label(x_bounds[0]), bold_style),
                    Span::styled("now", bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("bpm")
                .bounds(y_bounds)
                .labels(vec![
                    Span::styled(format_label(y_bounds[0]), bold_style),
                    Span::styled(format_label(y_bounds[1]), bold_style),
                ]),
        );
    chart.render(chunks[2], buf);

    if let Some(active) = challenge {
        let def = &active.definition;
        let progress = &active.progress;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(chunks[3]);

        let status = match progress.grade {
            Some(grade) => format!("complete: {grade}"),
            None => "in progress".to_string(),
        };
        Paragraph::new(Line::from(vec![
            Span::styled(
                fit_width(&def.name, rows[0].width.saturating_sub(30) as usize),
                bold_style,
            ),
            Span::raw("  target "),
            Span::styled(
                def.target_zone.label(),
                bold_style.fg(zone_color(def.target_zone)),
            ),
            Span::styled(format!("  {status}"), dim_style),
        ]))
        .render(rows[0], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(Color::Gray))
            .ratio(ratio(progress.elapsed_time, def.total_duration))
            .label(format!(
                "time {} / {}",
                format_clock(progress.elapsed_time),
                format_clock(def.total_duration)
            ))
            .render(rows[1], buf);

        let pct = display_percentage(progress.time_in_zone, def.goal_duration).unwrap_or(0.0);
        Gauge::default()
            .gauge_style(Style::default().fg(zone_color(def.target_zone)))
            .ratio(pct / 100.0)
            .label(format!(
                "in zone {:.1}s / {:.0}s ({pct:.0}%)",
                progress.time_in_zone, def.goal_duration
            ))
            .render(rows[2], buf);
    }

    Paragraph::new(zone_key())
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    let intensities = Intensity::ALL
        .iter()
        .enumerate()
        .map(|(i, intensity)| format!("({}) {intensity}", i + 1))
        .join(" / ");
    Paragraph::new(Span::styled(
        format!("{intensities} / (c)hallenges / (d)etach / (space) pause / (h)istory / (esc)ape"),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .wrap(Wrap { trim: true })
    .render(chunks[5], buf);
}

/// Colored BPM range for every zone
fn zone_key() -> Line<'static> {
    let spans = Zone::ALL.iter().map(|zone| {
        let range = match zone.band() {
            (low, Some(high)) if low <= 0.0 => format!("<{high:.0}"),
            (low, Some(high)) => format!("{low:.0}-{:.0}", high - 1.0),
            (low, None) => format!("{low:.0}+"),
        };
        Span::styled(
            format!("{} {range}", zone.label()),
            Style::default().fg(zone_color(*zone)),
        )
    });
    Line::from(
        Itertools::intersperse(spans, Span::raw("   ")).collect::<Vec<_>>(),
    )
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn render_challenge_select(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let catalog = app.service.catalog();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(catalog.len() as u16 + 1),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .split(area);

    Paragraph::new(Span::styled("Choose a challenge", bold_style.fg(Color::Cyan)))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let name_width = chunks[1].width.saturating_sub(24) as usize;
    let lines: Vec<Line> = catalog
        .iter()
        .enumerate()
        .map(|(idx, def)| {
            let selected = idx == app.selected_challenge;
            let marker = if selected { "▶ " } else { "  " };
            let name_style = if selected {
                bold_style.add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(marker),
                Span::styled(fit_width(&def.name, name_width), name_style),
                Span::raw("  "),
                Span::styled(
                    def.target_zone.label(),
                    Style::default().fg(zone_color(def.target_zone)),
                ),
                Span::raw(format!(
                    "  {:.0}s of {}",
                    def.goal_duration,
                    format_clock(def.total_duration)
                )),
            ])
        })
        .collect();
    Paragraph::new(lines).render(chunks[1], buf);

    if let Some(def) = catalog.as_slice().get(app.selected_challenge) {
        Paragraph::new(vec![
            Line::from(Span::raw(def.description.clone())),
            Line::from(""),
            Line::from(Span::styled(
                def.benefit.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
        ])
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);
    }

    Paragraph::new(Span::styled(
        "(↑/↓) choose / (enter) start / (b)ack / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[3], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let Some(result) = &app.last_result else {
        Paragraph::new("No completed challenge yet")
            .alignment(Alignment::Center)
            .render(area, buf);
        return;
    };
    let insight = app.insights.get(result.grade);
    let definition = app.service.catalog().get(&result.challenge_id);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // grade + title
            Constraint::Length(1), // time in zone
            Constraint::Length(1), // heart-rate summary
            Constraint::Length(1), // padding
            Constraint::Min(3),    // insight text
            Constraint::Length(1), // legend
        ])
        .split(area);

    let grade_style = bold_style.fg(grade_color(result.grade));
    Paragraph::new(Line::from(vec![
        Span::styled(format!("Grade {}", result.grade), grade_style),
        Span::raw("   "),
        Span::styled(insight.title.clone(), bold_style),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let achieved = match definition {
        Some(def) => {
            let pct = display_percentage(result.time_achieved, def.goal_duration).unwrap_or(0.0);
            format!(
                "{}: {:.1}s in {} of {:.0}s goal ({pct:.0}%)",
                def.name,
                result.time_achieved,
                def.target_zone.label(),
                def.goal_duration
            )
        }
        None => format!("{:.1}s in zone", result.time_achieved),
    };
    Paragraph::new(achieved)
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    if let Some(summary) = app.session().and_then(|s| summarize(&s.simulation.history)) {
        Paragraph::new(Span::styled(
            format!(
                "{:.0} bpm avg   {:.1} sd   {:.0}-{:.0} range",
                summary.mean, summary.std_dev, summary.min, summary.max
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    }

    Paragraph::new(vec![
        Line::from(Span::raw(insight.feedback.clone())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Next: ", bold_style),
            Span::raw(insight.improvement.clone()),
        ]),
        Line::from(""),
        Line::from(Span::styled(insight.impact.clone(), italic_style)),
    ])
    .wrap(Wrap { trim: true })
    .render(chunks[4], buf);

    Paragraph::new(Span::styled(
        if Browser::is_available() {
            "(r)etry / (n)ew / (f)ree run / (h)istory / (t)weet / (esc)ape"
        } else {
            "(r)etry / (n)ew / (f)ree run / (h)istory / (esc)ape"
        },
        italic_style,
    ))
    .render(chunks[5], buf);

    if app.celebration.is_active {
        render_celebration_particles(&app.celebration, area, buf);
    }
}

/// Render celebration particles on top of the results screen
fn render_celebration_particles(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Red,
        Color::LightRed,
        Color::Magenta,
        Color::LightMagenta,
        Color::Yellow,
        Color::White,
    ];

    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let x = particle.x as u16;
        let y = particle.y as u16;

        if x < area.width && y < area.height {
            let color = colors[particle.color_index % colors.len()];
            let alpha = 1.0 - (particle.age / particle.max_age);
            let style = if alpha > 0.6 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else if alpha > 0.25 {
                Style::default().fg(color)
            } else {
                Style::default().fg(color).add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&particle.symbol.to_string());
                cell.set_style(style);
            }
        }
    }
}
