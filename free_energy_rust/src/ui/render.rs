use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs},
    Frame,
};

use super::chart::{axis_bounds, axis_labels};
use crate::simulation::exercises::ExerciseResult;
use crate::simulation::figure::Figure;

const SERIES_COLORS: [Color; 4] = [Color::Cyan, Color::Yellow, Color::Magenta, Color::Green];
const TICKS: usize = 5;

pub fn draw_ui(f: &mut Frame, results: &[ExerciseResult], selected: usize, hud_info: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Length(1), // HUD
            Constraint::Min(0),    // Chart
        ])
        .split(f.area());

    let titles: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{} {}", i + 1, r.exercise.label()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title("Free energy"))
        .select(selected)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    let hud = Paragraph::new(Span::styled(
        hud_info,
        Style::default().add_modifier(Modifier::REVERSED),
    ));
    f.render_widget(hud, chunks[1]);

    if let Some(result) = results.get(selected) {
        draw_figure(f, &result.figure, chunks[2]);
    }
}

fn draw_figure(f: &mut Frame, figure: &Figure, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(figure.title.as_str());

    let Some((x_bounds, y_bounds)) = axis_bounds(figure) else {
        f.render_widget(Paragraph::new("no data").block(block), area);
        return;
    };

    let datasets: Vec<Dataset> = figure
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Dataset::default()
                .name(s.name.as_str())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(s.trace.points())
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(figure.x_label.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, TICKS)),
        )
        .y_axis(
            Axis::default()
                .title(figure.y_label.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, TICKS)),
        );

    f.render_widget(chart, area);
}
