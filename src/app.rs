//! Terminal rendering of a finished `ChartSpec` with ratatui, plus the
//! event loop. Horizontal gridlines are drawn as dim scatter rows (one per
//! y tick) underneath the series; the "now" marker is a two-point vertical
//! line dataset kept out of the legend.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode};
use ratatui::{
    backend::Backend,
    layout::Alignment,
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition},
    Frame, Terminal,
};

use crate::chart::ChartSpec;

// Grid sits at half intensity; the marker uses the same #646464 grey.
const GRID_COLOR: Color = Color::DarkGray;
const NOW_MARKER_COLOR: Color = Color::Rgb(0x64, 0x64, 0x64);
const AXIS_COLOR: Color = Color::Gray;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, spec: &ChartSpec) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, spec))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
        }
    }
}

fn ui(f: &mut Frame, spec: &ChartSpec) {
    let gridlines: Vec<Vec<(f64, f64)>> = spec
        .y_ticks
        .iter()
        .map(|&y| spec.x_ticks.iter().map(|&x| (x, y)).collect())
        .collect();
    let now_line = [
        (spec.now_x, spec.y_bounds[0]),
        (spec.now_x, spec.y_bounds[1]),
    ];

    let mut datasets = Vec::new();
    for points in &gridlines {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(GRID_COLOR))
                .data(points),
        );
    }
    for series in &spec.series {
        let (r, g, b) = series.color;
        datasets.push(
            Dataset::default()
                .name(series.label.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Rgb(r, g, b)))
                .data(&series.points),
        );
    }
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(NOW_MARKER_COLOR))
            .data(&now_line),
    );

    let x_labels: Vec<Line> = spec.x_labels.iter().map(|l| Line::from(l.as_str())).collect();
    let y_labels: Vec<Line> = spec.y_ticks.iter().map(|&v| Line::from(format!("{v}"))).collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(spec.title.as_str())
                .title_alignment(Alignment::Center),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(AXIS_COLOR))
                .bounds(spec.x_bounds)
                .labels(x_labels)
                .labels_alignment(Alignment::Center),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_unit.as_str())
                .style(Style::default().fg(AXIS_COLOR))
                .bounds(spec.y_bounds)
                .labels(y_labels),
        )
        .legend_position(Some(LegendPosition::TopRight));

    f.render_widget(chart, f.area());
}
