use std::error::Error;
use std::io;

use chrono::{Days, Local, Timelike};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod chart;
mod cli;
mod config;
mod error;
mod labels;
mod openmeteo;
mod scale;
mod window;

use crate::app::run_app;
use crate::chart::{now_marker_x, ChartBuilder, ChartSpec};
use crate::cli::Args;
use crate::config::Config;
use crate::error::ConfigError;
use crate::labels::hour_labels;
use crate::openmeteo::OpenMeteo;
use crate::window::Window;

/// Fetch every configured location in turn and compose the chart. One
/// render pass: any failure here aborts the whole chart.
fn build_chart(config: &Config) -> Result<ChartSpec, Box<dyn Error>> {
    let policy = config.policy();
    let now = Local::now();
    let now_dec = f64::from(now.hour()) + f64::from(now.minute()) / 60.0;
    let window = Window::at(policy, now_dec);
    let reference = now.date_naive() - Days::new(policy.history_days());

    let client = OpenMeteo::new()?;
    let mut builder = ChartBuilder::new(
        window,
        now_marker_x(policy, now_dec),
        hour_labels(window.offset, window.span, reference),
    );
    let mut unit = String::new();

    for location in &config.locations {
        let forecast = client.forecast(location)?;
        info!(
            name = %location.name,
            latitude = forecast.latitude,
            longitude = forecast.longitude,
            timezone = %forecast.timezone,
            abbreviation = %forecast.timezone_abbreviation,
            "resolved location"
        );
        if forecast.hourly.temperature.len() < location.fetch_range_hours() {
            return Err(ConfigError(format!(
                "{}: fetch returned {} hourly values, configuration promises {}",
                location.name,
                forecast.hourly.temperature.len(),
                location.fetch_range_hours()
            ))
            .into());
        }
        let temps = window.slice(&forecast.hourly.temperature)?;
        builder.add_series(&location.name, location.rgb()?, temps)?;
        unit = forecast.hourly_units.temperature;
    }

    Ok(builder.finish(unit)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let spec = build_chart(&config)?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &spec);

    // restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}
