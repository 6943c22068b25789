use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;

const ABOUT: &str = "Hourly temperature chart in the terminal";

const LONG_ABOUT: &str = "
Fetches hourly temperature forecasts from Open-Meteo for one or more
configured locations and draws them as a line chart, with a vertical marker
at the current time.

Locations come from a TOML file (see --config). Without one, a built-in
two-location example list is charted. Press q or Esc to quit.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(
        short,
        long,
        help = "Path to a TOML file listing the locations to chart"
    )]
    pub config: Option<PathBuf>,
}
