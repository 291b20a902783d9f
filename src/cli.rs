// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::loaders::DEFAULT_SKIP;

#[derive(Parser, Debug, Clone)]
#[command(name = "frame-stats")]
#[command(about = "Plot frametime and framerate from a frame-stats log", long_about = None)]
pub struct Cli {
    /// Frame-stats log to read
    pub path: PathBuf,

    /// Number of leading header lines to ignore
    #[arg(long, default_value_t = DEFAULT_SKIP)]
    pub skip: usize,

    /// Print a summary instead of opening figure windows
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Print the summary as JSON (with --no-ui)
    #[arg(long, requires = "no_ui")]
    pub json: bool,
}
