use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use frame_stats::cli::Cli;
use frame_stats::loaders::load_frame_log;
use frame_stats::plot::{framerate_figure, frametime_figure};
use frame_stats::stats::summary_report;
use frame_stats::viewer;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let log = load_frame_log(&cli.path, cli.skip)?;

    if cli.no_ui {
        println!("{}", summary_report(&log, &cli.path, cli.json)?);
        return Ok(());
    }

    let figures = vec![
        frametime_figure(&log),
        framerate_figure(&log).context("Failed to build framerate view")?,
    ];

    info!("Showing {} figures, close every window to exit", figures.len());
    viewer::show(figures)
}
