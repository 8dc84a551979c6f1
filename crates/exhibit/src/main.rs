mod activation;
mod anim;
mod app;
mod camera;
mod cli;
mod clock;
mod commands;
mod config;
mod controller;
mod language;
mod manifest;
mod navigation;
mod shell;
mod simulation;
mod slide;
mod theme;
mod tooltip;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // RUST_LOG wins over -v/-q when set
    env_logger::Builder::new()
        .filter_level(cli.log_filter())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    cli.run()
}
