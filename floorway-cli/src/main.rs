//! Route finder for floor maps.
//!
//! Run: cargo run --bin floorway -- route --map floor.json --from Entrance --to Lab

use clap::Parser;
use floorway_cli::{Cli, log_level, run};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

fn main() {
    let cli = Cli::parse();

    let config = ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Off)
        .set_time_level(log::LevelFilter::Off)
        .build();
    if let Err(e) = TermLogger::init(
        log_level(cli.verbose),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("warning: no logger: {e}");
    }

    let stdout = std::io::stdout();
    if let Err(e) = run(&cli, &mut stdout.lock()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
