use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::process;

use linkwrite::{args::LinkWriteCli, run};

fn main() {
    let cli = LinkWriteCli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Error
    };
    Builder::new().filter_level(level).target(Target::Stderr).init();

    if let Err(e) = run(&cli) {
        log::error!("{e}");
        process::exit(e.exit_code());
    }
}
