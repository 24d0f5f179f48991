use clap::Parser;
use gbloci::{Args, gbloci};
use log::{error, info};
use simple_logger::init_with_level;

use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    init_with_level(args.level).unwrap_or_else(|e| panic!("{}", e));
    info!("Starting gbloci with args: {}", args);

    match gbloci(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
