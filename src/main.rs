use std::process::ExitCode;

use clap::Parser;
use log::{trace, LevelFilter};

use sysy_frontend::{
    config::{Args, Config},
    driver::run,
    errors::errors::DriverError,
};

fn main() -> Result<ExitCode, DriverError> {
    let args = Args::parse();
    init_logging(args.log_level_filter());

    let config = Config::from(&args);
    trace!("starting with config: {config:?}");

    let summary = run(&config)?;

    if summary.errors > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn init_logging(level_filter: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if let Some(level_filter) = level_filter {
        builder.filter_level(level_filter);
    }
    builder.init();
}
