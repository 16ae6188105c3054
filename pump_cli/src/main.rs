mod app;
mod backend;
mod cli;
mod error_fmt;
mod logging;
mod render;
mod shutdown;

use clap::Parser;
use cli::{Cli, JSON_MODE};

#[tokio::main]
async fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", error_fmt::format_error_json(&e));
            } else {
                eprintln!("{}", error_fmt::humanize(&e));
            }
            tracing::error!(error = ?e, "pump failed");
            std::process::exit(error_fmt::exit_code_for_error(&e));
        }
    }
}

async fn run(cli: Cli) -> eyre::Result<i32> {
    let cfg = match cli.config.as_deref() {
        Some(path) => pump_config::load_file(path)?,
        None => pump_config::Config::default(),
    };
    logging::init(&cli.log_level, cli.json, &cfg.logging)?;
    tracing::debug!(command = ?cli.cmd, "starting");
    app::execute(cli.cmd, &cfg, cli.json).await
}
