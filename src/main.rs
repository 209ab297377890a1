use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use linkvault::cli::{Cli, Commands};
use linkvault::config::init_config;
use linkvault::runtime::modes;
use linkvault::system::init_logging;

#[actix_web::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = init_config(cli.config.as_deref())?;

    match cli.command {
        None | Some(Commands::Serve) => {
            // guard 必须存活到进程结束，否则缓冲日志会丢失
            let _log_guard = init_logging(&config.logging)?;
            modes::run_server(config).await
        }
        Some(command) => modes::run_cli(command, &config),
    }
}
