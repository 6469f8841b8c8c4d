mod cli;
mod runner;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse_cli();
    tokio::select! {
        res = runner::run_from_cli(cli) => match res {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {:#}", e);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\nBye");
            ExitCode::FAILURE
        }
    }
}
