#![forbid(unsafe_code)]

use std::env;

use sentinel_tools::sentinel_cli::execute_sentinel_command;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

fn run() -> Result<(), String> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    args.retain(|a| a != "--verbose");

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("failed to install log subscriber: {e}"))?;

    let output = execute_sentinel_command(&args)?;
    println!("{output}");
    Ok(())
}
