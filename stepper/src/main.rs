use std::process;

use tracing_subscriber::EnvFilter;

use stepper::{config::Config, run, ui::TerminalUi};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid configuration.");
            eprintln!("Details: {}.", e);
            process::exit(1);
        }
    };

    let result = match TerminalUi::new() {
        Ok(mut ui) => run::run(&config, &mut ui),
        Err(e) => {
            eprintln!("Error: failed to initialize terminal: {}.", e);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}
