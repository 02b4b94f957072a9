use ChemBot::cli::cli_main::run_interactive_menu;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// log level from CHEMBOT_LOG (error, warn, info, debug, trace), warn by default
fn log_level() -> LevelFilter {
    std::env::var("CHEMBOT_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

pub fn main() {
    if let Err(e) = TermLogger::init(
        log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger is not available: {}", e);
    }
    run_interactive_menu();
}
