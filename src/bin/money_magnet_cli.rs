use std::process;

use money_magnet::{cli, config::ConfigManager};

fn main() {
    let log_filter = ConfigManager::new()
        .and_then(|manager| manager.load())
        .ok()
        .and_then(|config| config.log_filter);
    money_magnet::init_with_filter(log_filter.as_deref());

    if let Err(err) = cli::run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
