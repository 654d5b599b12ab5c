use std::process;

use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = gomoku_cli::run() {
        error!("Terminal I/O failed: {}", err);
        process::exit(1);
    }
}
