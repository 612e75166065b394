use std::process;

mod cli;
mod config;

fn main() {
    env_logger::init();
    if let Err(err) = cli::run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
