//! PocketIO daemon entry point

use pocket_io::app::{App, RunOptions};
use pocket_io::config::AppConfig;
use pocket_io::error::Result;
use std::env;
use std::path::Path;
use std::process;

const DEFAULT_CONFIG_PATH: &str = "/etc/pocketio.toml";

struct CliArgs {
    config_path: Option<String>,
    options: RunOptions,
    verbose: bool,
}

fn print_usage() {
    println!(
        "pocket-io: hardware daemon for the Pocket handheld console\n\
         \n\
         Usage: pocket-io [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -c, --config <path>  Configuration file (default: {})\n\
         \x20     --no-battery     Disable battery monitoring\n\
         \x20     --no-buttons     Disable button monitoring\n\
         \x20 -v, --verbose        Debug-level logging\n\
         \x20 -h, --help           Show this help text",
        DEFAULT_CONFIG_PATH
    );
}

/// Hand-rolled flag scan; returns `None` when help was requested
fn parse_args() -> std::result::Result<Option<CliArgs>, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut parsed = CliArgs {
        config_path: None,
        options: RunOptions::default(),
        verbose: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| "missing path after --config".to_string())?;
                parsed.config_path = Some(path.clone());
            }
            "--no-battery" => parsed.options.battery = false,
            "--no-buttons" => parsed.options.buttons = false,
            "-v" | "--verbose" => parsed.verbose = true,
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(Some(parsed))
}

fn run(args: CliArgs) -> Result<()> {
    // An explicitly given config path must load; the default path is
    // optional and falls back to built-in defaults.
    let config = match &args.config_path {
        Some(path) => AppConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            AppConfig::from_file(DEFAULT_CONFIG_PATH)?
        }
        None => AppConfig::pocket_defaults(),
    };

    let level = if args.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::info!("PocketIO v{} starting", env!("CARGO_PKG_VERSION"));
    match &args.config_path {
        Some(path) => log::info!("Using config: {}", path),
        None => log::info!("Using config: {} (or defaults)", DEFAULT_CONFIG_PATH),
    }

    let mut app = App::new(config, args.options)?;
    app.run()
}

fn main() {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage();
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        log::error!("Fatal: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
