use std::time::Instant;

use bezier_path::PathFile;
use log::{error, info, LevelFilter};

/// Environment variable holding the log level, e.g. `debug` or `trace`.
const LOG_LEVEL_VAR: &str = "BEZIER_PATH_LOG";

fn main() {
    if let Err(e) = logger_init() {
        eprintln!("Could not initialise logging: {}", e);
    }

    let Some(file_path) = std::env::args().nth(1) else {
        eprintln!("Usage: bezier-path <path-file.json>");
        std::process::exit(2);
    };

    let path_file = match PathFile::load(&file_path) {
        Ok(f) => f,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} control points from {}",
        path_file.control_points.len(),
        file_path
    );

    let start = Instant::now();
    let path = match path_file.generate() {
        Ok(p) => p,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Generated {} waypoints ({:.3} long) in {:?}",
        path.len(),
        path.length(),
        start.elapsed()
    );

    match serde_json::to_string_pretty(&path) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Could not serialise the path: {}", e);
            std::process::exit(1);
        }
    }
}

/// Logs to stderr so that stdout only carries the generated path.
fn logger_init() -> Result<(), log::SetLoggerError> {
    let level = std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|l| l.parse().ok())
        .unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:5}] {}: {}",
                    record.level(),
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!("[{:5}] {}", record.level(), message))
            }
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
