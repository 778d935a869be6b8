use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stdout; `NOTES_LOG_FORMAT=json` switches to one JSON object per line
pub fn init_logging() {
    let json = std::env::var("NOTES_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt().with_env_filter(env_filter()).with_target(false);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("logging already initialized: {}", e);
    }
}

/// Log to a file, keeping the terminal free for the note editor
pub fn init_file_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let result = fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    if let Err(e) = result {
        eprintln!("logging already initialized: {}", e);
    }
    Ok(())
}
