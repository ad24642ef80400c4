//! Local notes viewer - entry point.
//!
//! Serves the notes root (`$NOTESERVE_DIR`, or `~/.mynotes`) on
//! 127.0.0.1:3000, opens the browser at the landing page or at the note
//! named on the command line, and stops when Enter is pressed.

use noteserve::server::ServerConfig;
use noteserve::{notes, server, DEFAULT_NOTES_DIRNAME};
use std::path::PathBuf;

const PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let notes_dir = notes_dir_location();
    if let Err(err) = std::fs::create_dir_all(&notes_dir) {
        eprintln!("Cannot create notes directory {}: {}", notes_dir.display(), err);
        std::process::exit(1);
    }

    let mut config = match ServerConfig::new(&notes_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Cannot resolve notes directory {}: {}", notes_dir.display(), err);
            std::process::exit(1);
        }
    };
    config.block_for_stop = true;

    // Optional argument: start at a specific note instead of the landing
    // page. Verified up front so a typo fails fast.
    if let Some(name) = std::env::args().nth(1) {
        let exists = notes::note_path(&config.notes_dir, &name)
            .map(|path| path.is_file())
            .unwrap_or(false);
        if !exists {
            eprintln!("note '{}' not found", name);
            std::process::exit(1);
        }
        config.start_note = Some(name);
    }

    println!("Serving notes from {}", config.notes_dir.display());
    if let Err(err) = server::serve(config, PORT).await {
        eprintln!("Server error: {}", err);
        std::process::exit(1);
    }
}

fn notes_dir_location() -> PathBuf {
    if let Ok(dir) = std::env::var("NOTESERVE_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_NOTES_DIRNAME)
}
