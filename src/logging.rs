use directories::ProjectDirs;
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const LOG_FILE: &str = "wordpace.log";

/// `$XDG_STATE_HOME/wordpace/wordpace.log` where the platform has a state dir,
/// the local data dir elsewhere.
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wordpace").map(|dirs| {
        dirs.state_dir()
            .unwrap_or_else(|| dirs.data_local_dir())
            .join(LOG_FILE)
    })
}

/// Send log records to `path`. The terminal belongs to the UI, so nothing goes to stdout.
pub fn init(path: &Path, level: LevelFilter) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file)?;
    Ok(())
}
