use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;

use crate::config;
use crate::logging::LOG_PREFIX;

pub fn run(lines: usize, follow: bool) -> Result<()> {
    let log_dir = config::runtime_dir();

    let Some(path) = latest_log(&log_dir) else {
        println!("No log files found in {:?}", log_dir);
        println!("Log files are written by `modele-theme fetch`.");
        return Ok(());
    };

    if follow {
        let err = std::process::Command::new("tail")
            .args(["-f", "-n", &lines.to_string()])
            .arg(&path)
            .exec();
        return Err(err.into());
    }

    std::process::Command::new("tail")
        .args(["-n", &lines.to_string()])
        .arg(&path)
        .status()?;

    Ok(())
}

fn latest_log(log_dir: &Path) -> Option<PathBuf> {
    let mut log_files: Vec<_> = std::fs::read_dir(log_dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| {
                    let name = e.file_name();
                    let name = name.to_string_lossy();
                    name.starts_with(LOG_PREFIX) && name.ends_with(".log")
                })
                .map(|e| e.path())
                .collect()
        })
        .unwrap_or_default();

    log_files.sort();
    log_files.pop()
}
