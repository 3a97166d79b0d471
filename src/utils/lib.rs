use anyhow::{Context, Result};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::create_dir_all;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

pub fn create_spinner() -> Result<ProgressBar, io::Error> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?,
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    Ok(pb)
}

pub fn get_output_file_path(output_arg: Option<PathBuf>) -> Result<PathBuf> {
    match output_arg {
        Some(path) => {
            if path.is_dir() {
                // If it's a directory, use a timestamp-based filename inside it
                create_dir_all(&path).context("Failed to create output directory")?;
                Ok(path.join(Local::now().format("%Y%m%d_%H%M%S.json").to_string()))
            } else {
                // If it's not a directory, assume it's a file path
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        create_dir_all(parent).context("Failed to create output directory")?;
                    }
                }
                Ok(path)
            }
        }
        None => {
            // Default case: use ./output directory with timestamp-based filename
            let output_dir = PathBuf::from("./output");
            create_dir_all(&output_dir).context("Failed to create output directory")?;
            Ok(output_dir.join(Local::now().format("%Y%m%d_%H%M%S.json").to_string()))
        }
    }
}
