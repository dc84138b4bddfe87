use std::path::PathBuf;

use crate::db::DB_FILE;
use crate::error::{Result, VergerError};
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(path: &str) -> Result<()> {
    let expanded = shellexpand_path(path);
    let dir = PathBuf::from(&expanded);
    if !dir.join(DB_FILE).exists() {
        return Err(VergerError::InvalidArgument(format!(
            "no {DB_FILE} found in {}",
            dir.display()
        )));
    }
    let mut settings = load_settings();
    settings.data_dir = expanded;
    save_settings(&settings)?;
    println!("Now using data directory {}", dir.display());
    Ok(())
}
