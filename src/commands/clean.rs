//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Advent;

/// Remove the generated site
pub fn run(advent: &Advent) -> Result<()> {
    if advent.public_dir.exists() {
        fs::remove_dir_all(&advent.public_dir)?;
        tracing::info!("Deleted: {:?}", advent.public_dir);
    }

    Ok(())
}
