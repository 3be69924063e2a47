use anyhow::Result;
use std::path::Path;

/// Write a default `.bucketmap.toml` into `dir`.
pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let path = crate::config::init_config(dir, force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}
