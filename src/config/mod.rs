// Sub-modules
mod core;
mod fields;
mod loader;
mod parallel;
pub mod presets;

pub use self::core::{default_id_field, default_scale, BucketmapConfig, NormalizationConfig};
pub use fields::FieldPolicy;
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use parallel::ParallelConfig;
pub use presets::{merge_preset_with_policies, Preset, ACCESS_RANK_FIELD, NEEDS_RANK_FIELD};

use crate::errors::Result;
use std::path::Path;

/// Write a default config file into `dir`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_config(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(crate::errors::Error::Configuration(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }

    let config = BucketmapConfig {
        normalization: Some(NormalizationConfig::default()),
        parallel: Some(ParallelConfig::default()),
        ..Default::default()
    };
    let contents = toml::to_string_pretty(&config)?;
    std::fs::write(&path, contents)?;
    tracing::info!("Created {}", path.display());
    Ok(path)
}
