use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix for overrides, e.g. `DRILL__HTTP__TIMEOUT_SECONDS=5`.
pub const ENV_PREFIX: &str = "DRILL";

const DEFAULT_CONFIG_FILE: &str = "drill";

/// Custom error type for config loading.
#[drill_derive::drill_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a configuration file overlaid with `DRILL__` environment variables.
///
/// Layers, lowest priority first:
/// 1. **Base File**: `path`, or `drill` (any supported extension) in the working directory.
/// 2. **Environment Overrides**: variables prefixed with `DRILL__`; nested keys use `__`
///    (`DRILL__STORAGE__DATA_DIR` maps to `storage.data_dir`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or its content does not match `T`.
///
/// # Example
/// ```rust
/// use drill_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct ShellConfig {
///     verbose: bool,
/// }
///
/// let cfg: ShellConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = effective_path(path);
    info!("Loading config from {}", effective_path.display());
    build(&effective_path, true)
}

/// Like [`load_config`], but a missing file is not an error: defaults and environment
/// overrides still apply.
///
/// # Errors
/// Returns [`ConfigError::Config`] if a present file or an override cannot be deserialized.
pub fn load_config_or_env<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = effective_path(path);
    build(&effective_path, false)
}

fn effective_path(path: Option<impl AsRef<Path>>) -> PathBuf {
    path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf())
}

fn build<T>(path: &Path, required: bool) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context(format!("Failed to build config from {}", path.display()))?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
