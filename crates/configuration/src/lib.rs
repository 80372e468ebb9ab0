use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{LoggingSettings, Settings, SourceKind, SourceSettings};

/// Prefix of the environment variables that override file settings,
/// e.g. `IVB_SOURCE__TICKER=NQ=F`.
pub const ENV_PREFIX: &str = "IVB";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file at `path` (skipped when
/// it does not exist), then `IVB_*` environment variables. The result is validated
/// before it is returned.
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(path = %path.display(), source = ?settings.source.kind, "Configuration loaded.");
    Ok(settings)
}
