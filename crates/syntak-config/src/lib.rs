//! Configuration for the syntak synthesizer.
//!
//! Settings live in a single TOML file with `[audio]`, `[scope]`, and `[log]`
//! sections. Missing fields take their defaults; out-of-range values are
//! rejected with [`ConfigError::Invalid`].
//!
//! # Example
//!
//! ```rust
//! use syntak_config::{Backend, SynthConfig};
//!
//! let config = SynthConfig::from_toml(
//!     r#"
//!     [audio]
//!     backend = "raw"
//!     block_size = 1024
//!     "#,
//! )?;
//! assert_eq!(config.audio.backend, Backend::Raw);
//! assert_eq!(config.scope.refresh_hz, 60);
//! # Ok::<(), syntak_config::ConfigError>(())
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

pub use config::{
    AudioConfig, BLOCK_SIZE_RANGE, Backend, LogConfig, REFRESH_HZ_RANGE, SCOPE_SAMPLES_RANGE,
    SampleByteOrder, ScopeConfig, SynthConfig,
};
pub use error::ConfigError;
pub use paths::{ensure_user_config_dir, user_config_dir, user_config_file};
