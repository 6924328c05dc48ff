//! # lattice-log
//!
//! Logging setup shared by lattice binaries.
//!
//! Library crates in the workspace only emit `tracing` events; this crate
//! turns a [`Config`] into an installed subscriber.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lattice_log::prelude::*;
//!
//! fn main() -> Result<(), LogError> {
//!     let _guard = lattice_log::auto_init()?;
//!
//!     info!(dim = 3, "space requested");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;
mod timing;

// Public API
pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, Level, Writer};
pub use error::{LogError, LogResult};
pub use timing::Timer;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Config, Format, Level, LogError, LogResult, Timer, auto_init, debug, error,
        info, init, init_with, instrument, span, trace, warn,
    };

    pub use tracing::{Span, field};
}

// Re-export tracing macros
pub use tracing::{debug, error, info, instrument, span, trace, warn};

/// Initialize with the configuration best suited to the environment
///
/// An explicit `LATTICE_LOG` / `RUST_LOG` wins; otherwise debug builds get
/// [`Config::development`] and release builds [`Config::production`].
///
/// # Errors
///
/// Fails when the filter is malformed or a subscriber is already installed.
pub fn auto_init() -> LogResult<LoggerGuard> {
    if std::env::var_os("LATTICE_LOG").is_some() || std::env::var_os("RUST_LOG").is_some() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
///
/// # Errors
///
/// Same as [`auto_init`].
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
///
/// # Errors
///
/// Same as [`auto_init`].
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
