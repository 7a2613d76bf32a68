use core::num::NonZeroUsize;
use thiserror::Error;

const DEFAULT_THREAD_NAME_PREFIX: &str = "frontier-unit";

/// Error returned when a `TraversalConfig` is built from invalid values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// At least one execution unit is required.
    #[error("number of execution units must be at least 1")]
    ZeroUnits,
}

/// Run-time parameters of a traversal.
///
/// The default configuration uses a single execution unit, which runs the
/// traversal sequentially on the calling thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalConfig {
    units: NonZeroUsize,
    thread_name_prefix: String,
}

impl TraversalConfig {
    /// Configuration with `units` execution units.
    ///
    /// # Errors
    /// If `units` is zero.
    pub fn new(units: usize) -> Result<Self, ConfigError> {
        let units = NonZeroUsize::new(units).ok_or(ConfigError::ZeroUnits)?;
        Ok(Self::with_units(units))
    }

    /// Configuration with a known non-zero number of execution units.
    #[must_use]
    pub fn with_units(units: NonZeroUsize) -> Self {
        Self {
            units,
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_owned(),
        }
    }

    /// One execution unit per hardware thread, falling back to one.
    #[must_use]
    pub fn available_parallelism() -> Self {
        Self::with_units(std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    }

    /// Prefix for worker thread names; unit `i` runs on `<prefix>-<i>`.
    #[must_use]
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Number of execution units.
    #[must_use]
    pub fn units(&self) -> NonZeroUsize {
        self.units
    }

    pub(crate) fn thread_name(&self, unit: usize) -> String {
        format!("{}-{unit}", self.thread_name_prefix)
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self::with_units(NonZeroUsize::MIN)
    }
}
