//! Table configuration.

use crate::error::ConfigError;
use crate::probe::LINEAR_PROBES;

/// Smallest table a set will allocate.
pub const MIN_SIZE: usize = 8;

/// Shape of a `ProbeSet` table.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SetConfig {
    initial_size: usize,
    linear_probes: usize,
}

impl SetConfig {
    /// Validated configuration. `initial_size` must be a power of two no
    /// smaller than `MIN_SIZE`; `linear_probes` must be in
    /// `1..initial_size`.
    pub fn new(initial_size: usize, linear_probes: usize) -> Result<Self, ConfigError> {
        if initial_size < MIN_SIZE || !initial_size.is_power_of_two() {
            return Err(ConfigError::InitialSize {
                size: initial_size,
                min: MIN_SIZE,
            });
        }
        if linear_probes == 0 || linear_probes >= initial_size {
            return Err(ConfigError::LinearProbes {
                probes: linear_probes,
                size: initial_size,
            });
        }
        Ok(Self {
            initial_size,
            linear_probes,
        })
    }

    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    pub fn linear_probes(&self) -> usize {
        self.linear_probes
    }
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            initial_size: MIN_SIZE,
            linear_probes: LINEAR_PROBES,
        }
    }
}
