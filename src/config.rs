use std::path::Path;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::actpool::ACCOUNT_QUEUE_CAPACITY;

/// [`ActPoolConfig`] sets the configuration values for the
/// pending-action pool of an individual node
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActPoolConfig {
    /// Maximum pending actions per account
    pub queue_capacity: usize,
}

impl ActPoolConfig {
    pub fn new(queue_capacity: usize) -> Self {
        Self { queue_capacity }
    }

    /// [`from_path`] creates an [`ActPoolConfig`] from a .toml file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(path.as_ref().to_str().unwrap()))
            .add_source(
                Environment::with_prefix("ACTPOOL")
                    .keep_prefix(true)
                    .separator("__"),
            )
            .build()?;

        config.get::<Self>("actpool").map_err(anyhow::Error::msg)
    }
}

impl Default for ActPoolConfig {
    fn default() -> Self {
        Self::new(ACCOUNT_QUEUE_CAPACITY)
    }
}
