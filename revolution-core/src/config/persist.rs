//! Configuration persistence
//!
//! The platform stores settings as opaque bytes. This module turns a
//! [`WatchfaceConfig`] into those bytes and back, and falls back to the
//! variant's preset when nothing usable is stored.

use serde::{Deserialize, Serialize};

use super::types::{ConfigError, WatchfaceConfig};

/// Version written into every stored configuration
pub const CONFIG_VERSION: u16 = 1;

/// Upper bound of the serialized size
pub const MAX_CONFIG_SIZE: usize = 32;

/// On-storage record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedConfig {
    pub version: u16,
    pub config: WatchfaceConfig,
}

/// Serialize `config` into `buf`, returning the used prefix
pub fn encode_config<'a>(config: &WatchfaceConfig, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
    config.validate()?;
    let record = PersistedConfig {
        version: CONFIG_VERSION,
        config: *config,
    };
    postcard::to_slice(&record, buf).map_err(|_| ConfigError::Serialize)
}

/// Deserialize and validate a stored configuration
pub fn decode_config(bytes: &[u8]) -> Result<WatchfaceConfig, ConfigError> {
    let record: PersistedConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;

    if record.version != CONFIG_VERSION {
        warn!(
            "Config version mismatch: found {}, expected {}",
            record.version, CONFIG_VERSION
        );
        return Err(ConfigError::VersionMismatch {
            found: record.version,
            expected: CONFIG_VERSION,
        });
    }

    record.config.validate()?;
    Ok(record.config)
}

/// Stored configuration, or `preset` if none is stored or it is unusable
pub fn load_or_default(stored: Option<&[u8]>, preset: WatchfaceConfig) -> WatchfaceConfig {
    let Some(bytes) = stored else {
        debug!("No stored configuration, using preset");
        return preset;
    };

    match decode_config(bytes) {
        Ok(config) => {
            info!("Loaded stored configuration ({} bytes)", bytes.len());
            config
        }
        Err(e) => {
            warn!("Stored configuration rejected: {:?}, using preset", e);
            preset
        }
    }
}
