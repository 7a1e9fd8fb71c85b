//! Transport configuration

use crate::error::TransportError;
use serde::{Deserialize, Serialize};
use serial_hal::FrameWidth;

/// Buffer sizing for a transport.
///
/// Sizes are given in bytes of backing storage, the way a board reserves
/// RAM. Wide (9-bit) frames store two bytes per unit, so the same storage
/// holds half as many units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Receive ring storage in bytes
    pub rx_storage_bytes: usize,

    /// Transmit ring storage in bytes
    pub tx_storage_bytes: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            rx_storage_bytes: 128,
            tx_storage_bytes: 256,
        }
    }
}

impl TransportConfig {
    /// Same storage on both sides
    pub fn symmetric(bytes: usize) -> Self {
        Self {
            rx_storage_bytes: bytes,
            tx_storage_bytes: bytes,
        }
    }

    /// Small footprint for RAM-constrained parts
    pub fn compact() -> Self {
        Self::symmetric(32)
    }

    /// Receive ring capacity in units
    pub fn rx_capacity(&self, width: FrameWidth) -> usize {
        self.rx_storage_bytes / width.unit_bytes()
    }

    /// Transmit ring capacity in units
    pub fn tx_capacity(&self, width: FrameWidth) -> usize {
        self.tx_storage_bytes / width.unit_bytes()
    }

    /// Encode for storage in a flash page
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransportError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Decode a blob written by [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransportError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_frames_halve_capacity() {
        let config = TransportConfig::default();
        assert_eq!(config.rx_capacity(FrameWidth::Narrow), 128);
        assert_eq!(config.rx_capacity(FrameWidth::Wide), 64);
        assert_eq!(config.tx_capacity(FrameWidth::Narrow), 256);
        assert_eq!(config.tx_capacity(FrameWidth::Wide), 128);
    }

    #[test]
    fn test_flash_blob_roundtrip() {
        let config = TransportConfig::compact();
        let blob = config.to_bytes().unwrap();
        assert_eq!(TransportConfig::from_bytes(&blob).unwrap(), config);
    }

    #[test]
    fn test_truncated_blob_is_rejected() {
        let blob = TransportConfig::default().to_bytes().unwrap();
        let err = TransportConfig::from_bytes(&blob[..1]).unwrap_err();
        assert!(matches!(err, TransportError::ConfigEncoding(_)));
    }
}
