//! Device identities for simulated clients
//!
//! A device ID stands in for a persistent hardware identifier. The server
//! creates an account the first time it sees one, so every simulated client
//! needs its own.

use crate::error::{ProtocolError, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Number of dash-separated segments in a device ID
pub const SEGMENT_COUNT: usize = 4;

/// Hex digits per segment
pub const SEGMENT_LEN: usize = 8;

/// Total length of a device ID, dashes included
pub const DEVICE_ID_LEN: usize = SEGMENT_COUNT * SEGMENT_LEN + (SEGMENT_COUNT - 1);

/// Device identifier shaped as `XXXXXXXX-XXXXXXXX-XXXXXXXX-XXXXXXXX`
/// (uppercase hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl DeviceId {
    /// Generate a random device ID.
    ///
    /// Uses the thread-local RNG. Collisions are possible in principle and are
    /// not checked against anything.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let segments: Vec<String> = (0..SEGMENT_COUNT)
            .map(|_| format!("{:08X}", rng.random::<u32>()))
            .collect();
        Self(segments.join("-"))
    }

    /// Parse and validate a device ID supplied from outside
    pub fn parse(s: &str) -> Result<Self> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ProtocolError::InvalidDeviceId(s.to_string()))
        }
    }

    /// Check whether a string has the device ID shape
    pub fn is_valid(s: &str) -> bool {
        if s.len() != DEVICE_ID_LEN {
            return false;
        }

        let segments: Vec<&str> = s.split('-').collect();
        segments.len() == SEGMENT_COUNT
            && segments.iter().all(|segment| {
                segment.len() == SEGMENT_LEN
                    && segment
                        .bytes()
                        .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
            })
    }

    /// Display name sent on authentication, e.g. `"rsclient 3F2A9B10-..."`
    pub fn display_name(&self, prefix: &str) -> String {
        format!("{} {}", prefix, self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DeviceId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generate a random device ID string
pub fn generate_device_id() -> String {
    DeviceId::generate().0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_have_expected_shape() {
        for _ in 0..1000 {
            let id = generate_device_id();
            assert_eq!(id.len(), DEVICE_ID_LEN);
            assert!(DeviceId::is_valid(&id), "bad device id: {}", id);
        }
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_device_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        assert!(DeviceId::parse("3F2A9B10-00000000-FFFFFFFF-0A1B2C3D").is_ok());

        // lowercase
        assert!(DeviceId::parse("3f2a9b10-00000000-FFFFFFFF-0A1B2C3D").is_err());
        // short segment
        assert!(DeviceId::parse("3F2A9B1-00000000-FFFFFFFF-0A1B2C3D0").is_err());
        // wrong separator
        assert!(DeviceId::parse("3F2A9B10_00000000_FFFFFFFF_0A1B2C3D").is_err());
        // non-hex
        assert!(DeviceId::parse("3F2A9B1G-00000000-FFFFFFFF-0A1B2C3D").is_err());
        assert!(DeviceId::parse("").is_err());
    }

    #[test]
    fn test_display_name() {
        let id: DeviceId = "3F2A9B10-00000000-FFFFFFFF-0A1B2C3D".parse().unwrap();
        assert_eq!(
            id.display_name("rsclient"),
            "rsclient 3F2A9B10-00000000-FFFFFFFF-0A1B2C3D"
        );
    }
}
