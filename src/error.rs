//! # Error Types
//!
//! Error handling for the DHT message format.
//!
//! Every error is scoped to the single message being translated. Nothing in the
//! codec keeps partial state, so a failed decode or encode has no effect on the
//! next call and callers are expected to drop the offending message and move on.
//!
//! ## Error Categories
//! - **Version Errors**: the peer speaks a different wire layout
//! - **Address Errors**: sender IP is not a valid dotted quad / octet list
//! - **Shape Errors**: a required slot is missing or holds the wrong primitive type
//! - **Configuration Errors**: config file access, parsing and validation,
//!   all reported as `ConfigError`
//!
//! Unknown message-kind tags are deliberately absent from this list: they decode
//! to a generic message.
//!
//! ## Example Usage
//! ```rust
//! use dht_msgformat::error::ProtocolError;
//! use dht_msgformat::protocol::translator::decode;
//! use dht_msgformat::core::primitive::Primitive;
//! use dht_msgformat::core::value::Value;
//! use tracing::warn;
//!
//! let mut primitive = Primitive::default();
//! primitive.compat_version = Some(Value::Integer(42));
//!
//! match decode(&primitive) {
//!     Err(ProtocolError::ProtocolVersionMismatch { received, expected }) => {
//!         warn!(?received, expected, "Dropping packet from incompatible peer");
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use crate::core::primitive::Field;
use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Address errors
    pub const ERR_IP_NOT_A_LIST: &str = "sender IP is not a list of octets";
    pub const ERR_IP_WRONG_LENGTH: &str = "sender IP must have exactly four octets";
    pub const ERR_IP_OCTET_RANGE: &str = "sender IP octet outside 0-255";
    pub const ERR_IP_OCTET_TYPE: &str = "sender IP octet is not an integer";

    /// Field shape errors
    pub const ERR_EXPECTED_INTEGER: &str = "expected an integer";
    pub const ERR_EXPECTED_BYTES: &str = "expected a byte string";
    pub const ERR_EXPECTED_UTF8: &str = "byte string is not valid UTF-8";
    pub const ERR_PORT_RANGE: &str = "port outside 0-65535";
    pub const ERR_NODE_ID_LENGTH: &str = "node id has unexpected length";
}

// ProtocolError is the primary error type for all codec operations
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ProtocolError {
    /// `received` is the raw slot, which need not be an integer
    #[error("Received packet with compat version {received:?}, expected {expected}")]
    ProtocolVersionMismatch { received: Value, expected: u8 },

    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    #[error("Missing field: {0}")]
    MissingField(Field),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: Field, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    pub(crate) fn invalid(field: Field, reason: impl Into<String>) -> Self {
        ProtocolError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
