//! # dht-msgformat
//!
//! Wire message format for Kademlia-style DHT RPC.
//!
//! Translates between typed messages (request, response, error, and a generic
//! header-only fallback) and the positional primitive records a transport
//! serializes to bytes. Every record is stamped with a compatibility version
//! that is checked before anything else on decode.
//!
//! ## Modules
//! - **core**: primitive values, positional records, address conversion
//! - **protocol**: message model and the translator
//! - **config**: protocol constants and runtime configuration
//! - **error**: error type shared by all operations
//! - **utils**: logging bootstrap
//!
//! ## Example
//! ```rust
//! use dht_msgformat::{decode, encode, Header, Message, Value};
//!
//! let header = Header::new("txn-7", "nodeIDbytes", "127.0.0.1", 4444);
//! let ping = Message::request(header, "ping", Value::empty_list());
//!
//! let wire = encode(&ping).unwrap().into_wire();
//! let back = decode(&wire.into()).unwrap();
//! assert_eq!(back, ping);
//! ```
//!
//! Byte-level serialization, transport, routing and RPC dispatch live outside
//! this crate.

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::config::{CodecConfig, COMPAT_VERSION};
pub use crate::core::primitive::{Field, Primitive, WireMap};
pub use crate::core::value::Value;
pub use crate::error::{ProtocolError, Result};
pub use crate::protocol::message::{Header, Message, MessageKind};
pub use crate::protocol::translator::{decode, encode, DefaultFormat, MessageTranslator};
