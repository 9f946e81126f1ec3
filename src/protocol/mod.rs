//! # Protocol Layer
//!
//! DHT RPC messages and their translation to and from primitive wire records.
//!
//! ## Components
//! - **Message**: request / response / error / generic sum type
//! - **Translator**: `MessageTranslator` trait and the default wire format
//!
//! ## Compatibility
//! Every record carries a compatibility version. Records from peers on a
//! different version are rejected before any other slot is interpreted.

pub mod message;
pub mod translator;
