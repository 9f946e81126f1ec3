//! # Core Wire Components
//!
//! The primitive side of the codec: values, positional records, and sender
//! address conversion.
//!
//! ## Components
//! - **Value**: bencode-style dynamic value tree handed over by the transport
//! - **Primitive**: named-field record with one slot per wire position
//! - **Address**: dotted quad <-> four-octet list
//!
//! ## Wire Format
//! ```text
//! {0: compat, 1: kind, 2: txn-id, 3: node-id, 4: [a, b, c, d], 5: port, 6: payload, 7: args}
//! ```
//!
//! Byte-level serialization of this structure belongs to the transport.

pub mod address;
pub mod primitive;
pub mod value;
