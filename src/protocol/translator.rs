//! # Message Translation
//!
//! Converts between [`Message`] and its [`Primitive`] wire record.
//!
//! ## Decode
//! 1. The compatibility version is checked first; a mismatch rejects the
//!    record before any other slot is looked at.
//! 2. The sender IP must be exactly four integer octets.
//! 3. The kind tag selects the body. Unknown, non-integer or absent tags decode to
//!    [`Message::Generic`] and never read payload or arguments, which keeps
//!    newer peers' notifications readable.
//!
//! ## Encode
//! The header slots are always written. The body is chosen by matching on the
//! message variant; a generic message leaves the kind slot empty.
//!
//! Translators hold only immutable settings, so one instance can be shared by
//! any number of threads.

use crate::config::{FormatConfig, COMPAT_VERSION};
use crate::core::address::{decode_ip, encode_ip};
use crate::core::primitive::{Field, Primitive};
use crate::core::value::Value;
use crate::error::{constants, ProtocolError, Result};
use crate::protocol::message::{Header, Message, MessageKind};
use bytes::Bytes;
use tracing::{debug, warn};

/// Translation between messages and the data actually transmitted between nodes
pub trait MessageTranslator: Send + Sync {
    /// Build a message from its primitive record
    fn from_primitive(&self, primitive: &Primitive) -> Result<Message>;

    /// Build the primitive record for a message
    fn to_primitive(&self, message: &Message) -> Result<Primitive>;
}

/// The default on-the-wire message format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultFormat {
    compat_version: u8,
    strict_node_id_len: Option<usize>,
}

impl Default for DefaultFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultFormat {
    /// Format speaking this build's `COMPAT_VERSION`
    pub const fn new() -> Self {
        Self {
            compat_version: COMPAT_VERSION,
            strict_node_id_len: None,
        }
    }

    pub const fn with_compat_version(compat_version: u8) -> Self {
        Self {
            compat_version,
            strict_node_id_len: None,
        }
    }

    pub fn from_config(config: &FormatConfig) -> Self {
        Self {
            compat_version: config.compat_version,
            strict_node_id_len: config.strict_node_id_len,
        }
    }

    pub fn compat_version(&self) -> u8 {
        self.compat_version
    }

    fn check_version(&self, primitive: &Primitive) -> Result<()> {
        let received = required(primitive, Field::CompatVersion)?;

        // Any value other than the expected integer is a mismatch, including "1"
        if received.as_integer() != Some(i64::from(self.compat_version)) {
            warn!(
                received = ?received,
                expected = self.compat_version,
                "Rejecting packet with mismatched compat version"
            );
            return Err(ProtocolError::ProtocolVersionMismatch {
                received: received.clone(),
                expected: self.compat_version,
            });
        }
        Ok(())
    }

    fn check_node_id(&self, node_id: &Bytes) -> Result<()> {
        match self.strict_node_id_len {
            Some(len) if node_id.len() != len => Err(ProtocolError::invalid(
                Field::NodeId,
                format!(
                    "{} (got {}, expected {len})",
                    constants::ERR_NODE_ID_LENGTH,
                    node_id.len()
                ),
            )),
            _ => Ok(()),
        }
    }

    fn decode_header(&self, primitive: &Primitive, sender_ip: String) -> Result<Header> {
        let transaction_id = bytes_field(primitive, Field::TransactionId)?;
        let sender_node_id = bytes_field(primitive, Field::NodeId)?;
        self.check_node_id(&sender_node_id)?;
        let sender_port = port_field(primitive)?;

        Ok(Header {
            transaction_id,
            sender_node_id,
            sender_ip,
            sender_port,
        })
    }

    fn encode_header(&self, header: &Header) -> Result<Primitive> {
        self.check_node_id(&header.sender_node_id)?;

        let mut primitive = Primitive::default();
        primitive.set(Field::CompatVersion, self.compat_version);
        primitive.set(Field::TransactionId, header.transaction_id.clone());
        primitive.set(Field::NodeId, header.sender_node_id.clone());
        primitive.set(Field::NodeIp, encode_ip(&header.sender_ip)?);
        primitive.set(Field::NodePort, header.sender_port);
        Ok(primitive)
    }
}

impl MessageTranslator for DefaultFormat {
    fn from_primitive(&self, primitive: &Primitive) -> Result<Message> {
        self.check_version(primitive)?;

        let sender_ip = decode_ip(required(primitive, Field::NodeIp)?)?;
        let kind = kind_field(primitive);
        let header = self.decode_header(primitive, sender_ip)?;

        let message = match kind {
            Some(MessageKind::Request) => Message::Request {
                header,
                method: text_field(primitive, Field::Payload)?,
                args: required(primitive, Field::Args)?.clone(),
            },
            Some(MessageKind::Response) => Message::Response {
                header,
                result: required(primitive, Field::Payload)?.clone(),
            },
            Some(MessageKind::Error) => Message::Error {
                header,
                error_type: text_field(primitive, Field::Payload)?,
                error_message: text_field(primitive, Field::Args)?,
            },
            // Unknown message, no payload
            None => Message::Generic { header },
        };

        debug!(
            kind = message.kind().map_or("generic", MessageKind::name),
            txn_len = message.transaction_id().len(),
            "Decoded message"
        );
        Ok(message)
    }

    fn to_primitive(&self, message: &Message) -> Result<Primitive> {
        let mut primitive = self.encode_header(message.header())?;

        match message {
            Message::Request { method, args, .. } => {
                primitive.set(Field::MessageKind, MessageKind::Request.tag());
                primitive.set(Field::Payload, method.as_str());
                primitive.set(Field::Args, args.clone());
            }
            Message::Error {
                error_type,
                error_message,
                ..
            } => {
                primitive.set(Field::MessageKind, MessageKind::Error.tag());
                primitive.set(Field::Payload, error_type.as_str());
                primitive.set(Field::Args, error_message.as_str());
            }
            Message::Response { result, .. } => {
                primitive.set(Field::MessageKind, MessageKind::Response.tag());
                primitive.set(Field::Payload, result.clone());
            }
            Message::Generic { .. } => {}
        }

        debug!(
            kind = message.kind().map_or("generic", MessageKind::name),
            slots = primitive.len(),
            "Encoded message"
        );
        Ok(primitive)
    }
}

static DEFAULT_FORMAT: DefaultFormat = DefaultFormat::new();

/// Decode with the default format and this build's `COMPAT_VERSION`
pub fn decode(primitive: &Primitive) -> Result<Message> {
    DEFAULT_FORMAT.from_primitive(primitive)
}

/// Encode with the default format and this build's `COMPAT_VERSION`
pub fn encode(message: &Message) -> Result<Primitive> {
    DEFAULT_FORMAT.to_primitive(message)
}

fn required(primitive: &Primitive, field: Field) -> Result<&Value> {
    primitive
        .get(field)
        .ok_or(ProtocolError::MissingField(field))
}

fn bytes_field(primitive: &Primitive, field: Field) -> Result<Bytes> {
    let value = required(primitive, field)?;
    value.as_bytes().cloned().ok_or_else(|| {
        ProtocolError::invalid(
            field,
            format!("{}, got {}", constants::ERR_EXPECTED_BYTES, value.type_name()),
        )
    })
}

fn text_field(primitive: &Primitive, field: Field) -> Result<String> {
    let bytes = bytes_field(primitive, field)?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| ProtocolError::invalid(field, constants::ERR_EXPECTED_UTF8))
}

fn port_field(primitive: &Primitive) -> Result<u16> {
    let value = required(primitive, Field::NodePort)?;
    let port = value.as_integer().ok_or_else(|| {
        ProtocolError::invalid(
            Field::NodePort,
            format!("{}, got {}", constants::ERR_EXPECTED_INTEGER, value.type_name()),
        )
    })?;
    u16::try_from(port).map_err(|_| {
        ProtocolError::invalid(
            Field::NodePort,
            format!("{} (got {port})", constants::ERR_PORT_RANGE),
        )
    })
}

/// Absent, non-integer and unknown tags all mean generic
fn kind_field(primitive: &Primitive) -> Option<MessageKind> {
    primitive
        .get(Field::MessageKind)
        .and_then(Value::as_integer)
        .and_then(MessageKind::from_tag)
}
