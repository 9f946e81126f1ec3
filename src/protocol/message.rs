//! # DHT RPC Messages
//!
//! The four message kinds exchanged between DHT nodes.
//!
//! Every message carries a [`Header`] identifying the exchange and its sender.
//! Requests, responses and errors add a kind-specific body; a generic message
//! is the header alone and is what unknown wire kinds (pings, notifications
//! from newer peers) decode to.

use crate::config::RPC_ID_LENGTH;
use crate::core::address::parse_dotted_quad;
use crate::core::value::Value;
use crate::error::Result;
use bytes::Bytes;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::net::SocketAddrV4;

/// Wire tags for the known message kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageKind {
    Request = 0,
    Response = 1,
    Error = 2,
}

impl MessageKind {
    #[inline]
    pub fn tag(self) -> i64 {
        self as i64
    }

    /// Resolve a wire tag. Unknown tags are not an error, they map to `None`.
    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            0 => Some(MessageKind::Request),
            1 => Some(MessageKind::Response),
            2 => Some(MessageKind::Error),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageKind::Request => "request",
            MessageKind::Response => "response",
            MessageKind::Error => "error",
        }
    }
}

/// Fields shared by every message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Correlates a request with its response or error
    pub transaction_id: Bytes,
    pub sender_node_id: Bytes,
    /// Dotted quad
    pub sender_ip: String,
    pub sender_port: u16,
}

impl Header {
    pub fn new(
        transaction_id: impl Into<Bytes>,
        sender_node_id: impl Into<Bytes>,
        sender_ip: impl Into<String>,
        sender_port: u16,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            sender_node_id: sender_node_id.into(),
            sender_ip: sender_ip.into(),
            sender_port,
        }
    }

    /// Header for a fresh request with a random `RPC_ID_LENGTH`-byte transaction id
    pub fn with_random_id(
        sender_node_id: impl Into<Bytes>,
        sender_ip: impl Into<String>,
        sender_port: u16,
    ) -> Self {
        Self::new(
            generate_transaction_id(),
            sender_node_id,
            sender_ip,
            sender_port,
        )
    }

    /// Header answering `request`: same transaction id, our own sender fields
    pub fn reply_to(
        request: &Header,
        sender_node_id: impl Into<Bytes>,
        sender_ip: impl Into<String>,
        sender_port: u16,
    ) -> Self {
        Self::new(
            request.transaction_id.clone(),
            sender_node_id,
            sender_ip,
            sender_port,
        )
    }

    /// Sender as a socket address, failing with `MalformedAddress`
    pub fn sender_addr(&self) -> Result<SocketAddrV4> {
        let ip = parse_dotted_quad(&self.sender_ip)?;
        Ok(SocketAddrV4::new(ip, self.sender_port))
    }
}

/// Generate a random transaction id
pub fn generate_transaction_id() -> Bytes {
    let mut id = [0u8; RPC_ID_LENGTH];
    rand::rng().fill_bytes(&mut id);
    Bytes::copy_from_slice(&id)
}

/// A DHT RPC message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Remote procedure call
    Request {
        header: Header,
        method: String,
        /// Call parameters, opaque to the codec
        args: Value,
    },
    /// Successful return of a request
    Response { header: Header, result: Value },
    /// Remote exception raised by a request
    Error {
        header: Header,
        error_type: String,
        error_message: String,
    },
    /// Header-only fallback for kinds this node does not know
    Generic { header: Header },
}

impl Message {
    pub fn request(header: Header, method: impl Into<String>, args: impl Into<Value>) -> Self {
        Message::Request {
            header,
            method: method.into(),
            args: args.into(),
        }
    }

    pub fn response(header: Header, result: impl Into<Value>) -> Self {
        Message::Response {
            header,
            result: result.into(),
        }
    }

    pub fn error(
        header: Header,
        error_type: impl Into<String>,
        error_message: impl Into<String>,
    ) -> Self {
        Message::Error {
            header,
            error_type: error_type.into(),
            error_message: error_message.into(),
        }
    }

    pub fn generic(header: Header) -> Self {
        Message::Generic { header }
    }

    pub fn header(&self) -> &Header {
        match self {
            Message::Request { header, .. }
            | Message::Response { header, .. }
            | Message::Error { header, .. }
            | Message::Generic { header } => header,
        }
    }

    /// Wire kind, `None` for generic messages
    pub fn kind(&self) -> Option<MessageKind> {
        match self {
            Message::Request { .. } => Some(MessageKind::Request),
            Message::Response { .. } => Some(MessageKind::Response),
            Message::Error { .. } => Some(MessageKind::Error),
            Message::Generic { .. } => None,
        }
    }

    pub fn transaction_id(&self) -> &Bytes {
        &self.header().transaction_id
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Message::Request { .. })
    }

    /// Responses and errors both answer an outstanding request
    pub fn is_reply(&self) -> bool {
        matches!(self, Message::Response { .. } | Message::Error { .. })
    }

    pub fn sender_addr(&self) -> Result<SocketAddrV4> {
        self.header().sender_addr()
    }
}
