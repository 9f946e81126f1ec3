//! # Primitive Records
//!
//! The transmissible form of a message: eight positional slots, each holding a
//! [`Value`] or nothing.
//!
//! Inside the crate a record is a named-field struct. The positional shape only
//! exists at the wire boundary, where [`Primitive::from_wire`] and
//! [`Primitive::into_wire`] convert to and from an integer-keyed map.
//!
//! ## Layout
//! ```text
//! 0 compat-version   4 sender-ip (4 octets)
//! 1 message-kind     5 sender-port
//! 2 transaction-id   6 payload
//! 3 sender-node-id   7 arguments
//! ```
//!
//! Reordering these positions is a breaking change and requires a bump of
//! [`COMPAT_VERSION`](crate::config::COMPAT_VERSION).

use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// Integer-keyed map, the positional wire shape of a record
pub type WireMap = BTreeMap<i64, Value>;

/// Named wire positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Field {
    CompatVersion = 0,
    MessageKind = 1,
    TransactionId = 2,
    NodeId = 3,
    NodeIp = 4,
    NodePort = 5,
    /// Method name, result or error type depending on the kind
    Payload = 6,
    /// Call arguments or error message depending on the kind
    Args = 7,
}

impl Field {
    /// Every field in wire order
    pub const ALL: [Field; 8] = [
        Field::CompatVersion,
        Field::MessageKind,
        Field::TransactionId,
        Field::NodeId,
        Field::NodeIp,
        Field::NodePort,
        Field::Payload,
        Field::Args,
    ];

    /// Wire position of this field
    #[inline]
    pub fn index(self) -> i64 {
        self as i64
    }

    /// Resolve a wire position, `None` for positions outside the layout
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::CompatVersion => "compat-version",
            Field::MessageKind => "message-kind",
            Field::TransactionId => "transaction-id",
            Field::NodeId => "sender-node-id",
            Field::NodeIp => "sender-ip",
            Field::NodePort => "sender-port",
            Field::Payload => "payload",
            Field::Args => "arguments",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.index())
    }
}

/// A message in primitive form, one optional slot per wire position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primitive {
    pub compat_version: Option<Value>,
    pub message_kind: Option<Value>,
    pub transaction_id: Option<Value>,
    pub node_id: Option<Value>,
    pub node_ip: Option<Value>,
    pub node_port: Option<Value>,
    pub payload: Option<Value>,
    pub args: Option<Value>,
}

impl Primitive {
    /// Borrow the slot for `field`
    pub fn get(&self, field: Field) -> Option<&Value> {
        match field {
            Field::CompatVersion => self.compat_version.as_ref(),
            Field::MessageKind => self.message_kind.as_ref(),
            Field::TransactionId => self.transaction_id.as_ref(),
            Field::NodeId => self.node_id.as_ref(),
            Field::NodeIp => self.node_ip.as_ref(),
            Field::NodePort => self.node_port.as_ref(),
            Field::Payload => self.payload.as_ref(),
            Field::Args => self.args.as_ref(),
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<Value> {
        match field {
            Field::CompatVersion => &mut self.compat_version,
            Field::MessageKind => &mut self.message_kind,
            Field::TransactionId => &mut self.transaction_id,
            Field::NodeId => &mut self.node_id,
            Field::NodeIp => &mut self.node_ip,
            Field::NodePort => &mut self.node_port,
            Field::Payload => &mut self.payload,
            Field::Args => &mut self.args,
        }
    }

    /// Fill the slot for `field`, returning the previous value
    pub fn set(&mut self, field: Field, value: impl Into<Value>) -> Option<Value> {
        self.slot_mut(field).replace(value.into())
    }

    /// Empty the slot for `field`
    pub fn clear(&mut self, field: Field) -> Option<Value> {
        self.slot_mut(field).take()
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        Field::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a record from an integer-keyed map.
    ///
    /// Keys outside the layout are dropped; they are never round-tripped.
    pub fn from_wire(wire: WireMap) -> Self {
        let mut primitive = Self::default();
        for (index, value) in wire {
            match Field::from_index(index) {
                Some(field) => {
                    primitive.set(field, value);
                }
                None => trace!(index, "Dropping unknown wire position"),
            }
        }
        primitive
    }

    /// Build a record from a positional list. Missing trailing slots stay empty.
    pub fn from_list(items: Vec<Value>) -> Self {
        let mut primitive = Self::default();
        let extra = items.len().saturating_sub(Field::ALL.len());
        for (field, value) in Field::ALL.into_iter().zip(items) {
            primitive.set(field, value);
        }
        if extra > 0 {
            trace!(extra, "Dropping positions beyond the wire layout");
        }
        primitive
    }

    /// Convert to the integer-keyed wire map. Empty slots become absent keys.
    pub fn into_wire(mut self) -> WireMap {
        let mut wire = WireMap::new();
        for field in Field::ALL {
            if let Some(value) = self.clear(field) {
                wire.insert(field.index(), value);
            }
        }
        wire
    }
}

impl From<WireMap> for Primitive {
    fn from(wire: WireMap) -> Self {
        Self::from_wire(wire)
    }
}

impl From<Primitive> for WireMap {
    fn from(primitive: Primitive) -> Self {
        primitive.into_wire()
    }
}
