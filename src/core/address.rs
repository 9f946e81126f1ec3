//! Sender address conversion between the dotted-quad text form carried by
//! messages and the four-octet list carried on the wire.

use crate::core::value::Value;
use crate::error::{constants, ProtocolError, Result};
use std::net::Ipv4Addr;

/// Parse a dotted quad, failing with `MalformedAddress`.
///
/// Parsing follows `Ipv4Addr`, so leading zeros and surrounding whitespace are
/// rejected.
pub fn parse_dotted_quad(ip: &str) -> Result<Ipv4Addr> {
    ip.parse::<Ipv4Addr>()
        .map_err(|_| ProtocolError::MalformedAddress(format!("'{ip}' is not a dotted quad")))
}

/// Split a dotted quad into its wire form, a list of four integers
pub fn encode_ip(ip: &str) -> Result<Value> {
    let addr = parse_dotted_quad(ip)?;
    Ok(addr.octets().iter().map(|o| Value::from(*o)).collect())
}

/// Join a four-octet wire list back into a dotted quad
pub fn decode_ip(value: &Value) -> Result<String> {
    let items = value
        .as_list()
        .ok_or_else(|| ProtocolError::MalformedAddress(constants::ERR_IP_NOT_A_LIST.into()))?;

    if items.len() != 4 {
        return Err(ProtocolError::MalformedAddress(format!(
            "{} (got {})",
            constants::ERR_IP_WRONG_LENGTH,
            items.len()
        )));
    }

    let mut octets = [0u8; 4];
    for (slot, item) in octets.iter_mut().zip(items) {
        let n = item
            .as_integer()
            .ok_or_else(|| ProtocolError::MalformedAddress(constants::ERR_IP_OCTET_TYPE.into()))?;
        *slot = u8::try_from(n).map_err(|_| {
            ProtocolError::MalformedAddress(format!("{} (got {n})", constants::ERR_IP_OCTET_RANGE))
        })?;
    }

    Ok(Ipv4Addr::from(octets).to_string())
}
