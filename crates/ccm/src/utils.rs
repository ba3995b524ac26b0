//! Hex field parsing for externally supplied proof documents.

use pontoon_primitives::Buf32;

use crate::errors::CcmError;

pub(crate) fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

/// Decodes a hex field, tolerating an optional `0x` prefix.
pub fn decode_hex(s: &str, field: &'static str) -> Result<Vec<u8>, CcmError> {
    hex::decode(strip_0x(s)).map_err(|_| CcmError::MalformedHex(field))
}

pub(crate) fn decode_hex_nodes(
    nodes: &[String],
    field: &'static str,
) -> Result<Vec<Vec<u8>>, CcmError> {
    nodes.iter().map(|n| decode_hex(n, field)).collect()
}

/// Parses a hex quantity into big-endian bytes with no leading zeros.
/// Accepts odd-length strings the way Ethereum quantities are printed.
pub fn parse_hex_quantity(s: &str, field: &'static str) -> Result<Vec<u8>, CcmError> {
    let stripped = strip_0x(s);
    if stripped.is_empty() {
        return Ok(Vec::new());
    }
    let padded;
    let normalized = if stripped.len() % 2 == 1 {
        padded = format!("0{stripped}");
        &padded
    } else {
        stripped
    };
    let raw = hex::decode(normalized).map_err(|_| CcmError::MalformedHex(field))?;
    let first = raw.iter().position(|b| *b != 0).unwrap_or(raw.len());
    Ok(raw[first..].to_vec())
}

pub fn parse_hex_u64(s: &str, field: &'static str) -> Result<u64, CcmError> {
    let bytes = parse_hex_quantity(s, field)?;
    if bytes.len() > 8 {
        return Err(CcmError::MalformedHex(field));
    }
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64))
}

pub fn parse_hex_buf32(s: &str, field: &'static str) -> Result<Buf32, CcmError> {
    let raw = decode_hex(s, field)?;
    Buf32::try_from_slice(&raw).ok_or(CcmError::MalformedHex(field))
}
