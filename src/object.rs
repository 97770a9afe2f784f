//! The PDF value sum type (§3) and stream payload decoding.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// A PDF value: the nine variants of §3 plus the indirect reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// An integer number.
    Integer(i64),
    /// A real (floating-point) number.
    Real(f64),
    /// A byte string (`(...)` or `<...>`), after escape/hex decoding.
    String(Vec<u8>),
    /// A name (`/Foo`), after `#xx` escape decoding. Stored without the
    /// leading slash.
    Name(String),
    /// An ordered sequence of values.
    Array(Vec<Object>),
    /// A mapping from name to value. Duplicate keys: last wins (§4.2).
    Dictionary(HashMap<String, Object>),
    /// A dictionary plus a deferred, possibly-encrypted, possibly-filtered
    /// byte payload. The payload is not decoded until
    /// [`Object::decode_stream_data`] is called.
    Stream {
        /// The stream dictionary.
        dict: HashMap<String, Object>,
        /// The raw payload exactly as it appears between `stream` and
        /// `endstream`.
        data: bytes::Bytes,
    },
    /// An indirect reference (objid, genno).
    Reference(ObjectRef),
}

/// A reference to an indirect object: (objid, genno).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number.
    pub id: u32,
    /// Generation number.
    pub gen: u16,
}

impl ObjectRef {
    /// Build a reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Human-readable type name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String(_) => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream { .. } => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// View as an integer. Real values are not coerced; coercion between
    /// integer and real happens explicitly at arithmetic sites (§9).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// View as a real, coercing an integer if necessary.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// View as a name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// View as a dictionary. Works for both `Dictionary` and `Stream`.
    pub fn as_dict(&self) -> Option<&HashMap<String, Object>> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// View as an array.
    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// View as an indirect reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// View as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// View as a real.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// View as a byte string.
    pub fn as_string(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// Decode this stream's payload with no decryption applied.
    pub fn decode_stream_data(&self) -> Result<Vec<u8>> {
        self.decode_stream_data_with_decryption(None, 0, 0)
    }

    /// Decode this stream's payload, decrypting first if `decrypt` is given.
    ///
    /// Decryption happens before filter decoding (§3 invariant, §4.4):
    /// encrypted payloads are binary, so they are handed to `decrypt` as-is,
    /// with no whitespace trimming (trimming is only safe for already-plain
    /// data, where some encoders leave extra bytes after the `stream`
    /// keyword's EOL marker).
    pub fn decode_stream_data_with_decryption(
        &self,
        decrypt: Option<&dyn Fn(&[u8]) -> Result<Vec<u8>>>,
        obj_num: u32,
        gen_num: u32,
    ) -> Result<Vec<u8>> {
        match self {
            Object::Stream { dict, data } => {
                let decrypted = if let Some(decrypt) = decrypt {
                    log::debug!("decrypting stream {obj_num} {gen_num} ({} bytes)", data.len());
                    decrypt(data).inspect_err(|e| {
                        log::error!("decryption failed for {obj_num} {gen_num}: {e}");
                    })?
                } else {
                    trim_leading_stream_whitespace(data).to_vec()
                };

                let filters = dict.get("Filter").map(extract_filter_names).unwrap_or_default();
                if filters.is_empty() {
                    return Ok(decrypted);
                }

                let decode_params = extract_decode_params(dict.get("DecodeParms").or_else(|| dict.get("DP")));
                crate::decoders::decode_stream_with_params(&decrypted, &filters, decode_params.as_ref())
            },
            _ => Err(Error::Resolve(format!("expected Stream, found {}", self.type_name()))),
        }
    }
}

/// Some encoders insert extra whitespace after the `stream` keyword's EOL
/// marker, beyond the single EOL the spec requires (§4.1). Trim it before
/// decoding unencrypted payloads.
fn trim_leading_stream_whitespace(data: &[u8]) -> &[u8] {
    let mut start = 0;
    while start < data.len() && crate::lexer::is_pdf_whitespace(data[start]) {
        start += 1;
    }
    &data[start..]
}

/// `/Filter` is a name or an array of names (§4.5).
pub(crate) fn extract_filter_names(filter_obj: &Object) -> Vec<String> {
    match filter_obj {
        Object::Name(name) => vec![name.clone()],
        Object::Array(arr) => arr.iter().filter_map(|obj| obj.as_name().map(str::to_string)).collect(),
        _ => vec![],
    }
}

/// `/DecodeParms` is a dictionary, an array of dictionaries (positional with
/// `/Filter`), or absent.
pub(crate) fn extract_decode_params(params_obj: Option<&Object>) -> Option<Vec<Option<crate::decoders::DecodeParams>>> {
    match params_obj? {
        Object::Dictionary(d) => Some(vec![Some(parse_decode_params(d))]),
        Object::Array(arr) => Some(
            arr.iter()
                .map(|o| o.as_dict().map(parse_decode_params))
                .collect(),
        ),
        _ => None,
    }
}

fn parse_decode_params(dict: &HashMap<String, Object>) -> crate::decoders::DecodeParams {
    crate::decoders::DecodeParams {
        predictor: dict.get("Predictor").and_then(Object::as_integer).unwrap_or(1),
        columns: dict.get("Columns").and_then(Object::as_integer).unwrap_or(1) as usize,
        colors: dict.get("Colors").and_then(Object::as_integer).unwrap_or(1) as usize,
        bits_per_component: dict.get("BitsPerComponent").and_then(Object::as_integer).unwrap_or(8) as usize,
    }
}
