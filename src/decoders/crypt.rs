//! Crypt filter (§4.5): identity pass-through.
//!
//! A `/Filter /Crypt` entry names a crypt filter from the security handler's
//! `/CF` dictionary via its `/Name` decode parameter. Per-object decryption
//! already happens in [`crate::object::Object::decode_stream_data_with_decryption`]
//! before the filter chain runs, so by the time this filter sees the data it
//! has nothing left to do — the one crypt filter name PDF producers actually
//! emit in practice, `/Identity`, is a no-op by definition, and any other
//! name degrades to the same no-op rather than fail the whole stream.

use crate::decoders::StreamDecoder;
use crate::error::Result;

/// Crypt filter implementation. Always identity: real decryption happens
/// earlier, keyed by object identity rather than by filter position.
pub struct CryptDecoder;

impl StreamDecoder for CryptDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(input.to_vec())
    }

    fn name(&self) -> &str {
        "Crypt"
    }
}
