//! JPXDecode implementation.
//!
//! JPEG2000 compression. Like DCTDecode and CCITTFaxDecode, this is a
//! pass-through: decoding raster imagery is out of scope (§4.5), so the
//! compressed payload is handed back unchanged for a caller that wants the
//! raw image bytes.

use crate::decoders::StreamDecoder;
use crate::error::Result;

/// JPXDecode filter implementation. Pass-through, no JPEG2000 decoding.
pub struct JpxDecoder;

impl StreamDecoder for JpxDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        log::debug!("JPXDecode: pass-through {} bytes", input.len());
        Ok(input.to_vec())
    }

    fn name(&self) -> &str {
        "JPXDecode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_unchanged() {
        let decoder = JpxDecoder;
        let data = b"\x00\x00\x00\x0CjP  \r\n\x87\n";
        assert_eq!(decoder.decode(data).unwrap(), data);
    }
}
