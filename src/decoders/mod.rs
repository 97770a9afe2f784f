//! The filter pipeline (§4.5): named stream decoders chained left to right.
//!
//! Required decoders: `ASCIIHexDecode`, `ASCII85Decode`, `LZWDecode`,
//! `FlateDecode` (with PNG/TIFF predictors), `RunLengthDecode`,
//! `CCITTFaxDecode`, `JBIG2Decode`, `DCTDecode`, `JPXDecode`, `Crypt`. The
//! last five are pass-throughs — decoding raster imagery is out of scope.

use crate::error::{Error, Result};
use crate::parser_config::ParserOptions;

mod ascii85;
mod ascii_hex;
mod ccitt;
mod crypt;
mod dct;
mod flate;
mod jbig2;
mod jpx;
mod lzw;
mod predictor;
mod runlength;

pub use ascii85::Ascii85Decoder;
pub use ascii_hex::AsciiHexDecoder;
pub use ccitt::CcittFaxDecoder;
pub use crypt::CryptDecoder;
pub use dct::DctDecoder;
pub use flate::FlateDecoder;
pub use jbig2::Jbig2Decoder;
pub use jpx::JpxDecoder;
pub use lzw::LzwDecoder;
pub use predictor::{DecodeParams, PngPredictor, decode_predictor};
pub use runlength::RunLengthDecoder;

const DEFAULT_MAX_DECOMPRESSION_RATIO: u32 = 100;
const DEFAULT_MAX_DECOMPRESSED_SIZE: usize = 100 * 1024 * 1024;

/// Expand an inline-image filter abbreviation (§4.5) to its full name.
/// Names that are not abbreviations pass through unchanged.
pub fn expand_filter_abbreviation(name: &str) -> &str {
    match name {
        "AHx" => "ASCIIHexDecode",
        "A85" => "ASCII85Decode",
        "LZW" => "LZWDecode",
        "Fl" => "FlateDecode",
        "RL" => "RunLengthDecode",
        "CCF" => "CCITTFaxDecode",
        "DCT" => "DCTDecode",
        other => other,
    }
}

/// A decoder that takes raw bytes and produces decoded bytes.
pub trait StreamDecoder {
    /// Decode `input`.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;
    /// The filter's full name, e.g. `"FlateDecode"`.
    fn name(&self) -> &str;
}

fn decoder_for(filter_name: &str) -> Result<Box<dyn StreamDecoder>> {
    let full = expand_filter_abbreviation(filter_name);
    Ok(match full {
        "FlateDecode" => Box::new(FlateDecoder),
        "ASCIIHexDecode" => Box::new(AsciiHexDecoder),
        "ASCII85Decode" => Box::new(Ascii85Decoder),
        "LZWDecode" => Box::new(LzwDecoder),
        "RunLengthDecode" => Box::new(RunLengthDecoder),
        "DCTDecode" => Box::new(DctDecoder),
        "CCITTFaxDecode" => Box::new(CcittFaxDecoder),
        "JBIG2Decode" => Box::new(Jbig2Decoder),
        "JPXDecode" => Box::new(JpxDecoder),
        "Crypt" => Box::new(CryptDecoder),
        _ => return Err(Error::Unsupported(format!("filter {full}"))),
    })
}

/// Run the filter pipeline with no decode parameters and default security
/// limits.
pub fn decode_stream(data: &[u8], filters: &[String]) -> Result<Vec<u8>> {
    decode_stream_with_params(data, filters, None)
}

/// Run the filter pipeline, applying `params[i]` (a PNG/TIFF predictor, if
/// any) positionally after filter `i` as `/DecodeParms` specifies.
pub fn decode_stream_with_params(
    data: &[u8],
    filters: &[String],
    params: Option<&Vec<Option<DecodeParams>>>,
) -> Result<Vec<u8>> {
    decode_stream_with_options(data, filters, params, None)
}

/// Run the filter pipeline with explicit [`ParserOptions`] governing
/// decompression-bomb limits (§4.5). A filter whose output would exceed
/// `max_decompression_ratio` or `max_decompressed_size` aborts with
/// `Error::Filter` rather than continuing to allocate.
pub fn decode_stream_with_options(
    data: &[u8],
    filters: &[String],
    params: Option<&Vec<Option<DecodeParams>>>,
    options: Option<&ParserOptions>,
) -> Result<Vec<u8>> {
    let max_ratio = options.map(|o| o.max_decompression_ratio).unwrap_or(DEFAULT_MAX_DECOMPRESSION_RATIO);
    let max_size = options.map(|o| o.max_decompressed_size).unwrap_or(DEFAULT_MAX_DECOMPRESSED_SIZE);
    let compressed_size = data.len().max(1);

    let mut current = data.to_vec();
    for (i, filter_name) in filters.iter().enumerate() {
        let decoder = decoder_for(filter_name)?;
        current = decoder.decode(&current)?;

        if max_ratio > 0 {
            let ratio = current.len() as u64 / compressed_size as u64;
            if ratio > max_ratio as u64 {
                return Err(Error::Filter(format!(
                    "decompression ratio {ratio}:1 exceeds limit {max_ratio}:1 ({} -> {} bytes)",
                    compressed_size,
                    current.len()
                )));
            }
        }
        if max_size > 0 && current.len() > max_size {
            return Err(Error::Filter(format!(
                "decompressed size {} bytes exceeds limit {max_size} bytes",
                current.len()
            )));
        }

        if let Some(params) = params.and_then(|p| p.get(i)).and_then(|p| p.as_ref()) {
            if params.predictor != 1 {
                current = decode_predictor(&current, params)?;
            }
        }
    }

    Ok(current)
}
