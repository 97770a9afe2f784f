//! The Standard Security Handler (§4.4): key derivation and per-object
//! decryption for PDF encryption revisions 2–6.
//!
//! - R=2..4 (RC4-40, RC4-128, AES-128): Algorithm 2 derives one file key
//!   from the password; Algorithm 1 derives a per-object key from it.
//! - R=5,6 (AES-256): Algorithm 2.A (plus the Algorithm 2.B hardened hash
//!   for R=6) derives the 32-byte file key directly from the password and
//!   the `/U`+`/UE` (or `/O`+`/OE`) entries; that key is used for every
//!   object's AES-256-CBC payload with no further per-object derivation.

use crate::error::{Error, Result};
use crate::object::Object;

mod aes;
mod algorithms;
mod handler;
mod rc4;

pub use handler::EncryptionHandler;

/// Encryption algorithm selected by an encryption dictionary's `/V`, `/R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// RC4 with a 40-bit key (V=1, R=2).
    Rc440,
    /// RC4 with a 128-bit key (V=2, R=3).
    Rc4128,
    /// AES-128-CBC (V=4, R=4).
    Aes128,
    /// AES-256-CBC (V=5, R=5 or 6).
    Aes256,
}

impl Algorithm {
    /// Key length in bytes for this algorithm (R=2..4 only; R=5/6 always
    /// uses a 32-byte file key regardless of `/Length`).
    pub fn key_length(&self) -> usize {
        match self {
            Algorithm::Rc440 => 5,
            Algorithm::Rc4128 => 16,
            Algorithm::Aes128 => 16,
            Algorithm::Aes256 => 32,
        }
    }

    /// Whether this algorithm is an AES variant.
    pub fn is_aes(&self) -> bool {
        matches!(self, Algorithm::Aes128 | Algorithm::Aes256)
    }
}

/// The `/Encrypt` dictionary (§4.4).
#[derive(Debug, Clone)]
pub struct EncryptDict {
    /// `/Filter`, expected to be `Standard`.
    pub filter: String,
    /// Algorithm version (`/V`): 1, 2, 4, or 5.
    pub version: u32,
    /// Key length in bits (`/Length`).
    pub length: Option<u32>,
    /// Revision (`/R`): 2, 3, 4, 5, or 6.
    pub revision: u32,
    /// `/O`: owner password hash (32 bytes for R<5, 48 for R>=5).
    pub owner_password: Vec<u8>,
    /// `/U`: user password hash, same shape as `/O`.
    pub user_password: Vec<u8>,
    /// `/P`: user permission bits.
    pub permissions: i32,
    /// `/EncryptMetadata`, default true.
    pub encrypt_metadata: bool,
    /// `/OE` (R>=5 only): owner-path encrypted file key.
    pub owner_encryption: Option<Vec<u8>>,
    /// `/UE` (R>=5 only): user-path encrypted file key.
    pub user_encryption: Option<Vec<u8>>,
}

impl EncryptDict {
    /// Parse from the `/Encrypt` dictionary object.
    pub fn from_object(obj: &Object) -> Result<Self> {
        let dict = obj.as_dict().ok_or_else(|| Error::Crypt("/Encrypt is not a dictionary".to_string()))?;

        let filter = dict
            .get("Filter")
            .and_then(Object::as_name)
            .ok_or_else(|| Error::Crypt("/Encrypt missing /Filter".to_string()))?
            .to_string();

        let version = dict
            .get("V")
            .and_then(Object::as_integer)
            .ok_or_else(|| Error::Crypt("/Encrypt missing /V".to_string()))? as u32;

        let revision = dict
            .get("R")
            .and_then(Object::as_integer)
            .ok_or_else(|| Error::Crypt("/Encrypt missing /R".to_string()))? as u32;

        let owner_password =
            dict.get("O").and_then(Object::as_string).ok_or_else(|| Error::Crypt("/Encrypt missing /O".to_string()))?.to_vec();

        let user_password =
            dict.get("U").and_then(Object::as_string).ok_or_else(|| Error::Crypt("/Encrypt missing /U".to_string()))?.to_vec();

        let permissions = dict
            .get("P")
            .and_then(Object::as_integer)
            .ok_or_else(|| Error::Crypt("/Encrypt missing /P".to_string()))? as i32;

        let length = dict.get("Length").and_then(Object::as_integer).map(|i| i as u32);

        let encrypt_metadata = dict.get("EncryptMetadata").and_then(Object::as_bool).unwrap_or(true);

        let owner_encryption = dict.get("OE").and_then(Object::as_string).map(<[u8]>::to_vec);
        let user_encryption = dict.get("UE").and_then(Object::as_string).map(<[u8]>::to_vec);

        Ok(EncryptDict {
            filter,
            version,
            length,
            revision,
            owner_password,
            user_password,
            permissions,
            encrypt_metadata,
            owner_encryption,
            user_encryption,
        })
    }

    /// Determine the algorithm from `/V`, `/R` (Table 20).
    pub fn algorithm(&self) -> Result<Algorithm> {
        match (self.version, self.revision) {
            (1, 2) => Ok(Algorithm::Rc440),
            (2, 3) => Ok(Algorithm::Rc4128),
            (4, 4) => Ok(Algorithm::Aes128),
            (5, 5) | (5, 6) => Ok(Algorithm::Aes256),
            _ => Err(Error::Unsupported(format!("encryption V={}, R={}", self.version, self.revision))),
        }
    }

    /// Effective key length in bytes.
    pub fn key_length_bytes(&self) -> usize {
        match self.length {
            Some(length) => (length / 8) as usize,
            None => match self.version {
                1 => 5,
                2 | 4 => 16,
                5 => 32,
                _ => 16,
            },
        }
    }
}

/// `/P` permission bits (Table 22), exposed read-only — PLAYA has no
/// enforcement responsibility (it doesn't print or edit), just reporting.
#[derive(Debug, Clone, Copy)]
pub struct Permissions {
    bits: i32,
}

impl Permissions {
    /// Build from the raw `/P` value.
    pub fn from_bits(bits: i32) -> Self {
        Self { bits }
    }

    /// Printing allowed.
    pub fn can_print(&self) -> bool {
        (self.bits & (1 << 2)) != 0
    }

    /// Document modification allowed.
    pub fn can_modify(&self) -> bool {
        (self.bits & (1 << 3)) != 0
    }

    /// Copying text/graphics allowed.
    pub fn can_copy(&self) -> bool {
        (self.bits & (1 << 4)) != 0
    }

    /// Annotation/form-filling allowed.
    pub fn can_annotate(&self) -> bool {
        (self.bits & (1 << 5)) != 0
    }

    /// Form field filling allowed (R>=3).
    pub fn can_fill_forms(&self) -> bool {
        (self.bits & (1 << 8)) != 0
    }

    /// Accessibility content extraction allowed (R>=3).
    pub fn can_extract_accessibility(&self) -> bool {
        (self.bits & (1 << 9)) != 0
    }

    /// Document assembly allowed (R>=3).
    pub fn can_assemble(&self) -> bool {
        (self.bits & (1 << 10)) != 0
    }

    /// High-quality printing allowed (R>=3).
    pub fn can_print_high_quality(&self) -> bool {
        (self.bits & (1 << 11)) != 0
    }
}
