//! Encryption handler for PDF documents.
//!
//! Owns the derived file key once a password authenticates and performs
//! per-object decryption for streams and strings.

use super::algorithms;
use super::{Algorithm, EncryptDict, Permissions};
use crate::error::{Error, Result};
use crate::object::Object;

/// Main encryption handler for PDF documents.
#[derive(Debug, Clone)]
pub struct EncryptionHandler {
    dict: EncryptDict,
    /// Derived file key (set after successful authentication). For R=2..4
    /// this is the base key Algorithm 1 derives per-object keys from; for
    /// R=5/6 it is used directly, with no per-object step.
    encryption_key: Option<Vec<u8>>,
    /// First element of `/ID`.
    file_id: Vec<u8>,
    algorithm: Algorithm,
}

impl EncryptionHandler {
    /// Build a handler from the trailer's `/Encrypt` dictionary and `/ID`.
    pub fn new(encrypt_obj: &Object, file_id: Vec<u8>) -> Result<Self> {
        let dict = EncryptDict::from_object(encrypt_obj)?;
        let algorithm = dict.algorithm()?;

        log::info!("PDF is encrypted with {:?} (V={}, R={})", algorithm, dict.version, dict.revision);

        Ok(Self { dict, encryption_key: None, file_id, algorithm })
    }

    /// Authenticate with a password (empty slice for the default/no
    /// password case). Tries the user-password path, then the
    /// owner-password path. On success the file key is stored for later
    /// decryption calls.
    pub fn authenticate(&mut self, password: &[u8]) -> Result<bool> {
        if self.dict.revision >= 5 {
            return self.authenticate_r56(password);
        }

        if let Some(key) = algorithms::authenticate_user_password(
            password,
            &self.dict.user_password,
            &self.dict.owner_password,
            self.dict.permissions,
            &self.file_id,
            self.dict.revision,
            self.dict.key_length_bytes(),
            self.dict.encrypt_metadata,
        ) {
            self.encryption_key = Some(key);
            log::info!("authenticated with user password");
            return Ok(true);
        }

        log::warn!("password authentication failed");
        Ok(false)
    }

    /// Algorithm 2.A/2.B path for R=5/6 (AES-256): the `/U`+`/UE` (or
    /// `/O`+`/OE`) entries pack a 32-byte hash, an 8-byte validation salt,
    /// and an 8-byte key salt, in that order.
    fn authenticate_r56(&mut self, password: &[u8]) -> Result<bool> {
        if let Some((validation, key_salt, hash, encrypted_key)) = split_r56_entry(&self.dict.user_password, self.dict.user_encryption.as_deref())
        {
            if let Some(file_key) = algorithms::compute_file_key_r56(password, validation, key_salt, hash, encrypted_key, &[], self.dict.revision) {
                self.encryption_key = Some(file_key);
                log::info!("authenticated with user password (R{})", self.dict.revision);
                return Ok(true);
            }
        }

        if let Some((validation, key_salt, hash, encrypted_key)) = split_r56_entry(&self.dict.owner_password, self.dict.owner_encryption.as_deref())
        {
            let extra = &self.dict.user_password;
            if let Some(file_key) = algorithms::compute_file_key_r56(password, validation, key_salt, hash, encrypted_key, extra, self.dict.revision)
            {
                self.encryption_key = Some(file_key);
                log::info!("authenticated with owner password (R{})", self.dict.revision);
                return Ok(true);
            }
        }

        log::warn!("password authentication failed");
        Ok(false)
    }

    /// Whether a password has authenticated successfully.
    pub fn is_authenticated(&self) -> bool {
        self.encryption_key.is_some()
    }

    /// The derived file key, if authenticated.
    pub fn encryption_key(&self) -> Option<&[u8]> {
        self.encryption_key.as_deref()
    }

    /// `/P` permissions.
    pub fn permissions(&self) -> Permissions {
        Permissions::from_bits(self.dict.permissions)
    }

    /// Selected encryption algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Decrypt a stream's raw bytes (§4.4). AES-256 (R5/6) uses the file
    /// key directly; every other algorithm derives a per-object key first
    /// (Algorithm 1).
    pub fn decrypt_stream(&self, data: &[u8], obj_num: u32, gen_num: u32) -> Result<Vec<u8>> {
        let key = self.encryption_key.as_ref().ok_or_else(|| Error::Crypt("not authenticated".to_string()))?;

        match self.algorithm {
            Algorithm::Rc440 | Algorithm::Rc4128 => {
                let obj_key = self.compute_object_key(key, obj_num, gen_num)?;
                Ok(super::rc4::rc4_crypt(&obj_key, data))
            },
            Algorithm::Aes128 => {
                let obj_key = self.compute_object_key(key, obj_num, gen_num)?;
                if data.len() < 16 {
                    return Err(Error::Crypt("AES encrypted data too short".to_string()));
                }
                let (iv, ciphertext) = data.split_at(16);
                super::aes::aes128_decrypt(&obj_key[..16], iv, ciphertext).map_err(|e| Error::Crypt(format!("AES-128 decryption failed: {e}")))
            },
            Algorithm::Aes256 => {
                if data.len() < 16 {
                    return Err(Error::Crypt("AES encrypted data too short".to_string()));
                }
                let (iv, ciphertext) = data.split_at(16);
                super::aes::aes256_decrypt(key, iv, ciphertext).map_err(|e| Error::Crypt(format!("AES-256 decryption failed: {e}")))
            },
        }
    }

    /// Decrypt a literal/hex string's raw bytes; same algorithm as streams.
    pub fn decrypt_string(&self, data: &[u8], obj_num: u32, gen_num: u32) -> Result<Vec<u8>> {
        self.decrypt_stream(data, obj_num, gen_num)
    }

    /// Algorithm 1: derive a per-object key from the file key. Not used
    /// for AES-256, which has no per-object derivation step.
    fn compute_object_key(&self, base_key: &[u8], obj_num: u32, gen_num: u32) -> Result<Vec<u8>> {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(base_key);
        hasher.update(&obj_num.to_le_bytes()[..3]);
        hasher.update(&gen_num.to_le_bytes()[..2]);
        if self.algorithm.is_aes() {
            hasher.update(b"sAlT");
        }
        let hash = hasher.finalize();
        let key_len = (base_key.len() + 5).min(16);
        Ok(hash[..key_len].to_vec())
    }
}

/// Split a 48-byte `/U` or `/O` entry into (validation_salt, key_salt,
/// stored_hash) and pair it with its matching `/UE`/`/OE` encrypted key.
/// Returns `None` if either entry is the wrong size.
fn split_r56_entry<'a>(entry: &'a [u8], encrypted_key: Option<&'a [u8]>) -> Option<(&'a [u8], &'a [u8], &'a [u8], &'a [u8])> {
    if entry.len() < 48 {
        return None;
    }
    let hash = &entry[0..32];
    let validation_salt = &entry[32..40];
    let key_salt = &entry[40..48];
    let encrypted_key = encrypted_key?;
    Some((validation_salt, key_salt, hash, encrypted_key))
}
