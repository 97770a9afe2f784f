//! AES-CBC encryption/decryption for PDF (§4.4).
//!
//! PDFs use AES in CBC mode: the first 16 bytes of the payload are the IV,
//! the rest is ciphertext padded with PKCS#7. AES-128 backs V=4/R=4;
//! AES-256 backs V=5/R=5,6.

use aes::{Aes128, Aes256};
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use cbc::{Decryptor, Encryptor};

type Aes128CbcEnc = Encryptor<Aes128>;
type Aes128CbcDec = Decryptor<Aes128>;
type Aes256CbcEnc = Encryptor<Aes256>;
type Aes256CbcDec = Decryptor<Aes256>;

/// Encrypt with AES-128-CBC and PKCS#7 padding.
pub fn aes128_encrypt(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, &'static str> {
    if key.len() != 16 {
        return Err("AES-128 key must be 16 bytes");
    }
    let mut padded = pkcs7_pad(data);
    let len = padded.len();
    let cipher = Aes128CbcEnc::new(key.into(), check_iv(iv)?.into());
    cipher
        .encrypt_padded_mut::<aes::cipher::block_padding::NoPadding>(&mut padded, len)
        .map_err(|_| "encryption failed")?;
    Ok(padded)
}

/// Decrypt AES-128-CBC data and strip PKCS#7 padding.
pub fn aes128_decrypt(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, &'static str> {
    if key.len() != 16 {
        return Err("AES-128 key must be 16 bytes");
    }
    let mut buffer = check_block_aligned(check_iv(iv)?, data)?;
    if buffer.is_empty() {
        return Ok(Vec::new());
    }
    let cipher = Aes128CbcDec::new(key.into(), iv.into());
    let decrypted = cipher
        .decrypt_padded_mut::<aes::cipher::block_padding::NoPadding>(&mut buffer)
        .map_err(|_| "decryption failed")?;
    strip_pkcs7(decrypted)
}

/// Decrypt AES-256-CBC data and strip PKCS#7 padding. Used directly with
/// the R5/6 file key — there is no per-object key derivation step for
/// AES-256 (§4.4).
pub fn aes256_decrypt(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, &'static str> {
    if key.len() != 32 {
        return Err("AES-256 key must be 32 bytes");
    }
    let mut buffer = check_block_aligned(check_iv(iv)?, data)?;
    if buffer.is_empty() {
        return Ok(Vec::new());
    }
    let cipher = Aes256CbcDec::new(key.into(), iv.into());
    let decrypted = cipher
        .decrypt_padded_mut::<aes::cipher::block_padding::NoPadding>(&mut buffer)
        .map_err(|_| "decryption failed")?;
    strip_pkcs7(decrypted)
}

/// Encrypt with AES-256-CBC, used by the test harness below to build known
/// ciphertext for the decrypt path.
#[cfg(test)]
fn aes256_encrypt(key: &[u8], iv: &[u8], data: &[u8]) -> Result<Vec<u8>, &'static str> {
    if key.len() != 32 {
        return Err("AES-256 key must be 32 bytes");
    }
    let mut padded = pkcs7_pad(data);
    let len = padded.len();
    let cipher = Aes256CbcEnc::new(key.into(), check_iv(iv)?.into());
    cipher
        .encrypt_padded_mut::<aes::cipher::block_padding::NoPadding>(&mut padded, len)
        .map_err(|_| "encryption failed")?;
    Ok(padded)
}

fn check_iv(iv: &[u8]) -> Result<&[u8], &'static str> {
    if iv.len() != 16 { Err("IV must be 16 bytes") } else { Ok(iv) }
}

fn check_block_aligned(_iv: &[u8], data: &[u8]) -> Result<Vec<u8>, &'static str> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    if !data.len().is_multiple_of(16) {
        return Err("encrypted data length must be a multiple of 16");
    }
    Ok(data.to_vec())
}

fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let mut padded = data.to_vec();
    let padding_len = 16 - (data.len() % 16);
    padded.extend(std::iter::repeat_n(padding_len as u8, padding_len));
    padded
}

fn strip_pkcs7(decrypted: &[u8]) -> Result<Vec<u8>, &'static str> {
    if decrypted.is_empty() {
        return Ok(Vec::new());
    }
    let padding_len = decrypted[decrypted.len() - 1] as usize;
    if padding_len == 0 || padding_len > 16 || padding_len > decrypted.len() {
        return Err("invalid PKCS#7 padding");
    }
    let data_len = decrypted.len() - padding_len;
    if decrypted[data_len..].iter().any(|&b| b != padding_len as u8) {
        return Err("invalid PKCS#7 padding");
    }
    Ok(decrypted[..data_len].to_vec())
}
