//! Bitcoin signed-message verification
//!
//! Clients prove control of an address by signing a text message with the
//! key behind it, in the format wallets call "sign message":
//!
//! - digest: `SHA256d(varstr("Bitcoin Signed Message:\n") || varstr(message))`
//! - signature: base64 of 65 bytes, `header || r || s`, where
//!   `header = 27 + recovery_id (+ 4 when the key is compressed)`
//!
//! Verification recovers the public key, re-derives the address with the
//! claimed address' version byte and compares HASH160s.

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

use crate::address::{Address, AddressVersion};
use crate::crypto::{constant_time_eq, from_base64, sha256d, to_base64};

const MESSAGE_MAGIC: &str = "Bitcoin Signed Message:\n";
const COMPACT_SIGNATURE_LENGTH: usize = 65;
const HEADER_BASE: u8 = 27;
const HEADER_COMPRESSED: u8 = 4;

/// Reasons a signature cannot be checked at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature is not valid base64")]
    Encoding,

    #[error("signature must be 65 bytes, got {0}")]
    Length(usize),

    #[error("invalid signature header byte {0}")]
    Header(u8),

    #[error("signature scalars are out of range")]
    Malformed,

    #[error("public key recovery failed")]
    Recovery,
}

/// Digest a wallet signs for `message`.
pub fn message_digest(message: &str) -> [u8; 32] {
    let mut data = Vec::with_capacity(MESSAGE_MAGIC.len() + message.len() + 10);
    write_varstr(&mut data, MESSAGE_MAGIC.as_bytes());
    write_varstr(&mut data, message.as_bytes());
    sha256d(&data)
}

/// `true` when `signature` over `message` was made by the key behind `address`.
///
/// Malformed input of any kind yields `false`.
pub fn verify_message(address: &Address, message: &str, signature: &str) -> bool {
    recover_signer(message, signature, address.version())
        .map(|signer| constant_time_eq(&signer.hash160(), &address.hash160()))
        .unwrap_or(false)
}

/// Recover the address that produced `signature` over `message`.
pub fn recover_signer(
    message: &str,
    signature: &str,
    version: AddressVersion,
) -> Result<Address, SignatureError> {
    let bytes = from_base64(signature.trim()).map_err(|_| SignatureError::Encoding)?;
    if bytes.len() != COMPACT_SIGNATURE_LENGTH {
        return Err(SignatureError::Length(bytes.len()));
    }

    let header = bytes[0];
    if !(HEADER_BASE..HEADER_BASE + 8).contains(&header) {
        return Err(SignatureError::Header(header));
    }
    let compressed = header >= HEADER_BASE + HEADER_COMPRESSED;
    let mut recovery_id = RecoveryId::from_byte((header - HEADER_BASE) & 3)
        .ok_or(SignatureError::Header(header))?;

    let mut signature = Signature::from_slice(&bytes[1..]).map_err(|_| SignatureError::Malformed)?;
    // High-S signatures are valid on the wire; normalizing negates the
    // nonce point, so the y parity flips with it.
    if let Some(normalized) = signature.normalize_s() {
        signature = normalized;
        recovery_id = RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced());
    }

    let digest = message_digest(message);
    let key = VerifyingKey::recover_from_prehash(&digest, &signature, recovery_id)
        .map_err(|_| SignatureError::Recovery)?;

    Ok(address_of_key(&key, version, compressed))
}

/// Sign `message` the way a wallet would, returning the base64 signature.
pub fn sign_message(
    key: &SigningKey,
    message: &str,
    compressed: bool,
) -> Result<String, SignatureError> {
    let digest = message_digest(message);
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&digest)
        .map_err(|_| SignatureError::Malformed)?;

    let mut header = HEADER_BASE + recovery_id.to_byte();
    if compressed {
        header += HEADER_COMPRESSED;
    }

    let mut bytes = Vec::with_capacity(COMPACT_SIGNATURE_LENGTH);
    bytes.push(header);
    bytes.extend_from_slice(&signature.to_bytes());
    Ok(to_base64(&bytes))
}

/// Address of a verifying key.
pub fn address_of_key(key: &VerifyingKey, version: AddressVersion, compressed: bool) -> Address {
    let point = key.to_encoded_point(compressed);
    Address::from_public_key(point.as_bytes(), version)
}

fn write_varstr(buf: &mut Vec<u8>, data: &[u8]) {
    let len = data.len() as u64;
    match len {
        0..=0xfc => buf.push(len as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(len as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(len as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&len.to_le_bytes());
        }
    }
    buf.extend_from_slice(data);
}
