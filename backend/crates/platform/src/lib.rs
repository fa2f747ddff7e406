//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, double SHA-256, HASH160, Base64)
//! - Base58Check network addresses
//! - Bitcoin signed-message verification
//! - Credential header extraction

pub mod address;
pub mod crypto;
pub mod headers;
pub mod signature;
