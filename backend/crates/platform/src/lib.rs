//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG bytes, SHA-256, URL-safe Base64)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Client metadata extraction (IP address, User-Agent)

pub mod client;
pub mod crypto;
pub mod password;
