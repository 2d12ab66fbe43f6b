//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, URL-safe Base64)
//! - Password hashing (Argon2id, PHC string format)
//! - Bearer token header handling

pub mod bearer;
pub mod crypto;
pub mod password;
