//! Hash computation and object identity for the ugit version control system.
//!
//! This crate provides the core `ObjectId` type, SHA-1 hash computation, and
//! hex encoding/decoding used throughout ugit. Every stored object is
//! identified by the SHA-1 of its serialized form.

mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use error::HashError;
pub use oid::ObjectId;
