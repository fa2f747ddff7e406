//! Domain Layer
//!
//! Pure rules for signed requests: what is signed and when a timestamp is
//! still acceptable.

pub mod message;
pub mod timestamp;

pub use message::auth_message;
pub use timestamp::{RequestTimestamp, TimestampError};
