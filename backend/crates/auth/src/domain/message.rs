//! Signed payload

use platform::address::Address;

/// The exact text a client signs: server address, one space, raw `Date` value.
///
/// The timestamp is used verbatim, so client and server agree byte-for-byte.
pub fn auth_message(server_address: &Address, timestamp: &str) -> String {
    format!("{} {}", server_address.as_str(), timestamp)
}
