//! Alias and session token generation.
//!
//! Both generators draw from the operating system CSPRNG via `getrandom`; a
//! predictable alias or token would let third parties enumerate links or
//! hijack sessions.

use base64::Engine as _;

/// Symbols an alias is drawn from.
pub const ALIAS_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Largest multiple of 62 that fits in a byte. Bytes at or above it are
/// rejected so every symbol stays equiprobable.
const ACCEPT_BELOW: u8 = 248;

/// Random bytes in a session token (256 bits).
const TOKEN_LENGTH_BYTES: usize = 32;

/// Generates an alias of exactly `length` symbols from [`ALIAS_ALPHABET`].
///
/// # Errors
///
/// Fails only when the system random number generator is unavailable.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(7)?;
/// assert_eq!(alias.len(), 7);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> Result<String, getrandom::Error> {
    let mut alias = String::with_capacity(length);
    let mut buffer = [0u8; 64];

    while alias.len() < length {
        getrandom::fill(&mut buffer)?;

        for byte in buffer.iter().copied().filter(|b| *b < ACCEPT_BELOW) {
            alias.push(char::from(ALIAS_ALPHABET[usize::from(byte % 62)]));
            if alias.len() == length {
                break;
            }
        }
    }

    Ok(alias)
}

/// Generates an opaque session token.
///
/// Encodes 32 random bytes as URL-safe base64 without padding, producing a
/// 43-character cookie-safe string.
///
/// # Errors
///
/// Fails only when the system random number generator is unavailable.
pub fn generate_token() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}
