//! An implementation of the Noise Protocol Framework handshake state
//! machine: protocol name parsing, the handshake pattern language with
//! psk modifiers, the symmetric/cipher state layers, and the terminal
//! split into transport cipher states.
//!
//! A handshake is configured through [`builder::Builder`] from parsed
//! [`params::Params`] and driven with alternating
//! [`handshake::HandshakeState::write_message`] and
//! [`handshake::HandshakeState::read_message`] calls until both return a
//! [`transport::TransportPair`].
#![warn(missing_docs)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

/// Handshake builder
pub mod builder;
/// AEAD ciphers and the cipher state
pub mod cipher;
/// X25519 keypairs
pub mod dh;
/// Noise errors
pub mod error;
/// The handshake state machine
pub mod handshake;
/// Hash, HMAC and HKDF primitives
pub mod hash;
/// Protocol name parameters
pub mod params;
/// The handshake pattern language
pub mod pattern;
/// The symmetric state
pub mod symmetric;
/// Post-handshake transport states
pub mod transport;

/// Convenience result type for Noise operations
pub type Result<T> = core::result::Result<T, error::Error>;

/// The maximum length of a Noise message in bytes
pub const MSG_MAX_LEN: usize = 65535;

/// The length of an AEAD authentication tag in bytes
pub const TAG_LEN: usize = 16;

/// The length of a cipher key in bytes
pub const KEY_LEN: usize = 32;

/// The length of one pre-shared key in bytes
pub const PSK_LEN: usize = 32;

#[cfg(feature = "std")]
mod inner {
    use rand_core::{CryptoRng, RngCore};

    pub fn get_rng() -> impl CryptoRng + RngCore {
        rand::thread_rng()
    }
}

#[cfg(not(feature = "std"))]
mod inner {
    use rand_core::{CryptoRng, OsRng, RngCore};

    pub fn get_rng() -> impl CryptoRng + RngCore {
        OsRng
    }
}
