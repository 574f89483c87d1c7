/*
    SPDX-License-Identifier: Apache-2.0
*/
use thiserror::Error;

/// Noise errors
#[derive(Error, PartialEq, Copy, Clone, Debug)]
pub enum Error {
    /// A protocol name parameter error occurred
    #[error("parameter error")]
    Param(#[from] ParamError),
    /// A builder error occurred
    #[error("builder error")]
    Builder(#[from] BuilderError),
    /// A protocol error occurred
    #[error("protocol error")]
    Protocol(#[from] ProtocolError),
}

/// Errors that can happen from invalid protocol name strings
#[derive(Error, PartialEq, Copy, Clone, Debug)]
pub enum ParamError {
    /// Too few parameters in the protocol name string
    #[error("not enough parameters given")]
    TooFewParameters,
    /// Unknown protocol identifier or primitive token
    #[error("unknown protocol identifier or primitive")]
    UnknownProtocol,
    /// Unknown, or unsupported, base handshake pattern
    #[error("unknown or unsupported handshake pattern")]
    UnknownPattern,
    /// Malformed or out-of-range pattern modifier
    #[error("bad handshake pattern modifier")]
    BadPatternModifier,
}

/// Errors that can happen during building
#[derive(Error, PartialEq, Copy, Clone, Debug)]
pub enum BuilderError {
    /// Missing local static keypair
    #[error("missing local static keypair needed for this handshake pattern")]
    MissingLocalStaticKey,
    /// Missing remote static public key
    #[error("missing remote static public key needed for this handshake pattern")]
    MissingRemoteStaticKey,
    /// Missing pre-shared keys
    #[error("missing pre-shared keys needed for this handshake pattern")]
    MissingPreSharedKey,
    /// Pre-shared key buffer is not 32 bytes per psk token
    #[error("pre-shared key buffer has the wrong length")]
    PreSharedKeyLength,
}

/// Errors that can happen during handshaking and transport
#[derive(Error, PartialEq, Copy, Clone, Debug)]
pub enum ProtocolError {
    /// A token requires a key that was not supplied
    #[error("missing key required by the handshake pattern")]
    MissingKey,
    /// Input message is shorter than the pattern tokens require
    #[error("message too short for the handshake pattern")]
    ShortMessage,
    /// Message would exceed the maximum Noise message length
    #[error("message exceeds the maximum length")]
    MessageTooLong,
    /// AEAD tag verification failed
    #[error("decryption failed")]
    DecryptFailed,
    /// The nonce counter has been exhausted
    #[error("nonce counter exhausted")]
    NonceExhausted,
    /// The DH operation produced a non-contributory result
    #[error("diffie-hellman failed")]
    DhFailed,
    /// The other party is expected to process the next message
    #[error("not this party's turn in the handshake")]
    OutOfTurn,
    /// The handshake has already produced its transport states
    #[error("handshake already complete")]
    HandshakeComplete,
}
