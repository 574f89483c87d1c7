/*
    SPDX-License-Identifier: Apache-2.0
*/
use crate::{
    error::{Error, ParamError},
    pattern::Pattern,
};
use core::{
    fmt::{Display, Error as FmtError, Formatter},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// Encapsulates the handshake parameters parsed from a protocol name of
/// the form `Noise_<Pattern>_<DH>_<Cipher>_<Hash>`, e.g.
/// `Noise_XX_25519_ChaChaPoly_SHA256`. The name fully determines the
/// handshake pattern and every primitive, and its exact bytes seed the
/// symmetric state.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Params {
    /// The protocol name
    pub protocol: Protocol,
    /// The handshake pattern with modifiers applied
    pub handshake: Pattern,
    /// The Diffie-Hellman function
    pub dh: DhChoice,
    /// The AEAD cipher function
    pub cipher: CipherChoice,
    /// The hash function
    pub hash: HashChoice,
}

impl FromStr for Params {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut split = s.split('_');
        let params = Params {
            protocol: split.next().ok_or(ParamError::TooFewParameters)?.parse()?,
            handshake: split.next().ok_or(ParamError::TooFewParameters)?.parse()?,
            dh: split.next().ok_or(ParamError::TooFewParameters)?.parse()?,
            cipher: split.next().ok_or(ParamError::TooFewParameters)?.parse()?,
            hash: split.next().ok_or(ParamError::TooFewParameters)?.parse()?,
        };
        if split.next().is_some() {
            return Err(Error::Param(ParamError::UnknownProtocol));
        }
        Ok(params)
    }
}

impl Display for Params {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "{}_{}_{}_{}_{}",
            self.protocol, self.handshake, self.dh, self.cipher, self.hash
        )
    }
}

/// The protocol identifier, always the first name component
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Protocol {
    /// Noise protocol
    Noise,
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Noise" => Ok(Protocol::Noise),
            _ => Err(Error::Param(ParamError::UnknownProtocol)),
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "Noise")
    }
}

/// The supported Diffie-Hellman functions. Curve448 suites are not
/// supported.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum DhChoice {
    /// X25519 scalar multiplication
    Curve25519,
}

impl FromStr for DhChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "25519" => Ok(DhChoice::Curve25519),
            _ => Err(Error::Param(ParamError::UnknownProtocol)),
        }
    }
}

impl Display for DhChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "25519")
    }
}

/// The supported AEAD cipher functions
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum CipherChoice {
    /// ChaCha20-Poly1305
    ChaChaPoly,
    /// AES-256-GCM
    AesGcm,
}

impl FromStr for CipherChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ChaChaPoly" => Ok(CipherChoice::ChaChaPoly),
            "AESGCM" => Ok(CipherChoice::AesGcm),
            _ => Err(Error::Param(ParamError::UnknownProtocol)),
        }
    }
}

impl Display for CipherChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            CipherChoice::ChaChaPoly => write!(f, "ChaChaPoly"),
            CipherChoice::AesGcm => write!(f, "AESGCM"),
        }
    }
}

/// The supported hash functions
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum HashChoice {
    /// SHA-256
    Sha256,
    /// SHA-512
    Sha512,
    /// BLAKE2s
    Blake2s,
    /// BLAKE2b
    Blake2b,
}

impl FromStr for HashChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHA256" => Ok(HashChoice::Sha256),
            "SHA512" => Ok(HashChoice::Sha512),
            "BLAKE2s" => Ok(HashChoice::Blake2s),
            "BLAKE2b" => Ok(HashChoice::Blake2b),
            _ => Err(Error::Param(ParamError::UnknownProtocol)),
        }
    }
}

impl Display for HashChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            HashChoice::Sha256 => write!(f, "SHA256"),
            HashChoice::Sha512 => write!(f, "SHA512"),
            HashChoice::Blake2s => write!(f, "BLAKE2s"),
            HashChoice::Blake2b => write!(f, "BLAKE2b"),
        }
    }
}
