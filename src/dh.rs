/*
    SPDX-License-Identifier: Apache-2.0
*/
use crate::error::{Error, ProtocolError};
use rand_core::{CryptoRng, RngCore};
use x25519_dalek::{SharedSecret, StaticSecret};
use zeroize::Zeroizing;

pub use x25519_dalek::PublicKey;

/// Length of an X25519 public key and shared secret
pub const DH_LEN: usize = 32;

/// An X25519 keypair. The secret scalar is held in a `Zeroizing` wrapper
/// so it is wiped on drop. Ephemeral keypairs are generated fresh per
/// handshake; the builder can inject a fixed one to reproduce test
/// vectors.
#[derive(Clone)]
pub struct KeyPair {
    secret: Zeroizing<StaticSecret>,
    public: PublicKey,
}

impl KeyPair {
    /// Generate a new keypair from the given CSPRNG
    pub fn generate(rng: impl RngCore + CryptoRng) -> Self {
        let secret = Zeroizing::new(StaticSecret::random_from_rng(rng));
        let public = PublicKey::from(&*secret);
        KeyPair { secret, public }
    }

    /// Recover a keypair from secret key bytes
    pub fn from_secret(secret: [u8; DH_LEN]) -> Self {
        let secret = Zeroizing::new(StaticSecret::from(secret));
        let public = PublicKey::from(&*secret);
        KeyPair { secret, public }
    }

    /// The public half of the keypair
    pub fn public(&self) -> &PublicKey {
        &self.public
    }
}

/// X25519 between a local keypair and a remote public key. A
/// non-contributory result (remote key of low order) fails with
/// `DhFailed`; an all-zero shared secret is otherwise not special-cased.
pub fn dh(local: &KeyPair, remote: &PublicKey) -> Result<SharedSecret, Error> {
    let shared = local.secret.diffie_hellman(remote);
    if !shared.was_contributory() {
        return Err(Error::Protocol(ProtocolError::DhFailed));
    }
    Ok(shared)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shared_secrets_agree() {
        let a = KeyPair::from_secret([0x11; 32]);
        let b = KeyPair::from_secret([0x22; 32]);
        let ab = dh(&a, b.public()).unwrap();
        let ba = dh(&b, a.public()).unwrap();
        assert_eq!(ab.as_bytes(), ba.as_bytes());
    }

    #[test]
    fn low_order_point_is_rejected() {
        // the identity element contributes nothing
        let a = KeyPair::from_secret([0x11; 32]);
        let identity = PublicKey::from([0u8; 32]);
        match dh(&a, &identity) {
            Err(e) => assert_eq!(e, Error::Protocol(ProtocolError::DhFailed)),
            Ok(_) => panic!("expected DhFailed error"),
        }
    }
}
