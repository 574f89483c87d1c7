/*
    SPDX-License-Identifier: Apache-2.0
*/
use crate::{
    error::{Error, ProtocolError},
    params::CipherChoice,
    Result, MSG_MAX_LEN, TAG_LEN,
};
use aes_gcm::Aes256Gcm;
use alloc::vec::Vec;
use chacha20poly1305::{
    aead::{Buffer, Error as AeadError},
    AeadInPlace, ChaCha20Poly1305, KeyInit,
};
use zeroize::Zeroize;

/// Interface over the two AEAD ciphers the protocol names can select.
/// Each cipher formats its own 96-bit nonce from the 64-bit counter: 4
/// zero bytes followed by the counter, little-endian for ChaCha20-Poly1305
/// and big-endian for AES-256-GCM.
pub trait AeadCipher {
    /// Create a cipher instance from a 32-byte key
    fn from_key(k: [u8; 32]) -> Self;

    /// Encode the counter as this cipher's nonce
    fn nonce_bytes(n: u64) -> [u8; 12];

    /// Encrypt the buffer in place, appending the 16-byte tag
    fn encrypt<T: Buffer>(&self, nonce: &[u8; 12], ad: &[u8], data: &mut T)
        -> core::result::Result<(), AeadError>;

    /// Verify the tag and decrypt the buffer in place
    fn decrypt<T: Buffer>(&self, nonce: &[u8; 12], ad: &[u8], data: &mut T)
        -> core::result::Result<(), AeadError>;
}

impl AeadCipher for ChaCha20Poly1305 {
    fn from_key(k: [u8; 32]) -> Self {
        ChaCha20Poly1305::new(&k.into())
    }

    fn nonce_bytes(n: u64) -> [u8; 12] {
        let mut nonce = [0u8; 12];
        nonce[4..].copy_from_slice(&n.to_le_bytes());
        nonce
    }

    fn encrypt<T: Buffer>(
        &self,
        nonce: &[u8; 12],
        ad: &[u8],
        data: &mut T,
    ) -> core::result::Result<(), AeadError> {
        self.encrypt_in_place(nonce.into(), ad, data)
    }

    fn decrypt<T: Buffer>(
        &self,
        nonce: &[u8; 12],
        ad: &[u8],
        data: &mut T,
    ) -> core::result::Result<(), AeadError> {
        self.decrypt_in_place(nonce.into(), ad, data)
    }
}

impl AeadCipher for Aes256Gcm {
    fn from_key(k: [u8; 32]) -> Self {
        Aes256Gcm::new(&k.into())
    }

    fn nonce_bytes(n: u64) -> [u8; 12] {
        let mut nonce = [0u8; 12];
        nonce[4..].copy_from_slice(&n.to_be_bytes());
        nonce
    }

    fn encrypt<T: Buffer>(
        &self,
        nonce: &[u8; 12],
        ad: &[u8],
        data: &mut T,
    ) -> core::result::Result<(), AeadError> {
        self.encrypt_in_place(nonce.into(), ad, data)
    }

    fn decrypt<T: Buffer>(
        &self,
        nonce: &[u8; 12],
        ad: &[u8],
        data: &mut T,
    ) -> core::result::Result<(), AeadError> {
        self.decrypt_in_place(nonce.into(), ad, data)
    }
}

enum AeadKind {
    ChaChaPoly(ChaCha20Poly1305),
    AesGcm(Aes256Gcm),
}

impl AeadKind {
    fn from_key(choice: CipherChoice, k: [u8; 32]) -> Self {
        match choice {
            CipherChoice::ChaChaPoly => AeadKind::ChaChaPoly(ChaCha20Poly1305::from_key(k)),
            CipherChoice::AesGcm => AeadKind::AesGcm(Aes256Gcm::from_key(k)),
        }
    }

    fn encrypt<T: Buffer>(&self, n: u64, ad: &[u8], data: &mut T)
        -> core::result::Result<(), AeadError> {
        match self {
            AeadKind::ChaChaPoly(c) => c.encrypt(&ChaCha20Poly1305::nonce_bytes(n), ad, data),
            AeadKind::AesGcm(c) => c.encrypt(&Aes256Gcm::nonce_bytes(n), ad, data),
        }
    }

    fn decrypt<T: Buffer>(&self, n: u64, ad: &[u8], data: &mut T)
        -> core::result::Result<(), AeadError> {
        match self {
            AeadKind::ChaChaPoly(c) => c.decrypt(&ChaCha20Poly1305::nonce_bytes(n), ad, data),
            AeadKind::AesGcm(c) => c.decrypt(&Aes256Gcm::nonce_bytes(n), ad, data),
        }
    }
}

/// A cipher key with its 64-bit nonce counter. Before the first `mix_key`
/// the state is unkeyed and encrypt/decrypt pass data through unchanged.
/// The key is wiped on drop.
pub struct CipherState {
    choice: CipherChoice,
    k: Option<[u8; 32]>,
    cipher: Option<AeadKind>,
    n: u64,
}

impl CipherState {
    pub(crate) fn new(choice: CipherChoice) -> Self {
        CipherState {
            choice,
            k: None,
            cipher: None,
            n: 0,
        }
    }

    /// Set the key and reset the nonce counter to zero
    pub fn initialize_key(&mut self, k: [u8; 32]) {
        self.cipher = Some(AeadKind::from_key(self.choice, k));
        if let Some(old) = self.k.as_mut() {
            old.zeroize();
        }
        self.k = Some(k);
        self.n = 0;
    }

    /// True once a key has been set
    pub fn has_key(&self) -> bool {
        self.k.is_some()
    }

    /// The current nonce counter
    pub fn nonce(&self) -> u64 {
        self.n
    }

    /// Set the nonce counter, used by out-of-band rekey flows
    pub fn set_nonce(&mut self, n: u64) {
        self.n = n;
    }

    /// Encrypt under the current key and nonce, then advance the counter.
    /// Unkeyed states return the plaintext unchanged. The counter value
    /// 2^64-1 is reserved and fails before any encryption happens.
    pub fn encrypt_with_ad(&mut self, ad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = match &self.cipher {
            Some(cipher) => cipher,
            None => return Ok(plaintext.to_vec()),
        };
        if self.n == u64::MAX {
            return Err(Error::Protocol(ProtocolError::NonceExhausted));
        }
        let mut buffer = Vec::with_capacity(plaintext.len() + TAG_LEN);
        buffer.extend_from_slice(plaintext);
        cipher
            .encrypt(self.n, ad, &mut buffer)
            .map_err(|_| ProtocolError::MessageTooLong)?;
        self.n += 1;
        Ok(buffer)
    }

    /// Decrypt under the current key and nonce. The counter only advances
    /// when tag verification succeeds, so a failed decrypt leaves the
    /// state positioned for the same message.
    pub fn decrypt_with_ad(&mut self, ad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = match &self.cipher {
            Some(cipher) => cipher,
            None => return Ok(ciphertext.to_vec()),
        };
        if self.n == u64::MAX {
            return Err(Error::Protocol(ProtocolError::NonceExhausted));
        }
        let mut buffer = ciphertext.to_vec();
        cipher
            .decrypt(self.n, ad, &mut buffer)
            .map_err(|_| ProtocolError::DecryptFailed)?;
        self.n += 1;
        Ok(buffer)
    }

    /// Derive a fresh key from the current one per §4.2 of the Noise
    /// specification: encrypt 32 zero bytes with the reserved nonce and
    /// keep the first 32 bytes. The counter is left where it was.
    pub fn rekey(&mut self) -> Result<()> {
        let cipher = self
            .cipher
            .as_ref()
            .ok_or(Error::Protocol(ProtocolError::MissingKey))?;
        let mut buffer = [0u8; 32].to_vec();
        cipher
            .encrypt(u64::MAX, &[], &mut buffer)
            .map_err(|_| ProtocolError::MessageTooLong)?;
        let n = self.n;
        let mut k = [0u8; 32];
        k.copy_from_slice(&buffer[..32]);
        buffer.zeroize();
        self.initialize_key(k);
        self.n = n;
        Ok(())
    }
}

impl Drop for CipherState {
    fn drop(&mut self) {
        if let Some(k) = self.k.as_mut() {
            k.zeroize();
        }
    }
}

/// Check that a transport plaintext leaves room for the tag
pub(crate) fn check_transport_len(plaintext: &[u8]) -> Result<()> {
    if plaintext.len() + TAG_LEN > MSG_MAX_LEN {
        return Err(Error::Protocol(ProtocolError::MessageTooLong));
    }
    Ok(())
}
