/*
    SPDX-License-Identifier: Apache-2.0
*/
use crate::{
    cipher::CipherState,
    hash::HashOutput,
    params::{CipherChoice, HashChoice},
    Result,
};
use alloc::vec::Vec;
use zeroize::Zeroize;

/// The symmetric state threads a rolling chaining key `ck` and transcript
/// hash `h` through every handshake operation. `ck` feeds the HKDF that
/// derives each new cipher key; `h` accumulates all public material and
/// ciphertexts and is the associated data for every handshake-phase
/// encryption, which is what binds each message to the full transcript.
pub struct SymmetricState {
    hash: HashChoice,
    cipher_choice: CipherChoice,
    cs: CipherState,
    ck: HashOutput,
    h: HashOutput,
}

impl SymmetricState {
    /// Seed the state from the full protocol name: `h` is the name
    /// right-padded with zeros when it fits in HASHLEN, or its hash
    /// otherwise; `ck` starts equal to `h` and the cipher starts unkeyed.
    pub fn initialize_symmetric(
        protocol_name: &[u8],
        cipher: CipherChoice,
        hash: HashChoice,
    ) -> Self {
        let h = if protocol_name.len() <= hash.len() {
            let mut padded = alloc::vec![0u8; hash.len()];
            padded[..protocol_name.len()].copy_from_slice(protocol_name);
            HashOutput::from_slice(&padded)
        } else {
            hash.hash(&[protocol_name])
        };
        let ck = h.clone();
        SymmetricState {
            hash,
            cipher_choice: cipher,
            cs: CipherState::new(cipher),
            ck,
            h,
        }
    }

    /// Mix input key material into the chaining key and re-key the cipher
    /// with the second HKDF output truncated to 32 bytes
    pub fn mix_key(&mut self, input_key_material: &[u8]) {
        let (ck, temp_k) = self.hash.hkdf2(self.ck.as_ref(), input_key_material);
        self.ck = ck;
        self.cs.initialize_key(temp_k.key_bytes());
    }

    /// Absorb data into the transcript hash
    pub fn mix_hash(&mut self, data: &[u8]) {
        self.h = self.hash.hash(&[self.h.as_ref(), data]);
    }

    /// Mix a pre-shared key into both the chaining key and the transcript
    /// hash, re-keying the cipher from the third HKDF output
    pub fn mix_key_and_hash(&mut self, psk: &[u8]) {
        let (ck, temp_h, temp_k) = self.hash.hkdf3(self.ck.as_ref(), psk);
        self.ck = ck;
        self.mix_hash(temp_h.as_ref());
        self.cs.initialize_key(temp_k.key_bytes());
    }

    /// Encrypt with the transcript hash as associated data, then absorb
    /// the ciphertext
    pub fn encrypt_and_hash(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let h = self.h.clone();
        let ciphertext = self.cs.encrypt_with_ad(h.as_ref(), plaintext)?;
        self.mix_hash(&ciphertext);
        Ok(ciphertext)
    }

    /// Decrypt with the transcript hash as associated data, then absorb
    /// the ciphertext that was received
    pub fn decrypt_and_hash(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let h = self.h.clone();
        let plaintext = self.cs.decrypt_with_ad(h.as_ref(), ciphertext)?;
        self.mix_hash(ciphertext);
        Ok(plaintext)
    }

    /// Derive the two transport cipher states from the final chaining
    /// key. The first is keyed for initiator→responder traffic.
    pub fn split(&mut self) -> (CipherState, CipherState) {
        let (temp_k1, temp_k2) = self.hash.hkdf2(self.ck.as_ref(), &[]);
        let mut c1 = CipherState::new(self.cipher_choice);
        let mut c2 = CipherState::new(self.cipher_choice);
        c1.initialize_key(temp_k1.key_bytes());
        c2.initialize_key(temp_k2.key_bytes());
        (c1, c2)
    }

    /// True once a handshake-phase cipher key has been mixed in
    pub fn has_key(&self) -> bool {
        self.cs.has_key()
    }

    /// The transcript hash, used for channel binding after the handshake
    pub fn handshake_hash(&self) -> &[u8] {
        self.h.as_ref()
    }
}

impl Drop for SymmetricState {
    fn drop(&mut self) {
        self.ck.zeroize();
    }
}
