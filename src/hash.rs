/*
    SPDX-License-Identifier: Apache-2.0
*/
use crate::params::HashChoice;
use blake2::{Blake2b512, Blake2s256};
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The largest HASHLEN across the supported hash functions
pub const MAX_HASH_LEN: usize = 64;

/// The largest HMAC block size across the supported hash functions
const MAX_BLOCK_LEN: usize = 128;

/// A digest-sized byte buffer. HASHLEN varies between 32 and 64 across
/// the suites, so outputs are carried in a fixed backing array with an
/// explicit length. Wiped on drop since these buffers hold chaining keys
/// and derived key material.
#[derive(Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct HashOutput {
    bytes: [u8; MAX_HASH_LEN],
    len: usize,
}

impl HashOutput {
    pub(crate) fn from_slice(data: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_HASH_LEN];
        bytes[..data.len()].copy_from_slice(data);
        HashOutput {
            bytes,
            len: data.len(),
        }
    }

    /// The first 32 bytes, the truncation applied to every HKDF output
    /// that becomes a cipher key
    pub fn key_bytes(&self) -> [u8; 32] {
        let mut k = [0u8; 32];
        k.copy_from_slice(&self.bytes[..32]);
        k
    }
}

impl AsRef<[u8]> for HashOutput {
    fn as_ref(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

fn digest_chunks<D: Digest>(chunks: &[&[u8]]) -> HashOutput {
    let mut hasher = D::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    HashOutput::from_slice(hasher.finalize().as_slice())
}

impl HashChoice {
    /// HASHLEN of the selected hash function
    pub fn len(&self) -> usize {
        match self {
            HashChoice::Sha256 | HashChoice::Blake2s => 32,
            HashChoice::Sha512 | HashChoice::Blake2b => 64,
        }
    }

    /// HMAC block size of the selected hash function
    pub fn block_len(&self) -> usize {
        match self {
            HashChoice::Sha256 | HashChoice::Blake2s => 64,
            HashChoice::Sha512 | HashChoice::Blake2b => 128,
        }
    }

    /// Hash the concatenation of the given chunks
    pub fn hash(&self, chunks: &[&[u8]]) -> HashOutput {
        match self {
            HashChoice::Sha256 => digest_chunks::<Sha256>(chunks),
            HashChoice::Sha512 => digest_chunks::<Sha512>(chunks),
            HashChoice::Blake2s => digest_chunks::<Blake2s256>(chunks),
            HashChoice::Blake2b => digest_chunks::<Blake2b512>(chunks),
        }
    }

    /// HMAC over the concatenation of the given chunks. Built from the
    /// hash directly so one construction covers all four suites.
    pub fn hmac(&self, key: &[u8], chunks: &[&[u8]]) -> HashOutput {
        let block_len = self.block_len();

        let keyed = if key.len() > block_len {
            self.hash(&[key])
        } else {
            HashOutput::from_slice(key)
        };

        let mut ipad = [0x36u8; MAX_BLOCK_LEN];
        let mut opad = [0x5cu8; MAX_BLOCK_LEN];
        for (i, b) in keyed.as_ref().iter().enumerate() {
            ipad[i] ^= b;
            opad[i] ^= b;
        }

        let mut inner_chunks = alloc::vec![&ipad[..block_len]];
        inner_chunks.extend_from_slice(chunks);
        let inner = self.hash(&inner_chunks);

        let result = self.hash(&[&opad[..block_len], inner.as_ref()]);

        ipad.zeroize();
        opad.zeroize();
        result
    }

    /// Two-output HKDF with the fixed 0x01/0x02 info bytes
    pub fn hkdf2(&self, chaining_key: &[u8], input_key_material: &[u8]) -> (HashOutput, HashOutput) {
        let temp_key = self.hmac(chaining_key, &[input_key_material]);
        let out_1 = self.hmac(temp_key.as_ref(), &[&[0x01]]);
        let out_2 = self.hmac(temp_key.as_ref(), &[out_1.as_ref(), &[0x02]]);
        (out_1, out_2)
    }

    /// Three-output HKDF with the fixed 0x01/0x02/0x03 info bytes
    pub fn hkdf3(
        &self,
        chaining_key: &[u8],
        input_key_material: &[u8],
    ) -> (HashOutput, HashOutput, HashOutput) {
        let temp_key = self.hmac(chaining_key, &[input_key_material]);
        let out_1 = self.hmac(temp_key.as_ref(), &[&[0x01]]);
        let out_2 = self.hmac(temp_key.as_ref(), &[out_1.as_ref(), &[0x02]]);
        let out_3 = self.hmac(temp_key.as_ref(), &[out_2.as_ref(), &[0x03]]);
        (out_1, out_2, out_3)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn unhex(s: &str) -> alloc::vec::Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn sha256_known_answer() {
        let out = HashChoice::Sha256.hash(&[b"abc"]);
        assert_eq!(
            out.as_ref(),
            &unhex("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")[..]
        );
    }

    #[test]
    fn hmac_sha256_rfc4231_case_1() {
        let key = [0x0bu8; 20];
        let out = HashChoice::Sha256.hmac(&key, &[b"Hi There"]);
        assert_eq!(
            out.as_ref(),
            &unhex("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7")[..]
        );
    }

    #[test]
    fn hmac_sha512_rfc4231_case_1() {
        let key = [0x0bu8; 20];
        let out = HashChoice::Sha512.hmac(&key, &[b"Hi There"]);
        assert_eq!(
            out.as_ref(),
            &unhex(
                "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
                 daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
            )[..]
        );
    }

    #[test]
    fn hkdf_outputs_chain() {
        // hkdf3's first two outputs must equal hkdf2's
        let ck = [0u8; 32];
        let ikm = [0x42u8; 32];
        for choice in [
            HashChoice::Sha256,
            HashChoice::Sha512,
            HashChoice::Blake2s,
            HashChoice::Blake2b,
        ] {
            let (a2, b2) = choice.hkdf2(&ck[..choice.len().min(32)], &ikm);
            let (a3, b3, c3) = choice.hkdf3(&ck[..choice.len().min(32)], &ikm);
            assert!(a2 == a3 && b2 == b3);
            assert_eq!(c3.as_ref().len(), choice.len());
            assert_eq!(a2.as_ref().len(), choice.len());
        }
    }
}
