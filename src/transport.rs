/*
    SPDX-License-Identifier: Apache-2.0
*/
use crate::{
    cipher::{check_transport_len, CipherState},
    error::{Error, ProtocolError},
    hash::HashOutput,
    pattern::Role,
    Result,
};
use alloc::vec::Vec;

/// The transport cipher states produced by the terminal split. The first
/// split output always keys initiator→responder traffic; this pair maps
/// the two outputs onto send/recv halves for the local role. For the
/// one-way patterns only the initiator→responder direction exists, so the
/// responder has no send half and the initiator's receive half is
/// discarded at construction.
///
/// Transport messages are encrypted with empty associated data; nonces
/// advance monotonically and independently per direction.
pub struct TransportPair {
    send: Option<CipherState>,
    recv: Option<CipherState>,
    handshake_hash: HashOutput,
}

impl core::fmt::Debug for TransportPair {
    /// Redacted: cipher key material must never be printed.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransportPair").finish_non_exhaustive()
    }
}

impl TransportPair {
    pub(crate) fn new(
        role: Role,
        one_way: bool,
        c1: CipherState,
        c2: CipherState,
        handshake_hash: &[u8],
    ) -> Self {
        let (send, recv) = match (role, one_way) {
            (Role::Initiator, false) => (Some(c1), Some(c2)),
            (Role::Responder, false) => (Some(c2), Some(c1)),
            (Role::Initiator, true) => (Some(c1), None),
            (Role::Responder, true) => (None, Some(c1)),
        };
        TransportPair {
            send,
            recv,
            handshake_hash: HashOutput::from_slice(handshake_hash),
        }
    }

    /// Encrypt a transport message for the peer
    pub fn send_message(&mut self, plaintext: &[u8]) -> Result<Vec<u8>> {
        check_transport_len(plaintext)?;
        self.send
            .as_mut()
            .ok_or(Error::Protocol(ProtocolError::OutOfTurn))?
            .encrypt_with_ad(&[], plaintext)
    }

    /// Decrypt a transport message from the peer
    pub fn recv_message(&mut self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.recv
            .as_mut()
            .ok_or(Error::Protocol(ProtocolError::OutOfTurn))?
            .decrypt_with_ad(&[], ciphertext)
    }

    /// Re-key the sending direction
    pub fn rekey_send(&mut self) -> Result<()> {
        self.send
            .as_mut()
            .ok_or(Error::Protocol(ProtocolError::OutOfTurn))?
            .rekey()
    }

    /// Re-key the receiving direction
    pub fn rekey_recv(&mut self) -> Result<()> {
        self.recv
            .as_mut()
            .ok_or(Error::Protocol(ProtocolError::OutOfTurn))?
            .rekey()
    }

    /// The final transcript hash, identical on both peers and suitable
    /// for channel binding
    pub fn handshake_hash(&self) -> &[u8] {
        self.handshake_hash.as_ref()
    }

    /// Take the raw cipher states, send half first
    pub fn into_cipher_states(self) -> (Option<CipherState>, Option<CipherState>) {
        (self.send, self.recv)
    }
}
