/*
    SPDX-License-Identifier: Apache-2.0
*/
use crate::{
    dh::{KeyPair, PublicKey},
    error::{BuilderError, Error},
    handshake::HandshakeState,
    params::Params,
    pattern::Role,
    Result, PSK_LEN,
};

/// Generates a [`HandshakeState`] and also validates that all of the
/// prerequisites for the given parameters are satisfied: a pattern that
/// names a static key in a pre-message or transmits one needs the local
/// keypair up front, pre-message statics of the other side need the
/// remote public key, and psk-modified patterns need one 32-byte key per
/// psk token.
///
/// The ephemeral keypair is normally generated during the handshake;
/// `local_ephemeral_keypair` injects a fixed one to reproduce test
/// vectors and must not be used otherwise.
pub struct Builder<'a> {
    params: Params,
    prologue: &'a [u8],
    local_static: Option<KeyPair>,
    local_ephemeral: Option<KeyPair>,
    remote_static: Option<PublicKey>,
    remote_ephemeral: Option<PublicKey>,
    pre_shared_keys: Option<&'a [u8]>,
}

impl<'a> Builder<'a> {
    /// Construct a new builder from the parsed protocol parameters
    pub fn new(params: Params) -> Self {
        Builder {
            params,
            prologue: &[],
            local_static: None,
            local_ephemeral: None,
            remote_static: None,
            remote_ephemeral: None,
            pre_shared_keys: None,
        }
    }

    /// Add prologue data both parties must agree on
    pub fn prologue(mut self, prologue: &'a [u8]) -> Self {
        self.prologue = prologue;
        self
    }

    /// Add the local static keypair
    pub fn local_static_keypair(mut self, keypair: KeyPair) -> Self {
        self.local_static = Some(keypair);
        self
    }

    /// Add a fixed local ephemeral keypair for vector reproduction
    pub fn local_ephemeral_keypair(mut self, keypair: KeyPair) -> Self {
        self.local_ephemeral = Some(keypair);
        self
    }

    /// Add the remote static public key
    pub fn remote_static_public_key(mut self, key: PublicKey) -> Self {
        self.remote_static = Some(key);
        self
    }

    /// Add the remote ephemeral public key
    pub fn remote_ephemeral_public_key(mut self, key: PublicKey) -> Self {
        self.remote_ephemeral = Some(key);
        self
    }

    /// Add the pre-shared keys as one concatenated buffer, 32 bytes per
    /// psk token in pattern order. The buffer is borrowed for the
    /// lifetime of the handshake.
    pub fn pre_shared_keys(mut self, psks: &'a [u8]) -> Self {
        self.pre_shared_keys = Some(psks);
        self
    }

    /// Build an initiator handshake state
    pub fn build_initiator(self) -> Result<HandshakeState<'a>> {
        self.build(Role::Initiator)
    }

    /// Build a responder handshake state
    pub fn build_responder(self) -> Result<HandshakeState<'a>> {
        self.build(Role::Responder)
    }

    fn build(self, role: Role) -> Result<HandshakeState<'a>> {
        let pattern = &self.params.handshake;

        if self.local_static.is_none() && pattern.needs_local_static(role) {
            return Err(Error::Builder(BuilderError::MissingLocalStaticKey));
        }

        if self.remote_static.is_none() && pattern.needs_remote_static(role) {
            return Err(Error::Builder(BuilderError::MissingRemoteStaticKey));
        }

        let psk_count = pattern.psk_count();
        let psks = self.pre_shared_keys.filter(|psks| !psks.is_empty());
        match psks {
            None if psk_count > 0 => {
                return Err(Error::Builder(BuilderError::MissingPreSharedKey));
            }
            Some(buffer) if buffer.len() != psk_count * PSK_LEN => {
                return Err(Error::Builder(BuilderError::PreSharedKeyLength));
            }
            _ => {}
        }

        HandshakeState::new(
            &self.params,
            role,
            self.prologue,
            self.local_static,
            self.local_ephemeral,
            self.remote_static,
            self.remote_ephemeral,
            psks,
        )
    }
}
