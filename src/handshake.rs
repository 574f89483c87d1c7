/*
    SPDX-License-Identifier: Apache-2.0
*/
use crate::{
    dh::{dh, KeyPair, PublicKey, DH_LEN},
    error::{Error, ProtocolError},
    inner::get_rng,
    params::Params,
    pattern::{Role, Token},
    symmetric::SymmetricState,
    transport::TransportPair,
    Result, MSG_MAX_LEN, PSK_LEN, TAG_LEN,
};
use alloc::{format, vec::Vec};

/// The handshake driver. Interprets the tokens of the active pattern in
/// strict order, alternating writer and reader by message index, and
/// terminates by splitting into the two transport cipher states.
///
/// Both `write_message` and `read_message` return the payload alongside
/// `Some(TransportPair)` once the final message pattern has been
/// processed; the state must not be driven further after that.
pub struct HandshakeState<'a> {
    symmetric: SymmetricState,
    s: Option<KeyPair>,
    e: Option<KeyPair>,
    rs: Option<PublicKey>,
    re: Option<PublicKey>,
    role: Role,
    messages: Vec<Vec<Token>>,
    index: usize,
    one_way: bool,
    psk_mode: bool,
    psks: Option<&'a [u8]>,
    psk_index: usize,
}

impl<'a> core::fmt::Debug for HandshakeState<'a> {
    /// Redacted: handshake key material must never be printed.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandshakeState")
            .field("role", &self.role)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<'a> HandshakeState<'a> {
    /// Construct the handshake state: seed the symmetric state from the
    /// protocol name, mix the prologue, then mix the pre-message public
    /// keys in initiator-first order. Called by the builder after it has
    /// validated the key material.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        params: &Params,
        role: Role,
        prologue: &[u8],
        s: Option<KeyPair>,
        e: Option<KeyPair>,
        rs: Option<PublicKey>,
        re: Option<PublicKey>,
        psks: Option<&'a [u8]>,
    ) -> Result<Self> {
        let name = format!("{}", params);
        let mut symmetric =
            SymmetricState::initialize_symmetric(name.as_bytes(), params.cipher, params.hash);
        symmetric.mix_hash(prologue);

        let pattern = &params.handshake;
        let mut state = HandshakeState {
            symmetric,
            s,
            e,
            rs,
            re,
            role,
            messages: pattern.message_patterns().to_vec(),
            index: 0,
            one_way: pattern.is_one_way(),
            psk_mode: pattern.psk_count() > 0,
            psks,
            psk_index: 0,
        };

        for (owner, token) in [
            (Role::Initiator, pattern.pre_message_initiator()),
            (Role::Responder, pattern.pre_message_responder()),
        ] {
            if let Some(token) = token {
                let key = state.premessage_key(owner, token)?;
                state.symmetric.mix_hash(&key);
            }
        }

        Ok(state)
    }

    fn premessage_key(&self, owner: Role, token: Token) -> Result<[u8; DH_LEN]> {
        let local = self.role == owner;
        let key = match (token, local) {
            (Token::S, true) => self.s.as_ref().map(|keypair| *keypair.public()),
            (Token::E, true) => self.e.as_ref().map(|keypair| *keypair.public()),
            (Token::S, false) => self.rs,
            (Token::E, false) => self.re,
            _ => None,
        };
        let key = key.ok_or(Error::Protocol(ProtocolError::MissingKey))?;
        Ok(key.to_bytes())
    }

    /// True once every message pattern has been processed
    pub fn is_finished(&self) -> bool {
        self.index >= self.messages.len()
    }

    /// True if this party sends the first handshake message
    pub fn is_initiator(&self) -> bool {
        self.role == Role::Initiator
    }

    /// The remote static public key, once known
    pub fn remote_static(&self) -> Option<&PublicKey> {
        self.rs.as_ref()
    }

    /// The remote ephemeral public key, once received
    pub fn remote_ephemeral(&self) -> Option<&PublicKey> {
        self.re.as_ref()
    }

    /// The current transcript hash, for channel binding
    pub fn handshake_hash(&self) -> &[u8] {
        self.symmetric.handshake_hash()
    }

    fn check_turn(&self, writing: bool) -> Result<()> {
        if self.is_finished() {
            return Err(Error::Protocol(ProtocolError::HandshakeComplete));
        }
        let initiator_turn = self.index % 2 == 0;
        let my_turn = initiator_turn == (self.role == Role::Initiator);
        if my_turn != writing {
            return Err(Error::Protocol(ProtocolError::OutOfTurn));
        }
        Ok(())
    }

    /// Wire length of the message the given tokens and payload would
    /// produce. Every field width is fixed by the tokens and the keyed
    /// state they establish, so this is exact and costs no state change.
    fn message_len(&self, tokens: &[Token], payload_len: usize) -> usize {
        let mut keyed = self.symmetric.has_key();
        let mut len = 0;
        for token in tokens {
            match token {
                Token::E => {
                    len += DH_LEN;
                    if self.psk_mode {
                        keyed = true;
                    }
                }
                Token::S => {
                    len += DH_LEN + if keyed { TAG_LEN } else { 0 };
                }
                Token::Ee | Token::Es | Token::Se | Token::Ss | Token::Psk => {
                    keyed = true;
                }
            }
        }
        len + payload_len + if keyed { TAG_LEN } else { 0 }
    }

    /// Process the next message pattern as the sender: emit the token
    /// fields, then the encrypted payload. Returns the complete message
    /// and, after the final pattern, the transport states.
    pub fn write_message(&mut self, payload: &[u8]) -> Result<(Vec<u8>, Option<TransportPair>)> {
        self.check_turn(true)?;

        let tokens = self.messages[self.index].clone();
        // checked before any token is processed so an oversized payload
        // leaves the transcript untouched and the same slot retryable
        if self.message_len(&tokens, payload.len()) > MSG_MAX_LEN {
            return Err(Error::Protocol(ProtocolError::MessageTooLong));
        }

        let mut message = Vec::with_capacity(payload.len() + TAG_LEN);
        for token in tokens {
            match token {
                Token::E => {
                    let e_pub = match &self.e {
                        Some(keypair) => keypair.public().to_bytes(),
                        None => {
                            let keypair = KeyPair::generate(get_rng());
                            let e_pub = keypair.public().to_bytes();
                            self.e = Some(keypair);
                            e_pub
                        }
                    };
                    message.extend_from_slice(&e_pub);
                    self.symmetric.mix_hash(&e_pub);
                    if self.psk_mode {
                        self.symmetric.mix_key(&e_pub);
                    }
                }
                Token::S => {
                    let s_pub = self
                        .s
                        .as_ref()
                        .ok_or(Error::Protocol(ProtocolError::MissingKey))?
                        .public()
                        .to_bytes();
                    let ciphertext = self.symmetric.encrypt_and_hash(&s_pub)?;
                    message.extend_from_slice(&ciphertext);
                }
                Token::Ee | Token::Es | Token::Se | Token::Ss => self.mix_dh(token)?,
                Token::Psk => self.mix_psk()?,
            }
        }

        let ciphertext = self.symmetric.encrypt_and_hash(payload)?;
        message.extend_from_slice(&ciphertext);

        self.index += 1;
        let transport = self.finish();
        Ok((message, transport))
    }

    /// Process the next message pattern as the receiver: consume the
    /// token fields, then decrypt the remaining bytes as the payload.
    pub fn read_message(&mut self, message: &[u8]) -> Result<(Vec<u8>, Option<TransportPair>)> {
        self.check_turn(false)?;
        if message.len() > MSG_MAX_LEN {
            return Err(Error::Protocol(ProtocolError::MessageTooLong));
        }

        let tokens = self.messages[self.index].clone();
        let mut rest = message;
        for token in tokens {
            match token {
                Token::E => {
                    let (bytes, tail) = take(rest, DH_LEN)?;
                    rest = tail;
                    let mut e_pub = [0u8; DH_LEN];
                    e_pub.copy_from_slice(bytes);
                    self.re = Some(PublicKey::from(e_pub));
                    self.symmetric.mix_hash(&e_pub);
                    if self.psk_mode {
                        self.symmetric.mix_key(&e_pub);
                    }
                }
                Token::S => {
                    let len = if self.symmetric.has_key() {
                        DH_LEN + TAG_LEN
                    } else {
                        DH_LEN
                    };
                    let (bytes, tail) = take(rest, len)?;
                    rest = tail;
                    let plaintext = self.symmetric.decrypt_and_hash(bytes)?;
                    let mut s_pub = [0u8; DH_LEN];
                    s_pub.copy_from_slice(&plaintext);
                    self.rs = Some(PublicKey::from(s_pub));
                }
                Token::Ee | Token::Es | Token::Se | Token::Ss => self.mix_dh(token)?,
                Token::Psk => self.mix_psk()?,
            }
        }

        if self.symmetric.has_key() && rest.len() < TAG_LEN {
            return Err(Error::Protocol(ProtocolError::ShortMessage));
        }
        let payload = self.symmetric.decrypt_and_hash(rest)?;

        self.index += 1;
        let transport = self.finish();
        Ok((payload, transport))
    }

    /// Perform the DH named by the token. `es` and `se` read as
    /// initiator-then-responder in the pattern language, so the two
    /// parties pair mirrored keys for the same token.
    fn mix_dh(&mut self, token: Token) -> Result<()> {
        let (local, remote) = match (token, self.role) {
            (Token::Ee, _) => (&self.e, &self.re),
            (Token::Ss, _) => (&self.s, &self.rs),
            (Token::Es, Role::Initiator) | (Token::Se, Role::Responder) => (&self.e, &self.rs),
            (Token::Es, Role::Responder) | (Token::Se, Role::Initiator) => (&self.s, &self.re),
            _ => return Err(Error::Protocol(ProtocolError::MissingKey)),
        };
        let local = local
            .as_ref()
            .ok_or(Error::Protocol(ProtocolError::MissingKey))?;
        let remote = remote
            .as_ref()
            .ok_or(Error::Protocol(ProtocolError::MissingKey))?;
        let shared = dh(local, remote)?;
        self.symmetric.mix_key(shared.as_bytes());
        Ok(())
    }

    fn mix_psk(&mut self) -> Result<()> {
        let psks = self
            .psks
            .ok_or(Error::Protocol(ProtocolError::MissingKey))?;
        let start = self.psk_index * PSK_LEN;
        let psk = psks
            .get(start..start + PSK_LEN)
            .ok_or(Error::Protocol(ProtocolError::MissingKey))?;
        self.psk_index += 1;
        self.symmetric.mix_key_and_hash(psk);
        Ok(())
    }

    fn finish(&mut self) -> Option<TransportPair> {
        if !self.is_finished() {
            return None;
        }
        let (c1, c2) = self.symmetric.split();
        Some(TransportPair::new(
            self.role,
            self.one_way,
            c1,
            c2,
            self.symmetric.handshake_hash(),
        ))
    }
}

fn take(input: &[u8], len: usize) -> Result<(&[u8], &[u8])> {
    if input.len() < len {
        return Err(Error::Protocol(ProtocolError::ShortMessage));
    }
    Ok(input.split_at(len))
}
