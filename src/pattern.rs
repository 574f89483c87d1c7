/*
    SPDX-License-Identifier: Apache-2.0
*/
use crate::error::{Error, ParamError};
use alloc::vec::Vec;
use core::{
    fmt::{Display, Error as FmtError, Formatter},
    str::FromStr,
};
use serde::{Deserialize, Serialize};

/// The tokens that make up handshake message patterns, see §7 of the Noise
/// specification. `E` and `S` transmit public keys, the two-letter tokens
/// perform the corresponding Diffie-Hellman operation, and `Psk` mixes the
/// next pre-shared key into the session.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Token {
    /// Transmit the local ephemeral public key
    E,
    /// Transmit the local static public key, encrypted once a key is set
    S,
    /// DH between both ephemeral keys
    Ee,
    /// DH between the initiator's ephemeral and the responder's static
    Es,
    /// DH between the initiator's static and the responder's ephemeral
    Se,
    /// DH between both static keys
    Ss,
    /// Mix the next pre-shared key
    Psk,
}

/// The two handshake roles
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Role {
    /// The party that sends the first handshake message
    Initiator,
    /// The party that receives the first handshake message
    Responder,
}

/// The base handshake patterns from §7.4 and §7.5 of the Noise
/// specification. One-way patterns are `N`, `K` and `X`; the rest are
/// interactive.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum BasePattern {
    N,
    K,
    X,
    NN,
    NK,
    NX,
    XN,
    XK,
    XX,
    KN,
    KK,
    KX,
    IN,
    IK,
    IX,
}

use Token::*;

impl BasePattern {
    /// Pre-message public keys for (initiator, responder)
    fn premessages(&self) -> (Option<Token>, Option<Token>) {
        use BasePattern::*;
        match self {
            N | X | NK | XK | IK => (None, Some(S)),
            K | KK => (Some(S), Some(S)),
            KN | KX => (Some(S), None),
            NN | NX | XN | XX | IN | IX => (None, None),
        }
    }

    /// The fixed message pattern table, message 0 written by the initiator
    fn message_tokens(&self) -> &'static [&'static [Token]] {
        use BasePattern::*;
        match self {
            N => &[&[E, Es]],
            K => &[&[E, Es, Ss]],
            X => &[&[E, Es, S, Ss]],
            NN => &[&[E], &[E, Ee]],
            NK => &[&[E, Es], &[E, Ee]],
            NX => &[&[E], &[E, Ee, S, Es]],
            XN => &[&[E], &[E, Ee], &[S, Se]],
            XK => &[&[E, Es], &[E, Ee], &[S, Se]],
            XX => &[&[E], &[E, Ee, S, Es], &[S, Se]],
            KN => &[&[E], &[E, Ee, Se]],
            KK => &[&[E, Es, Ss], &[E, Ee, Se]],
            KX => &[&[E], &[E, Ee, Se, S, Es]],
            IN => &[&[E, S], &[E, Ee, Se]],
            IK => &[&[E, Es, S, Ss], &[E, Ee, Se]],
            IX => &[&[E, S], &[E, Ee, Se, S, Es]],
        }
    }

    /// True for the patterns where only initiator→responder transport
    /// traffic is defined
    fn is_one_way(&self) -> bool {
        matches!(self, BasePattern::N | BasePattern::K | BasePattern::X)
    }
}

impl FromStr for BasePattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use BasePattern::*;
        match s {
            "N" => Ok(N),
            "K" => Ok(K),
            "X" => Ok(X),
            "NN" => Ok(NN),
            "NK" => Ok(NK),
            "NX" => Ok(NX),
            "XN" => Ok(XN),
            "XK" => Ok(XK),
            "XX" => Ok(XX),
            "KN" => Ok(KN),
            "KK" => Ok(KK),
            "KX" => Ok(KX),
            "IN" => Ok(IN),
            "IK" => Ok(IK),
            "IX" => Ok(IX),
            _ => Err(Error::Param(ParamError::UnknownPattern)),
        }
    }
}

impl Display for BasePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{:?}", self)
    }
}

/// A handshake pattern: the base pattern with any `psk` modifiers applied.
/// Message pattern 0 is written by the initiator, 1 by the responder, and
/// so on in strict alternation.
#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Pattern {
    base: BasePattern,
    psk_slots: Vec<usize>,
    pre_initiator: Option<Token>,
    pre_responder: Option<Token>,
    messages: Vec<Vec<Token>>,
}

impl Pattern {
    /// The pre-message public key the initiator contributes, if any
    pub fn pre_message_initiator(&self) -> Option<Token> {
        self.pre_initiator
    }

    /// The pre-message public key the responder contributes, if any
    pub fn pre_message_responder(&self) -> Option<Token> {
        self.pre_responder
    }

    /// The ordered message patterns with modifiers applied
    pub fn message_patterns(&self) -> &[Vec<Token>] {
        &self.messages
    }

    /// True if only initiator→responder transport traffic is defined
    pub fn is_one_way(&self) -> bool {
        self.base.is_one_way()
    }

    /// Number of pre-shared keys this pattern consumes
    pub fn psk_count(&self) -> usize {
        self.psk_slots.len()
    }

    /// True if the given role must supply a static keypair before the
    /// handshake: its own pre-message names `s`, one of its messages
    /// transmits `s`, or a DH token uses its static key.
    pub fn needs_local_static(&self, role: Role) -> bool {
        let pre = match role {
            Role::Initiator => self.pre_initiator,
            Role::Responder => self.pre_responder,
        };
        if pre == Some(S) {
            return true;
        }
        for (index, message) in self.messages.iter().enumerate() {
            let mine = (index % 2 == 0) == (role == Role::Initiator);
            for token in message {
                match token {
                    S if mine => return true,
                    Ss => return true,
                    Es if role == Role::Responder => return true,
                    Se if role == Role::Initiator => return true,
                    _ => {}
                }
            }
        }
        false
    }

    /// True if the given role must know the remote static public key
    /// before the handshake, i.e. the other side's pre-message names `s`
    pub fn needs_remote_static(&self, role: Role) -> bool {
        let pre = match role {
            Role::Initiator => self.pre_responder,
            Role::Responder => self.pre_initiator,
        };
        pre == Some(S)
    }
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // the base name is the leading run of uppercase letters, anything
        // after it must be a sequence of pskN modifiers
        let split = s
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(s.len());
        let base = BasePattern::from_str(&s[..split])?;

        let mut psk_slots = Vec::new();
        let mut modifiers = &s[split..];
        while !modifiers.is_empty() {
            modifiers = modifiers
                .strip_prefix("psk")
                .ok_or(ParamError::BadPatternModifier)?;
            let digits = modifiers
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(modifiers.len());
            let index: usize = modifiers[..digits]
                .parse()
                .map_err(|_| ParamError::BadPatternModifier)?;
            psk_slots.push(index);
            modifiers = &modifiers[digits..];
        }

        let (pre_initiator, pre_responder) = base.premessages();
        let mut messages: Vec<Vec<Token>> = base
            .message_tokens()
            .iter()
            .map(|tokens| tokens.to_vec())
            .collect();

        // psk0 goes at the front of the first message, pskN at the end of
        // the Nth message
        for &index in &psk_slots {
            if index == 0 {
                messages[0].insert(0, Psk);
            } else if index <= messages.len() {
                messages[index - 1].push(Psk);
            } else {
                return Err(Error::Param(ParamError::BadPatternModifier));
            }
        }

        Ok(Pattern {
            base,
            psk_slots,
            pre_initiator,
            pre_responder,
            messages,
        })
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.base)?;
        for slot in &self.psk_slots {
            write!(f, "psk{}", slot)?;
        }
        Ok(())
    }
}
