#![allow(dead_code)]
use noise_rs::{
    builder::Builder,
    dh::KeyPair,
    handshake::HandshakeState,
    params::Params,
    transport::TransportPair,
};
use rand::rngs::OsRng;

/// Fixed pre-shared keys for the psk-modified patterns, 32 bytes per
/// psk token in pattern order.
pub fn test_psks(count: usize) -> Vec<u8> {
    let mut psks = Vec::with_capacity(count * 32);
    for i in 0..count {
        psks.extend_from_slice(&[0x20 + i as u8; 32]);
    }
    psks
}

/// Key material both parties agree on before the handshake starts.
pub struct TestKeys {
    pub init_static: KeyPair,
    pub resp_static: KeyPair,
    pub psks: Vec<u8>,
}

impl TestKeys {
    pub fn generate(params: &Params) -> Self {
        TestKeys {
            init_static: KeyPair::generate(OsRng),
            resp_static: KeyPair::generate(OsRng),
            psks: test_psks(params.handshake.psk_count()),
        }
    }
}

/// Build both parties for the named protocol. Every pattern in the base
/// set at most needs the local static plus the peer's static known up
/// front, so both are always supplied; patterns that do not use them
/// simply never touch them.
pub fn build_pair<'a>(
    params: &Params,
    keys: &'a TestKeys,
    prologue: &'a [u8],
) -> (HandshakeState<'a>, HandshakeState<'a>) {
    let initiator = Builder::new(params.clone())
        .prologue(prologue)
        .local_static_keypair(keys.init_static.clone())
        .remote_static_public_key(*keys.resp_static.public())
        .pre_shared_keys(&keys.psks)
        .build_initiator()
        .expect("failed to build initiator");

    let responder = Builder::new(params.clone())
        .prologue(prologue)
        .local_static_keypair(keys.resp_static.clone())
        .remote_static_public_key(*keys.init_static.public())
        .pre_shared_keys(&keys.psks)
        .build_responder()
        .expect("failed to build responder");

    (initiator, responder)
}

/// Drive the full handshake in lock-step with a distinct payload per
/// message, asserting that every payload round-trips, and return the two
/// transport pairs (initiator's first).
pub fn run_handshake<'a>(
    initiator: &mut HandshakeState<'a>,
    responder: &mut HandshakeState<'a>,
) -> (TransportPair, TransportPair) {
    let mut init_transport = None;
    let mut resp_transport = None;
    let mut message_index = 0u8;

    while init_transport.is_none() || resp_transport.is_none() {
        let (writer, reader, writer_transport, reader_transport) = if message_index % 2 == 0 {
            (
                &mut *initiator,
                &mut *responder,
                &mut init_transport,
                &mut resp_transport,
            )
        } else {
            (
                &mut *responder,
                &mut *initiator,
                &mut resp_transport,
                &mut init_transport,
            )
        };

        let payload = vec![message_index; 3 + message_index as usize];
        let (message, sent) = writer
            .write_message(&payload)
            .expect("failed to write handshake message");
        let (received, got) = reader
            .read_message(&message)
            .expect("failed to read handshake message");
        assert_eq!(received, payload);

        *writer_transport = sent;
        *reader_transport = got;
        message_index += 1;
    }

    (
        init_transport.expect("initiator never finished"),
        resp_transport.expect("responder never finished"),
    )
}

/// Full interactive exercise of one suite: handshake, handshake-hash
/// agreement, then transport traffic both ways.
pub fn check_interactive(name: &str, prologue: &[u8]) {
    let params: Params = name.parse().expect("failed to parse protocol name");
    let keys = TestKeys::generate(&params);
    let (mut initiator, mut responder) = build_pair(&params, &keys, prologue);

    let (mut init_t, mut resp_t) = run_handshake(&mut initiator, &mut responder);
    assert_eq!(init_t.handshake_hash(), resp_t.handshake_hash());

    for round in 0u8..4 {
        let payload = vec![round; 24];
        let ciphertext = init_t.send_message(&payload).unwrap();
        assert_eq!(ciphertext.len(), payload.len() + 16);
        assert_eq!(resp_t.recv_message(&ciphertext).unwrap(), payload);

        let payload = vec![round ^ 0xff; 9];
        let ciphertext = resp_t.send_message(&payload).unwrap();
        assert_eq!(init_t.recv_message(&ciphertext).unwrap(), payload);
    }
}

/// Full one-way exercise: single handshake message, then five transport
/// messages initiator→responder with monotonically increasing nonces.
pub fn check_one_way(name: &str, prologue: &[u8]) {
    let params: Params = name.parse().expect("failed to parse protocol name");
    let keys = TestKeys::generate(&params);
    let (mut initiator, mut responder) = build_pair(&params, &keys, prologue);

    let payload = b"one way handshake payload";
    let (message, init_t) = initiator.write_message(payload).unwrap();
    let (received, resp_t) = responder.read_message(&message).unwrap();
    assert_eq!(&received, payload);

    let mut init_t = init_t.expect("one-way handshake must finish in one message");
    let mut resp_t = resp_t.expect("one-way handshake must finish in one message");
    assert_eq!(init_t.handshake_hash(), resp_t.handshake_hash());

    for round in 0u8..5 {
        let payload = vec![round; 16 + round as usize];
        let ciphertext = init_t.send_message(&payload).unwrap();
        assert_eq!(resp_t.recv_message(&ciphertext).unwrap(), payload);
    }

    // the reverse direction does not exist for one-way patterns
    assert!(resp_t.send_message(b"nope").is_err());
    assert!(init_t.recv_message(b"nope").is_err());
}
