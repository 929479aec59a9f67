//! RFC 8032 §7.1 test vectors and signature-level edge cases.

use ed25519_nacl::{
    ExpandedSecretKey, Signature, SigningError, SigningKey, VerifyingKey,
    crypto_signature::{Signer, Verifier},
};
use hex_literal::hex;

struct Ed25519TestVector<'a> {
    seed: [u8; 32],
    public: [u8; 32],
    message: &'a [u8],
    sig: [u8; 64],
}

const TEST_VECTORS: [Ed25519TestVector; 3] = [
    // Empty message.
    Ed25519TestVector {
        seed: hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"),
        public: hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"),
        message: b"",
        sig: hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
            "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        ),
    },
    // One byte.
    Ed25519TestVector {
        seed: hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb"),
        public: hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"),
        message: &[0x72],
        sig: hex!(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da"
            "085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
        ),
    },
    // Two bytes.
    Ed25519TestVector {
        seed: hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7"),
        public: hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025"),
        message: &[0xaf, 0x82],
        sig: hex!(
            "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac"
            "18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
        ),
    },
];

#[test]
fn signatures_match_vectors() {
    for tv in TEST_VECTORS.iter() {
        let signing_key = SigningKey::from_seed(&tv.seed);
        assert_eq!(signing_key.verifying_key().to_bytes(), tv.public);

        let sig = signing_key.sign(tv.message);
        assert_eq!(sig.to_bytes(), tv.sig);

        let verifying_key = VerifyingKey::from_bytes(&tv.public).unwrap();
        assert!(verifying_key.verify_raw(&sig, tv.message).is_ok());

        // The Signer/Verifier trait surface agrees with the inherent one.
        let sig2: Signature = signing_key.try_sign(tv.message).unwrap();
        assert_eq!(sig2.to_bytes(), tv.sig);
        assert!(verifying_key.verify(tv.message, &sig2).is_ok());
    }
}

#[test]
fn long_message_vector() {
    // 1023 bytes of 0, 1, ..., 255, 0, 1, ...
    let message: Vec<u8> = (0..1023u32).map(|i| (i & 0xff) as u8).collect();
    let seed = TEST_VECTORS[0].seed;
    let expected = hex!(
        "b93e46579f1927147d2c4945080077fb5210281fc0ee0463b04d7cd0f08d74c0"
        "64c8674f5d4b4d92d1b98916bbbd38f5cf1af719d832e4642d008b7e6d748d0d"
    );

    let signing_key = SigningKey::from_seed(&seed);
    let sig = signing_key.sign(&message);
    assert_eq!(sig.to_bytes(), expected);
    assert!(
        signing_key
            .verifying_key()
            .verify_raw(&sig, &message)
            .is_ok()
    );
}

#[test]
fn expansion_is_deterministic() {
    let seed = TEST_VECTORS[0].seed;
    let expected_expanded = hex!(
        "307c83864f2833cb427a2ef1c00a013cfdff2768d980c0a3a520f006904de94f"
        "9b4f0afe280b746a778684e75442502057b7473a03f08f96f5a38e9287e01f8f"
    );

    let a = SigningKey::from_seed(&seed);
    let b = SigningKey::from_seed(&seed);
    assert_eq!(a.to_expanded_bytes(), expected_expanded);
    assert_eq!(a.to_expanded_bytes(), b.to_expanded_bytes());
    assert_eq!(a.verifying_key(), b.verifying_key());

    // Round-trip through the 64-byte form.
    let c = SigningKey::from_expanded_bytes(&a.to_expanded_bytes());
    assert_eq!(c.to_expanded_bytes(), expected_expanded);
    assert_eq!(c.sign(b"abc").to_bytes(), a.sign(b"abc").to_bytes());
}

#[test]
fn expanded_key_signs_identically() {
    // The public-key-recomputing path and the cached-key path agree.
    for tv in TEST_VECTORS.iter() {
        let expanded = ExpandedSecretKey::from_seed(&tv.seed);
        assert_eq!(expanded.sign(tv.message).to_bytes(), tv.sig);

        let vk = expanded.verifying_key();
        assert_eq!(
            expanded
                .sign_with_verifying_key(tv.message, &vk)
                .to_bytes(),
            tv.sig
        );
    }
}

#[test]
fn bit_flips_are_rejected() {
    let tv = &TEST_VECTORS[2];
    let signing_key = SigningKey::from_seed(&tv.seed);
    let verifying_key = signing_key.verifying_key();
    let sig = signing_key.sign(tv.message);

    // Flip each bit of the message.
    for byte in 0..tv.message.len() {
        for bit in 0..8 {
            let mut message = tv.message.to_vec();
            message[byte] ^= 1 << bit;
            assert!(verifying_key.verify_raw(&sig, &message).is_err());
        }
    }

    // Flip one bit in each byte of the signature.
    let sig_bytes = sig.to_bytes();
    for byte in 0..64 {
        let mut mangled = sig_bytes;
        mangled[byte] ^= 0x04;
        let mangled = Signature::from_bytes(&mangled);
        assert!(verifying_key.verify_raw(&mangled, tv.message).is_err());
    }

    // Flip a bit in the public key: it either stops decoding or stops
    // verifying.
    for byte in 0..32 {
        let mut pk = tv.public;
        pk[byte] ^= 0x04;
        match VerifyingKey::from_bytes(&pk) {
            Ok(vk) => assert!(vk.verify_raw(&sig, tv.message).is_err()),
            Err(e) => assert_eq!(e, SigningError::InvalidPublicKeyBytes),
        }
    }
}

#[test]
fn non_canonical_s_is_rejected() {
    // Add the group order to S: the same equation holds over the
    // integers, so acceptance would mean signature malleability.
    let tv = &TEST_VECTORS[0];
    let signing_key = SigningKey::from_seed(&tv.seed);
    let verifying_key = signing_key.verifying_key();

    let mut mangled = signing_key.sign(tv.message).to_bytes();
    mangled[32..].copy_from_slice(&hex!(
        "4c8c7872aa064e049dbb3013fbf29380d25bf5f0595bbe24655141438e7a101b"
    ));
    let mangled = Signature::from_bytes(&mangled);
    assert_eq!(
        verifying_key.verify_raw(&mangled, tv.message),
        Err(SigningError::InvalidSignatureSComponent)
    );
}

#[test]
fn wrong_lengths_are_shape_errors() {
    assert_eq!(
        VerifyingKey::try_from(&[0u8; 31][..]),
        Err(SigningError::InvalidLength)
    );
    assert_eq!(
        VerifyingKey::try_from(&[0u8; 33][..]),
        Err(SigningError::InvalidLength)
    );
    assert!(SigningKey::try_from(&[0u8; 16][..]).is_err());
    assert!(Signature::try_from(&[0u8; 63][..]).is_err());
}

#[test]
fn off_curve_public_keys_fail_to_decode() {
    // y = 2 has no corresponding x.
    let mut bytes = [0u8; 32];
    bytes[0] = 2;
    assert_eq!(
        VerifyingKey::from_bytes(&bytes),
        Err(SigningError::InvalidPublicKeyBytes)
    );
}
