//! Generative properties over random seeds, messages and raw bytes.

use ed25519_nacl::{CompressedEdwardsY, EdwardsPoint, Scalar, SigningKey, VerifyingKey};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sign_verify_roundtrip(seed in any::<[u8; 32]>(), message in proptest::collection::vec(any::<u8>(), 0..256)) {
        let signing_key = SigningKey::from_seed(&seed);
        let sig = signing_key.sign(&message);
        prop_assert!(signing_key.verifying_key().verify_raw(&sig, &message).is_ok());
    }

    #[test]
    fn tampered_message_fails(seed in any::<[u8; 32]>(), message in proptest::collection::vec(any::<u8>(), 1..256), index in any::<prop::sample::Index>()) {
        let signing_key = SigningKey::from_seed(&seed);
        let sig = signing_key.sign(&message);

        let mut tampered = message.clone();
        let i = index.index(tampered.len());
        tampered[i] ^= 0x01;
        prop_assert!(signing_key.verifying_key().verify_raw(&sig, &tampered).is_err());
    }

    #[test]
    fn decompression_is_total(bytes in any::<[u8; 32]>()) {
        // Any 32 bytes either decode to an on-curve point or fail
        // cleanly; no input may panic.
        match VerifyingKey::from_bytes(&bytes) {
            Ok(vk) => {
                // Decompression inverts compression of the decoded point,
                // up to the non-canonical encodings of y.
                let reencoded = vk.to_edwards().compress();
                let reopened = Option::<EdwardsPoint>::from(reencoded.decompress()).unwrap();
                prop_assert_eq!(reopened.compress(), reencoded);
            }
            Err(_) => {}
        }
    }

    #[test]
    fn derived_keys_roundtrip_compression(seed in any::<[u8; 32]>()) {
        let vk = SigningKey::from_seed(&seed).verifying_key();
        let point = Option::<EdwardsPoint>::from(
            CompressedEdwardsY(vk.to_bytes()).decompress(),
        ).unwrap();
        prop_assert_eq!(point.compress().to_bytes(), vk.to_bytes());
    }

    #[test]
    fn key_exchange_is_total(seed in any::<[u8; 32]>(), peer in any::<[u8; 32]>()) {
        // The exchange reads unvalidated peer bytes and must never panic.
        let shared = SigningKey::from_seed(&seed).key_exchange(&CompressedEdwardsY(peer));
        prop_assert_eq!(shared.as_bytes().len(), 32);
    }

    #[test]
    fn scalar_muladd_commutes_in_product(a in any::<[u8; 32]>(), b in any::<[u8; 32]>(), c in any::<[u8; 32]>()) {
        let (a, b) = (Scalar::from_bytes_mod_order(a), Scalar::from_bytes_mod_order(b));
        let c = Scalar::from_bytes_mod_order(c);
        prop_assert_eq!(Scalar::muladd(&a, &b, &c), Scalar::muladd(&b, &a, &c));
    }

    #[test]
    fn scalar_reduction_is_idempotent(bytes in any::<[u8; 32]>()) {
        let once = Scalar::from_bytes_mod_order(bytes);
        let twice = Scalar::from_bytes_mod_order(once.to_bytes());
        prop_assert_eq!(once, twice);

        // A reduced scalar is canonical.
        prop_assert!(bool::from(Scalar::from_canonical_bytes(once.to_bytes()).is_some()));
    }

    #[test]
    fn wide_reduction_agrees_with_narrow(bytes in any::<[u8; 32]>()) {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&bytes);
        prop_assert_eq!(
            Scalar::from_bytes_mod_order_wide(&wide),
            Scalar::from_bytes_mod_order(bytes)
        );
    }

    #[test]
    fn blinding_consistency(seed in any::<[u8; 32]>(), factor in any::<[u8; 32]>(), label in proptest::collection::vec(any::<u8>(), 0..64)) {
        let signing_key = SigningKey::from_seed(&seed);
        let blinded_secret = signing_key.blind(&factor, &label);
        let blinded_public = signing_key.verifying_key().blind(&factor);
        prop_assert_eq!(blinded_secret.verifying_key(), blinded_public);

        let sig = blinded_secret.sign(b"property");
        prop_assert!(blinded_public.verify_raw(&sig, b"property").is_ok());
    }
}
