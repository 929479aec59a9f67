use core::fmt::{self, Debug, Formatter};

use sha2::{Digest, Sha512};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::sign::signature::{InnerSignature, Signature};
use crate::sign::verifying_key::VerifyingKey;
use crate::sign::{EXPANDED_SECRET_KEY_LENGTH, SHARED_KEY_LENGTH, SecretKey};
use crate::{CompressedEdwardsY, EdwardsPoint, Scalar};

/// An expanded Ed25519 secret key: the clamped signing scalar and the
/// 32-byte prefix mixed into every per-message nonce.
///
/// Produced by hashing a seed, or deserialized from the 64-byte form.
/// The serialized form round-trips exactly: a clamped scalar is larger
/// than the group order and is stored unreduced.
#[derive(Clone)]
pub struct ExpandedSecretKey {
    pub(crate) scalar: Scalar,
    pub(crate) hash_prefix: [u8; 32],
}

impl Debug for ExpandedSecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandedSecretKey").finish_non_exhaustive()
    }
}

impl Zeroize for ExpandedSecretKey {
    fn zeroize(&mut self) {
        self.scalar.zeroize();
        self.hash_prefix.zeroize();
    }
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for ExpandedSecretKey {}

impl ConstantTimeEq for ExpandedSecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.scalar.ct_eq(&other.scalar) & self.hash_prefix.ct_eq(&other.hash_prefix)
    }
}

impl From<&SecretKey> for ExpandedSecretKey {
    fn from(seed: &SecretKey) -> Self {
        Self::from_seed(seed)
    }
}

impl ExpandedSecretKey {
    /// Expand a 32-byte seed: `h = SHA-512(seed)`, clamp the first half
    /// into the signing scalar, keep the second half as the nonce prefix.
    pub fn from_seed(seed: &SecretKey) -> Self {
        let mut h = [0u8; 64];
        h.copy_from_slice(&Sha512::digest(seed));

        let mut scalar_bytes = [0u8; 32];
        scalar_bytes.copy_from_slice(&h[..32]);
        let scalar = Scalar::from_bits(Scalar::clamp_integer(scalar_bytes));

        let mut hash_prefix = [0u8; 32];
        hash_prefix.copy_from_slice(&h[32..]);

        h.zeroize();
        scalar_bytes.zeroize();

        Self {
            scalar,
            hash_prefix,
        }
    }

    /// Reconstruct an expanded key from its 64-byte serialization.
    ///
    /// No clamping is applied: the bytes are trusted to already be an
    /// expanded key (from [`from_seed`][Self::from_seed] or from
    /// blinding, whose scalars are reduced rather than clamped).
    pub fn from_bytes(bytes: &[u8; EXPANDED_SECRET_KEY_LENGTH]) -> Self {
        let mut scalar_bytes = [0u8; 32];
        scalar_bytes.copy_from_slice(&bytes[..32]);
        let mut hash_prefix = [0u8; 32];
        hash_prefix.copy_from_slice(&bytes[32..]);

        let scalar = Scalar::from_bits(scalar_bytes);
        scalar_bytes.zeroize();

        Self {
            scalar,
            hash_prefix,
        }
    }

    /// Serialize: scalar bytes followed by the nonce prefix.
    pub fn to_bytes(&self) -> [u8; EXPANDED_SECRET_KEY_LENGTH] {
        let mut bytes = [0u8; EXPANDED_SECRET_KEY_LENGTH];
        bytes[..32].copy_from_slice(self.scalar.as_bytes());
        bytes[32..].copy_from_slice(&self.hash_prefix);
        bytes
    }

    /// Derive the verifying key by a fixed-base multiplication.
    pub fn verifying_key(&self) -> VerifyingKey {
        let point = EdwardsPoint::mul_base(&self.scalar);
        VerifyingKey {
            compressed: point.compress(),
            point,
        }
    }

    /// Sign a message, re-deriving the public key internally.
    ///
    /// When the caller already holds the verifying key,
    /// [`sign_with_verifying_key`][Self::sign_with_verifying_key]
    /// skips the redundant fixed-base multiplication and produces the
    /// identical signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let verifying_key = self.verifying_key();
        self.sign_with_verifying_key(message, &verifying_key)
    }

    /// Sign a message against a caller-supplied verifying key.
    ///
    /// The key must belong to this secret; it only feeds the challenge
    /// hash, so passing a mismatched key yields a signature that no key
    /// verifies.
    pub fn sign_with_verifying_key(
        &self,
        message: &[u8],
        verifying_key: &VerifyingKey,
    ) -> Signature {
        // r = H(prefix || M), reduced mod the group order
        let mut h = Sha512::new();
        h.update(self.hash_prefix);
        h.update(message);
        let r = Scalar::from_bytes_mod_order_wide(&digest64(h));

        // R = r*B
        let big_r = EdwardsPoint::mul_base(&r).compress();

        // k = H(R || A || M)
        let mut h = Sha512::new();
        h.update(big_r.as_bytes());
        h.update(verifying_key.as_bytes());
        h.update(message);
        let k = Scalar::from_bytes_mod_order_wide(&digest64(h));

        // S = k*a + r
        let s = Scalar::muladd(&k, &self.scalar, &r);

        InnerSignature { r: big_r, s }.into()
    }

    /// Derive a blinded secret key.
    ///
    /// The new scalar is `blinding_factor * scalar (mod ℓ)`; the new
    /// nonce prefix is `SHA-512(prefix_label || prefix)[..32]`, so the
    /// blinded key signs deterministically without exposing the
    /// original prefix. Verification under the matching
    /// [`VerifyingKey::blind`] output succeeds for any label.
    pub fn blind(&self, blinding_factor: &[u8; 32], prefix_label: &[u8]) -> Self {
        let factor = Scalar::from_bits(*blinding_factor);
        let scalar = Scalar::muladd(&self.scalar, &factor, &Scalar::ZERO);

        let mut h = Sha512::new();
        h.update(prefix_label);
        h.update(self.hash_prefix);
        let digest = digest64(h);

        let mut hash_prefix = [0u8; 32];
        hash_prefix.copy_from_slice(&digest[..32]);

        Self {
            scalar,
            hash_prefix,
        }
    }

    /// Diffie-Hellman-style key exchange against an Ed25519 public key.
    ///
    /// The peer key is converted to its Montgomery u-coordinate, the
    /// exchange scalar is `clamp(SHA-512(scalar_bytes)[..32])` — hashed
    /// from the signing scalar's raw bytes, not equal to it — and the
    /// ladder output is run through the HSalsa20 key-derivation step of
    /// the NaCl box construction.
    ///
    /// Only the y-coordinate of the peer key is read; the bytes are not
    /// validated as a curve point. This construction is experimental
    /// and kept bit-compatible with existing deployments rather than
    /// redesigned.
    pub fn key_exchange(&self, their_public: &CompressedEdwardsY) -> SharedSecret {
        let mut h = [0u8; 64];
        h.copy_from_slice(&Sha512::digest(self.scalar.as_bytes()));
        let mut e = [0u8; 32];
        e.copy_from_slice(&h[..32]);

        let u = their_public.to_montgomery();
        let mut shared = u.mul_clamped(e).to_bytes();

        h.zeroize();
        e.zeroize();

        let out = SharedSecret(kdf_nacl(&shared));
        shared.zeroize();
        out
    }
}

/// A 32-byte shared key produced by the key exchange. Wiped on drop.
#[derive(Clone)]
pub struct SharedSecret(pub(crate) [u8; SHARED_KEY_LENGTH]);

impl Debug for SharedSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

impl Zeroize for SharedSecret {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SharedSecret {}

impl SharedSecret {
    /// View the shared key.
    pub fn as_bytes(&self) -> &[u8; SHARED_KEY_LENGTH] {
        &self.0
    }

    /// Copy the shared key.
    pub fn to_bytes(&self) -> [u8; SHARED_KEY_LENGTH] {
        self.0
    }
}

/// The NaCl box key-derivation finalization: HSalsa20 keyed with the
/// raw ladder output on an all-zero input block.
fn kdf_nacl(shared: &[u8; 32]) -> [u8; 32] {
    use salsa20::cipher::consts::U10;

    let hashed = salsa20::hsalsa::<U10>(shared.into(), &[0u8; 16].into());

    let mut out = [0u8; 32];
    out.copy_from_slice(&hashed);
    out
}

/// Drain a SHA-512 state into a fixed array.
pub(crate) fn digest64(h: Sha512) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&h.finalize());
    out
}
