use core::fmt::{self, Debug, Formatter};

use crypto_signature::Error;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::CompressedEdwardsY;
use crate::sign::expanded::{ExpandedSecretKey, SharedSecret};
use crate::sign::signature::Signature;
use crate::sign::verifying_key::VerifyingKey;
use crate::sign::{EXPANDED_SECRET_KEY_LENGTH, SecretKey, SigningError};

/// An Ed25519 signing key: an expanded secret key together with its
/// verifying key, so that signing does not recompute the public point.
#[derive(Clone)]
pub struct SigningKey {
    pub(crate) secret: ExpandedSecretKey,
    pub(crate) verifying_key: VerifyingKey,
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Zeroize for SigningKey {
    fn zeroize(&mut self) {
        self.secret.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret.ct_eq(&other.secret)
    }
}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for SigningKey {}

impl From<&SecretKey> for SigningKey {
    fn from(seed: &SecretKey) -> Self {
        Self::from_seed(seed)
    }
}

impl From<ExpandedSecretKey> for SigningKey {
    fn from(secret: ExpandedSecretKey) -> Self {
        let verifying_key = secret.verifying_key();
        Self {
            secret,
            verifying_key,
        }
    }
}

impl TryFrom<&[u8]> for SigningKey {
    type Error = SigningError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let seed: &SecretKey = value.try_into().map_err(|_| SigningError::InvalidLength)?;
        Ok(Self::from_seed(seed))
    }
}

impl crypto_signature::Signer<Signature> for SigningKey {
    fn try_sign(&self, message: &[u8]) -> Result<Signature, Error> {
        Ok(self.sign(message))
    }
}

impl SigningKey {
    /// Derive the keypair from a 32-byte seed.
    pub fn from_seed(seed: &SecretKey) -> Self {
        ExpandedSecretKey::from_seed(seed).into()
    }

    /// Reconstruct a signing key from a 64-byte expanded secret key.
    pub fn from_expanded_bytes(bytes: &[u8; EXPANDED_SECRET_KEY_LENGTH]) -> Self {
        ExpandedSecretKey::from_bytes(bytes).into()
    }

    /// Generate a fresh signing key from the given CSPRNG.
    #[cfg(feature = "rand_core")]
    pub fn generate<R: rand_core::CryptoRngCore + ?Sized>(csprng: &mut R) -> Self {
        let mut seed = SecretKey::default();
        csprng.fill_bytes(&mut seed);
        let key = Self::from_seed(&seed);
        seed.zeroize();
        key
    }

    /// The verifying key for this signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Borrow the expanded secret key.
    pub fn as_expanded(&self) -> &ExpandedSecretKey {
        &self.secret
    }

    /// Serialize the expanded secret key.
    pub fn to_expanded_bytes(&self) -> [u8; EXPANDED_SECRET_KEY_LENGTH] {
        self.secret.to_bytes()
    }

    /// Sign a message. Deterministic: the same key and message always
    /// produce the same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.secret
            .sign_with_verifying_key(message, &self.verifying_key)
    }

    /// Derive the blinded signing key for the given factor and nonce
    /// label; see [`ExpandedSecretKey::blind`]. The blinded verifying
    /// key matches [`VerifyingKey::blind`] with the same factor.
    pub fn blind(&self, blinding_factor: &[u8; 32], prefix_label: &[u8]) -> Self {
        self.secret.blind(blinding_factor, prefix_label).into()
    }

    /// Key exchange against a peer's Ed25519 public key encoding; see
    /// [`ExpandedSecretKey::key_exchange`].
    pub fn key_exchange(&self, their_public: &CompressedEdwardsY) -> SharedSecret {
        self.secret.key_exchange(their_public)
    }
}
