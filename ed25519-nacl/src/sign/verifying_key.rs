use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};

use crypto_signature::Error;
use sha2::{Digest, Sha512};

use crate::montgomery::MontgomeryPoint;
use crate::sign::expanded::digest64;
use crate::sign::signature::{InnerSignature, Signature};
use crate::sign::{PUBLIC_KEY_LENGTH, SigningError};
use crate::{CompressedEdwardsY, EdwardsPoint, Scalar};

/// An Ed25519 public key, held both compressed and as the decoded
/// curve point.
///
/// Construction validates the encoding, so a value of this type always
/// names a point on the curve. Untrusted bytes that fail to decode are
/// reported as [`SigningError::InvalidPublicKeyBytes`], never a panic.
#[derive(Copy, Clone, Eq)]
pub struct VerifyingKey {
    pub(crate) compressed: CompressedEdwardsY,
    pub(crate) point: EdwardsPoint,
}

impl Debug for VerifyingKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "VerifyingKey({:?})", self.compressed)
    }
}

impl AsRef<[u8]> for VerifyingKey {
    fn as_ref(&self) -> &[u8] {
        self.compressed.as_bytes()
    }
}

impl Hash for VerifyingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.compressed.as_bytes().hash(state);
    }
}

impl PartialEq for VerifyingKey {
    fn eq(&self, other: &Self) -> bool {
        self.compressed.as_bytes() == other.compressed.as_bytes()
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = SigningError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] =
            value.try_into().map_err(|_| SigningError::InvalidLength)?;
        Self::from_bytes(bytes)
    }
}

impl From<&VerifyingKey> for CompressedEdwardsY {
    fn from(key: &VerifyingKey) -> Self {
        key.compressed
    }
}

impl crypto_signature::Verifier<Signature> for VerifyingKey {
    fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), Error> {
        self.verify_raw(signature, message).map_err(Into::into)
    }
}

impl VerifyingKey {
    /// Decode a public key, validating that it names a curve point.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, SigningError> {
        let compressed = CompressedEdwardsY(*bytes);
        let point = Option::<EdwardsPoint>::from(compressed.decompress())
            .ok_or(SigningError::InvalidPublicKeyBytes)?;
        Ok(Self { compressed, point })
    }

    /// The canonical byte encoding of this key.
    ///
    /// For keys decoded from a non-canonical y encoding this returns
    /// the bytes as received, because signatures hash the encoding the
    /// peer distributed, not a normalized one.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Copy the byte encoding.
    pub const fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.compressed.to_bytes()
    }

    /// The compressed form.
    pub const fn as_compressed(&self) -> &CompressedEdwardsY {
        &self.compressed
    }

    /// The decoded curve point.
    pub fn to_edwards(&self) -> EdwardsPoint {
        self.point
    }

    /// Verify a signature over a message.
    ///
    /// The checks, in order: S must be a canonical scalar below the
    /// group order (small-malleability rejection); then with
    /// `k = H(R || A || M)` the recomputed commitment
    /// `R' = S*B - k*A` must re-encode to exactly the R bytes of the
    /// signature. R itself is never decompressed.
    ///
    /// Runs in variable time: key, message and signature are public.
    pub fn verify_raw(&self, signature: &Signature, message: &[u8]) -> Result<(), SigningError> {
        let InnerSignature { r, s } = InnerSignature::try_from(signature)?;

        let mut h = Sha512::new();
        h.update(r.as_bytes());
        h.update(self.compressed.as_bytes());
        h.update(message);
        let k = Scalar::from_bytes_mod_order_wide(&digest64(h));

        let minus_a = -&self.point;
        let r_prime = EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_a, &s);

        if r_prime.compress() == r {
            Ok(())
        } else {
            Err(SigningError::Verify)
        }
    }

    /// Multiply this key by a blinding factor.
    ///
    /// Computed as `factor * A + 0 * B` through the double-base
    /// multiplication, since no single-point primitive is exposed; the
    /// zero basepoint term is a no-op. Together with
    /// [`ExpandedSecretKey::blind`][crate::ExpandedSecretKey::blind]
    /// this yields a keypair unlinkable to the original, whose
    /// signatures verify under this output.
    ///
    /// Runs in variable time; the factor is treated as public here.
    pub fn blind(&self, blinding_factor: &[u8; 32]) -> VerifyingKey {
        // Reduce the factor first: the recoding behind the double-base
        // multiplication needs a 255-bit scalar, and b*A == (b mod ℓ)*A
        // for every prime-order A.
        let factor = Scalar::from_bytes_mod_order(*blinding_factor);
        let point =
            EdwardsPoint::vartime_double_scalar_mul_basepoint(&factor, &self.point, &Scalar::ZERO);

        VerifyingKey {
            compressed: point.compress(),
            point,
        }
    }

    /// The Montgomery u-coordinate of this key, for the key-exchange
    /// path.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        self.point.to_montgomery()
    }

    /// Build an Ed25519 public key from an X25519 public key and the
    /// sign of x that the Montgomery form dropped.
    ///
    /// Applies `y = (u-1)/(u+1)` and validates the result; a u that
    /// does not correspond to a curve point is rejected. To obtain the
    /// raw unvalidated encoding, use [`MontgomeryPoint::to_edwards_y`].
    pub fn from_montgomery(u: &MontgomeryPoint, sign: u8) -> Result<Self, SigningError> {
        Self::from_bytes(&u.to_edwards_y(sign).to_bytes())
    }
}
