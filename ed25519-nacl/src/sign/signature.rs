use crate::{CompressedEdwardsY, Scalar, SigningError};

pub use ed25519::Signature;

/// The halves of a signature as this crate works with them: the
/// compressed nonce commitment R and the canonical scalar S.
///
/// R is deliberately kept in compressed form. Verification compares
/// the recomputed point's encoding against these exact bytes, so R is
/// never decompressed and a non-canonical R encoding can never verify.
pub(crate) struct InnerSignature {
    pub(crate) r: CompressedEdwardsY,
    pub(crate) s: Scalar,
}

impl From<InnerSignature> for Signature {
    fn from(inner: InnerSignature) -> Self {
        Self::from_components(inner.r.to_bytes(), inner.s.to_bytes())
    }
}

impl TryFrom<&Signature> for InnerSignature {
    type Error = SigningError;

    fn try_from(signature: &Signature) -> Result<Self, Self::Error> {
        let s = Option::from(Scalar::from_canonical_bytes(*signature.s_bytes()))
            .ok_or(SigningError::InvalidSignatureSComponent)?;
        let r = CompressedEdwardsY(*signature.r_bytes());
        Ok(Self { r, s })
    }
}
