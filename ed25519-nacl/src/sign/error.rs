use core::fmt::{self, Display, Formatter};

#[cfg(feature = "std")]
use std::error::Error;

/// Signing errors.
///
/// Everything here is a protocol-data failure or a caller shape error;
/// adversarial input is reported through these values and never panics.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SigningError {
    /// Public key bytes do not decode to a curve point
    InvalidPublicKeyBytes,
    /// Signature S component is not a canonical scalar
    InvalidSignatureSComponent,
    /// A byte slice had the wrong length for the expected key or signature
    InvalidLength,
    /// Signature verification failed
    Verify,
}

impl Display for SigningError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SigningError::InvalidPublicKeyBytes => write!(f, "public key bytes are invalid"),
            SigningError::InvalidSignatureSComponent => {
                write!(f, "signature S component is invalid")
            }
            SigningError::InvalidLength => write!(f, "invalid length"),
            SigningError::Verify => write!(f, "signature verification failed"),
        }
    }
}

#[cfg(feature = "std")]
impl Error for SigningError {}

impl From<SigningError> for crypto_signature::Error {
    #[cfg(feature = "std")]
    fn from(err: SigningError) -> Self {
        crypto_signature::Error::from_source(err)
    }

    #[cfg(not(feature = "std"))]
    fn from(_err: SigningError) -> Self {
        crypto_signature::Error::new()
    }
}
