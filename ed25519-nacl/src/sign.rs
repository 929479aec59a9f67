//! Ed25519 signing, verification, key blinding and key exchange.
//!
//! Key material flows through three types:
//!
//! * a 32-byte [`SecretKey`] seed, expanded by hashing into an
//!   [`ExpandedSecretKey`] (clamped scalar plus nonce prefix);
//! * a [`SigningKey`], which pairs the expanded secret with its
//!   [`VerifyingKey`] so repeated signing does not pay the fixed-base
//!   multiplication twice;
//! * a [`VerifyingKey`], a validated curve point.
//!
//! Signing and key derivation are deterministic; all randomness comes
//! from the seed. Verification and public-key blinding run in variable
//! time on their public inputs, and everything touching secret scalars
//! runs in constant time.

mod error;
mod expanded;
mod signature;
mod signing_key;
mod verifying_key;

pub use error::*;
pub use expanded::*;
pub use signature::*;
pub use signing_key::*;
pub use verifying_key::*;

/// Length of a secret key seed in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of a public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an expanded secret key in bytes.
pub const EXPANDED_SECRET_KEY_LENGTH: usize = 64;

/// Length of a signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of a shared key produced by the key exchange, in bytes.
pub const SHARED_KEY_LENGTH: usize = 32;

/// Ed25519 secret key seed.
pub type SecretKey = [u8; SECRET_KEY_LENGTH];
