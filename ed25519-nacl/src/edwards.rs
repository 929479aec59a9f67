//! Points on the twisted Edwards form of Curve25519.

pub(crate) mod affine;
pub(crate) mod extended;

pub use affine::{AffinePoint, CompressedEdwardsY};
pub use extended::EdwardsPoint;
