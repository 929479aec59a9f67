#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![allow(non_snake_case)]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    clippy::mod_module_files,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    unused_attributes,
    unused_imports,
    unused_mut,
    unused_must_use
)]

#[cfg(feature = "std")]
extern crate std;

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

pub use crypto_signature;
pub use ed25519;
#[cfg(feature = "rand_core")]
pub use rand_core;
pub use sha2;
pub use subtle;
pub use zeroize;

pub(crate) mod constants;
pub(crate) mod curve;
pub(crate) mod edwards;
pub(crate) mod field;
pub(crate) mod montgomery;
pub(crate) mod sign;

pub use edwards::{AffinePoint, CompressedEdwardsY, EdwardsPoint};
pub use field::Scalar;
pub use montgomery::MontgomeryPoint;
pub use sign::*;
