// -*- mode: rust; -*-
//
// The original file was a part of curve25519-dalek.
// Copyright (c) 2016-2021 isis agora lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.

//! The Montgomery form of Curve25519 and the birational maps to and
//! from the twisted Edwards form.
//!
//! A [`MontgomeryPoint`] holds only the u-coordinate, which is all the
//! X25519-style ladder needs. The maps used here are
//! `u = (1+y)/(1-y)` and its inverse `y = (u-1)/(u+1)`; the sign of x
//! does not survive the trip and must be carried separately.

use core::fmt::{self, Debug, Formatter};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

use crate::edwards::affine::CompressedEdwardsY;
use crate::edwards::extended::EdwardsPoint;
use crate::field::FieldElement;

/// The u-coordinate of a point on the Montgomery form of Curve25519.
#[derive(Copy, Clone, Default, Eq, Hash)]
pub struct MontgomeryPoint(pub [u8; 32]);

impl Debug for MontgomeryPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "MontgomeryPoint({:?})", &self.0)
    }
}

impl ConstantTimeEq for MontgomeryPoint {
    fn ct_eq(&self, other: &MontgomeryPoint) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for MontgomeryPoint {
    fn eq(&self, other: &MontgomeryPoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl DefaultIsZeroes for MontgomeryPoint {}

impl AsRef<[u8]> for MontgomeryPoint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl MontgomeryPoint {
    /// The u-coordinate of the generator, u = 9.
    pub const GENERATOR: Self = Self([
        9, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0,
    ]);

    /// View the raw encoding.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy the raw encoding.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Multiply by a scalar after clamping it, as X25519 does.
    ///
    /// The ladder is constant-time in the scalar and accepts any
    /// u-coordinate, including points on the twist.
    pub fn mul_clamped(&self, bytes: [u8; 32]) -> MontgomeryPoint {
        let scalar = crate::field::Scalar::clamp_integer(bytes);
        let u = FieldElement::from_bytes(&self.0);
        MontgomeryPoint(ladder(&scalar, &u).to_bytes())
    }

    /// Apply the birational map to the Edwards y-coordinate,
    /// `y = (u-1)/(u+1)`, folding the caller-supplied sign of x into
    /// the top bit of the encoding.
    ///
    /// The Montgomery form cannot say whether the result names a valid
    /// curve point; decompress the output to find out. For u = -1 the
    /// convention `invert(0) = 0` makes the map total, yielding y = 0.
    pub fn to_edwards_y(&self, sign: u8) -> CompressedEdwardsY {
        let u = FieldElement::from_bytes(&self.0);
        let y = &(&u - &FieldElement::ONE) * &(&u + &FieldElement::ONE).invert();

        let mut bytes = y.to_bytes();
        bytes[31] |= (sign & 1) << 7;
        CompressedEdwardsY(bytes)
    }
}

impl EdwardsPoint {
    /// Apply the birational map `u = (1+y)/(1-y)`, in projective form
    /// `(Z+Y)/(Z-Y)`, to obtain the Montgomery u-coordinate.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        let U = &self.Z + &self.Y;
        let W = &self.Z - &self.Y;
        let u = &U * &W.invert();
        MontgomeryPoint(u.to_bytes())
    }
}

impl CompressedEdwardsY {
    /// The Montgomery u-coordinate of the encoded y.
    ///
    /// Only the masked y-coordinate is read; the sign bit is ignored
    /// and the encoding is not checked for curve membership. This is
    /// the form the key exchange consumes, which accepts any 32 bytes.
    pub fn to_montgomery(&self) -> MontgomeryPoint {
        let y = FieldElement::from_bytes(self.as_bytes());
        let u = &(&FieldElement::ONE + &y) * &(&FieldElement::ONE - &y).invert();
        MontgomeryPoint(u.to_bytes())
    }
}

/// The Montgomery ladder: compute the u-coordinate of `scalar * P`
/// where `P` has u-coordinate `u`.
///
/// One conditional swap per bit, driven by a constant-time choice; no
/// branch or table index depends on the scalar.
pub(crate) fn ladder(scalar: &[u8; 32], u: &FieldElement) -> FieldElement {
    let mut x2 = FieldElement::ONE;
    let mut z2 = FieldElement::ZERO;
    let mut x3 = *u;
    let mut z3 = FieldElement::ONE;
    let mut swap = Choice::from(0);

    for t in (0..255).rev() {
        let bit = Choice::from((scalar[t >> 3] >> (t & 7)) & 1);
        swap ^= bit;
        FieldElement::conditional_swap(&mut x2, &mut x3, swap);
        FieldElement::conditional_swap(&mut z2, &mut z3, swap);
        swap = bit;

        let a = &x2 + &z2;
        let aa = a.square();
        let b = &x2 - &z2;
        let bb = b.square();
        let e = &aa - &bb;
        let c = &x3 + &z3;
        let d = &x3 - &z3;
        let da = &d * &a;
        let cb = &c * &b;
        x3 = (&da + &cb).square();
        z3 = u * &(&da - &cb).square();
        x2 = &aa * &bb;
        z2 = &e * &(&aa + &(&FieldElement::APLUS2_OVER4 * &e));
    }

    FieldElement::conditional_swap(&mut x2, &mut x3, swap);
    FieldElement::conditional_swap(&mut z2, &mut z3, swap);

    &x2 * &z2.invert()
}
