// -*- mode: rust; -*-
//
// The original file was a part of curve25519-dalek.
// Copyright (c) 2016-2021 isis agora lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.

//! Scalar multiplication: constant-time fixed-base multiplication for
//! secret scalars, and variable-time double-base multiplication for the
//! public inputs of verification and key blinding.

use subtle::{Choice, ConditionallyNegatable, ConditionallySelectable, ConstantTimeEq};

use crate::constants::{AFFINE_BASEPOINT_TABLE, AFFINE_ODD_MULTIPLES_OF_BASEPOINT};
use crate::curve::models::{AffineNielsPoint, ProjectiveNielsPoint, ProjectivePoint};
use crate::edwards::extended::EdwardsPoint;
use crate::field::Scalar;

/// A table of the multiples `[P, 2P, 3P, ..., 8P]`, with a
/// constant-time signed-digit lookup.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LookupTable(pub(crate) [AffineNielsPoint; 8]);

impl LookupTable {
    /// Return `x * P` for `x` in `[-8, 8]` without branching or
    /// indexing on `x`.
    pub fn select(&self, x: i8) -> AffineNielsPoint {
        debug_assert!((-8..=8).contains(&x));

        // Compute xabs = |x|
        let xmask = (x as i16) >> 8;
        let xabs = ((x as i16) + xmask) ^ xmask;

        // Set t = 0 * P = identity
        let mut t = AffineNielsPoint::IDENTITY;
        for j in 1..9 {
            // Copy `points[j-1] == j*P` onto `t` in constant time if `|x| == j`.
            let c = (xabs as u16).ct_eq(&(j as u16));
            t.conditional_assign(&self.0[j - 1], c);
        }
        // Now t == |x| * P. The high bit of the mask tells us whether to negate.
        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_negate(neg_mask);

        t
    }
}

/// A table of odd multiples `[P, 3P, 5P, ..., 15P]`, looked up in
/// variable time by the non-adjacent-form walk.
#[derive(Copy, Clone, Debug)]
pub(crate) struct NafLookupTable5<T>(pub(crate) [T; 8]);

impl<T: Copy> NafLookupTable5<T> {
    /// Given odd `x` with `0 < x < 2^4`, return `x * P`.
    pub fn select(&self, x: usize) -> T {
        debug_assert_eq!(x & 1, 1);
        debug_assert!(x < 16);

        self.0[x / 2]
    }
}

impl From<&EdwardsPoint> for NafLookupTable5<ProjectiveNielsPoint> {
    fn from(A: &EdwardsPoint) -> Self {
        let mut Ai = [A.as_projective_niels(); 8];
        let A2 = A.double();
        for i in 0..7 {
            Ai[i + 1] = (&A2 + &Ai[i]).as_extended().as_projective_niels();
        }
        // Now Ai = [A, 3A, 5A, 7A, 9A, 11A, 13A, 15A]
        NafLookupTable5(Ai)
    }
}

/// Compute `scalar * B`, where `B` is the Ed25519 basepoint.
///
/// Runs in constant time with respect to the scalar: the signed
/// radix-16 digits drive only constant-time table selections, and the
/// doubling/addition schedule is fixed.
pub(crate) fn mul_base(scalar: &Scalar) -> EdwardsPoint {
    let digits = scalar.as_radix_16();

    let mut P = EdwardsPoint::IDENTITY;
    for i in (0..64).rev() {
        P = P.mul_by_pow_2(4);
        P = (&P + &AFFINE_BASEPOINT_TABLE.select(digits[i])).as_extended();
    }

    P
}

/// Compute `a * A + b * B` in variable time, where `B` is the Ed25519
/// basepoint.
///
/// This is the Straus interleaving of two width-5 non-adjacent forms,
/// reading odd multiples of `A` from a freshly built table and odd
/// multiples of `B` from the constant table. Execution time depends on
/// the digits of both scalars, so every caller must treat them as
/// public data.
pub(crate) fn vartime_double_scalar_mul_basepoint(
    a: &Scalar,
    A: &EdwardsPoint,
    b: &Scalar,
) -> EdwardsPoint {
    let a_naf = a.non_adjacent_form(5);
    let b_naf = b.non_adjacent_form(5);

    // Find the starting index: the most significant nonzero digit.
    let mut i: usize = 255;
    for j in (0..256).rev() {
        i = j;
        if a_naf[i] != 0 || b_naf[i] != 0 {
            break;
        }
    }

    let table_A = NafLookupTable5::<ProjectiveNielsPoint>::from(A);
    let table_B = &AFFINE_ODD_MULTIPLES_OF_BASEPOINT;

    let mut r = ProjectivePoint::IDENTITY;
    loop {
        let mut t = r.double();

        if a_naf[i] > 0 {
            t = &t.as_extended() + &table_A.select(a_naf[i] as usize);
        } else if a_naf[i] < 0 {
            t = &t.as_extended() - &table_A.select(-a_naf[i] as usize);
        }

        if b_naf[i] > 0 {
            t = &t.as_extended() + &table_B.select(b_naf[i] as usize);
        } else if b_naf[i] < 0 {
            t = &t.as_extended() - &table_B.select(-b_naf[i] as usize);
        }

        r = t.as_projective();

        if i == 0 {
            break;
        }
        i -= 1;
    }

    r.as_extended()
}
