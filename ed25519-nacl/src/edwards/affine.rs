use core::fmt::{self, Debug, Formatter};

use subtle::{Choice, ConditionallyNegatable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

use crate::edwards::extended::EdwardsPoint;
use crate::field::FieldElement;

/// An affine point on the twisted Edwards curve.
#[derive(Copy, Clone, Debug)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl AffinePoint {
    /// The identity point.
    pub const IDENTITY: AffinePoint = AffinePoint {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
    };

    /// Standard compression: store y along with the sign of x.
    pub fn compress(&self) -> CompressedEdwardsY {
        let sign = self.x.is_negative().unwrap_u8();

        let mut bytes = self.y.to_bytes();
        bytes[31] ^= sign << 7;
        CompressedEdwardsY(bytes)
    }

    /// Check the curve equation -x^2 + y^2 = 1 + d*x^2*y^2.
    pub fn is_on_curve(&self) -> Choice {
        let XX = self.x.square();
        let YY = self.y.square();
        let lhs = &YY - &XX;
        let rhs = &FieldElement::ONE + &(&FieldElement::EDWARDS_D * &(&XX * &YY));

        lhs.ct_eq(&rhs)
    }

    /// Convert to extended coordinates.
    pub fn to_edwards(&self) -> EdwardsPoint {
        EdwardsPoint {
            X: self.x,
            Y: self.y,
            Z: FieldElement::ONE,
            T: &self.x * &self.y,
        }
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        (self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)).into()
    }
}
impl Eq for AffinePoint {}

/// The 32-byte compressed encoding of a curve point: the y-coordinate
/// in little-endian with the sign of x folded into the top bit.
///
/// Unlike [`EdwardsPoint`], this type carries arbitrary bytes; whether
/// they name a curve point is only decided by [`decompress`][Self::decompress].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CompressedEdwardsY({:?})", &self.0)
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> Self {
        CompressedEdwardsY([0u8; 32])
    }
}

impl DefaultIsZeroes for CompressedEdwardsY {}

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl AsRef<[u8]> for CompressedEdwardsY {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for CompressedEdwardsY {
    fn from(bytes: [u8; 32]) -> Self {
        CompressedEdwardsY(bytes)
    }
}

impl CompressedEdwardsY {
    /// View the raw encoding.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy the raw encoding.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Attempt to decompress to an [`EdwardsPoint`].
    ///
    /// The y-coordinate is read with the top bit masked and is not
    /// required to be canonical. Decompression fails when the candidate
    /// x^2 = (y^2 - 1)/(d*y^2 + 1) has no square root, or when x = 0 is
    /// paired with a set sign bit. Malformed input is an expected,
    /// recoverable outcome here; nothing panics.
    pub fn decompress(&self) -> CtOption<EdwardsPoint> {
        let y = FieldElement::from_bytes(self.as_bytes());
        let z = FieldElement::ONE;
        let yy = y.square();
        let u = &yy - &z; // u = y²-1
        let v = &(&yy * &FieldElement::EDWARDS_D) + &z; // v = dy²+1

        let (is_valid_y_coord, mut x) = FieldElement::sqrt_ratio_i(&u, &v);

        let compressed_sign_bit = Choice::from(self.as_bytes()[31] >> 7);

        // x = 0 admits no sign; reject an encoding that claims one.
        let is_valid_sign = !(x.is_zero() & compressed_sign_bit);

        x.conditional_negate(compressed_sign_bit ^ x.is_negative());

        CtOption::new(
            EdwardsPoint {
                X: x,
                Y: y,
                Z: z,
                T: &x * &y,
            },
            is_valid_y_coord & is_valid_sign,
        )
    }
}
