//! Scalars modulo the prime order of the basepoint,
//! ℓ = 2^252 + 27742317777372353535851937790883648493.
//!
//! A [`Scalar`] keeps the exact 32 bytes it was built from: a clamped
//! signing scalar is larger than ℓ and must survive serialization
//! unreduced, so reduction happens inside the arithmetic instead of at
//! construction time.

use core::fmt::{self, Debug, Formatter};
use core::ops::{Add, Mul};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::DefaultIsZeroes;

/// A 256-bit integer used as an exponent or signature scalar, with
/// arithmetic performed modulo the group order ℓ.
#[derive(Copy, Clone, Default, Eq)]
pub struct Scalar {
    pub(crate) bytes: [u8; 32],
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({:?})", &self.bytes)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut bytes = [0u8; 32];
        for i in 0..32 {
            bytes[i] = u8::conditional_select(&a.bytes[i], &b.bytes[i], choice);
        }
        Scalar { bytes }
    }
}

impl DefaultIsZeroes for Scalar {}

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &Scalar) -> Scalar {
        Scalar52::mul(&self.unpack(), &rhs.unpack()).pack()
    }
}

define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, rhs: &Scalar) -> Scalar {
        Scalar52::add(&self.unpack().canonicalize(), &rhs.unpack().canonicalize()).pack()
    }
}

define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl Scalar {
    /// The scalar zero.
    pub const ZERO: Scalar = Scalar { bytes: [0u8; 32] };
    /// The scalar one.
    pub const ONE: Scalar = Scalar {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// Construct a scalar from raw bytes, without reducing modulo ℓ.
    ///
    /// The bytes are used as-is by `to_bytes`; arithmetic still reduces.
    pub(crate) const fn from_bits(bytes: [u8; 32]) -> Scalar {
        Scalar { bytes }
    }

    /// Clamp a 32-byte string per the Curve25519 convention: clear the
    /// three low bits and the top bit, set bit 254. The result is a
    /// multiple of the cofactor with a fixed bit length.
    pub fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
        bytes[0] &= 0b1111_1000;
        bytes[31] &= 0b0111_1111;
        bytes[31] |= 0b0100_0000;
        bytes
    }

    /// Reduce a 32-byte integer modulo ℓ.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        Scalar::from_bits(bytes).reduce()
    }

    /// Reduce a 64-byte integer (e.g. a SHA-512 digest) modulo ℓ.
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        Scalar52::from_bytes_wide(input).pack()
    }

    /// Construct a scalar from its canonical encoding, failing if the
    /// value is not already fully reduced. This is the malleability
    /// check applied to the S half of signatures.
    pub fn from_canonical_bytes(bytes: [u8; 32]) -> CtOption<Scalar> {
        let candidate = Scalar::from_bits(bytes);
        CtOption::new(candidate, candidate.is_canonical())
    }

    /// Compute `a*b + c (mod ℓ)`, the shared primitive behind signature
    /// scalars and private-key blinding. Inputs need not be canonical.
    pub fn muladd(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        let ab = Scalar52::mul(&a.unpack(), &b.unpack());
        Scalar52::add(&ab, &c.unpack().canonicalize()).pack()
    }

    /// Copy the exact bytes this scalar was built from.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// View the exact bytes this scalar was built from.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// The canonical representative of this scalar modulo ℓ.
    pub(crate) fn reduce(&self) -> Scalar {
        self.unpack().canonicalize().pack()
    }

    pub(crate) fn is_canonical(&self) -> Choice {
        self.ct_eq(&self.reduce())
    }

    fn unpack(&self) -> Scalar52 {
        Scalar52::from_bytes(&self.bytes)
    }

    /// Write this scalar in signed radix 16, with 64 digits in [-8, 8).
    ///
    /// Requires the top bit to be unset, which holds for both clamped
    /// and canonical scalars.
    pub(crate) fn as_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.bytes[31] <= 127);
        let mut output = [0i8; 64];

        #[inline(always)]
        fn bot_half(x: u8) -> u8 {
            x & 15
        }
        #[inline(always)]
        fn top_half(x: u8) -> u8 {
            (x >> 4) & 15
        }

        for i in 0..32 {
            output[2 * i] = bot_half(self.bytes[i]) as i8;
            output[2 * i + 1] = top_half(self.bytes[i]) as i8;
        }
        // Recenter coefficients from [0,16) to [-8,8)
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }

        output
    }

    /// Width-`w` non-adjacent form: at most one nonzero odd digit in
    /// any `w` consecutive positions. Used by the variable-time
    /// double-base multiplication, so this runs on public data only.
    pub(crate) fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        debug_assert!(self.bytes[31] <= 127);
        debug_assert!((2..=8).contains(&w));

        let mut naf = [0i8; 256];

        let mut x_u64 = [0u64; 5];
        for i in 0..4 {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&self.bytes[i * 8..(i + 1) * 8]);
            x_u64[i] = u64::from_le_bytes(buf);
        }

        let width = 1 << w;
        let window_mask = width - 1;

        let mut pos = 0;
        let mut carry = 0;
        while pos < 256 {
            // Construct a buffer of bits of the scalar, starting at bit `pos`
            let u64_idx = pos / 64;
            let bit_idx = pos % 64;
            let bit_buf: u64 = if bit_idx < 64 - w {
                x_u64[u64_idx] >> bit_idx
            } else {
                (x_u64[u64_idx] >> bit_idx) | (x_u64[1 + u64_idx] << (64 - bit_idx))
            };

            let window = carry + (bit_buf & window_mask);

            if window & 1 == 0 {
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i8).wrapping_sub(width as i8);
            }

            pos += w;
        }

        naf
    }
}

// ------------------------------------------------------------------------
// Unpacked limb arithmetic
// ------------------------------------------------------------------------

/// A scalar unpacked into five 52-bit limbs, on which reduction modulo
/// ℓ is carried out in Montgomery form.
#[derive(Copy, Clone)]
pub(crate) struct Scalar52(pub(crate) [u64; 5]);

const MASK_52: u64 = (1u64 << 52) - 1;

/// ℓ, the group order.
const L: Scalar52 = Scalar52([
    0x0002631a5cf5d3ed,
    0x000dea2f79cd6581,
    0x000000000014def9,
    0x0000000000000000,
    0x0000100000000000,
]);

/// `-ℓ^(-1) mod 2^52`.
const LFACTOR: u64 = 0x51da312547e1b;

/// `R = 2^260 mod ℓ`.
const R: Scalar52 = Scalar52([
    0x000f48bd6721e6ed,
    0x0003bab5ac67e45a,
    0x000fffffeb35e51b,
    0x000fffffffffffff,
    0x00000fffffffffff,
]);

/// `RR = R^2 mod ℓ`.
const RR: Scalar52 = Scalar52([
    0x0009d265e952d13b,
    0x000d63c715bea69f,
    0x0005be65cb687604,
    0x0003dceec73d217f,
    0x000009411b7c309a,
]);

#[inline(always)]
fn m(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

#[inline(always)]
fn part1(sum: u128) -> (u128, u64) {
    let w = (sum as u64).wrapping_mul(LFACTOR) & MASK_52;
    ((sum + m(w, L.0[0])) >> 52, w)
}

#[inline(always)]
fn part2(sum: u128) -> (u128, u64) {
    let w = (sum as u64) & MASK_52;
    (sum >> 52, w)
}

impl Scalar52 {
    pub const ZERO: Scalar52 = Scalar52([0, 0, 0, 0, 0]);

    fn from_bytes(bytes: &[u8; 32]) -> Scalar52 {
        let mut words = [0u64; 4];
        for i in 0..4 {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            words[i] = u64::from_le_bytes(buf);
        }

        let top_mask = (1u64 << 48) - 1;
        let mut s = Scalar52::ZERO;

        s.0[0] = words[0] & MASK_52;
        s.0[1] = ((words[0] >> 52) | (words[1] << 12)) & MASK_52;
        s.0[2] = ((words[1] >> 40) | (words[2] << 24)) & MASK_52;
        s.0[3] = ((words[2] >> 28) | (words[3] << 36)) & MASK_52;
        s.0[4] = (words[3] >> 16) & top_mask;

        s
    }

    fn from_bytes_wide(bytes: &[u8; 64]) -> Scalar52 {
        let mut words = [0u64; 8];
        for i in 0..8 {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes[i * 8..(i + 1) * 8]);
            words[i] = u64::from_le_bytes(buf);
        }

        let mut lo = Scalar52::ZERO;
        let mut hi = Scalar52::ZERO;

        lo.0[0] = words[0] & MASK_52;
        lo.0[1] = ((words[0] >> 52) | (words[1] << 12)) & MASK_52;
        lo.0[2] = ((words[1] >> 40) | (words[2] << 24)) & MASK_52;
        lo.0[3] = ((words[2] >> 28) | (words[3] << 36)) & MASK_52;
        lo.0[4] = ((words[3] >> 16) | (words[4] << 48)) & MASK_52;

        hi.0[0] = (words[4] >> 4) & MASK_52;
        hi.0[1] = ((words[4] >> 56) | (words[5] << 8)) & MASK_52;
        hi.0[2] = ((words[5] >> 44) | (words[6] << 20)) & MASK_52;
        hi.0[3] = ((words[6] >> 32) | (words[7] << 32)) & MASK_52;
        hi.0[4] = words[7] >> 20;

        lo = Scalar52::montgomery_mul(&lo, &R); // (lo * R) / R = lo
        hi = Scalar52::montgomery_mul(&hi, &RR); // (hi * R^2) / R = hi * R

        Scalar52::add(&hi, &lo)
    }

    fn pack(&self) -> Scalar {
        let mut s = [0u8; 32];

        s[0] = self.0[0] as u8;
        s[1] = (self.0[0] >> 8) as u8;
        s[2] = (self.0[0] >> 16) as u8;
        s[3] = (self.0[0] >> 24) as u8;
        s[4] = (self.0[0] >> 32) as u8;
        s[5] = (self.0[0] >> 40) as u8;
        s[6] = ((self.0[0] >> 48) | (self.0[1] << 4)) as u8;
        s[7] = (self.0[1] >> 4) as u8;
        s[8] = (self.0[1] >> 12) as u8;
        s[9] = (self.0[1] >> 20) as u8;
        s[10] = (self.0[1] >> 28) as u8;
        s[11] = (self.0[1] >> 36) as u8;
        s[12] = (self.0[1] >> 44) as u8;
        s[13] = self.0[2] as u8;
        s[14] = (self.0[2] >> 8) as u8;
        s[15] = (self.0[2] >> 16) as u8;
        s[16] = (self.0[2] >> 24) as u8;
        s[17] = (self.0[2] >> 32) as u8;
        s[18] = (self.0[2] >> 40) as u8;
        s[19] = ((self.0[2] >> 48) | (self.0[3] << 4)) as u8;
        s[20] = (self.0[3] >> 4) as u8;
        s[21] = (self.0[3] >> 12) as u8;
        s[22] = (self.0[3] >> 20) as u8;
        s[23] = (self.0[3] >> 28) as u8;
        s[24] = (self.0[3] >> 36) as u8;
        s[25] = (self.0[3] >> 44) as u8;
        s[26] = self.0[4] as u8;
        s[27] = (self.0[4] >> 8) as u8;
        s[28] = (self.0[4] >> 16) as u8;
        s[29] = (self.0[4] >> 24) as u8;
        s[30] = (self.0[4] >> 32) as u8;
        s[31] = (self.0[4] >> 40) as u8;

        Scalar { bytes: s }
    }

    /// `a + b (mod ℓ)`, assuming both inputs are below ℓ.
    fn add(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        let mut sum = Scalar52::ZERO;

        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = a.0[i] + b.0[i] + (carry >> 52);
            sum.0[i] = carry & MASK_52;
        }

        Scalar52::sub(&sum, &L)
    }

    /// `a - b (mod ℓ)`, assuming both inputs are below 2^260.
    fn sub(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        let mut difference = Scalar52::ZERO;

        let mut borrow: u64 = 0;
        for i in 0..5 {
            borrow = a.0[i].wrapping_sub(b.0[i] + (borrow >> 63));
            difference.0[i] = borrow & MASK_52;
        }

        // conditionally add ℓ if the difference underflowed
        let underflow_mask = ((borrow >> 63) ^ 1).wrapping_sub(1);
        let mut carry: u64 = 0;
        for i in 0..5 {
            carry = (carry >> 52) + difference.0[i] + (L.0[i] & underflow_mask);
            difference.0[i] = carry & MASK_52;
        }

        difference
    }

    fn mul_internal(a: &Scalar52, b: &Scalar52) -> [u128; 9] {
        let mut z = [0u128; 9];

        z[0] = m(a.0[0], b.0[0]);
        z[1] = m(a.0[0], b.0[1]) + m(a.0[1], b.0[0]);
        z[2] = m(a.0[0], b.0[2]) + m(a.0[1], b.0[1]) + m(a.0[2], b.0[0]);
        z[3] = m(a.0[0], b.0[3]) + m(a.0[1], b.0[2]) + m(a.0[2], b.0[1]) + m(a.0[3], b.0[0]);
        z[4] = m(a.0[0], b.0[4])
            + m(a.0[1], b.0[3])
            + m(a.0[2], b.0[2])
            + m(a.0[3], b.0[1])
            + m(a.0[4], b.0[0]);
        z[5] = m(a.0[1], b.0[4]) + m(a.0[2], b.0[3]) + m(a.0[3], b.0[2]) + m(a.0[4], b.0[1]);
        z[6] = m(a.0[2], b.0[4]) + m(a.0[3], b.0[3]) + m(a.0[4], b.0[2]);
        z[7] = m(a.0[3], b.0[4]) + m(a.0[4], b.0[3]);
        z[8] = m(a.0[4], b.0[4]);

        z
    }

    /// Montgomery reduction: given limbs of `x` below `ℓ * 2^260`,
    /// compute `x / 2^260 (mod ℓ)`.
    fn montgomery_reduce(limbs: &[u128; 9]) -> Scalar52 {
        // l[3] is zero, so its multiples are skipped throughout.
        let l = &L;

        // The first half computes the Montgomery adjustment factor n,
        // and begins adding n*ℓ so the sum becomes divisible by 2^260.
        let (carry, n0) = part1(limbs[0]);
        let (carry, n1) = part1(carry + limbs[1] + m(n0, l.0[1]));
        let (carry, n2) = part1(carry + limbs[2] + m(n0, l.0[2]) + m(n1, l.0[1]));
        let (carry, n3) = part1(carry + limbs[3] + m(n1, l.0[2]) + m(n2, l.0[1]));
        let (carry, n4) = part1(carry + limbs[4] + m(n0, l.0[4]) + m(n2, l.0[2]) + m(n3, l.0[1]));

        // The sum is now divisible by 2^260; store the upper half.
        let (carry, r0) = part2(carry + limbs[5] + m(n1, l.0[4]) + m(n3, l.0[2]) + m(n4, l.0[1]));
        let (carry, r1) = part2(carry + limbs[6] + m(n2, l.0[4]) + m(n4, l.0[2]));
        let (carry, r2) = part2(carry + limbs[7] + m(n3, l.0[4]));
        let (carry, r3) = part2(carry + limbs[8] + m(n4, l.0[4]));
        let r4 = carry as u64;

        // The result may be >= ℓ, so attempt to subtract ℓ once.
        Scalar52::sub(&Scalar52([r0, r1, r2, r3, r4]), l)
    }

    /// `a * b / 2^260 (mod ℓ)`.
    fn montgomery_mul(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        Scalar52::montgomery_reduce(&Scalar52::mul_internal(a, b))
    }

    /// `a * b (mod ℓ)`.
    fn mul(a: &Scalar52, b: &Scalar52) -> Scalar52 {
        let ab = Scalar52::montgomery_mul(a, b);
        Scalar52::montgomery_mul(&ab, &RR)
    }

    /// The canonical representative below ℓ of the integer held in the
    /// limbs, which may be any value below 2^260.
    fn canonicalize(&self) -> Scalar52 {
        Scalar52::montgomery_mul(self, &R)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const A: [u8; 32] = hex!("93b9d77711e6aece04c390696b3ead1610ede16bd1cdf541904d567d56411ad0");
    const B: [u8; 32] = hex!("5a33af5d760af67b4fa2e86c72f28065dee171fd98ed1da873805f3c83ba9cca");
    const C: [u8; 32] = hex!("4aa25ca0f20baab6a5a7ec92efd28dc3889545bfb52a24b336022c3e4871ae64");
    const AB_PLUS_C: [u8; 32] =
        hex!("a8b5404b43d343e1a38e82bcf3fd92e741ce0a9a3bc0fa1936577d168638580e");

    /// ℓ in little-endian bytes.
    const GROUP_ORDER: [u8; 32] =
        hex!("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010");

    #[test]
    fn muladd_matches_reference() {
        let a = Scalar::from_bits(A);
        let b = Scalar::from_bits(B);
        let c = Scalar::from_bits(C);
        assert_eq!(Scalar::muladd(&a, &b, &c).to_bytes(), AB_PLUS_C);
    }

    #[test]
    fn muladd_decomposes() {
        let a = Scalar::from_bits(A);
        let b = Scalar::from_bits(B);
        let c = Scalar::from_bits(C);
        assert_eq!(Scalar::muladd(&a, &b, &c), &a * &b + c.reduce());
    }

    #[test]
    fn wide_reduction_matches_reference() {
        let wide = hex!(
            "26e6cef65af8146729b1a25739ca93480b87d17715a28c0b7e6f008dfa0ede6e"
            "be348bf2556aaf15a90785ceccaa4b0cc4cb2f8c4fb7c483c4213209a1260751"
        );
        let expected = hex!("2cd7ac9355199c9ae54a4dedecc0d915699d5cad30a58e928a08ddbb42f0e002");
        assert_eq!(Scalar::from_bytes_mod_order_wide(&wide).to_bytes(), expected);
    }

    #[test]
    fn group_order_reduces_to_zero() {
        assert_eq!(
            Scalar::from_bytes_mod_order(GROUP_ORDER).to_bytes(),
            [0u8; 32]
        );
    }

    #[test]
    fn canonical_bytes_rejects_group_order() {
        assert!(bool::from(Scalar::from_canonical_bytes(GROUP_ORDER).is_none()));

        let mut below = GROUP_ORDER;
        below[0] -= 1;
        assert!(bool::from(Scalar::from_canonical_bytes(below).is_some()));
    }

    #[test]
    fn clamping_fixes_bits() {
        let clamped = Scalar::clamp_integer([0xff; 32]);
        assert_eq!(clamped[0] & 0b0000_0111, 0);
        assert_eq!(clamped[31] & 0b1000_0000, 0);
        assert_eq!(clamped[31] & 0b0100_0000, 0b0100_0000);
        // Clamping an already-clamped value is a no-op.
        assert_eq!(Scalar::clamp_integer(clamped), clamped);
    }

    #[test]
    fn raw_bytes_roundtrip_unreduced() {
        // A clamped scalar exceeds ℓ but must serialize unchanged.
        let clamped = Scalar::from_bits(Scalar::clamp_integer([0xff; 32]));
        assert_eq!(clamped.to_bytes(), Scalar::clamp_integer([0xff; 32]));
        assert!(!bool::from(clamped.is_canonical()));
    }

    #[test]
    fn radix_16_reconstructs() {
        let x = Scalar::from_bits(A).reduce();
        let digits = x.as_radix_16();
        // Sum digits[i] * 16^i back together with schoolbook arithmetic.
        let mut acc = [0i64; 65];
        for (i, d) in digits.iter().enumerate() {
            acc[i / 2] += if i % 2 == 0 {
                *d as i64
            } else {
                (*d as i64) << 4
            };
        }
        let mut bytes = [0u8; 32];
        let mut carry: i64 = 0;
        for i in 0..32 {
            let v = acc[i] + carry;
            bytes[i] = (v & 0xff) as u8;
            carry = v >> 8;
        }
        assert_eq!(carry, 0);
        assert_eq!(bytes, x.to_bytes());
    }

    #[test]
    fn naf_reconstructs() {
        let x = Scalar::from_bits(A).reduce();
        for w in [5usize, 8] {
            let naf = x.non_adjacent_form(w);
            let mut acc = [0i64; 33];
            for (i, d) in naf.iter().enumerate() {
                acc[i / 8] += (*d as i64) << (i % 8);
            }
            let mut bytes = [0u8; 32];
            let mut carry: i64 = 0;
            for i in 0..32 {
                let v = acc[i] + carry;
                bytes[i] = (v & 0xff) as u8;
                carry = v >> 8;
            }
            carry += acc[32];
            assert_eq!(carry, 0);
            assert_eq!(bytes, x.to_bytes());
        }
    }
}
