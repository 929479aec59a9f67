//! Compile-time curve constants: the basepoint and the two precomputed
//! multiple-of-basepoint tables.
//!
//! All tables are immutable constants; the crate holds no process-wide
//! mutable or lazily initialized state.

use crate::curve::models::AffineNielsPoint;
use crate::curve::scalar_mul::{LookupTable, NafLookupTable5};
use crate::edwards::extended::EdwardsPoint;
use crate::field::element::FieldElement;

/// The Ed25519 basepoint in extended coordinates.
pub(crate) const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement([
        0x62d608f25d51a,
        0x412a4b4f6592a,
        0x75b7171a4b31d,
        0x1ff60527118fe,
        0x216936d3cd6e5,
    ]),
    Y: FieldElement([
        0x6666666666658,
        0x4cccccccccccc,
        0x1999999999999,
        0x3333333333333,
        0x6666666666666,
    ]),
    Z: FieldElement([1, 0, 0, 0, 0]),
    T: FieldElement([
        0x68ab3a5b7dda3,
        0xeea2a5eadbb,
        0x2af8df483c27e,
        0x332b375274732,
        0x67875f0fd78b7,
    ]),
};

/// The multiples `[B, 2B, ..., 8B]` of the basepoint, in cached affine
/// form, driving the constant-time fixed-base multiplication.
pub(crate) const AFFINE_BASEPOINT_TABLE: LookupTable = LookupTable([
    AffineNielsPoint {
        y_plus_x: FieldElement([0x493c6f58c3b85, 0xdf7181c325f7, 0xf50b0b3e4cb7, 0x5329385a44c32, 0x7cf9d3a33d4b]),
        y_minus_x: FieldElement([0x3905d740913e, 0xba2817d673a2, 0x23e2827f4e67c, 0x133d2e0c21a34, 0x44fd2f9298f81]),
        xy2d: FieldElement([0x11205877aaa68, 0x479955893d579, 0x50d66309b67a0, 0x2d42d0dbee5ee, 0x6f117b689f0c6]),
    },
    AffineNielsPoint {
        y_plus_x: FieldElement([0x4e7fc933c71d7, 0x2cf41feb6b244, 0x7581c0a7d1a76, 0x7172d534d32f0, 0x590c063fa87d2]),
        y_minus_x: FieldElement([0x1a56042b4d5a8, 0x189cc159ed153, 0x5b8deaa3cae04, 0x2aaf04f11b5d8, 0x6bb595a669c92]),
        xy2d: FieldElement([0x2a8b3a59b7a5f, 0x3abb359ef087f, 0x4f5a8c4db05af, 0x5b9a807d04205, 0x701af5b13ea50]),
    },
    AffineNielsPoint {
        y_plus_x: FieldElement([0x5b0a84cee9730, 0x61d10c97155e4, 0x4059cc8096a10, 0x47a608da8014f, 0x7a164e1b9a80f]),
        y_minus_x: FieldElement([0x11fe8a4fcd265, 0x7bcb8374faacc, 0x52f5af4ef4d4f, 0x5314098f98d10, 0x2ab91587555bd]),
        xy2d: FieldElement([0x6933f0dd0d889, 0x44386bb4c4295, 0x3cb6d3162508c, 0x26368b872a2c6, 0x5a2826af12b9b]),
    },
    AffineNielsPoint {
        y_plus_x: FieldElement([0x351b98efc099f, 0x68fbfa4a7050e, 0x42a49959d971b, 0x393e51a469efd, 0x680e910321e58]),
        y_minus_x: FieldElement([0x6050a056818bf, 0x62acc1f5532bf, 0x28141ccc9fa25, 0x24d61f471e683, 0x27933f4c7445a]),
        xy2d: FieldElement([0x3fbe9c476ff09, 0xaf6b982e4b42, 0xad1251ba78e5, 0x715aeedee7c88, 0x7f9d0cbf63553]),
    },
    AffineNielsPoint {
        y_plus_x: FieldElement([0x2bc4408a5bb33, 0x78ebdda05442, 0x2ffb112354123, 0x375ee8df5862d, 0x2945ccf146e20]),
        y_minus_x: FieldElement([0x182c3a447d6ba, 0x22964e536eff2, 0x192821f540053, 0x2f9f19e788e5c, 0x154a7e73eb1b5]),
        xy2d: FieldElement([0x3dbf1812a8285, 0xfa17ba3f9797, 0x6f69cb49c3820, 0x34d5a0db3858d, 0x43aabe696b3bb]),
    },
    AffineNielsPoint {
        y_plus_x: FieldElement([0x4eeeb77157131, 0x1201915f10741, 0x1669cda6c9c56, 0x45ec032db346d, 0x51e57bb6a2cc3]),
        y_minus_x: FieldElement([0x6b67b7d8ca4, 0x84fa44e72933, 0x1154ee55d6f8a, 0x4425d842e7390, 0x38b64c41ae417]),
        xy2d: FieldElement([0x4326702ea4b71, 0x6834376030b5, 0xef0512f9c380, 0xf1a9f2512584, 0x10b8e91a9f0d6]),
    },
    AffineNielsPoint {
        y_plus_x: FieldElement([0x25cd0944ea3bf, 0x75673b81a4d63, 0x150b925d1c0d4, 0x13f38d9294114, 0x461bea69283c9]),
        y_minus_x: FieldElement([0x72c9aaa3221b1, 0x267774474f74d, 0x64b0e9b28085, 0x3f04ef53b27c9, 0x1d6edd5d2e531]),
        xy2d: FieldElement([0x36dc801b8b3a2, 0xe0a7d4935e30, 0x1deb7cecc0d7d, 0x53a94e20dd2c, 0x7a9fbb1c6a0f9]),
    },
    AffineNielsPoint {
        y_plus_x: FieldElement([0x7596604dd3e8f, 0x6fc510e058b36, 0x3670c8db2cc0d, 0x297d899ce332f, 0x915e76061bce]),
        y_minus_x: FieldElement([0x75dedf39234d9, 0x1c36ab1f3c54, 0xf08fee58f5da, 0xe19613a0d637, 0x3a9024a1320e0]),
        xy2d: FieldElement([0x1f5d9c9a2911a, 0x7117994fafcf8, 0x2d8a8cae28dc5, 0x74ab1b2090c87, 0x26907c5c2ecc4]),
    },
]);

/// The odd multiples `[B, 3B, 5B, ..., 15B]` of the basepoint, read in
/// variable time by the double-base multiplication.
pub(crate) const AFFINE_ODD_MULTIPLES_OF_BASEPOINT: NafLookupTable5<AffineNielsPoint> =
    NafLookupTable5([
        AffineNielsPoint {
            y_plus_x: FieldElement([0x493c6f58c3b85, 0xdf7181c325f7, 0xf50b0b3e4cb7, 0x5329385a44c32, 0x7cf9d3a33d4b]),
            y_minus_x: FieldElement([0x3905d740913e, 0xba2817d673a2, 0x23e2827f4e67c, 0x133d2e0c21a34, 0x44fd2f9298f81]),
            xy2d: FieldElement([0x11205877aaa68, 0x479955893d579, 0x50d66309b67a0, 0x2d42d0dbee5ee, 0x6f117b689f0c6]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([0x5b0a84cee9730, 0x61d10c97155e4, 0x4059cc8096a10, 0x47a608da8014f, 0x7a164e1b9a80f]),
            y_minus_x: FieldElement([0x11fe8a4fcd265, 0x7bcb8374faacc, 0x52f5af4ef4d4f, 0x5314098f98d10, 0x2ab91587555bd]),
            xy2d: FieldElement([0x6933f0dd0d889, 0x44386bb4c4295, 0x3cb6d3162508c, 0x26368b872a2c6, 0x5a2826af12b9b]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([0x2bc4408a5bb33, 0x78ebdda05442, 0x2ffb112354123, 0x375ee8df5862d, 0x2945ccf146e20]),
            y_minus_x: FieldElement([0x182c3a447d6ba, 0x22964e536eff2, 0x192821f540053, 0x2f9f19e788e5c, 0x154a7e73eb1b5]),
            xy2d: FieldElement([0x3dbf1812a8285, 0xfa17ba3f9797, 0x6f69cb49c3820, 0x34d5a0db3858d, 0x43aabe696b3bb]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([0x25cd0944ea3bf, 0x75673b81a4d63, 0x150b925d1c0d4, 0x13f38d9294114, 0x461bea69283c9]),
            y_minus_x: FieldElement([0x72c9aaa3221b1, 0x267774474f74d, 0x64b0e9b28085, 0x3f04ef53b27c9, 0x1d6edd5d2e531]),
            xy2d: FieldElement([0x36dc801b8b3a2, 0xe0a7d4935e30, 0x1deb7cecc0d7d, 0x53a94e20dd2c, 0x7a9fbb1c6a0f9]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([0x6678aa6a8632f, 0x5ea3788d8b365, 0x21bd6d6994279, 0x7ace75919e4e3, 0x34b9ed338add7]),
            y_minus_x: FieldElement([0x6217e039d8064, 0x6dea408337e6d, 0x57ac112628206, 0x647cb65e30473, 0x49c05a51fadc9]),
            xy2d: FieldElement([0x4e8bf9045af1b, 0x514e33a45e0d6, 0x7533c5b8bfe0f, 0x583557b7e14c9, 0x73c172021b008]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([0x700848a802ade, 0x1e04605c4e5f7, 0x5c0d01b9767fb, 0x7d7889f42388b, 0x4275aae2546d8]),
            y_minus_x: FieldElement([0x75b0249864348, 0x52ee11070262b, 0x237ae54fb5acd, 0x3bfd1d03aaab5, 0x18ab598029d5c]),
            xy2d: FieldElement([0x32cc5fd6089e9, 0x426505c949b05, 0x46a18880c7ad2, 0x4a4221888ccda, 0x3dc65522b53df]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([0xc222a2007f6d, 0x356b79bdb77ee, 0x41ee81efe12ce, 0x120a9bd07097d, 0x234fd7eec346f]),
            y_minus_x: FieldElement([0x7013b327fbf93, 0x1336eeded6a0d, 0x2b565a2bbf3af, 0x253ce89591955, 0x267882d17602]),
            xy2d: FieldElement([0xa119732ea378, 0x63bf1ba8e2a6c, 0x69f94cc90df9a, 0x431d1779bfc48, 0x497ba6fdaa097]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([0x6cc0313cfeaa0, 0x1a313848da499, 0x7cb534219230a, 0x39596dedefd60, 0x61e22917f12de]),
            y_minus_x: FieldElement([0x3cd86468ccf0b, 0x48553221ac081, 0x6c9464b4e0a6e, 0x75fba84180403, 0x43b5cd4218d05]),
            xy2d: FieldElement([0x2762f9bd0b516, 0x1c6e7fbddcbb3, 0x75909c3ace2bd, 0x42101972d3ec9, 0x511d61210ae4d]),
        },
    ]);

#[cfg(test)]
mod tests {
    use super::*;

    /// Rebuild both tables from the basepoint with group arithmetic and
    /// compare entry by entry.
    fn affine_niels_of(P: &EdwardsPoint) -> AffineNielsPoint {
        let affine = P.to_affine();
        AffineNielsPoint {
            y_plus_x: &affine.y + &affine.x,
            y_minus_x: &affine.y - &affine.x,
            xy2d: &(&affine.x * &affine.y) * &FieldElement::EDWARDS_D2,
        }
    }

    fn assert_niels_eq(a: &AffineNielsPoint, b: &AffineNielsPoint) {
        assert_eq!(a.y_plus_x.to_bytes(), b.y_plus_x.to_bytes());
        assert_eq!(a.y_minus_x.to_bytes(), b.y_minus_x.to_bytes());
        assert_eq!(a.xy2d.to_bytes(), b.xy2d.to_bytes());
    }

    #[test]
    fn basepoint_table_is_consistent() {
        let b = ED25519_BASEPOINT_POINT;
        let mut acc = b;
        for entry in AFFINE_BASEPOINT_TABLE.0.iter() {
            assert_niels_eq(entry, &affine_niels_of(&acc));
            acc = &acc + &b;
        }
    }

    #[test]
    fn odd_multiples_table_is_consistent() {
        let b = ED25519_BASEPOINT_POINT;
        let b2 = b.double();
        let mut acc = b;
        for entry in AFFINE_ODD_MULTIPLES_OF_BASEPOINT.0.iter() {
            assert_niels_eq(entry, &affine_niels_of(&acc));
            acc = &acc + &b2;
        }
    }

    #[test]
    fn basepoint_t_coordinate_is_xy() {
        let b = ED25519_BASEPOINT_POINT;
        assert_eq!((&b.X * &b.Y).to_bytes(), b.T.to_bytes());
    }
}
