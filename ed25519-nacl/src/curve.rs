//! Internal curve machinery: the auxiliary point representations used
//! by the addition formulas, and the scalar multiplication routines
//! built on top of them.

pub(crate) mod models;
pub(crate) mod scalar_mul;
