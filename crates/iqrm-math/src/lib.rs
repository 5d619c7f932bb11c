//! IQRM math utilities.

pub mod math;

pub use math::lagged::*;
pub use math::quantile::*;
pub use math::robust::*;
