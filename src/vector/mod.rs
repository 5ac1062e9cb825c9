//! Algorithms that search for local minima of functions along multiple dimensions.

mod simplex;

pub use self::simplex::{Corner, Simplex, Step};

mod nelder_mead;

pub use self::nelder_mead::NelderMead;
pub use self::nelder_mead::NelderMeadBuilder;
