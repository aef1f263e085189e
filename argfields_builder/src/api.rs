mod binding;
mod capture;
mod core;
mod field;

pub use binding::*;
pub use capture::*;
pub use core::*;
pub use field::*;
