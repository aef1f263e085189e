//! Builder module for `argfields`.
//! See [documentation root](https://docs.rs/argfields/latest/argfields/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{GeneralParser, SchemaError};

#[cfg(feature = "unit_test")]
pub use parser::util;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
