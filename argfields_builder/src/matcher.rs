mod api;
mod core;
mod model;

pub(crate) use self::core::{MatchError, TokenMatcher, TokenMatcherError};
pub(crate) use api::*;
pub(crate) use model::MatchTokens;
