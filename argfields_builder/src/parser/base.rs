use std::collections::{HashMap, VecDeque};
use thiserror::Error;

use crate::api::CaptureError;
use crate::constant::*;
use crate::matcher::*;

// We need a (dyn .. [ignoring T] ..) here in order to put all the fields of varying types T under one collection.
// In other words, we want the bottom of the object graph to include the types T, but up here we want to work across all T.
pub(crate) type OptionCapture<'a> = (OptionConfig, Box<(dyn Untyped + 'a)>);
pub(crate) type ArgumentCapture<'a> = (ArgumentConfig, Box<(dyn Untyped + 'a)>);

/// An error in the parser schema itself, such as duplicate parameter spellings.
#[derive(Debug, Error)]
#[error("Schema error: {0}")]
pub struct SchemaError(pub(crate) String);

impl From<TokenMatcherError> for SchemaError {
    fn from(error: TokenMatcherError) -> Self {
        SchemaError(error.to_string())
    }
}

/// An error from processing the command line tokens.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Parse error: {0}")]
pub struct ParseError(pub(crate) String);

impl From<MatchError> for ParseError {
    fn from(error: MatchError) -> Self {
        ParseError(error.to_string())
    }
}

impl From<CaptureError> for ParseError {
    fn from(error: CaptureError) -> Self {
        ParseError(error.to_string())
    }
}

/// Behaviour to capture an implicit generic type T from an input `&str`.
///
/// We use this at the middle/top of the record parser object graph so that different types may all be 'captured' in a single parser.
pub(crate) trait Untyped {
    /// Declare that the field has been matched.
    fn matched(&mut self);

    /// Capture a value anonymously for this field.
    fn capture(&mut self, value: &str) -> Result<(), CaptureError>;
}


pub(crate) struct Parser<'a> {
    token_matcher: TokenMatcher,
    captures: HashMap<String, Box<(dyn Untyped + 'a)>>,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser{..}").finish()
    }
}

impl<'a> Parser<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default(), Vec::default()).unwrap()
    }

    pub(crate) fn new(
        options: Vec<OptionCapture<'a>>,
        arguments: Vec<ArgumentCapture<'a>>,
    ) -> Result<Self, SchemaError> {
        let help_config = OptionConfig::simple(HELP_NAME, Some(HELP_SHORT), Bound::Range(0, 0));
        let mut option_configs = vec![help_config];
        let mut argument_configs = VecDeque::default();
        let mut captures: HashMap<String, Box<(dyn Untyped + 'a)>> = HashMap::default();

        for (oc, f) in options.into_iter() {
            if captures.insert(oc.name().to_string(), f).is_some() {
                return Err(SchemaError(format!(
                    "Cannot duplicate the parameter '{}'.",
                    oc.name()
                )));
            }

            option_configs.push(oc);
        }

        for (ac, f) in arguments.into_iter() {
            if captures.insert(ac.name().to_string(), f).is_some() {
                return Err(SchemaError(format!(
                    "Cannot duplicate the parameter '{}'.",
                    ac.name()
                )));
            }

            argument_configs.push_back(ac);
        }

        let token_matcher = TokenMatcher::new(option_configs, argument_configs)?;

        Ok(Self {
            token_matcher,
            captures,
        })
    }

    pub(crate) fn consume(
        self,
        tokens: &[&str],
        lenient: bool,
    ) -> Result<Action, (usize, ParseError)> {
        let Parser {
            mut token_matcher,
            mut captures,
        } = self;

        // 1. Feed the raw token strings to the matcher.
        let mut fed = 0;

        for token in tokens {
            token_matcher
                .feed(token)
                .map_err(|e| (fed, ParseError::from(e)))?;
            fed += token.len();
        }

        let matches = match token_matcher.close(lenient) {
            Ok(matches) | Err((_, _, matches)) if matches.contains(HELP_NAME) => {
                return Ok(Action::PrintHelp);
            }
            Ok(matches) => Ok(matches),
            Err((offset, e, _)) => Err((offset, ParseError::from(e))),
        }?;

        // 2. Get the matching between tokens and fields, still as raw strings.
        for match_tokens in matches.values {
            if match_tokens.name == HELP_NAME {
                continue;
            }

            // 3. Find the corresponding capture.
            // Repeated options produce multiple matches against the same capture (last value wins).
            let box_capture = captures
                .get_mut(&match_tokens.name)
                .expect("internal error - mismatch between matches and captures");
            // 4. Let the capture know it has been matched.
            box_capture.matched();

            // 5. Convert each of the raw value strings into the capture type.
            for (offset, value) in &match_tokens.values {
                box_capture
                    .capture(value)
                    .map_err(|error| (*offset, ParseError::from(error)))?;
            }
        }

        Ok(Action::Continue {
            unknown: matches.unknown.into_iter().map(|(_, value)| value).collect(),
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Continue { unknown: Vec<String> },
    PrintHelp,
}
