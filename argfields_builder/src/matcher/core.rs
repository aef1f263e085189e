use std::collections::{HashMap, VecDeque};
use thiserror::Error;

use crate::matcher::api::*;
use crate::matcher::model::*;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum TokenMatcherError {
    #[error("Cannot duplicate the option '{0}'.")]
    DuplicateOption(String),

    #[error("Cannot duplicate the short option '{0}'.")]
    DuplicateShortOption(char),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("Not enough tokens provided to parameter '{0}'.")]
    Undercomplete(String),

    #[error("Too many tokens provided to parameter '{0}'.")]
    Overcomplete(String),

    #[error("Flag '{0}' does not accept a value.")]
    UnexpectedValue(String),

    #[error("Unrecognized token '{0}'.")]
    Unrecognized(String),

    #[error("Invalid choice '{value}' for parameter '{name}' (choose from: {}).", .choices.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        choices: Vec<String>,
    },

    #[error("Parameter '{0}' is required.")]
    MissingRequired(String),
}

impl From<CloseError> for MatchError {
    fn from(error: CloseError) -> Self {
        match error {
            CloseError::TooFewValues { name, .. } => MatchError::Undercomplete(name),
            CloseError::TooManyValues { name, .. } => MatchError::Overcomplete(name),
        }
    }
}

/// Matches a stream of tokens against the configured flags and positional slots.
///
/// Matching is a purely lexical phase.
/// Tokens are bucketed by parameter name with their input offsets; parsing the
/// bucketed strings into typed values happens afterwards.
///
/// Tokens which match nothing are collected rather than rejected.
/// `close(lenient)` decides whether the collected leftovers are an error
/// (strict) or part of the result (lenient).
#[derive(Debug)]
pub(crate) struct TokenMatcher {
    // flag spelling (no dashes) -> (parameter name, implicit value)
    flags: HashMap<String, (String, Option<String>)>,
    shorts: HashMap<char, (String, Option<String>)>,
    option_bounds: HashMap<String, Bound>,
    choices: HashMap<String, Vec<String>>,
    required: Vec<String>,
    arguments: VecDeque<ArgumentConfig>,
    fed: usize,
    matches: Vec<MatchTokens>,
    unknown: Vec<OffsetValue>,
    buffer: Option<MatchBuffer>,
    escaped: bool,
}

impl TokenMatcher {
    pub(crate) fn new(
        options: Vec<OptionConfig>,
        arguments: VecDeque<ArgumentConfig>,
    ) -> Result<Self, TokenMatcherError> {
        let mut flags = HashMap::default();
        let mut shorts = HashMap::default();
        let mut option_bounds = HashMap::default();
        let mut choices = HashMap::default();
        let mut required = Vec::default();

        for argument_config in &arguments {
            if !argument_config.choice_set().is_empty() {
                choices.insert(
                    argument_config.name().to_string(),
                    argument_config.choice_set().to_vec(),
                );
            }
        }

        for option_config in options.into_iter() {
            let name = option_config.name().to_string();

            if option_bounds
                .insert(name.clone(), option_config.bound())
                .is_some()
            {
                return Err(TokenMatcherError::DuplicateOption(name));
            }

            for alias in option_config.aliases() {
                if flags
                    .insert(
                        alias.text().to_string(),
                        (name.clone(), alias.value().cloned()),
                    )
                    .is_some()
                {
                    return Err(TokenMatcherError::DuplicateOption(alias.text().to_string()));
                }
            }

            if let Some(short) = option_config.short() {
                // The short spelling captures the same implicit value as the
                // primary long spelling (ex: `-v` toggles just like `--verbose`).
                let implicit = option_config
                    .aliases()
                    .first()
                    .and_then(|alias| alias.value().cloned());

                if shorts.insert(*short, (name.clone(), implicit)).is_some() {
                    return Err(TokenMatcherError::DuplicateShortOption(*short));
                }
            }

            if !option_config.choice_set().is_empty() {
                choices.insert(name.clone(), option_config.choice_set().to_vec());
            }

            if option_config.is_required() {
                required.push(name);
            }
        }

        Ok(Self {
            flags,
            shorts,
            option_bounds,
            choices,
            required,
            arguments,
            fed: 0,
            matches: Vec::default(),
            unknown: Vec::default(),
            buffer: None,
            escaped: false,
        })
    }

    pub(crate) fn feed(&mut self, token: &str) -> Result<(), MatchError> {
        let token_length = token.len();
        // 1. After the escape token `--`, everything is a plain value.
        // 2. Find a 'long' flag, such as:
        //  --initial
        //  --initial ..
        //  --initial=..
        // 3. Leading-dash numbers (`-5`, `-0.2`) are plain values.
        // 4. Find a 'short' flag, such as:
        //  -i
        //  -i ..
        //  -i=..
        // 5. Match against an argument.
        let result = if self.escaped {
            self.match_argument(token)
        } else if token == "--" {
            self.escaped = true;
            Ok(())
        } else if token.starts_with("--") {
            self.match_flag(token)
        } else if is_dash_number(token) || token == "-" || !token.starts_with('-') {
            self.match_argument(token)
        } else {
            self.match_short(token)
        };

        self.fed += token_length;
        result
    }

    fn match_argument(&mut self, token: &str) -> Result<(), MatchError> {
        let mut match_buffer = match self.buffer.take() {
            Some(match_buffer) => {
                if match_buffer.is_open() {
                    match_buffer
                } else {
                    // Flip to the next argument.
                    let match_tokens = match_buffer.close().expect(
                        "internal error - by definition, a non-open buffer must be able to close",
                    );
                    self.matches.push(match_tokens);

                    match self.next_argument() {
                        Some(match_buffer) => match_buffer,
                        None => {
                            self.unknown.push((self.fed, token.to_string()));
                            return Ok(());
                        }
                    }
                }
            }
            None => match self.next_argument() {
                Some(match_buffer) => match_buffer,
                None => {
                    self.unknown.push((self.fed, token.to_string()));
                    return Ok(());
                }
            },
        };

        match_buffer.push(self.fed, token.to_string());

        if self.buffer.replace(match_buffer).is_some() {
            unreachable!("internal error - the buffer is expected to be None");
        }

        Ok(())
    }

    fn next_argument(&mut self) -> Option<MatchBuffer> {
        self.arguments
            .pop_front()
            .map(|argument_config| MatchBuffer::new(argument_config.name(), argument_config.bound()))
    }

    fn match_flag(&mut self, token: &str) -> Result<(), MatchError> {
        let (flag_text, inline) = split_equals_delimiter(&token[2..]);

        match self.flags.get(flag_text) {
            Some((name, implicit)) => {
                let name = name.clone();
                let implicit = implicit.clone();
                self.match_spelling(token, name, implicit, inline, flag_text.len() + 3)
            }
            None => {
                self.update_buffer(None)?;
                self.unknown.push((self.fed, token.to_string()));
                Ok(())
            }
        }
    }

    fn match_short(&mut self, token: &str) -> Result<(), MatchError> {
        let (flag_text, inline) = split_equals_delimiter(&token[1..]);
        let mut characters = flag_text.chars();

        match (characters.next(), characters.next()) {
            (Some(single), None) => match self.shorts.get(&single) {
                Some((name, implicit)) => {
                    let name = name.clone();
                    let implicit = implicit.clone();
                    self.match_spelling(token, name, implicit, inline, flag_text.len() + 2)
                }
                None => {
                    self.update_buffer(None)?;
                    self.unknown.push((self.fed, token.to_string()));
                    Ok(())
                }
            },
            // Stacked short flags (and the degenerate `-=..`) are not recognized.
            _ => {
                self.update_buffer(None)?;
                self.unknown.push((self.fed, token.to_string()));
                Ok(())
            }
        }
    }

    fn match_spelling(
        &mut self,
        token: &str,
        name: String,
        implicit: Option<String>,
        inline: Option<&str>,
        inline_offset: usize,
    ) -> Result<(), MatchError> {
        match implicit {
            Some(value) => {
                // Toggle spellings carry their value; an inline value is nonsense.
                if inline.is_some() {
                    return Err(MatchError::UnexpectedValue(token.to_string()));
                }

                self.update_buffer(None)?;
                self.matches.push(MatchTokens {
                    name,
                    values: vec![(self.fed, value)],
                });
                Ok(())
            }
            None => {
                let bound = *self
                    .option_bounds
                    .get(&name)
                    .expect("internal error - flag spellings must map to a configured option");
                let mut match_buffer = MatchBuffer::new(name, bound);

                match inline {
                    Some(value) => {
                        self.update_buffer(None)?;
                        // The offset accounts for the dash prefix and the '=' delimiter.
                        match_buffer.push(self.fed + inline_offset, value.to_string());

                        // Options using k=v syntax cannot follow up with more values afterwards.
                        let match_tokens = match_buffer.close()?;
                        self.matches.push(match_tokens);
                        Ok(())
                    }
                    None => self.update_buffer(Some(match_buffer)),
                }
            }
        }
    }

    fn update_buffer(&mut self, next_buffer: Option<MatchBuffer>) -> Result<(), MatchError> {
        let previous_buffer = std::mem::replace(&mut self.buffer, next_buffer);

        if let Some(match_buffer) = previous_buffer {
            let match_tokens = match_buffer.close()?;
            self.matches.push(match_tokens);
        }

        Ok(())
    }

    pub(crate) fn close(mut self, lenient: bool) -> Result<Matches, (usize, MatchError, Matches)> {
        let mut failure: Option<(usize, MatchError)> = None;

        if let Some(match_buffer) = self.buffer.take() {
            match match_buffer.close() {
                Ok(match_tokens) => {
                    self.matches.push(match_tokens);
                }
                Err(error) => {
                    failure.replace((self.fed, MatchError::from(error)));
                }
            };
        }

        for argument_config in std::mem::take(&mut self.arguments) {
            let match_buffer = MatchBuffer::new(argument_config.name(), argument_config.bound());
            match match_buffer.close() {
                Ok(match_tokens) => {
                    self.matches.push(match_tokens);
                }
                Err(error) => {
                    // Only track the first error.
                    if failure.is_none() {
                        failure.replace((self.fed, MatchError::from(error)));
                    }
                }
            };
        }

        if failure.is_none() {
            for name in &self.required {
                if !self.matches.iter().any(|mt| &mt.name == name) {
                    failure.replace((self.fed, MatchError::MissingRequired(name.clone())));
                    break;
                }
            }
        }

        if failure.is_none() {
            'restriction: for match_tokens in &self.matches {
                if let Some(allowed) = self.choices.get(&match_tokens.name) {
                    for (offset, value) in &match_tokens.values {
                        if !allowed.contains(value) {
                            failure.replace((
                                *offset,
                                MatchError::InvalidChoice {
                                    name: match_tokens.name.clone(),
                                    value: value.clone(),
                                    choices: allowed.clone(),
                                },
                            ));
                            break 'restriction;
                        }
                    }
                }
            }
        }

        if failure.is_none() && !lenient {
            if let Some((offset, token)) = self.unknown.first() {
                failure.replace((*offset, MatchError::Unrecognized(token.clone())));
            }
        }

        let matches = Matches {
            values: self.matches,
            unknown: self.unknown,
        };

        match failure {
            Some((offset, error)) => Err((offset, error, matches)),
            None => Ok(matches),
        }
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}

fn is_dash_number(token: &str) -> bool {
    let mut characters = token.chars();
    characters.next() == Some('-') && characters.next().map_or(false, |c| c.is_ascii_digit())
}
