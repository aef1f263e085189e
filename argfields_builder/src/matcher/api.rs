#[cfg(test)]
use rand::{distributions::Standard, prelude::Distribution, Rng};

use crate::matcher::MatchTokens;
use crate::model::Arity;

pub(crate) type OffsetValue = (usize, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Bound {
    Range(u8, u8),
    Lower(u8),
}

impl From<Arity> for Bound {
    fn from(value: Arity) -> Self {
        match value {
            Arity::Precisely(n) => Bound::Range(n, n),
            Arity::Any => Bound::Lower(0),
            Arity::AtLeastOne => Bound::Lower(1),
        }
    }
}

#[cfg(test)]
impl Distribution<Bound> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Bound {
        match rng.gen_range(0..2) {
            0 => {
                let upper: u8 = rng.gen();

                if upper == 0 {
                    Bound::Range(0, upper)
                } else {
                    Bound::Range(rng.gen_range(0..upper), upper)
                }
            }
            1 => Bound::Lower(rng.gen()),
            _ => unreachable!("internal error - impossible gen_range()"),
        }
    }
}

/// A single long flag spelling for an option.
/// `implicit` carries the value captured when the flag is matched without consuming a token.
/// Toggle pairs use this to map `--x`/`--no-x` onto `true`/`false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FlagAlias {
    text: String,
    implicit: Option<String>,
}

impl FlagAlias {
    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            implicit: None,
        }
    }

    pub(crate) fn implicit(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            implicit: Some(value.into()),
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn value(&self) -> Option<&String> {
        self.implicit.as_ref()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct OptionConfig {
    name: String,
    aliases: Vec<FlagAlias>,
    short: Option<char>,
    bound: Bound,
    choices: Vec<String>,
    required: bool,
}

impl OptionConfig {
    pub(crate) fn new(
        name: impl Into<String>,
        aliases: Vec<FlagAlias>,
        short: Option<char>,
        bound: Bound,
    ) -> Self {
        Self {
            name: name.into(),
            aliases,
            short,
            bound,
            choices: Vec::default(),
            required: false,
        }
    }

    /// A value-taking `--name` option with no extra spellings.
    pub(crate) fn simple(name: impl Into<String>, short: Option<char>, bound: Bound) -> Self {
        let name = name.into();
        let alias = FlagAlias::plain(name.clone());
        Self::new(name, vec![alias], short, bound)
    }

    pub(crate) fn choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    pub(crate) fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn aliases(&self) -> &[FlagAlias] {
        &self.aliases
    }

    pub(crate) fn short(&self) -> &Option<char> {
        &self.short
    }

    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }

    pub(crate) fn choice_set(&self) -> &[String] {
        &self.choices
    }

    pub(crate) fn is_required(&self) -> bool {
        self.required
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ArgumentConfig {
    name: String,
    bound: Bound,
    choices: Vec<String>,
}

impl ArgumentConfig {
    pub(crate) fn new(name: impl Into<String>, bound: Bound) -> Self {
        Self {
            name: name.into(),
            bound,
            choices: Vec::default(),
        }
    }

    pub(crate) fn choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn bound(&self) -> Bound {
        self.bound
    }

    pub(crate) fn choice_set(&self) -> &[String] {
        &self.choices
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Matches {
    pub values: Vec<MatchTokens>,
    pub unknown: Vec<OffsetValue>,
}

impl Matches {
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|mt| mt.name == name)
    }
}
