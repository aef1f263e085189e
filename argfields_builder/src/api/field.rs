use std::fmt::Display;

use crate::api::capture::{AsArgument, AsOption, CaptureError, TypedBinding};
use crate::constant::NEGATION_PREFIX;
use crate::matcher::{ArgumentConfig, FlagAlias, OptionConfig};
use crate::model::Arity;
use crate::parser::{
    ArgumentCapture, ArgumentParameter, OptionCapture, OptionParameter, Untyped,
};
use crate::prelude::Choices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldClass {
    Opt,
    Toggle,
    Switch,
    Arg,
}

/// Type-erasure wrapper over a `TypedBinding`, so the parser machinery needn't be generic.
pub(crate) struct ErasedBinding<'a, T: 'a> {
    inner: Box<dyn TypedBinding<'a, T> + 'a>,
}

impl<'a, T> ErasedBinding<'a, T> {
    fn hold(binding: impl TypedBinding<'a, T> + 'a) -> Self {
        Self {
            inner: Box::new(binding),
        }
    }
}

impl<'a, T> Untyped for ErasedBinding<'a, T> {
    fn matched(&mut self) {
        self.inner.matched();
    }

    fn capture(&mut self, token: &str) -> Result<(), CaptureError> {
        self.inner.capture(token)
    }
}

pub(super) struct FieldInner<'a, T> {
    class: FieldClass,
    binding: ErasedBinding<'a, T>,
    arity: Arity,
    name: String,
    short: Option<char>,
    aliases: Vec<String>,
    implicit: Option<String>,
    help: Option<String>,
    metavar: Option<String>,
    required: bool,
    choices: Vec<(String, String)>,
    // Invalid builder combinations are recorded here and surfaced at build time.
    pub(super) deferred_error: Option<String>,
}

/// Describes a single record field on the command line: how it is spelled, how many
/// tokens it consumes, and the binding its values are written through.
pub struct Field<'a, T>(pub(super) FieldInner<'a, T>);

impl<'a, T> Field<'a, T> {
    fn new(
        class: FieldClass,
        binding: impl TypedBinding<'a, T> + 'a,
        name: impl Into<String>,
        short: Option<char>,
        implicit: Option<String>,
    ) -> Self {
        let arity = binding.arity();
        Self(FieldInner {
            class,
            binding: ErasedBinding::hold(binding),
            arity,
            name: name.into(),
            short,
            aliases: Vec::default(),
            implicit,
            help: None,
            metavar: None,
            required: false,
            choices: Vec::default(),
            deferred_error: None,
        })
    }

    fn defer(&mut self, message: String) {
        self.0.deferred_error.get_or_insert(message);
    }

    /// Create an optional (flag based) field.
    ///
    /// ### Example
    /// ```
    /// # use argfields_builder as argfields;
    /// use argfields::{Field, Value};
    ///
    /// let mut retries: u32 = 0;
    /// Field::option(Value::new(&mut retries), "retries", Some('r'));
    /// ```
    pub fn option(
        binding: impl TypedBinding<'a, T> + AsOption + 'a,
        name: impl Into<String>,
        short: Option<char>,
    ) -> Self {
        Self::new(FieldClass::Opt, binding, name, short, None)
    }

    /// Create a toggle field, spelled both `--NAME` and `--no-NAME`.
    ///
    /// ### Example
    /// ```
    /// # use argfields_builder as argfields;
    /// use argfields::{Field, Toggle};
    ///
    /// let mut verbose = false;
    /// Field::toggle(Toggle::new(&mut verbose), "verbose", Some('v'));
    /// ```
    pub fn toggle(
        binding: impl TypedBinding<'a, T> + AsOption + 'a,
        name: impl Into<String>,
        short: Option<char>,
    ) -> Self {
        Self::new(FieldClass::Toggle, binding, name, short, None)
    }

    /// Create a switch field: a single flag which captures `target` when present.
    ///
    /// ### Example
    /// ```
    /// # use argfields_builder as argfields;
    /// use argfields::{Field, Toggle};
    ///
    /// let mut dry_run = false;
    /// Field::switch(Toggle::new(&mut dry_run), "dry-run", None, "true");
    /// ```
    pub fn switch(
        binding: impl TypedBinding<'a, T> + AsOption + 'a,
        name: impl Into<String>,
        short: Option<char>,
        target: impl Into<String>,
    ) -> Self {
        Self::new(FieldClass::Switch, binding, name, short, Some(target.into()))
    }

    /// Create a positional field.
    ///
    /// ### Example
    /// ```
    /// # use argfields_builder as argfields;
    /// use argfields::{Field, Value};
    ///
    /// let mut input = String::default();
    /// Field::argument(Value::new(&mut input), "input");
    /// ```
    pub fn argument(
        binding: impl TypedBinding<'a, T> + AsArgument + 'a,
        name: impl Into<String>,
    ) -> Self {
        Self::new(FieldClass::Arg, binding, name, None, None)
    }

    /// Document the help message for this field.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.0.help = Some(description.into());
        self
    }

    /// Override the value placeholder shown in the help grammar.
    pub fn metavar(mut self, metavar: impl Into<String>) -> Self {
        self.0.metavar = Some(metavar.into());
        self
    }

    /// Add an extra long flag spelling for this field.
    /// Toggles mirror the alias with its `no-` negation.
    /// Invalid on positional fields, which carry no flag spellings.
    pub fn alias(mut self, spelling: impl Into<String>) -> Self {
        if self.0.class == FieldClass::Arg {
            self.defer(format!(
                "Cannot alias the positional parameter '{}'.",
                self.0.name
            ));
        } else {
            self.0.aliases.push(spelling.into());
        }

        self
    }

    /// Mark this optional field as required.
    /// Invalid on positional fields, which are always required by position.
    pub fn required(mut self) -> Self {
        if self.0.class == FieldClass::Arg {
            self.defer(format!(
                "Cannot require the positional parameter '{}'.",
                self.0.name
            ));
        } else {
            self.0.required = true;
        }

        self
    }

    pub(crate) fn class(&self) -> FieldClass {
        self.0.class
    }
}

impl<'a, T: Display> Choices<T> for Field<'a, T> {
    fn choice(mut self, variant: T, description: impl Into<String>) -> Self {
        let value = variant.to_string();
        let description = description.into();

        match self.0.choices.iter_mut().find(|(v, _)| v == &value) {
            Some((_, existing)) => *existing = description,
            None => self.0.choices.push((value, description)),
        };

        self
    }
}

fn flag_aliases(inner: &FieldInner<'_, impl Sized>) -> Vec<FlagAlias> {
    let mut spellings = vec![inner.name.clone()];
    spellings.extend(inner.aliases.iter().cloned());
    let mut aliases = Vec::default();

    for spelling in spellings {
        match inner.class {
            FieldClass::Opt => aliases.push(FlagAlias::plain(spelling)),
            FieldClass::Toggle => {
                aliases.push(FlagAlias::implicit(&spelling, "true"));
                aliases.push(FlagAlias::implicit(
                    format!("{NEGATION_PREFIX}{spelling}"),
                    "false",
                ));
            }
            FieldClass::Switch => {
                let target = inner
                    .implicit
                    .clone()
                    .expect("internal error - switch field must carry a target");
                aliases.push(FlagAlias::implicit(spelling, target));
            }
            FieldClass::Arg => {
                unreachable!("internal error - positional field cannot produce flag spellings")
            }
        };
    }

    aliases
}

impl<'a, T> From<&Field<'a, T>> for OptionConfig {
    fn from(field: &Field<'a, T>) -> Self {
        let inner = &field.0;
        OptionConfig::new(
            inner.name.clone(),
            flag_aliases(inner),
            inner.short,
            inner.arity.into(),
        )
        .choices(inner.choices.iter().map(|(v, _)| v.clone()).collect())
        .required(inner.required)
    }
}

impl<'a, T> From<&Field<'a, T>> for ArgumentConfig {
    fn from(field: &Field<'a, T>) -> Self {
        let inner = &field.0;
        ArgumentConfig::new(inner.name.clone(), inner.arity.into())
            .choices(inner.choices.iter().map(|(v, _)| v.clone()).collect())
    }
}

impl<'a, T> From<&Field<'a, T>> for OptionParameter {
    fn from(field: &Field<'a, T>) -> Self {
        let inner = &field.0;
        let negation = match inner.class {
            FieldClass::Toggle => Some(format!("{NEGATION_PREFIX}{}", inner.name)),
            _ => None,
        };
        OptionParameter {
            name: inner.name.clone(),
            short: inner.short,
            arity: inner.arity,
            help: inner.help.clone(),
            metavar: inner.metavar.clone(),
            negation,
            required: inner.required,
            choices: inner.choices.clone(),
        }
    }
}

impl<'a, T> From<&Field<'a, T>> for ArgumentParameter {
    fn from(field: &Field<'a, T>) -> Self {
        let inner = &field.0;
        ArgumentParameter {
            name: inner.name.clone(),
            arity: inner.arity,
            help: inner.help.clone(),
            metavar: inner.metavar.clone(),
            choices: inner.choices.clone(),
        }
    }
}

impl<'a, T> From<Field<'a, T>> for OptionCapture<'a> {
    fn from(field: Field<'a, T>) -> Self {
        let config = OptionConfig::from(&field);
        (config, Box::new(field.0.binding))
    }
}

impl<'a, T> From<Field<'a, T>> for ArgumentCapture<'a> {
    fn from(field: Field<'a, T>) -> Self {
        let config = ArgumentConfig::from(&field);
        (config, Box::new(field.0.binding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::binding::{Maybe, Sequence, Toggle, Value};
    use crate::matcher::Bound;

    #[test]
    fn field_option() {
        let mut variable: u32 = 0;
        let field = Field::option(Value::new(&mut variable), "retries", Some('r'))
            .help("How many times to retry.")
            .alias("retry-count");

        assert_eq!(field.class(), FieldClass::Opt);

        let config = OptionConfig::from(&field);
        assert_eq!(config.name(), "retries");
        assert_eq!(config.short(), &Some('r'));
        assert_eq!(config.bound(), Bound::Range(1, 1));
        assert_eq!(
            config.aliases(),
            &[FlagAlias::plain("retries"), FlagAlias::plain("retry-count")]
        );
        assert!(!config.is_required());

        let parameter = OptionParameter::from(&field);
        assert_eq!(parameter.name, "retries");
        assert_eq!(parameter.help, Some("How many times to retry.".to_string()));
        assert_eq!(parameter.negation, None);
    }

    #[test]
    fn field_option_required() {
        let mut variable: u32 = 0;
        let field = Field::option(Value::new(&mut variable), "retries", None).required();

        let config = OptionConfig::from(&field);
        assert!(config.is_required());
    }

    #[test]
    fn field_toggle() {
        let mut variable = false;
        let field = Field::toggle(Toggle::new(&mut variable), "verbose", Some('v'));

        let config = OptionConfig::from(&field);
        assert_eq!(config.bound(), Bound::Range(0, 0));
        assert_eq!(
            config.aliases(),
            &[
                FlagAlias::implicit("verbose", "true"),
                FlagAlias::implicit("no-verbose", "false"),
            ]
        );

        let parameter = OptionParameter::from(&field);
        assert_eq!(parameter.negation, Some("no-verbose".to_string()));
    }

    #[test]
    fn field_toggle_alias() {
        let mut variable = false;
        let field = Field::toggle(Toggle::new(&mut variable), "verbose", None).alias("chatty");

        let config = OptionConfig::from(&field);
        assert_eq!(
            config.aliases(),
            &[
                FlagAlias::implicit("verbose", "true"),
                FlagAlias::implicit("no-verbose", "false"),
                FlagAlias::implicit("chatty", "true"),
                FlagAlias::implicit("no-chatty", "false"),
            ]
        );
    }

    #[test]
    fn field_switch() {
        let mut variable = false;
        let field = Field::switch(Toggle::new(&mut variable), "dry-run", None, "true");

        let config = OptionConfig::from(&field);
        assert_eq!(config.aliases(), &[FlagAlias::implicit("dry-run", "true")]);

        let parameter = OptionParameter::from(&field);
        assert_eq!(parameter.negation, None);
    }

    #[test]
    fn field_maybe() {
        let mut variable: Option<u32> = None;
        let field = Field::option(Maybe::new(&mut variable), "limit", None);

        let config = OptionConfig::from(&field);
        assert_eq!(config.bound(), Bound::Range(1, 1));
    }

    #[test]
    fn field_argument() {
        let mut variable: Vec<u32> = Vec::default();
        let field = Field::argument(Sequence::new(&mut variable, Arity::AtLeastOne), "items")
            .help("The items.");

        assert_eq!(field.class(), FieldClass::Arg);

        let config = ArgumentConfig::from(&field);
        assert_eq!(config.name(), "items");
        assert_eq!(config.bound(), Bound::Lower(1));

        let parameter = ArgumentParameter::from(&field);
        assert_eq!(parameter.name, "items");
        assert_eq!(parameter.help, Some("The items.".to_string()));
    }

    #[test]
    fn field_argument_invalid_builders() {
        let mut variable = String::default();
        let field = Field::argument(Value::new(&mut variable), "input")
            .alias("source")
            .required();

        // The first invalid combination wins.
        assert_eq!(
            field.0.deferred_error,
            Some("Cannot alias the positional parameter 'input'.".to_string())
        );
    }

    #[test]
    fn field_choices() {
        let mut variable = String::default();
        let field = Field::argument(Value::new(&mut variable), "colour")
            .choice("red".to_string(), "The colour of burning.")
            .choice("blue".to_string(), "The colour of falling.")
            .choice("red".to_string(), "The colour of fire.");

        let config = ArgumentConfig::from(&field);
        assert_eq!(
            config.choice_set(),
            &["red".to_string(), "blue".to_string()]
        );

        let parameter = ArgumentParameter::from(&field);
        assert_eq!(
            parameter.choices,
            vec![
                ("red".to_string(), "The colour of fire.".to_string()),
                ("blue".to_string(), "The colour of falling.".to_string()),
            ]
        );
    }
}
