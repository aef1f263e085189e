//! Derive Api for `argfields` configuration.
//!
//! ### Getting Started
//! Use the derive Api by starting with a record struct `S` instrumented with
//! `#[derive(ArgRecord)]`.
//! The record must also implement `Default`; `argfields` constructs the instance first and
//! the parser assigns onto its fields.
//! This generates the following functions:
//! * `S::from_env() -> S` parses the Cli parameters from [`std::env::args`], exiting the
//! process on a usage error.
//! * `S::parse_args(tokens: &[&str]) -> S` parses the given tokens, exiting the process on
//! a usage error.
//! * `S::try_parse_args(tokens: &[&str]) -> Result<S, i32>` is the non-exiting variant;
//! the `Err` carries the exit code (`0` after printing help, `1` on a usage error).
//! * `S::parse_known_args(tokens: &[&str]) -> (S, Vec<String>)` parses the given tokens,
//! returning the unrecognized ones (in input order) instead of erroring on them.
//! * `S::to_argv(&self) -> Vec<String>` serializes the record back into argv form,
//! inverting the parse (positional fields serialize first).
//! Generated only when the struct is instrumented with `#[arg(argv)]`.
//!
//! `argfields` will do its best to infer the intended Cli from the record structure `S`.
//!
//! ```ignore
//! use argfields::{derive::*, Field, Maybe, RecordParser, Toggle, Value};
//!
//! #[derive(Default, ArgRecord)]
//! struct Parameters {
//!     apple: usize,
//!     banana: bool,
//!     daikon_root: Option<String>,
//! }
//!
//! fn main() {
//!     let parameters = Parameters::from_env();
//!     // ..
//! }
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ demo_derived -h
//! usage: demo_derived [-h] [--apple APPLE] [--banana] [--no-banana] [--daikon-root DAIKON_ROOT]
//! options:
//!  -h, --help                  Show this help message and exit.
//!  --apple APPLE
//!  --banana, --no-banana
//!  --daikon-root DAIKON_ROOT
//! ```
//!
//! ### Record Configuration
//! The struct itself may be instrumented with the following attributes:
//! * `#[arg(program = "..")]` sets the program name shown in the usage line
//! (default: `env!("CARGO_CRATE_NAME")`).
//! * `#[arg(about = "..")]` documents the program over the help message.
//! * `#[arg(argv)]` opts in to the generated `to_argv` function.
//!
//! ### Field Configuration
//! The implicit Cli inference uses the following rules; every field is an option unless
//! marked positional:
//! ```console
//! Type        | Field
//! ---------------------------------------------------------------------
//! Option<T>   | Field::option(Maybe::new(..), ..)
//! Vec<T>      | Field::option(Sequence::new(.., Arity::AtLeastOne), ..)
//! HashSet<T>  | Field::option(Sequence::new(.., Arity::AtLeastOne), ..)
//! bool        | Field::toggle(Toggle::new(..), ..)
//! T           | Field::option(Value::new(..), ..)
//! ```
//!
//! The derived flag name is the field name with underscores hyphenated (`_` → `-`);
//! `#[arg(keep_underscores)]` suppresses the hyphenation.
//! In all cases the parsed value is written back to the field itself; custom flag
//! spellings never change the destination.
//!
//! Notice, these implicit rules do not capture all possible `argfields` configurations.
//! Therefore, we provide the additional explicit field attributes, which may be combined
//! as necessary.
//! * `#[arg(positional)]` to use a positional `Field::argument(..)`.
//! Positional fields may not also declare `required`, a short name, or dash-prefixed
//! custom args.
//! * `#[arg(args = [..])]` to set the flag spellings explicitly.
//! Entries `"--NAME"` are long spellings (the first becomes the primary name, the rest
//! aliases), an entry `"-N"` is the short name, and an entry without a dash prefix names a
//! positional.
//! A `bool` field with custom spellings becomes a single `Field::switch(..)` capturing
//! the non-default value, instead of the `--NAME` / `--no-NAME` toggle pair.
//! * `#[arg(short = C)]` to set the short name for an option field.
//! `C` must be a char value (ex: `'c'`).
//! * `#[arg(nargs = A)]` to use `Sequence::new(.., A)`, where `A` is an
//! [Arity](../enum.Arity.html) variant.
//! This is useful both for non-`Vec`/`HashSet`
//! [Gatherable](../prelude/trait.Gatherable.html) types, as well as to control the arity.
//! * `#[arg(converter = F)]` to convert values via `F` instead of `std::str::FromStr`,
//! where `F` is a `fn(&str) -> Result<T, String>`.
//! A field whose type does not implement `FromStr` must register a converter.
//! * `#[arg(required)]` to make an option field mandatory.
//! Required `bool` fields keep the toggle pair and must be spelled out on the Cli.
//! * `#[arg(default = EXPR)]` / `#[arg(default_factory = F)]` to adjust the field after
//! `Default` construction and before parsing.
//! These two are mutually exclusive.
//!
//! ### Help Messages
//! The following field attributes configure the Cli help message.
//! * `#[arg(help = "..")]` defines the help message for the field.
//! * `#[arg(metavar = "..")]` overrides the value placeholder shown in the help grammar.
//! * `#[arg(choices = [..])]` restricts the field to the listed values.
//! * `#[arg(choices)]` instructs `argfields` to use the choice set generated by
//! instrumenting the field's enum type with `#[derive(ArgChoices)]`.
//! The two `choices` forms are mutually exclusive.
//!
//! ### Choices
//! In the case of enums, instrument with `#[derive(ArgChoices)]` to generate the choice
//! setup function `arg_choices`.
//! The enum must implement `std::fmt::Display` (for the choice set display) and
//! `std::str::FromStr` (for the parse), such that the two invert each other.
//! The variants may be configured with the following attributes:
//! * `#[arg(help = "..")]` defines the help message for the variant.
//! * `#[arg(hidden)]` removes the variant from the choice set entirely.
//! A hidden variant is neither displayed over the help message nor accepted on the Cli.
//!
//! For example:
//! ```ignore
//! #[derive(ArgChoices)]
//! enum Enumeration {
//!     VariantA,
//!     // the above generates:
//!     //  .choice(Enumeration::VariantA, "")
//!
//!     #[arg(help = "the variant B choice")]
//!     VariantB,
//!     // the above generates:
//!     //  .choice(Enumeration::VariantB, "the variant B choice")
//!
//!     #[arg(hidden)]
//!     VariantC,
//!     // the above does *not* instrument a `.choice(..)`
//! }
//! ```

pub use argfields_derive::*;
