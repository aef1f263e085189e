//! `argfields` is a declarative command line parser for Rust.
//!
//! Describe your program's parameters as a structured record: named, typed fields with
//! defaults and metadata.
//! `argfields` derives the command line parser from that description, and converts the
//! parsed input back into an instance of the record.
//! Specifically, `argfields` prioritizes the following design concerns:
//! * *Type safe argument parsing*:
//! The user should not call any `&str -> T` conversion functions directly; parsing flows
//! through `std::str::FromStr` or an explicitly registered converter.
//! * *Record oriented configuration*:
//! The natural unit of configuration is a struct of fields, not a bag of loose variables.
//! The [derive Api](./derive/index.html) performs the field "reflection" at compile time.
//! * *Argument vs. option paradigm*:
//! Arguments are parameters specified positionally on the Cli.
//! Options are parameters specified via `--..` or `-..` syntax.
//! * *Detailed yet basic UX*:
//! The help and error output of the Cli should be very detailed, leaving no ambiguity in
//! how to use the program.
//! However, we do not aim to support rich display configurations, such as colour output,
//! shell completions, etc.
//!
//! # Usage
//! via [derive Api](./derive/index.html):
//! ```no_run
//! use argfields::{derive::*, Arity, Field, RecordParser, Sequence};
//!
//! #[derive(Default, ArgRecord)]
//! #[arg(program = "summer")]
//! struct Parameters {
//!     #[arg(positional, nargs = Arity::AtLeastOne, help = "The items to sum.")]
//!     items: Vec<u32>,
//! }
//!
//! fn main() {
//!     let parameters = Parameters::from_env();
//!     println!("Sum: {}", parameters.items.iter().sum::<u32>());
//! }
//! ```
//! or equivalently via builder Api (this page):
//! ```no_run
//! use argfields::{Arity, Field, RecordParser, Sequence};
//!
//! fn main() {
//!     let mut items: Vec<u32> = Vec::default();
//!     let parser = RecordParser::new("summer")
//!         .add(
//!             Field::argument(Sequence::new(&mut items, Arity::AtLeastOne), "items")
//!                 .help("The items to sum."),
//!         )
//!         .build();
//!     parser.parse();
//!     println!("Sum: {}", items.iter().sum::<u32>());
//! }
//! ```
//!
//! Both of these generate the same Cli program:
//! ```console
//! $ summer -h
//! usage: summer [-h] ITEMS [...]
//! positional arguments:
//!  ITEMS [...]  The items to sum.
//! options:
//!  -h, --help   Show this help message and
//!               exit.
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer 1 blah
//! Parse error: cannot convert 'blah' to u32.
//! 1 blah
//!   ^
//! ```
//!
//! # Derive Api
//! We highly recommend using the [derive Api](./derive/index.html) to configure your Cli
//! program.
//! The next section explains the structure and semantics of `argfields` using the builder
//! Api, which applies to both builder and derive Apis.
//!
//! # Builder Api
//! Configure `argfields` by starting with a [`RecordParser`] and `add`ing fields.
//! There are two classes of field: positional ([`Field::argument`]) and flag based
//! ([`Field::option`], [`Field::toggle`], [`Field::switch`]).
//!
//! Each field takes a *binding* which serves to specify the following aspects on the Cli:
//! * The underlying type `T` of the field (ex: `u32`).
//! * Whether `T` is wrapped in a container type (ex: `Vec<T>` or `Option<T>`).
//! * The cardinality of the field (ex: 0, 1, n, at least 1, etc).
//!
//! All type `T` parsing in `argfields` is controlled by [`std::str::FromStr`], unless the
//! binding registers an explicit converter (`fn(&str) -> Result<T, String>`).
//!
//! ### Bindings
//! * [`Value`]: captures a single value into the field `T` (applies to both arguments and
//! options).
//! This is the most common binding to use in your Cli.
//! * [`Sequence`]: captures multiple values into the container field `C<T>` (applies to
//! both arguments and options).
//! This binding allows you to configure the cardinality (aka: [`Arity`]) for any container
//! that implements [Gatherable](./prelude/trait.Gatherable.html).
//! `argfields` provides the `Gatherable` implementations for `Vec<T>` and `HashSet<T>`.
//! * [`Toggle`]: captures the flag spelling itself rather than a Cli value (options only).
//! This is used by [`Field::toggle`] for the complementary `--NAME` / `--no-NAME` pair,
//! and by [`Field::switch`] for a single flag capturing a fixed target value.
//! * [`Maybe`]: captures at most one value into the field `Option<T>` (options only).
//!
//! ### Defaults & Initials
//! The defaults of your Cli come from the variable initializations when configuring
//! `argfields`; the parser only ever *assigns onto* those variables.
//! In the [derive Api](./derive/index.html), the record is constructed via `Default` and
//! then adjusted by any `#[arg(default = ..)]` / `#[arg(default_factory = ..)]`
//! attributes, before parsing begins.
//! In the case of `Sequence` fields, the initial value is *extended* by the Cli input
//! rather than overwritten.
//!
//! ### Choices
//! Restrict a field to a fixed set of values via
//! [Choices::choice](./prelude/trait.Choices.html#tymethod.choice).
//! Out-of-set input is rejected with a usage error naming the set, and the set is
//! displayed over the help message.
//!
//! # Cli Semantics
//! `argfields` parses the Cli tokens according to the following set of rules.
//! * Each field matches a number of tokens based off its cardinality.
//! * Arguments are matched based off positional ordering.
//! Once the expected cardinality is matched, the parser switches to the next field.
//! * Options are matched based off the `--NAME` (or short name `-N`) specifier.
//! Once specified, the cardinality is matched against the subsequent tokens.
//! * Toggle options match `--NAME` and `--no-NAME`, capturing `true` and `false`
//! respectively; repeats are allowed and the final spelling wins.
//! * The key-value pair of a cardinality=1 option may be separated with the `=` character
//! (`--key=123` is equivalent to `--key 123`, and likewise `-k=123`).
//! Only the first `=` character is used as a separator.
//! * A `--` token forces the remainder of the Cli to be treated positionally.
//! * A dash-prefixed number (ex: `-5`) is treated as a value, not as a flag.
//! * Stacked short flags (ex: `-abc`) are not recognized.
//!
//! ### Binding-Arity Interaction
//! **Argument**</br>
//! ```console
//! Binding          | Arity | Cardinality | Syntax           | Description
//! ----------------------------------------------------------------------------------------------
//! Value<T>         |       | [1]         | VALUE            | precisely 1
//! Sequence<C<T>>   | n     | [n]         | VALUE .. VALUE   | precisely n
//! Sequence<C<T>>   | *     | [0, ∞)      | [VALUE ...]      | any amount; captured greedily
//! Sequence<C<T>>   | +     | [1, ∞)      | VALUE [...]      | at least 1; captured greedily
//! ```
//!
//! **Option**</br>
//! ```console
//! Binding          | Arity | Cardinality | Syntax                   | Description
//! ------------------------------------------------------------------------------------------------
//! Value<T>         |       | [1]         | [--NAME VALUE]           | precisely 1
//! Sequence<C<T>>   | n     | [n]         | [--NAME VALUE .. VALUE]  | precisely n
//! Sequence<C<T>>   | *     | [0, ∞)      | [--NAME [VALUE ...]]     | any amount; captured greedily
//! Sequence<C<T>>   | +     | [1, ∞)      | [--NAME VALUE [...]]     | at least 1; captured greedily
//! Toggle<T>        |       | [0]         | [--NAME]                 | precisely 0
//! Maybe<T>         |       | [1]         | [--NAME VALUE]           | precisely 1
//! ```
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
pub mod derive;
pub use argfields_builder::*;
