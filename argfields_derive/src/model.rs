use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

/// An opaque expression lifted out of the derive input (a literal, path, etc).
/// Compared by token text, since `TokenStream` itself is not `Eq`.
#[derive(Debug, Clone)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

/// The raw `#[arg(..)]` contents: bare words and `key = value` assignments.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IntermediateAttributes {
    pub singletons: HashSet<String>,
    pub pairs: HashMap<String, Vec<DeriveValue>>,
}

/// How a record field presents on the command line.
#[derive(Debug, PartialEq, Eq)]
pub enum FieldKind {
    ScalarOption {
        short: Option<DeriveValue>,
    },
    OptionalOption {
        short: Option<DeriveValue>,
    },
    CollectionOption {
        nargs: DeriveValue,
        short: Option<DeriveValue>,
    },
    /// A `bool` field without custom flag spellings: `--x` / `--no-x`.
    Toggle {
        short: Option<DeriveValue>,
    },
    /// A `bool` field with custom flag spellings: a single flag capturing the
    /// non-default value.
    Switch {
        short: Option<DeriveValue>,
    },
    ScalarArgument,
    CollectionArgument {
        nargs: DeriveValue,
    },
}

/// Where a field's choice set comes from.
/// The two sources are mutually exclusive.
#[derive(Debug, PartialEq, Eq)]
pub enum ChoiceSource {
    /// `#[arg(choices)]`: delegate to the `arg_choices` function generated by
    /// `#[derive(ArgChoices)]` on the field's type.
    Derived { choice_type: DeriveValue },
    /// `#[arg(choices = [..])]`: an inline list of permitted values.
    Explicit { variants: Vec<DeriveValue> },
}

/// Where a field's default comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum DefaultSource {
    /// `#[arg(default = EXPR)]`
    Literal(DeriveValue),
    /// `#[arg(default_factory = PATH)]`
    Factory(DeriveValue),
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveField {
    pub field_name: syn::Ident,
    pub kind: FieldKind,
    /// The primary flag spelling, or the positional name.
    pub spelling: String,
    pub aliases: Vec<String>,
    pub help: Option<DeriveValue>,
    pub metavar: Option<DeriveValue>,
    pub choices: Option<ChoiceSource>,
    pub converter: Option<DeriveValue>,
    pub default: Option<DefaultSource>,
    pub required: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveRecord {
    pub struct_name: syn::Ident,
    pub program_name: DeriveValue,
    pub about: Option<DeriveValue>,
    /// Whether to also generate `to_argv` (opt-in via `#[arg(argv)]`).
    pub argv: bool,
    pub fields: Vec<DeriveField>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveChoices {
    pub enum_name: syn::Ident,
    pub variants: Vec<DeriveVariant>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveVariant {
    pub variant_name: syn::Ident,
    pub hidden: bool,
    pub help: Option<DeriveValue>,
}
