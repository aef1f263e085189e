//! Procedural macros for `argfields`.
//! See the [derive module](https://docs.rs/argfields/latest/argfields/derive/index.html) for usage details.
extern crate proc_macro;

mod generate;
mod load;
mod model;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

use crate::model::{DeriveChoices, DeriveRecord};

pub(crate) const MACRO_ARG_RECORD: &str = "ArgRecord";
pub(crate) const MACRO_ARG_CHOICES: &str = "ArgChoices";

/// Generate a command line parser from the record structure.
///
/// The record must also derive (or otherwise implement) `Default`.
/// Configure the parser via `#[arg(..)]` attributes on the struct and its fields.
#[proc_macro_derive(ArgRecord, attributes(arg))]
pub fn arg_record(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveRecord::try_from(ast).and_then(TokenStream2::try_from) {
        Ok(token_stream) => token_stream.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

/// Generate a choice set from the enum structure, for use with `#[arg(choices)]`.
///
/// Each variant becomes a permitted value; instrument variants with
/// `#[arg(help = "..")]` or `#[arg(hidden)]` to adjust the help display.
#[proc_macro_derive(ArgChoices, attributes(arg))]
pub fn arg_choices(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveChoices::try_from(ast).and_then(TokenStream2::try_from) {
        Ok(token_stream) => token_stream.into(),
        Err(error) => error.to_compile_error().into(),
    }
}
