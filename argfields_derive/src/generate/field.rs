use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};

use crate::model::{ChoiceSource, DefaultSource, DeriveField, DeriveValue, FieldKind};

impl DeriveField {
    /// The `rp.add(..)` statement(s) configuring this field on the parser.
    pub(crate) fn generate(&self, parent: &syn::Ident) -> TokenStream2 {
        let field_name = &self.field_name;
        let spelling = &self.spelling;
        let binding = self.binding(parent);

        let (prelude, mut expression) = match &self.kind {
            FieldKind::ScalarOption { short }
            | FieldKind::OptionalOption { short }
            | FieldKind::CollectionOption { short, .. } => {
                let short = flatten(short);
                (
                    TokenStream2::default(),
                    quote! { Field::option(#binding, #spelling, #short) },
                )
            }
            FieldKind::Toggle { short } => {
                let short = flatten(short);
                (
                    TokenStream2::default(),
                    quote! { Field::toggle(#binding, #spelling, #short) },
                )
            }
            FieldKind::Switch { short } => {
                // A switch flips to the non-default value, known only once the
                // record's defaults are in place.
                let short = flatten(short);
                let target_ident = format_ident!("{field_name}_target");
                (
                    quote! {
                        let #target_ident = if #parent.#field_name { "false" } else { "true" };
                    },
                    quote! { Field::switch(#binding, #spelling, #short, #target_ident) },
                )
            }
            FieldKind::ScalarArgument | FieldKind::CollectionArgument { .. } => (
                TokenStream2::default(),
                quote! { Field::argument(#binding, #spelling) },
            ),
        };

        if let Some(help) = &self.help {
            let help = &help.tokens;
            expression = quote! { #expression.help(#help) };
        }

        if let Some(metavar) = &self.metavar {
            let metavar = &metavar.tokens;
            expression = quote! { #expression.metavar(#metavar) };
        }

        for alias in &self.aliases {
            expression = quote! { #expression.alias(#alias) };
        }

        if self.required {
            expression = quote! { #expression.required() };
        }

        match &self.choices {
            Some(ChoiceSource::Explicit { variants }) => {
                for variant in variants {
                    let variant = &variant.tokens;
                    expression = quote! { #expression.choice((#variant).into(), "") };
                }
            }
            Some(ChoiceSource::Derived { choice_type }) => {
                let choice_type = &choice_type.tokens;
                expression = quote! { #choice_type::arg_choices(#expression) };
            }
            None => {}
        };

        quote! {
            #prelude
            rp = rp.add(#expression);
        }
    }

    /// The default assignment applied to the record before parsing, if any.
    pub(crate) fn generate_default(&self, parent: &syn::Ident) -> Option<TokenStream2> {
        let field_name = &self.field_name;

        self.default.as_ref().map(|source| match source {
            DefaultSource::Literal(value) => {
                let value = &value.tokens;

                // Only string literals route through `Into`, so `"abc"` can fill a
                // `String` field.  Any other expression takes the field's type
                // directly, which keeps untyped integer literals working.
                match syn::parse2::<syn::Lit>(value.clone()) {
                    Ok(syn::Lit::Str(_)) => quote! { #parent.#field_name = (#value).into(); },
                    _ => quote! { #parent.#field_name = #value; },
                }
            }
            DefaultSource::Factory(path) => {
                let path = &path.tokens;
                quote! { #parent.#field_name = #path(); }
            }
        })
    }

    pub(crate) fn is_positional(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::ScalarArgument | FieldKind::CollectionArgument { .. }
        )
    }

    /// The statements serializing this field back into argv form.
    pub(crate) fn generate_argv(&self) -> TokenStream2 {
        let field_name = &self.field_name;
        let flag = format!("--{}", self.spelling);
        let negation = format!("--no-{}", self.spelling);

        match &self.kind {
            FieldKind::Toggle { .. } => quote! {
                if self.#field_name {
                    argv.push(#flag.to_string());
                } else {
                    argv.push(#negation.to_string());
                }
            },
            FieldKind::Switch { .. } => quote! {
                if self.#field_name {
                    argv.push(#flag.to_string());
                }
            },
            FieldKind::ScalarOption { .. } => quote! {
                argv.push(#flag.to_string());
                argv.push(self.#field_name.to_string());
            },
            FieldKind::OptionalOption { .. } => quote! {
                if let Some(value) = self.#field_name.as_ref() {
                    argv.push(#flag.to_string());
                    argv.push(value.to_string());
                }
            },
            FieldKind::CollectionOption { .. } => quote! {
                if !self.#field_name.is_empty() {
                    argv.push(#flag.to_string());
                    for item in self.#field_name.iter() {
                        argv.push(item.to_string());
                    }
                }
            },
            FieldKind::ScalarArgument => quote! {
                argv.push(self.#field_name.to_string());
            },
            FieldKind::CollectionArgument { .. } => quote! {
                for item in self.#field_name.iter() {
                    argv.push(item.to_string());
                }
            },
        }
    }

    fn binding(&self, parent: &syn::Ident) -> TokenStream2 {
        let field_name = &self.field_name;
        let converter = self.converter.as_ref().map(|value| &value.tokens);

        match &self.kind {
            FieldKind::Toggle { .. } | FieldKind::Switch { .. } => {
                quote! { Toggle::new(&mut #parent.#field_name) }
            }
            FieldKind::OptionalOption { .. } => match converter {
                Some(converter) => {
                    quote! { Maybe::with_converter(&mut #parent.#field_name, #converter) }
                }
                None => quote! { Maybe::new(&mut #parent.#field_name) },
            },
            FieldKind::CollectionOption { nargs, .. }
            | FieldKind::CollectionArgument { nargs } => {
                let nargs = &nargs.tokens;
                match converter {
                    Some(converter) => quote! {
                        Sequence::with_converter(&mut #parent.#field_name, #nargs, #converter)
                    },
                    None => quote! { Sequence::new(&mut #parent.#field_name, #nargs) },
                }
            }
            FieldKind::ScalarOption { .. } | FieldKind::ScalarArgument => match converter {
                Some(converter) => {
                    quote! { Value::with_converter(&mut #parent.#field_name, #converter) }
                }
                None => quote! { Value::new(&mut #parent.#field_name) },
            },
        }
    }
}

fn flatten(value: &Option<DeriveValue>) -> TokenStream2 {
    match value {
        Some(short) => {
            let tokens = &short.tokens;
            quote! { Some(#tokens) }
        }
        None => quote! { None },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::{Literal, Span};
    use quote::ToTokens;

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    fn scalar_option(spelling: &str) -> DeriveField {
        DeriveField {
            field_name: ident("my_field"),
            kind: FieldKind::ScalarOption { short: None },
            spelling: spelling.to_string(),
            aliases: Vec::default(),
            help: None,
            metavar: None,
            choices: None,
            converter: None,
            default: None,
            required: false,
        }
    }

    #[test]
    fn render_scalar_option() {
        // Setup
        let field = scalar_option("my-field");

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: option (Value :: new (& mut target . my_field) , \"my-field\" , None)) ;"
        );
    }

    #[test]
    fn render_scalar_option_short() {
        // Setup
        let mut field = scalar_option("my-field");
        field.kind = FieldKind::ScalarOption {
            short: Some(DeriveValue {
                tokens: Literal::character('m').into_token_stream(),
            }),
        };

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: option (Value :: new (& mut target . my_field) , \"my-field\" , Some ('m'))) ;"
        );
    }

    #[test]
    fn render_scalar_option_chained() {
        // Setup
        let mut field = scalar_option("my-field");
        field.help = Some(DeriveValue {
            tokens: Literal::string("abc 123").into_token_stream(),
        });
        field.metavar = Some(DeriveValue {
            tokens: Literal::string("N").into_token_stream(),
        });
        field.required = true;

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: option (Value :: new (& mut target . my_field) , \"my-field\" , None) . help (\"abc 123\") . metavar (\"N\") . required ()) ;"
        );
    }

    #[test]
    fn render_scalar_option_converter() {
        // Setup
        let mut field = scalar_option("my-field");
        field.converter = Some(DeriveValue {
            tokens: ident("parse_meters").into_token_stream(),
        });

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: option (Value :: with_converter (& mut target . my_field , parse_meters) , \"my-field\" , None)) ;"
        );
    }

    #[test]
    fn render_scalar_option_choices() {
        // Setup
        let mut field = scalar_option("my-field");
        field.choices = Some(ChoiceSource::Explicit {
            variants: vec![
                DeriveValue {
                    tokens: Literal::string("red").into_token_stream(),
                },
                DeriveValue {
                    tokens: Literal::string("blue").into_token_stream(),
                },
            ],
        });

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: option (Value :: new (& mut target . my_field) , \"my-field\" , None) . choice ((\"red\") . into () , \"\") . choice ((\"blue\") . into () , \"\")) ;"
        );
    }

    #[test]
    fn render_scalar_option_derived_choices() {
        // Setup
        let mut field = scalar_option("my-field");
        field.choices = Some(ChoiceSource::Derived {
            choice_type: DeriveValue {
                tokens: ident("Colour").into_token_stream(),
            },
        });

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Colour :: arg_choices (Field :: option (Value :: new (& mut target . my_field) , \"my-field\" , None))) ;"
        );
    }

    #[test]
    fn render_optional_option() {
        // Setup
        let mut field = scalar_option("my-field");
        field.kind = FieldKind::OptionalOption { short: None };

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: option (Maybe :: new (& mut target . my_field) , \"my-field\" , None)) ;"
        );
    }

    #[test]
    fn render_collection_option() {
        // Setup
        let mut field = scalar_option("my-field");
        field.kind = FieldKind::CollectionOption {
            nargs: DeriveValue {
                tokens: quote! { Arity::AtLeastOne },
            },
            short: None,
        };

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: option (Sequence :: new (& mut target . my_field , Arity :: AtLeastOne) , \"my-field\" , None)) ;"
        );
    }

    #[test]
    fn render_toggle() {
        // Setup
        let mut field = scalar_option("verbose");
        field.kind = FieldKind::Toggle { short: None };

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: toggle (Toggle :: new (& mut target . my_field) , \"verbose\" , None)) ;"
        );
    }

    #[test]
    fn render_switch() {
        // Setup
        let mut field = scalar_option("dry-run");
        field.kind = FieldKind::Switch {
            short: Some(DeriveValue {
                tokens: Literal::character('d').into_token_stream(),
            }),
        };

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"let my_field_target = if target . my_field {
 "false" }
 else {
 "true" }
 ;
 rp = rp . add (Field :: switch (Toggle :: new (& mut target . my_field) , "dry-run" , Some ('d') , my_field_target)) ;
"#
        );
    }

    #[test]
    fn render_scalar_argument() {
        // Setup
        let mut field = scalar_option("my_field");
        field.kind = FieldKind::ScalarArgument;

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: argument (Value :: new (& mut target . my_field) , \"my_field\")) ;"
        );
    }

    #[test]
    fn render_collection_argument() {
        // Setup
        let mut field = scalar_option("my_field");
        field.kind = FieldKind::CollectionArgument {
            nargs: DeriveValue {
                tokens: quote! { Arity::Any },
            },
        };

        // Execute
        let token_stream = field.generate(&ident("target"));

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "rp = rp . add (Field :: argument (Sequence :: new (& mut target . my_field , Arity :: Any) , \"my_field\")) ;"
        );
    }

    #[test]
    fn render_default_literal() {
        // Setup
        let mut field = scalar_option("my-field");
        field.default = Some(DefaultSource::Literal(DeriveValue {
            tokens: Literal::usize_unsuffixed(5).into_token_stream(),
        }));

        // Execute
        let token_stream = field.generate_default(&ident("target")).unwrap();

        // Verify
        // The untyped literal stays bare, taking the field's type in the assignment.
        assert_eq!(token_stream.to_string(), "target . my_field = 5 ;");
    }

    #[test]
    fn render_default_literal_string() {
        // Setup
        let mut field = scalar_option("my-field");
        field.default = Some(DefaultSource::Literal(DeriveValue {
            tokens: Literal::string("abc").into_token_stream(),
        }));

        // Execute
        let token_stream = field.generate_default(&ident("target")).unwrap();

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "target . my_field = (\"abc\") . into () ;"
        );
    }

    #[test]
    fn render_default_factory() {
        // Setup
        let mut field = scalar_option("my-field");
        field.default = Some(DefaultSource::Factory(DeriveValue {
            tokens: ident("make_path").into_token_stream(),
        }));

        // Execute
        let token_stream = field.generate_default(&ident("target")).unwrap();

        // Verify
        assert_eq!(token_stream.to_string(), "target . my_field = make_path () ;");
    }

    #[test]
    fn render_default_none() {
        // Setup
        let field = scalar_option("my-field");

        // Execute & verify
        assert!(field.generate_default(&ident("target")).is_none());
    }

    #[test]
    fn render_argv_toggle() {
        // Setup
        let mut field = scalar_option("verbose");
        field.kind = FieldKind::Toggle { short: None };

        // Execute
        let token_stream = field.generate_argv();

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"if self . my_field {
 argv . push ("--verbose" . to_string ()) ;
 }
 else {
 argv . push ("--no-verbose" . to_string ()) ;
 }
"#
        );
    }

    #[test]
    fn render_argv_scalar_option() {
        // Setup
        let field = scalar_option("my-field");

        // Execute
        let token_stream = field.generate_argv();

        // Verify
        assert_eq!(
            simple_format(token_stream.to_string()),
            r#"argv . push ("--my-field" . to_string ()) ;
 argv . push (self . my_field . to_string ()) ;
"#
        );
    }

    #[test]
    fn render_argv_scalar_argument() {
        // Setup
        let mut field = scalar_option("my_field");
        field.kind = FieldKind::ScalarArgument;

        // Execute
        let token_stream = field.generate_argv();

        // Verify
        assert_eq!(
            token_stream.to_string(),
            "argv . push (self . my_field . to_string ()) ;"
        );
    }

    fn simple_format(rust_str: String) -> String {
        rust_str
            .replace("{", "{\n")
            .replace("}", "}\n")
            .replace(";", ";\n")
    }
}
