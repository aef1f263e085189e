use proc_macro2::Literal;
use quote::{quote, ToTokens};

use crate::load::incompatible_error;
use crate::model::{
    ChoiceSource, DefaultSource, DeriveField, DeriveValue, FieldKind, IntermediateAttributes,
};

/// The field shape implied by the declared type, before attributes weigh in.
enum Inferred {
    Optional { inner: DeriveValue },
    Collection { inner: DeriveValue },
    Bool,
    Scalar { whole: DeriveValue },
}

/// The flag spellings carved out of `args = [..]`.
#[derive(Default)]
struct CustomSpellings {
    longs: Vec<String>,
    short: Option<DeriveValue>,
    positional: Option<String>,
}

impl TryFrom<&syn::Field> for DeriveField {
    type Error = syn::Error;

    fn try_from(value: &syn::Field) -> Result<Self, Self::Error> {
        let mut attributes = IntermediateAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident("arg") {
                attributes = IntermediateAttributes::from(attribute);
            }
        }

        let field_name = value
            .ident
            .clone()
            .expect("derive field must carry an identifier");
        let explicit_positional = attributes.singletons.contains("positional");
        let explicit_required = attributes.singletons.contains("required");
        let keep_underscores = attributes.singletons.contains("keep_underscores");
        let derived_choices = attributes.singletons.contains("choices");

        let help = single(&attributes, "help");
        let metavar = single(&attributes, "metavar");
        let converter = single(&attributes, "converter");
        let attribute_short = single(&attributes, "short");
        let explicit_choices = single(&attributes, "choices");
        let default_literal = single(&attributes, "default");
        let default_factory = single(&attributes, "default_factory");
        let (explicit_nargs, nargs) = match single(&attributes, "nargs") {
            Some(value) => (true, value),
            None => (
                false,
                DeriveValue {
                    tokens: quote! { Arity::AtLeastOne },
                },
            ),
        };

        if derived_choices && explicit_choices.is_some() {
            return Err(incompatible_error(
                "choice sources",
                &field_name,
                "#[arg(choices)]",
                "#[arg(choices = [..])]",
            ));
        }

        let default = match (default_literal, default_factory) {
            (Some(_), Some(_)) => {
                return Err(incompatible_error(
                    "defaults",
                    &field_name,
                    "#[arg(default = ..)]",
                    "#[arg(default_factory = ..)]",
                ));
            }
            (Some(literal), None) => Some(DefaultSource::Literal(literal)),
            (None, Some(factory)) => Some(DefaultSource::Factory(factory)),
            (None, None) => None,
        };

        let customs = match attributes.pairs.get("args") {
            Some(values) => {
                let tokens = values
                    .first()
                    .expect("attribute pair 'args' must contain non-empty values")
                    .tokens
                    .clone();
                parse_custom_spellings(&field_name, tokens)?
            }
            None => CustomSpellings::default(),
        };

        let short = match (attribute_short, customs.short) {
            (Some(_), Some(_)) => {
                return Err(incompatible_error(
                    "short names",
                    &field_name,
                    "#[arg(short = ..)]",
                    "#[arg(args = [\"-X\", ..])]",
                ));
            }
            (Some(value), None) | (None, Some(value)) => Some(value),
            (None, None) => None,
        };

        let positional = explicit_positional || customs.positional.is_some();

        if positional {
            disallow(
                &field_name,
                "positional",
                &[
                    (&explicit_required, "#[arg(required)]"),
                    (&short.is_some(), "a short name"),
                    (&!customs.longs.is_empty(), "dash-prefixed custom args"),
                ],
            )?;
        }

        let inferred = infer(&field_name, &value.ty, explicit_nargs)?;

        if matches!(inferred, Inferred::Bool) {
            disallow(
                &field_name,
                "bool",
                &[
                    (&positional, "#[arg(positional)]"),
                    (&converter.is_some(), "#[arg(converter = ..)]"),
                    (&explicit_nargs, "#[arg(nargs = ..)]"),
                    (
                        &(derived_choices || explicit_choices.is_some()),
                        "choices",
                    ),
                ],
            )?;
        }

        let choices = if derived_choices {
            let choice_type = match &inferred {
                Inferred::Optional { inner } | Inferred::Collection { inner } => inner.clone(),
                Inferred::Scalar { whole } => whole.clone(),
                Inferred::Bool => unreachable!("bool choices rejected above"),
            };
            Some(ChoiceSource::Derived { choice_type })
        } else if let Some(list) = explicit_choices {
            Some(ChoiceSource::Explicit {
                variants: parse_value_list(&field_name, list.tokens)?,
            })
        } else {
            None
        };

        let spelling = match &customs.positional {
            Some(name) => name.clone(),
            None => match customs.longs.first() {
                Some(primary) => primary.clone(),
                None => {
                    if positional || keep_underscores {
                        field_name.to_string()
                    } else {
                        field_name.to_string().replace('_', "-")
                    }
                }
            },
        };
        let aliases = customs.longs.iter().skip(1).cloned().collect();

        let kind = match inferred {
            Inferred::Optional { .. } => {
                if positional {
                    return Err(syn::Error::new(
                        field_name.span(),
                        "Invalid - `Option<..>` fields cannot be positional.",
                    ));
                }
                FieldKind::OptionalOption { short }
            }
            Inferred::Collection { .. } => {
                if positional {
                    FieldKind::CollectionArgument { nargs }
                } else {
                    FieldKind::CollectionOption { nargs, short }
                }
            }
            Inferred::Bool => {
                if customs.longs.is_empty() {
                    FieldKind::Toggle { short }
                } else {
                    FieldKind::Switch { short }
                }
            }
            Inferred::Scalar { .. } => {
                if positional {
                    FieldKind::ScalarArgument
                } else {
                    FieldKind::ScalarOption { short }
                }
            }
        };

        Ok(DeriveField {
            field_name,
            kind,
            spelling,
            aliases,
            help,
            metavar,
            choices,
            converter,
            default,
            required: explicit_required,
        })
    }
}

fn single(attributes: &IntermediateAttributes, key: &str) -> Option<DeriveValue> {
    attributes.pairs.get(key).map(|values| {
        let tokens = values
            .first()
            .expect("attribute pair must contain non-empty values")
            .tokens
            .clone();
        DeriveValue { tokens }
    })
}

fn infer(
    field_name: &syn::Ident,
    ty: &syn::Type,
    explicit_nargs: bool,
) -> Result<Inferred, syn::Error> {
    match ty {
        syn::Type::Path(path) => match &path.path.segments.first() {
            Some(segment) => {
                let ident = segment.ident.to_string();

                match ident.as_str() {
                    "Option" => Ok(Inferred::Optional {
                        inner: inner_type(field_name, segment)?,
                    }),
                    "Vec" | "HashSet" => Ok(Inferred::Collection {
                        inner: inner_type(field_name, segment)?,
                    }),
                    "bool" => Ok(Inferred::Bool),
                    _ => {
                        if explicit_nargs {
                            // An explicit arity forces the gathering treatment,
                            // for custom container types.
                            Ok(Inferred::Collection {
                                inner: DeriveValue {
                                    tokens: ty.to_token_stream(),
                                },
                            })
                        } else {
                            Ok(Inferred::Scalar {
                                whole: DeriveValue {
                                    tokens: ty.to_token_stream(),
                                },
                            })
                        }
                    }
                }
            }
            None => {
                let tts = ty.to_token_stream();
                let type_string = quote! {
                    #tts
                };
                panic!("Empty field path: {type_string}");
            }
        },
        _ => {
            let tts = ty.to_token_stream();
            let field_string = quote! {
                #tts
            };
            panic!("Unparseable field: {field_string}");
        }
    }
}

fn inner_type(field_name: &syn::Ident, segment: &syn::PathSegment) -> Result<DeriveValue, syn::Error> {
    match &segment.arguments {
        syn::PathArguments::AngleBracketed(generics) => match generics.args.first() {
            Some(syn::GenericArgument::Type(inner)) => Ok(DeriveValue {
                tokens: inner.to_token_stream(),
            }),
            _ => Err(syn::Error::new(
                field_name.span(),
                format!("Invalid - `{}<..>` must carry a type parameter.", segment.ident),
            )),
        },
        _ => Err(syn::Error::new(
            field_name.span(),
            format!("Invalid - `{}<..>` must carry a type parameter.", segment.ident),
        )),
    }
}

fn parse_custom_spellings(
    field_name: &syn::Ident,
    tokens: proc_macro2::TokenStream,
) -> Result<CustomSpellings, syn::Error> {
    let mut customs = CustomSpellings::default();

    for element in parse_value_list(field_name, tokens)? {
        let literal: syn::LitStr = syn::parse2(element.tokens).map_err(|_| {
            syn::Error::new(
                field_name.span(),
                "Invalid - `args = [..]` entries must be string literals.",
            )
        })?;
        let spelling = literal.value();

        if let Some(long) = spelling.strip_prefix("--") {
            customs.longs.push(long.to_string());
        } else if let Some(short) = spelling.strip_prefix('-') {
            let mut characters = short.chars();
            match (characters.next(), characters.next()) {
                (Some(character), None) => {
                    customs.short.replace(DeriveValue {
                        tokens: Literal::character(character).into_token_stream(),
                    });
                }
                _ => {
                    return Err(syn::Error::new(
                        field_name.span(),
                        format!("Invalid - short arg `-{short}` must be a single character."),
                    ));
                }
            }
        } else {
            if customs.positional.replace(spelling).is_some() {
                return Err(syn::Error::new(
                    field_name.span(),
                    "Invalid - `args = [..]` may name at most one positional.",
                ));
            }
        }
    }

    if customs.positional.is_some() && (!customs.longs.is_empty() || customs.short.is_some()) {
        return Err(incompatible_error(
            "args",
            field_name,
            "a positional name",
            "dash-prefixed spellings",
        ));
    }

    Ok(customs)
}

fn parse_value_list(
    field_name: &syn::Ident,
    tokens: proc_macro2::TokenStream,
) -> Result<Vec<DeriveValue>, syn::Error> {
    let array: syn::ExprArray = syn::parse2(tokens).map_err(|_| {
        syn::Error::new(
            field_name.span(),
            "Invalid - expecting a `[..]` list expression.",
        )
    })?;

    Ok(array
        .elems
        .iter()
        .map(|element| DeriveValue {
            tokens: element.to_token_stream(),
        })
        .collect())
}

fn disallow(
    field_name: &syn::Ident,
    antecedent: impl Into<String>,
    condition_names: &[(&bool, &str)],
) -> Result<(), syn::Error> {
    let antecedent = antecedent.into();

    for (condition, name) in condition_names {
        if **condition {
            return Err(incompatible_error(
                "field",
                field_name,
                antecedent.as_str(),
                *name,
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_contains;
    use proc_macro2::Span;
    use quote::ToTokens;

    fn field_of(definition: &str) -> syn::Field {
        let input: syn::DeriveInput =
            syn::parse_str(&format!("struct Record {{ {definition} }}")).unwrap();
        match input.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(fields),
                ..
            }) => fields.named.first().unwrap().clone(),
            _ => panic!("test definition must be a named struct"),
        }
    }

    fn ident(name: &str) -> syn::Ident {
        syn::Ident::new(name, Span::call_site())
    }

    //# Implicit construction

    #[test]
    fn construct_scalar_option() {
        // Setup
        let input = field_of("my_field: usize");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field,
            DeriveField {
                field_name: ident("my_field"),
                kind: FieldKind::ScalarOption { short: None },
                spelling: "my-field".to_string(),
                aliases: Vec::default(),
                help: None,
                metavar: None,
                choices: None,
                converter: None,
                default: None,
                required: false,
            }
        );
    }

    #[test]
    fn construct_scalar_option_keep_underscores() {
        // Setup
        let input = field_of("#[arg(keep_underscores)] my_field: usize");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(derive_field.spelling, "my_field");
    }

    #[test]
    fn construct_optional_option() {
        // Setup
        let input = field_of("my_field: Option<usize>");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(derive_field.kind, FieldKind::OptionalOption { short: None });
    }

    #[test]
    fn construct_collection_option() {
        // Setup
        let input = field_of("my_field: Vec<usize>");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.kind,
            FieldKind::CollectionOption {
                nargs: DeriveValue {
                    tokens: quote! { Arity::AtLeastOne },
                },
                short: None,
            }
        );
    }

    #[test]
    fn construct_toggle() {
        // Setup
        let input = field_of("my_field: bool");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(derive_field.kind, FieldKind::Toggle { short: None });
    }

    //# Explicit construction

    #[test]
    fn construct_scalar_argument() {
        // Setup
        let input = field_of("#[arg(positional)] my_field: usize");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(derive_field.kind, FieldKind::ScalarArgument);
        assert_eq!(derive_field.spelling, "my_field");
    }

    #[test]
    fn construct_collection_argument() {
        // Setup
        let input = field_of("#[arg(positional, nargs = Arity::Any)] my_field: Vec<usize>");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.kind,
            FieldKind::CollectionArgument {
                nargs: DeriveValue {
                    tokens: quote! { Arity::Any },
                },
            }
        );
    }

    #[test]
    fn construct_collection_forced_by_nargs() {
        // Setup
        let input = field_of("#[arg(nargs = Arity::Precisely(2))] my_field: Pair<usize>");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.kind,
            FieldKind::CollectionOption {
                nargs: DeriveValue {
                    tokens: quote! { Arity::Precisely(2) },
                },
                short: None,
            }
        );
    }

    #[test]
    fn construct_switch() {
        // Setup
        let input = field_of(r#"#[arg(args = ["--dry-run", "-d"])] my_field: bool"#);

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.kind,
            FieldKind::Switch {
                short: Some(DeriveValue {
                    tokens: Literal::character('d').into_token_stream(),
                }),
            }
        );
        assert_eq!(derive_field.spelling, "dry-run");
    }

    #[test]
    fn construct_custom_args() {
        // Setup
        let input = field_of(r#"#[arg(args = ["--colour", "--color"])] my_field: String"#);

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(derive_field.spelling, "colour");
        assert_eq!(derive_field.aliases, vec!["color".to_string()]);
    }

    #[test]
    fn construct_positional_by_args() {
        // Setup
        let input = field_of(r#"#[arg(args = ["destination"])] my_field: String"#);

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(derive_field.kind, FieldKind::ScalarArgument);
        assert_eq!(derive_field.spelling, "destination");
    }

    #[test]
    fn construct_short() {
        // Setup
        let input = field_of("#[arg(short = 'm')] my_field: usize");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.kind,
            FieldKind::ScalarOption {
                short: Some(DeriveValue {
                    tokens: Literal::character('m').into_token_stream(),
                }),
            }
        );
    }

    #[test]
    fn construct_metadata() {
        // Setup
        let input = field_of(
            r#"#[arg(help = "abc 123", metavar = "N", default = 5, required)] my_field: usize"#,
        );

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.help,
            Some(DeriveValue {
                tokens: Literal::string("abc 123").into_token_stream(),
            })
        );
        assert_eq!(
            derive_field.metavar,
            Some(DeriveValue {
                tokens: Literal::string("N").into_token_stream(),
            })
        );
        assert_eq!(
            derive_field.default,
            Some(DefaultSource::Literal(DeriveValue {
                tokens: Literal::usize_unsuffixed(5).into_token_stream(),
            }))
        );
        assert!(derive_field.required);
    }

    #[test]
    fn construct_default_factory() {
        // Setup
        let input = field_of("#[arg(default_factory = make_path)] my_field: String");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.default,
            Some(DefaultSource::Factory(DeriveValue {
                tokens: ident("make_path").into_token_stream(),
            }))
        );
    }

    #[test]
    fn construct_converter() {
        // Setup
        let input = field_of("#[arg(converter = parse_meters)] my_field: u32");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.converter,
            Some(DeriveValue {
                tokens: ident("parse_meters").into_token_stream(),
            })
        );
    }

    #[test]
    fn construct_explicit_choices() {
        // Setup
        let input = field_of(r#"#[arg(choices = ["red", "blue"])] my_field: String"#);

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.choices,
            Some(ChoiceSource::Explicit {
                variants: vec![
                    DeriveValue {
                        tokens: Literal::string("red").into_token_stream(),
                    },
                    DeriveValue {
                        tokens: Literal::string("blue").into_token_stream(),
                    },
                ],
            })
        );
    }

    #[test]
    fn construct_derived_choices() {
        // Setup
        let input = field_of("#[arg(choices)] my_field: Option<Colour>");

        // Execute
        let derive_field = DeriveField::try_from(&input).unwrap();

        // Verify
        assert_eq!(
            derive_field.choices,
            Some(ChoiceSource::Derived {
                choice_type: DeriveValue {
                    tokens: ident("Colour").into_token_stream(),
                },
            })
        );
    }

    //# Invalid combinations

    #[test]
    fn construct_choices_collision() {
        // Setup
        let input = field_of(r#"#[arg(choices, choices = ["red"])] my_field: String"#);

        // Execute
        let error = DeriveField::try_from(&input).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "cannot be both");
    }

    #[test]
    fn construct_default_collision() {
        // Setup
        let input = field_of("#[arg(default = 5, default_factory = make)] my_field: usize");

        // Execute
        let error = DeriveField::try_from(&input).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "cannot be both");
    }

    #[test]
    fn construct_positional_required() {
        // Setup
        let input = field_of("#[arg(positional, required)] my_field: usize");

        // Execute
        let error = DeriveField::try_from(&input).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "#[arg(required)]");
    }

    #[test]
    fn construct_positional_short() {
        // Setup
        let input = field_of("#[arg(positional, short = 'm')] my_field: usize");

        // Execute
        let error = DeriveField::try_from(&input).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "a short name");
    }

    #[test]
    fn construct_positional_optional() {
        // Setup
        let input = field_of("#[arg(positional)] my_field: Option<usize>");

        // Execute
        let error = DeriveField::try_from(&input).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "cannot be positional");
    }

    #[test]
    fn construct_bool_converter() {
        // Setup
        let input = field_of("#[arg(converter = parse_bool)] my_field: bool");

        // Execute
        let error = DeriveField::try_from(&input).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "#[arg(converter = ..)]");
    }

    #[test]
    fn construct_mixed_args() {
        // Setup
        let input = field_of(r#"#[arg(args = ["destination", "--dest"])] my_field: String"#);

        // Execute
        let error = DeriveField::try_from(&input).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "cannot be both");
    }

    #[test]
    fn construct_invalid_short_spelling() {
        // Setup
        let input = field_of(r#"#[arg(args = ["-xy"])] my_field: String"#);

        // Execute
        let error = DeriveField::try_from(&input).unwrap_err();

        // Verify
        assert_contains!(error.to_string(), "single character");
    }
}
