use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::DeriveRecord;

impl TryFrom<DeriveRecord> for TokenStream2 {
    type Error = syn::Error;

    fn try_from(value: DeriveRecord) -> Result<Self, Self::Error> {
        let DeriveRecord {
            struct_name,
            program_name,
            about,
            argv,
            fields,
        } = value;
        let program = &program_name.tokens;
        let target = syn::Ident::new("target", proc_macro2::Span::call_site());

        let defaults: Vec<TokenStream2> = fields
            .iter()
            .filter_map(|field| field.generate_default(&target))
            .collect();
        let setups: Vec<TokenStream2> =
            fields.iter().map(|field| field.generate(&target)).collect();
        let about_statement = match about {
            Some(about) => {
                let tokens = &about.tokens;
                quote! { rp = rp.about(#tokens); }
            }
            None => TokenStream2::default(),
        };

        let assemble = if defaults.is_empty() && setups.is_empty() {
            quote! {
                let target = #struct_name::default();
            }
        } else {
            quote! {
                let mut target = #struct_name::default();
                #( #defaults )*
            }
        };
        let configure = if setups.is_empty() && about_statement.is_empty() {
            quote! {
                let rp = RecordParser::new(#program);
            }
        } else {
            quote! {
                let mut rp = RecordParser::new(#program);
                #about_statement
                #( #setups )*
            }
        };
        let assemble_known = assemble.clone();
        let configure_known = configure.clone();

        let to_argv = if argv {
            // Positionals serialize first, so a trailing greedy option cannot
            // swallow them on the way back in.
            let (positionals, options): (Vec<_>, Vec<_>) = fields
                .iter()
                .partition(|field| field.is_positional());
            let statements: Vec<TokenStream2> = positionals
                .iter()
                .chain(options.iter())
                .map(|field| field.generate_argv())
                .collect();
            quote! {
                fn to_argv(&self) -> Vec<String> {
                    let mut argv: Vec<String> = Vec::default();
                    #( #statements )*
                    argv
                }
            }
        } else {
            TokenStream2::default()
        };

        Ok(quote! {
            impl #struct_name {
                fn try_parse_args(tokens: &[&str]) -> Result<#struct_name, i32> {
                    #assemble
                    let outcome = {
                        #configure
                        rp.build().parse_tokens(tokens)
                    };
                    outcome.map(|()| target)
                }

                fn parse_args(tokens: &[&str]) -> #struct_name {
                    match #struct_name::try_parse_args(tokens) {
                        Ok(target) => target,
                        Err(code) => std::process::exit(code),
                    }
                }

                fn from_env() -> #struct_name {
                    let tokens: Vec<String> = std::env::args().skip(1).collect();
                    #struct_name::parse_args(
                        tokens
                            .iter()
                            .map(AsRef::as_ref)
                            .collect::<Vec<&str>>()
                            .as_slice(),
                    )
                }

                fn parse_known_args(tokens: &[&str]) -> (#struct_name, Vec<String>) {
                    #assemble_known
                    let outcome = {
                        #configure_known
                        rp.build().parse_known_tokens(tokens)
                    };
                    match outcome {
                        Ok(unknown) => (target, unknown),
                        Err(code) => std::process::exit(code),
                    }
                }

                #to_argv
            }
        })
    }
}
