use quote::quote;

use crate::model::{DeriveField, DeriveRecord, DeriveValue, IntermediateAttributes};

impl TryFrom<syn::DeriveInput> for DeriveRecord {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let mut attributes = IntermediateAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident("arg") {
                attributes = IntermediateAttributes::from(attribute);
            }
        }

        let program = match attributes.pairs.get("program") {
            Some(values) => {
                let tokens = &values
                    .first()
                    .expect("attribute pair 'program' must contain non-empty values")
                    .tokens;
                quote! { #tokens }
            }
            None => quote! { env!("CARGO_CRATE_NAME") },
        };
        let about = attributes.pairs.get("about").map(|values| {
            let tokens = values
                .first()
                .expect("attribute pair 'about' must contain non-empty values")
                .tokens
                .clone();
            DeriveValue { tokens }
        });
        let argv = attributes.singletons.contains("argv");
        let struct_name = &value.ident;

        match &value.data {
            syn::Data::Struct(ds) => {
                let fields = match ds {
                    syn::DataStruct {
                        fields: syn::Fields::Named(ref fields),
                        ..
                    } => fields
                        .named
                        .iter()
                        .map(DeriveField::try_from)
                        .collect::<Result<Vec<_>, _>>()?,
                    syn::DataStruct { .. } => Vec::default(),
                };

                Ok(DeriveRecord {
                    struct_name: struct_name.clone(),
                    program_name: DeriveValue { tokens: program },
                    about,
                    argv,
                    fields,
                })
            }
            _ => Err(syn::Error::new(
                struct_name.span(),
                format!(
                    "Invalid - {} only applies to 'struct' data structures.",
                    crate::MACRO_ARG_RECORD
                ),
            )),
        }
    }
}
