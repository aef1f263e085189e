use crate::model::{DeriveChoices, DeriveValue, DeriveVariant, IntermediateAttributes};
use crate::MACRO_ARG_CHOICES;

impl TryFrom<syn::DeriveInput> for DeriveChoices {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let enum_name = &value.ident;

        match &value.data {
            syn::Data::Enum(de) => {
                let variants = de
                    .variants
                    .iter()
                    .map(DeriveVariant::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DeriveChoices {
                    enum_name: enum_name.clone(),
                    variants,
                })
            }
            _ => Err(syn::Error::new(
                enum_name.span(),
                format!("Invalid - {MACRO_ARG_CHOICES} only applies to 'enum' data structures."),
            )),
        }
    }
}

impl TryFrom<&syn::Variant> for DeriveVariant {
    type Error = syn::Error;

    fn try_from(value: &syn::Variant) -> Result<Self, Self::Error> {
        let mut attributes = IntermediateAttributes::default();

        for attribute in &value.attrs {
            if attribute.path().is_ident("arg") {
                attributes = IntermediateAttributes::from(attribute);
            }
        }

        let variant_name = value.ident.clone();
        let explicit_hidden = attributes.singletons.contains("hidden");
        let help = match attributes.pairs.get("help") {
            Some(values) => {
                let tokens = values
                    .first()
                    .expect("attribute pair 'help' must contain non-empty values")
                    .tokens
                    .clone();
                Some(DeriveValue { tokens })
            }
            None => None,
        };

        Ok(DeriveVariant {
            variant_name,
            hidden: explicit_hidden,
            help,
        })
    }
}
