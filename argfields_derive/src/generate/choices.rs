use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

use crate::model::DeriveChoices;

impl TryFrom<DeriveChoices> for TokenStream2 {
    type Error = syn::Error;

    fn try_from(value: DeriveChoices) -> Result<Self, Self::Error> {
        let DeriveChoices {
            enum_name,
            variants,
        } = value;

        let chain: Vec<TokenStream2> = variants
            .iter()
            .filter(|variant| !variant.hidden)
            .map(|variant| {
                let variant_name = &variant.variant_name;
                match &variant.help {
                    Some(help) => {
                        let help = &help.tokens;
                        quote! { .choice(#enum_name::#variant_name, #help) }
                    }
                    None => quote! { .choice(#enum_name::#variant_name, "") },
                }
            })
            .collect();

        Ok(quote! {
            impl #enum_name {
                fn arg_choices<C>(value: C) -> C
                where
                    C: Choices<#enum_name>,
                {
                    value
                        #( #chain )*
                }
            }
        })
    }
}
