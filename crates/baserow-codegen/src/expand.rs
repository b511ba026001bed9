mod fields;
mod model;
mod setters;

use crate::schema::Model;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The model being expanded
    model: &'a Model,

    /// Path prefix for runtime support items
    orm: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let model_impl = self.expand_model_impl();
        let field_struct = self.expand_field_struct();
        let setters = self.expand_setters();

        wrap_in_const(quote! {
            #model_impl
            #field_struct
            #setters
        })
    }
}

pub(super) fn model(model: &Model) -> TokenStream {
    Expand {
        model,
        orm: quote!(_baserow::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use baserow_orm as _baserow;
            #code
        };
    }
}
