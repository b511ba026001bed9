use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// Generates `<Model>Fields`, returning the declared column of each local
    /// attribute. Filters are built from these columns.
    pub(super) fn expand_field_struct(&self) -> TokenStream {
        let orm = &self.orm;
        let vis = &self.model.vis;
        let model_ident = &self.model.ident;
        let field_struct_ident = &self.model.field_struct_ident;

        let methods = self.model.columns().map(|field| {
            let ident = &field.ident;
            let attr = ident.to_string();
            quote! {
                #vis fn #ident(&self) -> &'static #orm::Column {
                    <#model_ident as #orm::Model>::column(#attr)
                        .expect("attribute is declared by the model")
                }
            }
        });

        quote! {
            #vis struct #field_struct_ident {
                _p: (),
            }

            impl #field_struct_ident {
                #( #methods )*
            }

            impl #model_ident {
                #vis fn fields() -> #field_struct_ident {
                    #field_struct_ident { _p: () }
                }
            }
        }
    }
}
