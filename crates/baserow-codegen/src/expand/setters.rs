use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// Generates `set_<attr>` for each local attribute, converting the
    /// assigned value through `Assign`.
    pub(super) fn expand_setters(&self) -> TokenStream {
        let orm = &self.orm;
        let vis = &self.model.vis;
        let model_ident = &self.model.ident;

        let setters = self.model.columns().map(|field| {
            let ident = &field.ident;
            let set_ident = &field.set_ident;
            let ty = &field.ty;
            quote! {
                #vis fn #set_ident(&mut self, value: impl #orm::Assign<#ty>) -> #orm::Result<()> {
                    self.#ident = #orm::Assign::assign(value)?;
                    #orm::Result::Ok(())
                }
            }
        });

        quote! {
            impl #model_ident {
                #( #setters )*
            }
        }
    }
}
