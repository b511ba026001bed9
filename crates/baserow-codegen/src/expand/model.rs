use super::Expand;
use crate::schema::FieldKind;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_impl(&self) -> TokenStream {
        let orm = &self.orm;
        let model_ident = &self.model.ident;
        let id_ident = self.model.id_ident();
        let schema = self.expand_schema();
        let load_body = self.expand_load_body();
        let to_record_body = self.expand_to_record_body();

        // Bases carry the same row identity.
        let set_base_ids = self.model.bases().map(|field| {
            let ident = &field.ident;
            let ty = &field.ty;
            quote!(<#ty as #orm::Model>::set_id(&mut self.#ident, id);)
        });

        quote! {
            impl #orm::Model for #model_ident {
                fn schema() -> &'static #orm::ModelSchema {
                    static SCHEMA: #orm::OnceLock<#orm::ModelSchema> = #orm::OnceLock::new();
                    SCHEMA.get_or_init(|| #schema)
                }

                fn id(&self) -> #orm::Option<u64> {
                    self.#id_ident
                }

                fn set_id(&mut self, id: u64) {
                    self.#id_ident = #orm::Option::Some(id);
                    #( #set_base_ids )*
                }

                fn load(
                    db: #orm::Option<&#orm::Database>,
                    id: #orm::Option<u64>,
                    mut record: #orm::Record,
                ) -> #orm::Result<Self> {
                    #load_body
                }

                fn to_record(&self) -> #orm::Result<#orm::Record> {
                    #to_record_body
                }
            }
        }
    }

    fn expand_schema(&self) -> TokenStream {
        let orm = &self.orm;
        let model_ident = &self.model.ident;

        let model_id = match &self.model.attr.id {
            Some(id) => quote!(#id),
            None => quote! {
                ::core::concat!(::core::module_path!(), "::", ::core::stringify!(#model_ident))
            },
        };

        let table_name = self
            .model
            .attr
            .table
            .as_ref()
            .map(|table| quote!(.table_name(#table)));

        let columns = self.model.columns().map(|field| {
            let attr = field.ident.to_string();
            match &field.kind {
                FieldKind::Column(name) => quote! {
                    .column(#attr, #orm::Column::new(#name))
                },
                FieldKind::ForeignKey(name) => {
                    let ty = &field.ty;
                    quote! {
                        .column(#attr, #orm::Column::foreign_key(
                            #name,
                            <#ty as #orm::LinkField>::model_ref(),
                        ))
                    }
                }
                FieldKind::Id | FieldKind::Inherit => unreachable!(),
            }
        });

        let bases = self.model.bases().map(|field| {
            let ty = &field.ty;
            quote!(.inherit(<#ty as #orm::Model>::schema()))
        });

        quote! {
            #orm::ModelSchema::builder(#model_id)
                #table_name
                #( #columns )*
                #( #bases )*
                .build()
                .expect("derived model schemas have no reserved or duplicate attributes")
        }
    }

    fn expand_load_body(&self) -> TokenStream {
        let orm = &self.orm;
        let id_ident = self.model.id_ident();

        // Bases see the record before local attributes are taken out of it.
        let bases = self.model.bases().map(|field| {
            let base = base_ident(&field.ident);
            let ty = &field.ty;
            quote! {
                let #base = <#ty as #orm::Model>::load(
                    db,
                    id,
                    <#ty as #orm::Model>::schema().project(&record),
                )?;
            }
        });

        let inits = self.model.fields.iter().map(|field| {
            let ident = &field.ident;
            match &field.kind {
                FieldKind::Id => quote!(#id_ident: id),
                FieldKind::Inherit => {
                    let base = base_ident(ident);
                    quote!(#ident: #base)
                }
                FieldKind::Column(_) | FieldKind::ForeignKey(_) => {
                    let attr = ident.to_string();
                    quote! {
                        #ident: #orm::load_field(db, &mut record, schema.id(), #attr)?
                    }
                }
            }
        });

        quote! {
            let schema = <Self as #orm::Model>::schema();
            schema.check_record(&record)?;
            #( #bases )*
            #orm::Result::Ok(Self {
                #( #inits, )*
            })
        }
    }

    fn expand_to_record_body(&self) -> TokenStream {
        let orm = &self.orm;

        let columns = self.model.columns().map(|field| {
            let ident = &field.ident;
            let attr = ident.to_string();
            quote! {
                record.insert(#attr.to_string(), #orm::Field::to_backend(&self.#ident)?);
            }
        });

        let bases = self.model.bases().map(|field| {
            let ident = &field.ident;
            quote! {
                #orm::merge_inherited(&mut record, #orm::Model::to_record(&self.#ident)?);
            }
        });

        quote! {
            let mut record = #orm::Record::new();
            #( #columns )*
            #( #bases )*
            #orm::Result::Ok(record)
        }
    }
}

fn base_ident(ident: &syn::Ident) -> syn::Ident {
    quote::format_ident!("__base_{}", ident)
}
