use super::{ErrorSet, Field, FieldKind, ModelAttr};

#[derive(Debug)]
pub(crate) struct Model {
    /// Model visibility
    pub(crate) vis: syn::Visibility,

    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Model fields, identity included
    pub(crate) fields: Vec<Field>,

    /// Index of the identity field in `fields`
    pub(crate) id_field: usize,

    pub(crate) attr: ModelAttr,

    /// The field accessor struct identifier
    pub(crate) field_struct_ident: syn::Ident,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "model fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "model generics are not supported",
            ));
        }

        let mut errs = ErrorSet::default();
        let attr = errs.capture(ModelAttr::from_ast(&ast.attrs));
        let mut fields = vec![];
        let mut id_field = None;

        for node in &node.named {
            let Some(field) = errs.capture(Field::from_ast(node)) else {
                continue;
            };

            if matches!(field.kind, FieldKind::Id) {
                if id_field.is_some() {
                    errs.push(syn::Error::new_spanned(
                        node,
                        "model declares more than one identity field",
                    ));
                    continue;
                }
                id_field = Some(fields.len());
            }

            fields.push(field);
        }

        errs.finish()?;

        let Some(id_field) = id_field else {
            return Err(syn::Error::new_spanned(
                ast,
                "model must declare an `id: Option<u64>` identity field",
            ));
        };

        Ok(Self {
            vis: ast.vis.clone(),
            ident: ast.ident.clone(),
            fields,
            id_field,
            attr: attr.unwrap_or_default(),
            field_struct_ident: quote::format_ident!("{}Fields", ast.ident),
        })
    }

    pub(crate) fn id_ident(&self) -> &syn::Ident {
        &self.fields[self.id_field].ident
    }

    /// Fields backed by a column of this model's own table.
    pub(crate) fn columns(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|field| field.kind.remote_name().is_some())
    }

    pub(crate) fn bases(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|field| matches!(field.kind, FieldKind::Inherit))
    }
}
