use super::ErrorSet;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier, also the attribute name
    pub(crate) ident: syn::Ident,

    /// Field type
    pub(crate) ty: syn::Type,

    pub(crate) kind: FieldKind,

    /// Identifier of the generated setter
    pub(crate) set_ident: syn::Ident,
}

#[derive(Debug)]
pub(crate) enum FieldKind {
    /// Row identity, `Option<u64>`
    Id,

    /// `#[column("Remote Name")]`
    Column(syn::LitStr),

    /// `#[foreign_key("Remote Name")]` on a `LinkedRow<T>`
    ForeignKey(syn::LitStr),

    /// `#[inherit]` on a field holding a base model
    Inherit,
}

impl FieldKind {
    pub(crate) fn remote_name(&self) -> Option<&syn::LitStr> {
        match self {
            FieldKind::Column(name) | FieldKind::ForeignKey(name) => Some(name),
            FieldKind::Id | FieldKind::Inherit => None,
        }
    }
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "model fields must be named"));
        };

        let mut errs = ErrorSet::default();
        let mut kind = None;

        for attr in &field.attrs {
            let parsed = if attr.path().is_ident("id") {
                attr.meta.require_path_only().map(|_| FieldKind::Id)
            } else if attr.path().is_ident("inherit") {
                attr.meta.require_path_only().map(|_| FieldKind::Inherit)
            } else if attr.path().is_ident("column") {
                attr.parse_args().map(FieldKind::Column)
            } else if attr.path().is_ident("foreign_key") {
                attr.parse_args().map(FieldKind::ForeignKey)
            } else {
                continue;
            };

            let Some(parsed) = errs.capture(parsed) else {
                continue;
            };

            if kind.is_some() {
                errs.push(syn::Error::new_spanned(
                    attr,
                    "field takes only one of #[id], #[column], #[foreign_key] or #[inherit]",
                ));
            } else {
                kind = Some(parsed);
            }
        }

        errs.finish()?;

        let kind = match kind {
            Some(kind) => kind,
            None if ident == "id" => FieldKind::Id,
            None => {
                return Err(syn::Error::new_spanned(
                    field,
                    "model fields must be annotated with #[column(\"...\")], \
                     #[foreign_key(\"...\")] or #[inherit]",
                ))
            }
        };

        if kind.remote_name().is_some() && ident == "id" {
            return Err(syn::Error::new_spanned(
                ident,
                "attribute name `id` is reserved for the row identity",
            ));
        }

        Ok(Self {
            ident: ident.clone(),
            ty: field.ty.clone(),
            kind,
            set_ident: quote::format_ident!("set_{}", ident),
        })
    }
}
