/// Struct level `#[model(...)]` arguments.
#[derive(Debug, Default)]
pub(crate) struct ModelAttr {
    /// Key of the model in a schema mapping
    pub(crate) id: Option<syn::LitStr>,

    /// Remote table name used by mapping generation
    pub(crate) table: Option<syn::LitStr>,
}

impl ModelAttr {
    pub(super) fn from_ast(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("model") {
                continue;
            }

            // #[model(id = "blog.Post", table = "Posts")]
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    if result.id.is_some() {
                        return Err(meta.error("duplicate model id"));
                    }
                    result.id = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("table") {
                    if result.table.is_some() {
                        return Err(meta.error("duplicate table name"));
                    }
                    result.table = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("expected `id = \"...\"` or `table = \"...\"`"));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}
