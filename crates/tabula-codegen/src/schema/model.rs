use super::{ErrorSet, Field, ModelAttr, Name};

#[derive(Debug)]
pub(crate) struct Model {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Record fields, in declaration order
    pub(crate) fields: Vec<Field>,

    /// Table the record maps to
    pub(crate) table_name: String,
}

impl Model {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "record generics are not supported",
            ));
        }

        let mut model_attr = ModelAttr::default();
        let mut fields = vec![];
        let mut errs = ErrorSet::new();

        errs.check(model_attr.populate_from_ast(&ast.attrs));
        fields.extend(node.named.iter().filter_map(|node| errs.check(Field::from_ast(node))));
        errs.finish()?;

        let table_name = match &model_attr.table {
            Some(table) => table.value(),
            None => Name::from_ident(&ast.ident).table_name(),
        };

        Ok(Self {
            ident: ast.ident.clone(),
            fields,
            table_name,
        })
    }
}
