use super::{Column, ErrorSet, Name};

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Field name
    pub(crate) name: Name,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Field attributes
    pub(crate) attrs: FieldAttr,
}

#[derive(Debug, Default)]
pub(crate) struct FieldAttr {
    /// True if the field is annotated with `#[key]`
    pub(crate) key: bool,

    /// True if the field is annotated with `#[computed]`
    pub(crate) computed: bool,

    /// True if the field is annotated with `#[skip]`
    pub(crate) skip: bool,

    /// Optional column name
    pub(crate) column: Option<Column>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut attrs = FieldAttr::default();

        for attr in &field.attrs {
            if attr.path().is_ident("key") {
                if attrs.key {
                    errs.spanned(attr, "duplicate #[key] attribute");
                } else {
                    attrs.key = true;
                }
            } else if attr.path().is_ident("computed") {
                if attrs.computed {
                    errs.spanned(attr, "duplicate #[computed] attribute");
                } else {
                    attrs.computed = true;
                }
            } else if attr.path().is_ident("skip") {
                if attrs.skip {
                    errs.spanned(attr, "duplicate #[skip] attribute");
                } else {
                    attrs.skip = true;
                }
            } else if attr.path().is_ident("column") {
                if attrs.column.is_some() {
                    errs.spanned(attr, "duplicate #[column] attribute");
                } else {
                    attrs.column = errs.check(Column::from_ast(attr));
                }
            }
        }

        if let Some(column) = &attrs.column {
            if attrs.computed {
                errs.spanned(&column.name, "computed field cannot have a #[column] attribute");
            }

            if attrs.skip {
                errs.spanned(&column.name, "skipped field cannot have a #[column] attribute");
            }
        }

        if attrs.key && (attrs.computed || attrs.skip) {
            errs.spanned(ident, "#[key] field must be stored in a column");
        }

        errs.finish()?;

        Ok(Self {
            ident: ident.clone(),
            name: Name::from_ident(ident),
            ty: field.ty.clone(),
            attrs,
        })
    }

    /// The column the field is stored in, or `None` if the field is not
    /// stored.
    pub(crate) fn column_name(&self) -> Option<String> {
        if self.attrs.computed || self.attrs.skip {
            return None;
        }

        Some(match &self.attrs.column {
            Some(column) => column.name.value(),
            None => self.name.raw.clone(),
        })
    }
}
