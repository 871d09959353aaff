use heck::ToSnakeCase;
use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Name {
    /// Identifier as written, without any `r#` prefix
    pub(crate) raw: String,

    /// Snake-case form of the identifier
    pub(crate) snake: String,
}

impl Name {
    pub(crate) fn from_ident(ident: &syn::Ident) -> Self {
        let raw = ident.unraw().to_string();
        let snake = raw.to_snake_case();

        Self { raw, snake }
    }

    /// Default table name for a record type: `OrderLine` becomes
    /// `order_lines`.
    pub(crate) fn table_name(&self) -> String {
        pluralizer::pluralize(&self.snake, 2, false)
    }
}
