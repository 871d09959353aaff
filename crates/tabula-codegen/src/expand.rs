use crate::schema::{Field, Model};

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The record being expanded
    model: &'a Model,

    /// Path prefix for tabula types
    tabula: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let tabula = &self.tabula;
        let ident = &self.model.ident;
        let table_name = &self.model.table_name;
        let fields = self
            .model
            .fields
            .iter()
            .filter(|field| !field.attrs.skip)
            .map(|field| self.expand_field(field));

        wrap_in_const(quote! {
            impl #tabula::Record for #ident {
                fn describe() -> #tabula::Descriptor<Self> {
                    #tabula::Descriptor {
                        table_name: #tabula::String::from(#table_name),
                        fields: #tabula::Vec::from([ #( #fields, )* ]),
                    }
                }
            }
        })
    }

    fn expand_field(&self, field: &Field) -> TokenStream {
        let tabula = &self.tabula;
        let model_ident = &self.model.ident;
        let ident = &field.ident;
        let ty = &field.ty;
        let name = &field.name.raw;
        let key = field.attrs.key;
        let computed = field.attrs.computed;

        let column = match field.column_name() {
            Some(column) => quote!(#tabula::Option::Some(#tabula::String::from(#column))),
            None => quote!(#tabula::Option::None),
        };

        quote! {{
            let get: fn(&#model_ident) -> #tabula::Value =
                |record| <#ty as #tabula::Primitive>::to_value(&record.#ident);

            let set: fn(&mut #model_ident, #tabula::Value) -> #tabula::Result<()> =
                |record, value| {
                    record.#ident = <#ty as #tabula::Primitive>::load(value)?;
                    ::core::result::Result::Ok(())
                };

            #tabula::FieldDescriptor {
                name: #tabula::String::from(#name),
                column: #column,
                ty: <#ty as #tabula::Primitive>::TYPE,
                nullable: <#ty as #tabula::Primitive>::NULLABLE,
                key: #key,
                computed: #computed,
                get,
                set: #tabula::Option::Some(set),
            }
        }}
    }
}

pub(super) fn record(model: &Model) -> TokenStream {
    Expand {
        model,
        tabula: quote!(_tabula::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use tabula as _tabula;
            #code
        };
    }
}
