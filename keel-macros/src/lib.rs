mod db_enum;
mod decode_column;
mod decode_table;

use db_enum::db_enum;
use decode_table::decode_table;
use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemEnum, ItemStruct, parse_macro_input};

/// Implements `::keel::Entity`.
///
/// Type level: `#[keel(table = "..", schema = "..")]`. Field level: `column` (optionally
/// `column = ".."`), `insert = false`, `update = false`, `version`, `db_type = ".."`,
/// `identifier` (optionally `identifier = "<strategy>"`), `sequence = ".."`, `ignore`.
#[proc_macro_derive(Entity, attributes(keel))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let table = decode_table(parse_macro_input!(input as ItemStruct));
    let name = &table.item.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = table.item.generics.split_for_impl();
    let table_attribute = match (&table.name, &table.schema) {
        (Some(name), Some(schema)) => quote!(Some(::keel::TableAttribute {
            name: #name,
            schema: Some(#schema),
        })),
        (Some(name), None) => quote!(Some(::keel::TableAttribute {
            name: #name,
            schema: None,
        })),
        _ => quote!(None),
    };
    let columns = table.columns.iter().filter(|v| !v.ignore).collect::<Vec<_>>();
    let properties = columns.iter().map(|v| v.property_shape());
    let get_values = columns.iter().map(|v| {
        let (field, property) = (&v.ident, &v.name);
        quote!(#property => Ok(::keel::AsValue::as_value(self.#field.clone())))
    });
    let set_values = columns.iter().map(|v| {
        let (field, property, ty) = (&v.ident, &v.name, &v.ty);
        quote! {
            #property => {
                self.#field = <#ty as ::keel::AsValue>::try_from_value(value)
                    .map_err(|e| e.context(format!("while assigning `{}.{}`", #type_name, #property)))?;
                Ok(())
            }
        }
    });
    quote! {
        impl #impl_generics ::keel::Entity for #name #ty_generics #where_clause {
            fn type_shape() -> &'static ::keel::TypeShape {
                static SHAPE: ::std::sync::LazyLock<::keel::TypeShape> =
                    ::std::sync::LazyLock::new(|| ::keel::TypeShape {
                        type_name: #type_name,
                        table: #table_attribute,
                        properties: vec![#(#properties),*],
                    });
                &SHAPE
            }

            fn get_value(&self, property: &str) -> ::keel::Result<::keel::Value> {
                match property {
                    #(#get_values,)*
                    _ => Err(::keel::KeelError::unknown_property(#type_name, property).into()),
                }
            }

            fn set_value(&mut self, property: &str, value: ::keel::Value) -> ::keel::Result<()> {
                match property {
                    #(#set_values)*
                    _ => Err(::keel::KeelError::unknown_property(#type_name, property).into()),
                }
            }
        }
    }
    .into()
}

/// Implements `::keel::AsValue` for a fieldless enum, stored as its `repr` integer.
#[proc_macro_derive(DbEnum)]
pub fn derive_db_enum(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemEnum);
    db_enum(&item).into()
}
