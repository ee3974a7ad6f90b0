use proc_macro2::TokenStream;
use quote::quote;
use syn::{Fields, ItemEnum};

/// The `repr` integer of the enum, `i32` when absent.
fn repr(item: &ItemEnum) -> String {
    item.attrs
        .iter()
        .filter(|attr| attr.path().is_ident("repr"))
        .find_map(|attr| {
            let mut result = None;
            let _ = attr.parse_nested_meta(|arg| {
                if let Some(ident) = arg.path.get_ident() {
                    let ident = ident.to_string();
                    if matches!(
                        ident.as_str(),
                        "i8" | "u8" | "i16" | "u16" | "i32" | "u32" | "i64" | "u64"
                    ) {
                        result = Some(ident);
                    }
                }
                Ok(())
            });
            result
        })
        .unwrap_or_else(|| "i32".to_string())
}

pub(crate) fn db_enum(item: &ItemEnum) -> TokenStream {
    let name = &item.ident;
    let type_name = name.to_string();
    if let Some(variant) = item.variants.iter().find(|v| !matches!(v.fields, Fields::Unit)) {
        panic!(
            "DbEnum requires fieldless variants, `{}::{}` has fields",
            type_name, variant.ident
        );
    }
    let repr = repr(item);
    let variants = item.variants.iter().map(|v| &v.ident).collect::<Vec<_>>();
    quote! {
        impl ::keel::AsValue for #name {
            fn as_empty_value() -> ::keel::Value {
                ::keel::Value::Enum(None, ::keel::enum_underlying_type(#repr))
            }
            fn as_value(self) -> ::keel::Value {
                ::keel::Value::Enum(Some(self as i64), ::keel::enum_underlying_type(#repr))
            }
            fn try_from_value(value: ::keel::Value) -> ::keel::Result<Self> {
                let Some(discriminant) = value.as_i128() else {
                    return Err(::keel::KeelError::conversion(
                        value.type_name(),
                        format!("cannot convert to `{}`", #type_name),
                    )
                    .into());
                };
                #(
                    if discriminant == #name::#variants as i128 {
                        return Ok(#name::#variants);
                    }
                )*
                Err(::keel::KeelError::conversion(
                    #type_name,
                    format!("{} is not a discriminant of `{}`", discriminant, #type_name),
                )
                .into())
            }
        }
    }
}
