use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{Field, Ident, LitBool, LitStr, Type, parse::ParseBuffer};

const STRATEGIES: [&str; 5] = ["Assigned", "DbGenerated", "Guid", "GuidComb", "Sequence"];

pub(crate) struct ColumnMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    /// Property name, the field name.
    pub(crate) name: String,
    pub(crate) column_name: Option<String>,
    /// Whether any column level attribute was given.
    pub(crate) column: bool,
    pub(crate) insert: bool,
    pub(crate) update: bool,
    pub(crate) version: bool,
    pub(crate) db_type: Option<String>,
    pub(crate) identifier: Option<String>,
    pub(crate) sequence: Option<String>,
    pub(crate) ignore: bool,
}

fn parse_str(arg: &syn::meta::ParseNestedMeta, name: &str, example: &str) -> String {
    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
        panic!(
            "Error while parsing `{}`, use it like: `#[keel({} = \"{}\")]`",
            name, name, example
        );
    };
    value.value()
}

/// Bare flag or `flag = true/false`.
fn parse_flag(arg: &syn::meta::ParseNestedMeta, name: &str) -> bool {
    if arg.input.is_empty() || arg.input.peek(syn::Token![,]) {
        return true;
    }
    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitBool>) else {
        panic!(
            "Error while parsing `{}`, use it like: `#[keel({} = false)]`",
            name, name
        );
    };
    value.value
}

pub(crate) fn decode_column(field: &Field) -> ColumnMetadata {
    let Some(ident) = field.ident.clone() else {
        panic!("Entity can only be derived on structs with named fields");
    };
    let mut result = ColumnMetadata {
        name: ident.to_string().trim_start_matches("r#").to_string(),
        ident,
        ty: field.ty.clone(),
        column_name: None,
        column: false,
        insert: true,
        update: true,
        version: false,
        db_type: None,
        identifier: None,
        sequence: None,
        ignore: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("keel") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `keel`, use it like: `#[keel(attribute = value, ..)]`");
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("column") {
                if !arg.input.is_empty() && !arg.input.peek(syn::Token![,]) {
                    result.column_name = Some(parse_str(&arg, "column", "CustomerId"));
                }
                result.column = true;
            } else if arg.path.is_ident("insert") {
                result.insert = parse_flag(&arg, "insert");
                result.column = true;
            } else if arg.path.is_ident("update") {
                result.update = parse_flag(&arg, "update");
                result.column = true;
            } else if arg.path.is_ident("version") {
                result.version = parse_flag(&arg, "version");
                result.column = true;
            } else if arg.path.is_ident("db_type") {
                result.db_type = Some(parse_str(&arg, "db_type", "AnsiString"));
                result.column = true;
            } else if arg.path.is_ident("identifier") {
                let strategy = if arg.input.is_empty() || arg.input.peek(syn::Token![,]) {
                    "DbGenerated".to_string()
                } else {
                    parse_str(&arg, "identifier", "DbGenerated")
                };
                if !STRATEGIES.contains(&strategy.as_str()) {
                    panic!(
                        "Unknown identifier strategy `{}`, expected one of: {}",
                        strategy,
                        STRATEGIES.join(", ")
                    );
                }
                result.identifier = Some(strategy);
                result.column = true;
            } else if arg.path.is_ident("sequence") {
                result.sequence = Some(parse_str(&arg, "sequence", "CustomerIdSequence"));
            } else if arg.path.is_ident("ignore") {
                result.ignore = true;
            } else {
                panic!(
                    "Unknown attribute `{}` inside keel macro",
                    arg.path.to_token_stream().to_string()
                );
            }
            Ok(())
        });
    }
    if result.sequence.is_some() && result.identifier.as_deref() != Some("Sequence") {
        panic!(
            "Field `{}` declares a sequence but its identifier strategy is not `Sequence`",
            result.name
        );
    }
    if result.ignore && result.column {
        panic!("Field `{}` is ignored, it cannot carry column attributes", result.name);
    }
    result
}

impl ColumnMetadata {
    /// `::keel::PropertyShape` literal.
    pub(crate) fn property_shape(&self) -> TokenStream {
        let name = &self.name;
        let ty = &self.ty;
        let column = if self.column {
            let column_name = match &self.column_name {
                Some(v) => quote!(Some(#v)),
                None => quote!(None),
            };
            let db_type = match &self.db_type {
                Some(v) => {
                    let v = format_ident!("{}", v);
                    quote!(Some(::keel::DbType::#v))
                }
                None => quote!(None),
            };
            let (insert, update, version) = (self.insert, self.update, self.version);
            quote!(Some(::keel::ColumnAttribute {
                name: #column_name,
                allow_insert: #insert,
                allow_update: #update,
                version: #version,
                db_type: #db_type,
            }))
        } else {
            quote!(None)
        };
        let identifier = match &self.identifier {
            Some(strategy) => {
                let strategy = format_ident!("{}", strategy);
                let sequence = match &self.sequence {
                    Some(v) => quote!(Some(#v)),
                    None => quote!(None),
                };
                quote!(Some(::keel::IdentifierAttribute {
                    strategy: ::keel::IdentifierStrategy::#strategy,
                    sequence: #sequence,
                }))
            }
            None => quote!(None),
        };
        quote! {
            ::keel::PropertyShape {
                name: #name,
                value: <#ty as ::keel::AsValue>::as_empty_value(),
                nullable: <#ty as ::keel::AsValue>::NULLABLE,
                column: #column,
                identifier: #identifier,
            }
        }
    }
}
