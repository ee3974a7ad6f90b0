use crate::decode_column::{ColumnMetadata, decode_column};
use quote::ToTokens;
use syn::{ItemStruct, LitStr, parse::ParseBuffer};

pub(crate) struct TableMetadata {
    pub(crate) columns: Vec<ColumnMetadata>,
    pub(crate) name: Option<String>,
    pub(crate) schema: Option<String>,
    pub(crate) item: ItemStruct,
}

pub fn decode_table(item: ItemStruct) -> TableMetadata {
    let columns: Vec<_> = item.fields.iter().map(decode_column).collect();
    let mut name = None;
    let mut schema = None;
    for attr in &item.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("keel") {
            let Ok(list) = meta.require_list() else {
                panic!("Error while parsing `keel`, use it like: `#[keel(attribute = value, ..)]`",);
            };
            let _ = list.parse_nested_meta(|arg| {
                if arg.path.is_ident("table") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `table`, use it like: `#[keel(table = \"Customers\")]`"
                        );
                    };
                    name = Some(value.value());
                } else if arg.path.is_ident("schema") {
                    let Ok(value) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                        panic!(
                            "Error while parsing `schema`, use it like: `#[keel(schema = \"Sales\")]`"
                        );
                    };
                    schema = Some(value.value());
                } else {
                    panic!("Unknown attribute `{}` inside keel macro", arg.path.to_token_stream().to_string());
                }
                Ok(())
            });
        }
    }
    if schema.is_some() && name.is_none() {
        panic!("The schema of `{}` requires a table name: `#[keel(table = \"..\", schema = \"..\")]`", item.ident);
    }
    if columns.iter().filter(|v| v.identifier.is_some()).count() > 1 {
        panic!("`{}` declares more than one identifier", item.ident);
    }
    TableMetadata {
        columns,
        name,
        schema,
        item,
    }
}
