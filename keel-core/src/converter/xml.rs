use crate::{KeelError, Result, TypeConverter, Value, XmlDocument};

/// XML documents travel as their serialized text.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlTypeConverter;

impl TypeConverter for XmlTypeConverter {
    fn can_convert(&self, prototype: &Value) -> bool {
        matches!(prototype, Value::Xml(..))
    }

    fn to_wire(&self, value: Value, _prototype: &Value) -> Result<Value> {
        match value {
            Value::Xml(v) => Ok(Value::Varchar(v.map(XmlDocument::into_inner))),
            v => Err(KeelError::conversion(v.type_name(), "expected an xml document").into()),
        }
    }

    fn from_wire(&self, value: Value, prototype: &Value) -> Result<Value> {
        match value {
            v if v.is_null() => Ok(prototype.clone()),
            Value::Varchar(Some(v)) => XmlDocument::parse(v).map(|v| Value::Xml(Some(v))),
            Value::Xml(v) => Ok(Value::Xml(v)),
            v => Err(KeelError::conversion(v.type_name(), "xml can only be read from a string").into()),
        }
    }
}
