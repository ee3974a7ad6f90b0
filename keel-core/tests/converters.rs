#[cfg(test)]
mod tests {
    use keel_core::{
        DbType, EncryptedString, EncryptedStringTypeConverter, EnumTypeConverter, KeelError,
        ObjectTypeConverter, TypeConverter, TypeConverters, TypeMappings, Value, XmlDocument,
    };
    use time::Duration;
    use url::Url;

    const KEY: [u8; 32] = *b"0123456789abcdef0123456789abcdef";

    #[test]
    fn encrypted_string() {
        let converter = EncryptedStringTypeConverter::new(&KEY).expect("Failed to create the converter");
        let card = "7622 8765 9902 0924";
        let first = converter.encrypt(card).expect("Failed to encrypt");
        let second = converter.encrypt(card).expect("Failed to encrypt");
        assert_ne!(first, second, "Every encryption uses a fresh IV");
        assert!(!first.contains(card));
        assert_eq!(first.matches('@').count(), 1);
        assert_eq!(converter.decrypt(&first).expect("Failed to decrypt"), card);
        assert_eq!(converter.decrypt(&second).expect("Failed to decrypt"), card);

        // Through the registry
        let mut mappings = TypeMappings::new();
        let mut converters = TypeConverters::with_defaults(&mut mappings);
        converters.add(converter.clone());
        let wire = converters
            .to_wire(Value::Encrypted(Some(EncryptedString::from(card))))
            .expect("Failed to convert to the wire form");
        let Value::Varchar(Some(ref text)) = wire else {
            panic!("Encrypted strings travel as strings, found {:?}", wire);
        };
        assert_ne!(text, card);
        assert_eq!(
            converters
                .from_wire(wire, &Value::Encrypted(None))
                .expect("Failed to read the wire form"),
            Value::Encrypted(Some(card.into()))
        );
        assert_eq!(
            converters
                .from_wire(Value::Varchar(None), &Value::Encrypted(None))
                .expect("Failed to read a null"),
            Value::Encrypted(None)
        );
        assert_eq!(mappings.db_type(&Value::Encrypted(None)), DbType::String);

        // Wrong key
        let other = EncryptedStringTypeConverter::new(&[7; 32]).expect("Failed to create the converter");
        if let Ok(v) = other.decrypt(&first) {
            assert_ne!(v, card);
        }
        let error = converter
            .decrypt("not a ciphertext")
            .expect_err("The separator is missing");
        assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::InvalidCiphertext(..))
        ));
        assert!(converter.decrypt("AAAA@AAAA").is_err(), "The IV is too short");
    }

    #[test]
    fn encryption_key() {
        let error = EncryptedStringTypeConverter::new(&KEY[..31]).expect_err("The key is too short");
        assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::InvalidArgument { .. })
        ));
        assert!(
            EncryptedStringTypeConverter::from_base64("MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY=")
                .is_ok()
        );
        assert!(EncryptedStringTypeConverter::from_base64("not base64!").is_err());

        // Without a converter encrypted strings never reach the wire
        let converters = TypeConverters::new();
        let error = converters
            .to_wire(Value::Encrypted(Some("secret".into())))
            .expect_err("No converter can encrypt");
        assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::Conversion { .. })
        ));
    }

    #[test]
    fn enum_values() {
        let converter = EnumTypeConverter;
        assert!(converter.can_convert(&Value::Enum(None, DbType::Int16)));
        assert!(!converter.can_convert(&Value::Int16(None)));
        let prototype = Value::Enum(None, DbType::Int16);
        assert_eq!(
            converter
                .to_wire(Value::Enum(Some(3), DbType::Int16), &prototype)
                .expect("Failed to convert the enum"),
            Value::Int16(Some(3))
        );
        assert_eq!(
            converter
                .to_wire(Value::Enum(None, DbType::Byte), &prototype)
                .expect("Failed to convert the enum"),
            Value::UInt8(None)
        );
        assert!(
            converter
                .to_wire(Value::Enum(Some(300), DbType::Byte), &prototype)
                .is_err(),
            "300 does not fit in a byte"
        );
        assert_eq!(
            converter
                .from_wire(Value::Int64(Some(2)), &prototype)
                .expect("Failed to read the enum"),
            Value::Enum(Some(2), DbType::Int16)
        );
        assert_eq!(
            converter
                .from_wire(Value::Null, &prototype)
                .expect("Failed to read a null"),
            prototype
        );
        assert!(converter.from_wire(Value::Int64(Some(70000)), &prototype).is_err());
        assert!(converter.from_wire(Value::Varchar(Some("2".into())), &prototype).is_err());
    }

    #[test]
    fn time_span_and_uri() {
        let mut mappings = TypeMappings::new();
        let converters = TypeConverters::with_defaults(&mut mappings);
        assert_eq!(converters.len(), 4);
        assert_eq!(mappings.db_type(&Value::Duration(None)), DbType::Int64);
        assert_eq!(mappings.db_type(&Value::Url(None)), DbType::String);
        assert_eq!(mappings.db_type(&Value::Enum(None, DbType::UInt16)), DbType::UInt16);

        let span = Duration::minutes(90) + Duration::nanoseconds(15);
        let wire = converters
            .to_wire(Value::Duration(Some(span)))
            .expect("Failed to convert the duration");
        assert_eq!(wire, Value::Int64(Some(5_400_000_000_015)));
        assert_eq!(
            converters
                .from_wire(wire, &Value::Duration(None))
                .expect("Failed to read the duration"),
            Value::Duration(Some(span))
        );
        assert!(
            converters
                .to_wire(Value::Duration(Some(Duration::MAX)))
                .is_err()
        );

        let url = Url::parse("https://example.com/customers?id=4").expect("Invalid url");
        let wire = converters
            .to_wire(Value::Url(Some(url.clone())))
            .expect("Failed to convert the url");
        assert_eq!(
            wire,
            Value::Varchar(Some("https://example.com/customers?id=4".into()))
        );
        assert_eq!(
            converters
                .from_wire(wire, &Value::Url(None))
                .expect("Failed to read the url"),
            Value::Url(Some(url))
        );
        assert!(
            converters
                .from_wire(Value::Varchar(Some("not a url".into())), &Value::Url(None))
                .is_err()
        );

        let xml = converters
            .from_wire(Value::Varchar(Some("<order id=\"1\"/>".into())), &Value::Xml(None))
            .expect("Failed to read the xml");
        assert_eq!(
            xml,
            Value::Xml(Some(XmlDocument::parse("<order id=\"1\"/>").expect("Invalid xml")))
        );
    }

    #[test]
    fn fallback() {
        let converters = TypeConverters::new();
        assert!(converters.is_empty());
        assert_eq!(
            converters
                .from_wire(Value::Int64(Some(12)), &Value::Int32(None))
                .expect("Failed to narrow the integer"),
            Value::Int32(Some(12))
        );
        assert_eq!(
            converters
                .from_wire(Value::Null, &Value::Varchar(None))
                .expect("Failed to read a null"),
            Value::Varchar(None)
        );
        assert!(
            converters
                .from_wire(Value::Int64(Some(i64::MAX)), &Value::Int32(None))
                .is_err()
        );
        assert_eq!(
            ObjectTypeConverter
                .to_wire(Value::Int32(Some(5)), &Value::Int32(None))
                .expect("Scalars are unchanged"),
            Value::Int32(Some(5))
        );
        for value in [
            Value::Duration(Some(Duration::SECOND)),
            Value::Enum(Some(1), DbType::Int32),
        ] {
            assert!(converters.to_wire(value).is_err());
        }
    }
}
