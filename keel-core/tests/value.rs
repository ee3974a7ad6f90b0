#[cfg(test)]
mod tests {
    use keel_core::{AsValue, DbType, EncryptedString, KeelError, Value, enum_underlying_type};
    use rust_decimal::Decimal;
    use time::{Date, Month};
    use uuid::Uuid;

    #[test]
    fn value_none() {
        assert_eq!(Value::Null, Value::Null);
        assert_ne!(Value::Float32(Some(1.0)), Value::Null);
        assert!(Value::Int32(None).is_null());
        assert!(Value::Enum(None, DbType::Int16).is_null());
        assert_eq!(Option::<i32>::None.as_value(), Value::Int32(None));
    }

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        assert!(bool::try_from_value(val).expect("Failed to read a bool"));
        assert!(bool::try_from_value(8_i16.into()).expect("Failed to read a bool"));
        assert!(!bool::try_from_value(0_u64.into()).expect("Failed to read a bool"));
        assert!(bool::try_from_value(0.5_f32.into()).is_err());
    }

    #[test]
    fn value_integers() {
        assert_eq!(i8::try_from_value(99_u8.into()).expect("Failed to read an i8"), 99);
        assert!(i8::try_from_value(0.1_f64.into()).is_err());
        assert_eq!(i16::try_from_value(5000_u16.into()).expect("Failed to read an i16"), 5000);
        assert_eq!(i32::try_from_value((-1_i16).into()).expect("Failed to read an i32"), -1);
        assert_eq!(
            i64::try_from_value(12345678901234_u64.into()).expect("Failed to read an i64"),
            12345678901234
        );
        assert_eq!(u32::try_from_value(65535_u16.into()).expect("Failed to read a u32"), 65535);

        // Range checked
        let error = i16::try_from_value(70000_i32.into()).expect_err("70000 does not fit");
        assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::Conversion { .. })
        ));
        assert!(u8::try_from_value((-1_i32).into()).is_err());

        // Identity functions return decimals
        assert_eq!(
            i32::try_from_value(Decimal::new(42, 0).into()).expect("Failed to read an integral decimal"),
            42
        );
        assert!(i32::try_from_value(Decimal::new(425, 1).into()).is_err());
    }

    #[test]
    fn value_null_into_required() {
        let error = i32::try_from_value(Value::Int32(None)).expect_err("Null is not an i32");
        assert!(
            error.to_string().contains("null cannot be assigned"),
            "{}",
            error
        );
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int64(None)).expect("Failed to read an option"),
            None
        );
        assert_eq!(
            Option::<i32>::try_from_value(Value::Int64(Some(7))).expect("Failed to read an option"),
            Some(7)
        );
    }

    #[test]
    fn value_strings() {
        let val: Value = "Fred".into();
        assert_eq!(val, Value::Varchar(Some("Fred".into())));
        assert_eq!(char::try_from_value("F".into()).expect("Failed to read a char"), 'F');
        assert!(char::try_from_value("Fred".into()).is_err());
        assert_eq!(
            String::try_from_value(Value::Char(Some('x'))).expect("Failed to read a string"),
            "x"
        );
        let secret = EncryptedString::from("7622 8765 9902 0924");
        assert_eq!(
            secret.clone().as_value(),
            Value::Encrypted(Some(secret.clone()))
        );
        assert_eq!(
            String::try_from_value(secret.as_value()).expect("Failed to read the plain text"),
            "7622 8765 9902 0924"
        );
    }

    #[test]
    fn value_time_and_uuid() {
        let date = Date::from_calendar_date(1990, Month::May, 12).expect("Invalid date");
        assert_eq!(
            Date::try_from_value(Value::Timestamp(Some(date.midnight()))).expect("Failed to read a date"),
            date
        );
        let uuid = Uuid::new_v4();
        assert_eq!(
            Uuid::try_from_value(uuid.to_string().as_value()).expect("Failed to read a uuid"),
            uuid
        );
    }

    #[test]
    fn value_prototype() {
        assert_eq!(Value::Int32(Some(3)).prototype(), Value::Int32(None));
        assert_eq!(
            Value::Enum(Some(2), DbType::Byte).prototype(),
            Value::Enum(None, DbType::Byte)
        );
        assert!(Value::Int64(Some(1)).same_type(&Value::Int64(None)));
        assert!(!Value::Enum(None, DbType::Int16).same_type(&Value::Enum(None, DbType::Int32)));
        assert_eq!(enum_underlying_type("u8"), DbType::Byte);
        assert_eq!(enum_underlying_type("isize"), DbType::Int32);
    }

    #[test]
    fn value_default() {
        assert!(Value::Int32(Some(0)).is_default());
        assert!(!Value::Int32(Some(4)).is_default());
        assert!(Value::Uuid(Some(Uuid::nil())).is_default());
        assert!(Value::Varchar(Some(String::new())).is_default());
        assert!(Value::Decimal(None).is_default());
        assert!(!Value::Decimal(Some(Decimal::ONE)).is_default());
    }
}
