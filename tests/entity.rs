#[cfg(test)]
mod tests {
    use keel::{
        AsValue, AttributeMappingConvention, ColumnAttribute, DbEnum, DbType, EncryptedString,
        Entity, IdentifierAttribute, IdentifierStrategy, KeelError, MappingConvention,
        PostgreSqlDialect, SqlDialect, TableAttribute, Value,
    };
    use time::Duration;
    use url::Url;

    #[derive(Debug, Default, Clone, Copy, PartialEq, DbEnum)]
    #[repr(u8)]
    enum Tier {
        #[default]
        Basic = 1,
        Premium = 5,
    }

    #[derive(Debug, Default, Clone, PartialEq, Entity)]
    #[keel(table = "Accounts", schema = "Billing")]
    struct Account {
        #[keel(column = "AccountId", identifier = "Sequence", sequence = "AccountSeq")]
        id: i64,
        #[keel(column, db_type = "AnsiString")]
        owner: String,
        #[keel(column = "CardNumber")]
        card: EncryptedString,
        #[keel(column = "TierId")]
        tier: Tier,
        #[keel(column = "SessionLength")]
        session_length: Option<Duration>,
        #[keel(column = "Homepage")]
        homepage: Option<Url>,
        #[keel(column = "Opened", update = false)]
        opened: Option<time::PrimitiveDateTime>,
        #[keel(column = "RowVersion", version)]
        row_version: i32,
        #[keel(ignore)]
        cached: Vec<String>,
        unannotated: Option<String>,
    }

    #[test]
    fn derived_shape() {
        let shape = Account::type_shape();
        assert_eq!(shape.type_name, "Account");
        assert_eq!(
            shape.table,
            Some(TableAttribute {
                name: "Accounts",
                schema: Some("Billing"),
            })
        );
        assert_eq!(
            shape.properties.iter().map(|v| v.name).collect::<Vec<_>>(),
            [
                "id",
                "owner",
                "card",
                "tier",
                "session_length",
                "homepage",
                "opened",
                "row_version",
                "unannotated",
            ]
        );
        let id = &shape.properties[0];
        assert_eq!(id.value, Value::Int64(None));
        assert_eq!(
            id.identifier,
            Some(IdentifierAttribute {
                strategy: IdentifierStrategy::Sequence,
                sequence: Some("AccountSeq"),
            })
        );
        assert_eq!(
            shape.properties[1].column,
            Some(ColumnAttribute {
                db_type: Some(DbType::AnsiString),
                ..Default::default()
            })
        );
        assert_eq!(shape.properties[2].value, Value::Encrypted(None));
        assert_eq!(shape.properties[3].value, Value::Enum(None, DbType::Byte));
        assert!(shape.properties[4].nullable);
        assert!(!shape.properties[3].nullable);
        assert!(
            shape.properties[7]
                .column
                .as_ref()
                .is_some_and(|v| v.version)
        );
        assert_eq!(shape.properties[8].column, None);
    }

    #[test]
    fn derived_table_info() {
        let table = AttributeMappingConvention
            .derive_table_info(Account::type_shape())
            .expect("Account should be mapped");
        assert_eq!(table.identifier_strategy(), IdentifierStrategy::Sequence);
        assert_eq!(
            table
                .insert_columns()
                .map(|v| v.column_name.as_str())
                .collect::<Vec<_>>(),
            ["owner", "CardNumber", "TierId", "SessionLength", "Homepage", "Opened"]
        );
        assert_eq!(
            table
                .update_columns()
                .map(|v| v.column_name.as_str())
                .collect::<Vec<_>>(),
            ["owner", "CardNumber", "TierId", "SessionLength", "Homepage"]
        );
        let insert = PostgreSqlDialect
            .build_insert_sql_query(&table, &Account::default())
            .expect("Failed to build the insert");
        assert_eq!(
            insert.command_text(),
            r#"INSERT INTO "Billing"."Accounts" ("AccountId","owner","CardNumber","TierId","SessionLength","Homepage","Opened") VALUES (nextval('AccountSeq'),:p0,:p1,:p2,:p3,:p4,:p5) RETURNING "AccountId""#
        );
    }

    #[test]
    fn derived_values() {
        let mut account = Account {
            tier: Tier::Premium,
            cached: vec!["ignored".into()],
            ..Default::default()
        };
        assert_eq!(
            account.get_value("tier").expect("Failed to read the tier"),
            Value::Enum(Some(5), DbType::Byte)
        );
        assert_eq!(
            account.get_value("homepage").expect("Failed to read the homepage"),
            Value::Url(None)
        );
        account
            .set_value("tier", Value::UInt8(Some(1)))
            .expect("Failed to assign the tier");
        assert_eq!(account.tier, Tier::Basic);
        account
            .set_value("owner", "Fred".into())
            .expect("Failed to assign the owner");
        account
            .set_value("session_length", Value::Duration(Some(Duration::minutes(5))))
            .expect("Failed to assign the session length");
        assert_eq!(account.owner, "Fred");
        assert_eq!(account.session_length, Some(Duration::minutes(5)));
        assert_eq!(Tier::try_from_value(Value::Int64(Some(5))).expect("Failed to read the tier"), Tier::Premium);

        let error = account
            .set_value("tier", Value::Int32(Some(3)))
            .expect_err("3 is not a tier");
        assert!(format!("{:#}", error).contains("while assigning `Account.tier`"));
        assert!(account.set_value("id", "x".into()).is_err());
        let error = account.get_value("cached").expect_err("Ignored fields are not properties");
        assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::UnknownProperty { .. })
        ));
        assert_eq!(account.cached, ["ignored"]);
    }
}
