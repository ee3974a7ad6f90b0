#[cfg(test)]
mod tests {
    use keel_core::{
        Command, CommandKind, DbType, KeelError, SqlArgument, SqlCharacters, SqlQuery,
        TypeConverters, TypeMappings, Value,
    };
    use time::Duration;

    const CHARS: SqlCharacters = SqlCharacters {
        left_delimiter: "[",
        right_delimiter: "]",
        sql_parameter: "@",
        supports_named_parameters: true,
        stored_procedure_invocation_command: Some("EXEC"),
        ..SqlCharacters::EMPTY
    };

    fn build(query: &SqlQuery, chars: &SqlCharacters) -> keel_core::Result<Command> {
        let mut mappings = TypeMappings::new();
        let converters = TypeConverters::with_defaults(&mut mappings);
        Command::build(query, chars, &converters, &mappings)
    }

    #[test]
    fn count_mismatch() {
        let query = SqlQuery::new("SELECT [Id] FROM [T] WHERE [A] = @p0 AND [B] = @p1", [1_i32]);
        let error = build(&query, &CHARS).expect_err("Two placeholders, one argument");
        assert_eq!(
            error.downcast_ref::<KeelError>(),
            Some(&KeelError::ParameterCountMismatch {
                placeholders: 2,
                arguments: 1
            })
        );

        // The same placeholder twice is a single parameter
        let query = SqlQuery::new("SELECT [Id] FROM [T] WHERE [A] = @p0 OR @p0 IS NULL", [1_i32]);
        let command = build(&query, &CHARS).expect("Failed to build the command");
        assert_eq!(command.parameters.len(), 1);
        assert_eq!(command.kind, CommandKind::Text);
    }

    #[test]
    fn binding() {
        let query = SqlQuery::with_arguments(
            "EXEC [Totals] @Year, @Region;SELECT [Total] FROM [T] WHERE [Id] = @p2",
            vec![
                SqlArgument::new(2024_i32),
                SqlArgument::with_db_type("North", DbType::AnsiString),
                SqlArgument::new(Duration::seconds(2)),
            ],
        )
        .with_timeout(30);
        let command = build(&query, &CHARS).expect("Failed to build the command");
        assert_eq!(command.kind, CommandKind::StoredProcedure);
        assert_eq!(command.timeout, Some(30));
        assert_eq!(
            command
                .parameters
                .iter()
                .map(|v| v.name.as_str())
                .collect::<Vec<_>>(),
            ["@Year", "@Region", "@p2"]
        );
        let region = command.parameter("@region").expect("The region should be bound");
        assert_eq!(region.db_type, DbType::AnsiString);
        let duration = command.parameter("@p2").expect("The duration should be bound");
        assert_eq!(duration.value, Value::Int64(Some(2_000_000_000)));
        assert_eq!(duration.db_type, DbType::Int64);
        assert_eq!(
            command.parameter("@Year").map(|v| v.db_type),
            Some(DbType::Int32)
        );
    }

    #[test]
    fn positional() {
        let query = SqlQuery::new("SELECT Id FROM T WHERE A = ? AND B = ?", ["x", "y"]);
        let command = build(&query, &SqlCharacters::EMPTY).expect("Failed to build the command");
        assert_eq!(command.parameters.len(), 2);
        assert!(command.parameters.iter().all(|v| v.name == "?"));
        assert_eq!(command.parameters[1].value, Value::Varchar(Some("y".into())));
    }

    #[test]
    fn conversion_failure() {
        // No converter can encrypt without a key
        let query = SqlQuery::new(
            "UPDATE [T] SET [Card] = @p0",
            [Value::Encrypted(Some("7622 8765 9902 0924".into()))],
        );
        let error = build(&query, &CHARS).expect_err("The value cannot be converted");
        assert!(format!("{:#}", error).contains("@p0"), "{:#}", error);
    }
}
