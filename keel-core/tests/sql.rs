#[cfg(test)]
mod tests {
    use indoc::indoc;
    use keel_core::{
        Clause, SqlCharacters, SqlString, parameter_names, read_group_by_clause,
        read_having_clause, read_order_by_clause, read_select_clause, read_table_name,
        read_where_clause, references_parameter, renumber_parameters,
    };

    const BRACKETS: SqlCharacters = SqlCharacters {
        left_delimiter: "[",
        right_delimiter: "]",
        sql_parameter: "@",
        supports_named_parameters: true,
        stored_procedure_invocation_command: Some("EXEC"),
        ..SqlCharacters::EMPTY
    };

    #[test]
    fn escape_identifiers() {
        assert_eq!(BRACKETS.escape_sql("Customers"), "[Customers]");
        assert_eq!(BRACKETS.escape_sql("[Customers]"), "[Customers]");
        assert_eq!(BRACKETS.escape_sql("Sales.Customers"), "[Sales].[Customers]");
        assert_eq!(BRACKETS.escape_sql("Sales.[Customers]"), "[Sales].[Customers]");
        assert_eq!(BRACKETS.escape_sql("[Sales.Q1].Totals"), "[Sales.Q1].[Totals]");
        assert_eq!(BRACKETS.escape_sql("*"), "*");
        assert_eq!(BRACKETS.escape_sql("c.*"), "[c].*");
        for name in ["Name", "dbo.Customers", "[A].[B]"] {
            let once = BRACKETS.escape_sql(name);
            assert_eq!(BRACKETS.escape_sql(&once), once, "Escaping twice changed {}", name);
        }
        assert_eq!(SqlCharacters::EMPTY.escape_sql("Customers"), "Customers");
        assert!(BRACKETS.is_escaped("[Id]"));
        assert!(!BRACKETS.is_escaped("Id"));
    }

    #[test]
    fn parameter_names_by_style() {
        assert_eq!(BRACKETS.get_parameter_name(3), "@p3");
        assert_eq!(SqlCharacters::EMPTY.get_parameter_name(3), "?");
        assert!(BRACKETS.is_stored_procedure_call("  exec Totals @Year"));
        assert!(!BRACKETS.is_stored_procedure_call("EXECUTE_LOG"));
        assert!(!SqlCharacters::EMPTY.is_stored_procedure_call("EXEC Totals"));
    }

    #[test]
    fn renumber() {
        let text = "SELECT [Id] FROM [Customers] WHERE ([Name] = @p0 OR @p0 IS NULL) AND [Code] = @p1";
        assert_eq!(
            renumber_parameters(text, 2, &BRACKETS),
            "SELECT [Id] FROM [Customers] WHERE ([Name] = @p2 OR @p2 IS NULL) AND [Code] = @p3"
        );
        assert_eq!(renumber_parameters(text, 0, &BRACKETS), text);

        // Literals, delimited identifiers, named parameters and system variables stay
        let text = "SELECT '@p0', [@p0], @Year, @@IDENTITY FROM [T] WHERE [A] = @p0";
        assert_eq!(
            renumber_parameters(text, 5, &BRACKETS),
            "SELECT '@p0', [@p0], @Year, @@IDENTITY FROM [T] WHERE [A] = @p5"
        );

        // Positional placeholders carry no index
        let text = "SELECT Id FROM Customers WHERE Name = ? AND Code = ?";
        assert_eq!(renumber_parameters(text, 3, &SqlCharacters::EMPTY), text);
    }

    #[test]
    fn distinct_parameters() {
        let text = "UPDATE [T] SET [A] = @p0 WHERE [B] = @p1 OR @P1 IS NULL AND [C] = 'x@p9'";
        assert_eq!(parameter_names(text, &BRACKETS), ["@p0", "@p1"]);
        assert!(references_parameter(text, 1, &BRACKETS));
        assert!(!references_parameter(text, 9, &BRACKETS));
        assert_eq!(
            parameter_names("DECLARE @id INT;SELECT @id = @p0;SELECT @id", &BRACKETS),
            ["@p0"]
        );
        assert!(parameter_names("SELECT [Email] FROM [T] WHERE [Email] LIKE 'a@b'", &BRACKETS).is_empty());
        assert_eq!(
            parameter_names("SELECT Id FROM T WHERE A = ? AND B = ?", &SqlCharacters::EMPTY),
            ["?", "?"]
        );
    }

    #[test]
    fn clauses() {
        let text = indoc! {"
            SELECT [c].[Id], (SELECT COUNT(*) FROM [Invoices] [i] WHERE [i].[CustomerId] = [c].[Id]) AS [Invoices]
            FROM [Sales].[Customers] [c]
            WHERE [c].[Name] LIKE 'order by%' AND [c].[StatusId] = @p0
            GROUP BY [c].[Id]
            HAVING COUNT(*) > @p1
            ORDER BY [c].[Id] DESC;
        "};
        assert_eq!(
            read_select_clause(text, &BRACKETS).expect("Failed to read the select"),
            "[c].[Id], (SELECT COUNT(*) FROM [Invoices] [i] WHERE [i].[CustomerId] = [c].[Id]) AS [Invoices]"
        );
        assert_eq!(
            read_table_name(text, &BRACKETS).expect("Failed to read the table"),
            "[Sales].[Customers]"
        );
        assert_eq!(
            read_where_clause(text, &BRACKETS),
            Some("[c].[Name] LIKE 'order by%' AND [c].[StatusId] = @p0")
        );
        assert_eq!(read_group_by_clause(text, &BRACKETS), Some("[c].[Id]"));
        assert_eq!(read_having_clause(text, &BRACKETS), Some("COUNT(*) > @p1"));
        assert_eq!(read_order_by_clause(text, &BRACKETS), Some("[c].[Id] DESC"));

        let sql = SqlString::parse(text, &BRACKETS);
        assert!(sql.has(Clause::GroupBy));
        assert_eq!(sql.keyword_position(Clause::Select), Some(0));
        assert!(sql.before(Clause::OrderBy).ends_with("HAVING COUNT(*) > @p1"));
        assert!(sql.from(Clause::OrderBy).starts_with("ORDER BY"));

        let text = "select Id from Customers order   by Name";
        assert_eq!(read_order_by_clause(text, &SqlCharacters::EMPTY), Some("Name"));
        assert_eq!(read_where_clause(text, &SqlCharacters::EMPTY), None);
        assert!(read_select_clause("DELETE FROM Customers", &SqlCharacters::EMPTY).is_err());
        assert!(read_table_name("SELECT 1", &SqlCharacters::EMPTY).is_err());
    }
}
