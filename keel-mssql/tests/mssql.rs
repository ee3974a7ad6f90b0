#[cfg(test)]
mod tests {
    use indoc::indoc;
    use keel_core::{
        AttributeMappingConvention, KeelError, ObjectInfoCache, PagingOptions, SqlBuilder,
        SqlDialect, SqlQuery, Value,
    };
    use keel_mssql::{MSSQL_CHARACTERS, MsSql2005Dialect, MsSql2012Dialect};
    use keel_tests::{Customer, Invoice, command, execute_tests, init_logs};
    use std::sync::Arc;

    fn customers_query() -> SqlQuery {
        SqlBuilder::select(&MSSQL_CHARACTERS, ["Id", "Name"])
            .expect("Failed to start the select")
            .from("Customers")
            .expect("Failed to add the table")
            .where_column("StatusId")
            .expect("Failed to add the column")
            .is_equal_to(1)
            .order_by_ascending(["Name"])
            .expect("Failed to add the ordering")
            .to_sql_query()
    }

    fn argument_values(query: &SqlQuery) -> Vec<Value> {
        query.arguments().iter().map(|v| v.value.clone()).collect()
    }

    #[test]
    fn mssql2005() {
        init_logs();
        execute_tests(Arc::new(MsSql2005Dialect));
    }

    #[test]
    fn mssql2012() {
        init_logs();
        execute_tests(Arc::new(MsSql2012Dialect));
    }

    #[test]
    fn mssql2005_paging() {
        let paged = MsSql2005Dialect
            .page_query(
                &customers_query(),
                PagingOptions::for_page(3, 10).expect("Failed to create the paging options"),
            )
            .expect("Failed to page the query");
        assert_eq!(
            paged.command_text(),
            indoc! {"
                SELECT [Id],[Name] FROM (SELECT [Id],[Name],ROW_NUMBER() OVER(ORDER BY [Name] ASC) AS RowNumber \
                FROM [Customers] WHERE ([StatusId] = @p0)) AS PagedResults WHERE (RowNumber >= @p1 AND RowNumber <= @p2)
            "}
            .trim()
        );
        assert_eq!(
            argument_values(&paged),
            [
                Value::Int32(Some(1)),
                Value::Int64(Some(21)),
                Value::Int64(Some(30))
            ]
        );

        // Qualified and aliased columns are read from the inner query by their last name
        let query = SqlQuery::text(
            "SELECT [c].[Id], COUNT(*) AS [Invoices] FROM [Customers] [c] GROUP BY [c].[Id]",
        );
        let paged = MsSql2005Dialect
            .page_query(&query, PagingOptions::skip_take(0, 5))
            .expect("Failed to page the query");
        assert!(
            paged
                .command_text()
                .starts_with("SELECT [Id],[Invoices] FROM (SELECT [c].[Id],COUNT(*) AS [Invoices],ROW_NUMBER() OVER(ORDER BY (SELECT NULL)) AS RowNumber FROM [Customers] [c] GROUP BY [c].[Id])"),
            "{}",
            paged.command_text()
        );
        assert_eq!(command(&MsSql2005Dialect, &paged).parameters.len(), 2);

        // An expression without alias is named in the inner query, its own AS stays untouched
        let query = SqlQuery::text("SELECT [Id], CAST([Total] AS INT) FROM [Invoices] ORDER BY [Id]");
        let paged = MsSql2005Dialect
            .page_query(&query, PagingOptions::skip_take(20, 10))
            .expect("Failed to page the query");
        assert_eq!(
            paged.command_text(),
            indoc! {"
                SELECT [Id],[Column2] FROM (SELECT [Id],CAST([Total] AS INT) AS [Column2],\
                ROW_NUMBER() OVER(ORDER BY [Id]) AS RowNumber FROM [Invoices]) AS PagedResults \
                WHERE (RowNumber >= @p0 AND RowNumber <= @p1)
            "}
            .trim()
        );
        assert_eq!(
            argument_values(&paged),
            [Value::Int64(Some(21)), Value::Int64(Some(30))]
        );
    }

    #[test]
    fn mssql2012_paging() {
        let paged = MsSql2012Dialect
            .page_query(
                &customers_query(),
                PagingOptions::for_page(3, 10).expect("Failed to create the paging options"),
            )
            .expect("Failed to page the query");
        assert_eq!(
            paged.command_text(),
            indoc! {"
                SELECT [Id],[Name] FROM [Customers] WHERE ([StatusId] = @p0) ORDER BY [Name] ASC \
                OFFSET @p1 ROWS FETCH NEXT @p2 ROWS ONLY
            "}
            .trim()
        );
        assert_eq!(
            argument_values(&paged),
            [
                Value::Int32(Some(1)),
                Value::Int64(Some(20)),
                Value::Int64(Some(10))
            ]
        );

        // OFFSET requires an ordering
        let query = SqlQuery::text("SELECT [Id] FROM [Customers]");
        let paged = MsSql2012Dialect
            .page_query(&query, PagingOptions::skip_take(0, 5))
            .expect("Failed to page the query");
        assert_eq!(
            paged.command_text(),
            "SELECT [Id] FROM [Customers] ORDER BY (SELECT NULL) OFFSET @p0 ROWS FETCH NEXT @p1 ROWS ONLY"
        );

        let error = MsSql2012Dialect
            .page_query(
                &SqlQuery::text("DELETE FROM [Customers]"),
                PagingOptions::skip_take(0, 5),
            )
            .expect_err("Only selects can be paged");
        assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn mssql_identity() {
        let cache = ObjectInfoCache::new(Arc::new(AttributeMappingConvention));
        let customers = cache
            .table_info::<Customer>()
            .expect("Customer should be mapped");
        for dialect in [
            &MsSql2005Dialect as &dyn SqlDialect,
            &MsSql2012Dialect as &dyn SqlDialect,
        ] {
            let insert = dialect
                .build_insert_sql_query(&customers, &Customer::default())
                .expect("Failed to build the insert");
            let select_id = dialect
                .build_select_insert_id_sql_query(&customers)
                .expect("Failed to build the identity select")
                .expect("Customers have a generated identifier");
            let combined = dialect
                .combine(&[insert, select_id])
                .expect("Failed to combine");
            assert_eq!(
                combined.command_text(),
                indoc! {"
                    INSERT INTO [Customers] ([Name],[DateOfBirth],[StatusId],[CreditLimit],[Created]) \
                    VALUES (@p0,@p1,@p2,@p3,@p4);SELECT SCOPE_IDENTITY()
                "}
                .trim()
            );
        }
    }

    #[test]
    fn mssql_sequence() {
        let cache = ObjectInfoCache::new(Arc::new(AttributeMappingConvention));
        let invoices = cache
            .table_info::<Invoice>()
            .expect("Invoice should be mapped");
        let invoice = Invoice {
            customer_id: 3,
            ..Default::default()
        };
        let insert = MsSql2012Dialect
            .build_insert_sql_query(&invoices, &invoice)
            .expect("Failed to build the insert");
        assert_eq!(
            insert.command_text(),
            indoc! {"
                DECLARE @id BIGINT;SELECT @id = NEXT VALUE FOR [InvoiceIdSequence];\
                INSERT INTO [Sales].[Invoices] ([InvoiceId],[CustomerId],[Total]) VALUES (@id,@p0,@p1);SELECT @id
            "}
            .trim()
        );
        let bound = command(&MsSql2012Dialect, &insert);
        assert_eq!(bound.parameters.len(), 2);
        assert!(bound.parameter("@id").is_none(), "Declared variables are not parameters");
        assert_eq!(
            bound
                .parameter("@p0")
                .expect("The customer should be bound")
                .value,
            Value::Int32(Some(3))
        );
        assert!(
            MsSql2012Dialect
                .build_select_insert_id_sql_query(&invoices)
                .expect("Failed to build the identity select")
                .is_none()
        );

        let error = MsSql2005Dialect
            .build_insert_sql_query(&invoices, &invoice)
            .expect_err("SQL Server 2005 has no sequences");
        assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::Mapping { .. })
        ));
    }
}
