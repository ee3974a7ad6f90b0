#[cfg(test)]
mod tests {
    use indoc::indoc;
    use keel_core::{
        AttributeMappingConvention, KeelError, ObjectInfoCache, PagingOptions, SqlBuilder,
        SqlDialect, Value,
    };
    use keel_sqlite::{SQLITE_CHARACTERS, SQLiteDialect};
    use keel_tests::{Customer, Invoice, execute_tests, init_logs};
    use std::sync::Arc;

    #[test]
    fn sqlite() {
        init_logs();
        execute_tests(Arc::new(SQLiteDialect));
    }

    #[test]
    fn sqlite_statements() {
        init_logs();
        let dialect = SQLiteDialect;
        let cache = ObjectInfoCache::new(Arc::new(AttributeMappingConvention));
        let customers = cache
            .table_info::<Customer>()
            .expect("Customer should be mapped");
        let insert = dialect
            .build_insert_sql_query(&customers, &Customer::default())
            .expect("Failed to build the insert");
        assert_eq!(
            insert.command_text(),
            indoc! {r#"
                INSERT INTO "Customers" ("Name","DateOfBirth","StatusId","CreditLimit","Created") VALUES (@p0,@p1,@p2,@p3,@p4)
            "#}
            .trim()
        );
        let select_id = dialect
            .build_select_insert_id_sql_query(&customers)
            .expect("Failed to build the identity select")
            .expect("Customers have a generated identifier");
        assert_eq!(select_id.command_text(), "SELECT last_insert_rowid()");
        assert!(dialect.supports_batched_queries());

        // No sequences
        let invoices = cache
            .table_info::<Invoice>()
            .expect("Invoice should be mapped");
        let error = dialect
            .build_insert_sql_query(&invoices, &Invoice::default())
            .expect_err("Sequences are not available");
        assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::Mapping { .. })
        ));

        // No stored procedures
        assert!(SqlBuilder::execute(&SQLITE_CHARACTERS, "CustomerTotals").is_err());
    }

    #[test]
    fn sqlite_paging() {
        let query = SqlBuilder::select(&SQLITE_CHARACTERS, ["Id", "Name"])
            .expect("Failed to start the select")
            .from("Customers")
            .expect("Failed to add the table")
            .where_column("StatusId")
            .expect("Failed to add the column")
            .is_equal_to(1)
            .order_by_ascending(["Name"])
            .expect("Failed to add the ordering")
            .to_sql_query();
        let paged = SQLiteDialect
            .page_query(
                &query,
                PagingOptions::for_page(3, 10).expect("Failed to create the paging options"),
            )
            .expect("Failed to page the query");
        assert_eq!(
            paged.command_text(),
            indoc! {r#"
                SELECT "Id","Name" FROM "Customers" WHERE ("StatusId" = @p0) ORDER BY "Name" ASC LIMIT @p1 OFFSET @p2
            "#}
            .trim()
        );
        assert_eq!(
            paged
                .arguments()
                .iter()
                .map(|v| v.value.clone())
                .collect::<Vec<_>>(),
            [
                Value::Int32(Some(1)),
                Value::Int64(Some(10)),
                Value::Int64(Some(20))
            ]
        );
        let count = SQLiteDialect
            .count_query(&query)
            .expect("Failed to count the query");
        assert_eq!(
            count.command_text(),
            r#"SELECT COUNT(*) FROM "Customers" WHERE ("StatusId" = @p0)"#
        );
        assert_eq!(count.arguments().len(), 1);
    }
}
