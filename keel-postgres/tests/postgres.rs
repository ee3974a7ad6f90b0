#[cfg(test)]
mod tests {
    use indoc::indoc;
    use keel_core::{
        AttributeMappingConvention, ObjectInfoCache, PagingOptions, SqlBuilder, SqlDialect,
        parameter_names, renumber_parameters,
    };
    use keel_postgres::{POSTGRESQL_CHARACTERS, PostgreSqlDialect};
    use keel_tests::{Customer, Invoice, command, execute_tests, init_logs};
    use std::sync::Arc;

    #[test]
    fn postgres() {
        init_logs();
        execute_tests(Arc::new(PostgreSqlDialect));
    }

    #[test]
    fn postgres_returning() {
        init_logs();
        let dialect = PostgreSqlDialect;
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
                INSERT INTO "Customers" ("Name","DateOfBirth","StatusId","CreditLimit","Created") VALUES (:p0,:p1,:p2,:p3,:p4) RETURNING "Id"
            "#}
            .trim()
        );
        assert!(
            dialect
                .build_select_insert_id_sql_query(&customers)
                .expect("Failed to build the identity select")
                .is_none(),
            "The insert returns the identifier"
        );

        let invoices = cache
            .table_info::<Invoice>()
            .expect("Invoice should be mapped");
        let invoice = Invoice {
            id: 5,
            customer_id: 3,
            version: 2,
            ..Default::default()
        };
        let insert = dialect
            .build_insert_sql_query(&invoices, &Invoice::default())
            .expect("Failed to build the insert");
        assert_eq!(
            insert.command_text(),
            indoc! {r#"
                INSERT INTO "Sales"."Invoices" ("InvoiceId","CustomerId","Total") VALUES (nextval('InvoiceIdSequence'),:p0,:p1) RETURNING "InvoiceId"
            "#}
            .trim()
        );
        assert_eq!(command(&dialect, &insert).parameters.len(), 2);
        let update = dialect
            .build_update_sql_query(&invoices, &invoice)
            .expect("Failed to build the update");
        assert_eq!(
            update.command_text(),
            indoc! {r#"
                UPDATE "Sales"."Invoices" SET "CustomerId" = :p0,"Total" = :p1 WHERE "InvoiceId" = :p2 AND "Version" = :p3
            "#}
            .trim()
        );
    }

    #[test]
    fn postgres_casts() {
        let chars = &POSTGRESQL_CHARACTERS;
        let text = r#"SELECT "Total"::numeric FROM "Invoices" WHERE "CustomerId" = :p0 AND "Note" <> ':p0'"#;
        assert_eq!(
            renumber_parameters(text, 2, chars),
            r#"SELECT "Total"::numeric FROM "Invoices" WHERE "CustomerId" = :p2 AND "Note" <> ':p0'"#
        );
        assert_eq!(parameter_names(text, chars), [":p0"]);
    }

    #[test]
    fn postgres_paging() {
        let query = SqlBuilder::select(&POSTGRESQL_CHARACTERS, ["Id", "Name"])
            .expect("Failed to start the select")
            .from("Customers")
            .expect("Failed to add the table")
            .where_column("StatusId")
            .expect("Failed to add the column")
            .is_equal_to(1)
            .to_sql_query();
        let paged = PostgreSqlDialect
            .page_query(&query, PagingOptions::skip_take(0, 25))
            .expect("Failed to page the query");
        assert_eq!(
            paged.command_text(),
            r#"SELECT "Id","Name" FROM "Customers" WHERE ("StatusId" = :p0) LIMIT :p1 OFFSET :p2"#
        );
        let procedure = SqlBuilder::execute(&POSTGRESQL_CHARACTERS, "archive_customers")
            .expect("Failed to start the invocation")
            .to_sql_query();
        assert_eq!(procedure.command_text(), "CALL archive_customers()");
    }
}
