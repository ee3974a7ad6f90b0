#[cfg(test)]
mod tests {
    use indoc::indoc;
    use keel_core::{
        AttributeMappingConvention, CommandKind, ObjectInfoCache, PagingOptions, SqlBuilder,
        SqlDialect, Value,
    };
    use keel_mysql::{MYSQL_CHARACTERS, MySqlDialect};
    use keel_tests::{Customer, command, execute_tests, init_logs};
    use std::sync::Arc;

    #[test]
    fn mysql() {
        init_logs();
        execute_tests(Arc::new(MySqlDialect));
    }

    #[test]
    fn mysql_statements() {
        init_logs();
        let dialect = MySqlDialect;
        let cache = ObjectInfoCache::new(Arc::new(AttributeMappingConvention));
        let customers = cache
            .table_info::<Customer>()
            .expect("Customer should be mapped");
        let customer = Customer {
            id: 3,
            name: "Betty Rubble".into(),
            ..Default::default()
        };
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
                INSERT INTO `Customers` (`Name`,`DateOfBirth`,`StatusId`,`CreditLimit`,`Created`) VALUES (@p0,@p1,@p2,@p3,@p4);SELECT LAST_INSERT_ID()
            "}
            .trim()
        );

        let update = dialect
            .build_update_sql_query(&customers, &customer)
            .expect("Failed to build the update");
        assert_eq!(
            update.command_text(),
            indoc! {"
                UPDATE `Customers` SET `Name` = @p0,`DateOfBirth` = @p1,`StatusId` = @p2,`CreditLimit` = @p3,`Updated` = @p4 WHERE `Id` = @p5
            "}
            .trim()
        );
        assert_eq!(update.arguments()[5].value, Value::Int32(Some(3)));

        let delete = dialect
            .build_delete_sql_query(&customers, 3.into())
            .expect("Failed to build the delete");
        assert_eq!(delete.command_text(), "DELETE FROM `Customers` WHERE `Id` = @p0");
    }

    #[test]
    fn mysql_paging() {
        let query = SqlBuilder::select(&MYSQL_CHARACTERS, ["Id", "Name"])
            .expect("Failed to start the select")
            .from("Customers")
            .expect("Failed to add the table")
            .order_by_ascending(["Name"])
            .expect("Failed to add the ordering")
            .to_sql_query();
        let paged = MySqlDialect
            .page_query(&query, PagingOptions::skip_take(20, 10))
            .expect("Failed to page the query");
        assert_eq!(
            paged.command_text(),
            "SELECT `Id`,`Name` FROM `Customers` ORDER BY `Name` ASC LIMIT @p0,@p1"
        );
        assert_eq!(
            paged
                .arguments()
                .iter()
                .map(|v| v.value.clone())
                .collect::<Vec<_>>(),
            [Value::Int64(Some(20)), Value::Int64(Some(10))]
        );
    }

    #[test]
    fn mysql_procedure_in_batch() {
        let procedure = SqlBuilder::execute(&MYSQL_CHARACTERS, "RecalculateTotals")
            .expect("Failed to start the invocation")
            .with_parameter("CustomerId", 12)
            .expect("Failed to add the parameter")
            .to_sql_query();
        assert_eq!(
            procedure.command_text(),
            "CALL RecalculateTotals(@CustomerId)"
        );
        let select = SqlBuilder::select(&MYSQL_CHARACTERS, ["Total"])
            .expect("Failed to start the select")
            .from("CustomerTotals")
            .expect("Failed to add the table")
            .where_column("CustomerId")
            .expect("Failed to add the column")
            .is_equal_to(12)
            .to_sql_query();
        let dialect = MySqlDialect;
        let combined = dialect
            .combine(&[procedure.clone(), select])
            .expect("Failed to combine");
        assert_eq!(
            combined.command_text(),
            "CALL RecalculateTotals(@CustomerId);SELECT `Total` FROM `CustomerTotals` WHERE (`CustomerId` = @p1)"
        );
        let combined = command(&dialect, &combined);
        assert_eq!(combined.parameters[0].name, "@CustomerId");
        assert_eq!(combined.parameters[1].name, "@p1");
        assert_eq!(command(&dialect, &procedure).kind, CommandKind::StoredProcedure);
    }
}
