#[cfg(test)]
mod tests {
    use keel_core::{
        AttributeMappingConvention, ColumnAttribute, IdentifierAttribute, IdentifierStrategy,
        KeelError, MappingConvention, PropertyShape, SqlBuilder, SqlCharacters, TableAttribute,
        TypeShape, Value,
    };

    const BRACKETS: SqlCharacters = SqlCharacters {
        left_delimiter: "[",
        right_delimiter: "]",
        sql_parameter: "@",
        supports_named_parameters: true,
        ..SqlCharacters::EMPTY
    };

    fn column(name: &'static str, column: &'static str, value: Value) -> PropertyShape {
        PropertyShape {
            name,
            value,
            nullable: false,
            column: Some(ColumnAttribute {
                name: Some(column),
                ..Default::default()
            }),
            identifier: None,
        }
    }

    fn order_shape() -> TypeShape {
        let mut id = column("id", "OrderId", Value::Int32(None));
        id.identifier = Some(IdentifierAttribute {
            strategy: IdentifierStrategy::DbGenerated,
            sequence: None,
        });
        TypeShape {
            type_name: "Order",
            table: Some(TableAttribute {
                name: "Orders",
                schema: Some("Sales"),
            }),
            properties: vec![
                id,
                column("customer_id", "CustomerId", Value::Int32(None)),
                column("total", "Total", Value::Decimal(None)),
            ],
        }
    }

    #[test]
    fn select_all_from_table() {
        let table = AttributeMappingConvention
            .derive_table_info(&order_shape())
            .expect("Order should be mapped");
        let refunds = SqlBuilder::select(&BRACKETS, ["RefundId"])
            .expect("Failed to start the sub query")
            .from("Refunds")
            .expect("Failed to add the table")
            .where_column("Amount")
            .expect("Failed to add the column")
            .is_greater_than(5_i32)
            .to_sql_query();
        let query = SqlBuilder::select_all(&BRACKETS)
            .from_table(&table)
            .where_not_exists(refunds)
            .expect("Failed to add the sub query")
            .and("Total")
            .expect("Failed to add the column")
            .is_less_than(100_i32)
            .to_sql_query();
        assert_eq!(
            query.command_text(),
            "SELECT [OrderId],[CustomerId],[Total] FROM [Sales].[Orders] WHERE NOT EXISTS (SELECT [RefundId] FROM [Refunds] WHERE ([Amount] > @p0)) AND ([Total] < @p1)"
        );
        assert_eq!(
            query
                .arguments()
                .iter()
                .map(|v| v.value.clone())
                .collect::<Vec<_>>(),
            [Value::Int32(Some(5)), Value::Int32(Some(100))]
        );

        // Without a mapped table the wildcard stays
        let query = SqlBuilder::select_all(&BRACKETS)
            .from("dbo.Orders")
            .expect("Failed to add the table")
            .to_sql_query();
        assert_eq!(query.command_text(), "SELECT * FROM [dbo].[Orders]");
    }

    #[test]
    fn aggregates() {
        let blocked = SqlBuilder::select(&BRACKETS, ["CustomerId"])
            .expect("Failed to start the sub query")
            .from("Blocked")
            .expect("Failed to add the table")
            .where_column("Reason")
            .expect("Failed to add the column")
            .is_like("%fraud%")
            .to_sql_query();
        let query = SqlBuilder::select(&BRACKETS, ["CustomerId"])
            .expect("Failed to start the select")
            .sum_as("Total", "Spent")
            .expect("Failed to add the sum")
            .max("Total")
            .expect("Failed to add the max")
            .count_all_as("Orders")
            .expect("Failed to add the count")
            .from("Orders")
            .expect("Failed to add the table")
            .where_column("Region")
            .expect("Failed to add the column")
            .is_equal_to("North")
            .and("CustomerId")
            .expect("Failed to add the column")
            .not_in_query(blocked)
            .expect("Failed to add the sub query")
            .group_by(["CustomerId"])
            .expect("Failed to group")
            .order_by_descending(["Spent"])
            .expect("Failed to order")
            .to_sql_query();
        assert_eq!(
            query.command_text(),
            "SELECT [CustomerId],SUM([Total]) AS [Spent],MAX([Total]) AS [Total],COUNT(*) AS [Orders] FROM [Orders] WHERE ([Region] = @p0) AND ([CustomerId] NOT IN (SELECT [CustomerId] FROM [Blocked] WHERE ([Reason] LIKE @p1))) GROUP BY [CustomerId] ORDER BY [Spent] DESC"
        );
        assert_eq!(query.arguments().len(), 2);
        assert_eq!(
            query.arguments()[1].value,
            Value::Varchar(Some("%fraud%".into()))
        );

        let query = SqlBuilder::select(&BRACKETS, Vec::<&str>::new())
            .expect("Aggregates alone are allowed")
            .distinct("Region")
            .expect("Failed to add the column")
            .average_as("Total", "Mean")
            .expect("Failed to add the average")
            .from("Orders")
            .expect("Failed to add the table")
            .to_sql_query();
        assert_eq!(
            query.command_text(),
            "SELECT DISTINCT [Region],AVG([Total]) AS [Mean] FROM [Orders]"
        );
    }

    #[test]
    fn invalid_arguments() {
        let error = SqlBuilder::select(&BRACKETS, ["Id"])
            .expect("Failed to start the select")
            .sum_as("Total", " ")
            .map(|_| ())
            .expect_err("The alias is blank");
        assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::InvalidArgument { .. })
        ));
        assert!(
            SqlBuilder::select(&BRACKETS, ["Id"])
                .expect("Failed to start the select")
                .from("Orders")
                .expect("Failed to add the table")
                .where_column("Id")
                .expect("Failed to add the column")
                .in_(Vec::<i32>::new())
                .is_err(),
            "IN requires values"
        );
        assert!(
            SqlBuilder::select(&BRACKETS, ["Id"])
                .expect("Failed to start the select")
                .from("Orders")
                .expect("Failed to add the table")
                .order_by_ascending(Vec::<&str>::new())
                .is_err()
        );
    }
}
