use crate::command;
use keel::{CommandKind, SqlBuilder, SqlDialect, Value};

pub fn builder(dialect: &dyn SqlDialect) {
    let chars = dialect.characters();
    let e = |v: &str| chars.escape_sql(v);
    let p = |i: usize| chars.get_parameter_name(i);

    // Select with lists and ranges
    let query = SqlBuilder::select(chars, ["Id", "Name"])
        .expect("Failed to start the select")
        .from("Customers")
        .expect("Failed to add the table")
        .where_column("StatusId")
        .expect("Failed to add the column")
        .in_([1, 2])
        .expect("Failed to add the list")
        .and("CreditLimit")
        .expect("Failed to add the column")
        .between(100, 500)
        .or("Name")
        .expect("Failed to add the column")
        .is_like("F%")
        .order_by_descending(["Name"])
        .expect("Failed to add the ordering")
        .to_sql_query();
    assert_eq!(
        query.command_text(),
        format!(
            "SELECT {},{} FROM {} WHERE ({} IN ({},{})) AND ({} BETWEEN {} AND {}) OR ({} LIKE {}) ORDER BY {} DESC",
            e("Id"),
            e("Name"),
            e("Customers"),
            e("StatusId"),
            p(0),
            p(1),
            e("CreditLimit"),
            p(2),
            p(3),
            e("Name"),
            p(4),
            e("Name"),
        )
    );
    let select_command = command(dialect, &query);
    assert_eq!(select_command.kind, CommandKind::Text);
    assert_eq!(
        select_command
            .parameters
            .iter()
            .map(|v| v.name.clone())
            .collect::<Vec<_>>(),
        (0..5).map(p).collect::<Vec<_>>()
    );

    // Null comparisons take no argument
    let query = SqlBuilder::select(chars, ["Id"])
        .expect("Failed to start the select")
        .from("Customers")
        .expect("Failed to add the table")
        .where_column("DateOfBirth")
        .expect("Failed to add the column")
        .is_equal_to(Value::Date(None))
        .to_sql_query();
    assert_eq!(
        query.command_text(),
        format!(
            "SELECT {} FROM {} WHERE ({} IS NULL)",
            e("Id"),
            e("Customers"),
            e("DateOfBirth")
        )
    );
    assert!(query.arguments().is_empty());
    assert!(command(dialect, &query).parameters.is_empty());

    // Sub-query placeholders follow the outer ones
    let inner = SqlBuilder::select(chars, ["CustomerId"])
        .expect("Failed to start the select")
        .from("Invoices")
        .expect("Failed to add the table")
        .where_column("Total")
        .expect("Failed to add the column")
        .is_greater_than(1000)
        .to_sql_query();
    let query = SqlBuilder::select(chars, ["Name"])
        .expect("Failed to start the select")
        .from("Customers")
        .expect("Failed to add the table")
        .where_column("StatusId")
        .expect("Failed to add the column")
        .is_equal_to(1)
        .and("Id")
        .expect("Failed to add the column")
        .in_query(inner)
        .expect("Failed to add the sub-query")
        .to_sql_query();
    assert_eq!(
        query.command_text(),
        format!(
            "SELECT {} FROM {} WHERE ({} = {}) AND ({} IN (SELECT {} FROM {} WHERE ({} > {})))",
            e("Name"),
            e("Customers"),
            e("StatusId"),
            p(0),
            e("Id"),
            e("CustomerId"),
            e("Invoices"),
            e("Total"),
            p(1),
        )
    );
    assert_eq!(
        query.arguments().iter().map(|v| v.value.clone()).collect::<Vec<_>>(),
        [Value::Int32(Some(1)), Value::Int32(Some(1000))]
    );
    assert_eq!(command(dialect, &query).parameters.len(), 2);

    // A predicate referencing its placeholder twice binds a single argument
    let predicate = format!("{} = {} OR {} IS NULL", e("Name"), p(0), p(0));
    let query = SqlBuilder::select(chars, ["Id"])
        .expect("Failed to start the select")
        .from("Customers")
        .expect("Failed to add the table")
        .where_column("StatusId")
        .expect("Failed to add the column")
        .is_equal_to(1)
        .and_where(&predicate, ["Fred"])
        .expect("Failed to add the predicate")
        .to_sql_query();
    assert!(
        query.command_text().ends_with(&format!(
            " AND ({} = {} OR {} IS NULL)",
            e("Name"),
            p(1),
            p(1)
        )),
        "{}",
        query.command_text()
    );
    let predicate_command = command(dialect, &query);
    assert_eq!(predicate_command.parameters.len(), 2);
    assert_eq!(
        predicate_command
            .parameter(&p(1))
            .expect("The predicate argument should be bound")
            .value,
        Value::Varchar(Some("Fred".into()))
    );

    // Groups
    let query = SqlBuilder::select(chars, ["StatusId"])
        .expect("Failed to start the select")
        .count_all_as("Total")
        .expect("Failed to add the count")
        .from("Customers")
        .expect("Failed to add the table")
        .group_by(["StatusId"])
        .expect("Failed to add the grouping")
        .having(&format!("COUNT(*) > {}", p(0)), [5])
        .expect("Failed to add the having")
        .to_sql_query();
    assert_eq!(
        query.command_text(),
        format!(
            "SELECT {},COUNT(*) AS {} FROM {} GROUP BY {} HAVING COUNT(*) > {}",
            e("StatusId"),
            e("Total"),
            e("Customers"),
            e("StatusId"),
            p(0),
        )
    );
    assert_eq!(command(dialect, &query).parameters.len(), 1);

    // Insert
    let query = SqlBuilder::insert(chars)
        .into_table("Customers")
        .expect("Failed to add the table")
        .columns(["Name", "StatusId"])
        .expect("Failed to add the columns")
        .values([Value::from("Wilma"), Value::from(1)])
        .expect("Failed to add the values")
        .to_sql_query();
    assert_eq!(
        query.command_text(),
        format!(
            "INSERT INTO {} ({},{}) VALUES ({},{})",
            e("Customers"),
            e("Name"),
            e("StatusId"),
            p(0),
            p(1)
        )
    );
    assert_eq!(command(dialect, &query).parameters.len(), 2);
    assert!(
        SqlBuilder::insert(chars)
            .into_table("Customers")
            .expect("Failed to add the table")
            .columns(["Name", "StatusId"])
            .expect("Failed to add the columns")
            .values(["Wilma"])
            .is_err(),
        "The values must match the columns"
    );

    // Update
    let query = SqlBuilder::update(chars, "Customers")
        .expect("Failed to start the update")
        .set_column_value("Name", "Barney")
        .expect("Failed to set the column")
        .set_column_value("StatusId", 2)
        .expect("Failed to set the column")
        .where_column("Id")
        .expect("Failed to add the column")
        .is_equal_to(12)
        .to_sql_query();
    assert_eq!(
        query.command_text(),
        format!(
            "UPDATE {} SET {} = {},{} = {} WHERE ({} = {})",
            e("Customers"),
            e("Name"),
            p(0),
            e("StatusId"),
            p(1),
            e("Id"),
            p(2),
        )
    );
    assert_eq!(command(dialect, &query).parameters.len(), 3);

    // Delete
    let query = SqlBuilder::delete(chars)
        .from("Customers")
        .expect("Failed to add the table")
        .where_column("StatusId")
        .expect("Failed to add the column")
        .is_not_equal_to(1)
        .to_sql_query();
    assert_eq!(
        query.command_text(),
        format!(
            "DELETE FROM {} WHERE ({} <> {})",
            e("Customers"),
            e("StatusId"),
            p(0)
        )
    );

    // Stored procedures
    match chars.stored_procedure_invocation_command {
        Some(invocation) => {
            let query = SqlBuilder::execute(chars, "CustomerTotals")
                .expect("Failed to start the invocation")
                .with_parameter("CustomerId", 12)
                .expect("Failed to add the parameter")
                .with_parameter("Year", 2024)
                .expect("Failed to add the parameter")
                .to_sql_query();
            let (open, close) = if chars.parenthesized_procedure_parameters {
                ("(", ")")
            } else {
                (" ", "")
            };
            let prefix = chars.sql_parameter;
            assert_eq!(
                query.command_text(),
                format!(
                    "{} CustomerTotals{}{}CustomerId,{}Year{}",
                    invocation, open, prefix, prefix, close
                )
            );
            let procedure = command(dialect, &query);
            assert_eq!(procedure.kind, CommandKind::StoredProcedure);
            assert_eq!(
                procedure
                    .parameter(&format!("{}Year", prefix))
                    .expect("Year should be bound")
                    .value,
                Value::Int32(Some(2024))
            );
        }
        None => assert!(SqlBuilder::execute(chars, "CustomerTotals").is_err()),
    }

    // Invalid arguments
    assert!(
        SqlBuilder::select(chars, ["Id"])
            .expect("Failed to start the select")
            .from("  ")
            .is_err()
    );
    assert!(
        SqlBuilder::select(chars, ["Id"])
            .expect("Failed to start the select")
            .from("Customers")
            .expect("Failed to add the table")
            .where_column("StatusId")
            .expect("Failed to add the column")
            .in_(Vec::<i32>::new())
            .is_err(),
        "An empty list cannot be compared"
    );
}
