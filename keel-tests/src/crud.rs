use crate::{Country, Customer, CustomerTotal, Invoice, command};
use keel::{
    AttributeMappingConvention, KeelError, ObjectDelta, ObjectInfoCache, SqlDialect,
};
use rust_decimal::Decimal;
use std::sync::Arc;

pub fn crud(dialect: &dyn SqlDialect) {
    let chars = dialect.characters();
    let cache = ObjectInfoCache::new(Arc::new(AttributeMappingConvention));
    let table = cache
        .table_info::<Customer>()
        .expect("Customer should be mapped");
    let customer = Customer {
        name: "Fred Flintstone".into(),
        ..Default::default()
    };

    // Insert
    let insert = dialect
        .build_insert_sql_query(&table, &customer)
        .expect("Failed to build the insert");
    assert!(insert.command_text().starts_with("INSERT INTO "));
    assert!(
        !insert.command_text().contains(&chars.escape_sql("Updated")),
        "Updated is not insertable"
    );
    let insert_command = command(dialect, &insert);
    assert_eq!(insert_command.parameters.len(), table.insert_columns().count());
    if let Some(select_id) = dialect
        .build_select_insert_id_sql_query(&table)
        .expect("Failed to build the identity select")
    {
        let combined = dialect
            .combine(&[insert.clone(), select_id])
            .expect("Failed to combine");
        assert_eq!(
            command(dialect, &combined).parameters.len(),
            insert_command.parameters.len()
        );
    }

    // Select by identifier
    let select = dialect
        .build_select_sql_query(&table, 12.into())
        .expect("Failed to build the select");
    for column in table.columns() {
        assert!(
            select
                .command_text()
                .contains(&chars.escape_sql(&column.column_name)),
            "{} should be selected",
            column.column_name
        );
    }
    assert_eq!(command(dialect, &select).parameters.len(), 1);

    // Update
    let customer = Customer {
        id: 12,
        ..customer
    };
    let update = dialect
        .build_update_sql_query(&table, &customer)
        .expect("Failed to build the update");
    assert!(
        !update.command_text().contains(&chars.escape_sql("Created")),
        "Created is not updatable"
    );
    assert_eq!(
        command(dialect, &update).parameters.len(),
        table.update_columns().count() + 1
    );

    // Partial update
    let mut delta = ObjectDelta::new::<Customer>(12);
    delta
        .add_change("Name", "Barney Rubble")
        .expect("Failed to add a change");
    let update = dialect
        .build_update_delta_sql_query(&table, &delta)
        .expect("Failed to build the partial update");
    assert_eq!(command(dialect, &update).parameters.len(), 2);
    let mut delta = ObjectDelta::new::<Customer>(12);
    delta
        .add_change("Created", None::<i32>)
        .expect("Failed to add a change");
    let error = dialect
        .build_update_delta_sql_query(&table, &delta)
        .expect_err("Created cannot be updated");
    assert!(matches!(
        error.downcast_ref::<KeelError>(),
        Some(KeelError::InvalidArgument { .. })
    ));

    // Delete
    let delete = dialect
        .build_delete_sql_query(&table, 12.into())
        .expect("Failed to build the delete");
    assert!(delete.command_text().starts_with("DELETE FROM "));
    assert_eq!(command(dialect, &delete).parameters.len(), 1);

    // Version column
    let table = cache
        .table_info::<Invoice>()
        .expect("Invoice should be mapped");
    let invoice = Invoice {
        id: 7,
        customer_id: 12,
        total: Decimal::new(1999, 2),
        version: 3,
    };
    let update = dialect
        .build_update_sql_query(&table, &invoice)
        .expect("Failed to build the versioned update");
    let version = chars.escape_sql("Version");
    assert_eq!(update.command_text().matches(version.as_str()).count(), 1);
    assert_eq!(update.arguments().len(), 4);

    // Sequence identifier, supported or rejected with a mapping error
    match dialect.build_insert_sql_query(&table, &Invoice::default()) {
        Ok(insert) => {
            assert!(insert.command_text().contains("InvoiceIdSequence"));
            command(dialect, &insert);
        }
        Err(error) => assert!(matches!(
            error.downcast_ref::<KeelError>(),
            Some(KeelError::Mapping { .. })
        )),
    }

    // Assigned identifier is inserted
    let table = cache
        .table_info::<Country>()
        .expect("Country should be mapped");
    let country = Country {
        code: "IT".into(),
        name: "Italy".into(),
    };
    let insert = dialect
        .build_insert_sql_query(&table, &country)
        .expect("Failed to build the insert");
    assert!(insert.command_text().contains(&chars.escape_sql("Code")));
    assert_eq!(insert.arguments().len(), 2);

    // Without identifier the type can only be read
    let table = cache
        .table_info::<CustomerTotal>()
        .expect("CustomerTotal should be mapped");
    let error = dialect
        .build_delete_sql_query(&table, 1.into())
        .expect_err("CustomerTotal cannot be deleted");
    assert!(matches!(
        error.downcast_ref::<KeelError>(),
        Some(KeelError::Mapping { .. })
    ));
}
