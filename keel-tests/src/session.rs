use crate::{
    Country, Customer, CustomerStatus, Document, Invoice, MockExecutor, row,
};
use keel::{
    AttributeMappingConvention, CommandKind, DbType, KeelError, PagingOptions, SessionFactory, SqlBuilder,
    SqlDialect, Value,
};
use rust_decimal::Decimal;
use std::sync::Arc;

pub fn session(dialect: Arc<dyn SqlDialect>) {
    let factory = SessionFactory::new(dialect.clone(), Arc::new(AttributeMappingConvention))
        .with_timeout(Some(15));
    let chars = dialect.characters();

    // Generated identifier, SQL Server returns it as a decimal
    let mut session = factory.open_session(MockExecutor::new().with_scalar(Decimal::new(42, 0)));
    let mut customer = Customer {
        name: "Fred Flintstone".into(),
        status: CustomerStatus::Active,
        ..Default::default()
    };
    session
        .insert(&mut customer)
        .expect("Failed to insert the customer");
    assert_eq!(customer.id, 42);
    let executor = session.into_executor();
    let insert = executor.commands.first().expect("The insert should run");
    assert!(insert.text.starts_with("INSERT INTO "));
    assert_eq!(insert.kind, CommandKind::Text);
    assert_eq!(insert.timeout, Some(15));
    assert!(
        insert
            .parameters
            .iter()
            .any(|v| v.value == Value::Int16(Some(1)) && v.db_type == DbType::Int16),
        "The status is written as its discriminant"
    );

    // Already set
    let mut session = factory.open_session(MockExecutor::new());
    let error = session
        .insert(&mut customer)
        .expect_err("The identifier is already set");
    assert!(matches!(
        error.downcast_ref::<KeelError>(),
        Some(KeelError::IdentifierAlreadySet { .. })
    ));
    assert!(session.executor().commands.is_empty());

    // Client generated identifier
    let mut document = Document {
        title: "Minutes".into(),
        ..Default::default()
    };
    session
        .insert(&mut document)
        .expect("Failed to insert the document");
    assert!(!document.id.is_nil());

    // Assigned identifier
    let error = session
        .insert(&mut Country::default())
        .expect_err("The code is not assigned");
    assert!(matches!(
        error.downcast_ref::<KeelError>(),
        Some(KeelError::IdentifierNotSet { .. })
    ));

    // Update and delete
    assert!(session.update(&customer).expect("Failed to update"));
    assert!(session.delete(&customer).expect("Failed to delete"));
    let error = session
        .delete(&Customer::default())
        .expect_err("The identifier is not set");
    assert!(matches!(
        error.downcast_ref::<KeelError>(),
        Some(KeelError::IdentifierNotSet { .. })
    ));
    let mut session = factory.open_session(MockExecutor::new().with_affected(0));
    let invoice = Invoice {
        id: 3,
        customer_id: 42,
        total: Decimal::new(10, 0),
        version: 1,
    };
    assert!(
        !session.update(&invoice).expect("Failed to update"),
        "A stale version matches no row"
    );

    // Reading
    let mut session = factory.open_session(MockExecutor::new().with_rows(vec![row(
        &["Id", "Name", "StatusId", "CreditLimit"],
        [
            Value::Int64(Some(42)),
            "Fred Flintstone".into(),
            Value::Int32(Some(2)),
            Value::Null,
        ],
    )]));
    let found = session
        .single::<Customer>(42)
        .expect("Failed to read the customer")
        .expect("The customer should be found");
    assert_eq!(found.id, 42);
    assert_eq!(found.name, "Fred Flintstone");
    assert_eq!(found.status, CustomerStatus::Suspended);
    assert_eq!(found.credit_limit, None);
    assert_eq!(session.single::<Customer>(43).expect("Failed to read"), None);

    // Paging
    let mut session = factory.open_session(
        MockExecutor::new()
            .with_scalar(Value::Int64(Some(25)))
            .with_rows(vec![
                row(&["Id", "Name"], [Value::Int32(Some(21)), "Wilma".into()]),
                row(&["Id", "Name"], [Value::Int32(Some(22)), "Betty".into()]),
            ]),
    );
    let query = SqlBuilder::select(chars, ["Id", "Name"])
        .expect("Failed to start the select")
        .from("Customers")
        .expect("Failed to add the table")
        .order_by_ascending(["Name"])
        .expect("Failed to add the ordering")
        .to_sql_query();
    let page = session
        .paged::<Customer>(&query, PagingOptions::for_page(3, 10).expect("Invalid paging"))
        .expect("Failed to read the page");
    assert_eq!(page.page, 3);
    assert_eq!(page.total_results, 25);
    assert_eq!(page.total_pages(), 3);
    assert!(!page.has_more());
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[1].name, "Betty");

    // Transactions are forwarded
    session.begin().expect("Failed to begin");
    session.commit().expect("Failed to commit");
    session.begin().expect("Failed to begin");
    session.rollback().expect("Failed to roll back");
    assert_eq!(
        session.executor().transactions,
        ["begin", "commit", "begin", "rollback"]
    );
}
