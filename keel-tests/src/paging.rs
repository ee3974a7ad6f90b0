use crate::command;
use keel::{PagingOptions, SqlBuilder, SqlDialect, Value};

pub fn paging(dialect: &dyn SqlDialect) {
    let chars = dialect.characters();
    let query = SqlBuilder::select(chars, ["Id", "Name"])
        .expect("Failed to start the select")
        .from("Customers")
        .expect("Failed to add the table")
        .where_column("StatusId")
        .expect("Failed to add the column")
        .is_equal_to(1)
        .order_by_ascending(["Name"])
        .expect("Failed to add the ordering")
        .to_sql_query();

    // Page 3 of 10 rows: offset 20, rows 21 to 30
    let paging = PagingOptions::for_page(3, 10).expect("Failed to create the paging options");
    assert_eq!(paging, PagingOptions::skip_take(20, 10));
    let paged = dialect
        .page_query(&query, paging)
        .expect("Failed to page the query");
    let paged_command = command(dialect, &paged);
    assert_eq!(paged_command.parameters.len(), 3);
    assert_eq!(paged.arguments()[0].value, Value::Int32(Some(1)));
    for argument in &paged.arguments()[1..] {
        assert!(
            [20, 10, 21, 30]
                .map(|v| Value::Int64(Some(v)))
                .contains(&argument.value),
            "Unexpected paging argument {:?}",
            argument.value
        );
    }
    assert!(
        paged.command_text().starts_with("SELECT "),
        "{}",
        paged.command_text()
    );

    // Count
    let count = dialect
        .count_query(&query)
        .expect("Failed to build the count");
    assert!(count.command_text().starts_with("SELECT COUNT(*)"));
    assert!(!count.command_text().contains("ORDER BY"));
    assert_eq!(command(dialect, &count).parameters.len(), 1);

    assert!(PagingOptions::for_page(0, 10).is_err());
    assert!(PagingOptions::for_page(1, 0).is_err());

    // Row numbers beyond the integer range are errors, never overflows
    assert!(PagingOptions::for_page(u64::MAX, 2).is_err());
    let paging = PagingOptions::skip_take(3, 4);
    assert_eq!(paging.first_row().expect("Failed to compute the first row"), 4);
    assert_eq!(paging.last_row().expect("Failed to compute the last row"), 7);
    assert!(PagingOptions::skip_take(u64::MAX, 1).first_row().is_err());
    assert!(PagingOptions::skip_take(u64::MAX - 1, 2).last_row().is_err());
    assert!(
        dialect
            .page_query(&query, PagingOptions::skip_take(u64::MAX, 1))
            .is_err()
    );
}
