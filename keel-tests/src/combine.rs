use crate::command;
use keel::{SqlBuilder, SqlDialect, SqlQuery};

pub fn combine(dialect: &dyn SqlDialect) {
    let chars = dialect.characters();
    let first = SqlBuilder::select(chars, ["Id"])
        .expect("Failed to start the select")
        .from("Customers")
        .expect("Failed to add the table")
        .where_column("Name")
        .expect("Failed to add the column")
        .is_equal_to("Fred")
        .to_sql_query()
        .with_timeout(30);
    let second = SqlBuilder::select(chars, ["Id"])
        .expect("Failed to start the select")
        .from("Invoices")
        .expect("Failed to add the table")
        .where_column("Total")
        .expect("Failed to add the column")
        .is_greater_than(100)
        .to_sql_query()
        .with_timeout(60);
    let combined = dialect
        .combine(&[first.clone(), second])
        .expect("Failed to combine");
    assert_eq!(combined.arguments().len(), 2);
    assert_eq!(combined.timeout(), Some(60));
    assert_eq!(
        combined.command_text(),
        format!(
            "SELECT {} FROM {} WHERE ({} = {}){}SELECT {} FROM {} WHERE ({} > {})",
            chars.escape_sql("Id"),
            chars.escape_sql("Customers"),
            chars.escape_sql("Name"),
            chars.get_parameter_name(0),
            chars.statement_separator,
            chars.escape_sql("Id"),
            chars.escape_sql("Invoices"),
            chars.escape_sql("Total"),
            chars.get_parameter_name(1),
        )
    );
    let combined_command = command(dialect, &combined);
    assert_eq!(combined_command.parameters.len(), 2);
    if chars.supports_named_parameters {
        assert_eq!(combined_command.parameters[0].name, chars.get_parameter_name(0));
        assert_eq!(combined_command.parameters[1].name, chars.get_parameter_name(1));
    }

    // A single query is returned as it is
    let single = dialect
        .combine(std::slice::from_ref(&first))
        .expect("Failed to combine a single query");
    assert_eq!(single.command_text(), first.command_text());
    assert!(dialect.combine(&[] as &[SqlQuery]).is_err());
}
