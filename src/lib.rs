mod configuration;

pub use configuration::*;
pub use keel_core::*;
pub use keel_firebird::*;
pub use keel_macros::*;
pub use keel_mssql::*;
pub use keel_mysql::*;
pub use keel_postgres::*;
pub use keel_sqlite::*;
