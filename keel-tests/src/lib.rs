mod builder;
mod combine;
mod crud;
mod entities;
mod mock_executor;
mod paging;
mod session;

pub use entities::*;
pub use mock_executor::*;

use crate::{builder::builder, combine::combine, crud::crud, paging::paging, session::session};
use keel::{Command, SqlDialect, SqlQuery, TypeConverters, TypeMappings};
use log::LevelFilter;
use std::{env, sync::Arc};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Binds the query the way a session does with the default converters.
pub fn command(dialect: &dyn SqlDialect, query: &SqlQuery) -> Command {
    let mut mappings = TypeMappings::new();
    let converters = TypeConverters::with_defaults(&mut mappings);
    Command::build(query, dialect.characters(), &converters, &mappings)
        .expect("Failed to build the command")
}

pub fn execute_tests(dialect: Arc<dyn SqlDialect>) {
    crud(dialect.as_ref());
    builder(dialect.as_ref());
    paging(dialect.as_ref());
    combine(dialect.as_ref());
    session(dialect);
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
