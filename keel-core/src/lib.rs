mod as_value;
mod builder;
mod characters;
mod command;
mod converter;
mod dialect;
mod error;
mod executor;
mod identifier;
mod listener;
mod mapping;
mod object_delta;
mod session;
mod sql_query;
mod sql_string;
mod sql_utility;
mod util;
mod value;
mod wrappers;

pub use ::anyhow::Context;
pub use as_value::*;
pub use builder::*;
pub use characters::*;
pub use command::*;
pub use converter::*;
pub use dialect::*;
pub use error::KeelError;
pub use executor::*;
pub use identifier::*;
pub use listener::*;
pub use mapping::*;
pub use object_delta::*;
pub use session::*;
pub use sql_query::*;
pub use sql_string::*;
pub use sql_utility::*;
pub use util::*;
pub use value::*;
pub use wrappers::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
