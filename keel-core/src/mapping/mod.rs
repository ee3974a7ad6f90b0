mod cache;
mod convention;
mod entity;
mod table_info;

pub use cache::*;
pub use convention::*;
pub use entity::*;
pub use table_info::*;
