mod dialect;
mod paging;

pub use dialect::*;
