//! Sheet loading and validation, plus the key-value persistence boundary.

pub mod load;
pub mod persist;
pub mod schema;
pub mod store;

pub use load::*;
pub use persist::*;
pub use schema::*;
pub use store::*;
