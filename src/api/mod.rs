pub mod category;
pub mod context;
pub mod error;
pub mod item;
pub mod params;
pub mod response;
pub mod services;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use category::*;
pub use context::*;
pub use error::*;
pub use item::*;
pub use response::*;
pub use services::*;
pub use validate::*;
