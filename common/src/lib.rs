pub mod error;
pub mod models;

pub use error::{BoxError, Error};
pub type Result<T> = std::result::Result<T, Error>;
