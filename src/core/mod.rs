#[cfg(feature = "assets")]
pub mod assets;
pub mod resolver;
pub mod table;

pub use crate::domain::model::Category;
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
