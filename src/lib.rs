pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::{route, AppState, HttpResponse};
pub use adapters::server::{FortuneServer, ShutdownHandle};
pub use adapters::storage::LocalStorage;
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::resolver::{resolve, Submission};
pub use core::table::{FortuneKey, FortuneTable, DEFAULT_FORTUNE};
pub use domain::model::Category;
pub use utils::error::{FortuneError, Result};
