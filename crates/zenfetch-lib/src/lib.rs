pub mod archive;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod pointer;
pub mod record;

pub use config::Config;
pub use error::ZenfetchError;
