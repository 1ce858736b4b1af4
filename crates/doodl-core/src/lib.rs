pub mod config;
pub mod logging;

pub mod error;
pub mod events;
pub mod fetcher;
pub mod http;
pub mod job;
pub mod resolver;
pub mod storage;
pub mod url_model;

pub use error::{Error, ErrorKind, Result};
