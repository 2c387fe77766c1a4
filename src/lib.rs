pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod database;
pub mod debounce;
pub mod encoder;
pub mod error;
pub mod models;
pub mod normalize;
pub mod share;
pub mod templates;

pub use error::{Error, Result};
