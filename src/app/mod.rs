pub mod api;
pub mod cli;
pub mod commands;
mod context;
pub(crate) mod rollback;

pub use context::AppContext;
