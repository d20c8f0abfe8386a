//! HTTP Handlers

mod ping;
mod task;

pub use ping::*;
pub use task::*;
