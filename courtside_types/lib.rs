pub mod errors;
pub mod panel;
pub mod player;

pub use errors::Result;
