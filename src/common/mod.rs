pub mod cache;
pub mod error;
pub mod event;

pub use cache::*;
pub use error::*;
pub use event::*;
