pub mod bearing;
pub mod cost_field;
pub mod events;
pub mod heuristic;
pub mod ordering;
pub mod ports;
pub mod search;
pub mod simplifier;
pub mod targets;
pub mod types;

pub use bearing::*;
pub use cost_field::*;
pub use events::*;
pub use heuristic::*;
pub use ordering::*;
pub use ports::*;
pub use search::*;
pub use simplifier::*;
pub use targets::*;
pub use types::*;
