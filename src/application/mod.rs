pub mod navigation_controller;
pub mod poller;
pub mod route_planner;

pub use navigation_controller::*;
pub use poller::*;
pub use route_planner::*;
