pub mod config;
pub mod planner;
pub mod render;
pub mod report;
pub mod routing;
pub mod util;
