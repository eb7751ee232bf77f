pub mod executor;
pub mod planner;
