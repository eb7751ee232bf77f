pub mod aggregation;
pub mod export;
pub mod goal;
pub mod projection;
pub mod repository;
pub mod service;
