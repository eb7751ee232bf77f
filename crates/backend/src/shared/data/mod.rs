pub mod dataset_cache;
pub mod db;
