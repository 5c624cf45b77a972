pub mod models;
pub mod priority;
pub mod repository;
pub mod types;
