pub mod model;
pub mod queries;
pub mod repository;
pub mod service;
