pub mod error;
pub mod model;
pub mod ownership;
pub mod repo;
pub mod service;
