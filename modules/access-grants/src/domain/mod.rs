pub mod error;
pub mod model;
pub mod repo;
pub mod scope;
pub mod service;
