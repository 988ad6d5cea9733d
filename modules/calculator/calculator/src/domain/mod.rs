pub mod error;
pub mod expr;
pub mod history;
pub mod model;
pub mod repo;
pub mod service;
pub mod validator;
