pub mod error;
pub mod merge_patch;
pub mod repo;
pub mod service;
pub mod validation;
