//! Business logic above the repository layer.

pub mod instance_manager;

pub use instance_manager::create_from_template;
