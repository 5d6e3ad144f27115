pub mod context;
pub mod persist;
pub mod settings;
