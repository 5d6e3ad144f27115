pub mod adapter;
pub mod error;
pub mod executor;
pub mod row;
