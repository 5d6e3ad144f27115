pub mod literal;
pub mod value;
