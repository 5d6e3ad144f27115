pub mod extract;
pub mod load;
