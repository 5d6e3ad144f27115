pub mod keys;
pub mod params;
