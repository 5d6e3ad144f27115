pub mod envelope;
pub mod record;
