pub mod error;
pub mod execution;
pub mod telemetry;

#[cfg(test)]
mod tests;
