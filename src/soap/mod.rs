pub mod envelope;
pub mod extract;
