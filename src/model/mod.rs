pub mod lege;
pub mod query;
