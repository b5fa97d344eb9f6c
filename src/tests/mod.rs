//! End-to-end tests against mock SOAP upstreams.

#[cfg(test)]
pub mod common;
