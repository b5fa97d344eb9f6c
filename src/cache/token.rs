use std::time::{Duration, Instant};

/// One issued upstream credential with its issue time.
#[derive(Debug, Clone)]
pub struct Token {
    pub value: String,
    pub issued_at: Instant,
}

impl Token {
    pub fn new(value: String) -> Self {
        Self { value, issued_at: Instant::now() }
    }

    /// Expiry is evaluated lazily on read; there is no timer.
    pub fn is_fresh(&self, lifetime: Duration) -> bool {
        self.issued_at.elapsed() < lifetime
    }
}
