//! Timestamp source for new price observations.

pub trait Clock {
    /// Timestamp for the observation being appended now.
    fn now(&mut self) -> i64;
}
