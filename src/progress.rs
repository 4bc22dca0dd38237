// src/progress.rs
/// Lightweight progress reporting for a scrape run. The CLI implements this
/// to print status lines; tests pass the no-op sink.
pub trait Progress {
    /// Called at the start with the number of records found (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one record has been serialized (game id for schedules,
    /// row index for grids).
    fn item_done(&mut self, _id: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
