/// Errors surfaced by set-valued replicated types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetError {
    /// A remove targeted an element that is not currently observable.
    /// Batch removes report the first missing element and leave the
    /// payload untouched.
    #[error("element not present: {0}")]
    ElementNotPresent(String),
}
