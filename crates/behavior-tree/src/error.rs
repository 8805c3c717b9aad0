//! Tree construction errors.

/// Errors raised while assembling a behavior tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("composite `{name}` must have at least one child")]
    EmptyComposite { name: &'static str },
}
