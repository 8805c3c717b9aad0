//! Status and outcome returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// # Real-time Semantics
///
/// The tree is re-walked from the root every tick. `Running` only means
/// "re-evaluate next tick"; no node remembers that it was running, so a
/// higher-priority branch can pre-empt a long action at any tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The behavior is in progress and should be re-evaluated next tick.
    Running,

    /// The behavior completed successfully.
    ///
    /// For conditions: The condition was met.
    Success,

    /// The behavior failed.
    ///
    /// For conditions: The condition was not met.
    Failure,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Running => "running",
            Status::Success => "success",
            Status::Failure => "failure",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status paired with the human-readable "current action" label that
/// produced it.
///
/// Labels are operator-facing diagnostics (e.g. "Patrolling Area"); they never
/// influence control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Outcome {
    pub status: Status,
    pub label: &'static str,
}

impl Outcome {
    #[inline]
    pub const fn new(status: Status, label: &'static str) -> Self {
        Self { status, label }
    }

    #[inline]
    pub const fn success(label: &'static str) -> Self {
        Self::new(Status::Success, label)
    }

    #[inline]
    pub const fn failure(label: &'static str) -> Self {
        Self::new(Status::Failure, label)
    }

    #[inline]
    pub const fn running(label: &'static str) -> Self {
        Self::new(Status::Running, label)
    }
}
