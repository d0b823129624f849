/// Non-fatal diagnostics from evaluating a tree.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Warning messages, one per degraded boolean.
    pub warnings: Vec<String>,
    /// Time spent inside kernel calls, in milliseconds.
    pub kernel_time_ms: f64,
}

impl Diagnostics {
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
        self.kernel_time_ms += other.kernel_time_ms;
    }
}

/// Errors from modeling operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OpError {
    #[error("kernel error: {0}")]
    Kernel(#[from] geometry_kernel::KernelError),

    #[error("{operation} failed for '{label}' and strict evaluation forbids falling back: {reason}")]
    StrictFallback {
        operation: &'static str,
        label: String,
        reason: String,
    },

    #[error("part '{part}' has no joint '{joint}'")]
    JointNotFound { part: String, joint: String },

    #[error("part '{part}' has no child '{child}'")]
    ChildNotFound { part: String, child: String },

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}
