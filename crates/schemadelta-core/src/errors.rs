use thiserror::Error;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and testing. The comparators themselves never fail; these
/// kinds cover the loading boundary around them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Snapshot bytes are not UTF-8 JSON, or not an array of objects
    InvalidSnapshot,
    /// Alias configuration could not be parsed
    InvalidAliasConfig,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::InvalidAliasConfig => "ERR_INVALID_ALIAS_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the
/// operation and message for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised while loading snapshots and alias configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeltaError {
    /// A snapshot entry is not an attribute mapping
    #[error("Snapshot entry {index} is not an object")]
    RecordNotObject { index: usize },

    /// Alias configuration could not be parsed
    #[error("Invalid alias configuration ({format}): {reason}")]
    InvalidAliasConfig { format: String, reason: String },
}

impl From<DeltaError> for ExError {
    fn from(err: DeltaError) -> Self {
        match err {
            DeltaError::RecordNotObject { index } => ExError::new(ExErrorKind::InvalidSnapshot)
                .with_message(format!("snapshot entry {} is not an object", index)),
            DeltaError::InvalidAliasConfig { format, reason } => {
                ExError::new(ExErrorKind::InvalidAliasConfig)
                    .with_message(format!("{} alias configuration: {}", format, reason))
            }
        }
    }
}
