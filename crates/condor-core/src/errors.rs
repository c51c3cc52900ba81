use thiserror::Error;

/// Result type alias using ConductorError
pub type Result<T> = std::result::Result<T, ConductorError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (and tests) can match
/// on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Manifest content
    /// JSON parse failure, or `name` / `version` missing or of the wrong type
    MalformedManifest,

    // Versioning
    /// A manually requested workflow version is below the server's latest
    VersionConflict,
    /// The delete loop saw the same version twice in a row
    DeleteStalled,

    // Remote
    /// Network or transport failure before a status code was received
    Transport,
    /// Non-200 status that has no dedicated meaning
    RemoteHttp,

    // Integration/IO
    Serialization,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedManifest => "ERR_MALFORMED_MANIFEST",
            ExErrorKind::VersionConflict => "ERR_VERSION_CONFLICT",
            ExErrorKind::DeleteStalled => "ERR_DELETE_STALLED",
            ExErrorKind::Transport => "ERR_TRANSPORT",
            ExErrorKind::RemoteHttp => "ERR_REMOTE_HTTP",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the context a caller needs to act on the
/// failure: which operation, which definition, which version, which status.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_name: Option<String>,
    version: Option<i32>,
    current_version: Option<i32>,
    status: Option<u16>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_name: None,
            version: None,
            current_version: None,
            status: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the definition name
    pub fn with_entity_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    /// Add the version the operation worked with
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    /// Add the server's current version
    pub fn with_current_version(mut self, version: i32) -> Self {
        self.current_version = Some(version);
        self
    }

    /// Add the HTTP status code
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

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

    pub fn entity_name(&self) -> Option<&str> {
        self.entity_name.as_deref()
    }

    pub fn version(&self) -> Option<i32> {
        self.version
    }

    pub fn current_version(&self) -> Option<i32> {
        self.current_version
    }

    pub fn status(&self) -> Option<u16> {
        self.status
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
        if let Some(name) = &self.entity_name {
            write!(f, " (name: {})", name)?;
        }
        if let Some(version) = self.version {
            write!(f, " (version: {})", version)?;
        }
        if let Some(current) = self.current_version {
            write!(f, " (current_version: {})", current)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for reconciliation and remote operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConductorError {
    /// Manifest could not be parsed or lacks a valid `name` / `version`
    #[error("Invalid manifest: {reason}")]
    MalformedManifest { reason: String },

    /// Manual version is below the latest version stored on the server
    #[error("Workflow '{name}' already has version {current}, requested version {requested} would downgrade it")]
    VersionConflict {
        name: String,
        requested: i32,
        current: i32,
    },

    /// The server kept reporting a version that was already deleted
    #[error("Delete of workflow '{name}' stalled: version {version} was reported twice")]
    DeleteStalled { name: String, version: i32 },

    /// Request never produced a response
    #[error("Transport error on {path}: {message}")]
    Transport { path: String, message: String },

    /// Response status was not one the operation understands
    #[error("Received non-OK HTTP status {status} for {path}. Body: {body}")]
    RemoteHttp {
        status: u16,
        path: String,
        body: String,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl ConductorError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        ConductorError::MalformedManifest {
            reason: reason.into(),
        }
    }

    /// Shorthand for the structured kind of this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            ConductorError::MalformedManifest { .. } => ExErrorKind::MalformedManifest,
            ConductorError::VersionConflict { .. } => ExErrorKind::VersionConflict,
            ConductorError::DeleteStalled { .. } => ExErrorKind::DeleteStalled,
            ConductorError::Transport { .. } => ExErrorKind::Transport,
            ConductorError::RemoteHttp { .. } => ExErrorKind::RemoteHttp,
            ConductorError::Serialization { .. } => ExErrorKind::Serialization,
            ConductorError::Config { .. } => ExErrorKind::Config,
        }
    }
}

impl From<ConductorError> for ExError {
    fn from(err: ConductorError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            ConductorError::MalformedManifest { .. } => ExError::new(kind)
                .with_op("parse_manifest")
                .with_message(message),

            ConductorError::VersionConflict {
                name,
                requested,
                current,
            } => ExError::new(kind)
                .with_op("verify_version")
                .with_entity_name(name)
                .with_version(requested)
                .with_current_version(current)
                .with_message(message),

            ConductorError::DeleteStalled { name, version } => ExError::new(kind)
                .with_op("delete_versions")
                .with_entity_name(name)
                .with_version(version)
                .with_message(message),

            ConductorError::Transport { .. } => ExError::new(kind)
                .with_op("send_request")
                .with_message(message),

            ConductorError::RemoteHttp { status, .. } => ExError::new(kind)
                .with_op("send_request")
                .with_status(status)
                .with_message(message),

            ConductorError::Serialization { .. } => ExError::new(kind).with_message(message),

            ConductorError::Config { .. } => ExError::new(kind)
                .with_op("configure")
                .with_message(message),
        }
    }
}

impl From<serde_json::Error> for ConductorError {
    fn from(err: serde_json::Error) -> Self {
        ConductorError::Serialization {
            message: err.to_string(),
        }
    }
}
