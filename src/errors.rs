//! Error taxonomy for effect failures and the import/export pipelines.
//!
//! Expected failures travel through the action pipeline as values
//! (`OperationFailed`, `ImportFailed`, `ExportFailed`, `PersistFailed`);
//! they are never raised across the dispatch boundary.

use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt;
use uuid::Uuid;

/// Category assigned to every effect failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Transient,
    External,
    Unexpected,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not found",
            ErrorCategory::Transient => "transient",
            ErrorCategory::External => "external",
            ErrorCategory::Unexpected => "unexpected",
        };
        write!(f, "{}", name)
    }
}

/// Correlation data attached to an [`OperationError`].
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    pub correlation_id: Uuid,
    pub operation: Option<String>,
    pub playlist_id: Option<Uuid>,
    pub video_id: Option<Uuid>,
    pub index: Option<usize>,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            operation: Some(operation.to_string()),
            playlist_id: None,
            video_id: None,
            index: None,
        }
    }

    pub fn with_playlist(mut self, playlist_id: Uuid) -> Self {
        self.playlist_id = Some(playlist_id);
        self
    }

    pub fn with_video(mut self, video_id: Uuid) -> Self {
        self.video_id = Some(video_id);
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// A categorized effect failure, carried by `Action::OperationFailed`.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationError {
    pub category: ErrorCategory,
    pub message: String,
    pub context: ErrorContext,
    pub occurred_at: DateTime<Utc>,
    /// Rendered inner error, when one exists.
    pub source: Option<String>,
}

impl OperationError {
    pub fn new(category: ErrorCategory, message: &str, context: ErrorContext) -> Self {
        Self {
            category,
            message: message.to_string(),
            context,
            occurred_at: Utc::now(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: &dyn fmt::Display) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(inner) => write!(f, "{} error: {} ({})", self.category, self.message, inner),
            None => write!(f, "{} error: {}", self.category, self.message),
        }
    }
}

impl Error for OperationError {}

/// Failures of the import pipeline, one per failing stage.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    Parse(String),
    UnsupportedSchema(u32),
    Validation { field: String, message: String },
    IdCollision(Uuid),
    PersistenceFailed(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Parse(msg) => write!(f, "import parse error: {}", msg),
            ImportError::UnsupportedSchema(version) => {
                write!(f, "unsupported schema version: {}", version)
            }
            ImportError::Validation { field, message } => {
                write!(f, "import validation error on {}: {}", field, message)
            }
            ImportError::IdCollision(id) => write!(f, "duplicate id in import: {}", id),
            ImportError::PersistenceFailed(msg) => write!(f, "import persistence failed: {}", msg),
        }
    }
}

impl Error for ImportError {}

/// Failures of the export pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    SerializationFailed(String),
    InteropFailed(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::SerializationFailed(msg) => {
                write!(f, "export serialization failed: {}", msg)
            }
            ExportError::InteropFailed(msg) => write!(f, "export download failed: {}", msg),
        }
    }
}

impl Error for ExportError {}
