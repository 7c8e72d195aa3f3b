//! Error types for cloudplan.
//!
//! This module defines the error types used throughout cloudplan, covering
//! declaration construction, graph validation, identifier derivation,
//! encoding preconditions, and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cloudplan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for cloudplan.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Declaration Errors
    // ========================================================================
    /// A declaration with the same name already exists in the graph.
    #[error("Declaration '{0}' already exists in the graph")]
    DuplicateDeclaration(String),

    /// Two distinct input keys derive the same identifier.
    #[error("Route keys '{first}' and '{second}' both derive identifier '{identifier}'")]
    IdentifierCollision {
        /// The key that first claimed the identifier
        first: String,
        /// The key that collided with it
        second: String,
        /// The shared identifier
        identifier: String,
    },

    /// A route key does not have the `METHOD /path` shape.
    #[error("Invalid route key '{0}': expected 'METHOD /path'")]
    InvalidRouteKey(String),

    // ========================================================================
    // Graph Errors
    // ========================================================================
    /// A dependency edge cannot be satisfied: it points at a name not
    /// present in the graph, or at the declaration itself.
    #[error("Declaration '{resource}' has an unsatisfiable dependency on '{dependency}'")]
    UnresolvedDependency {
        /// The declaration carrying the edge
        resource: String,
        /// The missing dependency name
        dependency: String,
    },

    /// The dependency edges form a cycle.
    #[error("Dependency cycle between declarations: {}", .0.join(", "))]
    DependencyCycle(Vec<String>),

    // ========================================================================
    // Encoding Errors
    // ========================================================================
    /// The boot script handed to the custom-data encoder is not pure ASCII.
    #[error("Custom data contains a non-ASCII byte at offset {offset}")]
    NonAsciiCustomData {
        /// Byte offset of the first offending byte
        offset: usize,
    },

    // ========================================================================
    // Stack and Configuration Errors
    // ========================================================================
    /// A required stack configuration key is missing.
    #[error("Missing required config key '{key}' for stack '{stack}'")]
    MissingConfig {
        /// Stack name
        stack: String,
        /// Missing key
        key: String,
    },

    /// A secret slot is not declared for the stack.
    #[error("Secret '{name}' is not declared for stack '{stack}'")]
    MissingSecret {
        /// Stack name
        stack: String,
        /// Secret slot name
        name: String,
    },

    /// A stack configuration file could not be loaded.
    #[error("Failed to load stack config from '{path}': {message}")]
    StackConfigLoad {
        /// Path to the stack config file
        path: PathBuf,
        /// Error message
        message: String,
    },

    // ========================================================================
    // Blueprint Errors
    // ========================================================================
    /// No built-in blueprint with the given name.
    #[error("Blueprint '{0}' not found")]
    BlueprintNotFound(String),

    // ========================================================================
    // IO and Serialization Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization or parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization or parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Creates an unresolved-dependency error.
    pub fn unresolved(resource: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self::UnresolvedDependency {
            resource: resource.into(),
            dependency: dependency.into(),
        }
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::DuplicateDeclaration(_)
            | Error::IdentifierCollision { .. }
            | Error::InvalidRouteKey(_) => 2,
            Error::UnresolvedDependency { .. } | Error::DependencyCycle(_) => 3,
            Error::NonAsciiCustomData { .. } => 4,
            Error::MissingConfig { .. }
            | Error::MissingSecret { .. }
            | Error::StackConfigLoad { .. } => 5,
            Error::BlueprintNotFound(_) => 6,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::DuplicateDeclaration("x".into()).exit_code(), 2);
        assert_eq!(Error::unresolved("a", "b").exit_code(), 3);
        assert_eq!(Error::NonAsciiCustomData { offset: 0 }.exit_code(), 4);
        assert_eq!(Error::BlueprintNotFound("x".into()).exit_code(), 6);
    }

    #[test]
    fn test_display_messages() {
        let err = Error::IdentifierCollision {
            first: "GET /items".into(),
            second: "GET /item/s".into(),
            identifier: "GETitems".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("GET /items"));
        assert!(msg.contains("GETitems"));
    }
}
