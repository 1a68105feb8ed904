//! # App Error Type
//!
//! Unified error type for storefront commands and startup.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  shell line: "add 4"                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  AppResult<String>                                               │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown id? ───── AppError::UnknownProduct ───────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Out of stock? ─── AppError::OutOfStock ───── code() + message ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  printed: [OUT_OF_STOCK] Haden Mangoes is out of stock                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors from user input are printed and the shell keeps going. Only
//! startup errors (config, catalog) end the process.

use std::fmt;
use std::io;
use std::path::PathBuf;

use mango_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors surfaced by the storefront app.
#[derive(Debug, Error)]
pub enum AppError {
    /// Error from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// User input failed a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No product with this id exists in the catalog.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// The product cannot be added because it is out of stock.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// A file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML or has the wrong shape.
    #[error("Invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The catalog file was read but could not be loaded.
    #[error("Invalid catalog {}: {source}", .path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: CoreError,
    },

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A shell line could not be understood.
    #[error("{0}")]
    Usage(String),
}

/// Machine-readable error codes, printed before the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Product id unknown
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Product is not available for sale
    OutOfStock,

    /// Config file problem
    ConfigError,

    /// Catalog file problem
    CatalogError,

    /// Terminal or file I/O
    IoError,

    /// Malformed shell line
    UsageError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::OutOfStock => "OUT_OF_STOCK",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::UsageError => "USAGE_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::Usage(message.into())
    }

    /// The code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Core(CoreError::ProductNotFound(_)) | AppError::UnknownProduct(_) => {
                ErrorCode::NotFound
            }
            AppError::Core(CoreError::Validation(_)) | AppError::Validation(_) => {
                ErrorCode::ValidationError
            }
            AppError::Core(CoreError::CatalogParse(_) | CoreError::InvalidProduct { .. })
            | AppError::Catalog { .. } => ErrorCode::CatalogError,
            AppError::OutOfStock { .. } => ErrorCode::OutOfStock,
            AppError::FileRead { .. } | AppError::Io(_) => ErrorCode::IoError,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Usage(_) => ErrorCode::UsageError,
        }
    }

    /// `[CODE] message`, as shown to the user.
    pub fn display_line(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

/// Result type for storefront commands.
pub type AppResult<T> = Result<T, AppError>;
