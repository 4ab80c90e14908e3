/*!
# Unified Error Type

This module provides a unified error enum that consolidates all Sensegraph
error types for better ergonomics and error handling consistency.
*/

use std::error::Error;
use std::fmt;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SensegraphError>;

/// Unified error type for all Sensegraph operations.
///
/// This enum consolidates all error types for better error handling and pattern matching.
#[derive(Debug)]
pub enum SensegraphError {
    /// General-purpose I/O error
    Io(String),

    /// Short read or failed read on a binary input stream
    IoRead(String),

    /// Failed write or flush on a binary output stream
    IoWrite(String),

    /// Invalid argument or parameter
    InvalidArgument(String),

    /// Graph is empty or invalid for the operation
    InvalidGraph(String),

    /// Algorithm terminated unexpectedly
    Algorithm(String),
}

impl SensegraphError {
    /// Creates a generic I/O error with the given message.
    pub fn io(message: impl Into<String>) -> Self {
        SensegraphError::Io(message.into())
    }

    /// Creates a read-side I/O error.
    pub fn io_read(message: impl Into<String>) -> Self {
        SensegraphError::IoRead(message.into())
    }

    /// Creates a write-side I/O error.
    pub fn io_write(message: impl Into<String>) -> Self {
        SensegraphError::IoWrite(message.into())
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SensegraphError::InvalidArgument(message.into())
    }

    /// Creates an invalid graph error.
    pub fn invalid_graph(message: impl Into<String>) -> Self {
        SensegraphError::InvalidGraph(message.into())
    }

    /// Creates an algorithm error.
    pub fn algorithm(message: impl Into<String>) -> Self {
        SensegraphError::Algorithm(message.into())
    }
}

impl fmt::Display for SensegraphError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SensegraphError::Io(msg) => write!(f, "I/O error: {}", msg),
            SensegraphError::IoRead(msg) => write!(f, "Read error: {}", msg),
            SensegraphError::IoWrite(msg) => write!(f, "Write error: {}", msg),
            SensegraphError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            SensegraphError::InvalidGraph(msg) => write!(f, "Invalid graph: {}", msg),
            SensegraphError::Algorithm(msg) => write!(f, "Algorithm error: {}", msg),
        }
    }
}

impl Error for SensegraphError {}

impl From<std::io::Error> for SensegraphError {
    fn from(e: std::io::Error) -> Self {
        SensegraphError::Io(e.to_string())
    }
}
