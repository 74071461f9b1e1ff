// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types and the status codes reported through the handle API

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Library error type
///
/// Every failure a driver or model operation can produce maps onto one of
/// these variants, and each variant maps onto a compact [`Status`] code for
/// the handle/FFI boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("file does not match the {0} format")]
    UnknownFormat(String),

    #[error("no registered driver recognizes file: {0}")]
    NoMatchingDriver(String),

    #[error("unknown driver: {0}")]
    UnknownDriver(String),

    #[error("driver {0} does not support saving meshes")]
    MissingSaveCapability(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("scalar accessor used on vector data (or vice versa)")]
    TypeMismatch,

    #[error("index {index} out of range (count {count})")]
    OutOfRange { index: usize, count: usize },

    #[error("stale or invalid handle")]
    InvalidHandle,

    #[error("failed to write to disk: {0}")]
    FailToWriteToDisk(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidData`] with a formatted message
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Error::InvalidData(message.into())
    }

    /// The status code recorded on the last-status channel for this error
    pub fn status(&self) -> Status {
        match self {
            Error::FileNotFound(_) => Status::FileNotFound,
            Error::UnknownFormat(_) | Error::NoMatchingDriver(_) => Status::UnknownFormat,
            Error::UnknownDriver(_) => Status::UnknownDriver,
            Error::MissingSaveCapability(_) => Status::MissingSaveCapability,
            Error::InvalidData(_) => Status::InvalidData,
            Error::TypeMismatch => Status::TypeMismatch,
            Error::OutOfRange { .. } => Status::OutOfRange,
            Error::InvalidHandle => Status::InvalidHandle,
            Error::FailToWriteToDisk(_) => Status::FailToWriteToDisk,
            Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound => Status::FileNotFound,
            Error::Io(_) => Status::InvalidData,
        }
    }
}

/// Status code written to the last-status channel by every handle operation
///
/// `None` means the most recent operation succeeded. A subsequent call on
/// the same context overwrites the value, so callers must read it before
/// issuing another call.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    None = 0,
    FileNotFound = 1,
    UnknownFormat = 2,
    UnknownDriver = 3,
    MissingSaveCapability = 4,
    InvalidData = 5,
    TypeMismatch = 6,
    OutOfRange = 7,
    InvalidHandle = 8,
    FailToWriteToDisk = 9,
}

impl Status {
    pub fn is_ok(&self) -> bool {
        *self == Status::None
    }

    pub fn name(&self) -> &'static str {
        match self {
            Status::None => "None",
            Status::FileNotFound => "FileNotFound",
            Status::UnknownFormat => "UnknownFormat",
            Status::UnknownDriver => "UnknownDriver",
            Status::MissingSaveCapability => "MissingSaveCapability",
            Status::InvalidData => "InvalidData",
            Status::TypeMismatch => "TypeMismatch",
            Status::OutOfRange => "OutOfRange",
            Status::InvalidHandle => "InvalidHandle",
            Status::FailToWriteToDisk => "FailToWriteToDisk",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
