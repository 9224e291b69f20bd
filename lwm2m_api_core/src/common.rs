// SPDX-FileCopyrightText: © 2023 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

pub const ENOENT: i32 = 2;
pub const EIO: i32 = 5;
pub const ENOMEM: i32 = 12;
pub const EEXIST: i32 = 17;
pub const EINVAL: i32 = 22;

/// Failure of an object adapter operation.
///
/// The LwM2M stack reports results as plain integers (zero or a negative errno),
/// `code()` gives the value a C-style caller expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lwm2mError {
    /// A resource path did not fit into its buffer.
    PathFormat,
    /// A resource could not be read.
    NotFound,
    /// The instance is provisioned with values the adapter cannot work with.
    InvalidConfiguration,
    /// The engine refused a write of a resource of record.
    WriteFailed(i32),
    /// The object manager could not map a device entry to an instance.
    ResolveFailed(i32),
    /// Error code handed through from a collaborator.
    Forwarded(i32),
}

impl Lwm2mError {
    pub fn code(&self) -> i32 {
        match self {
            Lwm2mError::PathFormat => -ENOMEM,
            Lwm2mError::NotFound => -ENOENT,
            Lwm2mError::InvalidConfiguration => -EINVAL,
            Lwm2mError::WriteFailed(code) | Lwm2mError::ResolveFailed(code) | Lwm2mError::Forwarded(code) => normalize(*code),
        }
    }

    /// Wraps a raw result code returned by a collaborator.
    pub fn from_code(code: i32) -> Self {
        Lwm2mError::Forwarded(normalize(code))
    }
}

// Collaborators may report errno values with either sign, zero means "unspecified".
fn normalize(code: i32) -> i32 {
    match code {
        0 => -EIO,
        c if c > 0 => -c,
        c => c,
    }
}

impl core::fmt::Display for Lwm2mError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Lwm2mError::PathFormat => write!(f, "resource path does not fit the path buffer"),
            Lwm2mError::NotFound => write!(f, "resource not found"),
            Lwm2mError::InvalidConfiguration => write!(f, "invalid instance configuration"),
            Lwm2mError::WriteFailed(code) => write!(f, "resource write failed [code: {}]", normalize(*code)),
            Lwm2mError::ResolveFailed(code) => write!(f, "unable to manage instance [code: {}]", normalize(*code)),
            Lwm2mError::Forwarded(code) => write!(f, "collaborator error [code: {}]", normalize(*code)),
        }
    }
}

/// Folds a result into the `0 | negative errno` convention.
pub fn result_code<T>(result: &Result<T, Lwm2mError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(err) => err.code(),
    }
}
