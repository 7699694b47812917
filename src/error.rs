// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Error returned when an argument violates the documented contract
/// of a constructor or an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Returns [Error::InvalidArgument] with the given message unless `condition` holds.
#[inline]
pub(crate) fn check_argument(condition: bool, message: &'static str) -> Result<(), Error> {
    if condition {
        Ok(())
    } else {
        Err(Error::InvalidArgument(message))
    }
}
