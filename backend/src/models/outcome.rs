//! Success/failure outcomes.
//!
//! Every fallible operation in this crate returns a plain [`Result`]: exactly
//! one of `Ok(value)` or `Err(error)`, created once by the operation that
//! decides it and consumed once by the caller. Callers branch with `match`,
//! `is_ok`/`is_err` or `?` before extracting the payload. Calling `unwrap` on
//! an `Err` (or `unwrap_err` on an `Ok`) panics; that is a bug at the call
//! site, not a recoverable condition.

use crate::error::{FetchError, GraphError};

/// Outcome of a transformation or formatting operation.
pub type GraphResult<T> = Result<T, GraphError>;

/// Outcome of an upstream fetch.
pub type FetchResult<T> = Result<T, FetchError>;
