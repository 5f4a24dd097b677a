//! Core runtime value types and error handling.
//!
//! This crate provides the foundational types for the deferred-value
//! runtime: the loosely-typed value representation and the error objects
//! that surface as rejection reasons.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of runtime values
//! - [`JsError`] - Runtime errors with a kind and message
//! - [`ErrorKind`] - Types of runtime errors
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, JsError, Value};
//!
//! // Create runtime values
//! let num = Value::Smi(42);
//! assert!(num.is_truthy());
//! assert_eq!(num.type_of(), "number");
//!
//! // Create an error value
//! let reason = Value::Error(JsError::new(ErrorKind::TypeError, "not iterable"));
//! assert_eq!(reason.to_string(), "TypeError: not iterable");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod value;

pub use error::{ErrorKind, JsError};
pub use value::Value;
