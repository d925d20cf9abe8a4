// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The string method boundary: errors, results, and argument helpers for
//! [`Factory::invoke`](crate::factory::Factory::invoke).

use alloc::string::{String, ToString};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;

/// Failures of a string method call. A failed call changes nothing.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CallError {
    /// Names starting with `_` are private to the widget.
    #[error("`{0}` is internal and cannot be called")]
    Internal(String),
    /// The widget has no method of this name.
    #[error("no method `{0}`")]
    UnknownMethod(String),
    /// The method exists but the arguments do not fit it.
    #[error("bad arguments for `{method}`: {reason}")]
    BadArguments {
        /// Method name.
        method: String,
        /// What was wrong.
        reason: String,
    },
    /// An option key is unknown or its value has the wrong shape.
    #[error("bad option `{key}`: {reason}")]
    BadOption {
        /// Option key.
        key: String,
        /// What was wrong.
        reason: String,
    },
    /// A result could not be converted to JSON.
    #[error("cannot encode result: {0}")]
    Encode(String),
}

impl CallError {
    /// Shorthand for [`CallError::BadArguments`].
    pub fn bad_args(method: &str, reason: impl Into<String>) -> Self {
        Self::BadArguments {
            method: method.into(),
            reason: reason.into(),
        }
    }
}

/// What a successful string call produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Invoked {
    /// A command ran on this many instances.
    Applied(usize),
    /// A read from the first element; `None` if it has no instance.
    Read(Option<Value>),
}

/// Parse one option assignment from its string key and JSON value.
///
/// Option enums are adjacently tagged as `{"key": .., "value": ..}`.
pub fn parse_option<O: DeserializeOwned>(key: &str, value: &Value) -> Result<O, CallError> {
    serde_json::from_value(json!({ "key": key, "value": value })).map_err(|e| {
        CallError::BadOption {
            key: key.into(),
            reason: e.to_string(),
        }
    })
}

/// Parse an option key.
pub fn parse_option_key<K: DeserializeOwned>(key: &str) -> Result<K, CallError> {
    serde_json::from_value(Value::String(key.into())).map_err(|e| CallError::BadOption {
        key: key.into(),
        reason: e.to_string(),
    })
}

/// The JSON value carried by an adjacently tagged option.
pub fn option_value<O: Serialize>(opt: &O) -> Result<Value, CallError> {
    match serde_json::to_value(opt) {
        Ok(Value::Object(mut map)) => Ok(map.remove("value").unwrap_or(Value::Null)),
        Ok(other) => Ok(other),
        Err(e) => Err(CallError::Encode(e.to_string())),
    }
}

/// Encode any answer as JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<Value, CallError> {
    serde_json::to_value(value).map_err(|e| CallError::Encode(e.to_string()))
}

/// Read argument `i` as a number.
pub fn arg_f64(method: &str, args: &[Value], i: usize) -> Result<f64, CallError> {
    args.get(i)
        .and_then(Value::as_f64)
        .ok_or_else(|| CallError::bad_args(method, alloc::format!("argument {i} must be a number")))
}

/// Read argument `i` as a non-negative index.
pub fn arg_index(method: &str, args: &[Value], i: usize) -> Result<usize, CallError> {
    args.get(i)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| CallError::bad_args(method, alloc::format!("argument {i} must be an index")))
}

/// Read optional argument `i` as a boolean; missing or `null` gives `default`.
pub fn arg_bool_or(
    method: &str,
    args: &[Value],
    i: usize,
    default: bool,
) -> Result<bool, CallError> {
    match args.get(i) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(CallError::bad_args(
            method,
            alloc::format!("argument {i} must be a boolean"),
        )),
    }
}
