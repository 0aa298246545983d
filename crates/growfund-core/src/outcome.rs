//! Tri-state result threaded from repository operations to the
//! presentation layer.

use std::fmt;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A repository operation is either still in flight, finished with a
/// value, or finished with a user-facing message.
pub enum Outcome<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Outcome<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Outcome::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Outcome::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Loading => Outcome::Loading,
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Error(message) => Outcome::Error(message),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Loading => "Loading",
            Outcome::Success(_) => "Success",
            Outcome::Error(_) => "Error",
        }
    }
}

impl<T> From<Result<T, CoreError>> for Outcome<T> {
    fn from(result: Result<T, CoreError>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Error(err.to_string()),
        }
    }
}

impl<T> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Error(message) => write!(f, "Error: {}", message),
            other => f.write_str(other.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_results_into_outcomes() {
        let ok: Outcome<u32> = Ok::<_, CoreError>(7).into();
        assert_eq!(ok, Outcome::Success(7));

        let err: Outcome<u32> = Err(CoreError::Validation("amount must be positive".into())).into();
        assert_eq!(
            err.error_message(),
            Some("Validation failed: amount must be positive")
        );
    }

    #[test]
    fn map_preserves_loading_and_error() {
        let loading: Outcome<u32> = Outcome::Loading;
        assert!(loading.map(|v| v + 1).is_loading());

        let failed: Outcome<u32> = Outcome::Error("boom".into());
        assert_eq!(failed.map(|v| v + 1), Outcome::Error("boom".into()));
    }
}
