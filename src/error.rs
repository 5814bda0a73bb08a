//! Error kinds surfaced by the imbibe action, plus the log-then-propagate decorator.

use std::fmt::Display;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum ImbibeError {
    /// The name-service lookup produced no owner, or the lookup itself failed.
    #[error("Could not resolve SNS domain: {domain}: {source}")]
    ResolutionFailure {
        domain: String,
        #[source]
        source: BoxError,
    },

    /// Anything else that went wrong while building instructions, metadata or the transaction.
    #[error("Failed to assemble imbibe transaction: {0}")]
    AssemblyFailure(#[source] BoxError),
}

impl ImbibeError {
    pub fn resolution(domain: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ImbibeError::ResolutionFailure {
            domain: domain.into(),
            source: source.into(),
        }
    }

    pub fn assembly(source: impl Into<BoxError>) -> Self {
        ImbibeError::AssemblyFailure(source.into())
    }
}

/// Logs the error side of a `Result` and hands it back untouched.
///
/// Components wrap their boundary in this instead of sprinkling log calls; nothing is
/// recovered here.
pub trait LogOnError {
    fn log_on_error(self, context: &str) -> Self;
}

impl<T, E: Display> LogOnError for Result<T, E> {
    fn log_on_error(self, context: &str) -> Self {
        if let Err(e) = &self {
            tracing::error!(error = %e, "{}", context);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_failure_names_the_domain() {
        let err = ImbibeError::resolution("imbibed.sol", "no owner");
        let msg = err.to_string();
        assert!(msg.contains("imbibed.sol"), "{}", msg);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn log_on_error_passes_result_through() {
        let ok: Result<u8, ImbibeError> = Ok(7);
        assert_eq!(ok.log_on_error("unused").unwrap(), 7);

        let err: Result<u8, ImbibeError> = Err(ImbibeError::assembly("boom"));
        match err.log_on_error("assembling") {
            Err(ImbibeError::AssemblyFailure(source)) => assert_eq!(source.to_string(), "boom"),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }
}
