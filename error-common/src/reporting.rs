// Error reporting at the user-facing boundary

use crate::types::PlantGuardError;

/// Logs errors with their code and returns what the user should see
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report(&self, context: &str, error: &PlantGuardError) -> String {
        if error.is_retryable() {
            tracing::warn!(
                context = context,
                error_code = error.code(),
                error_type = error.error_type(),
                "{}",
                error
            );
        } else {
            tracing::error!(
                context = context,
                error_code = error.code(),
                error_type = error.error_type(),
                "{}",
                error
            );
        }
        error.user_message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_returns_user_message() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let reporter = ErrorReporter::new();
        let message = reporter.report(
            "login",
            &PlantGuardError::NetworkUnavailable("operation timed out".into()),
        );
        assert!(message.contains("Could not reach the server"));
    }
}
