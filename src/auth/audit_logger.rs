// Security event logging

use tracing::{debug, error};

use crate::auth::api_token::TokenFingerprint;
use crate::metrics::Metrics;

/// Authorization gate outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    Admitted,
    Rejected { reason: &'static str },
}

/// Logs gate decisions and counts rejections
pub struct AuditLogger {
    metrics: std::sync::Arc<Metrics>,
}

impl AuditLogger {
    pub fn new(metrics: std::sync::Arc<Metrics>) -> Self {
        Self { metrics }
    }

    /// Log an authorization event for `path`
    ///
    /// Rejections are logged at error level with the request path and, when
    /// a token was presented, its fingerprint.
    pub fn log_auth_event(&self, event: &AuthEvent, path: &str, token: Option<&TokenFingerprint>) {
        match event {
            AuthEvent::Admitted => {
                debug!(path = %path, "Request authorized");
            }
            AuthEvent::Rejected { reason } => {
                self.metrics.auth_rejections.inc();
                error!(
                    path = %path,
                    reason = %reason,
                    token_fingerprint = ?token.map(TokenFingerprint::as_str),
                    "Unauthorized request to path: {}",
                    path
                );
            }
        }
    }
}
