//! Notification collaborator: delivers finished-match summaries to team
//! representatives. Delivery is best effort; failures are logged and swallowed,
//! never surfaced as a simulation failure.

use crate::commentary::MatchSummary;

#[derive(Clone, Debug)]
pub struct NotifyError(pub String);

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification failed: {}", self.0)
    }
}

impl std::error::Error for NotifyError {}

pub trait Notifier {
    /// Deliver a result summary to the given representative addresses.
    fn match_finished(&self, recipients: &[String], summary: &MatchSummary)
        -> Result<(), NotifyError>;
}

/// Default collaborator: logs instead of sending mail.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn match_finished(
        &self,
        recipients: &[String],
        summary: &MatchSummary,
    ) -> Result<(), NotifyError> {
        log::info!(
            "match result {} {} - {} {} -> notified {}",
            summary.home,
            summary.home_goals,
            summary.away_goals,
            summary.away,
            recipients.join(", ")
        );
        Ok(())
    }
}
