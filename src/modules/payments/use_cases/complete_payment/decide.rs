use crate::modules::payments::core::assignment::CompletionOutcome;
use crate::modules::payments::use_cases::complete_payment::decision::{DecideError, Decision};

/// Admins hear about a finished day only from the call that completed its last
/// record. Repeats and earlier completions stay silent.
pub fn decide_completion(outcome: CompletionOutcome) -> Decision {
    match outcome {
        CompletionOutcome::NotAssigned => Decision::Rejected {
            reason: DecideError::NotAssigned,
        },
        CompletionOutcome::Completed {
            payment_date,
            transitioned,
            progress,
        } => Decision::Accepted {
            payment_date,
            progress,
            notify_admins: transitioned && progress.is_finished(),
        },
    }
}
