//! Unified error type for the Belfry engine.

use belfry_rules::RulesError;
use belfry_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `belfry` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum BelfryError {
    /// A rules-engine error (bad roster, illegal action).
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// A session-level error (unknown code, routing, actor gone).
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use belfry_protocol::PlayerId;

    #[test]
    fn test_from_rules_error() {
        let err = RulesError::UnsupportedRosterSize(3);
        let belfry_err: BelfryError = err.into();
        assert!(matches!(belfry_err, BelfryError::Rules(_)));
        assert!(belfry_err.to_string().contains('3'));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::NotInSession(PlayerId(7));
        let belfry_err: BelfryError = err.into();
        assert!(matches!(belfry_err, BelfryError::Session(_)));
    }
}
