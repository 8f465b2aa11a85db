use super::outcome::Status;

/// Static table of a provider's status tokens.
///
/// Lookup is exact and case-sensitive. A token listed in more than one set
/// resolves in the order success, failure, in-progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderVocabulary {
    pub success_tokens: &'static [&'static str],
    pub failure_tokens: &'static [&'static str],
    pub in_progress_tokens: &'static [&'static str],
}

/// Runway task statuses.
pub const RUNWAY_VOCABULARY: ProviderVocabulary = ProviderVocabulary {
    success_tokens: &["SUCCEEDED"],
    failure_tokens: &["FAILED"],
    in_progress_tokens: &["PENDING", "RUNNING"],
};

/// D-ID talk statuses.
pub const DID_VOCABULARY: ProviderVocabulary = ProviderVocabulary {
    success_tokens: &["done"],
    failure_tokens: &["error", "rejected"],
    in_progress_tokens: &["created", "started", "pending"],
};

/// Map a raw status token to a [`Status`]. A missing token is `Unknown`.
pub fn classify(token: Option<&str>, vocabulary: &ProviderVocabulary) -> Status {
    let Some(token) = token else {
        return Status::Unknown;
    };

    if vocabulary.success_tokens.contains(&token) {
        Status::Succeeded
    } else if vocabulary.failure_tokens.contains(&token) {
        Status::Failed
    } else if vocabulary.in_progress_tokens.contains(&token) {
        Status::InProgress
    } else {
        Status::Unknown
    }
}
