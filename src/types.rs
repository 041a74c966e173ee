//! Domain types shared by the classifier and the lookup client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag distinguishing the mutually-independent result variants.
///
/// The ordering is the publication order: temporal sign-in link first, then
/// recovery link, then sign-in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResultTag {
    TemporalSignInLink,
    RecoveryLink,
    SignInCode,
}

/// One classified result variant extracted from a capture-service response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupResult {
    SignInCode {
        code: String,
        observed_at: DateTime<Utc>,
    },
    RecoveryLink {
        url: String,
        observed_at: DateTime<Utc>,
    },
    TemporalSignInLink {
        url: String,
        observed_at: DateTime<Utc>,
    },
}

impl LookupResult {
    #[must_use]
    pub fn tag(&self) -> ResultTag {
        match self {
            Self::SignInCode { .. } => ResultTag::SignInCode,
            Self::RecoveryLink { .. } => ResultTag::RecoveryLink,
            Self::TemporalSignInLink { .. } => ResultTag::TemporalSignInLink,
        }
    }

    /// When the service observed this artifact.
    #[must_use]
    pub fn observed_at(&self) -> DateTime<Utc> {
        match self {
            Self::SignInCode { observed_at, .. }
            | Self::RecoveryLink { observed_at, .. }
            | Self::TemporalSignInLink { observed_at, .. } => *observed_at,
        }
    }
}

/// The classified set of zero-or-more result variants, at most one per tag.
///
/// An empty bundle is never a valid success; the lookup client treats it as a
/// retryable failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBundle {
    entries: BTreeMap<ResultTag, LookupResult>,
}

impl ResultBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variant, replacing any previous entry with the same tag.
    pub fn insert(&mut self, result: LookupResult) -> Option<LookupResult> {
        self.entries.insert(result.tag(), result)
    }

    #[must_use]
    pub fn get(&self, tag: ResultTag) -> Option<&LookupResult> {
        self.entries.get(&tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Variants in publication order (temporal link, recovery link, code).
    pub fn iter(&self) -> impl Iterator<Item = &LookupResult> {
        self.entries.values()
    }
}

impl FromIterator<LookupResult> for ResultBundle {
    fn from_iter<I: IntoIterator<Item = LookupResult>>(iter: I) -> Self {
        let mut bundle = Self::new();
        for result in iter {
            bundle.insert(result);
        }
        bundle
    }
}

/// The externally observable projection of lookup progress.
///
/// Written only by the lookup client; presentation layers read transitions via
/// [`crate::Client::subscribe`] and own all visual representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayState {
    #[default]
    Idle,
    /// A submission is running; `attempt` is 1-based.
    InFlight { attempt: u32 },
    Found(ResultBundle),
    NotFound { email: String, detail: String },
}
