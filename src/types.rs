//! Common types used throughout stackoverflow-tags
//!
//! Wire shapes of the `/tags` endpoint and small shared enums.

use serde::{Deserialize, Serialize};

// ============================================================================
// Tag Records
// ============================================================================

/// One tag as returned by the `/tags` endpoint
///
/// Field order matches the column order of the CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Whether the tag has synonyms
    pub has_synonyms: bool,
    /// Whether only moderators may apply the tag
    pub is_moderator_only: bool,
    /// Whether the tag is required on the site
    pub is_required: bool,
    /// Number of questions carrying the tag
    pub count: u64,
    /// Tag name, e.g. `rust`
    pub name: String,
}

impl Tag {
    /// Create a plain tag with all flags cleared
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            has_synonyms: false,
            is_moderator_only: false,
            is_required: false,
            count,
            name: name.into(),
        }
    }
}

/// Response envelope for one page of tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPage {
    /// Tags on this page, in server order
    pub items: Vec<Tag>,
    /// Whether another page follows
    pub has_more: bool,
    /// Daily request quota
    #[serde(default)]
    pub quota_max: u64,
    /// Requests left in the daily quota
    #[serde(default)]
    pub quota_remaining: u64,
}

impl TagPage {
    /// Create a page without quota information
    pub fn new(items: Vec<Tag>, has_more: bool) -> Self {
        Self {
            items,
            has_more,
            quota_max: 0,
            quota_remaining: 0,
        }
    }

    /// Create the final page of a listing
    pub fn last(items: Vec<Tag>) -> Self {
        Self::new(items, false)
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
