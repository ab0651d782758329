//! Problem vocabularies: status, difficulty, and platform.
//!
//! Values are persisted as their display strings (`"Revision Pending"`,
//! `"LeetCode"`, ...) so they round-trip unchanged through the API.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Progress state of a Problem. Only [`ProblemStatus::Solved`] counts as
/// solved for the dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProblemStatus {
    #[default]
    Unsolved,
    Solved,
    #[serde(rename = "Revision Pending")]
    RevisionPending,
    #[serde(rename = "Needs Review")]
    NeedsReview,
}

impl ProblemStatus {
    pub const ALL: [ProblemStatus; 4] = [
        ProblemStatus::Unsolved,
        ProblemStatus::Solved,
        ProblemStatus::RevisionPending,
        ProblemStatus::NeedsReview,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProblemStatus::Unsolved => "Unsolved",
            ProblemStatus::Solved => "Solved",
            ProblemStatus::RevisionPending => "Revision Pending",
            ProblemStatus::NeedsReview => "Needs Review",
        }
    }

    /// Parse a stored or submitted status string.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| invalid("status", value, &Self::ALL.map(Self::as_str)))
    }

    pub fn is_solved(self) -> bool {
        self == ProblemStatus::Solved
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == value)
            .ok_or_else(|| invalid("difficulty", value, &Self::ALL.map(Self::as_str)))
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Judge platforms a Problem can link to. An empty string means "unspecified".
pub const VALID_PLATFORMS: &[&str] = &["LeetCode", "CodeStudio", "GFG", "CSES", "Custom"];

/// Validate a platform name. The empty string is accepted.
pub fn validate_platform(platform: &str) -> Result<(), CoreError> {
    if platform.is_empty() || VALID_PLATFORMS.contains(&platform) {
        Ok(())
    } else {
        Err(invalid("platform", platform, VALID_PLATFORMS))
    }
}

fn invalid(field: &str, value: &str, allowed: &[&str]) -> CoreError {
    CoreError::Validation(format!(
        "Invalid {field} '{value}'. Must be one of: {}",
        allowed.join(", ")
    ))
}
