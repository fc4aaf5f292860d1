//! Evaluation period and document kind tags.

use super::{ParseDocumentKindError, ParsePeriodError, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the yearly evaluation cycle a task instance represents.
///
/// Fixed at task creation; a form owns at most one task per period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Definition/draft phase at the start of the cycle.
    Draft,
    /// Single evaluation phase (documents with one evaluation).
    Evaluation,
    /// First of two evaluation phases.
    EvaluationFirst,
    /// Second of two evaluation phases.
    EvaluationSecond,
}

impl Period {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Evaluation => "evaluation",
            Self::EvaluationFirst => "evaluation_1st",
            Self::EvaluationSecond => "evaluation_2nd",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Period {
    type Error = ParsePeriodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "evaluation" => Ok(Self::Evaluation),
            "evaluation_1st" => Ok(Self::EvaluationFirst),
            "evaluation_2nd" => Ok(Self::EvaluationSecond),
            _ => Err(ParsePeriodError(value.to_owned())),
        }
    }
}

/// Kind of performance document a form (and its tasks) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// KPI bonus definition/evaluation document.
    Kpi,
    /// Merit competency and culture evaluation document.
    Merit,
}

impl DocumentKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kpi => "kpi",
            Self::Merit => "merit",
        }
    }

    /// Creation policy: the status a freshly created task starts in.
    ///
    /// KPI tasks open directly in draft; Merit tasks wait for the owner to
    /// begin the self-evaluation.
    #[must_use]
    pub const fn initial_status(self) -> TaskStatus {
        match self {
            Self::Kpi => TaskStatus::InDraft,
            Self::Merit => TaskStatus::NotStarted,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for DocumentKind {
    type Error = ParseDocumentKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "kpi" => Ok(Self::Kpi),
            "merit" => Ok(Self::Merit),
            _ => Err(ParseDocumentKindError(value.to_owned())),
        }
    }
}
