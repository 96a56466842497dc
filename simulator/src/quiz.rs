//! CPU buying quiz.
//!
//! Three questions (primary usage, budget, main applications) map to a canned
//! recommendation. Usage picks the title and body; budget appends one sentence.
//! The applications answer is required but does not change the text.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{SimError, SimResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Usage {
    Gaming,
    ContentCreation,
    Programming,
    /// Office work, browsing and anything else.
    Productivity,
}

impl FromStr for Usage {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "gaming" => Ok(Usage::Gaming),
            "content-creation" | "content" => Ok(Usage::ContentCreation),
            "programming" => Ok(Usage::Programming),
            "productivity" | "office" | "other" => Ok(Usage::Productivity),
            other => Err(SimError::UnknownOption {
                kind: "usage",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Budget {
    Low,
    Medium,
    High,
}

impl FromStr for Budget {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Budget::Low),
            "medium" => Ok(Budget::Medium),
            "high" => Ok(Budget::High),
            other => Err(SimError::UnknownOption {
                kind: "budget",
                value: other.to_string(),
            }),
        }
    }
}

/// Answers collected from the three quiz questions. Any may still be unanswered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswers {
    pub usage: Option<Usage>,
    pub budget: Option<Budget>,
    pub applications: Option<String>,
}

/// Recommendation text shown after the quiz.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub icon: &'static str,
    pub title: &'static str,
    pub body: String,
}

/// Builds the recommendation for a complete set of answers.
///
/// # Errors
///
/// [`SimError::IncompleteQuiz`] naming the first unanswered question.
pub fn recommend(answers: &QuizAnswers) -> SimResult<Recommendation> {
    let usage = answers.usage.ok_or(SimError::IncompleteQuiz("usage"))?;
    let budget = answers.budget.ok_or(SimError::IncompleteQuiz("budget"))?;
    match answers.applications.as_deref().map(str::trim) {
        Some(apps) if !apps.is_empty() => {}
        _ => return Err(SimError::IncompleteQuiz("applications")),
    }

    let (icon, title, body) = match usage {
        Usage::Gaming => (
            "🎮",
            "Recommendation: CPU with High Single-Core Performance",
            "For gaming, strong single-core performance matters more than core count. Choose a CPU \
             with a high clock speed and good IPC (Instructions Per Cycle). A CPU with 6-8 cores is \
             usually enough for most games.",
        ),
        Usage::ContentCreation => (
            "🎨",
            "Recommendation: Multi-Core CPU with Many Cores",
            "For creative work such as video editing and 3D rendering, a CPU with many cores performs \
             far better. Look for at least 8 cores, or more if the budget allows.",
        ),
        Usage::Programming => (
            "💻",
            "Recommendation: CPU Balancing Single-Core and Multi-Core",
            "For programming you need a balance: single-core performance for the IDE and development \
             tools, and multi-core performance for compiling code and running multiple services. A CPU \
             with 6-12 cores is a good choice.",
        ),
        Usage::Productivity => (
            "⚖️",
            "Recommendation: Well-Balanced CPU",
            "For general productivity, look for a CPU that balances single-core performance with core \
             count. A CPU with 4-8 cores is usually more than enough for office work and browsing.",
        ),
    };

    let budget_note = match budget {
        Budget::Low => {
            "With a limited budget, consider an entry-level CPU with 4-6 cores for the best value."
        }
        Budget::Medium => {
            "With a medium budget, a mid-range CPU with 6-8 cores offers balanced performance."
        }
        Budget::High => {
            "With a high budget, a high-end CPU with 12+ cores gives maximum performance in every scenario."
        }
    };

    Ok(Recommendation {
        icon,
        title,
        body: format!("{} {}", body, budget_note),
    })
}
