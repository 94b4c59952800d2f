//! Interpretation rules over a computed chart.
//!
//! A rule is a named conjunction of typed conditions plus the text to show
//! when all of them hold. Rule files are JSON arrays:
//!
//! ```json
//! [
//!   {
//!     "name": "metal-heavy",
//!     "conditions": [
//!       { "type": "element_at_least", "element": "금", "count": 3 },
//!       { "type": "has_branch", "branch": "오" }
//!     ],
//!     "interpretation": "..."
//!   }
//! ]
//! ```

use std::path::Path;

use saju_base::{Branch, Element, Stem};
use serde::{Deserialize, Serialize};

use crate::chart::{Chart, PillarPosition};
use crate::error::ChartError;

/// One test against a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Any pillar carries `stem`.
    HasStem { stem: Stem },
    /// Any pillar carries `branch`.
    HasBranch { branch: Branch },
    /// `stem` appears more than `threshold` times.
    StemCountGreaterThan { stem: Stem, threshold: usize },
    /// `branch` appears more than `threshold` times.
    BranchCountGreaterThan { branch: Branch, threshold: usize },
    /// The pillar at `position` matches every part given.
    PillarEquals {
        position: PillarPosition,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stem: Option<Stem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        branch: Option<Branch>,
    },
    ElementAtLeast { element: Element, count: u8 },
    DominantElement { element: Element },
    /// At least one nested condition holds.
    AnyOf { conditions: Vec<Condition> },
}

impl Condition {
    pub fn evaluate(&self, chart: &Chart) -> bool {
        let pillars = &chart.pillars;
        match self {
            Self::HasStem { stem } => pillars.stem_count(*stem) > 0,
            Self::HasBranch { branch } => pillars.branch_count(*branch) > 0,
            Self::StemCountGreaterThan { stem, threshold } => {
                pillars.stem_count(*stem) > *threshold
            }
            Self::BranchCountGreaterThan { branch, threshold } => {
                pillars.branch_count(*branch) > *threshold
            }
            Self::PillarEquals {
                position,
                stem,
                branch,
            } => {
                let pillar = pillars.get(*position);
                stem.is_none_or(|s| pillar.stem == s) && branch.is_none_or(|b| pillar.branch == b)
            }
            Self::ElementAtLeast { element, count } => chart.elements.get(*element) >= *count,
            Self::DominantElement { element } => chart.dominant_element() == *element,
            Self::AnyOf { conditions } => conditions.iter().any(|c| c.evaluate(chart)),
        }
    }
}

/// A named set of conditions, all of which must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub interpretation: String,
}

impl Rule {
    /// True when every condition holds. A rule without conditions always
    /// matches.
    pub fn matches(&self, chart: &Chart) -> bool {
        self.conditions.iter().all(|c| c.evaluate(chart))
    }
}

/// An ordered list of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn from_json_str(content: &str) -> Result<Self, ChartError> {
        serde_json::from_str(content).map_err(|e| ChartError::RuleParse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ChartError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChartError::RuleParse(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules matching `chart`, in file order.
    pub fn matching<'a>(&'a self, chart: &'a Chart) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |r| r.matches(chart))
    }
}
