//! Tagged discussion points
//!
//! A [`Point`] is one concern or recommendation raised by an expert,
//! tagged with the domain it came from. Equality is exact wording of the
//! description; no semantic deduplication happens at this level.

use serde::{Deserialize, Serialize};

/// A single concern or recommendation raised during deliberation
///
/// # Example
///
/// ```
/// use ijma_domain::deliberation::Point;
///
/// let point = Point::new("shariah_compliance", "Clause 4/2 permits interest-bearing collateral");
/// assert_eq!(point.domain, "shariah_compliance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Domain that raised the point (e.g. "shariah_compliance", "risk_management")
    pub domain: String,
    /// The point itself, verbatim
    pub description: String,
}

impl Point {
    /// Create a new tagged point
    pub fn new(domain: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            description: description.into(),
        }
    }

    /// Normalized form of the description used as the equality key for
    /// consensus counting (trimmed, original casing preserved)
    pub fn key(&self) -> &str {
        self.description.trim()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.domain, self.description)
    }
}
