//! Standard and trigger-scenario value objects

use serde::{Deserialize, Serialize};

/// Identifier of the regulatory standard under enhancement (Value Object)
///
/// Standards are addressed by their published number, e.g. `"10"` for
/// FAS 10 (Istisna'a) or `"28"` for FAS 28 (Murabaha).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandardId(String);

impl StandardId {
    /// Create a new standard identifier
    ///
    /// # Panics
    /// Panics if the identifier is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.trim().is_empty(), "Standard id cannot be empty");
        Self(id)
    }

    /// Try to create a standard identifier, returning None if invalid
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() { None } else { Some(Self(id)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StandardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StandardId {
    fn from(s: &str) -> Self {
        StandardId::new(s)
    }
}

impl From<String> for StandardId {
    fn from(s: String) -> Self {
        StandardId::new(s)
    }
}

/// The natural-language situation motivating a proposed change (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerScenario {
    content: String,
}

impl TriggerScenario {
    /// Create a new trigger scenario
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(
            !content.trim().is_empty(),
            "Trigger scenario cannot be empty"
        );
        Self { content }
    }

    /// Try to create a trigger scenario, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for TriggerScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for TriggerScenario {
    fn from(s: &str) -> Self {
        TriggerScenario::new(s)
    }
}

impl From<String> for TriggerScenario {
    fn from(s: String) -> Self {
        TriggerScenario::new(s)
    }
}
