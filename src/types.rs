use serde::{Deserialize, Serialize};
use std::fmt;

/// The logged-in user attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Body of `POST /star`. `is_starred` is the state *before* this request;
/// a missing flag reads as not starred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRequest {
    pub name: String,
    #[serde(rename = "isStarred", default)]
    pub is_starred: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarAction {
    Star,
    Unstar,
}

impl StarAction {
    /// The action that flips the caller's current state.
    pub fn toggle(is_starred: bool) -> Self {
        if is_starred {
            StarAction::Unstar
        } else {
            StarAction::Star
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StarAction::Star => "star",
            StarAction::Unstar => "unstar",
        }
    }
}

impl fmt::Display for StarAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a successful toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarResult {
    pub username: String,
    pub package_name: String,
    pub action: StarAction,
}

impl StarResult {
    /// Confirmation sentence, e.g. `fakeuser unstarred request`.
    pub fn message(&self) -> String {
        format!("{} {}red {}", self.username, self.action, self.package_name)
    }
}

impl fmt::Display for StarResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
