//! Article Nodes
//!
//! A node is one article in one language edition. Identity is the
//! lower-cased `lang:title` key, so differently-cased rediscoveries of the
//! same article collapse onto a single visited-map entry.

use std::fmt;

/// One article in the search graph.
#[derive(Debug, Clone)]
pub struct WikiNode {
    /// Server-canonical page title.
    pub title: String,
    /// Language edition code (member of the supported set).
    pub lang: String,
    /// Heuristic priority, frozen at enqueue time (lower is better).
    /// Meaningful only while the node sits in a frontier.
    pub priority: i32,
}

impl WikiNode {
    pub fn new(title: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lang: lang.into(),
            priority: 0,
        }
    }

    /// Sets the frontier priority for this node
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Identity key: lower-cased `lang:title`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.lang, self.title).to_lowercase()
    }

    /// Display form `lang:title`, casing preserved.
    pub fn full_name(&self) -> String {
        format!("{}:{}", self.lang, self.title)
    }
}

impl fmt::Display for WikiNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lang, self.title)
    }
}

/// Two nodes are equal iff their identity keys are equal; priority is
/// transient frontier state and does not participate.
impl PartialEq for WikiNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for WikiNode {}

/// Which half of the bidirectional search a frontier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follows outgoing links (pages the article links to).
    Forward,
    /// Follows incoming links (pages that link to the article).
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_lowercased() {
        let node = WikiNode::new("Arch Linux", "EN");
        assert_eq!(node.key(), "en:arch linux");
    }

    #[test]
    fn test_equality_ignores_priority_and_case() {
        let a = WikiNode::new("Кошка", "ru").with_priority(10);
        let b = WikiNode::new("кошка", "ru").with_priority(99);
        assert_eq!(a, b);

        let c = WikiNode::new("Кошка", "uk");
        assert_ne!(a, c);
    }

    #[test]
    fn test_full_name_keeps_case() {
        let node = WikiNode::new("Arch Linux", "en");
        assert_eq!(node.full_name(), "en:Arch Linux");
        assert_eq!(node.to_string(), "en:Arch Linux");
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Forward.to_string(), "forward");
        assert_eq!(Direction::Backward.to_string(), "backward");
    }
}
