//! Robots.txt policy backed by the robotstxt crate

use robotstxt::DefaultMatcher;

/// Robots.txt rules for one origin
///
/// Wraps the raw robots.txt body and evaluates it on demand with
/// robotstxt's Google-compatible matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsPolicy {
    content: String,
    allow_all: bool,
}

impl RobotsPolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive policy
    ///
    /// Used whenever robots.txt cannot be retrieved: access fails open.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Returns true if this policy was created by [`RobotsPolicy::allow_all`]
    pub fn is_allow_all(&self) -> bool {
        self.allow_all
    }

    /// Checks if `url` may be fetched by `user_agent`
    ///
    /// `url` may be absolute; the matcher only looks at its path and query.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}
