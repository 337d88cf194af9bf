use std::fmt;

use crate::RefError;

/// A validated reference name.
///
/// Names are `/`-separated paths relative to the repository directory:
/// `HEAD`, `MERGE_HEAD`, `refs/heads/<branch>`, `refs/tags/<tag>`,
/// `refs/remote/<name>`. Validation rejects anything that could escape the
/// repository directory or collide with the lock-file protocol:
/// - empty names, empty components, `.` or `..` components
/// - leading or trailing `/`
/// - ASCII control characters, space, and NUL
/// - a trailing `.lock` component
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefName(String);

impl RefName {
    /// Create and validate a ref name.
    pub fn new(name: impl Into<String>) -> Result<Self, RefError> {
        let name = name.into();
        validate_ref_name(&name)?;
        Ok(Self(name))
    }

    /// The `HEAD` ref.
    pub fn head() -> Self {
        Self("HEAD".to_string())
    }

    /// The `MERGE_HEAD` ref.
    pub fn merge_head() -> Self {
        Self("MERGE_HEAD".to_string())
    }

    /// A branch ref: `refs/heads/<name>`.
    pub fn branch(name: &str) -> Result<Self, RefError> {
        Self::new(format!("refs/heads/{name}"))
    }

    /// A tag ref: `refs/tags/<name>`.
    pub fn tag(name: &str) -> Result<Self, RefError> {
        Self::new(format!("refs/tags/{name}"))
    }

    /// A remote-tracking ref: `refs/remote/<name>`.
    pub fn remote_tracking(name: &str) -> Result<Self, RefError> {
        Self::new(format!("refs/remote/{name}"))
    }

    /// Get the short name (e.g. `master` from `refs/heads/master`).
    pub fn short_name(&self) -> &str {
        self.0
            .strip_prefix("refs/heads/")
            .or_else(|| self.0.strip_prefix("refs/tags/"))
            .or_else(|| self.0.strip_prefix("refs/remote/"))
            .unwrap_or(&self.0)
    }

    /// Is this under `refs/heads/`?
    pub fn is_branch(&self) -> bool {
        self.0.starts_with("refs/heads/")
    }

    /// Is this under `refs/tags/`?
    pub fn is_tag(&self) -> bool {
        self.0.starts_with("refs/tags/")
    }

    /// Is this under `refs/remote/`?
    pub fn is_remote_tracking(&self) -> bool {
        self.0.starts_with("refs/remote/")
    }

    /// Get as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a ref name.
fn validate_ref_name(name: &str) -> Result<(), RefError> {
    let invalid = |reason: &'static str| RefError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("empty name"));
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err(invalid("leading or trailing '/'"));
    }
    if name
        .bytes()
        .any(|b| b.is_ascii_control() || b == b' ' || b == 0)
    {
        return Err(invalid("control character or space"));
    }
    for component in name.split('/') {
        if component.is_empty() {
            return Err(invalid("empty path component"));
        }
        if component == "." || component == ".." {
            return Err(invalid("'.' or '..' component"));
        }
        if component.ends_with(".lock") {
            return Err(invalid("component ends with '.lock'"));
        }
    }
    Ok(())
}
