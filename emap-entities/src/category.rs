use std::fmt;

/// The category tag of an event, e.g. `music` or `art`.
///
/// Tags are compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Category(String);

impl Category {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Category {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for Category {
    fn from(from: &str) -> Self {
        Self(from.to_owned())
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A selectable category as offered to visitors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub tag: Category,
    pub label: String,
}
