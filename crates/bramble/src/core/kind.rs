use std::{any::type_name, fmt};

use convert_case::{Case, Casing};

/// The widget kind attached to a node, used in dumps and traces.
///
/// Kinds are lowercase snake-case identifiers. Anything else is munged into that
/// form rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKind {
    /// Normalized kind string.
    kind: String,
}

impl NodeKind {
    /// Normalize an arbitrary string into a kind.
    pub fn convert(raw: &str) -> Self {
        let snake = raw.to_case(Case::Snake);
        let kind: String = snake
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
            .collect();
        if kind.is_empty() {
            return Self {
                kind: "node".into(),
            };
        }
        Self { kind }
    }

    /// Derive a kind from the last path segment of a Rust type name.
    pub fn of<T: ?Sized>() -> Self {
        let name = type_name::<T>();
        let base = name.split('<').next().unwrap_or(name);
        let short = base.rsplit("::").next().unwrap_or(base);
        Self::convert(short)
    }

    /// The kind as a string slice.
    pub fn as_str(&self) -> &str {
        &self.kind
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)
    }
}

impl PartialEq<&str> for NodeKind {
    fn eq(&self, other: &&str) -> bool {
        self.kind == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScrollPanel;
    struct Wrapper<T>(T);

    #[test]
    fn convert() {
        assert_eq!(NodeKind::convert("FooBar"), "foo_bar");
        assert_eq!(NodeKind::convert("Foo Bar-Baz"), "foo_bar_baz");
        assert_eq!(NodeKind::convert("!!!"), "node");
        assert_eq!(NodeKind::convert(""), "node");
    }

    #[test]
    fn from_type() {
        assert_eq!(NodeKind::of::<ScrollPanel>(), "scroll_panel");
        assert_eq!(NodeKind::of::<Wrapper<ScrollPanel>>(), "wrapper");
    }
}
