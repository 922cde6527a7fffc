//! Canonical structural paths.
//!
//! Every visited value gets a collision-resistant path from the root
//! sentinel `$`: `/` plus the escaped key for a mapping child, `/[i]` for a
//! sequence child. The reserved characters `%`, `/`, `[`, `]`, and `~` are
//! percent-encoded inside keys, so two distinct structural positions can
//! never produce the same encoded path. `~` is additionally reserved for the
//! duplicate-key disambiguation suffix applied by the assembler.

use serde::{Deserialize, Serialize};

/// Path of the root value.
pub const ROOT: &str = "$";

/// Canonical structural path of one value, unique per node within a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreePath(String);

impl TreePath {
    /// The root path, `$`.
    pub fn root() -> Self {
        TreePath(ROOT.to_owned())
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }

    /// Path of a mapping child under this path. The key is escaped.
    pub fn child_key(&self, key: &str) -> Self {
        TreePath(format!("{}/{}", self.0, escape_segment(key)))
    }

    /// Path of a sequence child under this path.
    pub fn child_index(&self, index: usize) -> Self {
        TreePath(format!("{}/[{}]", self.0, index))
    }

    /// Decoded final segment, for display labels.
    ///
    /// Only the last segment is recovered; full path decoding is not needed
    /// anywhere in the engine.
    pub fn last_segment(&self) -> String {
        match self.0.rfind('/') {
            Some(pos) => unescape_segment(&self.0[pos + 1..]),
            None => self.0.clone(),
        }
    }

    /// The encoded path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a duplicate-key disambiguation suffix.
    ///
    /// `~` never appears unescaped in a key-derived segment, so a suffixed
    /// path cannot collide with one produced from input data.
    pub(crate) fn with_suffix(&self, n: usize) -> Self {
        TreePath(format!("{}~{}", self.0, n))
    }
}

impl std::fmt::Display for TreePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percent-encode the reserved characters within a mapping key.
pub fn escape_segment(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '[' => out.push_str("%5B"),
            ']' => out.push_str("%5D"),
            '~' => out.push_str("%7E"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decode a segment produced by [`escape_segment`].
///
/// Unrecognized `%` runs are passed through unchanged, so decoding is total.
pub fn unescape_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let decoded = match tail.get(..3) {
            Some("%25") => Some('%'),
            Some("%2F") => Some('/'),
            Some("%5B") => Some('['),
            Some("%5D") => Some(']'),
            Some("%7E") => Some('~'),
            _ => None,
        };
        match decoded {
            Some(ch) => {
                out.push(ch);
                rest = &tail[3..];
            }
            None => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path() {
        let root = TreePath::root();
        assert!(root.is_root());
        assert_eq!(root.as_str(), "$");
        assert_eq!(root.last_segment(), "$");
    }

    #[test]
    fn mapping_and_sequence_children() {
        let root = TreePath::root();
        assert_eq!(root.child_key("users").as_str(), "$/users");
        assert_eq!(root.child_key("users").child_index(3).as_str(), "$/users/[3]");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(escape_segment("x/y"), "x%2Fy");
        assert_eq!(escape_segment("[0]"), "%5B0%5D");
        assert_eq!(escape_segment("50%"), "50%25");
        assert_eq!(escape_segment("a~b"), "a%7Eb");
        assert_eq!(escape_segment("plain key"), "plain key");
    }

    #[test]
    fn escape_round_trips_through_unescape() {
        for key in ["x/y", "[0]", "50%", "a~b", "%2F", "a/b[c]/d~%", "päth/ünïcode"] {
            assert_eq!(unescape_segment(&escape_segment(key)), key);
        }
    }

    #[test]
    fn adversarial_keys_cannot_collide_with_structure() {
        let root = TreePath::root();
        // A key that *looks like* a nested path must not encode like one.
        let sneaky = root.child_key("x/y");
        let nested = root.child_key("x").child_key("y");
        assert_ne!(sneaky, nested);

        // A key that looks like a sequence index must not encode like one.
        let fake_index = root.child_key("[0]");
        let real_index = root.child_index(0);
        assert_ne!(fake_index, real_index);

        // A pre-escaped key must not decode into a different key's encoding.
        let literal_escape = root.child_key("x%2Fy");
        assert_ne!(literal_escape, sneaky);
    }

    #[test]
    fn last_segment_decodes_for_display() {
        let path = TreePath::root().child_key("a/b");
        assert_eq!(path.as_str(), "$/a%2Fb");
        assert_eq!(path.last_segment(), "a/b");

        let indexed = TreePath::root().child_index(7);
        assert_eq!(indexed.last_segment(), "[7]");
    }

    #[test]
    fn unescape_passes_unknown_runs_through() {
        assert_eq!(unescape_segment("100%"), "100%");
        assert_eq!(unescape_segment("%zz"), "%zz");
        assert_eq!(unescape_segment("%"), "%");
    }

    #[test]
    fn suffix_extends_the_final_segment() {
        let path = TreePath::root().child_key("a");
        assert_eq!(path.with_suffix(2).as_str(), "$/a~2");
        assert_eq!(path.with_suffix(2).last_segment(), "a~2");
    }
}
