/// Folder scope handle
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, permission-scoped reference to a directory tree
///
/// The string form is `volume:subpath` (e.g. `primary:Music/Albums`), the
/// shape the host's tree-picker hands back. The reference round-trips through
/// [`FolderRef::as_str`] so it can be persisted as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderRef(String);

impl FolderRef {
    /// Create a folder reference from its string identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The subpath after the volume separator, empty for a volume root
    ///
    /// `primary:Music/Albums` → `Music/Albums`; an identifier without a colon
    /// is treated as all-subpath.
    pub fn subpath(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, sub)) => sub,
            None => &self.0,
        }
    }
}

impl fmt::Display for FolderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FolderRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for FolderRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subpath_strips_volume() {
        assert_eq!(FolderRef::new("primary:Music").subpath(), "Music");
        assert_eq!(
            FolderRef::new("0000-0000:Podcasts/Tech").subpath(),
            "Podcasts/Tech"
        );
    }

    #[test]
    fn subpath_without_volume_is_whole_string() {
        assert_eq!(FolderRef::new("Music").subpath(), "Music");
    }

    #[test]
    fn string_round_trip() {
        let folder = FolderRef::new("primary:Music");
        assert_eq!(FolderRef::from(folder.as_str()), folder);
    }
}
