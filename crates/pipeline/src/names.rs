use std::collections::HashMap;
use std::path::Path;

/// Case-insensitive string set that remembers the first-seen spelling.
///
/// Backs the global assembly universe and the processed-assembly set, where
/// `Common` and `common` are the same compiled unit but the first spelling
/// is the one shown and written to disk.
#[derive(Debug, Default, Clone)]
pub struct NameSet {
    entries: HashMap<String, String>,
    order: Vec<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a name; returns `false` when an equivalent name was already
    /// present (duplicates collapse silently).
    pub fn insert(&mut self, name: &str) -> bool {
        let key = name.to_lowercase();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.entries.insert(key, name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// First-seen spellings, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(move |key| self.entries[key].as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = NameSet::new();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

/// Project file names to skip.
///
/// The single gate applied identically at indexing and generation time: an
/// excluded project never reaches the universe, the generator, or the
/// merged explorer, even when reached transitively through a solution.
#[derive(Debug, Default, Clone)]
pub struct ExclusionSet {
    names: NameSet,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.names.insert(name);
        }
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// True when the file name (last path segment) of `path` was added.
    pub fn contains_path(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.names.contains(name))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ExclusionSet, NameSet};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn collapses_case_insensitive_duplicates() {
        let mut set = NameSet::new();
        assert!(set.insert("Common"));
        assert!(!set.insert("COMMON"));
        assert!(!set.insert("common"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("cOmMoN"));
    }

    #[test]
    fn keeps_first_spelling_in_insertion_order() {
        let mut set = NameSet::new();
        set.insert("Zeta");
        set.insert("Alpha");
        set.insert("ALPHA");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn exclusion_matches_file_name_only() {
        let mut excluded = ExclusionSet::new();
        excluded.add("Skipped.csproj");

        assert!(excluded.contains_path(Path::new("/repo/src/Skipped.csproj")));
        assert!(excluded.contains_path(Path::new("other/SKIPPED.CSPROJ")));
        assert!(!excluded.contains_path(Path::new("/repo/Skipped/Kept.csproj")));
        assert!(!excluded.contains_name("Kept.csproj"));
    }

    #[test]
    fn exclusion_ignores_blank_names() {
        let mut excluded = ExclusionSet::new();
        excluded.add("   ");
        excluded.add("");
        assert!(excluded.is_empty());
    }
}
