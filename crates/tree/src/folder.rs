use indexmap::IndexMap;
use std::cmp::Ordering;

use crate::cmp::ordinal_ignore_case;

/// Node in the merged navigation tree.
///
/// A folder exclusively owns its child folders and its leaf items; the
/// structure is a finite tree and every node is reachable from the root by a
/// unique path of segment names. Child names are unique among siblings and
/// keep insertion order until the tree is sorted.
#[derive(Debug, Clone)]
pub struct Folder<T> {
    name: String,
    folders: IndexMap<String, Folder<T>>,
    items: Vec<T>,
}

impl<T> Folder<T> {
    /// Root folder; its name never appears in the serialized output.
    pub fn root() -> Self {
        Self::new(String::new())
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folders: IndexMap::new(),
            items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folders(&self) -> impl Iterator<Item = &Folder<T>> {
        self.folders.values()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.items.is_empty()
    }

    /// Leaf count over the whole subtree.
    pub fn item_count(&self) -> usize {
        self.items.len() + self.folders.values().map(Folder::item_count).sum::<usize>()
    }

    /// Finds or creates the child chain named by `segments` and returns the
    /// innermost folder. An empty iterator returns `self`.
    pub fn ensure_folder<I, S>(&mut self, segments: I) -> &mut Folder<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut node = self;
        for segment in segments {
            let segment = segment.into();
            node = node
                .folders
                .entry(segment.clone())
                .or_insert_with(|| Folder::new(segment));
        }
        node
    }

    pub fn find_folder(&self, name: &str) -> Option<&Folder<T>> {
        self.folders.get(name)
    }

    pub fn add_item(&mut self, item: T) {
        self.items.push(item);
    }

    /// Sorts child folders by segment name at every level, ordinal
    /// case-insensitive. Idempotent.
    pub fn sort_folders(&mut self) {
        self.folders
            .sort_by(|ka, _, kb, _| ordinal_ignore_case(ka, kb));
        for folder in self.folders.values_mut() {
            folder.sort_folders();
        }
    }

    /// Sorts leaf items at every level with a caller-supplied comparison.
    /// Used by the flattened explorer mode, keyed on assembly display name.
    pub fn sort_items_by<F>(&mut self, cmp: &F)
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.items.sort_by(|a, b| cmp(a, b));
        for folder in self.folders.values_mut() {
            folder.sort_items_by(cmp);
        }
    }
}

impl<T> Default for Folder<T> {
    fn default() -> Self {
        Self::root()
    }
}
