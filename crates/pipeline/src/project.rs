use std::path::{Path, PathBuf};

/// Leaf payload of the merged navigation tree: one generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
    /// Project file path; its file name is the display/exclusion key.
    pub file_path: PathBuf,

    /// Compiled unit name; doubles as the on-disk output directory name.
    pub assembly_name: String,
}

impl ProjectRef {
    pub fn new(file_path: impl Into<PathBuf>, assembly_name: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            assembly_name: assembly_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        self.file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("null")
    }
}

/// One compiled unit discovered by the build-graph reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub project_path: PathBuf,
    pub assembly_name: String,

    /// Logical grouping in the merged tree, outermost segment first;
    /// empty for projects passed directly on the command line.
    pub logical_folder: Vec<String>,
}

impl ProjectEntry {
    pub fn new(project_path: impl Into<PathBuf>, assembly_name: impl Into<String>) -> Self {
        Self {
            project_path: project_path.into(),
            assembly_name: assembly_name.into(),
            logical_folder: Vec::new(),
        }
    }

    pub fn in_folder(mut self, segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.logical_folder = segments.into_iter().map(Into::into).collect();
        self
    }

    pub fn project_file_name(&self) -> &str {
        self.project_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("null")
    }

    pub fn as_ref_value(&self) -> ProjectRef {
        ProjectRef::new(&self.project_path, &self.assembly_name)
    }
}

#[cfg(test)]
mod tests {
    use super::{ProjectEntry, ProjectRef};
    use pretty_assertions::assert_eq;

    #[test]
    fn file_name_is_last_segment() {
        let project = ProjectRef::new("/repo/src/Core/Core.csproj", "Core");
        assert_eq!(project.file_name(), "Core.csproj");
    }

    #[test]
    fn entry_builds_its_leaf_value() {
        let entry = ProjectEntry::new("src/App.vbproj", "App").in_folder(["Main.sln"]);
        assert_eq!(entry.logical_folder, vec!["Main.sln".to_string()]);
        assert_eq!(entry.as_ref_value(), ProjectRef::new("src/App.vbproj", "App"));
    }
}
