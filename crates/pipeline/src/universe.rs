use std::path::PathBuf;

use crate::collab::BuildGraphReader;
use crate::names::{ExclusionSet, NameSet};

/// Pass 1: closes the assembly world before anything is generated.
///
/// Walks every input once and accumulates the deduplicated set of assembly
/// names the whole run will produce, so Pass 2 can decide local-vs-external
/// hyperlink targets consistently regardless of input order. A read failure
/// on one input is logged and that input skipped; the build continues.
pub fn build_assembly_universe(
    inputs: &[PathBuf],
    reader: &dyn BuildGraphReader,
    exclusions: &ExclusionSet,
) -> NameSet {
    let mut universe = NameSet::new();

    for input in inputs {
        if exclusions.contains_path(input) {
            log::warn!("The project/solution is excluded: {}", input.display());
            continue;
        }

        log::info!("Reading assembly names from {}", input.display());
        match reader.read_projects(input, exclusions) {
            Ok(entries) => {
                for entry in entries {
                    universe.insert(&entry.assembly_name);
                    log::info!("Assembly to process: {}", entry.assembly_name);
                }
            }
            Err(e) => {
                log::error!("Failed to read assembly names from {}: {e}", input.display());
            }
        }
    }

    universe
}

#[cfg(test)]
mod tests {
    use super::build_assembly_universe;
    use crate::collab::BuildGraphReader;
    use crate::error::{PipelineError, Result};
    use crate::names::ExclusionSet;
    use crate::project::ProjectEntry;
    use pretty_assertions::assert_eq;
    use std::path::{Path, PathBuf};

    /// Reader backed by a fixed input -> entries table.
    struct TableReader {
        rows: Vec<(PathBuf, Vec<ProjectEntry>)>,
    }

    impl TableReader {
        fn new(rows: Vec<(&str, Vec<(&str, &str)>)>) -> Self {
            Self {
                rows: rows
                    .into_iter()
                    .map(|(input, projects)| {
                        (
                            PathBuf::from(input),
                            projects
                                .into_iter()
                                .map(|(path, assembly)| ProjectEntry::new(path, assembly))
                                .collect(),
                        )
                    })
                    .collect(),
            }
        }
    }

    impl BuildGraphReader for TableReader {
        fn read_projects(
            &self,
            input: &Path,
            exclusions: &ExclusionSet,
        ) -> Result<Vec<ProjectEntry>> {
            let row = self
                .rows
                .iter()
                .find(|(path, _)| path == input)
                .ok_or_else(|| PipelineError::BuildGraph {
                    path: input.to_path_buf(),
                    reason: "unreadable".to_string(),
                })?;
            Ok(row
                .1
                .iter()
                .filter(|entry| !exclusions.contains_path(&entry.project_path))
                .cloned()
                .collect())
        }
    }

    fn universe_names(
        inputs: &[&str],
        reader: &TableReader,
        exclusions: &ExclusionSet,
    ) -> Vec<String> {
        let inputs: Vec<PathBuf> = inputs.iter().map(PathBuf::from).collect();
        build_assembly_universe(&inputs, reader, exclusions)
            .iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn dedups_across_inputs_case_insensitively() {
        let reader = TableReader::new(vec![
            ("a.sln", vec![("p/Common.csproj", "Common"), ("p/App.csproj", "App")]),
            ("b.sln", vec![("q/Common.csproj", "COMMON"), ("q/Lib.csproj", "Lib")]),
        ]);

        let names = universe_names(&["a.sln", "b.sln"], &reader, &ExclusionSet::new());
        assert_eq!(names, vec!["Common", "App", "Lib"]);
    }

    #[test]
    fn permuting_inputs_yields_the_same_universe() {
        let reader = TableReader::new(vec![
            ("a.sln", vec![("p/Common.csproj", "Common"), ("p/App.csproj", "App")]),
            ("b.sln", vec![("q/Common.csproj", "Common"), ("q/Lib.csproj", "Lib")]),
        ]);

        let forward = universe_names(&["a.sln", "b.sln"], &reader, &ExclusionSet::new());
        let backward = universe_names(&["b.sln", "a.sln"], &reader, &ExclusionSet::new());

        let mut forward_sorted = forward.clone();
        forward_sorted.sort();
        let mut backward_sorted = backward;
        backward_sorted.sort();
        assert_eq!(forward_sorted, backward_sorted);
        assert_eq!(forward.len(), 3);
    }

    #[test]
    fn excluded_inputs_and_projects_contribute_nothing() {
        let reader = TableReader::new(vec![
            ("a.sln", vec![("p/Kept.csproj", "Kept"), ("p/Dropped.csproj", "Dropped")]),
            ("skip.sln", vec![("s/Other.csproj", "Other")]),
        ]);
        let mut exclusions = ExclusionSet::new();
        exclusions.add("skip.sln");
        exclusions.add("Dropped.csproj");

        let names = universe_names(&["a.sln", "skip.sln"], &reader, &exclusions);
        assert_eq!(names, vec!["Kept"]);
    }

    #[test]
    fn read_failure_is_fail_soft() {
        let reader = TableReader::new(vec![(
            "good.sln",
            vec![("p/App.csproj", "App")],
        )]);

        let names = universe_names(&["broken.sln", "good.sln"], &reader, &ExclusionSet::new());
        assert_eq!(names, vec!["App"]);
    }
}
