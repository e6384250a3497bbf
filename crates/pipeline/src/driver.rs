use std::path::PathBuf;

use srcbrowse_tree::Folder;

use crate::collab::{GeneratorFactory, SolutionGenerator};
use crate::names::{ExclusionSet, NameSet};
use crate::project::ProjectRef;

/// What Pass 2 did, input by input.
#[derive(Debug, Default)]
pub struct GenerationOutcome {
    /// Inputs that ran to completion.
    pub generated: usize,

    /// Inputs skipped by the exclusion gate.
    pub skipped: usize,

    /// Per-input failures; the run continued past each of them.
    pub failures: Vec<(PathBuf, String)>,

    /// Assemblies actually materialized during this run.
    pub processed: NameSet,
}

/// Pass 2: drives per-input generation, strictly one input at a time.
///
/// The processed set and the merge tree are threaded through every
/// iteration by mutable reference; the generator itself is scoped to its
/// input and dropped before the next one starts, releasing its workspace.
/// A failure in one input is logged and recorded, and the remaining inputs
/// still run.
pub fn generate_all<F: GeneratorFactory>(
    inputs: &[PathBuf],
    exclusions: &ExclusionSet,
    universe: &NameSet,
    factory: &F,
    merge_root: &mut Folder<ProjectRef>,
) -> GenerationOutcome {
    let mut outcome = GenerationOutcome::default();

    for input in inputs {
        if exclusions.contains_path(input) {
            log::warn!("The project/solution is excluded: {}", input.display());
            outcome.skipped += 1;
            continue;
        }

        log::info!("Generating {}", input.display());
        let result = factory.create(input).and_then(|mut generator| {
            generator.generate(universe, &mut outcome.processed, merge_root)
            // generator drops here, before the next input begins
        });

        match result {
            Ok(()) => outcome.generated += 1,
            Err(e) => {
                log::error!("Generation failed for {}: {e}", input.display());
                outcome.failures.push((input.clone(), e.to_string()));
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::{generate_all, GeneratorFactory, SolutionGenerator};
    use crate::error::{PipelineError, Result};
    use crate::names::{ExclusionSet, NameSet};
    use crate::project::{ProjectEntry, ProjectRef};
    use pretty_assertions::assert_eq;
    use srcbrowse_tree::Folder;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    /// Factory mapping each input to the entries its generator would build.
    struct FakeFactory {
        rows: Vec<(PathBuf, Vec<ProjectEntry>)>,
        created: RefCell<Vec<PathBuf>>,
    }

    impl FakeFactory {
        fn new(rows: Vec<(&str, Vec<ProjectEntry>)>) -> Self {
            Self {
                rows: rows
                    .into_iter()
                    .map(|(input, entries)| (PathBuf::from(input), entries))
                    .collect(),
                created: RefCell::new(Vec::new()),
            }
        }
    }

    struct FakeGenerator {
        entries: Vec<ProjectEntry>,
    }

    impl GeneratorFactory for FakeFactory {
        type Generator = FakeGenerator;

        fn create(&self, input: &Path) -> Result<FakeGenerator> {
            self.created.borrow_mut().push(input.to_path_buf());
            let row = self
                .rows
                .iter()
                .find(|(path, _)| path == input)
                .ok_or_else(|| PipelineError::Other(format!("no workspace for {}", input.display())))?;
            Ok(FakeGenerator {
                entries: row.1.clone(),
            })
        }
    }

    impl SolutionGenerator for FakeGenerator {
        fn generate(
            &mut self,
            universe: &NameSet,
            processed: &mut NameSet,
            merge_root: &mut Folder<ProjectRef>,
        ) -> Result<()> {
            for entry in &self.entries {
                assert!(
                    universe.contains(&entry.assembly_name),
                    "universe must be closed before generation"
                );
                if !processed.insert(&entry.assembly_name) {
                    continue;
                }
                merge_root
                    .ensure_folder(entry.logical_folder.iter().cloned())
                    .add_item(entry.as_ref_value());
            }
            Ok(())
        }
    }

    fn entry(path: &str, assembly: &str, folder: &str) -> ProjectEntry {
        ProjectEntry::new(path, assembly).in_folder([folder])
    }

    fn leaf_assemblies(root: &Folder<ProjectRef>) -> Vec<String> {
        let mut names: Vec<String> = root
            .items()
            .iter()
            .map(|p| p.assembly_name.clone())
            .collect();
        for folder in root.folders() {
            names.extend(leaf_assemblies(folder));
        }
        names
    }

    #[test]
    fn shared_assembly_is_generated_exactly_once() {
        let factory = FakeFactory::new(vec![
            ("a.sln", vec![entry("p/Common.csproj", "Common", "a"), entry("p/App.csproj", "App", "a")]),
            ("b.sln", vec![entry("q/Common.csproj", "COMMON", "b"), entry("q/Lib.csproj", "Lib", "b")]),
        ]);
        let inputs = vec![PathBuf::from("a.sln"), PathBuf::from("b.sln")];
        let universe: NameSet = ["Common", "App", "Lib"].into_iter().collect();
        let mut root = Folder::root();

        let outcome = generate_all(&inputs, &ExclusionSet::new(), &universe, &factory, &mut root);

        assert_eq!(outcome.generated, 2);
        assert!(outcome.failures.is_empty());
        // First occurrence wins; the merged tree holds exactly one Common leaf.
        let mut leaves = leaf_assemblies(&root);
        leaves.sort();
        assert_eq!(leaves, vec!["App", "Common", "Lib"]);
        assert_eq!(outcome.processed.iter().collect::<Vec<_>>(), vec!["Common", "App", "Lib"]);
    }

    #[test]
    fn excluded_inputs_never_reach_the_factory() {
        let factory = FakeFactory::new(vec![(
            "keep.sln",
            vec![entry("p/App.csproj", "App", "keep")],
        )]);
        let inputs = vec![PathBuf::from("skip.sln"), PathBuf::from("keep.sln")];
        let mut exclusions = ExclusionSet::new();
        exclusions.add("skip.sln");
        let universe: NameSet = ["App"].into_iter().collect();
        let mut root = Folder::root();

        let outcome = generate_all(&inputs, &exclusions, &universe, &factory, &mut root);

        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.generated, 1);
        assert_eq!(factory.created.borrow().as_slice(), &[PathBuf::from("keep.sln")]);
    }

    #[test]
    fn one_failing_input_does_not_stop_the_rest() {
        let factory = FakeFactory::new(vec![(
            "good.sln",
            vec![entry("p/App.csproj", "App", "good")],
        )]);
        let inputs = vec![PathBuf::from("bad.sln"), PathBuf::from("good.sln")];
        let universe: NameSet = ["App"].into_iter().collect();
        let mut root = Folder::root();

        let outcome = generate_all(&inputs, &ExclusionSet::new(), &universe, &factory, &mut root);

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, PathBuf::from("bad.sln"));
        assert_eq!(outcome.generated, 1);
        assert_eq!(leaf_assemblies(&root), vec!["App"]);
    }
}
