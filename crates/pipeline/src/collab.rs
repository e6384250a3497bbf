use std::path::Path;

use srcbrowse_tree::Folder;

use crate::error::Result;
use crate::names::{ExclusionSet, NameSet};
use crate::project::{ProjectEntry, ProjectRef};

/// Enumerates the compiled units an input would produce.
///
/// Implementations must apply the exclusion set themselves so that an
/// excluded project contributes no assemblies even when it is only reached
/// transitively through a solution file.
pub trait BuildGraphReader {
    fn read_projects(&self, input: &Path, exclusions: &ExclusionSet) -> Result<Vec<ProjectEntry>>;
}

/// Per-input generator, scoped to one project/solution.
///
/// The driver creates one per input and drops it before the next input
/// begins; `Drop` is the release point for whatever analysis workspace the
/// implementation holds, which keeps peak memory independent of the number
/// of inputs.
pub trait SolutionGenerator {
    /// Generates this input's output files.
    ///
    /// `universe` is the closed-world assembly set from Pass 1, consulted
    /// for local-vs-external reference decisions. Assemblies already in
    /// `processed` were materialized by an earlier input and must only be
    /// referenced, never regenerated; newly generated ones are folded in.
    /// Each generated project contributes its leaf to `merge_root` under
    /// its logical folder.
    fn generate(
        &mut self,
        universe: &NameSet,
        processed: &mut NameSet,
        merge_root: &mut Folder<ProjectRef>,
    ) -> Result<()>;
}

/// Creates the scoped generator for one input.
pub trait GeneratorFactory {
    type Generator: SolutionGenerator;

    fn create(&self, input: &Path) -> Result<Self::Generator>;
}
