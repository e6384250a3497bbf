//! # srcbrowse Pipeline
//!
//! Two-pass indexing and generation driver for the merged website.
//!
//! ```text
//! Inputs (.sln / .csproj / .vbproj)
//!     │
//!     ├──> Pass 1: BuildGraphReader per input
//!     │      └─> Assembly universe (closed world, case-insensitive)
//!     │
//!     └──> Pass 2: SolutionGenerator per input (scoped, sequential)
//!            ├─ consults the universe for local-vs-external references
//!            ├─ folds generated assemblies into the processed set
//!            └─> merged Folder<ProjectRef> navigation tree
//! ```
//!
//! Pass 1 completes for every input before Pass 2 starts for any, so
//! cross-references resolve identically regardless of input order. Both
//! passes apply the same exclusion gate and fail soft per input.

mod collab;
mod driver;
mod error;
mod federation;
mod names;
mod project;
mod universe;

pub use collab::{BuildGraphReader, GeneratorFactory, SolutionGenerator};
pub use driver::{generate_all, GenerationOutcome};
pub use error::{PipelineError, Result};
pub use federation::{Federation, DEFAULT_INDEX_URLS};
pub use names::{ExclusionSet, NameSet};
pub use project::{ProjectEntry, ProjectRef};
pub use universe::build_assembly_universe;
