//! Textual contracts between the per-project generator's output, the
//! shipped website templates, and this finalizer.
//!
//! These are exact strings, not parse trees: the merged explorer is built
//! by literal text surgery on each project's generated HTML, so every
//! constant here must stay in lockstep with what the generator emits.

pub const SOLUTION_EXPLORER_FILE: &str = "SolutionExplorer.html";
pub const PROJECT_EXPLORER_FILE: &str = "ProjectExplorer.html";

/// Opens a per-project page's self-contained navigation fragment.
pub const ROOT_FOLDER_OPEN: &str = "<div id=\"rootFolder\"";

/// First tag after the navigation fragment ends.
pub const FRAGMENT_END: &str = "<script>";

/// Per-language styling of a standalone project page, and the in-solution
/// variants the merged document rewrites them to.
pub const PROJECT_CS_CLASS: &str = "projectCS";
pub const PROJECT_CS_IN_SOLUTION_CLASS: &str = "projectCSInSolution";
pub const PROJECT_VB_CLASS: &str = "projectVB";
pub const PROJECT_VB_IN_SOLUTION_CLASS: &str = "projectVBInSolution";

/// Opens the summary paragraph that is redundant in the merged view.
pub const PROJECT_INFO_OPEN: &str = "<p class=\"projectInfo";
pub const PROJECT_INFO_CLOSE: &str = "</p>";

/// Attribute that scopes client-side interactions to one assembly.
pub const DATA_ASSEMBLY_ATTRIBUTE: &str = "data-assembly";

/// Website template tokens, substituted into the copies under `index/`.
pub const DATE_PLACEHOLDER: &str = "$(Date)";
pub const SOLUTION_EXPLORER_TOGGLE: &str =
    "/*USE_SOLUTION_EXPLORER*/true/*USE_SOLUTION_EXPLORER*/";
pub const EXTERNAL_URL_MAP_PATTERN: &str = r"/\*EXTERNAL_URL_MAP\*/.*/\*EXTERNAL_URL_MAP\*/";
