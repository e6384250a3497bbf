//! # srcbrowse Finalize
//!
//! Turns the per-project output of Pass 2 into one coherent website.
//!
//! ```text
//! merged Folder<ProjectRef>
//!     │
//!     ├──> sort (flattened: assembly name | hierarchical: folder name)
//!     │
//!     └──> SolutionExplorer.html
//!            └─ per leaf: splice of index/<Assembly>/ProjectExplorer.html
//!                 ├─ fragment between the rootFolder marker and <script>
//!                 ├─ projectCS/projectVB -> *InSolution class rewrite
//!                 ├─ data-assembly scoping attribute
//!                 └─ project-info paragraph removed
//!
//! static assets ──copy──> destination, then token substitutions under index/
//! ```
//!
//! The splice is deliberately literal text surgery: the markers in
//! [`markers`] are a contract with the per-project generator's output and
//! must stay in lockstep with it.

mod error;
mod explorer;
pub mod markers;
mod website;

pub use error::{FinalizeError, Result};
pub use explorer::{project_explorer_fragment, write_solution_explorer};
pub use website::finalize_website;
