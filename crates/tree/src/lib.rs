//! # srcbrowse Tree
//!
//! Hierarchical navigation model for the merged solution explorer.
//!
//! ```text
//! Folder<T> (root)
//!     │
//!     ├──> Folders: name -> Folder<T>   (unique keys, exclusive ownership)
//!     │      └─> ... recursively
//!     │
//!     └──> Items: Vec<T>                (ordered leaves)
//! ```
//!
//! Every project processed in Pass 2 contributes a leaf under its logical
//! folder; the finalizer sorts the whole tree once and serializes it
//! depth-first.

mod cmp;
mod folder;

pub use cmp::ordinal_ignore_case;
pub use folder::Folder;
