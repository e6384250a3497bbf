use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use srcbrowse_pipeline::{ExclusionSet, ProjectRef};
use srcbrowse_tree::{ordinal_ignore_case, Folder};

use crate::error::Result;
use crate::markers;

const EXPLORER_PREFIX: &str = r#"<!DOCTYPE html>
<html><head><title>Solution Explorer</title>
<link rel="stylesheet" href="styles.css" />
<script src="scripts.js"></script>
</head>
<body class="solutionExplorerBody">
<div id="rootFolder">"#;

const EXPLORER_SUFFIX: &str = "</div>\n</body></html>";

/// Serializes the merged navigation tree into one `SolutionExplorer.html`,
/// splicing each project's previously generated navigation fragment in
/// place rather than regenerating it.
///
/// A `None` root short-circuits with no output: finalization is optional
/// when there is nothing to merge. The writer is flushed before returning
/// so later stages never observe a half-written document.
pub fn write_solution_explorer(
    index_dir: &Path,
    root: Option<&mut Folder<ProjectRef>>,
    exclusions: &ExclusionSet,
    flatten: bool,
) -> Result<()> {
    let Some(root) = root else {
        return Ok(());
    };

    sort(root, flatten);

    log::info!("Solution Explorer...");
    let path = index_dir.join(markers::SOLUTION_EXPLORER_FILE);
    let mut writer = BufWriter::new(File::create(&path)?);
    writeln!(writer, "{EXPLORER_PREFIX}")?;
    write_folder(root, index_dir, &mut writer, exclusions)?;
    writeln!(writer, "{EXPLORER_SUFFIX}")?;
    writer.flush()?;
    Ok(())
}

/// One terminal sort for the whole tree. The mode is a run-wide choice:
/// flattened sorts leaves by assembly display name, hierarchical sorts
/// folders by segment name; both ordinal case-insensitive.
fn sort(root: &mut Folder<ProjectRef>, flatten: bool) {
    if flatten {
        root.sort_items_by(&|l: &ProjectRef, r: &ProjectRef| {
            ordinal_ignore_case(&l.assembly_name, &r.assembly_name)
        });
    } else {
        root.sort_folders();
    }
}

fn write_folder<W: Write>(
    folder: &Folder<ProjectRef>,
    index_dir: &Path,
    writer: &mut W,
    exclusions: &ExclusionSet,
) -> Result<()> {
    for subfolder in folder.folders() {
        writeln!(
            writer,
            r#"<div class="folderTitle">{}</div><div class="folder">"#,
            subfolder.name()
        )?;
        write_folder(subfolder, index_dir, writer, exclusions)?;
        writeln!(writer, "</div>")?;
    }

    for project in folder.items() {
        if exclusions.contains_name(project.file_name()) {
            continue;
        }
        if let Some(text) = project_explorer_fragment(index_dir, &project.assembly_name)? {
            writeln!(writer, "{text}")?;
        }
    }

    Ok(())
}

/// Extracts the navigation fragment from an assembly's own
/// `ProjectExplorer.html` and rewrites it for the merged view: the
/// in-solution CSS classes, a `data-assembly` scoping attribute, and the
/// removal of the redundant project-info paragraph.
///
/// Returns `None` when the assembly produced no navigable output (missing
/// file is not an error) or when the fragment markers are absent.
pub fn project_explorer_fragment(index_dir: &Path, assembly_name: &str) -> Result<Option<String>> {
    let file_name = index_dir
        .join(assembly_name)
        .join(markers::PROJECT_EXPLORER_FILE);
    if !file_name.exists() {
        return Ok(None);
    }

    let text = fs::read_to_string(&file_name)?;
    let Some(start) = text.find(markers::ROOT_FOLDER_OPEN) else {
        log::warn!("No navigation fragment in {}", file_name.display());
        return Ok(None);
    };
    let start = start + markers::ROOT_FOLDER_OPEN.len();
    let Some(end) = text[start..].find(markers::FRAGMENT_END).map(|e| start + e) else {
        log::warn!("Unterminated navigation fragment in {}", file_name.display());
        return Ok(None);
    };

    // Reattach the root wrapper tag the marker search consumed.
    let mut text = format!("<div{}", &text[start..end]);
    text = text.replace(
        "</div><div>",
        &format!(
            "</div><div class=\"folder\" {}=\"{}\">",
            markers::DATA_ASSEMBLY_ATTRIBUTE,
            assembly_name
        ),
    );
    text = text.replace(markers::PROJECT_CS_CLASS, markers::PROJECT_CS_IN_SOLUTION_CLASS);
    text = text.replace(markers::PROJECT_VB_CLASS, markers::PROJECT_VB_IN_SOLUTION_CLASS);

    // At most one summary paragraph, removed through its first close tag.
    if let Some(info_start) = text.find(markers::PROJECT_INFO_OPEN) {
        if let Some(rel_end) = text[info_start..].find(markers::PROJECT_INFO_CLOSE) {
            let info_end = info_start + rel_end + markers::PROJECT_INFO_CLOSE.len();
            text.replace_range(info_start..info_end, "");
        }
    }

    Ok(Some(text))
}
