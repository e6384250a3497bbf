use std::fs;
use std::path::Path;

use chrono::Local;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use walkdir::WalkDir;

use srcbrowse_pipeline::Federation;

use crate::error::Result;
use crate::markers;

static EXTERNAL_URL_MAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(markers::EXTERNAL_URL_MAP_PATTERN).expect("valid pattern"));

/// Copies the static site assets into the destination and applies the
/// build-time substitutions to the copies under `index/`.
///
/// A missing asset source directory makes the whole step a no-op.
/// Re-running re-copies unconditionally; each substitution reads the
/// pristine `wwwroot/` copy and is itself a no-op when that file is absent.
pub fn finalize_website(
    web_source: &Path,
    destination: &Path,
    emit_assembly_list: bool,
    federation: &Federation,
) -> Result<()> {
    if !web_source.is_dir() {
        log::warn!("No website assets at {}", web_source.display());
        return Ok(());
    }

    copy_directory(web_source, destination)?;

    stamp_overview_with_date(destination)?;

    if emit_assembly_list {
        toggle_solution_explorer_off(destination)?;
    }

    set_external_url_map(destination, federation)?;

    Ok(())
}

/// Recursive overwrite copy; no idempotence check.
fn copy_directory(source: &Path, destination: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let target = destination.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn stamp_overview_with_date(destination: &Path) -> Result<()> {
    let source = destination.join("wwwroot").join("overview.html");
    let target = destination.join("index").join("overview.html");
    if source.exists() {
        let text = fs::read_to_string(&source)?;
        let stamped = stamp_date(&text);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, stamped)?;
    }
    Ok(())
}

/// Replaces the date placeholder with today as e.g. `June 5`.
fn stamp_date(text: &str) -> String {
    let today = Local::now().format("%B %-d").to_string();
    text.replace(markers::DATE_PLACEHOLDER, &today)
}

fn toggle_solution_explorer_off(destination: &Path) -> Result<()> {
    let source = destination.join("wwwroot").join("scripts.js");
    let target = destination.join("index").join("scripts.js");
    if source.exists() {
        let text = fs::read_to_string(&source)?;
        let text = text.replace(markers::SOLUTION_EXPLORER_TOGGLE, "false");
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, text)?;
    }
    Ok(())
}

/// Injects the registered federation servers as a quoted, comma-joined
/// list in place of the URL-map region. Zero registered servers leaves the
/// region untouched.
fn set_external_url_map(destination: &Path, federation: &Federation) -> Result<()> {
    let source = destination.join("wwwroot").join("scripts.js");
    let target = destination.join("index").join("scripts.js");
    if !source.exists() {
        return Ok(());
    }

    let map = federation
        .servers()
        .iter()
        .map(|server| format!("\"{server}\""))
        .collect::<Vec<_>>()
        .join(",");
    if map.is_empty() {
        return Ok(());
    }

    let text = fs::read_to_string(&source)?;
    let text = EXTERNAL_URL_MAP.replace_all(&text, NoExpand(&map)).into_owned();
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::finalize_website;
    use pretty_assertions::assert_eq;
    use srcbrowse_pipeline::Federation;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const SCRIPTS: &str = "var useSolutionExplorer = /*USE_SOLUTION_EXPLORER*/true/*USE_SOLUTION_EXPLORER*/;\n\
                           var externalUrlMap = [/*EXTERNAL_URL_MAP*//*EXTERNAL_URL_MAP*/];\n";

    fn write_assets(web: &Path) {
        let wwwroot = web.join("wwwroot");
        fs::create_dir_all(&wwwroot).unwrap();
        fs::write(wwwroot.join("overview.html"), "<h1>Built $(Date)</h1>").unwrap();
        fs::write(wwwroot.join("scripts.js"), SCRIPTS).unwrap();
    }

    #[test]
    fn missing_asset_directory_is_a_no_op() {
        let destination = tempdir().unwrap();
        finalize_website(
            Path::new("/nonexistent/web"),
            destination.path(),
            false,
            &Federation::new(),
        )
        .unwrap();
        assert!(fs::read_dir(destination.path()).unwrap().next().is_none());
    }

    #[test]
    fn stamps_date_into_the_index_copy() {
        let web = tempdir().unwrap();
        let destination = tempdir().unwrap();
        write_assets(web.path());

        finalize_website(web.path(), destination.path(), false, &Federation::new()).unwrap();

        // Pristine template copy keeps the placeholder.
        let pristine =
            fs::read_to_string(destination.path().join("wwwroot/overview.html")).unwrap();
        assert!(pristine.contains("$(Date)"));

        let stamped = fs::read_to_string(destination.path().join("index/overview.html")).unwrap();
        assert!(!stamped.contains("$(Date)"));
        assert!(stamped.starts_with("<h1>Built "));
    }

    #[test]
    fn assembly_list_toggles_the_explorer_flag_off() {
        let web = tempdir().unwrap();
        let destination = tempdir().unwrap();
        write_assets(web.path());

        finalize_website(web.path(), destination.path(), true, &Federation::new()).unwrap();

        let scripts = fs::read_to_string(destination.path().join("index/scripts.js")).unwrap();
        assert!(scripts.contains("var useSolutionExplorer = false;"));
    }

    #[test]
    fn injects_servers_in_registration_order() {
        let web = tempdir().unwrap();
        let destination = tempdir().unwrap();
        write_assets(web.path());

        let mut federation = Federation::new();
        federation.add("https://b.example/");
        federation.add("https://a.example/");

        finalize_website(web.path(), destination.path(), false, &federation).unwrap();

        let scripts = fs::read_to_string(destination.path().join("index/scripts.js")).unwrap();
        assert!(scripts
            .contains("var externalUrlMap = [\"https://b.example/\",\"https://a.example/\"];"));
        assert!(!scripts.contains("EXTERNAL_URL_MAP"));
    }

    #[test]
    fn zero_servers_leave_the_region_verbatim() {
        let web = tempdir().unwrap();
        let destination = tempdir().unwrap();
        write_assets(web.path());

        finalize_website(web.path(), destination.path(), false, &Federation::new()).unwrap();

        // The url-map pass never wrote index/scripts.js; only the pristine
        // copy exists and its region is untouched.
        assert!(!destination.path().join("index/scripts.js").exists());
        let pristine = fs::read_to_string(destination.path().join("wwwroot/scripts.js")).unwrap();
        assert_eq!(pristine, SCRIPTS);
    }
}
