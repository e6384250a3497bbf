use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use srcbrowse_pipeline::{
    BuildGraphReader, ExclusionSet, GeneratorFactory, NameSet, PipelineError, ProjectEntry,
    ProjectRef, Result, SolutionGenerator,
};
use srcbrowse_tree::{ordinal_ignore_case, Folder};

use crate::msbuild::SlnGraphReader;

static PROJECT_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<ProjectReference\s+Include="([^"]+)""#).expect("valid pattern"));

static ASSEMBLY_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<Reference\s+Include="([^"]+)""#).expect("valid pattern"));

/// Creates one scoped [`HtmlProjectWriter`] per input.
pub struct HtmlGeneratorFactory<'a> {
    index_dir: PathBuf,
    reader: &'a SlnGraphReader,
    exclusions: &'a ExclusionSet,
    server_paths: &'a [(PathBuf, String)],
}

impl<'a> HtmlGeneratorFactory<'a> {
    pub fn new(
        index_dir: PathBuf,
        reader: &'a SlnGraphReader,
        exclusions: &'a ExclusionSet,
        server_paths: &'a [(PathBuf, String)],
    ) -> Self {
        Self {
            index_dir,
            reader,
            exclusions,
            server_paths,
        }
    }
}

impl<'a> GeneratorFactory for HtmlGeneratorFactory<'a> {
    type Generator = HtmlProjectWriter<'a>;

    fn create(&self, input: &Path) -> Result<HtmlProjectWriter<'a>> {
        Ok(HtmlProjectWriter {
            input: input.to_path_buf(),
            index_dir: self.index_dir.clone(),
            reader: self.reader,
            exclusions: self.exclusions,
            server_paths: self.server_paths,
        })
    }
}

/// Minimal per-project generator: writes one `ProjectExplorer.html` per
/// assembly with the navigation-fragment markers the finalizer splices on,
/// a reference list classified against the global universe, and a
/// gitignore-aware source file listing. No semantic analysis happens here.
pub struct HtmlProjectWriter<'a> {
    input: PathBuf,
    index_dir: PathBuf,
    reader: &'a SlnGraphReader,
    exclusions: &'a ExclusionSet,
    server_paths: &'a [(PathBuf, String)],
}

impl SolutionGenerator for HtmlProjectWriter<'_> {
    fn generate(
        &mut self,
        universe: &NameSet,
        processed: &mut NameSet,
        merge_root: &mut Folder<ProjectRef>,
    ) -> Result<()> {
        let entries = self.reader.read_projects(&self.input, self.exclusions)?;
        let mut failed = Vec::new();
        for entry in entries {
            if processed.contains(&entry.assembly_name) {
                log::info!("Already generated: {}", entry.assembly_name);
                continue;
            }

            match self.write_project_explorer(&entry, universe) {
                Ok(()) => {
                    processed.insert(&entry.assembly_name);
                    merge_root
                        .ensure_folder(entry.logical_folder.iter().cloned())
                        .add_item(entry.as_ref_value());
                }
                Err(e) => {
                    log::error!("Failed to generate {}: {e}", entry.assembly_name);
                    failed.push(format!("{}: {e}", entry.assembly_name));
                }
            }
        }

        // Surviving projects stay generated; the failures still have to
        // reach the run outcome and the persisted error log.
        if failed.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::Other(failed.join("; ")))
        }
    }
}

impl HtmlProjectWriter<'_> {
    fn write_project_explorer(&self, entry: &ProjectEntry, universe: &NameSet) -> Result<()> {
        let assembly_dir = self.index_dir.join(&entry.assembly_name);
        fs::create_dir_all(&assembly_dir)?;

        let project_text = fs::read_to_string(&entry.project_path)?;
        let documents = self.collect_documents(entry);
        let references = collect_references(&project_text);
        let language_class = if entry
            .project_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("vbproj"))
        {
            "projectVB"
        } else {
            "projectCS"
        };

        let path = assembly_dir.join("ProjectExplorer.html");
        let mut writer = BufWriter::new(File::create(&path)?);
        let assembly = escape(&entry.assembly_name);

        writeln!(writer, "<!DOCTYPE html>")?;
        writeln!(writer, "<html><head><title>{assembly}</title>")?;
        writeln!(writer, "<link rel=\"stylesheet\" href=\"../styles.css\" />")?;
        writeln!(writer, "</head>\n<body>")?;
        writeln!(writer, "<div id=\"rootFolder\" class=\"{language_class}\">")?;
        writeln!(writer, "<div class=\"projectTitle\">{assembly}</div><div>")?;
        writeln!(
            writer,
            "<p class=\"projectInfo\">{assembly}; {} document(s)</p>",
            documents.len()
        )?;

        if !references.is_empty() {
            writeln!(
                writer,
                "<div class=\"folderTitle\">References</div><div class=\"folder\">"
            )?;
            for reference in &references {
                let class = if universe.contains(reference) {
                    "referenceInSolution"
                } else {
                    "referenceExternal"
                };
                writeln!(
                    writer,
                    "<span class=\"{class}\">{}</span>",
                    escape(reference)
                )?;
            }
            writeln!(writer, "</div>")?;
        }

        for document in &documents {
            writeln!(
                writer,
                "<div class=\"document\"><a href=\"{}\">{}</a></div>",
                escape(&document.href),
                escape(&document.name)
            )?;
        }

        writeln!(writer, "</div>\n</div>")?;
        writeln!(writer, "<script>initializeProjectExplorer();</script>")?;
        writeln!(writer, "</body></html>")?;
        writer.flush()?;

        log::info!(
            "Generated {} ({} documents)",
            entry.assembly_name,
            documents.len()
        );
        Ok(())
    }

    /// Source files under the project directory, gitignore-aware, sorted.
    fn collect_documents(&self, entry: &ProjectEntry) -> Vec<Document> {
        let Some(project_dir) = entry.project_path.parent() else {
            return Vec::new();
        };
        let wanted = if entry
            .project_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("vbproj"))
        {
            "vb"
        } else {
            "cs"
        };

        let mut documents = Vec::new();
        for result in ignore::WalkBuilder::new(project_dir).hidden(true).build() {
            let dirent = match result {
                Ok(dirent) => dirent,
                Err(e) => {
                    log::warn!("Failed to read entry: {e}");
                    continue;
                }
            };
            if !dirent.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = dirent.path();
            if !path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
            {
                continue;
            }

            let relative = path
                .strip_prefix(project_dir)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| relative.clone());
            documents.push(Document {
                href: self.document_href(path, &relative),
                name,
            });
        }

        documents.sort_by(|a, b| ordinal_ignore_case(&a.href, &b.href));
        documents
    }

    /// Relative href by default; a `--server-path` mapping rewrites files
    /// under a mapped local directory to their served URL.
    fn document_href(&self, absolute: &Path, relative: &str) -> String {
        for (local, url) in self.server_paths {
            if let Ok(rest) = absolute.strip_prefix(local) {
                let rest = rest.to_string_lossy().replace('\\', "/");
                let url = url.trim_end_matches('/');
                return format!("{url}/{rest}");
            }
        }
        relative.to_string()
    }
}

struct Document {
    href: String,
    name: String,
}

/// Referenced assembly names from the project file, in file order.
fn collect_references(project_text: &str) -> Vec<String> {
    let mut references = Vec::new();

    for caps in PROJECT_REFERENCE.captures_iter(project_text) {
        let path = caps[1].replace('\\', "/");
        if let Some(stem) = Path::new(&path).file_stem().and_then(|s| s.to_str()) {
            references.push(stem.to_string());
        }
    }

    for caps in ASSEMBLY_REFERENCE.captures_iter(project_text) {
        // Strong names carry version/culture after the first comma.
        let name = caps[1].split(',').next().unwrap_or(&caps[1]).trim();
        if !name.is_empty() {
            references.push(name.to_string());
        }
    }

    references
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
