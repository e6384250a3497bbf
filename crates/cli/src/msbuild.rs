use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use srcbrowse_pipeline::{
    BuildGraphReader, ExclusionSet, PipelineError, ProjectEntry, Result,
};

/// Project entry line in a solution file:
/// `Project("{TYPE-GUID}") = "Name", "rel\path.csproj", "{PROJECT-GUID}"`.
static SLN_PROJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^Project\("\{(?P<type>[0-9A-Fa-f-]+)\}"\)\s*=\s*"[^"]+",\s*"(?P<path>[^"]+)""#)
        .expect("valid pattern")
});

static ASSEMBLY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<AssemblyName>\s*([^<]+?)\s*</AssemblyName>").expect("valid pattern"));

/// Solution folders contribute no assemblies.
const SOLUTION_FOLDER_TYPE: &str = "2150E333-8FDC-42A3-9474-1A3956D46DE8";

/// Reads the build graph the simple way: scans solution files for their
/// project entries and project files for the few elements this pipeline
/// needs. This is not an MSBuild evaluator; it never runs targets.
#[derive(Debug, Clone, Default)]
pub struct SlnGraphReader {
    properties: HashMap<String, String>,
}

impl SlnGraphReader {
    pub fn new(properties: HashMap<String, String>) -> Self {
        Self { properties }
    }

    fn read_solution(&self, input: &Path, exclusions: &ExclusionSet) -> Result<Vec<ProjectEntry>> {
        let text = fs::read_to_string(input)?;
        let base = input.parent().unwrap_or_else(|| Path::new("."));
        let folder = input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("Solution")
            .to_string();

        let mut entries = Vec::new();
        for caps in SLN_PROJECT.captures_iter(&text) {
            if caps["type"].eq_ignore_ascii_case(SOLUTION_FOLDER_TYPE) {
                continue;
            }
            let relative = caps["path"].replace('\\', "/");
            if !is_project_file(&relative) {
                continue;
            }

            let project_path = base.join(&relative);
            if exclusions.contains_path(&project_path) {
                log::warn!("The project is excluded: {}", project_path.display());
                continue;
            }
            if !project_path.is_file() {
                log::warn!("Project not found: {}", project_path.display());
                continue;
            }

            match self.project_entry(&project_path, vec![folder.clone()]) {
                Ok(entry) => entries.push(entry),
                Err(e) => log::error!("Failed to read {}: {e}", project_path.display()),
            }
        }

        Ok(entries)
    }

    fn project_entry(
        &self,
        project_path: &Path,
        logical_folder: Vec<String>,
    ) -> Result<ProjectEntry> {
        let text = fs::read_to_string(project_path)?;
        let assembly_name = self
            .properties
            .get("AssemblyName")
            .cloned()
            .or_else(|| {
                ASSEMBLY_NAME
                    .captures(&text)
                    .map(|caps| caps[1].to_string())
            })
            .or_else(|| {
                project_path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .ok_or_else(|| PipelineError::BuildGraph {
                path: project_path.to_path_buf(),
                reason: "no assembly name".to_string(),
            })?;

        Ok(ProjectEntry {
            project_path: project_path.to_path_buf(),
            assembly_name,
            logical_folder,
        })
    }
}

impl BuildGraphReader for SlnGraphReader {
    fn read_projects(&self, input: &Path, exclusions: &ExclusionSet) -> Result<Vec<ProjectEntry>> {
        let extension = input
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "sln" => self.read_solution(input, exclusions),
            "csproj" | "vbproj" => Ok(vec![self.project_entry(input, Vec::new())?]),
            _ => Err(PipelineError::UnsupportedInput(input.to_path_buf())),
        }
    }
}

fn is_project_file(path: &str) -> bool {
    let lowered = path.to_ascii_lowercase();
    lowered.ends_with(".csproj") || lowered.ends_with(".vbproj")
}
