use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use srcbrowse_pipeline::{ExclusionSet, Federation};

#[derive(Parser)]
#[command(name = "srcbrowse")]
#[command(about = "Generates a browsable HTML website for .NET solutions and merges the per-project output into one navigable index", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Paths to .sln/.csproj/.vbproj files to process
    pub projects: Vec<PathBuf>,

    /// Output directory for the generated website
    #[arg(long, default_value = "out")]
    pub out: PathBuf,

    /// Delete and recreate the output directory first
    #[arg(long)]
    pub force: bool,

    /// File with extra input paths, one per line
    #[arg(long = "in", value_name = "FILE")]
    pub in_file: Option<PathBuf>,

    /// File with project file names to exclude, one per line
    #[arg(long, value_name = "FILE")]
    pub exclude: Option<PathBuf>,

    /// Build property override, name=value (repeatable)
    #[arg(short = 'p', long = "property", value_name = "NAME=VALUE")]
    pub properties: Vec<String>,

    /// Emit the assembly list instead of the solution explorer
    #[arg(long = "assembly-list")]
    pub assembly_list: bool,

    /// Flatten the solution explorer to one sorted list of assemblies
    #[arg(long)]
    pub flatten: bool,

    /// Disable plugin loading
    #[arg(long = "no-plugins")]
    pub no_plugins: bool,

    /// Blacklist one plugin by name (repeatable)
    #[arg(long = "no-plugin", value_name = "NAME")]
    pub no_plugin: Vec<String>,

    /// Do not register the built-in federated indexes
    #[arg(long = "no-builtin-federations")]
    pub no_builtin_federations: bool,

    /// Register a federated index server (repeatable)
    #[arg(long, value_name = "URL")]
    pub federation: Vec<String>,

    /// Register an offline federated index, url=assembly-list-file (repeatable)
    #[arg(long = "offline-federation", value_name = "URL=FILE")]
    pub offline_federation: Vec<String>,

    /// File with federation entries, a URL or offline:url=file per line
    #[arg(long = "fed-list", value_name = "FILE")]
    pub fed_list: Option<PathBuf>,

    /// Map a local directory to a served URL, dir=url (repeatable)
    #[arg(long = "server-path", value_name = "DIR=URL")]
    pub server_path: Vec<String>,

    /// Static website asset directory (default: web beside the executable)
    #[arg(long = "web-root", value_name = "DIR")]
    pub web_root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Positional inputs plus the `--in` file, filtered down to existing,
    /// supported project/solution files. Bad entries are logged and dropped.
    pub fn gather_inputs(&self) -> Vec<PathBuf> {
        let mut inputs = Vec::new();

        for path in &self.projects {
            add_project(&mut inputs, path);
        }

        if let Some(in_file) = &self.in_file {
            match fs::read_to_string(in_file) {
                Ok(text) => {
                    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
                        add_project(&mut inputs, Path::new(line));
                    }
                }
                Err(e) => log::error!("Invalid input list {}: {e}", in_file.display()),
            }
        }

        inputs
    }

    pub fn gather_exclusions(&self) -> ExclusionSet {
        let mut exclusions = ExclusionSet::new();
        if let Some(exclude) = &self.exclude {
            match fs::read_to_string(exclude) {
                Ok(text) => {
                    for line in text.lines() {
                        exclusions.add(line);
                    }
                }
                Err(e) => log::error!("Invalid exclusion list {}: {e}", exclude.display()),
            }
        }
        exclusions
    }

    pub fn gather_properties(&self) -> HashMap<String, String> {
        let mut properties = HashMap::new();
        for property in &self.properties {
            match split_pair(property) {
                Some((name, value)) => {
                    properties.insert(name.to_string(), value.to_string());
                }
                None => log::error!("Invalid property override: '{property}'"),
            }
        }
        properties
    }

    /// Builds the federation registry: explicit servers, offline entries,
    /// the `--fed-list` file, then the built-ins unless suppressed.
    pub fn gather_federation(&self) -> Federation {
        let mut federation = Federation::new();

        for server in &self.federation {
            log::info!("Adding federation '{server}'.");
            federation.add(server);
        }

        for entry in &self.offline_federation {
            match split_pair(entry) {
                Some((server, listing)) => {
                    log::info!("Adding federation '{server}' (offline from '{listing}').");
                    federation.add_offline(server, listing);
                }
                None => log::error!("Invalid offline federation: '{entry}'"),
            }
        }

        if let Some(fed_list) = &self.fed_list {
            match fs::read_to_string(fed_list) {
                Ok(text) => add_federation_lines(&mut federation, &text),
                Err(e) => log::error!("Invalid federation list {}: {e}", fed_list.display()),
            }
        }

        if self.no_builtin_federations {
            log::info!("Disabling built-in federations.");
        } else {
            federation.add_defaults();
        }

        federation
    }

    /// `--server-path dir=url` mappings; invalid entries logged and dropped.
    /// The local directory is resolved to its full path so the mapping
    /// matches documents discovered through canonicalized inputs.
    pub fn gather_server_paths(&self) -> Vec<(PathBuf, String)> {
        let mut mappings = Vec::new();
        for mapping in &self.server_path {
            match split_pair(mapping) {
                Some((dir, url)) => {
                    let dir = fs::canonicalize(dir).unwrap_or_else(|_| PathBuf::from(dir));
                    mappings.push((dir, url.to_string()));
                }
                None => log::error!("Invalid server path: '{mapping}'"),
            }
        }
        mappings
    }
}

fn add_project(inputs: &mut Vec<PathBuf>, path: &Path) {
    if is_supported_project(path) {
        let full = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        inputs.push(full);
    } else {
        log::warn!("Project not found or not supported: {}", path.display());
    }
}

fn is_supported_project(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ext.eq_ignore_ascii_case("sln")
                || ext.eq_ignore_ascii_case("csproj")
                || ext.eq_ignore_ascii_case("vbproj")
        })
}

fn add_federation_lines(federation: &mut Federation, text: &str) {
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(rest) = line.strip_prefix("offline:") {
            match split_pair(rest) {
                Some((server, listing)) => {
                    log::info!("Adding federation '{server}' (offline from '{listing}').");
                    federation.add_offline(server, listing);
                }
                None => log::error!("Invalid federation entry: '{line}'"),
            }
        } else {
            log::info!("Adding federation '{line}'.");
            federation.add(line);
        }
    }
}

fn split_pair(entry: &str) -> Option<(&str, &str)> {
    let (left, right) = entry.split_once('=')?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left, right))
}
