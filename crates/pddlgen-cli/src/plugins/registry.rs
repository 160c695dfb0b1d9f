//! Domain discovery and lazy plugin loading.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{DomainPlugin, LoadError, ManifestPlugin};

/// Directory names containing this marker are never domains.
pub const RESERVED_MARKER: &str = "__";

/// One discovered domain and its load result, computed on first use.
struct DomainEntry {
    name: String,
    dir: PathBuf,
    plugin: OnceCell<Result<Rc<dyn DomainPlugin>, LoadError>>,
}

/// Registry of the domains found under one root directory.
///
/// Discovery only lists directories. A domain's manifest is read the first
/// time that domain is loaded, so one broken plugin never affects the others.
pub struct DomainRegistry {
    root: PathBuf,
    /// Sorted by name.
    entries: Vec<DomainEntry>,
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The domains root could not be listed.
    RootUnreadable { root: PathBuf, message: String },
    /// The domains root holds no domain directories.
    Empty(PathBuf),
    /// A domain that must always be present is missing.
    MissingReferenceDomain { root: PathBuf, domain: String },
    /// A plugin with this name is already registered.
    AlreadyRegistered(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootUnreadable { root, message } => {
                write!(f, "Failed to read domains root {}: {}", root.display(), message)
            }
            Self::Empty(root) => write!(f, "No domains found in {}", root.display()),
            Self::MissingReferenceDomain { root, domain } => write!(
                f,
                "Domain '{}' not found in {}; the domains root looks incomplete",
                domain,
                root.display()
            ),
            Self::AlreadyRegistered(name) => write!(f, "Domain already registered: {}", name),
        }
    }
}

impl std::error::Error for RegistryError {}

impl DomainRegistry {
    /// Lists the domain directories directly under `root`.
    ///
    /// A domain is any subdirectory whose name contains no `__` and does not
    /// start with a dot.
    pub fn discover(root: &Path) -> Result<Self, RegistryError> {
        let read_dir = std::fs::read_dir(root).map_err(|e| RegistryError::RootUnreadable {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| RegistryError::RootUnreadable {
                root: root.to_path_buf(),
                message: e.to_string(),
            })?;
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                tracing::debug!(path = %dir.display(), "skipping non-UTF-8 directory name");
                continue;
            };
            if name.contains(RESERVED_MARKER) || name.starts_with('.') {
                continue;
            }
            entries.push(DomainEntry {
                name,
                dir,
                plugin: OnceCell::new(),
            });
        }

        if entries.is_empty() {
            return Err(RegistryError::Empty(root.to_path_buf()));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::debug!(root = %root.display(), count = entries.len(), "discovered domains");
        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// Fails unless `domain` was discovered.
    pub fn require(&self, domain: &str) -> Result<(), RegistryError> {
        if self.contains(domain) {
            Ok(())
        } else {
            Err(RegistryError::MissingReferenceDomain {
                root: self.root.clone(),
                domain: domain.to_string(),
            })
        }
    }

    /// Registers an in-process plugin under its own name.
    pub fn register(&mut self, plugin: Rc<dyn DomainPlugin>) -> Result<(), RegistryError> {
        let name = plugin.name().to_string();
        let index = match self.entries.binary_search_by(|e| e.name.as_str().cmp(&name)) {
            Ok(_) => return Err(RegistryError::AlreadyRegistered(name)),
            Err(index) => index,
        };
        let entry = DomainEntry {
            dir: self.root.join(&name),
            name,
            plugin: OnceCell::from(Ok(plugin)),
        };
        self.entries.insert(index, entry);
        Ok(())
    }

    /// Returns the domains root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Domain names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Returns true if `domain` was discovered or registered.
    pub fn contains(&self, domain: &str) -> bool {
        self.entry(domain).is_some()
    }

    /// Returns the number of domains.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no domains.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loads a domain's plugin, reading its manifest on first use.
    ///
    /// The result, success or failure, is cached for the registry's lifetime.
    pub fn load(&self, domain: &str) -> Result<Rc<dyn DomainPlugin>, LoadError> {
        let entry = self
            .entry(domain)
            .ok_or_else(|| LoadError::NotDiscovered(domain.to_string()))?;

        entry
            .plugin
            .get_or_init(|| {
                tracing::debug!(domain, dir = %entry.dir.display(), "loading plugin");
                ManifestPlugin::load(&entry.name, &entry.dir)
                    .map(|p| Rc::new(p) as Rc<dyn DomainPlugin>)
            })
            .clone()
    }

    fn entry(&self, domain: &str) -> Option<&DomainEntry> {
        self.entries
            .binary_search_by(|e| e.name.as_str().cmp(domain))
            .ok()
            .map(|i| &self.entries[i])
    }
}
