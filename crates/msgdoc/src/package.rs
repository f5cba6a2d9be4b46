//! Package discovery.
//!
//! A package is a directory holding a `package.xml` manifest. Its name is
//! the text of the manifest's `<package><name>` element, and its schema
//! files live in `<root>/<ext>/<Type>.<ext>`.
//!
//! Discovery walks a base path recursively:
//!
//! - directories containing a `CATKIN_IGNORE` marker are skipped,
//! - hidden directories are skipped,
//! - the walk does not descend into a package.
//!
//! [`PackageCache`] runs discovery lazily on the first lookup and keeps the
//! result until [`PackageCache::invalidate`] is called.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, info, trace, warn};
use quick_xml::{Reader, events::Event};
use thiserror::Error;

use msgdoc_core::group::TypeKind;

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "package.xml";

/// Marker file excluding a directory tree from discovery.
pub const IGNORE_MARKER: &str = "CATKIN_IGNORE";

/// Errors raised while reading a package manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest: {0}")]
    Io(#[from] io::Error),

    #[error("malformed manifest: {0}")]
    Xml(String),

    #[error("manifest has no <name> element")]
    MissingName,
}

/// A discovered package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    name: String,
    root: PathBuf,
}

impl Package {
    /// Create a package from its name and root directory.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Read the package rooted at `root` from its manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the manifest cannot be read, is not
    /// well-formed or does not name the package.
    pub fn from_root(root: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(root.join(MANIFEST_FILE))?;
        let name = manifest_name(&content)?.ok_or(ManifestError::MissingName)?;
        Ok(Self::new(name, root))
    }

    /// Returns the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the package root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the schema file for `type_name`.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::path::Path;
    /// # use msgdoc::package::Package;
    /// # use msgdoc_core::group::TypeKind;
    /// let package = Package::new("std_srvs", "/opt/ros/share/std_srvs");
    /// assert_eq!(
    ///     package.schema_path(TypeKind::Srv, "Trigger"),
    ///     Path::new("/opt/ros/share/std_srvs/srv/Trigger.srv"),
    /// );
    /// ```
    pub fn schema_path(&self, kind: TypeKind, type_name: &str) -> PathBuf {
        let extension = kind.extension();
        self.root
            .join(extension)
            .join(format!("{type_name}.{extension}"))
    }
}

/// Extract the package name from manifest text.
///
/// Only a `<name>` element directly below the `<package>` root counts. The
/// whole document is read, so a manifest that is malformed after its name
/// is still rejected.
fn manifest_name(content: &str) -> Result<Option<String>, ManifestError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut name = None;
    loop {
        match reader
            .read_event()
            .map_err(|err| ManifestError::Xml(err.to_string()))?
        {
            Event::Start(start) => path.push(start.name().as_ref().to_vec()),
            Event::End(_) => {
                path.pop();
            }
            Event::Text(text)
                if name.is_none() && path == [b"package".as_slice(), b"name".as_slice()] =>
            {
                let text = text
                    .decode()
                    .map_err(|err| ManifestError::Xml(err.to_string()))?;
                let text = text.trim();
                if !text.is_empty() {
                    name = Some(text.to_string());
                }
            }
            Event::Eof => {
                return match path.last() {
                    Some(open) => Err(ManifestError::Xml(format!(
                        "unclosed element `{}`",
                        String::from_utf8_lossy(open)
                    ))),
                    None => Ok(name),
                };
            }
            _ => {}
        }
    }
}

/// Discover every package below `base`.
///
/// `base` itself may be a package. Unreadable directories and broken
/// manifests are logged and skipped. When two packages share a name the
/// one found last wins.
pub fn find_packages(base: &Path) -> IndexMap<String, Package> {
    let mut packages = IndexMap::new();
    let mut pending = vec![base.to_path_buf()];

    while let Some(dir) = pending.pop() {
        if dir.join(IGNORE_MARKER).exists() {
            trace!(path:? = dir; "Skipping ignored directory");
            continue;
        }
        if dir.join(MANIFEST_FILE).is_file() {
            match Package::from_root(&dir) {
                Ok(package) => {
                    trace!(name = package.name(), path:? = dir; "Found package");
                    packages.insert(package.name().to_string(), package);
                }
                Err(err) => warn!(path:? = dir, err:%; "Skipping package"),
            }
            continue;
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) => {
                debug!(path:? = dir, err:%; "Cannot read directory");
                continue;
            }
        };
        let mut children: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        // Visit children in name order.
        children.sort();
        pending.extend(children.into_iter().rev());
    }

    debug!(base:? = base, packages = packages.len(); "Discovered packages");
    packages
}

/// Lazily populated package lookup table.
///
/// # Example
///
/// ```no_run
/// # use msgdoc::package::PackageCache;
/// let mut cache = PackageCache::new(vec!["/opt/ros/share".into()]);
/// if let Some(package) = cache.find("std_msgs") {
///     println!("{}", package.root().display());
/// }
/// ```
#[derive(Debug, Default)]
pub struct PackageCache {
    base_paths: Vec<PathBuf>,
    packages: Option<IndexMap<String, Package>>,
}

impl PackageCache {
    /// Create an empty cache over `base_paths`.
    pub fn new(base_paths: Vec<PathBuf>) -> Self {
        Self {
            base_paths,
            packages: None,
        }
    }

    /// Returns the searched base paths.
    pub fn base_paths(&self) -> &[PathBuf] {
        &self.base_paths
    }

    /// Returns `true` if discovery has run since the last invalidation.
    pub fn is_populated(&self) -> bool {
        self.packages.is_some()
    }

    /// Look up a package by name, running discovery on first use.
    pub fn find(&mut self, name: &str) -> Option<&Package> {
        self.packages
            .get_or_insert_with(|| {
                info!(base_paths:? = self.base_paths; "Discovering packages");
                self.base_paths
                    .iter()
                    .flat_map(|base| find_packages(base))
                    .collect()
            })
            .get(name)
    }

    /// Drop the discovered packages; the next lookup walks the base paths
    /// again.
    pub fn invalidate(&mut self) {
        debug!("Invalidating package cache");
        self.packages = None;
    }
}
