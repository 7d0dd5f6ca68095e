//! On-disk legacy plugin assets
//!
//! Older writers stored a plugin's per-run files under
//! `<root>/<run>/plugins/<plugin_dir>/<asset>`. Every immediate subdirectory
//! of the root is a run; a run without the plugin directory has no assets.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use textboard_core::{Error, Result, RunAssets};
use tracing::debug;

/// Directory name under each run that holds per-plugin asset folders.
pub const PLUGINS_DIR: &str = "plugins";

/// Read-only view over a directory of per-run plugin assets
#[derive(Debug, Clone)]
pub struct PluginAssetDir {
    root: PathBuf,
}

impl PluginAssetDir {
    /// Wrap a root directory. The directory does not need to exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding the assets of one plugin for one run
    pub fn plugin_dir_path(&self, run: &str, plugin_dir: &str) -> PathBuf {
        self.root.join(run).join(PLUGINS_DIR).join(plugin_dir)
    }

    /// List assets of a plugin for every run under the root
    ///
    /// Runs without the plugin folder are listed with no assets. A missing
    /// root yields an empty listing.
    pub fn list_assets(&self, plugin_dir: &str) -> Result<RunAssets> {
        let mut listing = RunAssets::new();
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(listing),
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let run = entry.file_name().to_string_lossy().into_owned();
            let assets = list_files(&self.plugin_dir_path(&run, plugin_dir))?;
            listing.insert(run, assets);
        }
        Ok(listing)
    }

    /// Read one asset
    ///
    /// # Errors
    ///
    /// `Error::AssetNotFound` if the file does not exist; `Error::Storage` if
    /// a name would escape its folder.
    pub fn read_asset(&self, run: &str, plugin_dir: &str, asset: &str) -> Result<Vec<u8>> {
        for name in [run, plugin_dir, asset] {
            check_single_component(name)?;
        }
        let path = self.plugin_dir_path(run, plugin_dir).join(asset);
        debug!(target: "textboard::storage", path = %path.display(), "Reading plugin asset");
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::AssetNotFound {
                run: run.to_string(),
                asset: asset.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

fn list_files(dir: &Path) -> Result<BTreeSet<String>> {
    let mut files = BTreeSet::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(files),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}

fn check_single_component(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(Error::storage(format!("invalid asset path component {:?}", name))),
    }
}
