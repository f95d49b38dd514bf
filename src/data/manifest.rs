use crate::data::SheetGeometry;
use crate::error::{SheetError, SheetResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const WALK_SHEET: &str = "walk";
pub const IDLE_SHEET: &str = "idle";

/// Describes one sprite sheet on disk and how it is cut into cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetDescriptor {
    pub name: String,
    pub path: PathBuf,
    pub columns: u32,
    pub rows: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_height: Option<u32>,
    /// Source names of the frames, in placement order (written by the composer)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<String>,
}

impl SheetDescriptor {
    pub fn new(name: &str, path: impl Into<PathBuf>, columns: u32, rows: u32) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            columns,
            rows,
            cell_width: None,
            cell_height: None,
            frames: Vec::new(),
        }
    }

    /// Geometry of this sheet once the image dimensions are known.
    pub fn geometry(&self, width: u32, height: u32) -> SheetResult<SheetGeometry> {
        SheetGeometry::new(self.columns, self.rows, width, height)
    }

    /// Write this descriptor on its own as pretty JSON (composer sidecar).
    ///
    /// The sheet path is stored relative to the sidecar's directory when the
    /// sheet lives under it, absolute otherwise, so [`SheetDescriptor::load`]
    /// finds the same file from any working directory.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SheetResult<()> {
        let path = path.as_ref();
        let mut descriptor = self.clone();
        descriptor.path = relative_to_sidecar(&self.path, path)?;

        let json = serde_json::to_string_pretty(&descriptor).map_err(|source| {
            SheetError::Manifest {
                path: path.to_path_buf(),
                source,
            }
        })?;

        fs::write(path, json).map_err(|source| SheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Wrote sheet descriptor to {:?}", path);
        Ok(())
    }

    /// Read a descriptor written by [`SheetDescriptor::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> SheetResult<Self> {
        let path = path.as_ref();
        let mut descriptor: SheetDescriptor = serde_json::from_str(&read_json(path)?)
            .map_err(|source| SheetError::Manifest {
                path: path.to_path_buf(),
                source,
            })?;

        descriptor.resolve_against(path);
        Ok(descriptor)
    }

    fn resolve_against(&mut self, json_path: &Path) {
        if let Some(base) = json_path.parent() {
            if self.path.is_relative() {
                self.path = base.join(&self.path);
            }
        }
    }
}

fn read_json(path: &Path) -> SheetResult<String> {
    fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `target` as seen from the directory holding `sidecar`.
fn relative_to_sidecar(target: &Path, sidecar: &Path) -> SheetResult<PathBuf> {
    let absolute = |path: &Path| {
        std::path::absolute(path).map_err(|source| SheetError::Io {
            path: path.to_path_buf(),
            source,
        })
    };

    let target = absolute(target)?;
    let sidecar = absolute(sidecar)?;

    Ok(match sidecar.parent() {
        Some(base) => target
            .strip_prefix(base)
            .map(Path::to_path_buf)
            .unwrap_or(target),
        None => target,
    })
}

/// Either a full manifest or a single composer sidecar.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    Sheets(SheetManifest),
    Single(SheetDescriptor),
}

/// Set of named sprite sheets used by the walk preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetManifest {
    pub sheets: Vec<SheetDescriptor>,
}

impl Default for SheetManifest {
    /// Walk sheet is 18 frames per direction, idle is a single frame per direction.
    fn default() -> Self {
        Self {
            sheets: vec![
                SheetDescriptor::new(WALK_SHEET, "Walk.png", 18, 8),
                SheetDescriptor::new(IDLE_SHEET, "idle.png", 1, 8),
            ],
        }
    }
}

impl SheetManifest {
    /// Load a manifest from a JSON file. A lone sheet descriptor (as written
    /// by the composer) loads as a one-sheet manifest.
    ///
    /// Relative sheet paths are resolved against the manifest's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> SheetResult<Self> {
        let path = path.as_ref();
        let file: ManifestFile = serde_json::from_str(&read_json(path)?).map_err(|source| {
            SheetError::Manifest {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let mut manifest = match file {
            ManifestFile::Sheets(manifest) => manifest,
            ManifestFile::Single(descriptor) => SheetManifest {
                sheets: vec![descriptor],
            },
        };

        for sheet in &mut manifest.sheets {
            sheet.resolve_against(path);
        }

        log::info!("Loaded {} sheet descriptors from {:?}", manifest.sheets.len(), path);
        Ok(manifest)
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetDescriptor> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = SheetManifest::default();

        let walk = manifest.sheet(WALK_SHEET).unwrap();
        assert_eq!((walk.columns, walk.rows), (18, 8));
        assert_eq!(walk.path, PathBuf::from("Walk.png"));

        let idle = manifest.sheet(IDLE_SHEET).unwrap();
        assert_eq!((idle.columns, idle.rows), (1, 8));

        assert!(manifest.sheet("run").is_none());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("sheets.json");
        fs::write(
            &manifest_path,
            r#"{ "sheets": [
                { "name": "walk", "path": "art/Walk.png", "columns": 18, "rows": 8 },
                { "name": "idle", "path": "/abs/idle.png", "columns": 1, "rows": 8 }
            ] }"#,
        )
        .unwrap();

        let manifest = SheetManifest::load(&manifest_path).unwrap();
        assert_eq!(manifest.sheet("walk").unwrap().path, dir.path().join("art/Walk.png"));
        assert_eq!(manifest.sheet("idle").unwrap().path, PathBuf::from("/abs/idle.png"));
        assert!(manifest.sheet("walk").unwrap().frames.is_empty());
    }

    #[test]
    fn test_load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("broken.json");
        fs::write(&manifest_path, "{ not json").unwrap();

        match SheetManifest::load(&manifest_path) {
            Err(SheetError::Manifest { path, .. }) => assert_eq!(path, manifest_path),
            other => panic!("expected Manifest error, got {:?}", other),
        }

        assert!(matches!(
            SheetManifest::load(dir.path().join("missing.json")),
            Err(SheetError::Io { .. })
        ));
    }

    #[test]
    fn test_descriptor_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let sidecar = dir.path().join("sheet.json");

        let mut descriptor = SheetDescriptor::new("sheet", dir.path().join("sheet.png"), 2, 3);
        descriptor.cell_width = Some(10);
        descriptor.cell_height = Some(10);
        descriptor.frames = vec!["a.png".to_string(), "b.png".to_string()];
        descriptor.save(&sidecar).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&sidecar).unwrap()).unwrap();
        assert_eq!(written["columns"], 2);
        assert_eq!(written["rows"], 3);
        assert_eq!(written["cell_width"], 10);
        assert_eq!(written["frames"][1], "b.png");
        assert_eq!(written["path"], "sheet.png");

        // Reading it back resolves next to the sidecar, not the working directory
        let loaded = SheetDescriptor::load(&sidecar).unwrap();
        assert_eq!(loaded.path, dir.path().join("sheet.png"));
        assert_eq!(loaded.frames, descriptor.frames);

        let manifest = SheetManifest::load(&sidecar).unwrap();
        assert_eq!(manifest.sheets, vec![loaded]);

        let geometry = descriptor.geometry(20, 30).unwrap();
        assert_eq!(geometry.cell_width(), 10);
    }
}
