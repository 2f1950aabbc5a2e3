use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

use super::models::{ManifestDto, MatchupFileDto, PatchMetaDto, RoleFileDto};
use super::{DataSource, Hero, PatchMeta};

/// Reads the content directory layout the extraction pipeline writes:
///
/// ```text
/// <root>/heroes.json
/// <root>/counter/<patch>/<slug>.json
/// <root>/counter/<patch>/patch.json
/// <root>/roles/<patch>/<slug>.json
/// ```
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsSource { root: root.into() }
    }

    fn counter_dir(&self, patch: &str) -> PathBuf {
        self.root.join("counter").join(patch)
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
        let content =
            fs::read_to_string(path).map_err(|e| AppError::IoError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::JsonError(format!("{}: {}", path.display(), e)))
    }

    /// Fallback manifest: hero slugs are the JSON file stems in the patch
    /// directory, the same listing the interactive picker autocompletes from.
    fn scan_patch_dir(&self, patch: &str) -> Result<Vec<Hero>, AppError> {
        let dir = self.counter_dir(patch);
        let entries =
            fs::read_dir(&dir).map_err(|e| AppError::IoError(format!("{}: {}", dir.display(), e)))?;

        let mut heroes = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem == "patch" {
                continue;
            }
            heroes.push(Hero {
                slug: stem.to_lowercase(),
                name: stem.to_string(),
                image: None,
            });
        }
        heroes.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(heroes)
    }
}

impl DataSource for FsSource {
    fn list_patches(&self) -> Result<Vec<String>, AppError> {
        let counter = self.root.join("counter");
        let entries = fs::read_dir(&counter)
            .map_err(|_| AppError::NoPatches(counter.display().to_string()))?;

        let mut patches: Vec<String> = entries
            .flatten()
            .filter(|e| e.path().is_dir())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        patches.sort();

        if patches.is_empty() {
            return Err(AppError::NoPatches(counter.display().to_string()));
        }
        Ok(patches)
    }

    fn patch_meta(&self, patch: &str) -> Result<PatchMeta, AppError> {
        let path = self.counter_dir(patch).join("patch.json");
        match Self::read_json::<PatchMetaDto>(&path) {
            Ok(dto) => Ok(PatchMeta {
                patch: dto.patch,
                updated_at: dto.updated_at,
            }),
            // Metadata is optional on disk.
            Err(_) => Ok(PatchMeta {
                patch: patch.to_string(),
                updated_at: None,
            }),
        }
    }

    fn manifest(&self, patch: &str) -> Result<Vec<Hero>, AppError> {
        let path = self.root.join("heroes.json");
        match Self::read_json::<ManifestDto>(&path) {
            Ok(dto) if !dto.heroes.is_empty() => Ok(dto
                .heroes
                .into_iter()
                .map(|h| Hero {
                    name: h.name.unwrap_or_else(|| h.slug.clone()),
                    slug: h.slug.to_lowercase(),
                    image: h.image,
                })
                .collect()),
            _ => self.scan_patch_dir(patch),
        }
    }

    fn matchups(&self, patch: &str, slug: &str) -> Result<MatchupFileDto, AppError> {
        let path = self.counter_dir(patch).join(format!("{}.json", slug));
        Self::read_json(&path)
    }

    fn roles(&self, patch: &str, slug: &str) -> Result<RoleFileDto, AppError> {
        let path = self
            .root
            .join("roles")
            .join(patch)
            .join(format!("{}.json", slug));
        Self::read_json(&path)
    }
}
