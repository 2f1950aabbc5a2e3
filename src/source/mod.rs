pub mod fs;
pub mod http;
pub mod models;

use crate::error::AppError;
use models::{MatchupFileDto, RoleFileDto};

/// Manifest entry for one hero. Immutable reference data; `image` is an
/// opaque resource path the display layer never dereferences.
#[derive(Debug, Clone)]
pub struct Hero {
    pub slug: String,
    pub name: String,
    #[allow(dead_code)]
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PatchMeta {
    pub patch: String,
    pub updated_at: Option<chrono::NaiveDate>,
}

/// Transport seam for the per-patch documents. Everything is addressed by
/// (patch, hero slug) and every fetch may fail independently; the store
/// decides which failures are recoverable. `Sync` because loads fan out
/// across a thread pool.
pub trait DataSource: Sync {
    /// Available patch identifiers, sorted ascending (latest last).
    fn list_patches(&self) -> Result<Vec<String>, AppError>;

    /// Patch metadata. Sources without a metadata document synthesize one
    /// from the patch string itself.
    fn patch_meta(&self, patch: &str) -> Result<PatchMeta, AppError>;

    /// Hero manifest for a patch, driving the fan-out load.
    fn manifest(&self, patch: &str) -> Result<Vec<Hero>, AppError>;

    fn matchups(&self, patch: &str, slug: &str) -> Result<MatchupFileDto, AppError>;

    fn roles(&self, patch: &str, slug: &str) -> Result<RoleFileDto, AppError>;
}
