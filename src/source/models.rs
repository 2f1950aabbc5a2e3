use serde::Deserialize;

// Per-hero matchup file, one per (patch, hero).
// Produced upstream by the snapshot parser; `date` and `disadvantage` are
// present in real files but opaque to the engine.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct MatchupFileDto {
    pub hero: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub matchups: Vec<MatchupEntryDto>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct MatchupEntryDto {
    #[serde(default)]
    pub opponent: String,
    pub winrate: Option<f64>,
    #[serde(default)]
    pub disadvantage: Option<f64>,
    #[serde(default)]
    pub matches: Option<u64>,
}

// Per-hero role file. `counts` carries the raw match tallies the role
// extractor thresholded on; the engine only needs the resulting labels.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct RoleFileDto {
    pub hero: String,
    #[serde(default)]
    pub patch: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestDto {
    #[serde(default)]
    pub heroes: Vec<HeroEntryDto>,
}

#[derive(Debug, Deserialize)]
pub struct HeroEntryDto {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PatchMetaDto {
    pub patch: String,
    #[serde(default)]
    pub updated_at: Option<chrono::NaiveDate>,
}
