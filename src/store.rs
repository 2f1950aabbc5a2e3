use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::analysis::role_filter::{Role, RoleMap};
use crate::error::AppError;
use crate::source::{DataSource, Hero};

/// A hero's historical record against one opponent within one patch.
#[derive(Debug, Clone)]
pub struct MatchupRecord {
    pub winrate: f64,
    #[allow(dead_code)]
    pub matches: Option<u64>,
}

/// All matchup records for one patch. Built once, published behind an
/// `Arc`, and never mutated afterwards; a patch change replaces the whole
/// dataset rather than editing it.
#[derive(Debug)]
pub struct MatchupDataset {
    pub patch: String,
    heroes: HashMap<String, HashMap<String, MatchupRecord>>,
    pub roster: Vec<Hero>,
    #[allow(dead_code)]
    pub loaded_at: DateTime<Utc>,
    /// Hero files that failed to fetch or parse during the load.
    pub skipped: usize,
}

impl MatchupDataset {
    pub fn winrate(&self, hero: &str, opponent: &str) -> Option<f64> {
        self.heroes
            .get(hero)
            .and_then(|m| m.get(opponent))
            .map(|r| r.winrate)
    }

    /// Candidate hero slugs, i.e. every hero with at least one matchup.
    pub fn hero_slugs(&self) -> impl Iterator<Item = &str> {
        self.heroes.keys().map(String::as_str)
    }

    pub fn hero_count(&self) -> usize {
        self.heroes.len()
    }

    /// Display name from the roster, slug as fallback.
    pub fn display_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.roster
            .iter()
            .find(|h| h.slug == slug)
            .map(|h| h.name.as_str())
            .unwrap_or(slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.heroes.contains_key(slug)
    }

    #[cfg(test)]
    pub fn from_winrates(patch: &str, entries: &[(&str, &str, f64)]) -> Self {
        let mut heroes: HashMap<String, HashMap<String, MatchupRecord>> = HashMap::new();
        for (hero, opponent, winrate) in entries {
            heroes.entry(hero.to_string()).or_default().insert(
                opponent.to_string(),
                MatchupRecord {
                    winrate: *winrate,
                    matches: None,
                },
            );
        }
        MatchupDataset {
            patch: patch.to_string(),
            heroes,
            roster: Vec::new(),
            loaded_at: Utc::now(),
            skipped: 0,
        }
    }
}

/// Loads and caches matchup datasets keyed by patch. Cache entries are
/// written once under the patch the load was requested for, so a load that
/// settles late can never land under another patch's key.
pub struct MatchupStore {
    cache: HashMap<String, Arc<MatchupDataset>>,
}

impl MatchupStore {
    pub fn new() -> Self {
        MatchupStore {
            cache: HashMap::new(),
        }
    }

    pub fn load(
        &mut self,
        source: &dyn DataSource,
        patch: &str,
    ) -> Result<Arc<MatchupDataset>, AppError> {
        if let Some(dataset) = self.cache.get(patch) {
            return Ok(Arc::clone(dataset));
        }

        let roster = source
            .manifest(patch)
            .map_err(|_| AppError::DataUnavailable(patch.to_string()))?;

        // Fan out one fetch per hero and join the whole batch. Individual
        // failures drop that hero only; order between fetches is irrelevant.
        let pb = ProgressBar::new(roster.len() as u64);
        pb.set_message("Loading matchups");
        let fetched: Vec<Option<(String, HashMap<String, MatchupRecord>)>> = roster
            .par_iter()
            .map(|hero| {
                let result = fetch_hero_matchups(source, patch, &hero.slug);
                pb.inc(1);
                result
            })
            .collect();
        pb.finish_and_clear();

        let mut heroes = HashMap::new();
        let mut skipped = 0usize;
        for item in fetched {
            match item {
                Some((slug, matchups)) => {
                    heroes.insert(slug, matchups);
                }
                None => skipped += 1,
            }
        }

        if heroes.is_empty() {
            return Err(AppError::DataUnavailable(patch.to_string()));
        }

        let dataset = Arc::new(MatchupDataset {
            patch: patch.to_string(),
            heroes,
            roster,
            loaded_at: Utc::now(),
            skipped,
        });
        self.cache.insert(patch.to_string(), Arc::clone(&dataset));
        Ok(dataset)
    }
}

/// One hero's matchup map, or None if the file is missing, malformed, or
/// carries no usable records. Entries with empty opponents or winrates
/// outside [0, 100] are dropped individually.
fn fetch_hero_matchups(
    source: &dyn DataSource,
    patch: &str,
    slug: &str,
) -> Option<(String, HashMap<String, MatchupRecord>)> {
    let file = source.matchups(patch, slug).ok()?;

    let hero = if file.hero.is_empty() {
        slug.to_lowercase()
    } else {
        file.hero.to_lowercase()
    };

    let mut matchups = HashMap::new();
    for entry in file.matchups {
        let opponent = entry.opponent.trim().to_lowercase();
        if opponent.is_empty() {
            continue;
        }
        let Some(winrate) = entry.winrate else {
            continue;
        };
        if !(0.0..=100.0).contains(&winrate) {
            continue;
        }
        matchups.insert(
            opponent,
            MatchupRecord {
                winrate,
                matches: entry.matches,
            },
        );
    }

    if matchups.is_empty() {
        return None;
    }
    Some((hero, matchups))
}

/// Role labels per hero, cached per patch. Disjoint cache from the matchup
/// store with the same write-once rule.
pub struct RoleIndex {
    cache: HashMap<String, Arc<RoleMap>>,
}

impl RoleIndex {
    pub fn new() -> Self {
        RoleIndex {
            cache: HashMap::new(),
        }
    }

    /// A hero whose role file is missing or malformed simply has no roles;
    /// the load itself cannot fail on individual heroes.
    pub fn load(&mut self, source: &dyn DataSource, patch: &str) -> Arc<RoleMap> {
        if let Some(map) = self.cache.get(patch) {
            return Arc::clone(map);
        }

        let roster = source.manifest(patch).unwrap_or_default();
        let fetched: Vec<Option<(String, std::collections::BTreeSet<Role>)>> = roster
            .par_iter()
            .map(|hero| {
                let file = source.roles(patch, &hero.slug).ok()?;
                let roles: std::collections::BTreeSet<Role> = file
                    .roles
                    .iter()
                    .filter_map(|r| r.parse().ok())
                    .collect();
                if roles.is_empty() {
                    return None;
                }
                Some((hero.slug.clone(), roles))
            })
            .collect();

        let map: RoleMap = fetched.into_iter().flatten().collect();
        let map = Arc::new(map);
        self.cache.insert(patch.to_string(), Arc::clone(&map));
        map
    }
}
