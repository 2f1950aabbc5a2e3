mod analysis;
mod config;
mod display;
mod error;
mod source;
mod store;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;

use analysis::role_filter::{self, Role};
use analysis::scoring::{self, EnemyPick, MAX_ENEMIES};
use config::Config;
use display::output::{
    display_error, display_info, display_patch_header, display_patches, display_recommendations,
    display_success, display_warning,
};
use error::AppError;
use source::{fs::FsSource, http::HttpSource, DataSource};
use store::{MatchupStore, RoleIndex};

/// Everything a scoring pass depends on, gathered from flags and env so
/// the scoring and filtering stay pure functions over explicit inputs.
#[derive(Debug)]
struct Session {
    patch: String,
    picks: Vec<EnemyPick>,
    roles: BTreeSet<Role>,
    top_n: usize,
}

#[derive(Parser, Debug)]
#[command(name = "dota-counter")]
#[command(about = "Rank counter picks against a weighted enemy selection", long_about = None)]
struct Args {
    /// Patch identifier (default: latest available)
    patch: Option<String>,

    /// Enemy hero slug, optionally weighted: slug or slug=0.5 (up to 5)
    #[arg(short, long = "enemy")]
    enemies: Vec<String>,

    /// Restrict results to these roles: carry, mid, offlane, support, hard-support
    #[arg(short, long = "role")]
    roles: Vec<String>,

    /// Number of recommendations to display
    #[arg(short, long, default_value = "10")]
    top: usize,

    /// Content directory (default: $DOTA_COUNTER_DATA or ~/.dota-counter/content)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Fetch data over HTTP from this base URL instead of the filesystem
    #[arg(long)]
    base_url: Option<String>,

    /// List available patches and exit
    #[arg(long)]
    list_patches: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::from_env()?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(url) = args.base_url {
        config.base_url = Some(url);
    }

    let source: Box<dyn DataSource> = match &config.base_url {
        Some(url) => Box::new(HttpSource::new(url)),
        None => Box::new(FsSource::new(&config.data_dir)),
    };

    let patches = source.list_patches()?;
    if args.list_patches {
        display_patches(&patches);
        return Ok(());
    }

    let latest = patches.last().cloned();
    let patch = args
        .patch
        .or(config.patch)
        .or(latest)
        .ok_or_else(|| AppError::NoPatches(config.data_dir.display().to_string()))?;
    if !patches.contains(&patch) {
        return Err(AppError::UnknownPatch(patch));
    }

    let session = Session {
        patch,
        picks: parse_enemy_picks(&args.enemies)?,
        roles: parse_roles(&args.roles)?,
        top_n: args.top,
    };

    display_info(&format!("Loading matchup data for patch {}...", session.patch));
    let mut store = MatchupStore::new();
    let dataset = store.load(source.as_ref(), &session.patch)?;
    display_success(&format!(
        "Loaded matchups for {} heroes",
        dataset.hero_count()
    ));
    let meta = source.patch_meta(&session.patch)?;
    display_patch_header(&meta, &dataset);

    for pick in &session.picks {
        if let Some(slug) = &pick.hero {
            if !dataset.contains(slug) {
                display_warning(&format!(
                    "No matchup data for enemy '{}' in patch {}",
                    slug, session.patch
                ));
            }
        }
    }

    let results = scoring::score(&dataset, &session.picks);

    // The role index is only needed when the filter actually narrows.
    let results = if session.roles.is_empty() || session.roles.len() == role_filter::ALL_ROLES.len()
    {
        results
    } else {
        let mut roles = RoleIndex::new();
        let role_map = roles.load(source.as_ref(), &session.patch);
        role_filter::filter(results, &role_map, &session.roles)
    };

    display_recommendations(&results, &dataset, &session.picks, session.top_n);
    Ok(())
}

/// Parses `slug` or `slug=weight` specs into the fixed five-slot pick
/// sequence, padding unused slots as empty.
fn parse_enemy_picks(specs: &[String]) -> Result<Vec<EnemyPick>, AppError> {
    if specs.is_empty() {
        return Err(AppError::NoEnemies);
    }
    if specs.len() > MAX_ENEMIES {
        return Err(AppError::TooManyEnemies(specs.len()));
    }

    let mut picks = Vec::with_capacity(MAX_ENEMIES);
    for spec in specs {
        let (slug, weight) = match spec.split_once('=') {
            None => (spec.as_str(), 1.0),
            Some((slug, raw_weight)) => {
                let weight: f64 = raw_weight
                    .parse()
                    .map_err(|_| AppError::InvalidEnemyPick(spec.clone()))?;
                if !(0.0..=1.0).contains(&weight) {
                    return Err(AppError::InvalidWeight(weight));
                }
                (slug, weight)
            }
        };
        let slug = slug.trim().to_lowercase();
        if slug.is_empty() {
            return Err(AppError::InvalidEnemyPick(spec.clone()));
        }
        picks.push(EnemyPick {
            hero: Some(slug),
            weight,
        });
    }
    while picks.len() < MAX_ENEMIES {
        picks.push(EnemyPick::empty());
    }
    Ok(picks)
}

fn parse_roles(raw: &[String]) -> Result<BTreeSet<Role>, AppError> {
    raw.iter().map(|r| r.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_spec_defaults_to_weight_one() {
        let picks = parse_enemy_picks(&["axe".to_string()]).unwrap();
        assert_eq!(picks.len(), MAX_ENEMIES);
        assert_eq!(picks[0].hero.as_deref(), Some("axe"));
        assert_eq!(picks[0].weight, 1.0);
        assert!(picks[1].hero.is_none());
    }

    #[test]
    fn enemy_spec_with_weight() {
        let picks = parse_enemy_picks(&["Zeus=0.5".to_string()]).unwrap();
        assert_eq!(picks[0].hero.as_deref(), Some("zeus"));
        assert_eq!(picks[0].weight, 0.5);
    }

    #[test]
    fn enemy_spec_rejects_bad_input() {
        assert!(matches!(parse_enemy_picks(&[]), Err(AppError::NoEnemies)));
        assert!(matches!(
            parse_enemy_picks(&["axe=abc".to_string()]),
            Err(AppError::InvalidEnemyPick(_))
        ));
        assert!(matches!(
            parse_enemy_picks(&["axe=1.5".to_string()]),
            Err(AppError::InvalidWeight(_))
        ));
        assert!(matches!(
            parse_enemy_picks(&["=0.5".to_string()]),
            Err(AppError::InvalidEnemyPick(_))
        ));

        let six: Vec<String> = (0..6).map(|i| format!("hero-{}", i)).collect();
        assert!(matches!(
            parse_enemy_picks(&six),
            Err(AppError::TooManyEnemies(6))
        ));
    }

    #[test]
    fn roles_parse_into_set() {
        let roles = parse_roles(&["carry".to_string(), "mid".to_string()]).unwrap();
        assert!(roles.contains(&Role::Carry));
        assert!(roles.contains(&Role::Mid));
        assert_eq!(roles.len(), 2);

        assert!(matches!(
            parse_roles(&["jungler".to_string()]),
            Err(AppError::UnknownRole(_))
        ));
    }
}
