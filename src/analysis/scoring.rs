use crate::store::MatchupDataset;

/// One enemy slot. Five slots exist regardless of how many enemies are
/// known; an empty slot (or a zero weight) contributes nothing.
#[derive(Debug, Clone)]
pub struct EnemyPick {
    pub hero: Option<String>,
    pub weight: f64,
}

impl EnemyPick {
    pub fn empty() -> Self {
        EnemyPick {
            hero: None,
            weight: 0.0,
        }
    }

    /// Active slots are the only ones scoring sees: a named hero with a
    /// positive weight.
    pub fn active(&self) -> Option<(&str, f64)> {
        match &self.hero {
            Some(slug) if self.weight > 0.0 => Some((slug.as_str(), self.weight)),
            _ => None,
        }
    }
}

pub const MAX_ENEMIES: usize = 5;

#[derive(Debug, Clone)]
pub struct EnemyWinrate {
    pub enemy: String,
    /// None when the candidate has no recorded matchup against this enemy.
    /// Unknown is distinct from 0%.
    pub winrate: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CandidateResult {
    pub hero: String,
    /// Combined counter score in [0, 100], higher is better against
    /// the selected enemies.
    pub combined: f64,
    pub per_enemy: Vec<EnemyWinrate>,
}

/// Winrate percentage -> log-odds. The probability is clamped to
/// [0.005, 0.995] first so 0% and 100% stay finite and a single extreme
/// matchup cannot dominate the weighted mean.
pub fn pct_to_log_odds(pct: f64) -> f64 {
    let p = (pct / 100.0).clamp(0.005, 0.995);
    (p / (1.0 - p)).ln()
}

/// Log-odds -> winrate percentage via the logistic function.
pub fn log_odds_to_pct(lo: f64) -> f64 {
    100.0 / (1.0 + (-lo).exp())
}

/// Scores every hero in the dataset against the weighted enemy selection.
///
/// Per candidate, known matchup winrates are converted to log-odds and
/// averaged with the slot weights, renormalizing over the weights that
/// actually matched data; enemies the candidate has no data against appear
/// in the breakdown as unknown and neither help nor hurt. Candidates with
/// no data against any selected enemy are unrankable and omitted, as are
/// the selected enemies themselves.
///
/// Returns candidates sorted by combined score descending, ties broken by
/// slug ascending. An empty result is a normal outcome, not an error.
pub fn score(dataset: &MatchupDataset, picks: &[EnemyPick]) -> Vec<CandidateResult> {
    let enemies: Vec<(&str, f64)> = picks.iter().filter_map(|p| p.active()).collect();
    if enemies.is_empty() {
        return Vec::new();
    }

    let enemy_set: std::collections::HashSet<&str> = enemies.iter().map(|(e, _)| *e).collect();

    let mut results: Vec<CandidateResult> = Vec::new();
    for hero in dataset.hero_slugs() {
        if enemy_set.contains(hero) {
            continue;
        }

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut per_enemy = Vec::with_capacity(enemies.len());

        for (enemy, weight) in &enemies {
            match dataset.winrate(hero, enemy) {
                Some(winrate) => {
                    weighted_sum += weight * pct_to_log_odds(winrate);
                    weight_total += weight;
                    per_enemy.push(EnemyWinrate {
                        enemy: enemy.to_string(),
                        winrate: Some(winrate),
                    });
                }
                None => {
                    per_enemy.push(EnemyWinrate {
                        enemy: enemy.to_string(),
                        winrate: None,
                    });
                }
            }
        }

        if weight_total <= 0.0 {
            continue;
        }

        results.push(CandidateResult {
            hero: hero.to_string(),
            combined: log_odds_to_pct(weighted_sum / weight_total),
            per_enemy,
        });
    }

    results.sort_by(|a, b| {
        b.combined
            .partial_cmp(&a.combined)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.hero.cmp(&b.hero))
    });
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MatchupDataset;

    fn pick(slug: &str, weight: f64) -> EnemyPick {
        EnemyPick {
            hero: Some(slug.to_string()),
            weight,
        }
    }

    fn dataset(entries: &[(&str, &str, f64)]) -> MatchupDataset {
        MatchupDataset::from_winrates("7.39d", entries)
    }

    #[test]
    fn log_odds_round_trip() {
        for pct in [1.0, 10.0, 42.5, 50.0, 55.0, 73.2, 99.0] {
            let back = log_odds_to_pct(pct_to_log_odds(pct));
            assert!((back - pct).abs() < 1e-9, "{} -> {}", pct, back);
        }
    }

    #[test]
    fn boundary_winrates_stay_finite() {
        assert!(pct_to_log_odds(0.0).is_finite());
        assert!(pct_to_log_odds(100.0).is_finite());
        // Both clamp to the 0.5%..99.5% probability band.
        assert!((pct_to_log_odds(0.0) - pct_to_log_odds(0.5)).abs() < 1e-12);
        assert!((pct_to_log_odds(100.0) - pct_to_log_odds(99.5)).abs() < 1e-12);
    }

    #[test]
    fn single_matchup_reproduces_winrate() {
        let data = dataset(&[("juggernaut", "axe", 55.0)]);
        let results = score(&data, &[pick("axe", 1.0)]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].hero, "juggernaut");
        assert!((results[0].combined - 55.0).abs() < 1e-9);
    }

    #[test]
    fn weighted_two_enemy_combination() {
        let data = dataset(&[("juggernaut", "axe", 55.0), ("juggernaut", "zeus", 40.0)]);
        let results = score(&data, &[pick("axe", 1.0), pick("zeus", 0.5)]);

        assert_eq!(results.len(), 1);
        let expected =
            log_odds_to_pct((pct_to_log_odds(55.0) + 0.5 * pct_to_log_odds(40.0)) / 1.5);
        assert!((results[0].combined - expected).abs() < 1e-9);
        assert!((results[0].combined - 49.97).abs() < 0.05);
    }

    #[test]
    fn selected_enemies_never_appear_as_candidates() {
        let data = dataset(&[
            ("axe", "zeus", 52.0),
            ("juggernaut", "zeus", 55.0),
            ("zeus", "axe", 48.0),
        ]);
        let results = score(&data, &[pick("zeus", 1.0), pick("axe", 0.5)]);

        assert!(results.iter().all(|r| r.hero != "zeus" && r.hero != "axe"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].hero, "juggernaut");
    }

    #[test]
    fn missing_data_renormalizes_instead_of_penalizing() {
        // Juggernaut has data against axe only; the zeus slot must not
        // drag the score, and the breakdown must mark it unknown.
        let data = dataset(&[("juggernaut", "axe", 55.0)]);

        let with_both = score(&data, &[pick("axe", 1.0), pick("zeus", 1.0)]);
        let axe_only = score(&data, &[pick("axe", 1.0)]);

        assert_eq!(with_both.len(), 1);
        assert!((with_both[0].combined - axe_only[0].combined).abs() < 1e-12);

        let zeus_entry = with_both[0]
            .per_enemy
            .iter()
            .find(|pe| pe.enemy == "zeus")
            .unwrap();
        assert!(zeus_entry.winrate.is_none());
    }

    #[test]
    fn candidate_without_any_evidence_is_dropped() {
        let data = dataset(&[("juggernaut", "axe", 55.0), ("lion", "pudge", 60.0)]);
        let results = score(&data, &[pick("axe", 1.0)]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].hero, "juggernaut");
    }

    #[test]
    fn zero_weight_slot_is_equivalent_to_empty() {
        let data = dataset(&[("juggernaut", "axe", 55.0), ("zeus", "axe", 50.0)]);
        let results = score(&data, &[pick("axe", 1.0), pick("zeus", 0.0)]);

        // The zero-weight zeus slot joins neither the enemy set nor the
        // breakdown, and zeus stays rankable as a candidate.
        assert!(results.iter().any(|r| r.hero == "zeus"));
        assert!(results.iter().all(|r| r.per_enemy.len() == 1));
    }

    #[test]
    fn no_active_picks_yields_empty_output() {
        let data = dataset(&[("juggernaut", "axe", 55.0)]);

        assert!(score(&data, &[]).is_empty());
        assert!(score(&data, &[EnemyPick::empty()]).is_empty());
        assert!(score(&data, &[pick("axe", 0.0)]).is_empty());
    }

    #[test]
    fn ordering_is_score_descending_then_slug() {
        let data = dataset(&[
            ("lion", "axe", 60.0),
            ("juggernaut", "axe", 55.0),
            ("zeus", "axe", 55.0),
        ]);
        let results = score(&data, &[pick("axe", 1.0)]);

        let slugs: Vec<&str> = results.iter().map(|r| r.hero.as_str()).collect();
        assert_eq!(slugs, vec!["lion", "juggernaut", "zeus"]);
    }
}
