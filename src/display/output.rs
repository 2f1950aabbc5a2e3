use colored::*;
use tabled::{builder::Builder, settings::Style};

use crate::analysis::scoring::{CandidateResult, EnemyPick};
use crate::source::PatchMeta;
use crate::store::MatchupDataset;

pub fn display_recommendations(
    results: &[CandidateResult],
    dataset: &MatchupDataset,
    picks: &[EnemyPick],
    top_n: usize,
) {
    let shown = std::cmp::min(top_n, results.len());
    println!(
        "\n{}",
        format!("⚔️  Counter Picks (Top {})", shown).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());

    if results.is_empty() {
        println!(
            "{}",
            "No candidates had usable matchup data against the selected enemies".yellow()
        );
        return;
    }

    let active: Vec<(&str, f64)> = picks.iter().filter_map(|p| p.active()).collect();

    // Per-enemy columns are dynamic, so the table is built row by row.
    let mut builder = Builder::default();
    let mut header = vec!["#".to_string(), "Hero".to_string(), "Score".to_string()];
    for (enemy, weight) in &active {
        header.push(format!("vs {} (w={})", enemy, weight));
    }
    builder.push_record(header);

    for (idx, result) in results.iter().take(top_n).enumerate() {
        let mut row = vec![
            format!("{}", idx + 1),
            dataset.display_name(&result.hero).to_string(),
            format!("{:.2}%", result.combined),
        ];
        for (enemy, _) in &active {
            let cell = result
                .per_enemy
                .iter()
                .find(|pe| pe.enemy == *enemy)
                .and_then(|pe| pe.winrate)
                .map(|wr| format!("{:.2}%", wr))
                .unwrap_or_else(|| "—".to_string());
            row.push(cell);
        }
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("{}", table);

    println!("\n{}", "Interpretation".bold().yellow());
    println!("• Score: weighted log-odds combination of the candidate's winrates");
    println!("• vs columns: the candidate's historical winrate against that enemy");
    println!("• —: no recorded matchup; it neither helps nor hurts the score\n");
}

pub fn display_patch_header(meta: &PatchMeta, dataset: &MatchupDataset) {
    let mut line = format!("Patch {}", meta.patch);
    if let Some(date) = meta.updated_at {
        line.push_str(&format!(" · data updated {}", date.format("%Y-%m-%d")));
    }
    println!("{}", line.bold());

    if dataset.skipped > 0 {
        display_warning(&format!(
            "{} hero file(s) could not be read and were skipped",
            dataset.skipped
        ));
    }
}

pub fn display_patches(patches: &[String]) {
    println!("{}", "Available patches:".bold().cyan());
    for patch in patches {
        println!("  {}", patch);
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}
