//! Ranks the bundled fixture regulations against the fixture profile and prints the report.

use std::path::PathBuf;

use anyhow::Result;
use regrisk::model::{load_profile, load_regulations};
use regrisk::report::{build_report, format_report};
use regrisk::scoring::RelevanceScorer;

fn main() -> Result<()> {
    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");

    let regulations = load_regulations(&fixtures.join("regulations.json"))?;
    let profile = load_profile(&fixtures.join("profile.json"))?;

    let ranked = RelevanceScorer::default().rank(&regulations, &profile);
    for entry in &ranked {
        println!(
            "{:>2}. {:<12} {:.4} {}",
            entry.position, entry.regulation.id, entry.score.total_score, entry.score.risk_level
        );
    }
    println!();

    print!("{}", format_report(&build_report(&ranked, &profile)));
    Ok(())
}
