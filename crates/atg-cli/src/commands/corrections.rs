//! Corrections Command

use anyhow::Result;
use atg_core::AtgConfig;
use atg_core::correction::{Correction, CorrectionRepository};
use clap::Args;

use super::open_corrections;

#[derive(Args)]
pub struct CorrectionsArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

fn format_line(correction: &Correction) -> String {
    format!(
        "{}  '{}' -> {}",
        correction.recorded_at.format("%Y-%m-%d %H:%M:%S"),
        correction.signature,
        correction.keyword
    )
}

pub fn execute(args: CorrectionsArgs, config: &AtgConfig) -> Result<()> {
    let repo = open_corrections(config)?;
    let corrections = repo.list()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&corrections)?);
        return Ok(());
    }

    if corrections.is_empty() {
        eprintln!("No corrections recorded in {}", repo.path().display());
        return Ok(());
    }
    for correction in &corrections {
        println!("{}", format_line(correction));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let correction = Correction::new("Press the sign in button", "Click Login Button");
        let line = format_line(&correction);
        assert!(line.ends_with("  'press the sign in button' -> Click Login Button"));
    }
}
