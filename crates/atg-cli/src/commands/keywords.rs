//! Keywords Command

use std::path::PathBuf;

use anyhow::Result;
use atg_core::{AtgConfig, KeywordEntry, KeywordLibrary};
use clap::Args;

use super::{build_library, resolve_framework, resource_roots};

#[derive(Args)]
pub struct KeywordsArgs {
    /// Resource directories or files to scan
    #[arg(short, long = "resources", num_args = 1..)]
    pub resources: Vec<PathBuf>,

    /// Only list keywords of this framework
    #[arg(short, long)]
    pub framework: Option<String>,
}

fn format_entry(entry: &KeywordEntry) -> String {
    format!(
        "{:<8} {:<40} {:>2}  {}",
        entry.framework.to_string(),
        entry.name,
        entry.arity,
        entry.source_ref
    )
}

fn listing<'a>(library: &'a KeywordLibrary, framework: Option<atg_core::Framework>) -> Vec<&'a KeywordEntry> {
    match framework {
        Some(framework) => library.entries(framework).collect(),
        None => library.iter().collect(),
    }
}

pub fn execute(args: KeywordsArgs, config: &AtgConfig) -> Result<()> {
    let framework = match args.framework.as_deref() {
        Some(tag) => Some(resolve_framework(Some(tag), config)?),
        None => None,
    };
    let library = build_library(&resource_roots(&args.resources, config))?;

    let entries = listing(&library, framework);
    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    eprintln!("{} keywords", entries.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atg_core::{Framework, ResourceDefinition};

    #[test]
    fn test_listing_filters_by_framework() {
        let library = KeywordLibrary::build(vec![
            ResourceDefinition::new("Click Login Button", 0, Framework::Robot, "common.robot"),
            ResourceDefinition::new("click_login_button", 1, Framework::Pytest, "keywords/login.py"),
        ])
        .unwrap();

        assert_eq!(listing(&library, None).len(), 2);
        let robot = listing(&library, Some(Framework::Robot));
        assert_eq!(robot.len(), 1);
        assert!(format_entry(robot[0]).starts_with("robot    Click Login Button"));
    }
}
