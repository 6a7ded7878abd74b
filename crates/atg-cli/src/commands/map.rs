//! Map Command

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use atg_core::{
    AtgConfig, Mapper, MappingSession, MatcherConfig, ScaffoldDocument, ScaffoldMetadata,
    ScaffoldRenderer,
};
use atg_infrastructure::TestCaseInput;
use clap::Args;

use super::{build_library, open_corrections, resolve_framework, resource_roots};

#[derive(Args)]
pub struct MapArgs {
    /// JSON step file
    #[arg(short, long)]
    pub steps: PathBuf,

    /// Resource directories or files to scan for keywords
    #[arg(short, long = "resources", num_args = 1..)]
    pub resources: Vec<PathBuf>,

    /// Target framework (robot, pytest, gherkin, junit)
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Test case name (defaults to the step file's name)
    #[arg(long)]
    pub name: Option<String>,

    /// Test case description
    #[arg(long)]
    pub description: Option<String>,

    /// Tag to attach to the test (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Output file or directory (defaults to the configured output_dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the scaffold to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

fn fallback_name(steps_path: &Path) -> String {
    steps_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "generated".to_string())
}

fn report(session: &MappingSession, doc: &ScaffoldDocument) {
    eprintln!("{}", session.summary());
    for placeholder in doc.unresolved_placeholders() {
        match (&placeholder.error, &placeholder.nearest_keyword) {
            (Some(error), _) => eprintln!("  step {}: {}", placeholder.order, error),
            (None, Some(nearest)) => eprintln!(
                "  step {}: '{}' unmapped (nearest '{}', {:.2})",
                placeholder.order, placeholder.action, nearest, placeholder.confidence
            ),
            (None, None) => eprintln!(
                "  step {}: '{}' unmapped",
                placeholder.order, placeholder.action
            ),
        }
    }
}

/// Resolves where the document goes, `None` for stdout. A directory
/// (`--output DIR` or the configured output_dir) receives the framework's
/// conventional file name.
fn output_path(args: &MapArgs, config: &AtgConfig, doc: &ScaffoldDocument) -> Option<PathBuf> {
    if args.stdout {
        return None;
    }
    Some(match &args.output {
        Some(output) if !output.is_dir() => output.clone(),
        Some(output) => output.join(doc.file_name()),
        None => config.output_dir.join(doc.file_name()),
    })
}

pub(crate) fn run(args: &MapArgs, config: &AtgConfig) -> Result<(MappingSession, ScaffoldDocument)> {
    let framework = resolve_framework(args.framework.as_deref(), config)?;
    let library = build_library(&resource_roots(&args.resources, config))?;
    let case = TestCaseInput::load(&args.steps)?;

    let mapper = Mapper::new(
        Arc::new(library),
        Arc::new(open_corrections(config)?),
        MatcherConfig::from_config(config, framework),
    );
    let session = mapper.run(case.steps).context("Mapping failed")?;

    let metadata = ScaffoldMetadata::new(
        args.name
            .clone()
            .or(case.name)
            .unwrap_or_else(|| fallback_name(&args.steps)),
    )
    .with_description(args.description.clone().or(case.description).unwrap_or_default())
    .with_tags(args.tags.iter().cloned());

    let renderer = ScaffoldRenderer::new()?;
    let doc = renderer.render(&session, &framework.to_string(), &metadata)?;
    Ok((session, doc))
}

pub fn execute(args: MapArgs, config: &AtgConfig) -> Result<()> {
    let (session, doc) = run(&args, config)?;

    match output_path(&args, config, &doc) {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, doc.body_text())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => {
            std::io::stdout().write_all(doc.body_text().as_bytes())?;
        }
    }

    report(&session, &doc);
    Ok(())
}
