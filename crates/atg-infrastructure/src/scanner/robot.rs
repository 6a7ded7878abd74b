//! Robot Framework resource files (`.robot`, `.resource`).

use atg_core::error::Result;
use atg_core::{Framework, ResourceDefinition};
use regex::Regex;

use super::pattern;

/// `${name}` without a default value.
fn is_mandatory_argument(cell: &str) -> bool {
    cell.starts_with("${") && !cell.contains('=')
}

struct PendingKeyword {
    name: String,
    arity: usize,
    in_arguments: bool,
}

fn flush(pending: Option<PendingKeyword>, source_ref: &str, out: &mut Vec<ResourceDefinition>) {
    if let Some(k) = pending {
        out.push(ResourceDefinition::new(k.name, k.arity, Framework::Robot, source_ref));
    }
}

pub struct RobotParser {
    /// Cells are separated by a tab or two or more spaces.
    cell_separator: Regex,
}

impl RobotParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            cell_separator: pattern(r"\t+| {2,}")?,
        })
    }

    fn cells<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.cell_separator
            .split(line.trim())
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Extracts the keywords defined under `*** Keywords ***`.
    pub fn parse(&self, content: &str, source_ref: &str) -> Vec<ResourceDefinition> {
        let mut definitions = Vec::new();
        let mut in_keywords = false;
        let mut current: Option<PendingKeyword> = None;

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.starts_with('*') {
                flush(current.take(), source_ref, &mut definitions);
                let section = trimmed.trim_matches(|c: char| c == '*' || c.is_whitespace());
                in_keywords = section.to_lowercase().starts_with("keyword");
                continue;
            }
            if !in_keywords || trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if !line.starts_with([' ', '\t']) {
                flush(current.take(), source_ref, &mut definitions);
                if let Some(name) = self.cells(line).first() {
                    current = Some(PendingKeyword {
                        name: name.to_string(),
                        arity: 0,
                        in_arguments: false,
                    });
                }
                continue;
            }

            let Some(keyword) = current.as_mut() else {
                continue;
            };
            let row = self.cells(line);
            match row.first().copied() {
                Some(setting) if setting.eq_ignore_ascii_case("[arguments]") => {
                    keyword.in_arguments = true;
                    keyword.arity += row[1..].iter().filter(|c| is_mandatory_argument(c)).count();
                }
                Some("...") if keyword.in_arguments => {
                    keyword.arity += row[1..].iter().filter(|c| is_mandatory_argument(c)).count();
                }
                _ => keyword.in_arguments = false,
            }
        }
        flush(current.take(), source_ref, &mut definitions);

        definitions
    }
}
