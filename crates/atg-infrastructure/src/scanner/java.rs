//! Java keyword classes: `public static` methods are JUnit keywords.

use atg_core::error::Result;
use atg_core::{Framework, ResourceDefinition};
use regex::Regex;

use super::pattern;

pub struct JavaParser {
    method: Regex,
    line_comment: Regex,
    block_comment: Regex,
}

fn parameter_count(params: &str) -> usize {
    let mut count = 0;
    let mut depth = 0usize;
    let mut seen_token = false;
    for c in params.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                count += 1;
                seen_token = false;
            }
            c if !c.is_whitespace() => seen_token = true,
            _ => {}
        }
    }
    if seen_token { count + 1 } else { count }
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            method: pattern(
                r"\bpublic\s+(?:final\s+)?static\s+(?:final\s+)?(?:<[^>]*>\s*)?[\w.$<>\[\], ?]+?\s+([A-Za-z_$][\w$]*)\s*\(([^)]*)\)",
            )?,
            line_comment: pattern(r"//[^\n]*")?,
            block_comment: pattern(r"(?s)/\*.*?\*/")?,
        })
    }

    pub fn parse(&self, content: &str, source_ref: &str) -> Vec<ResourceDefinition> {
        let without_blocks = self.block_comment.replace_all(content, " ");
        let code = self.line_comment.replace_all(&without_blocks, " ");

        self.method
            .captures_iter(&code)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str();
                if name == "main" {
                    return None;
                }
                let arity = parameter_count(caps.get(2).map_or("", |m| m.as_str()));
                Some(ResourceDefinition::new(name, arity, Framework::Junit, source_ref))
            })
            .collect()
    }
}
