//! Single render entry point dispatching over the framework enum.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use super::document::{Placeholder, ScaffoldDocument, ScaffoldMetadata};
use super::syntax;
use super::templates;
use crate::error::Result;
use crate::framework::{Framework, junit_class_name, name_words, pascal_case};
use crate::mapping::MappingSession;
use crate::matcher::{CORRECTION_SOURCE_REF, MappingDecision};

/// Values handed to the document templates. Every string is already valid
/// in the target syntax.
#[derive(Debug, Serialize)]
struct TemplateContext {
    test_name: String,
    suite_name: String,
    description: String,
    module_doc: String,
    display_name: String,
    class_name: String,
    function_name: String,
    imports: Vec<String>,
    tags: Vec<String>,
    lines: Vec<String>,
}

/// Renders mapping sessions into framework-idiomatic scaffolds.
///
/// Rendering is pure and idempotent: the same session, framework and
/// metadata always produce the same `body_text`.
pub struct ScaffoldRenderer {
    env: Environment<'static>,
}

impl ScaffoldRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for framework in [
            Framework::Robot,
            Framework::Pytest,
            Framework::Gherkin,
            Framework::Junit,
        ] {
            env.add_template(template_name(framework), template_source(framework))?;
        }

        Ok(Self { env })
    }

    /// Renders `session` for the framework named by `framework_tag`.
    ///
    /// # Errors
    ///
    /// `AtgError::UnsupportedFramework` for an unknown tag.
    pub fn render(
        &self,
        session: &MappingSession,
        framework_tag: &str,
        metadata: &ScaffoldMetadata,
    ) -> Result<ScaffoldDocument> {
        let framework = Framework::parse_tag(framework_tag)?;
        self.render_framework(session, framework, metadata)
    }

    /// Renders `session` for `framework`.
    ///
    /// A keyword can only be invoked in its own framework. When the session
    /// was mapped for another framework, its mapped steps become
    /// placeholders naming the keyword that matched.
    pub fn render_framework(
        &self,
        session: &MappingSession,
        framework: Framework,
        metadata: &ScaffoldMetadata,
    ) -> Result<ScaffoldDocument> {
        if framework != session.framework() && session.decisions().iter().any(|d| d.is_mapped()) {
            tracing::warn!(
                "Session was mapped for {} but is rendered as {}; its mapped steps become placeholders",
                session.framework(),
                framework
            );
        }

        let mut lines = Vec::new();
        let mut placeholders = Vec::new();
        let mut previous_kind = None;

        for decision in session.decisions() {
            match &decision.matched_keyword {
                Some(keyword) if keyword.framework == framework => {
                    lines.push(syntax::statement(framework, keyword, previous_kind));
                    previous_kind = Some(syntax::gherkin_step_kind(keyword, previous_kind));
                }
                Some(keyword) => {
                    let foreign = MappingDecision::unmapped(
                        decision.step.clone(),
                        decision.confidence,
                        decision.rule,
                        Some(keyword.name.clone()),
                    );
                    lines.extend(syntax::placeholder(framework, &foreign));
                    placeholders.push(Placeholder::from(&foreign));
                }
                None => {
                    lines.extend(syntax::placeholder(framework, decision));
                    placeholders.push(Placeholder::from(decision));
                }
            }
        }

        let mapped = session
            .decisions()
            .iter()
            .filter_map(|d| d.matched_keyword.as_ref())
            .filter(|k| k.framework == framework);
        let context = build_context(
            framework,
            metadata,
            syntax::imports(framework, mapped, CORRECTION_SOURCE_REF),
            lines,
        );

        let body_text = self.env.get_template(template_name(framework))?.render(&context)?;

        tracing::info!(
            framework = %framework,
            placeholders = placeholders.len(),
            "Rendered scaffold '{}'",
            metadata.test_name
        );

        Ok(ScaffoldDocument::new(
            framework,
            metadata.test_name.clone(),
            body_text,
            placeholders,
        ))
    }
}

fn template_name(framework: Framework) -> &'static str {
    match framework {
        Framework::Robot => "robot",
        Framework::Pytest => "pytest",
        Framework::Gherkin => "gherkin",
        Framework::Junit => "junit",
    }
}

fn template_source(framework: Framework) -> &'static str {
    match framework {
        Framework::Robot => templates::ROBOT,
        Framework::Pytest => templates::PYTEST,
        Framework::Gherkin => templates::GHERKIN,
        Framework::Junit => templates::JUNIT,
    }
}

fn build_context(
    framework: Framework,
    metadata: &ScaffoldMetadata,
    imports: Vec<String>,
    lines: Vec<String>,
) -> TemplateContext {
    let name = match syntax::single_line(&metadata.test_name) {
        n if n.is_empty() => "Generated".to_string(),
        n => n,
    };
    let description = match syntax::single_line(&metadata.description) {
        d if d.is_empty() => name.clone(),
        d => d,
    };
    let suite = metadata
        .suite_name
        .as_deref()
        .map(syntax::single_line)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| name.clone());

    let words = name_words(&name);
    let (test_name, suite_name, description) = match framework {
        Framework::Robot => (
            syntax::robot_cell(&name),
            suite,
            syntax::robot_cell(&description),
        ),
        Framework::Pytest => (name.clone(), suite, syntax::docstring_text(&description)),
        Framework::Gherkin => (name.clone(), suite, syntax::gherkin_text(&description)),
        Framework::Junit => (
            name.clone(),
            suite,
            syntax::comment_text(&description, Framework::Junit),
        ),
    };

    let function_name = match framework {
        Framework::Junit => format!("test{}", pascal_case(&words)),
        _ => format!("test_{}", words.join("_")),
    };

    TemplateContext {
        module_doc: syntax::docstring_text(&format!("Generated scaffold for {}.", name)),
        display_name: syntax::quoted(&name),
        class_name: junit_class_name(&words),
        function_name,
        tags: syntax::tags(framework, &metadata.tags),
        test_name,
        suite_name,
        description,
        imports,
        lines,
    }
}
