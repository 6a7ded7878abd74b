//! Python keyword modules and step-definition files.
//!
//! Top-level public functions become `Pytest` keywords. Functions decorated
//! with a BDD step decorator (`@given`, `@when`, `@then`, `@step`, bare or
//! module-qualified) become `Gherkin` keywords named by their step pattern
//! instead. Fixtures, test functions and private helpers are skipped.

use atg_core::error::Result;
use atg_core::{Framework, ResourceDefinition, StepKind};
use regex::Regex;

use super::pattern;

pub struct PythonParser {
    def_line: Regex,
    step_decorator: Regex,
    step_param: Regex,
}

/// Text from just after an opening bracket up to its matching close,
/// pulling in following lines as needed. Returns the text and the index of
/// the last line consumed.
fn balanced_tail(lines: &[&str], start: usize, first: &str) -> (String, usize) {
    let mut text = String::new();
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut index = start;
    let mut current = first;

    loop {
        for c in current.chars() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None => match c {
                    '"' | '\'' => quote = Some(c),
                    '(' | '[' | '{' => depth += 1,
                    ')' | ']' | '}' => {
                        depth -= 1;
                        if depth == 0 {
                            return (text, index);
                        }
                    }
                    _ => {}
                },
            }
            text.push(c);
        }
        if index + 1 >= lines.len() {
            return (text, index);
        }
        index += 1;
        current = lines[index];
        text.push(' ');
    }
}

/// Splits a parameter list on top-level commas.
fn split_params(params: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut begin = 0;

    for (i, c) in params.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    parts.push(&params[begin..i]);
                    begin = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(&params[begin..]);
    parts
}

/// Positional parameters without defaults, ignoring `self`/`cls`.
fn positional_arity(params: &str) -> usize {
    let mut arity = 0;
    for param in split_params(params) {
        let param = param.trim();
        if param.is_empty() || param == "/" || param.starts_with("**") {
            continue;
        }
        if param.starts_with('*') {
            break;
        }
        let name = param.split([':', '=']).next().unwrap_or_default().trim();
        if name == "self" || name == "cls" || param.contains('=') {
            continue;
        }
        arity += 1;
    }
    arity
}

fn is_keyword_function(name: &str) -> bool {
    !name.starts_with('_') && name != "test" && !name.starts_with("test_")
}

impl PythonParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            def_line: pattern(r"^(?:async\s+)?def\s+([A-Za-z_]\w*)\s*\(")?,
            step_decorator: pattern(
                r#"^@(?:\w+\.)*(given|when|then|step)\s*\((?:\s*[\w.]+\()?\s*[rRuU]?(?:"([^"]*)"|'([^']*)')"#,
            )?,
            step_param: pattern(r"\{[^{}]*\}")?,
        })
    }

    /// Step pattern and step type of a step decorator.
    fn step_pattern(&self, decorator: &str) -> Option<(String, Option<StepKind>)> {
        let caps = self.step_decorator.captures(decorator)?;
        let kind = caps.get(1).and_then(|m| StepKind::from_decorator(m.as_str()));
        caps.get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|p| (p, kind))
    }

    /// Step definitions of one function. A pattern registered under several
    /// decorators is one definition; it keeps a step type only when all of
    /// them agree.
    fn step_definitions(&self, decorators: &[String]) -> Vec<(String, Option<StepKind>)> {
        let mut steps: Vec<(String, Option<StepKind>)> = Vec::new();
        for (pattern, kind) in decorators.iter().filter_map(|d| self.step_pattern(d)) {
            match steps.iter_mut().find(|(existing, _)| *existing == pattern) {
                Some((_, existing_kind)) => {
                    if *existing_kind != kind {
                        *existing_kind = None;
                    }
                }
                None => steps.push((pattern, kind)),
            }
        }
        steps
    }

    pub fn parse(&self, content: &str, source_ref: &str) -> Vec<ResourceDefinition> {
        let lines: Vec<&str> = content.lines().collect();
        let mut definitions = Vec::new();
        let mut decorators: Vec<String> = Vec::new();
        let mut index = 0;

        while index < lines.len() {
            let line = lines[index];
            let starts_top_level = !line.starts_with([' ', '\t']);
            let trimmed = line.trim();

            if !starts_top_level || trimmed.is_empty() || trimmed.starts_with('#') {
                index += 1;
                continue;
            }

            if trimmed.starts_with('@') {
                let decorator = match trimmed.find('(') {
                    Some(open) => {
                        let (tail, last) = balanced_tail(&lines, index, &trimmed[open + 1..]);
                        index = last;
                        format!("{}({})", &trimmed[..open], tail)
                    }
                    None => trimmed.to_string(),
                };
                decorators.push(decorator);
                index += 1;
                continue;
            }

            if let Some(caps) = self.def_line.captures(line) {
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let after_paren = caps.get(0).map(|m| &line[m.end()..]).unwrap_or_default();
                let (params, last) = balanced_tail(&lines, index, after_paren);
                index = last;

                let steps = self.step_definitions(&decorators);
                let is_fixture = decorators.iter().any(|d| d.contains("fixture"));

                if !steps.is_empty() {
                    for (step, kind) in steps {
                        let arity = self.step_param.find_iter(&step).count();
                        definitions.push(
                            ResourceDefinition::new(step, arity, Framework::Gherkin, source_ref)
                                .with_step_kind(kind),
                        );
                    }
                } else if !is_fixture && is_keyword_function(name) {
                    definitions.push(ResourceDefinition::new(
                        name,
                        positional_arity(&params),
                        Framework::Pytest,
                        source_ref,
                    ));
                }
            }

            decorators.clear();
            index += 1;
        }

        definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<(String, usize, Framework)> {
        PythonParser::new()
            .unwrap()
            .parse(content, "keywords/login.py")
            .into_iter()
            .map(|d| (d.keyword_name, d.arity, d.framework))
            .collect()
    }

    #[test]
    fn test_public_functions_become_pytest_keywords() {
        let defs = parse(
            r##"
import pytest


def click_login_button(page):
    page.click("#login")


def enter_credentials(page, user: str, password: str = "secret", *args, timeout=5, **kw):
    pass


async def wait_for_dashboard(
    page,
    selector: dict[str, int],
):
    pass


def _helper():
    pass


def test_something():
    pass


@pytest.fixture
def browser():
    pass


class LoginPage:
    def open(self):
        pass
"##,
        );

        assert_eq!(
            defs,
            vec![
                ("click_login_button".to_string(), 1, Framework::Pytest),
                ("enter_credentials".to_string(), 2, Framework::Pytest),
                ("wait_for_dashboard".to_string(), 2, Framework::Pytest),
            ]
        );
    }

    #[test]
    fn test_step_decorators_become_gherkin_keywords() {
        let defs = parse(
            r#"
from behave import given, when, then
from pytest_bdd import parsers
import pytest_bdd


@given("the user is on the login page")
def step_login_page(context):
    pass


@when('the user adds {count:d} items of {sku}')
def step_add_items(context, count, sku):
    pass


@pytest_bdd.then(parsers.parse("the cart shows {total}"))
def cart_total(total):
    pass


@then(
    "the dashboard is displayed"
)
def dashboard(context):
    pass
"#,
        );

        assert_eq!(
            defs,
            vec![
                ("the user is on the login page".to_string(), 0, Framework::Gherkin),
                ("the user adds {count:d} items of {sku}".to_string(), 2, Framework::Gherkin),
                ("the cart shows {total}".to_string(), 1, Framework::Gherkin),
                ("the dashboard is displayed".to_string(), 0, Framework::Gherkin),
            ]
        );
    }

    #[test]
    fn test_step_decorators_record_step_type() {
        let defs = PythonParser::new().unwrap().parse(
            r#"
@given("the user is on the login page")
def on_login_page(context):
    pass


@step("a note is logged")
def log_note(context):
    pass


@then("the dashboard is displayed")
def dashboard(context):
    pass
"#,
            "steps/login_steps.py",
        );
        let kinds: Vec<Option<StepKind>> = defs.iter().map(|d| d.step_kind).collect();
        assert_eq!(kinds, vec![Some(StepKind::Given), None, Some(StepKind::Then)]);
    }

    #[test]
    fn test_stacked_decorators_with_one_pattern_are_one_definition() {
        let defs = PythonParser::new().unwrap().parse(
            r#"
@given("the user is logged in")
@when("the user is logged in")
def logged_in(context):
    pass


@when("the user opens {page}")
@when("the user visits {page}")
def open_page(context, page):
    pass
"#,
            "steps/login_steps.py",
        );

        let summary: Vec<(&str, usize, Option<StepKind>)> = defs
            .iter()
            .map(|d| (d.keyword_name.as_str(), d.arity, d.step_kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("the user is logged in", 0, None),
                ("the user opens {page}", 1, Some(StepKind::When)),
                ("the user visits {page}", 1, Some(StepKind::When)),
            ]
        );
    }

    #[test]
    fn test_positional_arity() {
        assert_eq!(positional_arity(""), 0);
        assert_eq!(positional_arity("self, a, b"), 2);
        assert_eq!(positional_arity("a, /, b=1, *, c"), 1);
        assert_eq!(positional_arity("items: list[tuple[int, str]], flag=False"), 1);
    }
}
