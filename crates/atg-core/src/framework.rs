//! Target test framework syntaxes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::AtgError;
use crate::normalize::tokens_in_order;

/// The closed set of scaffold syntaxes the renderer can emit.
///
/// Tags parse case-insensitively, including a few common aliases
/// (`robotframework`, `python`, `cucumber`, `java`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Framework {
    /// Robot Framework keyword-call syntax
    #[default]
    #[strum(to_string = "robot", serialize = "robotframework")]
    Robot,
    /// xUnit-style function syntax (pytest)
    #[strum(to_string = "pytest", serialize = "python", serialize = "xunit")]
    Pytest,
    /// Gherkin scenario/step syntax
    #[strum(
        to_string = "gherkin",
        serialize = "cucumber",
        serialize = "behave",
        serialize = "feature"
    )]
    Gherkin,
    /// JVM unit-test class syntax (JUnit 5)
    #[strum(to_string = "junit", serialize = "java", serialize = "jvm")]
    Junit,
}

impl Framework {
    /// Parses a framework tag, failing with `UnsupportedFramework` for unknown tags.
    pub fn parse_tag(tag: &str) -> Result<Self, AtgError> {
        Self::from_str(tag.trim()).map_err(|_| AtgError::UnsupportedFramework(tag.to_string()))
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Framework::Robot => "robot",
            Framework::Pytest => "py",
            Framework::Gherkin => "feature",
            Framework::Junit => "java",
        }
    }

    /// Conventional file name for a scaffold with the given test name.
    pub fn file_name_for(&self, test_name: &str) -> String {
        let words = name_words(test_name);
        let snake = words.join("_");
        match self {
            Framework::Robot => format!("{}.robot", snake),
            Framework::Pytest => format!("test_{}.py", snake),
            Framework::Gherkin => format!("{}.feature", snake),
            Framework::Junit => format!("{}.java", junit_class_name(&words)),
        }
    }
}

/// Word tokens of a test name, with `generated` standing in for a name
/// that has none. File names, class names and function names all derive
/// from these words.
pub(crate) fn name_words(test_name: &str) -> Vec<String> {
    let words = tokens_in_order(test_name);
    if words.is_empty() {
        vec!["generated".to_string()]
    } else {
        words
    }
}

/// Class name for a JUnit scaffold: PascalCase words plus `Test`.
pub(crate) fn junit_class_name(words: &[String]) -> String {
    let mut name = format!("{}Test", pascal_case(words));
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

pub(crate) fn pascal_case(words: &[String]) -> String {
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
