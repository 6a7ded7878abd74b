//! Immutable keyword catalog built from resource definitions.

use std::collections::{BTreeSet, HashMap};

use super::model::{KeywordEntry, ResourceDefinition};
use crate::error::{AtgError, Result};
use crate::framework::Framework;
use crate::normalize::{normalize, tokens};

/// A queryable catalog of known keywords for one project snapshot.
///
/// The library is built once and never mutated afterwards; rebuilding means
/// constructing a new instance. It is safe to share read-only between
/// threads (wrap it in an `Arc`).
#[derive(Debug, Clone, Default)]
pub struct KeywordLibrary {
    entries: Vec<KeywordEntry>,
    by_name: HashMap<(Framework, String), usize>,
    by_token: HashMap<(Framework, String), Vec<usize>>,
}

impl KeywordLibrary {
    /// Builds a library from resource definitions.
    ///
    /// # Errors
    ///
    /// Returns `AtgError::MalformedResource` when a definition has no usable
    /// name or when two definitions collide on the same normalized name within
    /// one framework. Nothing is partially built.
    pub fn build<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = ResourceDefinition>,
    {
        let mut library = Self::default();

        for def in definitions {
            let name = def.keyword_name.trim();
            if name.is_empty() {
                return Err(AtgError::malformed(&def.source_ref, "keyword name is empty"));
            }

            let normalized = normalize(name);
            if normalized.is_empty() {
                return Err(AtgError::malformed(
                    &def.source_ref,
                    format!("keyword name '{}' has no word characters", name),
                ));
            }

            let key = (def.framework, normalized);
            if let Some(&existing) = library.by_name.get(&key) {
                let previous = &library.entries[existing];
                return Err(AtgError::malformed(
                    &def.source_ref,
                    format!(
                        "duplicate {} keyword '{}' (already defined as '{}' in '{}')",
                        def.framework, name, previous.name, previous.source_ref
                    ),
                ));
            }

            let index = library.entries.len();
            for token in tokens(&key.1) {
                library
                    .by_token
                    .entry((def.framework, token))
                    .or_default()
                    .push(index);
            }
            library.by_name.insert(key, index);
            library.entries.push(KeywordEntry {
                name: name.to_string(),
                framework: def.framework,
                arity: def.arity,
                source_ref: def.source_ref,
                step_kind: def.step_kind,
            });
        }

        tracing::debug!(keywords = library.entries.len(), "Keyword library built");
        Ok(library)
    }

    /// Returns every entry of `framework` whose name shares at least one
    /// token with the query, in library order. Does not rank.
    pub fn lookup_candidates(&self, normalized_text: &str, framework: Framework) -> Vec<&KeywordEntry> {
        let mut hits = BTreeSet::new();
        for token in tokens(normalized_text) {
            if let Some(indices) = self.by_token.get(&(framework, token)) {
                hits.extend(indices.iter().copied());
            }
        }
        hits.into_iter().map(|i| &self.entries[i]).collect()
    }

    /// Finds the entry whose normalized name equals `normalized_text`.
    pub fn find_exact(&self, normalized_text: &str, framework: Framework) -> Option<&KeywordEntry> {
        self.by_name
            .get(&(framework, normalized_text.to_string()))
            .map(|&i| &self.entries[i])
    }

    /// Finds an entry by its (not necessarily normalized) name.
    pub fn find_by_name(&self, name: &str, framework: Framework) -> Option<&KeywordEntry> {
        self.find_exact(&normalize(name), framework)
    }

    pub fn entries(&self, framework: Framework) -> impl Iterator<Item = &KeywordEntry> {
        self.entries.iter().filter(move |e| e.framework == framework)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.entries.iter()
    }

    /// Frameworks that have at least one keyword.
    pub fn frameworks(&self) -> BTreeSet<Framework> {
        self.entries.iter().map(|e| e.framework).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, arity: usize, framework: Framework) -> ResourceDefinition {
        ResourceDefinition::new(name, arity, framework, "resources/common.robot")
    }

    fn sample() -> KeywordLibrary {
        KeywordLibrary::build(vec![
            def("Click Login Button", 0, Framework::Robot),
            def("Input Username", 1, Framework::Robot),
            def("Open Browser To Login Page", 0, Framework::Robot),
            def("click_login_button", 0, Framework::Pytest),
        ])
        .unwrap()
    }

    #[test]
    fn test_build_and_len() {
        let library = sample();
        assert_eq!(library.len(), 4);
        assert!(!library.is_empty());
        assert_eq!(library.entries(Framework::Robot).count(), 3);
        assert_eq!(
            library.frameworks().into_iter().collect::<Vec<_>>(),
            vec![Framework::Robot, Framework::Pytest]
        );
    }

    #[test]
    fn test_same_name_in_different_frameworks_is_allowed() {
        let library = sample();
        assert!(library.find_by_name("Click Login Button", Framework::Robot).is_some());
        let py = library.find_by_name("Click Login Button", Framework::Pytest).unwrap();
        assert_eq!(py.name, "click_login_button");
    }

    #[test]
    fn test_duplicate_name_within_framework_is_rejected() {
        let err = KeywordLibrary::build(vec![
            def("Click Login Button", 0, Framework::Robot),
            ResourceDefinition::new("click  login-button", 0, Framework::Robot, "other.robot"),
        ])
        .unwrap_err();

        match err {
            AtgError::MalformedResource { source_ref, reason } => {
                assert_eq!(source_ref, "other.robot");
                assert!(reason.contains("duplicate"));
                assert!(reason.contains("resources/common.robot"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_empty_and_symbol_only_names_are_rejected() {
        let err = KeywordLibrary::build(vec![def("   ", 0, Framework::Robot)]).unwrap_err();
        assert!(err.is_malformed_resource());

        let err = KeywordLibrary::build(vec![def("***", 0, Framework::Robot)]).unwrap_err();
        assert!(err.is_malformed_resource());
    }

    #[test]
    fn test_lookup_candidates_overlap_only_and_stable_order() {
        let library = sample();

        let hits = library.lookup_candidates("press the login button", Framework::Robot);
        let names: Vec<_> = hits.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Click Login Button", "Open Browser To Login Page"]);

        assert!(library.lookup_candidates("logout", Framework::Robot).is_empty());
        assert!(library.lookup_candidates("", Framework::Robot).is_empty());
    }

    #[test]
    fn test_lookup_is_scoped_by_framework() {
        let library = sample();
        let hits = library.lookup_candidates("username", Framework::Pytest);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_find_exact_uses_normalized_text() {
        let library = sample();
        assert!(library.find_exact("open browser to login page", Framework::Robot).is_some());
        assert!(library.find_exact("Open Browser To Login Page", Framework::Robot).is_none());
    }
}
