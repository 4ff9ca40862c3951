//! Path selectors over the element tree
//!
//! Supports the small XPath subset CDA extraction needs:
//!
//! - steps separated by `/`, `//` for descendants at any depth
//! - a leading `.`, `./` or `.//`
//! - name tests `*`, `local`, `prefix:local` and `{uri}local`
//!
//! Prefixes are resolved through a [`NamespaceMap`] when the selector is
//! parsed, so evaluation only compares namespace URIs.

use crate::domain::{CdaError, Element, Result, CDA_NAMESPACE};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Prefix to namespace URI bindings used when parsing selectors
///
/// The empty prefix `""` sets the namespace for unprefixed names. Bindings
/// read from configuration are added on top of the default `cda` binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NamespaceMap(IndexMap<String, String>);

impl NamespaceMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Adds or replaces a binding
    pub fn bind(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.0.insert(prefix.into(), uri.into());
        self
    }

    /// Looks up the URI bound to a prefix
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }

    /// Namespace applied to unprefixed names
    pub fn default_namespace(&self) -> Option<&str> {
        self.resolve("")
    }

    /// Iterates over bindings
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

impl Default for NamespaceMap {
    /// `cda` bound to the HL7 v3 namespace
    fn default() -> Self {
        Self::new().bind("cda", CDA_NAMESPACE)
    }
}

impl<'de> Deserialize<'de> for NamespaceMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bindings = IndexMap::<String, String>::deserialize(deserializer)?;
        Ok(bindings
            .into_iter()
            .fold(Self::default(), |map, (prefix, uri)| map.bind(prefix, uri)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Name {
        namespace: Option<String>,
        local: String,
    },
}

impl NameTest {
    fn matches(&self, element: &Element) -> bool {
        match self {
            NameTest::Any => true,
            NameTest::Name { namespace, local } => {
                element.local_name() == local && element.namespace() == namespace.as_deref()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
}

impl Step {
    fn candidates<'a>(&self, element: &'a Element) -> Box<dyn Iterator<Item = &'a Element> + 'a> {
        match self.axis {
            Axis::Child => Box::new(element.children.iter()),
            Axis::Descendant => Box::new(element.descendants()),
        }
    }
}

/// A compiled selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    expression: String,
    steps: Vec<Step>,
}

impl Selector {
    /// Parses a selector expression
    ///
    /// # Errors
    ///
    /// Returns [`CdaError::Selector`] for empty or absolute expressions,
    /// predicates, parent steps, empty steps and unknown prefixes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdaflat::core::select::{NamespaceMap, Selector};
    ///
    /// let selector = Selector::parse(".//cda:patientRole", &NamespaceMap::default())?;
    /// assert_eq!(selector.expression(), ".//cda:patientRole");
    /// # Ok::<(), cdaflat::domain::CdaError>(())
    /// ```
    pub fn parse(expression: &str, namespaces: &NamespaceMap) -> Result<Self> {
        let trimmed = expression.trim();
        let fail = |reason: &str| CdaError::Selector(format!("{reason}: '{expression}'"));

        if trimmed.is_empty() {
            return Err(fail("empty selector"));
        }
        if trimmed.starts_with('/') {
            return Err(fail("cannot use absolute path on element"));
        }

        let mut steps = Vec::new();
        let mut descend = false;
        let segments = split_steps(trimmed);
        let last = segments.len() - 1;

        for (index, segment) in segments.into_iter().enumerate() {
            match segment {
                "" if index == last => return Err(fail("selector ends with '/'")),
                "" if descend => return Err(fail("empty step")),
                "" => descend = true,
                "." => {
                    if descend {
                        return Err(fail("'//.' is not supported"));
                    }
                }
                ".." => return Err(fail("parent steps are not supported")),
                _ if segment.contains('[') => return Err(fail("predicates are not supported")),
                _ => {
                    let test = parse_name_test(segment, namespaces)
                        .map_err(|reason: String| fail(reason.as_str()))?;
                    steps.push(Step {
                        axis: if descend { Axis::Descendant } else { Axis::Child },
                        test,
                    });
                    descend = false;
                }
            }
        }

        Ok(Self {
            expression: trimmed.to_string(),
            steps,
        })
    }

    /// Selector for the first-descendant query `.//{namespace}local`
    pub fn descendant(namespace: Option<&str>, local: &str) -> Self {
        let expression = match namespace {
            Some(ns) => format!(".//{{{ns}}}{local}"),
            None => format!(".//{local}"),
        };
        Self {
            expression,
            steps: vec![Step {
                axis: Axis::Descendant,
                test: NameTest::Name {
                    namespace: namespace.map(str::to_string),
                    local: local.to_string(),
                },
            }],
        }
    }

    /// The expression this selector was built from
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// All matching elements in document order
    ///
    /// A selector with no steps (`.`) matches the context element itself.
    pub fn select<'a>(&self, context: &'a Element) -> Vec<&'a Element> {
        self.matches(context).collect()
    }

    /// First matching element, if any
    ///
    /// Stops walking the tree at the first match.
    pub fn find_first<'a>(&self, context: &'a Element) -> Option<&'a Element> {
        self.matches(context).next()
    }

    /// Lazily chains the steps; an element reached from two contexts is
    /// yielded once, at its first position.
    fn matches<'s, 'a: 's>(
        &'s self,
        context: &'a Element,
    ) -> Box<dyn Iterator<Item = &'a Element> + 's> {
        let mut current: Box<dyn Iterator<Item = &'a Element> + 's> =
            Box::new(std::iter::once(context));

        for step in &self.steps {
            let mut seen: HashSet<*const Element> = HashSet::new();
            current = Box::new(
                current
                    .flat_map(move |element| {
                        step.candidates(element)
                            .filter(move |candidate| step.test.matches(candidate))
                    })
                    .filter(move |candidate| seen.insert(*candidate as *const Element)),
            );
        }

        current
    }
}

/// Splits on `/` outside of `{...}` so namespace URIs may contain slashes
fn split_steps(expression: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, ch) in expression.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                segments.push(&expression[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&expression[start..]);
    segments
}

fn parse_name_test(segment: &str, namespaces: &NamespaceMap) -> std::result::Result<NameTest, String> {
    if segment == "*" {
        return Ok(NameTest::Any);
    }

    if let Some(rest) = segment.strip_prefix('{') {
        let (uri, local) = rest
            .split_once('}')
            .ok_or_else(|| "unterminated namespace".to_string())?;
        return name(Some(uri), local);
    }

    match segment.split_once(':') {
        Some((prefix, local)) => {
            let uri = namespaces
                .resolve(prefix)
                .ok_or_else(|| format!("prefix '{prefix}' not found in prefix map"))?;
            name(Some(uri), local)
        }
        None => name(namespaces.default_namespace(), segment),
    }
}

fn name(namespace: Option<&str>, local: &str) -> std::result::Result<NameTest, String> {
    if local.is_empty() || local.contains(['{', '}', ':']) {
        return Err(format!("invalid name '{local}'"));
    }
    Ok(NameTest::Name {
        namespace: namespace.filter(|ns| !ns.is_empty()).map(str::to_string),
        local: local.to_string(),
    })
}
