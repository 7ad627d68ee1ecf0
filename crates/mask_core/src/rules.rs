//! Placeholder rules.
//!
//! A [`RuleSet`] maps a single template character (the placeholder) to a
//! [`Rule`], a predicate deciding whether an input character may occupy that
//! slot. Template characters without a rule are literals.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Acceptance predicate for one placeholder.
///
/// Cloning is cheap: the predicate is reference counted so one rule can be
/// shared by many rule sets and generators.
#[derive(Clone)]
pub struct Rule {
    label: &'static str,
    test: Arc<dyn Fn(char) -> bool + Send + Sync>,
}

impl Rule {
    /// Build a rule from an arbitrary predicate.
    pub fn new(test: impl Fn(char) -> bool + Send + Sync + 'static) -> Self {
        Self::labeled("custom", test)
    }

    /// Build a rule with a label shown in `Debug` output.
    pub fn labeled(
        label: &'static str,
        test: impl Fn(char) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label,
            test: Arc::new(test),
        }
    }

    /// `[0-9]`
    pub fn ascii_digit() -> Self {
        Self::labeled("ascii_digit", |c| c.is_ascii_digit())
    }

    /// `[A-Za-z]`
    pub fn ascii_alpha() -> Self {
        Self::labeled("ascii_alpha", |c| c.is_ascii_alphabetic())
    }

    /// `[A-Za-z0-9_]`
    pub fn ascii_word() -> Self {
        Self::labeled("ascii_word", |c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Returns `true` if `c` may occupy a slot governed by this rule.
    #[inline]
    pub fn test(&self, c: char) -> bool {
        (self.test)(c)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.label).finish()
    }
}

/// Mapping from placeholder character to [`Rule`].
///
/// Ordered by placeholder so `Debug` output is stable.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: BTreeMap<char, Rule>,
}

impl RuleSet {
    /// An empty rule set: every template character is a literal.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// The stock rules: `A` letter, `9` digit, `?` word character.
    ///
    /// ```
    /// use mask_core::RuleSet;
    ///
    /// let rules = RuleSet::default_rules();
    /// assert!(rules.accepts('9', '7'));
    /// assert!(!rules.accepts('9', 'x'));
    /// assert!(rules.accepts('A', 'x'));
    /// assert!(rules.accepts('?', '_'));
    /// assert!(!rules.is_placeholder('-'));
    /// ```
    pub fn default_rules() -> Self {
        Self::new()
            .with('A', Rule::ascii_alpha())
            .with('9', Rule::ascii_digit())
            .with('?', Rule::ascii_word())
    }

    /// Builder-style insert.
    pub fn with(mut self, placeholder: char, rule: Rule) -> Self {
        self.insert(placeholder, rule);
        self
    }

    /// Insert or replace the rule for `placeholder`.
    pub fn insert(&mut self, placeholder: char, rule: Rule) -> Option<Rule> {
        self.rules.insert(placeholder, rule)
    }

    #[inline]
    pub fn get(&self, placeholder: char) -> Option<&Rule> {
        self.rules.get(&placeholder)
    }

    /// Returns `true` if `c` is a placeholder in this rule set.
    #[inline]
    pub fn is_placeholder(&self, c: char) -> bool {
        self.rules.contains_key(&c)
    }

    /// Returns `true` if `placeholder` has a rule and that rule accepts `input`.
    pub fn accepts(&self, placeholder: char, input: char) -> bool {
        self.get(placeholder).is_some_and(|rule| rule.test(input))
    }

    pub fn placeholders(&self) -> impl Iterator<Item = char> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<(char, Rule)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (char, Rule)>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_match_ascii_classes_only() {
        let rules = RuleSet::default_rules();
        assert!(rules.accepts('9', '0'));
        assert!(!rules.accepts('9', '٣')); // Arabic-Indic digit
        assert!(rules.accepts('A', 'Z'));
        assert!(!rules.accepts('A', 'é'));
        assert!(rules.accepts('?', 'a'));
        assert!(rules.accepts('?', '5'));
        assert!(!rules.accepts('?', '-'));
    }

    #[test]
    fn unknown_placeholder_accepts_nothing() {
        let rules = RuleSet::default_rules();
        assert!(!rules.is_placeholder('X'));
        assert!(!rules.accepts('X', 'X'));
    }

    #[test]
    fn custom_rules_replace_defaults() {
        let rules = RuleSet::new()
            .with('C', Rule::ascii_alpha())
            .with('N', Rule::ascii_digit());
        assert_eq!(rules.placeholders().collect::<Vec<_>>(), vec!['C', 'N']);
        assert!(!rules.is_placeholder('9'));

        let mut rules = rules;
        let previous = rules.insert('N', Rule::new(|c| c == '0' || c == '1'));
        assert!(previous.is_some());
        assert!(rules.accepts('N', '1'));
        assert!(!rules.accepts('N', '2'));
    }

    #[test]
    fn debug_shows_labels() {
        let rules = RuleSet::new().with('9', Rule::ascii_digit());
        let dbg = format!("{rules:?}");
        assert!(dbg.contains("ascii_digit"), "{dbg}");
    }
}
