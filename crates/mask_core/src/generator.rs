//! Mask generators.
//!
//! A [`MaskGenerator`] bundles a [`RuleSet`], a template function of the
//! current value, an optional post-mask transform and the `keep_mask` flag.
//! Generators are immutable values; builders return a new generator.

use std::fmt;
use std::sync::Arc;

use crate::rules::RuleSet;
use crate::template::Template;

type TemplateFn = dyn Fn(&str) -> String + Send + Sync;
type TransformFn = dyn Fn(&str) -> String + Send + Sync;

#[derive(Clone)]
pub struct MaskGenerator {
    rules: Arc<RuleSet>,
    template: Arc<TemplateFn>,
    transform: Option<Arc<TransformFn>>,
    keep_mask: bool,
}

impl MaskGenerator {
    /// Generator whose template is computed from the value being masked.
    pub fn new(rules: RuleSet, template: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self {
            rules: Arc::new(rules),
            template: Arc::new(template),
            transform: None,
            keep_mask: false,
        }
    }

    /// Fixed template under the default rules.
    ///
    /// ```
    /// use mask_core::{MaskGenerator, mask};
    ///
    /// let phone = MaskGenerator::fixed("(99) 9999-9999");
    /// assert_eq!(mask("1234567891", &phone).value, "(12) 3456-7891");
    /// ```
    pub fn fixed(template: impl Into<String>) -> Self {
        Self::fixed_with_rules(RuleSet::default_rules(), template)
    }

    pub fn fixed_with_rules(rules: RuleSet, template: impl Into<String>) -> Self {
        let template = template.into();
        Self::new(rules, move |_| template.clone())
    }

    /// Pick among `templates` by the number of ASCII digits in the value.
    ///
    /// The first template is used unless the value has more digits than the
    /// template itself contains, in which case the next one is tried. The last
    /// template is the fallback.
    ///
    /// ```
    /// use mask_core::MaskGenerator;
    ///
    /// let g = MaskGenerator::dynamic_number(["(99) 9999-9999", "(99) 99999-9999"]);
    /// assert_eq!(g.template_for("(12) 3456-7891").to_string(), "(99) 9999-9999");
    /// assert_eq!(g.template_for("12345678912").to_string(), "(99) 99999-9999");
    /// ```
    pub fn dynamic_number<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let templates: Vec<String> = templates.into_iter().map(Into::into).collect();
        Self::new(RuleSet::default_rules(), move |value| {
            select_by_digits(value, &templates).to_owned()
        })
    }

    pub fn with_transform(
        mut self,
        transform: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Report the masked display string as the logical value.
    pub fn with_keep_mask(mut self, keep_mask: bool) -> Self {
        self.keep_mask = keep_mask;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = Arc::new(rules);
        self
    }

    #[inline]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn template_for(&self, value: &str) -> Template {
        Template::new(&(self.template)(value))
    }

    /// Apply the transform, if any.
    pub fn transform(&self, masked: &str) -> Option<String> {
        self.transform.as_ref().map(|f| f(masked))
    }

    pub fn has_transform(&self) -> bool {
        self.transform.is_some()
    }

    #[inline]
    pub fn keep_mask(&self) -> bool {
        self.keep_mask
    }
}

impl fmt::Debug for MaskGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskGenerator")
            .field("rules", &self.rules)
            .field("transform", &self.transform.is_some())
            .field("keep_mask", &self.keep_mask)
            .finish_non_exhaustive()
    }
}

fn ascii_digits(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

fn select_by_digits<'a>(value: &str, templates: &'a [String]) -> &'a str {
    let digits = ascii_digits(value);
    templates
        .iter()
        .find(|t| digits <= ascii_digits(t))
        .or_else(|| templates.last())
        .map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    #[test]
    fn fixed_template_ignores_value() {
        let g = MaskGenerator::fixed("999-999");
        assert_eq!(g.template_for("").to_string(), "999-999");
        assert_eq!(g.template_for("123456789").to_string(), "999-999");
        assert!(!g.has_transform());
        assert!(!g.keep_mask());
    }

    #[test]
    fn dynamic_number_falls_through_in_order() {
        let g = MaskGenerator::dynamic_number(["99-99", "999-999", "9999-9999"]);
        assert_eq!(g.template_for("1234").to_string(), "99-99");
        assert_eq!(g.template_for("12-34").to_string(), "99-99");
        assert_eq!(g.template_for("12345").to_string(), "999-999");
        assert_eq!(g.template_for("123456").to_string(), "999-999");
        assert_eq!(g.template_for("1-2-3-4-5-6-7-8").to_string(), "9999-9999");
        assert_eq!(g.template_for("1234567890123").to_string(), "9999-9999");
    }

    #[test]
    fn dynamic_number_with_no_templates_is_empty() {
        let g = MaskGenerator::dynamic_number(Vec::<String>::new());
        assert!(g.template_for("123").is_empty());
    }

    #[test]
    fn builders_compose() {
        let rules = RuleSet::new().with('#', Rule::ascii_digit());
        let g = MaskGenerator::fixed("##")
            .with_rules(rules)
            .with_keep_mask(true)
            .with_transform(|s| s.to_uppercase());
        assert!(g.rules().is_placeholder('#'));
        assert!(!g.rules().is_placeholder('9'));
        assert!(g.keep_mask());
        assert_eq!(g.transform("ab").as_deref(), Some("AB"));
        let dbg = format!("{g:?}");
        assert!(dbg.contains("keep_mask: true"), "{dbg}");
    }
}
