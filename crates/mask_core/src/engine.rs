//! Masking engine and unmask.
//!
//! `mask` never fails. A generator whose output is not stable under
//! re-application produces a [`MaskAnomaly`] and the raw input is returned
//! as-is, so a misbehaving generator degrades to an unmasked field instead of
//! an oscillating one.

use std::fmt;

use crate::generator::MaskGenerator;
use crate::template::{Template, WalkEvent};

/// Result of masking a raw string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Masked {
    pub value: String,
    pub template: Template,
    /// Length change introduced by the transform, in chars.
    pub transform_offset: isize,
    pub anomaly: Option<MaskAnomaly>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnomalyCode {
    /// Masking the masked output changed it again.
    UnstableMask,
}

impl AnomalyCode {
    pub fn as_str(self) -> &'static str {
        match self {
            AnomalyCode::UnstableMask => "unstable-mask",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskAnomaly {
    pub code: AnomalyCode,
    pub input: String,
    pub first_pass: String,
    pub second_pass: String,
    pub template: Template,
    pub second_template: Template,
}

impl fmt::Display for MaskAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: input={:?} first={:?} ({:?}) second={:?} ({:?})",
            self.code.as_str(),
            self.input,
            self.first_pass,
            self.template.to_string(),
            self.second_pass,
            self.second_template.to_string(),
        )
    }
}

struct Pass {
    value: String,
    template: Template,
    transform_offset: isize,
}

fn mask_once(raw: &str, generator: &MaskGenerator) -> Pass {
    let template = generator.template_for(raw);
    let chars: Vec<char> = raw.chars().collect();
    let mut value = String::with_capacity(raw.len().max(template.len()));
    for event in template.walk(&chars, generator.rules()) {
        match event {
            WalkEvent::Accepted { ch, .. } | WalkEvent::LiteralMatched { ch, .. } => value.push(ch),
            WalkEvent::LiteralInserted { literal, .. } => value.push(literal),
            WalkEvent::Rejected { .. } => {}
            WalkEvent::Exceeded { .. } => break,
        }
    }
    let mut transform_offset = 0;
    if let Some(transformed) = generator.transform(&value) {
        transform_offset = char_len(&transformed) as isize - char_len(&value) as isize;
        value = transformed;
    }
    Pass {
        value,
        template,
        transform_offset,
    }
}

/// Mask `raw` with `generator`.
///
/// Literals are inserted only while a raw character is pending, so input that
/// ends on a placeholder gains no trailing literals. Raw characters rejected by their
/// placeholder are dropped; characters past the template end are truncated.
///
/// ```
/// use mask_core::{MaskGenerator, mask};
///
/// let phone = MaskGenerator::fixed("(99) 9999-9999");
/// assert_eq!(mask("12", &phone).value, "(12");
/// assert_eq!(mask("1a2b3", &phone).value, "(12) 3");
/// assert_eq!(mask("123456789123", &phone).value, "(12) 3456-7891");
/// ```
pub fn mask(raw: &str, generator: &MaskGenerator) -> Masked {
    let first = mask_once(raw, generator);
    let second = mask_once(&first.value, generator);
    if second.value != first.value {
        let anomaly = MaskAnomaly {
            code: AnomalyCode::UnstableMask,
            input: raw.to_owned(),
            first_pass: first.value,
            second_pass: second.value,
            template: first.template.clone(),
            second_template: second.template,
        };
        log::error!(target: "mask.engine", "{anomaly}");
        return Masked {
            value: raw.to_owned(),
            template: first.template,
            transform_offset: 0,
            anomaly: Some(anomaly),
        };
    }
    Masked {
        value: first.value,
        template: first.template,
        transform_offset: first.transform_offset,
        anomaly: None,
    }
}

/// Shorthand for `mask(raw, generator).value`.
pub fn mask_value(raw: &str, generator: &MaskGenerator) -> String {
    mask(raw, generator).value
}

/// Recover the raw value from a masked string.
///
/// Returns `masked` verbatim when the generator keeps the mask.
///
/// ```
/// use mask_core::{MaskGenerator, unmask};
///
/// let phone = MaskGenerator::fixed("(99) 9999-9999");
/// assert_eq!(unmask("(12) 3456-7891", &phone), "1234567891");
/// assert_eq!(unmask("(12) 3456-7891", &phone.with_keep_mask(true)), "(12) 3456-7891");
/// ```
pub fn unmask(masked: &str, generator: &MaskGenerator) -> String {
    if generator.keep_mask() {
        return masked.to_owned();
    }
    strip_literals(masked, generator)
}

/// Keep only the characters sitting on placeholder slots of the template
/// recomputed from `masked`.
pub fn strip_literals(masked: &str, generator: &MaskGenerator) -> String {
    let template = generator.template_for(masked);
    let rules = generator.rules();
    masked
        .chars()
        .zip(template.as_chars())
        .filter(|(_, t)| rules.is_placeholder(**t))
        .map(|(c, _)| c)
        .collect()
}

/// The logical value reported for a display string.
pub fn process_value(masked: &str, generator: Option<&MaskGenerator>) -> String {
    match generator {
        Some(generator) => unmask(masked, generator),
        None => masked.to_owned(),
    }
}

#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Rule, RuleSet};

    fn phone() -> MaskGenerator {
        MaskGenerator::fixed("(99) 9999-9999")
    }

    #[test]
    fn mask_inserts_literals_only_before_pending_chars() {
        let g = phone();
        assert_eq!(mask_value("", &g), "");
        assert_eq!(mask_value("1", &g), "(1");
        assert_eq!(mask_value("12", &g), "(12");
        assert_eq!(mask_value("123", &g), "(12) 3");
        assert_eq!(mask_value("1234567891", &g), "(12) 3456-7891");
    }

    #[test]
    fn mask_reinterprets_misplaced_literals() {
        let g = phone();
        assert_eq!(mask_value("(12) 34561-7891", &g), "(12) 3456-1789");
        assert_eq!(mask_value("(12)3456-7891", &g), "(12) 3456-7891");
        assert_eq!(mask_value("(12) 3456-1+2-37891", &g), "(12) 3456-1237");
    }

    #[test]
    fn mask_is_idempotent_for_well_formed_generators() {
        let g = phone();
        for raw in ["", "1", "(1", "12a34", "(12) 3456-7891", "9999999999999"] {
            let once = mask_value(raw, &g);
            assert_eq!(mask_value(&once, &g), once, "raw={raw:?}");
        }
    }

    #[test]
    fn transform_offset_counts_chars() {
        let g = MaskGenerator::fixed("999").with_transform(|s| format!("€{s}"));
        let masked = mask("12", &g);
        // Re-masking "€12" drops the euro sign and adds it back.
        assert_eq!(masked.value, "€12");
        assert_eq!(masked.transform_offset, 1);
        assert!(masked.anomaly.is_none());
    }

    #[test]
    fn unstable_generator_falls_back_to_raw() {
        let g = MaskGenerator::fixed("999").with_transform(|s| format!("{s}1"));
        let masked = mask("2", &g);
        assert_eq!(masked.value, "2");
        assert_eq!(masked.transform_offset, 0);
        let anomaly = masked.anomaly.expect("anomaly");
        assert_eq!(anomaly.code, AnomalyCode::UnstableMask);
        assert_eq!(anomaly.first_pass, "21");
        assert_eq!(anomaly.second_pass, "211");
        assert!(anomaly.to_string().starts_with("unstable-mask:"));
    }

    #[test]
    fn unmask_drops_literals() {
        let g = phone();
        assert_eq!(unmask("(12) 3456-7891", &g), "1234567891");
        assert_eq!(unmask("(12", &g), "12");
        assert_eq!(unmask("", &g), "");
    }

    #[test]
    fn unmask_of_mask_is_the_accepted_subsequence() {
        let rules = RuleSet::new()
            .with('C', Rule::ascii_alpha())
            .with('N', Rule::ascii_digit());
        let g = MaskGenerator::fixed_with_rules(rules, "CCC-NNNN");
        let raw = "a1b2c3d4e5f6g7";
        assert_eq!(mask_value(raw, &g), "abc-3456");
        assert_eq!(unmask(&mask_value(raw, &g), &g), "abc3456");
    }

    #[test]
    fn process_value_without_generator_is_verbatim() {
        assert_eq!(process_value("a-b", None), "a-b");
        assert_eq!(process_value("(12", Some(&phone())), "12");
        let keep = phone().with_keep_mask(true);
        assert_eq!(process_value("(12", Some(&keep)), "(12");
        assert_eq!(strip_literals("(12", &keep), "12");
    }

    #[test]
    fn non_ascii_input_is_counted_in_chars() {
        let rules = RuleSet::new().with('x', Rule::new(|c| !c.is_ascii()));
        let g = MaskGenerator::fixed_with_rules(rules, "x-x");
        let masked = mask("éü", &g);
        assert_eq!(masked.value, "é-ü");
        assert_eq!(masked.template.len(), 3);
        assert_eq!(unmask("é-ü", &g), "éü");
    }
}
