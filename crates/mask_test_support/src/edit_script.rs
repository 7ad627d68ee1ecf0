//! Golden edit-script fixtures.
//!
//! A script names a generator, an optional starting value and a list of widget
//! steps, each with optional expectations. Scripts are stored as TOML or JSON
//! and share one schema.

use mask_core::{CurrencyOptions, MaskGenerator, Rule, RuleSet};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const EDIT_SCRIPT_FORMAT_V1: &str = "mask-edit-script-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct EditScriptFile {
    format: String,
    scripts: Vec<EditScript>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EditScript {
    pub name: String,
    pub generator: GeneratorSpec,
    #[serde(default)]
    pub initial: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleClass {
    Digit,
    Alpha,
    Word,
}

impl RuleClass {
    fn rule(self) -> Rule {
        match self {
            RuleClass::Digit => Rule::ascii_digit(),
            RuleClass::Alpha => Rule::ascii_alpha(),
            RuleClass::Word => Rule::ascii_word(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorSpec {
    None,
    Fixed {
        template: String,
        /// Replaces the default rules when present.
        #[serde(default)]
        rules: Option<BTreeMap<String, RuleClass>>,
        #[serde(default)]
        keep_mask: bool,
    },
    DynamicNumber {
        templates: Vec<String>,
    },
    Currency {
        #[serde(default)]
        prefix: String,
        #[serde(default)]
        thousand_separator: Option<char>,
        #[serde(default)]
        cents_separator: Option<char>,
    },
}

impl GeneratorSpec {
    pub fn build(&self) -> Option<MaskGenerator> {
        match self {
            GeneratorSpec::None => None,
            GeneratorSpec::Fixed {
                template,
                rules,
                keep_mask,
            } => {
                let generator = match rules {
                    Some(rules) => {
                        MaskGenerator::fixed_with_rules(build_rules(rules), template.as_str())
                    }
                    None => MaskGenerator::fixed(template.as_str()),
                };
                Some(generator.with_keep_mask(*keep_mask))
            }
            GeneratorSpec::DynamicNumber { templates } => {
                Some(MaskGenerator::dynamic_number(templates.iter().cloned()))
            }
            GeneratorSpec::Currency {
                prefix,
                thousand_separator,
                cents_separator,
            } => {
                let mut options = CurrencyOptions::default().with_prefix(prefix.as_str());
                if let Some(sep) = thousand_separator {
                    options = options.with_thousand_separator(*sep);
                }
                if let Some(sep) = cents_separator {
                    options = options.with_cents_separator(*sep);
                }
                Some(MaskGenerator::currency(options))
            }
        }
    }
}

fn build_rules(classes: &BTreeMap<String, RuleClass>) -> RuleSet {
    classes
        .iter()
        .map(|(key, class)| {
            let mut chars = key.chars();
            let (Some(placeholder), None) = (chars.next(), chars.next()) else {
                panic!("rule key must be a single character, got '{key}'");
            };
            (placeholder, class.rule())
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepOp {
    /// Type `text` one character at a time.
    Type,
    /// Insert `text` in one edit.
    Paste,
    Backspace,
    Delete,
    /// Move the caret to `at`.
    Caret,
    /// Select `start..end`.
    Select,
    SelectAll,
    /// Programmatic value `text`.
    SetValue,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub op: StepOp,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub at: Option<usize>,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
    #[serde(default)]
    pub expect_display: Option<String>,
    #[serde(default)]
    pub expect_caret: Option<usize>,
    #[serde(default)]
    pub expect_value: Option<String>,
    #[serde(default)]
    pub expect_went_back: Option<bool>,
}

impl Step {
    pub fn text(&self) -> &str {
        self.text
            .as_deref()
            .unwrap_or_else(|| panic!("{:?} step requires `text`", self.op))
    }

    pub fn has_expectations(&self) -> bool {
        self.expect_display.is_some()
            || self.expect_caret.is_some()
            || self.expect_value.is_some()
            || self.expect_went_back.is_some()
    }
}

/// Load every `*.toml` and `*.json` script file under `dir`, sorted by file
/// name. Script names must be unique across files.
pub fn load_edit_scripts(dir: &Path) -> Vec<EditScript> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {dir:?}: {err}"))
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| matches!(path.extension().and_then(|e| e.to_str()), Some("toml" | "json")))
        .collect();
    paths.sort();

    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for path in paths {
        let file = parse_file(&path);
        assert_eq!(
            file.format, EDIT_SCRIPT_FORMAT_V1,
            "unsupported edit script format in {path:?}"
        );
        for script in file.scripts {
            validate_script(&script, &path);
            assert!(
                seen.insert(script.name.clone()),
                "duplicate edit script name in {path:?}: {}",
                script.name
            );
            out.push(script);
        }
    }
    out
}

fn parse_file(path: &Path) -> EditScriptFile {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read edit script {path:?}: {err}"));
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse edit script JSON {path:?}: {err}")),
        _ => toml::from_str(&content)
            .unwrap_or_else(|err| panic!("failed to parse edit script TOML {path:?}: {err}")),
    }
}

fn validate_script(script: &EditScript, path: &Path) {
    assert!(
        !script.name.trim().is_empty(),
        "empty script name in {path:?}"
    );
    assert!(
        !script.steps.is_empty(),
        "script '{}' in {path:?} has no steps",
        script.name
    );
    for (idx, step) in script.steps.iter().enumerate() {
        let ok = match step.op {
            StepOp::Type | StepOp::Paste | StepOp::SetValue => step.text.is_some(),
            StepOp::Caret => step.at.is_some(),
            StepOp::Select => step.start.is_some() && step.end.is_some(),
            StepOp::Backspace | StepOp::Delete | StepOp::SelectAll => true,
        };
        assert!(
            ok,
            "script '{}' step {} ({:?}) in {path:?} is missing its arguments",
            script.name,
            idx + 1,
            step.op
        );
    }
}
