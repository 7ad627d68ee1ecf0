use mask_test_support::{
    EditScript, Step, StepOp, diff_lines, fixture_filter, load_edit_scripts, render_caret,
};
use masked_input::{FieldId, MaskedInputStore};
use std::path::{Path, PathBuf};

const FIELD: FieldId = FieldId::from_raw(1);

#[test]
fn golden_edit_scripts() {
    let scripts = load_edit_scripts(&fixture_dir());
    let filter = fixture_filter();
    let mut ran = 0usize;
    for script in &scripts {
        if !filter.matches(&script.name) {
            continue;
        }
        ran += 1;
        let (expected, actual) = run_script(script);
        if expected != actual {
            panic!(
                "edit script mismatch in '{}'\npath: {}\n{}",
                script.name,
                fixture_dir().display(),
                diff_lines(&expected, &actual)
            );
        }
    }
    assert!(ran > 0, "no edit scripts matched filter");
}

#[test]
fn every_script_checks_something() {
    for script in load_edit_scripts(&fixture_dir()) {
        assert!(
            script.steps.iter().any(Step::has_expectations),
            "script '{}' has no expectations",
            script.name
        );
    }
}

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Runs every step and returns (expected, actual) lines for the steps that
/// carry expectations. Unspecified expectations take the actual value.
fn run_script(script: &EditScript) -> (Vec<String>, Vec<String>) {
    let mut store = MaskedInputStore::new();
    store.ensure_field(
        FIELD,
        script.generator.build(),
        script.initial.as_deref().unwrap_or(""),
    );

    let mut expected = Vec::new();
    let mut actual = Vec::new();
    for (idx, step) in script.steps.iter().enumerate() {
        apply_step(&mut store, step);
        if !step.has_expectations() {
            continue;
        }

        let display = store.display(FIELD).unwrap_or("");
        let caret = store.caret(FIELD).unwrap_or(0);
        let value = store.value(FIELD).unwrap_or("");
        let went_back = store.went_back(FIELD);

        actual.push(step_line(idx, step.op, display, caret, value, went_back));
        expected.push(step_line(
            idx,
            step.op,
            step.expect_display.as_deref().unwrap_or(display),
            step.expect_caret.unwrap_or(caret),
            step.expect_value.as_deref().unwrap_or(value),
            step.expect_went_back.unwrap_or(went_back),
        ));
    }
    (expected, actual)
}

fn apply_step(store: &mut MaskedInputStore, step: &Step) {
    match step.op {
        StepOp::Type => {
            for ch in step.text().chars() {
                store.insert_text(FIELD, ch.encode_utf8(&mut [0; 4]));
            }
        }
        StepOp::Paste => {
            store.insert_text(FIELD, step.text());
        }
        StepOp::Backspace => {
            store.backspace(FIELD);
        }
        StepOp::Delete => {
            store.delete(FIELD);
        }
        StepOp::Caret => {
            store.set_caret(FIELD, step.at.unwrap_or(0), false);
        }
        StepOp::Select => {
            store.select(FIELD, step.start.unwrap_or(0), step.end.unwrap_or(0));
        }
        StepOp::SelectAll => store.select_all(FIELD),
        StepOp::SetValue => {
            store.set_value(FIELD, step.text());
        }
    }
}

fn step_line(
    idx: usize,
    op: StepOp,
    display: &str,
    caret: usize,
    value: &str,
    went_back: bool,
) -> String {
    format!(
        "#{} {op:?}: {} value={value:?} went_back={went_back}",
        idx + 1,
        render_caret(display, caret, None)
    )
}
