pub mod edit_script;
pub mod env_knobs;
pub mod lcg;

pub use edit_script::{
    EDIT_SCRIPT_FORMAT_V1, EditScript, GeneratorSpec, RuleClass, Step, StepOp, load_edit_scripts,
};
pub use env_knobs::{
    FixtureFilter, env_u64, fixture_filter, fuzz_runs, fuzz_seed, parse_env_bool, parse_u64,
};
pub use lcg::Lcg;

/// Render `display` with a `|` at `caret` (and `[`/`]` around a selection),
/// escaping control characters.
pub fn render_caret(display: &str, caret: usize, selection: Option<(usize, usize)>) -> String {
    let mut out = String::with_capacity(display.len() + 2);
    let len = display.chars().count();
    for (idx, ch) in display.chars().enumerate() {
        push_markers(&mut out, idx, caret, selection);
        push_escaped(&mut out, ch);
    }
    push_markers(&mut out, len, caret, selection);
    out
}

fn push_markers(out: &mut String, idx: usize, caret: usize, selection: Option<(usize, usize)>) {
    if let Some((start, end)) = selection {
        if idx == end && start != end {
            out.push(']');
        }
        if idx == start && start != end {
            out.push('[');
        }
    }
    if idx == caret {
        out.push('|');
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '|' => out.push_str("\\|"),
        '\n' => out.push_str("\\n"),
        '\t' => out.push_str("\\t"),
        ch if ch < ' ' => {
            use std::fmt::Write;
            let _ = write!(out, "\\u{{{:02X}}}", ch as u32);
        }
        _ => out.push(ch),
    }
}

pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    let max = expected.len().max(actual.len());
    let mut out = String::new();
    use std::fmt::Write;
    let missing = "<missing>";
    let mismatch = (0..max).find(|&i| expected.get(i) != actual.get(i));
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at step {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line_idx in start..end {
            let left = expected.get(line_idx).map_or(missing, String::as_str);
            let right = actual.get(line_idx).map_or(missing, String::as_str);
            let marker = if line_idx == i { ">" } else { " " };
            let _ = writeln!(&mut out, "{marker} {:>4}  expected: {left}", line_idx + 1);
            let _ = writeln!(&mut out, "{marker} {:>4}    actual: {right}", line_idx + 1);
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} steps, actual {} steps",
        expected.len(),
        actual.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_caret_marks_positions() {
        assert_eq!(render_caret("(12", 3, None), "(12|");
        assert_eq!(render_caret("(12", 0, None), "|(12");
        assert_eq!(render_caret("(12) 345", 2, Some((2, 7))), "(1[|2) 34]5");
        assert_eq!(render_caret("a|b", 1, None), "a|\\|b");
        assert_eq!(render_caret("", 0, None), "|");
    }

    #[test]
    fn diff_lines_points_at_first_mismatch() {
        let expected = vec!["a".to_string(), "b".to_string()];
        let actual = vec!["a".to_string(), "c".to_string()];
        let diff = diff_lines(&expected, &actual);
        assert!(diff.contains("first mismatch at step 2"), "{diff}");
        assert!(diff.contains(">    2  expected: b"), "{diff}");
        let same = diff_lines(&expected, &expected);
        assert!(!same.contains("mismatch"), "{same}");
    }
}
