//! Seeded random edit sequences. Reproduce a failure with
//! `MASK_CARET_FUZZ_SEED=<seed> MASK_CARET_FUZZ_RUNS=1`.

use mask_core::{CurrencyOptions, MaskGenerator, mask_value, process_value};
use mask_test_support::{Lcg, fuzz_runs, fuzz_seed, render_caret};
use masked_input::{FieldId, MaskedInputStore, char_count};

const FIELD: FieldId = FieldId::from_raw(1);
const STEPS_PER_RUN: usize = 48;
const ALPHABET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '5', 'a', 'Z', '.', ',', '-', '(', ')',
    ' ', '$', '€',
];

fn generators() -> Vec<(&'static str, MaskGenerator)> {
    vec![
        ("phone", MaskGenerator::fixed("(99) 9999-9999")),
        (
            "dynamic_phone",
            MaskGenerator::dynamic_number(["(99) 9999-9999", "(99) 99999-9999"]),
        ),
        ("date", MaskGenerator::fixed("99/99/9999")),
        (
            "currency",
            MaskGenerator::currency(
                CurrencyOptions::default()
                    .with_prefix("$ ")
                    .with_thousand_separator('.')
                    .with_cents_separator(','),
            ),
        ),
    ]
}

fn random_text(rng: &mut Lcg, max_len: usize) -> String {
    let len = rng.gen_inclusive(1, max_len);
    (0..len).map(|_| *rng.pick(ALPHABET)).collect()
}

/// Applies one random widget action and returns a label for failure output.
fn random_action(rng: &mut Lcg, store: &mut MaskedInputStore) -> String {
    let len = char_count(store.display(FIELD).unwrap_or(""));
    match rng.gen_range(8) {
        0 | 1 | 2 => {
            let text = random_text(rng, 1);
            store.insert_text(FIELD, &text);
            format!("type {text:?}")
        }
        3 => {
            let text = random_text(rng, 6);
            store.insert_text(FIELD, &text);
            format!("paste {text:?}")
        }
        4 => {
            store.backspace(FIELD);
            "backspace".to_string()
        }
        5 => {
            store.delete(FIELD);
            "delete".to_string()
        }
        6 => {
            let at = rng.gen_inclusive(0, len + 1);
            store.set_caret(FIELD, at, false);
            format!("caret {at}")
        }
        _ => {
            let start = rng.gen_inclusive(0, len);
            let end = rng.gen_inclusive(0, len);
            store.select(FIELD, start, end);
            format!("select {start}..{end}")
        }
    }
}

#[test]
fn random_edits_keep_display_stable_and_caret_in_bounds() {
    let runs = fuzz_runs();
    let base_seed = fuzz_seed();
    for (name, generator) in generators() {
        for run in 0..runs {
            let seed = base_seed.wrapping_add(run as u64);
            let mut rng = Lcg::new(seed);
            let mut store = MaskedInputStore::new();
            store.ensure_field(FIELD, Some(generator.clone()), "");
            let mut history = Vec::new();

            for _ in 0..STEPS_PER_RUN {
                history.push(random_action(&mut rng, &mut store));

                let display = store.display(FIELD).unwrap_or("").to_owned();
                let caret = store.caret(FIELD).unwrap_or(0);
                let value = store.value(FIELD).unwrap_or("").to_owned();
                let context = || {
                    format!(
                        "generator {name}, seed {seed:#x}\nstate: {}\nactions: {history:?}",
                        render_caret(&display, caret, None)
                    )
                };

                assert!(caret <= char_count(&display), "caret out of bounds\n{}", context());
                if !display.is_empty() {
                    assert_eq!(
                        mask_value(&display, &generator),
                        display,
                        "display not stable under re-masking\n{}",
                        context()
                    );
                }
                assert_eq!(
                    value,
                    process_value(&display, Some(&generator)),
                    "value out of sync with display\n{}",
                    context()
                );
                assert!(
                    value.chars().all(|c| c.is_ascii_digit()),
                    "non-digit in value {value:?}\n{}",
                    context()
                );
            }
        }
    }
}

#[test]
fn random_edits_without_mask_are_plain_text() {
    let mut rng = Lcg::new(fuzz_seed());
    let mut store = MaskedInputStore::new();
    store.ensure_field(FIELD, None, "");
    for _ in 0..fuzz_runs() * 4 {
        random_action(&mut rng, &mut store);
        let display = store.display(FIELD).unwrap_or("");
        assert_eq!(store.value(FIELD), Some(display));
        assert!(store.caret(FIELD).unwrap_or(0) <= char_count(display));
    }
}
