#![no_main]

use libfuzzer_sys::fuzz_target;
use mask_core::MaskGenerator;
use masked_input::{FieldId, MaskedInputStore, char_count};

const FIELD: FieldId = FieldId::from_raw(1);

// Each input byte is one widget action; the low bits pick the action and the
// high bits its argument.
fuzz_target!(|data: &[u8]| {
    let mut store = MaskedInputStore::new();
    let generator = if data.first().is_some_and(|b| b & 1 == 1) {
        MaskGenerator::dynamic_number(["(99) 9999-9999", "(99) 99999-9999"])
    } else {
        MaskGenerator::fixed("(99) 9999-9999")
    };
    store.ensure_field(FIELD, Some(generator), "");

    for &byte in data.iter().skip(1) {
        let arg = (byte >> 3) as usize;
        match byte & 0b111 {
            0 | 1 => {
                let ch = char::from(b'0' + (arg % 10) as u8);
                store.insert_text(FIELD, ch.encode_utf8(&mut [0; 4]));
            }
            2 => {
                let ch = [' ', '(', ')', '-', 'x'][arg % 5];
                store.insert_text(FIELD, ch.encode_utf8(&mut [0; 4]));
            }
            3 => {
                store.backspace(FIELD);
            }
            4 => {
                store.delete(FIELD);
            }
            5 => store.set_caret(FIELD, arg, false),
            6 => store.set_caret(FIELD, arg, true),
            _ => store.select_all(FIELD),
        }
        let display = store.display(FIELD).unwrap_or("");
        let caret = store.caret(FIELD).unwrap_or(0);
        assert!(caret <= char_count(display), "caret {caret} past {display:?}");
    }
});
