#![no_main]

use libfuzzer_sys::fuzz_target;
use mask_core::{CurrencyOptions, MaskGenerator, mask, mask_value};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let generators = [
        MaskGenerator::fixed("(99) 9999-9999"),
        MaskGenerator::fixed("AAA-9999"),
        MaskGenerator::dynamic_number(["(99) 9999-9999", "(99) 99999-9999"]),
        MaskGenerator::currency(CurrencyOptions::default().with_prefix("$ ")),
    ];
    for generator in &generators {
        let masked = mask(raw, generator);
        assert!(masked.anomaly.is_none(), "{:?}", masked.anomaly);
        assert_eq!(mask_value(&masked.value, generator), masked.value);
    }
});
