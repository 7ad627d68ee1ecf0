//! Environment-driven test knobs.

use std::env;

pub const FUZZ_RUNS_ENV: &str = "MASK_CARET_FUZZ_RUNS";
pub const FUZZ_SEED_ENV: &str = "MASK_CARET_FUZZ_SEED";
pub const FIXTURE_FILTER_ENV: &str = "MASK_FIXTURE_FILTER";

const DEFAULT_FUZZ_RUNS: u64 = 64;
const DEFAULT_FUZZ_SEED: u64 = 0xC0FFEE;

pub fn parse_env_bool(key: &str) -> bool {
    match env::var(key).ok().as_deref() {
        Some("1") | Some("true") | Some("yes") | Some("on") => true,
        Some("0") | Some("false") | Some("no") | Some("off") | Some("") | None => false,
        Some(other) => panic!("unsupported {key} value '{other}'; use 1/0 or true/false"),
    }
}

/// Decimal or `0x`-prefixed hex.
pub fn parse_u64(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(hex) = trimmed.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        trimmed.parse::<u64>().ok()
    }
}

pub fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => parse_u64(&raw)
            .unwrap_or_else(|| panic!("unsupported {key} value '{raw}'; use decimal or 0x hex")),
        Err(_) => default,
    }
}

pub fn fuzz_runs() -> usize {
    env_u64(FUZZ_RUNS_ENV, DEFAULT_FUZZ_RUNS) as usize
}

pub fn fuzz_seed() -> u64 {
    env_u64(FUZZ_SEED_ENV, DEFAULT_FUZZ_SEED)
}

/// Substring filter on fixture names.
#[derive(Clone, Debug, Default)]
pub struct FixtureFilter {
    raw: Option<String>,
}

impl FixtureFilter {
    pub fn new(raw: Option<String>) -> Self {
        Self { raw }
    }

    pub fn matches(&self, name: &str) -> bool {
        let Some(filter) = &self.raw else {
            return true;
        };
        name.contains(filter.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.raw.is_some()
    }
}

pub fn fixture_filter() -> FixtureFilter {
    FixtureFilter::new(env::var(FIXTURE_FILTER_ENV).ok().filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_u64_accepts_decimal_and_hex() {
        assert_eq!(parse_u64("42"), Some(42));
        assert_eq!(parse_u64(" 0xC0FFEE "), Some(0xC0FFEE));
        assert_eq!(parse_u64(""), None);
        assert_eq!(parse_u64("0xzz"), None);
        assert_eq!(parse_u64("-1"), None);
    }

    #[test]
    fn filter_matches_substrings() {
        let all = FixtureFilter::default();
        assert!(all.matches("anything"));
        assert!(!all.is_active());
        let some = FixtureFilter::new(Some("phone".to_string()));
        assert!(some.matches("phone_typing"));
        assert!(!some.matches("currency"));
    }

    #[test]
    fn unset_knobs_use_defaults() {
        assert_eq!(env_u64("MASK_TEST_SUPPORT_SURELY_UNSET", 7), 7);
        assert!(!parse_env_bool("MASK_TEST_SUPPORT_SURELY_UNSET"));
    }
}
