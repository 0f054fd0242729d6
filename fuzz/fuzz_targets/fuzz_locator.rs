#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_extract::model::normalize_license_name;
use sbom_extract::Locator;

/// Fuzz the locator parser and the license normalizer on raw strings.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let locator = Locator::parse(s);
        assert!(!locator.version.contains('?'));
        let _ = normalize_license_name(s);
    }
});
