#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_extract::parsers::{JsonExtractor, PackageExtractor};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the CycloneDX JSON extractor, raw and as a single component body.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let extractor = JsonExtractor::new();
        let _ = extractor.try_extract_str(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(r#"{{"bomFormat":"CycloneDX","components":[{s}]}}"#);
            let _ = extractor.try_extract_str(&wrapped);
        }
    }
});
