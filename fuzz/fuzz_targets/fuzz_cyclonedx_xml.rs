#![no_main]
use libfuzzer_sys::fuzz_target;
use sbom_extract::parsers::{PackageExtractor, XmlExtractor};

const MAX_WRAPPED_INPUT_LEN: usize = 10_000;

/// Fuzz the CycloneDX XML extractor.
///
/// Wraps input in a component list so the identity resolution runs on
/// arbitrary children, not only on documents that fail early.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let extractor = XmlExtractor::new();
        let _ = extractor.try_extract_str(s);

        if s.len() < MAX_WRAPPED_INPUT_LEN {
            let wrapped = format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.5" version="1">
  <components><component type="library">{s}</component></components>
</bom>"#,
            );
            let _ = extractor.try_extract_str(&wrapped);
            let _ = XmlExtractor::strict().try_extract_str(&wrapped);
        }
    }
});
