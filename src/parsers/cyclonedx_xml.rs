//! CycloneDX XML package extractor.
//!
//! Component identity in XML BOMs is spread over the `bom-ref` attribute
//! (a composite locator) and discrete child elements. Values are collected
//! per field first and then resolved with a fixed precedence, so the result
//! does not depend on how the tree happens to be walked:
//!
//! | field   | precedence                                                        |
//! |---------|-------------------------------------------------------------------|
//! | vendor  | last `group` > locator vendor > first purl type                   |
//! | name    | locator name > first `name`                                       |
//! | version | last `version` (leading `v` stripped) > locator version           |
//!
//! Within each field, elements that are direct children of the component
//! outrank elements nested deeper (supplier, licenses). Nested components
//! are never searched, they become records of their own.

use super::traits::{read_bom_file, PackageExtractor};
use super::xml_tree::{parse_document, XmlElement};
use crate::error::Result;
use crate::model::{licenses_from_xml, strip_version_prefix, Locator, PackageRecord};
use std::path::Path;

/// Namespace used by the strict extractor for license lookups.
pub const CYCLONEDX_NS_1_5: &str = "http://cyclonedx.org/schema/bom/1.5";

/// Extractor for CycloneDX XML BOMs
#[derive(Debug, Clone, Default)]
pub struct XmlExtractor {
    /// When set, license elements must be bound to this namespace
    license_namespace: Option<String>,
}

impl XmlExtractor {
    /// Create an extractor that accepts license elements in any namespace
    #[must_use]
    pub const fn new() -> Self {
        Self {
            license_namespace: None,
        }
    }

    /// Create an extractor that only reads licenses in the CycloneDX 1.5 namespace
    #[must_use]
    pub fn strict() -> Self {
        Self::with_license_namespace(CYCLONEDX_NS_1_5)
    }

    /// Create an extractor pinned to a specific license namespace
    #[must_use]
    pub fn with_license_namespace(namespace: impl Into<String>) -> Self {
        Self {
            license_namespace: Some(namespace.into()),
        }
    }

    /// Whether license lookups are pinned to a namespace
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.license_namespace.is_some()
    }

    fn in_license_namespace(&self, element: &XmlElement) -> bool {
        match &self.license_namespace {
            Some(expected) => element.namespace.as_deref() == Some(expected.as_str()),
            None => true,
        }
    }

    /// `licenses/license/{id,name}` directly under the component.
    fn component_licenses(&self, component: &XmlElement) -> Vec<String> {
        let mut ids = Vec::new();
        let mut names = Vec::new();

        let licenses = component
            .children_named("licenses")
            .filter(|e| self.in_license_namespace(e))
            .flat_map(|e| e.children_named("license"))
            .filter(|e| self.in_license_namespace(e));

        for license in licenses {
            for child in &license.children {
                if !self.in_license_namespace(child) {
                    continue;
                }
                match child.local_name.as_str() {
                    "id" => ids.push(child.text.as_str()),
                    "name" => names.push(child.text.as_str()),
                    _ => {}
                }
            }
        }

        licenses_from_xml(&ids, &names)
    }

    fn package_from_component(&self, component: &XmlElement) -> PackageRecord {
        let licenses = self.component_licenses(component);

        let locator = component
            .attribute("bom-ref")
            .filter(|r| r.contains('/'))
            .map(Locator::parse)
            .unwrap_or_default();

        let fields = FieldCandidates::collect(component);

        let vendor = fields
            .groups
            .last()
            .map(|g| (*g).to_string())
            .or_else(|| Some(locator.vendor.clone()).filter(|v| !v.is_empty()))
            .or_else(|| {
                fields
                    .purls
                    .iter()
                    .map(|p| Locator::purl_type(p))
                    .find(|t| !t.is_empty())
            })
            .unwrap_or_default();

        let name = if locator.name.is_empty() {
            fields.names.first().map(|n| (*n).to_string()).unwrap_or_default()
        } else {
            locator.name
        };

        let version = fields
            .versions
            .last()
            .map(|v| strip_version_prefix(v).to_string())
            .unwrap_or(locator.version);

        let scope = component
            .children_named("scope")
            .find_map(XmlElement::non_empty_text)
            .unwrap_or_default()
            .to_string();

        let mut record = PackageRecord::new(vendor, name, version).with_licenses(licenses);
        record.scope = scope;
        record
    }
}

/// Non-empty text of identity elements found under one component, in
/// precedence order: direct children first, then deeper descendants, each
/// group in document order.
#[derive(Debug, Default)]
struct FieldCandidates<'a> {
    groups: Vec<&'a str>,
    names: Vec<&'a str>,
    versions: Vec<&'a str>,
    purls: Vec<&'a str>,
}

impl<'a> FieldCandidates<'a> {
    fn collect(component: &'a XmlElement) -> Self {
        let mut direct = Self::default();
        let mut nested = Self::default();

        for child in &component.children {
            if is_component_boundary(child) {
                continue;
            }
            if let Some(text) = child.non_empty_text() {
                direct.push(&child.local_name, text);
            }
            nested.push_subtree(child);
        }

        // Direct children outrank nested ones: for "first wins" fields they
        // go in front, for "last wins" fields they go at the back.
        Self {
            groups: [nested.groups, direct.groups].concat(),
            names: [direct.names, nested.names].concat(),
            versions: [nested.versions, direct.versions].concat(),
            purls: [direct.purls, nested.purls].concat(),
        }
    }

    /// Candidates below `element`, stopping at nested components.
    fn push_subtree(&mut self, element: &'a XmlElement) {
        for child in &element.children {
            if is_component_boundary(child) {
                continue;
            }
            if let Some(text) = child.non_empty_text() {
                self.push(&child.local_name, text);
            }
            self.push_subtree(child);
        }
    }

    fn push(&mut self, local_name: &str, text: &'a str) {
        if local_name.ends_with("group") {
            self.groups.push(text);
        }
        if local_name.ends_with("name") {
            self.names.push(text);
        }
        if local_name.ends_with("version") {
            self.versions.push(text);
        }
        if local_name.ends_with("purl") {
            self.purls.push(text);
        }
    }
}

/// Sub-components carry their own identity and are extracted separately.
fn is_component_boundary(element: &XmlElement) -> bool {
    element.local_name.ends_with("component") || element.local_name.ends_with("components")
}

impl PackageExtractor for XmlExtractor {
    fn format_name(&self) -> &str {
        "CycloneDX XML"
    }

    fn try_extract_str(&self, content: &str) -> Result<Vec<PackageRecord>> {
        let root = parse_document(content)?;

        let packages = root
            .children
            .iter()
            .filter(|child| child.local_name.ends_with("components"))
            .flat_map(XmlElement::descendants)
            .filter(|element| element.local_name.ends_with("component"))
            .map(|component| self.package_from_component(component))
            .collect();

        Ok(packages)
    }

    fn extract(&self, path: &Path) -> Vec<PackageRecord> {
        match read_bom_file(path).and_then(|content| self.try_extract_str(&content)) {
            Ok(packages) => {
                tracing::debug!(
                    "Extracted {} packages from {}",
                    packages.len(),
                    path.display()
                );
                packages
            }
            Err(e) => {
                tracing::debug!("Unable to parse {} {}", path.display(), e);
                tracing::warn!(
                    "Unable to produce Software Bill-of-Materials for this project. \
                     Execute the scan after installing the dependencies!"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(xml: &str) -> Vec<PackageRecord> {
        XmlExtractor::new().try_extract_str(xml).expect("valid XML")
    }

    fn bom(components: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<bom xmlns="http://cyclonedx.org/schema/bom/1.5" version="1">
  <components>{components}</components>
</bom>"#
        )
    }

    #[test]
    fn test_bom_ref_seeds_identity() {
        let packages = extract(&bom(
            r#"<component type="library" bom-ref="pkg:npm/lodash@4.17.21"/>"#,
        ));
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].vendor, "npm");
        assert_eq!(packages[0].name, "lodash");
        assert_eq!(packages[0].version, "4.17.21");
        assert!(packages[0].purl.is_none());
    }

    #[test]
    fn test_group_overrides_locator_vendor() {
        let packages = extract(&bom(
            r#"<component type="library" bom-ref="pkg:maven/org.old/lib@1.0">
                 <group>org.new</group><name>lib</name><version>v1.1</version>
               </component>"#,
        ));
        assert_eq!(packages[0].vendor, "org.new");
        assert_eq!(packages[0].version, "1.1");
    }

    #[test]
    fn test_locator_name_wins_over_name_element() {
        let packages = extract(&bom(
            r#"<component type="library" bom-ref="pkg:npm/real-name@1.0.0">
                 <name>other-name</name>
               </component>"#,
        ));
        assert_eq!(packages[0].name, "real-name");
    }

    #[test]
    fn test_purl_vendor_is_last_resort() {
        let packages = extract(&bom(
            r#"<component type="library">
                 <name>requests</name><version>2.31.0</version>
                 <purl>pkg:pypi/requests@2.31.0</purl>
               </component>"#,
        ));
        assert_eq!(packages[0].vendor, "pypi");
        assert_eq!(packages[0].name, "requests");
    }

    #[test]
    fn test_locator_vendor_beats_purl_vendor() {
        let packages = extract(&bom(
            r#"<component type="library" bom-ref="acme/widget@2.0">
                 <purl>pkg:generic/widget@2.0</purl>
               </component>"#,
        ));
        assert_eq!(packages[0].vendor, "acme");
    }

    #[test]
    fn test_supplier_name_does_not_shadow_component_name() {
        let packages = extract(&bom(
            r#"<component type="library">
                 <supplier><name>Acme Corp</name></supplier>
                 <name>widget</name><version>1.0</version>
               </component>"#,
        ));
        assert_eq!(packages[0].name, "widget");
    }

    #[test]
    fn test_component_without_identity_is_kept() {
        let packages = extract(&bom(r#"<component type="library" bom-ref="opaque-id"/>"#));
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].vendor, "");
        assert_eq!(packages[0].name, "");
        assert_eq!(packages[0].version, "");
        assert!(packages[0].licenses.is_empty());
    }

    #[test]
    fn test_licenses_prefer_ids() {
        let packages = extract(&bom(
            r#"<component type="library" bom-ref="pkg:npm/a@1">
                 <licenses>
                   <license><id>MIT</id></license>
                   <license><name>Some Other</name></license>
                 </licenses>
               </component>
               <component type="library" bom-ref="pkg:npm/b@1">
                 <licenses>
                   <license><name>https://opensource.org/licenses/MIT.txt</name></license>
                   <license><name>apache-2.0/mit</name></license>
                 </licenses>
               </component>"#,
        ));
        assert_eq!(packages[0].licenses, vec!["MIT"]);
        assert_eq!(packages[1].licenses, vec!["MIT", "APACHE-2.0 OR MIT"]);
    }

    #[test]
    fn test_expression_licenses_are_ignored() {
        let packages = extract(&bom(
            r#"<component type="library" bom-ref="pkg:npm/a@1">
                 <licenses><expression>MIT OR Apache-2.0</expression></licenses>
               </component>"#,
        ));
        assert!(packages[0].licenses.is_empty());
    }

    #[test]
    fn test_nested_components_are_extracted() {
        let packages = extract(&bom(
            r#"<component type="application" bom-ref="pkg:npm/parent@1.0.0">
                 <name>parent</name><version>1.0.0</version>
                 <components>
                   <component type="library" bom-ref="pkg:npm/child@2.0.0">
                     <name>child</name><version>2.0.0</version>
                   </component>
                 </components>
               </component>"#,
        ));
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "parent");
        assert_eq!(packages[0].version, "1.0.0");
        assert_eq!(packages[1].name, "child");
        assert_eq!(packages[1].version, "2.0.0");
    }

    #[test]
    fn test_nested_component_does_not_override_parent_locator() {
        let packages = extract(&bom(
            r#"<component type="application" bom-ref="pkg:npm/parent@1.0.0">
                 <components>
                   <component type="library" bom-ref="child">
                     <group>org.child</group>
                     <name>child</name>
                     <version>2.0.0</version>
                     <purl>pkg:maven/org.child/child@2.0.0</purl>
                   </component>
                 </components>
               </component>"#,
        ));
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].vendor, "npm");
        assert_eq!(packages[0].name, "parent");
        assert_eq!(packages[0].version, "1.0.0");
        assert_eq!(packages[1].vendor, "org.child");
        assert_eq!(packages[1].name, "child");
        assert_eq!(packages[1].version, "2.0.0");
    }

    #[test]
    fn test_nested_component_name_is_not_a_fallback() {
        let packages = extract(&bom(
            r#"<component type="application">
                 <components>
                   <component type="library"><name>child</name></component>
                 </components>
               </component>"#,
        ));
        assert_eq!(packages[0].name, "");
        assert_eq!(packages[1].name, "child");
    }

    #[test]
    fn test_scope_is_read() {
        let packages = extract(&bom(
            r#"<component type="library" bom-ref="pkg:npm/a@1"><scope>optional</scope></component>"#,
        ));
        assert_eq!(packages[0].scope, "optional");
    }

    #[test]
    fn test_metadata_component_is_not_a_package() {
        let packages = extract(
            r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.5">
                 <metadata><component type="application"><name>app</name></component></metadata>
                 <components/>
               </bom>"#,
        );
        assert!(packages.is_empty());
    }

    #[test]
    fn test_strict_namespace_ignores_other_schema_versions() {
        let xml = r#"<bom xmlns="http://cyclonedx.org/schema/bom/1.4">
                 <components><component type="library" bom-ref="pkg:npm/a@1">
                   <licenses><license><id>MIT</id></license></licenses>
                 </component></components>
               </bom>"#;
        let lenient = XmlExtractor::new().try_extract_str(xml).expect("valid");
        let strict = XmlExtractor::strict().try_extract_str(xml).expect("valid");
        assert_eq!(lenient[0].licenses, vec!["MIT"]);
        assert!(strict[0].licenses.is_empty());
        assert_eq!(strict[0].name, "a");
        assert!(XmlExtractor::strict().is_strict());
    }

    #[test]
    fn test_malformed_xml_is_error_in_strict_api() {
        assert!(XmlExtractor::new().try_extract_str("<bom><components>").is_err());
    }
}
