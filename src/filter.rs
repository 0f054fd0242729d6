//! Ecosystem filter over extracted packages.

use crate::model::PackageRecord;

/// Keep the packages whose purl belongs to the given ecosystem.
///
/// Matching is a plain prefix test on `pkg:<type>`, so records without a
/// purl (every XML-derived record) never match. Order is preserved and the
/// input is left untouched.
#[must_use]
pub fn filter_by_type(packages: &[PackageRecord], package_type: &str) -> Vec<PackageRecord> {
    let prefix = format!("pkg:{package_type}");
    packages
        .iter()
        .filter(|p| p.purl_str().starts_with(&prefix))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, purl: Option<&str>) -> PackageRecord {
        let record = PackageRecord::new("", name, "1.0");
        match purl {
            Some(purl) => record.with_purl(purl),
            None => record,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_by_type(&[], "npm").is_empty());
    }

    #[test]
    fn test_no_match() {
        let packages = vec![pkg("a", Some("pkg:pypi/a@1.0")), pkg("b", None)];
        assert!(filter_by_type(&packages, "npm").is_empty());
    }

    #[test]
    fn test_order_preserved_and_input_untouched() {
        let packages = vec![
            pkg("a", Some("pkg:npm/a@1.0")),
            pkg("b", Some("pkg:maven/org/b@1.0")),
            pkg("c", Some("pkg:npm/c@1.0")),
            pkg("d", None),
        ];
        let before = packages.clone();

        let npm = filter_by_type(&packages, "npm");
        let names: Vec<&str> = npm.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(packages, before);
    }

    #[test]
    fn test_prefix_semantics() {
        // "go" is a prefix of "golang"
        let packages = vec![pkg("x", Some("pkg:golang/x@1.0"))];
        assert_eq!(filter_by_type(&packages, "go").len(), 1);
        assert!(filter_by_type(&packages, "golang2").is_empty());
    }
}
