//! Composite package locators (`bom-ref` / purl-like strings).
//!
//! Real-world producers put all sorts of things in `bom-ref`: proper purls,
//! percent-encoded purls, `group/name@version` shorthands, Maven coordinates
//! with extra path segments. The parser here is deliberately positional: the
//! number of `/`-separated segments decides which one is the vendor.
//!
//! | segments | vendor            | name@version |
//! |----------|-------------------|--------------|
//! | 1        | (empty)           | segment 0    |
//! | 2        | segment 0         | segment 1    |
//! | 3        | segment 1         | segment 2    |
//! | > 3      | second-to-last    | last         |
//!
//! Downstream matching depends on exactly this precedence, so it must not be
//! replaced by a general purl parser.

use super::package::{strip_version_prefix, ANY_VERSION};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete identity fields recovered from a locator string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub vendor: String,
    pub name: String,
    pub version: String,
}

impl Locator {
    /// Parse a locator. Never fails; malformed input yields degenerate fields.
    #[must_use]
    pub fn parse(locator: &str) -> Self {
        let decoded = unquote_plus(locator);
        let segments: Vec<&str> = decoded.split('/').collect();

        let (vendor, tail) = match segments.len() {
            0 | 1 => ("", decoded.as_str()),
            2 => (segments[0], segments[1]),
            3 => (segments[1], segments[2]),
            n => (segments[n - 2], segments[n - 1]),
        };
        let vendor = vendor.replace("pkg:", "");

        let parts: Vec<&str> = tail.split('@').collect();
        let (name, version) = if parts.len() >= 2 {
            (parts[parts.len() - 2], parts[parts.len() - 1])
        } else {
            (tail, ANY_VERSION)
        };

        let version = version.split('?').next().unwrap_or_default();
        let version = strip_version_prefix(version);

        Self {
            vendor,
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// Package type of a purl: its first `/`-segment without the `pkg:` scheme.
    ///
    /// `pkg:maven/org.slf4j/slf4j-api@2.0.9` yields `maven`.
    #[must_use]
    pub fn purl_type(purl: &str) -> String {
        purl.split('/').next().unwrap_or_default().replace("pkg:", "")
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.vendor, self.name, self.version)
    }
}

/// Percent-decode a string, treating `+` as an encoded space.
///
/// Malformed escapes are kept literally and invalid UTF-8 is replaced.
pub(crate) fn unquote_plus(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
