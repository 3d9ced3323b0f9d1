use serde::{Deserialize, Serialize};

/// How folder names from the two sources are brought onto a common key.
///
/// Surrounding whitespace is always trimmed. Matching is exact by default,
/// so `Auth` and `auth` are different folders unless `case_sensitive` is off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NamePolicy {
    pub case_sensitive: bool,
    pub trim_trailing_slash: bool,
}

impl Default for NamePolicy {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            trim_trailing_slash: true,
        }
    }
}

impl NamePolicy {
    /// Normalize a raw folder name into its join key
    pub fn normalize(&self, raw: &str) -> String {
        let mut name = raw.trim();
        if self.trim_trailing_slash {
            name = name.trim_end_matches('/');
        }
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }
}
