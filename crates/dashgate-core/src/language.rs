//! Default UI language setting.
//!
//! The dashboard UI picks its initial locale from the `lang` query parameter,
//! then local storage, then a value the server inlines into the HTML, then the
//! browser. This type is the server-side half: an optional tag that is both
//! injected into served HTML and appended to root redirects.

use std::fmt;

use crate::error::CoreError;

const MAX_TAG_LEN: usize = 35;

/// An optional, validated language tag such as `en` or `zh-CN`.
///
/// An empty string means "not configured".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultLanguage(Option<String>);

impl DefaultLanguage {
    /// Validate a tag. Empty input yields an unset language.
    pub fn new(tag: impl Into<String>) -> Result<Self, CoreError> {
        let tag = tag.into();
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(Self(None));
        }

        let valid = tag.len() <= MAX_TAG_LEN
            && tag
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !valid {
            return Err(CoreError::InvalidLanguage(tag.to_string()));
        }

        Ok(Self(Some(tag.to_string())))
    }

    /// No default language.
    pub const fn unset() -> Self {
        Self(None)
    }

    /// The tag, if one is configured.
    pub fn tag(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub const fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl fmt::Display for DefaultLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_means_unset() {
        let lang = DefaultLanguage::new("").unwrap();
        assert!(!lang.is_set());
        assert_eq!(lang.tag(), None);
        assert_eq!(lang, DefaultLanguage::unset());
    }

    #[test]
    fn test_accepts_region_tags() {
        let lang = DefaultLanguage::new("zh-CN").unwrap();
        assert_eq!(lang.tag(), Some("zh-CN"));
        assert_eq!(lang.to_string(), "zh-CN");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(DefaultLanguage::new(" en ").unwrap().tag(), Some("en"));
    }

    #[test]
    fn test_rejects_script_breaking_characters() {
        for bad in ["en'", "en&x=1", "</script>", "e n"] {
            assert!(
                matches!(DefaultLanguage::new(bad), Err(CoreError::InvalidLanguage(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_overlong_tags() {
        assert!(DefaultLanguage::new("a".repeat(36)).is_err());
    }
}
