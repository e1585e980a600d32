//! Resolver configuration
//!
//! Controls separator normalization, which method set the get/set entry points scan, and whether
//! instantiation may fall back to the default-implementation table.

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolverConfig {
    /// Characters removed from property names before normalized lookup
    pub separators: Vec<char>,
    /// Method set scanned by `get`/`set`
    pub method_source: MethodSource,
    /// Whether `instantiate_or_default` may use the insertion-ordered defaults
    pub fallback_to_default_impl: bool,
}

/// Which operations of a type accessor lookup scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MethodSource {
    /// Declared operations plus those inherited from the base object type
    #[default]
    Exposed,
    /// Only operations declared on the type itself
    Declared,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            separators: vec!['_'],
            method_source: MethodSource::Exposed,
            fallback_to_default_impl: true,
        }
    }
}

impl ResolverConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separators stripped by normalized lookup
    pub fn with_separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
        self.separators = separators.into_iter().collect();
        self
    }

    /// Set the method set scanned by `get`/`set`
    pub fn with_method_source(mut self, source: MethodSource) -> Self {
        self.method_source = source;
        self
    }

    /// Enable or disable the default-implementation fallback
    pub fn with_fallback_to_default_impl(mut self, enabled: bool) -> Self {
        self.fallback_to_default_impl = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_separators() {
        let config = ResolverConfig::default();
        assert_eq!(config.separators, vec!['_']);
    }

    #[test]
    fn test_default_config_method_source() {
        let config = ResolverConfig::default();
        assert_eq!(config.method_source, MethodSource::Exposed);
    }

    #[test]
    fn test_default_config_fallback() {
        let config = ResolverConfig::default();
        assert!(config.fallback_to_default_impl);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(ResolverConfig::new(), ResolverConfig::default());
    }

    #[test]
    fn test_builder_chaining() {
        let config = ResolverConfig::new()
            .with_separators(['_', '-', ' '])
            .with_method_source(MethodSource::Declared)
            .with_fallback_to_default_impl(false);
        assert_eq!(config.separators, vec!['_', '-', ' ']);
        assert_eq!(config.method_source, MethodSource::Declared);
        assert!(!config.fallback_to_default_impl);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: ResolverConfig =
            serde_json::from_str(r#"{"method_source":"declared"}"#).expect("valid config json");
        assert_eq!(config.method_source, MethodSource::Declared);
        assert_eq!(config.separators, vec!['_']);
        assert!(config.fallback_to_default_impl);
    }
}
