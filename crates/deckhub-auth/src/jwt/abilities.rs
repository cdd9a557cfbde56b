//! Ability wire-name mapping.

use deckhub_core::config::AbilityNamesConfig;
use deckhub_entity::token::Ability;

/// Bidirectional mapping between [`Ability`] values and their configured
/// wire names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityMap {
    access_api: String,
    issue_access_token: String,
}

impl AbilityMap {
    /// Builds the mapping from configuration.
    pub fn new(config: &AbilityNamesConfig) -> Self {
        Self {
            access_api: config.access_api.clone(),
            issue_access_token: config.issue_access_token.clone(),
        }
    }

    /// Wire name of `ability`.
    pub fn name(&self, ability: Ability) -> &str {
        match ability {
            Ability::AccessApi => &self.access_api,
            Ability::IssueAccessToken => &self.issue_access_token,
        }
    }

    /// Ability for a wire name, if known.
    pub fn parse(&self, name: &str) -> Option<Ability> {
        Ability::ALL
            .into_iter()
            .find(|ability| self.name(*ability) == name)
    }
}

impl Default for AbilityMap {
    fn default() -> Self {
        Self::new(&AbilityNamesConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let map = AbilityMap::default();
        assert_eq!(map.name(Ability::AccessApi), "access-api");
        assert_eq!(map.parse("issue-access-token"), Some(Ability::IssueAccessToken));
        assert_eq!(map.parse("admin"), None);
    }

    #[test]
    fn test_custom_names() {
        let map = AbilityMap::new(&AbilityNamesConfig {
            access_api: "api".to_string(),
            issue_access_token: "mint".to_string(),
        });
        assert_eq!(map.parse("mint"), Some(Ability::IssueAccessToken));
        assert_eq!(map.parse("access-api"), None);
    }
}
