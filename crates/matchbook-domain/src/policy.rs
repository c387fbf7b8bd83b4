// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// An entity entitled to license an asset and collect royalties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rightsholder {
    pub id: u64,
    pub title: String,
}

/// A licensing policy category as configured by a rightsholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicensePolicy {
    pub id: u64,
    pub category_id: u64,
    pub category_name: String,
}

/// One (rightsholder, policy) pair from a territory's policy list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightsholderPolicy {
    pub rightsholder: Rightsholder,
    pub policy: LicensePolicy,
}

/// The licensing decision for one territory.
///
/// The service reports either a coarse allow/block verdict or the detailed
/// rightsholder policy list; order within the list is service-provided and
/// preserved. Territory keys are ISO 3166-1 alpha-2 codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TerritoryPolicy {
    Verdict(PolicyVerdict),
    Rightsholders(Vec<RightsholderPolicy>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyVerdict {
    Allow,
    Block,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coarse_policy_decodes() {
        let policy: TerritoryPolicy = serde_json::from_str("\"block\"").unwrap();
        assert_eq!(policy, TerritoryPolicy::Verdict(PolicyVerdict::Block));
    }

    #[test]
    fn test_detailed_policy_decodes_in_order() {
        let policy: TerritoryPolicy = serde_json::from_str(
            r#"[
                {"rightsholder": {"id": 7, "title": "Big Label"},
                 "policy": {"id": 1, "category_id": 10, "category_name": "monetize"}},
                {"rightsholder": {"id": 8, "title": "Small Label"},
                 "policy": {"id": 2, "category_id": 20, "category_name": "track"}}
            ]"#,
        )
        .unwrap();
        match policy {
            TerritoryPolicy::Rightsholders(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[0].rightsholder.id, 7);
                assert_eq!(list[1].policy.category_name, "track");
            }
            other => panic!("expected detailed policy list, got {other:?}"),
        }
    }
}
