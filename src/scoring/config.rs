use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main scoring configuration.
///
/// Three independent lookup tables. A contact's score is the sum of the points
/// found in each table; a value missing from a table contributes 0. An omitted
/// table contributes 0 for every contact.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   roles:
///     ceo: 50
///     manager: 40
///   company_size:
///     - { range: "10000+", score: 30 }
///     - { range: "1001-9999", score: 24 }
///   countries:
///     - { name: tier_1, score: 20, countries: [usa, uk] }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Job title to points. Matched case-insensitively.
    #[serde(default)]
    pub roles: Option<BTreeMap<String, i64>>,

    /// Company size buckets, first match wins
    #[serde(default)]
    pub company_size: Option<Vec<SizeBucket>>,

    /// Country tiers. Country names are matched case-insensitively.
    #[serde(default)]
    pub countries: Option<Vec<CountryTier>>,
}

/// Company size bucket.
///
/// Range format: "<N", "<=N", ">N", ">=N", "N+", "N-M" (inclusive) or "N"
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SizeBucket {
    pub range: String,
    pub score: i64,
}

/// A named group of countries sharing the same points.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CountryTier {
    pub name: String,
    pub score: i64,
    pub countries: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        // Role outweighs company size, which outweighs country (0.5 / 0.3 / 0.2
        // of a 0-100 scale per criterion).
        let roles = [
            ("ceo", 50),
            ("cfo", 45),
            ("cto", 45),
            ("manager", 40),
            ("consultant", 35),
            ("engineer", 30),
            ("developer", 25),
            ("analyst", 20),
            ("designer", 15),
            ("intern", 5),
        ]
        .into_iter()
        .map(|(role, score)| (role.to_string(), score))
        .collect();

        let company_size = [
            ("10000+", 30),
            ("5001-10000", 27),
            ("1001-5000", 24),
            ("501-1000", 21),
            ("201-500", 18),
            ("51-200", 15),
            ("11-50", 9),
            ("1-10", 6),
        ]
        .into_iter()
        .map(|(range, score)| SizeBucket {
            range: range.to_string(),
            score,
        })
        .collect();

        let countries = vec![
            CountryTier {
                name: "tier_1".to_string(),
                score: 20,
                countries: ["usa", "uk", "germany", "france", "canada", "australia"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            },
            CountryTier {
                name: "tier_2".to_string(),
                score: 16,
                countries: ["spain", "italy", "brazil", "india"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            },
        ];

        Self {
            roles: Some(roles),
            company_size: Some(company_size),
            countries: Some(countries),
        }
    }
}
