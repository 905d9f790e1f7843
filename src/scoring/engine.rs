use anyhow::{bail, Result};
use std::collections::HashMap;

use super::config::ScoringConfig;
use super::factors::{parse_company_size, RangeOp};
use super::validation::validate_scoring;
use crate::contacts::Contact;

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,           // "Role", "Company size", "Country"
    pub value: String,           // Raw cell value as read
    pub matched: Option<String>, // Table key that matched, None when unrecognized
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: i64,
    pub breakdown: ScoreBreakdown,
}

impl ScoreResult {
    /// True when at least one criterion fell back to 0 because its value was
    /// not in the table.
    pub fn has_unrecognized(&self) -> bool {
        self.breakdown.factors.iter().any(|f| f.matched.is_none())
    }
}

/// Lookup tables compiled from a [`ScoringConfig`].
///
/// Keys are lowercased and ranges parsed once, so [`Scorer::score`] never
/// fails.
#[derive(Debug, Clone)]
pub struct Scorer {
    roles: HashMap<String, i64>,
    size_buckets: Vec<(String, RangeOp, i64)>,
    countries: HashMap<String, (String, i64)>,
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> Result<Self> {
        if let Err(errors) = validate_scoring(config) {
            bail!("Invalid scoring config: {}", errors.join("; "));
        }

        let roles = config
            .roles
            .iter()
            .flatten()
            .map(|(role, points)| (normalize_key(role), *points))
            .collect();

        let mut size_buckets = Vec::new();
        for bucket in config.company_size.iter().flatten() {
            size_buckets.push((
                bucket.range.clone(),
                RangeOp::parse(&bucket.range)?,
                bucket.score,
            ));
        }

        let mut countries = HashMap::new();
        for tier in config.countries.iter().flatten() {
            for country in &tier.countries {
                countries.insert(normalize_key(country), (tier.name.clone(), tier.score));
            }
        }

        Ok(Self {
            roles,
            size_buckets,
            countries,
        })
    }

    /// Score a contact. Total over any input: unrecognized values score 0.
    pub fn score(&self, contact: &Contact) -> ScoreResult {
        let factors = vec![
            self.role_factor(&contact.role),
            self.size_factor(&contact.company_size),
            self.country_factor(&contact.country),
        ];
        let score = factors
            .iter()
            .fold(0i64, |total, f| total.saturating_add(f.points));

        ScoreResult {
            score,
            breakdown: ScoreBreakdown { factors },
        }
    }

    fn role_factor(&self, role: &str) -> FactorContribution {
        let key = normalize_key(role);
        let points = self.roles.get(&key).copied();
        FactorContribution {
            label: "Role".to_string(),
            value: role.to_string(),
            matched: points.map(|_| key),
            points: points.unwrap_or(0),
        }
    }

    fn size_factor(&self, company_size: &str) -> FactorContribution {
        let bucket = parse_company_size(company_size).and_then(|headcount| {
            self.size_buckets
                .iter()
                .find(|(_, range, _)| range.matches(headcount))
        });
        FactorContribution {
            label: "Company size".to_string(),
            value: company_size.to_string(),
            matched: bucket.map(|(label, _, _)| label.clone()),
            points: bucket.map(|(_, _, points)| *points).unwrap_or(0),
        }
    }

    fn country_factor(&self, country: &str) -> FactorContribution {
        let tier = self.countries.get(&normalize_key(country));
        FactorContribution {
            label: "Country".to_string(),
            value: country.to_string(),
            matched: tier.map(|(name, _)| name.clone()),
            points: tier.map(|(_, points)| *points).unwrap_or(0),
        }
    }
}

pub(crate) fn normalize_key(s: &str) -> String {
    s.trim().to_lowercase()
}
