use std::collections::HashMap;

use super::config::ScoringConfig;
use super::engine::normalize_key;
use super::factors::RangeOp;

/// Largest magnitude accepted for any table entry. Three entries at this
/// bound still sum without overflowing an `i64`.
pub const MAX_POINTS: i64 = i64::MAX / 4;

fn check_points(errors: &mut Vec<String>, field: String, points: i64) {
    if points.unsigned_abs() > MAX_POINTS as u64 {
        errors.push(format!(
            "{}: {} is out of range (limit is +/-{})",
            field, points, MAX_POINTS
        ));
    }
}

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Roles: no blank keys, no duplicates once case is folded
    if let Some(ref roles) = config.roles {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for (role, points) in roles {
            check_points(&mut errors, format!("scoring.roles.{}", role), *points);
            let key = normalize_key(role);
            if key.is_empty() {
                errors.push("scoring.roles: role name must not be empty".to_string());
            } else if let Some(previous) = seen.insert(key, role) {
                errors.push(format!(
                    "scoring.roles: '{}' and '{}' name the same role",
                    previous, role
                ));
            }
        }
    }

    // Size buckets
    if let Some(ref buckets) = config.company_size {
        for (i, bucket) in buckets.iter().enumerate() {
            check_points(
                &mut errors,
                format!("scoring.company_size[{}].score", i),
                bucket.score,
            );
            if let Err(e) = RangeOp::parse(&bucket.range) {
                errors.push(format!(
                    "scoring.company_size[{}].range: invalid '{}' - {}",
                    i, bucket.range, e
                ));
            }
        }
    }

    // Country tiers: each country belongs to at most one tier
    if let Some(ref tiers) = config.countries {
        let mut owner: HashMap<String, &str> = HashMap::new();
        for (i, tier) in tiers.iter().enumerate() {
            check_points(&mut errors, format!("scoring.countries[{}].score", i), tier.score);
            if tier.name.trim().is_empty() {
                errors.push(format!("scoring.countries[{}].name: must not be empty", i));
            }
            for country in &tier.countries {
                let key = normalize_key(country);
                if key.is_empty() {
                    errors.push(format!(
                        "scoring.countries[{}].countries: country name must not be empty",
                        i
                    ));
                } else if let Some(previous) = owner.insert(key, &tier.name) {
                    errors.push(format!(
                        "scoring.countries[{}]: '{}' is already listed in tier '{}'",
                        i, country, previous
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
