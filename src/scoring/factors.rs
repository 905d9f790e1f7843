use anyhow::{bail, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum RangeOp {
    LessThan(u64),
    LessEqual(u64),
    GreaterThan(u64),
    GreaterEqual(u64),
    Equal(u64),
    Between(u64, u64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix(">") {
            Ok(RangeOp::GreaterThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_prefix("<") {
            Ok(RangeOp::LessThan(val.trim().parse()?))
        } else if let Some(val) = s.strip_suffix('+') {
            // "10000+" is how size buckets are usually labelled
            Ok(RangeOp::GreaterEqual(val.trim().parse()?))
        } else if s.contains('-') && !s.starts_with('-') {
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low: u64 = parts[0].trim().parse()?;
                let high: u64 = parts[1].trim().parse()?;
                if low > high {
                    bail!("Range lower bound exceeds upper bound: {}", s)
                }
                Ok(RangeOp::Between(low, high))
            } else {
                bail!("Invalid range format: {}", s)
            }
        } else {
            Ok(RangeOp::Equal(s.parse()?))
        }
    }

    pub fn matches(&self, value: u64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }
}

/// Reduce a company size cell to a single headcount.
///
/// Plain numbers ("5000", "5,000", "5000.0") are taken as-is. Bucket labels
/// ("1001-5000", "10000+", ">=500", ">1000", "<50", "<=10") reduce to their
/// lower bound, which is 0 for the "<" forms. Anything else yields `None`.
pub fn parse_company_size(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    if let Some(val) = cleaned.strip_prefix(">=") {
        return parse_headcount(val);
    }
    if let Some(val) = cleaned.strip_prefix('>') {
        return parse_headcount(val).and_then(|n| n.checked_add(1));
    }
    if let Some(val) = cleaned.strip_prefix("<=") {
        return parse_headcount(val).map(|_| 0);
    }
    if let Some(val) = cleaned.strip_prefix('<') {
        return parse_headcount(val).filter(|n| *n > 0).map(|_| 0);
    }
    if let Some(val) = cleaned.strip_suffix('+') {
        return parse_headcount(val);
    }
    if let Some((low, high)) = cleaned.split_once('-') {
        if low.is_empty() {
            return None;
        }
        let low = parse_headcount(low)?;
        let high = parse_headcount(high)?;
        return (low <= high).then_some(low);
    }
    parse_headcount(&cleaned)
}

fn parse_headcount(s: &str) -> Option<u64> {
    if let Ok(n) = s.parse::<u64>() {
        return Some(n);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f <= u64::MAX as f64 => Some(f.floor() as u64),
        _ => None,
    }
}
