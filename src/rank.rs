use crate::contacts::Contact;
use crate::scoring::ScoreResult;

/// Sort scored contacts by score descending.
///
/// The sort is stable: contacts with equal scores keep their input order.
pub fn rank(mut scored: Vec<(Contact, ScoreResult)>) -> Vec<(Contact, ScoreResult)> {
    scored.sort_by(|a, b| b.1.score.cmp(&a.1.score));
    scored
}
