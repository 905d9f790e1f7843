use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::contacts::{load_contacts, write_ranked, Contact};
use crate::error::PipelineError;
use crate::rank::rank;
use crate::scoring::{ScoreResult, Scorer};

/// Outcome of one run, kept in memory for the console summary.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub ranked: Vec<(Contact, ScoreResult)>,
    pub skipped: usize,
}

impl RunReport {
    /// Contacts where at least one criterion was not in its table
    pub fn unrecognized_count(&self) -> usize {
        self.ranked
            .iter()
            .filter(|(_, result)| result.has_unrecognized())
            .count()
    }
}

/// Load, score, rank and write contacts.
///
/// Runs once to completion. Nothing is written when loading fails, and the
/// output file is replaced atomically when writing succeeds.
pub fn run(input: &Path, output: &Path, scorer: &Scorer) -> Result<RunReport, PipelineError> {
    let loaded = load_contacts(input)?;
    info!(
        "Loaded {} contacts from {} ({} skipped)",
        loaded.contacts.len(),
        input.display(),
        loaded.skipped
    );

    let scored: Vec<_> = loaded
        .contacts
        .into_iter()
        .map(|contact| {
            let result = scorer.score(&contact);
            debug!("{} scored {}", contact.label(), result.score);
            (contact, result)
        })
        .collect();

    let ranked = rank(scored);

    write_ranked(output, &loaded.headers, &ranked)?;
    info!("Wrote {} ranked contacts to {}", ranked.len(), output.display());

    Ok(RunReport {
        output_path: output.to_path_buf(),
        ranked,
        skipped: loaded.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CountryTier, ScoringConfig, SizeBucket};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::fs;

    fn small_scorer() -> Scorer {
        Scorer::new(&ScoringConfig {
            roles: Some(BTreeMap::from([
                ("CEO".to_string(), 10),
                ("CFO".to_string(), 9),
                ("CTO".to_string(), 8),
            ])),
            company_size: Some(vec![SizeBucket {
                range: ">1000".to_string(),
                score: 5,
            }]),
            countries: Some(vec![CountryTier {
                name: "core".to_string(),
                score: 3,
                countries: vec!["USA".to_string()],
            }]),
        })
        .unwrap()
    }

    #[test]
    fn test_end_to_end_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("contact_plan.csv");
        fs::write(
            &input,
            "name,role,company_size,country\n\
             Bob,Analyst,50,Unknown\n\
             Alice,CEO,5000,USA\n",
        )
        .unwrap();

        let report = run(&input, &output, &small_scorer()).unwrap();

        assert_eq!(report.skipped, 0);
        assert_eq!(report.unrecognized_count(), 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "name,role,company_size,country,score\n\
             Alice,CEO,5000,USA,18\n\
             Bob,Analyst,50,Unknown,0\n"
        );
    }

    #[test]
    fn test_row_count_preserved_and_ties_stable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("out.csv");
        fs::write(
            &input,
            "Name,Role,Company Size,Country,Email\n\
             First,CTO,10,Peru,1@x\n\
             Second,CEO,20000,USA,2@x\n\
             Third,CTO,10,Peru,3@x\n\
             Fourth,Janitor,,,4@x\n",
        )
        .unwrap();

        let report = run(&input, &output, &small_scorer()).unwrap();
        let names: Vec<_> = report.ranked.iter().map(|(c, _)| c.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First", "Third", "Fourth"]);

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().count(), 5);
        assert!(written.starts_with("Name,Role,Company Size,Country,Email,score\n"));
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let err = run(&dir.path().join("data.csv"), &output, &small_scorer()).unwrap_err();

        assert!(matches!(err, PipelineError::MissingFile { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_column_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "name,title,country\nAlice,CEO,USA\n").unwrap();

        let err = run(&input, &output, &small_scorer()).unwrap_err();
        assert!(matches!(err, PipelineError::Parse { .. }));
        assert!(!output.exists());
    }
}
