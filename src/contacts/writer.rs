use std::io::Write;
use std::path::Path;

use atomic_write_file::AtomicWriteFile;
use tracing::debug;

use super::loader::normalize_header;
use super::types::Contact;
use crate::error::PipelineError;
use crate::scoring::ScoreResult;

/// Name of the column holding each contact's score
pub const SCORE_COLUMN: &str = "score";

/// Write ranked contacts to a CSV file atomically.
///
/// The destination is only replaced once every row has been written, so a
/// failed run leaves any previous file untouched.
pub fn write_ranked(
    path: &Path,
    headers: &[String],
    ranked: &[(Contact, ScoreResult)],
) -> Result<(), PipelineError> {
    let write_error = |message: String| PipelineError::Write {
        path: path.to_path_buf(),
        message,
    };

    let mut file = AtomicWriteFile::open(path).map_err(|e| write_error(e.to_string()))?;
    write_contacts(&mut file, headers, ranked).map_err(|e| write_error(e.to_string()))?;
    file.commit().map_err(|e| write_error(e.to_string()))?;

    debug!("Wrote {} contacts to {}", ranked.len(), path.display());
    Ok(())
}

/// Write the header row plus a score column, then one row per contact in the
/// given order. An existing `score` column is overwritten in place.
pub fn write_contacts<W: Write>(
    writer: W,
    headers: &[String],
    ranked: &[(Contact, ScoreResult)],
) -> Result<(), csv::Error> {
    let score_index = headers
        .iter()
        .position(|h| normalize_header(h) == SCORE_COLUMN);

    let mut wtr = csv::Writer::from_writer(writer);

    match score_index {
        Some(_) => wtr.write_record(headers)?,
        None => wtr.write_record(headers.iter().map(String::as_str).chain([SCORE_COLUMN]))?,
    }

    for (contact, result) in ranked {
        let score = result.score.to_string();
        let fields = contact.row.iter().map(String::as_str);
        match score_index {
            Some(index) => wtr.write_record(
                fields
                    .enumerate()
                    .map(|(i, f)| if i == index { score.as_str() } else { f }),
            )?,
            None => wtr.write_record(fields.chain([score.as_str()]))?,
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::types::sample_contact;
    use crate::scoring::ScoreBreakdown;
    use pretty_assertions::assert_eq;

    fn scored(contact: Contact, score: i64) -> (Contact, ScoreResult) {
        (
            contact,
            ScoreResult {
                score,
                breakdown: ScoreBreakdown::default(),
            },
        )
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn test_appends_score_column() {
        let ranked = vec![
            scored(sample_contact("Alice", "CEO", "5000", "USA"), 18),
            scored(sample_contact("Bob", "Analyst", "50", "Unknown"), 0),
        ];
        let mut out = Vec::new();
        write_contacts(
            &mut out,
            &headers(&["name", "role", "company_size", "country"]),
            &ranked,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name,role,company_size,country,score\n\
             Alice,CEO,5000,USA,18\n\
             Bob,Analyst,50,Unknown,0\n"
        );
    }

    #[test]
    fn test_existing_score_column_overwritten() {
        let mut contact = sample_contact("Alice", "CEO", "5000", "USA");
        contact.row.push("99".to_string());
        let mut out = Vec::new();
        write_contacts(
            &mut out,
            &headers(&["name", "role", "company_size", "country", "Score"]),
            &[scored(contact, 18)],
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "name,role,company_size,country,Score\nAlice,CEO,5000,USA,18\n"
        );
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut out = Vec::new();
        write_contacts(
            &mut out,
            &headers(&["name", "role", "company_size", "country"]),
            &[scored(sample_contact("Smith, Jane", "CEO", "10,000", "UK"), 5)],
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Smith, Jane\",CEO,\"10,000\",UK,5"));
    }

    #[test]
    fn test_write_ranked_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contact_plan.csv");
        write_ranked(
            &path,
            &headers(&["name", "role", "company_size", "country"]),
            &[scored(sample_contact("Alice", "CEO", "5000", "USA"), 18)],
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("Alice,CEO,5000,USA,18\n"));
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let err = write_ranked(&path, &headers(&["name"]), &[]).unwrap_err();
        assert!(matches!(err, PipelineError::Write { .. }));
    }
}
