use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use super::types::Contact;
use crate::error::PipelineError;

/// Contacts read from one input file, in file order.
#[derive(Debug, Clone)]
pub struct LoadedContacts {
    /// Header row exactly as it appeared in the file
    pub headers: Vec<String>,
    pub contacts: Vec<Contact>,
    /// Rows dropped because their field count did not match the header or
    /// they were not valid UTF-8
    pub skipped: usize,
}

/// Positions of the scored columns within a header row
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnMap {
    name: usize,
    role: usize,
    company_size: usize,
    country: usize,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Result<Self, String> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| normalize_header(h) == column)
                .ok_or_else(|| format!("missing required column '{}'", column))
        };
        Ok(Self {
            name: find("name")?,
            role: find("role")?,
            company_size: find("company_size")?,
            country: find("country")?,
        })
    }
}

/// Normalize a header for matching: trimmed, lowercase, with spaces and
/// hyphens folded to underscores. "Company Size" becomes "company_size".
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Load contacts from a CSV file with a header row.
///
/// # Errors
///
/// - `MissingFile` if `path` does not exist
/// - `Read` if the file exists but cannot be read
/// - `Parse` if the header is unreadable or a required column is missing
pub fn load_contacts(path: &Path) -> Result<LoadedContacts, PipelineError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PipelineError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => PipelineError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    debug!("Loading contacts from {}", path.display());
    read_contacts(file, path)
}

/// Load contacts from any reader. `path` is only used in error messages.
pub fn read_contacts<R: Read>(reader: R, path: &Path) -> Result<LoadedContacts, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(e, path))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = ColumnMap::from_headers(&headers).map_err(|message| PipelineError::Parse {
        path: path.to_path_buf(),
        message,
    })?;

    let mut contacts = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                warn!(
                    "Skipping line {}: not valid UTF-8",
                    e.position().map(|p| p.line()).unwrap_or(0)
                );
                skipped += 1;
                continue;
            }
            Err(e) => return Err(csv_error(e, path)),
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() != headers.len() {
            warn!(
                "Skipping line {}: expected {} fields, found {}",
                line,
                headers.len(),
                record.len()
            );
            skipped += 1;
            continue;
        }

        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        contacts.push(Contact {
            name: field(columns.name),
            role: field(columns.role),
            company_size: field(columns.company_size),
            country: field(columns.country),
            line,
            row: record.iter().map(|f| f.to_string()).collect(),
        });
    }

    debug!("Loaded {} contacts ({} skipped)", contacts.len(), skipped);

    Ok(LoadedContacts {
        headers,
        contacts,
        skipped,
    })
}

fn csv_error(e: csv::Error, path: &Path) -> PipelineError {
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(source) => PipelineError::Read {
            path: path.to_path_buf(),
            source,
        },
        _ => PipelineError::Parse {
            path: path.to_path_buf(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn load_str(content: &str) -> Result<LoadedContacts, PipelineError> {
        read_contacts(content.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_loads_rows_in_file_order() {
        let loaded = load_str(
            "name,role,company_size,country\n\
             Alice,CEO,5000,USA\n\
             Bob,Analyst,50,Unknown\n",
        )
        .unwrap();

        assert_eq!(loaded.headers, vec!["name", "role", "company_size", "country"]);
        assert_eq!(loaded.skipped, 0);
        let names: Vec<_> = loaded.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(loaded.contacts[0].line, 2);
        assert_eq!(loaded.contacts[1].company_size, "50");
    }

    #[test]
    fn test_headers_matched_loosely_and_extra_columns_kept() {
        let loaded = load_str(
            "Email,Name,Role,Company Size,Country\n\
             a@x.io,Alice,CEO,1001-5000,USA\n",
        )
        .unwrap();

        let alice = &loaded.contacts[0];
        assert_eq!(alice.name, "Alice");
        assert_eq!(alice.company_size, "1001-5000");
        assert_eq!(alice.row, vec!["a@x.io", "Alice", "CEO", "1001-5000", "USA"]);
    }

    #[test]
    fn test_missing_required_column() {
        let err = load_str("name,role,country\nAlice,CEO,USA\n").unwrap_err();
        match err {
            PipelineError::Parse { message, .. } => {
                assert!(message.contains("company_size"), "{}", message)
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_file_is_parse_error() {
        assert!(matches!(load_str(""), Err(PipelineError::Parse { .. })));
    }

    #[test]
    fn test_header_only_file_yields_no_contacts() {
        let loaded = load_str("name,role,company_size,country\n").unwrap();
        assert!(loaded.contacts.is_empty());
    }

    #[test]
    fn test_short_and_long_rows_skipped() {
        let loaded = load_str(
            "name,role,company_size,country\n\
             Alice,CEO,5000,USA\n\
             Broken,CEO\n\
             Carol,CTO,20,UK,extra\n\
             Dan,Intern,5,Peru\n",
        )
        .unwrap();

        assert_eq!(loaded.skipped, 2);
        let names: Vec<_> = loaded.contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Dan"]);
        assert_eq!(loaded.contacts[1].line, 5);
    }

    #[test]
    fn test_invalid_utf8_row_skipped() {
        let mut bytes = b"name,role,company_size,country\nAlice,CEO,5000,USA\n".to_vec();
        bytes.extend_from_slice(b"B\xffb,CTO,10,UK\n");
        bytes.extend_from_slice(b"Carol,CFO,10,UK\n");

        let loaded = read_contacts(bytes.as_slice(), Path::new("test.csv")).unwrap();
        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.contacts.len(), 2);
    }

    #[test]
    fn test_blank_values_kept() {
        let loaded = load_str("name,role,company_size,country\nEve,,,\n").unwrap();
        assert_eq!(loaded.contacts.len(), 1);
        assert_eq!(loaded.contacts[0].role, "");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = load_contacts(&path).unwrap_err();
        assert!(matches!(err, PipelineError::MissingFile { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,role,company_size,country").unwrap();
        writeln!(file, "\"Smith, Jane\",Manager,300,Spain").unwrap();
        file.flush().unwrap();

        let loaded = load_contacts(file.path()).unwrap();
        assert_eq!(loaded.contacts[0].name, "Smith, Jane");
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Company Size "), "company_size");
        assert_eq!(normalize_header("company-size"), "company_size");
        assert_eq!(normalize_header("\u{feff}Name"), "name");
    }
}
