/// One row of the input file: a sales lead.
///
/// The four scored fields are copied out of `row` at load time; `row` keeps
/// every column so nothing the scorer ignores is lost on output.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: String,
    pub role: String,
    pub company_size: String,
    pub country: String,
    pub line: u64,        // 1-based line in the source file
    pub row: Vec<String>, // All fields, in header order
}

impl Contact {
    /// Display label, falling back to the source line when the name is blank
    pub fn label(&self) -> String {
        if self.name.trim().is_empty() {
            format!("(line {})", self.line)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_contact(name: &str, role: &str, company_size: &str, country: &str) -> Contact {
    Contact {
        name: name.to_string(),
        role: role.to_string(),
        company_size: company_size.to_string(),
        country: country.to_string(),
        line: 2,
        row: vec![
            name.to_string(),
            role.to_string(),
            company_size.to_string(),
            country.to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_uses_name() {
        let contact = sample_contact("Alice", "CEO", "5000", "USA");
        assert_eq!(contact.label(), "Alice");
    }

    #[test]
    fn test_label_falls_back_to_line() {
        let mut contact = sample_contact("  ", "CEO", "5000", "USA");
        contact.line = 7;
        assert_eq!(contact.label(), "(line 7)");
    }
}
