use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::contacts::Contact;
use crate::pipeline::RunReport;
use crate::scoring::ScoreResult;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the top `limit` contacts as a table: Index, Score, Name, Details.
/// No headers. Index column fits "999.", score column is right-aligned.
pub fn format_ranked_table(
    ranked: &[(Contact, ScoreResult)],
    limit: usize,
    use_colors: bool,
) -> String {
    if ranked.is_empty() {
        return "No contacts found.".to_string();
    }
    format_rows(ranked, limit, use_colors, get_terminal_width())
}

fn format_rows(
    ranked: &[(Contact, ScoreResult)],
    limit: usize,
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    let index_width = 4;
    let score_width = 5;
    let separator = "  ";

    ranked
        .iter()
        .take(limit)
        .enumerate()
        .map(|(idx, (contact, result))| {
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = format!("{:>width$}", result.score, width = score_width);
            let details = format!(
                "{} · {} · {}",
                or_dash(&contact.role),
                or_dash(&contact.company_size),
                or_dash(&contact.country)
            );

            let fixed_width =
                index_width + 1 + score_width + separator.len() * 2 + details.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&contact.label(), width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_text(&contact.label(), 20),
                // No terminal (pipe), don't truncate
                None => contact.label(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    name.cyan(),
                    separator,
                    details.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_str, separator, name, separator, details
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// "1 contact", "2 contacts"
fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value.trim()
    }
}

/// Format how a contact's score was put together (for verbose mode)
pub fn format_breakdown(contact: &Contact, result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(result.breakdown.factors.len() + 1);
    let heading = format!("{} (line {}): {}", contact.label(), contact.line, result.score);
    lines.push(if use_colors {
        heading.bold().to_string()
    } else {
        heading
    });

    for factor in &result.breakdown.factors {
        let matched = match &factor.matched {
            Some(key) => format!("matched '{}'", key),
            None if use_colors => "unrecognized".yellow().to_string(),
            None => "unrecognized".to_string(),
        };
        lines.push(format!(
            "  {}: '{}' {} -> {:+}",
            factor.label, factor.value, matched, factor.points
        ));
    }

    lines.join("\n")
}

/// One-line summary printed after a successful run
pub fn format_summary(report: &RunReport, use_colors: bool) -> String {
    let path = report.output_path.display().to_string();
    let mut summary = format!(
        "Ranked {}. Results saved to {}",
        count_noun(report.ranked.len(), "contact"),
        if use_colors {
            path.underline().to_string()
        } else {
            path
        }
    );

    let mut notes = Vec::new();
    if report.skipped > 0 {
        notes.push(format!("{} skipped", count_noun(report.skipped, "malformed row")));
    }
    let unrecognized = report.unrecognized_count();
    if unrecognized > 0 {
        notes.push(format!("{} with unrecognized values", unrecognized));
    }
    if !notes.is_empty() {
        let notes = format!(" ({})", notes.join(", "));
        if use_colors {
            summary.push_str(&notes.yellow().to_string());
        } else {
            summary.push_str(&notes);
        }
    }

    summary
}
