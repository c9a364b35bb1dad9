//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use lvault_core::{format_display_url, LinkRecord};
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single link
    pub fn print_link(&self, link: &LinkRecord) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", link.id);
                println!("Title:       {}", link.title);
                println!("URL:         {}", link.url);
                println!("Host:        {}", format_display_url(&link.url));
                if !link.description.is_empty() {
                    println!("Description: {}", link.description);
                }
                if !link.tags.is_empty() {
                    println!("Tags:        {}", link.tags.join(", "));
                }
                println!(
                    "Created:     {}",
                    link.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            OutputFormat::Json => print_json(link),
            OutputFormat::Quiet => {
                println!("{}", link.id);
            }
        }
    }

    /// Print a list of links with the vault's summary line
    ///
    /// `total` is the size of the whole collection and `term` the active
    /// search term (empty when listing everything).
    pub fn print_links(&self, links: &[&LinkRecord], total: usize, term: &str) {
        match self.format {
            OutputFormat::Human => {
                if links.is_empty() {
                    if term.is_empty() {
                        println!("No links saved yet");
                        println!("Start building your links collection by adding your first link");
                    } else {
                        println!("No matching links found");
                        println!("Try adjusting your search terms");
                    }
                } else {
                    for link in links {
                        println!("{}", format_row(link));
                    }
                }
                println!("\n{}", summary(total, links.len(), term));
            }
            OutputFormat::Json => print_json(&links),
            OutputFormat::Quiet => {
                for link in links {
                    println!("{}", link.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (all modes except quiet)
    pub fn warning(&self, message: &str) {
        if self.format != OutputFormat::Quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode JSON output: {}", e),
    }
}

/// One line of the link list: id, title, display host
fn format_row(link: &LinkRecord) -> String {
    let mut row = format!(
        "{} | {:<35} | {}",
        link.id,
        truncate(&link.title, 35),
        truncate(&format_display_url(&link.url), 40)
    );
    if !link.tags.is_empty() {
        row.push_str(&format!(" [{}]", link.tags.join(", ")));
    }
    row
}

/// "N total links", plus the match count while searching
pub fn summary(total: usize, matching: usize, term: &str) -> String {
    if term.is_empty() {
        format!("{} total links", total)
    } else {
        format!("{} total links, {} matching results", total, matching)
    }
}

/// Truncate a string to max characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn link(tags: &[&str]) -> LinkRecord {
        LinkRecord {
            id: 1714558830123,
            title: "Rust".to_string(),
            url: "https://www.rust-lang.org/learn".to_string(),
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ünïcödé títlé", 8), "ünïcö...");
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(3, 3, ""), "3 total links");
        assert_eq!(summary(3, 1, "rust"), "3 total links, 1 matching results");
    }

    #[test]
    fn test_format_row_uses_host() {
        let row = format_row(&link(&[]));
        assert!(row.starts_with("1714558830123 | Rust"));
        assert!(row.ends_with("| www.rust-lang.org"));
    }

    #[test]
    fn test_format_row_lists_tags() {
        let row = format_row(&link(&["lang", "docs"]));
        assert!(row.ends_with("[lang, docs]"));
    }
}
