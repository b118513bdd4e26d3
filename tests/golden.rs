//! Golden tests for booklist
//!
//! These tests run the binary against the fixture data directory and check
//! the parts of the output that must stay stable:
//! - Parsing, deduplication and price/date derivation
//! - Sort order, search and category filtering
//! - Output structure of every format

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to the fixture data directory
fn data_dir() -> PathBuf {
    fixtures_dir().join("data")
}

/// Create a command for running booklist against the fixture data
fn booklist_cmd() -> Command {
    let mut cmd = Command::cargo_bin("booklist").expect("Failed to find booklist binary");
    cmd.env_remove("BOOKLIST_ROOT")
        .arg("--root")
        .arg(data_dir())
        .arg("--quiet");
    cmd
}

/// Run a command and parse its stdout as one JSON value
fn run_json(args: &[&str]) -> Value {
    let output = booklist_cmd()
        .arg("--format")
        .arg("json")
        .args(args)
        .output()
        .expect("failed to execute");
    assert!(output.status.success(), "command failed: {:?}", args);
    serde_json::from_slice(&output.stdout).expect("valid json output")
}

fn titles(view: &Value) -> Vec<String> {
    view["books"]
        .as_array()
        .expect("books array")
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Show Tests ====================

    #[test]
    fn golden_show_default_view() {
        let view = run_json(&["show"]);

        assert_eq!(view["summary"], "Showing all 5 of 5 books");
        assert_eq!(view["total"], 5);
        assert_eq!(view["shown"], 5);
        assert_eq!(
            titles(&view),
            vec![
                "Dune",
                "Emma",
                "Solaris",
                "Ο Άρχοντας των Δαχτυλιδιών",
                "Το Χόμπιτ"
            ]
        );
    }

    #[test]
    fn golden_show_derived_fields() {
        let view = run_json(&["show"]);
        let books = view["books"].as_array().unwrap();

        let lotr = &books[3];
        assert_eq!(lotr["price"], "22.50€", "discount price wins");
        assert_eq!(lotr["publisher"], "Κέδρος");
        assert_eq!(lotr["ISBN"], "978-960-04-1234-5");

        assert_eq!(books[0]["price"], "18.00€", "first duplicate is kept");
        assert_eq!(books[2]["price"], "—", "missing price shows placeholder");
        assert_eq!(books[4]["price"], "9.80€");
    }

    #[test]
    fn golden_show_sorted_by_price() {
        let asc = run_json(&["show", "--sort", "price"]);
        assert_eq!(
            titles(&asc),
            vec![
                "Solaris",
                "Το Χόμπιτ",
                "Emma",
                "Dune",
                "Ο Άρχοντας των Δαχτυλιδιών"
            ]
        );

        let desc = run_json(&["show", "--sort", "price-desc"]);
        let mut reversed = titles(&asc);
        reversed.reverse();
        assert_eq!(titles(&desc), reversed);
    }

    #[test]
    fn golden_show_sorted_by_pages() {
        let view = run_json(&["show", "--sort", "pages-desc"]);
        assert_eq!(
            titles(&view),
            vec![
                "Ο Άρχοντας των Δαχτυλιδιών",
                "Dune",
                "Emma",
                "Το Χόμπιτ",
                "Solaris"
            ]
        );
    }

    #[test]
    fn golden_show_search_is_case_insensitive() {
        let view = run_json(&["show", "--search", "  TOLKIEN "]);
        assert_eq!(view["summary"], "Showing 2 of 5 books");
        assert_eq!(
            titles(&view),
            vec!["Ο Άρχοντας των Δαχτυλιδιών", "Το Χόμπιτ"]
        );

        let by_isbn = run_json(&["show", "--search", "960-16"]);
        assert_eq!(titles(&by_isbn), vec!["Emma"]);
    }

    #[test]
    fn golden_show_category_and_search_combine() {
        let view = run_json(&[
            "show",
            "--category",
            "Επιστημονική Φαντασία",
            "--search",
            "lem",
        ]);
        assert_eq!(titles(&view), vec!["Solaris"]);
    }

    #[test]
    fn golden_show_no_matches() {
        let view = run_json(&["show", "--search", "zzz"]);
        assert_eq!(view["summary"], "No books found");
        assert_eq!(view["shown"], 0);
        assert!(view["books"].as_array().unwrap().is_empty());
    }

    #[test]
    fn golden_show_dated_source() {
        let view = run_json(&["show", "--source", "20250305_sep_data.csv"]);
        assert_eq!(view["summary"], "Showing all 2 of 2 books");
        assert_eq!(view["books"][1]["price"], "11.90€");
    }

    #[test]
    fn golden_show_table_format() {
        let output = booklist_cmd()
            .args(["show", "--limit", "2"])
            .output()
            .expect("failed to execute");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(stdout.starts_with('┌'));
        assert!(stdout.contains("│ Title"));
        assert!(stdout.contains("18.00€"));
        assert!(!stdout.contains("Solaris"));
        assert!(stdout.trim_end().ends_with("Showing all 5 of 5 books"));
        assert!(!stdout.contains('\u{1b}'), "no ANSI codes when piped");
    }

    #[test]
    fn golden_show_markdown_format() {
        let output = booklist_cmd()
            .args(["--format", "md", "show", "--search", "emma"])
            .output()
            .expect("failed to execute");
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(stdout.contains("| Title | Author | Publisher | Category | Date | Pages | ISBN | Price |"));
        assert!(stdout.contains("| Emma | Jane Austen | Πατάκης |"));
        assert!(stdout.contains("_Showing 1 of 5 books_"));
    }

    // ==================== Categories / Stats Tests ====================

    #[test]
    fn golden_categories() {
        let categories = run_json(&["categories"]);
        assert_eq!(
            categories,
            serde_json::json!(["Επιστημονική Φαντασία", "Κλασική Λογοτεχνία", "Φαντασία"])
        );
    }

    #[test]
    fn golden_stats() {
        let stats = run_json(&["stats"]);
        assert_eq!(stats["source"], "latest.csv");
        assert_eq!(stats["total"], 5);
        assert_eq!(stats["duplicates"], 1);
        assert_eq!(stats["categories"], 3);

        let dated = run_json(&["stats", "--source", "20250305_sep_data.csv"]);
        assert_eq!(dated["last_updated"], "5 Μαρ 2025");
        assert_eq!(dated["duplicates"], 0);
    }

    // ==================== Sources / Manifest Tests ====================

    #[test]
    fn golden_sources_follow_manifest() {
        let sources = run_json(&["sources"]);
        let names: Vec<&str> = sources
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["filename"].as_str())
            .collect();
        assert_eq!(names, vec!["latest.csv", "20250305_sep_data.csv"]);
    }

    #[test]
    fn golden_generated_manifest_matches_fixture() {
        let generated = run_json(&["manifest"]);
        let fixture: Value = serde_json::from_str(
            &fs::read_to_string(data_dir().join("manifest.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(generated, fixture);
    }
}
