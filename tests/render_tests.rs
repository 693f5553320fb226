use anyhow::Result;
use sniff::render::{RenderOptions, render_json, render_notices, render_results};
use sniff::search::{SearchOptions, search_files};

use test_helpers::{fixture_base, write_tree};

/// Tests for rendering search results read from disk
#[cfg(test)]
mod render_tests {
    use super::*;

    /// A 10-line file with a hit on line 4, radius 1, decorated
    #[test]
    fn test_decorated_round_trip() -> Result<()> {
        let content: String = (0..10)
            .map(|i| if i == 4 { "the needle line\n".to_string() } else { format!("line {}\n", i) })
            .collect();
        let temp = write_tree(&[("ten.txt", content.as_str())])?;

        let options = SearchOptions {
            neighbors: 1,
            ..Default::default()
        };
        let report = search_files("needle", "*.txt", temp.path(), &options)?;

        let render_options = RenderOptions {
            decorate: true,
            show_filename: false,
            separate_runs: false,
            ..Default::default()
        };
        let output = render_results(&report.files, &render_options);

        assert_eq!(output, vec!["  3  line 3", "* 4  the needle line", "  5  line 5"]);
        assert_eq!(output.iter().filter(|l| l.starts_with("* ")).count(), 1);
        assert_eq!(output.iter().filter(|l| l.starts_with("  ")).count(), 2);

        Ok(())
    }

    #[test]
    fn test_full_output_for_fixtures() -> Result<()> {
        let base = fixture_base();
        let options = SearchOptions {
            neighbors: 0,
            ..Default::default()
        };
        let report = search_files("revenue", "**/*", &base, &options)?;
        let output = render_results(&report.files, &RenderOptions::default());

        let notes = base.join("notes.txt");
        let sales = base.join("reports").join("sales.ipynb");
        assert_eq!(
            output,
            vec![
                format!("- {} 1", notes.display()),
                "Reconcile revenue against the invoice table".to_string(),
                String::new(),
                format!("- {} 2", sales.display()),
                "Load the monthly revenue extract".to_string(),
                String::new(),
                "df['revenue'].sum()".to_string(),
                String::new(),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_filenames_only() -> Result<()> {
        let base = fixture_base();
        let report = search_files("revenue", "**/*", &base, &SearchOptions::default())?;

        let options = RenderOptions {
            show_content: false,
            show_count: false,
            ..Default::default()
        };
        let output = render_results(&report.files, &options);

        assert_eq!(output.len(), 2);
        assert!(output.iter().all(|line| line.starts_with("- ")));

        Ok(())
    }

    #[test]
    fn test_notices_and_json() -> Result<()> {
        let temp = write_tree(&[("a.txt", "x\n"), ("b.txt", "x\n"), ("c.txt", "x\n")])?;
        let options = SearchOptions {
            limit: Some(1),
            ..Default::default()
        };
        let report = search_files("x", "*.txt", temp.path(), &options)?;

        let notices = render_notices(&report);
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0], "Searching 3 candidate files");
        assert!(notices[1].contains("Stopped after 1 matching files"));

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&report, &RenderOptions::default())?)?;
        assert_eq!(json["truncated"], true);
        assert_eq!(json["files_read"], 1);
        assert_eq!(json["notices"][0]["type"], "truncated");
        assert_eq!(json["notices"][0]["limit"], 1);
        assert_eq!(json["files"].as_array().map(Vec::len), Some(1));

        Ok(())
    }
}
