//! Tests for line loading.

use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_split_lines_on_every_break_kind() {
    assert_eq!(split_lines("one\ntwo\r\nthree\rfour"), vec!["one", "two", "three", "four"]);
    assert_eq!(split_lines("one\n"), vec!["one"]);
    assert_eq!(split_lines("one\r\n"), vec!["one"]);
    assert_eq!(split_lines("\n"), vec![""]);
    assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
    // Pipes are ordinary characters
    assert_eq!(split_lines("a|b"), vec!["a|b"]);
}

#[test]
fn test_parse_notebook_flattens_cells_in_order() {
    let doc = r##"{
        "cells": [
            {"cell_type": "markdown", "source": ["# Title\n", "intro"]},
            {"cell_type": "code", "source": ["import pandas as pd\n", "df = pd.read_csv(path)\n"]},
            {"cell_type": "code", "source": []}
        ],
        "metadata": {}
    }"##;

    let lines = parse_notebook(doc).unwrap();
    assert_eq!(
        lines,
        vec!["# Title", "intro", "import pandas as pd", "df = pd.read_csv(path)"]
    );
}

#[test]
fn test_parse_notebook_strips_only_one_newline() {
    let doc = r#"{"cells": [{"source": ["blank follows\n\n", "\n"]}]}"#;
    assert_eq!(parse_notebook(doc).unwrap(), vec!["blank follows\n", ""]);
}

#[test]
fn test_parse_notebook_accepts_string_source() {
    let doc = r#"{"cells": [{"source": "x = 1\ny = 2\n"}, {"source": ["z = 3"]}]}"#;
    assert_eq!(parse_notebook(doc).unwrap(), vec!["x = 1", "y = 2", "z = 3"]);
}

#[test]
fn test_parse_notebook_rejects_wrong_shapes() {
    for doc in [
        "not json",
        r#"{"worksheets": []}"#,
        r#"{"cells": [{"cell_type": "code"}]}"#,
        r#"{"cells": [{"source": [1, 2]}]}"#,
        r#"{"cells": {"source": []}}"#,
    ] {
        assert!(parse_notebook(doc).is_err(), "expected failure for {}", doc);
    }
}

#[test]
fn test_load_lines_plain_text() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    fs::write(&path, "alpha\r\nbeta\ngamma\n").unwrap();

    assert_eq!(
        load_lines(&path),
        LoadOutcome::Lines(vec!["alpha".into(), "beta".into(), "gamma".into()])
    );
}

#[test]
fn test_load_lines_notebook_by_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("analysis.IPYNB");
    fs::write(&path, r#"{"cells": [{"source": ["a\n", "b"]}]}"#).unwrap();

    assert_eq!(load_lines(&path).lines(), ["a", "b"]);
}

#[test]
fn test_load_lines_soft_failures() {
    let temp = TempDir::new().unwrap();

    let empty = temp.path().join("empty.txt");
    fs::write(&empty, "").unwrap();
    assert_eq!(load_lines(&empty), LoadOutcome::Skipped(SkipReason::Empty));

    let missing = temp.path().join("missing.txt");
    assert!(matches!(
        load_lines(&missing),
        LoadOutcome::Skipped(SkipReason::Unreadable(_))
    ));

    let broken = temp.path().join("broken.ipynb");
    fs::write(&broken, "{\"cells\": [").unwrap();
    assert!(matches!(
        load_lines(&broken),
        LoadOutcome::Skipped(SkipReason::MalformedNotebook(_))
    ));

    let latin1 = temp.path().join("latin1.txt");
    fs::write(&latin1, [b'c', b'a', b'f', 0xE9, b'\n']).unwrap();
    assert_eq!(load_lines(&latin1), LoadOutcome::Skipped(SkipReason::NotUtf8));

    let nul = temp.path().join("data.bin");
    fs::write(&nul, b"abc\0def").unwrap();
    assert!(matches!(
        load_lines(&nul),
        LoadOutcome::Skipped(SkipReason::Binary(_))
    ));

    let png = temp.path().join("image.txt");
    fs::write(&png, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0]).unwrap();
    assert_eq!(
        load_lines(&png),
        LoadOutcome::Skipped(SkipReason::Binary("image/png".to_string()))
    );
}

/// Text that happens to open with a file signature is still text
#[test]
fn test_load_lines_text_with_magic_prefix() {
    let temp = TempDir::new().unwrap();

    for (name, first) in [
        ("bmi.txt", "BMI is computed here"),
        ("mz.txt", "MZ prefix in a plain note"),
        ("gif.txt", "GIF87a was the first revision"),
        ("pdf.txt", "%PDF exports are attached"),
        ("id3.txt", "ID3 tags list the revenue track"),
    ] {
        let path = temp.path().join(name);
        fs::write(&path, format!("{}
more
", first)).unwrap();
        assert_eq!(
            load_lines(&path),
            LoadOutcome::Lines(vec![first.to_string(), "more".to_string()]),
            "{} should load as text",
            name
        );
    }
}

#[test]
fn test_skipped_outcome_has_no_lines() {
    assert!(LoadOutcome::Skipped(SkipReason::Empty).lines().is_empty());
    assert_eq!(SkipReason::NotUtf8.to_string(), "not valid UTF-8");
}
