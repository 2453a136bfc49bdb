use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const HELLO: &str = "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hello\")\n}\n";

fn values(json: &str) -> Vec<String> {
    let parsed: Value = serde_json::from_str(json).unwrap();
    parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Value"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_extract_single_file() -> Result<()> {
    let test = CliTest::with_file("app/main.go", HELLO)?;

    let output = test
        .extract_command()
        .args(["-f", "app/main.go"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Extracted 1 string from 1 file\n");

    assert_snapshot!(test.read_file("app/main.go.extracted.json")?, @r#"
    [
       {
          "Value": "hello",
          "Filename": "main.go",
          "Offset": 55,
          "Line": 6,
          "Column": 14
       }
    ]
    "#);
    assert_snapshot!(test.read_file("app/main.go.en.json")?, @r#"
    [
       {
          "id": "hello",
          "translation": "hello"
       }
    ]
    "#);
    assert!(!test.exists("app/main.go.en.po"));

    Ok(())
}

#[test]
fn test_import_paths_are_not_extracted() -> Result<()> {
    let test = CliTest::with_file(
        "main.go",
        "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tx := \"fmt\"\n\ty := \"hello\"\n\tfmt.Println(x, y)\n}\n",
    )?;

    let output = test.extract_command().args(["-d", "."]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(values(&test.read_file("main.go.extracted.json")?), vec!["hello"]);

    Ok(())
}

#[test]
fn test_regex_exclusion_from_config() -> Result<()> {
    let test = CliTest::with_file(
        "main.go",
        "package main\n\nvar a = \"DEBUG: start\"\nvar b = \"ready\"\n",
    )?;
    test.write_file("excluded.json", r#"{"excludedRegexps": ["^DEBUG"]}"#)?;

    let output = test.extract_command().args(["-f", "main.go"]).output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(values(&test.read_file("main.go.extracted.json")?), vec!["ready"]);

    Ok(())
}

#[test]
fn test_custom_exclude_file() -> Result<()> {
    let test = CliTest::with_file(
        "main.go",
        "package main\n\nvar a = \"skip me\"\nvar b = \"keep me\"\n",
    )?;
    test.write_file("conf/words.json", r#"{"excludedStrings": ["skip me"]}"#)?;

    let output = test
        .extract_command()
        .args(["-f", "main.go", "-e", "conf/words.json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        values(&test.read_file("main.go.extracted.json")?),
        vec!["keep me"]
    );

    Ok(())
}

#[test]
fn test_malformed_config_fails_files() -> Result<()> {
    let test = CliTest::with_file("src/a.go", "package a\n\nvar a = \"One\"\n")?;
    test.write_file("src/b.go", "package a\n\nvar b = \"Two\"\n")?;
    test.write_file("excluded.json", "{ not json")?;

    let output = test.extract_command().args(["-d", "src"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "✘ Extracted 0 strings from 0 files, 2 file(s) failed\n"
    );
    assert_eq!(stderr(&output).matches("config-malformed").count(), 2);
    assert!(!test.exists("src/a.go.extracted.json"));

    Ok(())
}

#[test]
fn test_parse_failure_does_not_stop_siblings() -> Result<()> {
    let test = CliTest::with_file("src/a.go", "package a\n\nfunc (\n")?;
    test.write_file("src/b.go", "package a\n\nvar b = \"Two\"\n")?;

    let output = test.extract_command().args(["-d", "src"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("parse-failure"));
    assert!(test.exists("src/b.go.extracted.json"));

    Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("app/main.go", HELLO)?;

    let output = test
        .extract_command()
        .args(["-d", "app", "--dry-run", "--po", "-o", "out"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "✓ Extracted 1 string from 1 file (dry run)\n"
    );
    assert!(!test.exists("app/main.go.extracted.json"));
    assert!(!test.exists("out"));

    Ok(())
}

#[test]
fn test_recursive_skips_hidden_directories() -> Result<()> {
    let test = CliTest::with_file("src/top.go", "package top\n\nvar a = \"Top\"\n")?;
    test.write_file("src/nested/deep.go", "package nested\n\nvar a = \"Deep\"\n")?;
    test.write_file("src/.cache/hidden.go", "package cache\n\nvar a = \"Hidden\"\n")?;

    let flat = test.extract_command().args(["-d", "src"]).output()?;
    assert_eq!(stdout(&flat), "✓ Extracted 1 string from 1 file\n");
    assert!(!test.exists("src/nested/deep.go.extracted.json"));

    let deep = test.extract_command().args(["-d", "src", "-r"]).output()?;
    assert_eq!(stdout(&deep), "✓ Extracted 2 strings from 2 files\n");
    assert!(test.exists("src/nested/deep.go.extracted.json"));
    assert!(!test.exists("src/.cache/hidden.go.extracted.json"));

    Ok(())
}

#[test]
fn test_ignore_regexp() -> Result<()> {
    let test = CliTest::with_file("pkg/main.go", "package pkg\n\nvar a = \"Main\"\n")?;
    test.write_file("pkg/main_test.go", "package pkg\n\nvar a = \"Test\"\n")?;

    let output = test
        .extract_command()
        .args(["-d", "pkg", "--ignore-regexp", r"_test\.go$"])
        .output()?;

    assert_eq!(
        stdout(&output),
        "✓ Extracted 1 string from 1 file (1 skipped)\n"
    );
    assert!(!test.exists("pkg/main_test.go.extracted.json"));

    Ok(())
}

#[test]
fn test_ignore_regexp_skips_subtree() -> Result<()> {
    let test = CliTest::with_file("main.go", "package main\n\nvar a = \"Main\"\n")?;
    test.write_file("generated/a.go", "package generated\n\nvar a = \"Gen\"\n")?;
    test.write_file("generated/deep/b.go", "package deep\n\nvar b = \"Deep\"\n")?;

    let output = test
        .extract_command()
        .args(["-d", ".", "-r", "--ignore-regexp", "generated/"])
        .output()?;

    assert_eq!(
        stdout(&output),
        "✓ Extracted 1 string from 1 file (2 skipped)\n"
    );
    assert!(!test.exists("generated/a.go.extracted.json"));
    assert!(!test.exists("generated/deep/b.go.extracted.json"));

    Ok(())
}

#[test]
fn test_invalid_ignore_regexp_is_an_error() -> Result<()> {
    let test = CliTest::with_file("main.go", HELLO)?;

    let output = test
        .extract_command()
        .args(["-d", ".", "--ignore-regexp", "("])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Invalid ignore regexp"));

    Ok(())
}

#[test]
fn test_missing_input_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let file = test.extract_command().args(["-f", "nope.go"]).output()?;
    assert_eq!(file.status.code(), Some(2));

    let dir = test.extract_command().args(["-d", "nope"]).output()?;
    assert_eq!(dir.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_po_catalog() -> Result<()> {
    let test = CliTest::with_file("app/main.go", HELLO)?;

    let output = test
        .extract_command()
        .args(["-f", "app/main.go", "--po"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let po = test.read_file("app/main.go.en.po")?;
    assert!(po.contains("\"Language: en\\n\""));
    assert!(po.contains("#: main.go:6\nmsgid \"hello\"\nmsgstr \"hello\"\n"));

    Ok(())
}

#[test]
fn test_output_match_package() -> Result<()> {
    let test = CliTest::with_file("src/widgets/a.go", "package widgets\n\nvar a = \"Widget\"\n")?;

    let output = test
        .extract_command()
        .args(["-d", "src", "-r", "-o", "out", "--output-match-package"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.exists("out/widgets/a.go.extracted.json"));
    assert!(!test.exists("src/widgets/a.go.extracted.json"));

    Ok(())
}

#[test]
fn test_output_match_package_ignores_broken_sibling() -> Result<()> {
    let test = CliTest::with_file("widgets/good.go", "package widgets\n\nvar a = \"Good\"\n")?;
    test.write_file("widgets/broken.go", "package widgets\n\nfunc (\n")?;
    test.write_file("widgets/gen.go", "//go:build ignore\n\npackage main\n\nvar g = \"Gen\"\n")?;

    let output = test
        .extract_command()
        .args(["-d", "widgets", "-o", "out", "--output-match-package"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output).matches("parse-failure").count(), 1);
    assert!(!stderr(&output).contains("path-resolution-failure"));
    assert!(test.exists("out/widgets/good.go.extracted.json"));
    assert!(test.exists("out/widgets/gen.go.extracted.json"));

    Ok(())
}

#[test]
fn test_output_match_import() -> Result<()> {
    let test = CliTest::with_file("go.mod", "module example.com/shop\n\ngo 1.22\n")?;
    test.write_file("cart/cart.go", "package cart\n\nvar a = \"Cart\"\n")?;

    let output = test
        .extract_command()
        .args(["-d", ".", "-r", "-o", "out", "--output-match-import"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.exists("out/example.com/shop/cart/cart.go.extracted.json"));

    Ok(())
}

#[test]
fn test_output_dir_only() -> Result<()> {
    let test = CliTest::with_file("app/main.go", HELLO)?;

    let output = test
        .extract_command()
        .args(["-f", "app/main.go", "-o", "out"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.exists("out/main.go.extracted.json"));
    assert!(test.exists("out/main.go.en.json"));

    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let test = CliTest::with_file(
        "main.go",
        "package main\n\nvar a = \"Zeta\"\nvar b = \"Alpha\"\nvar c = \"Zeta\"\nvar d = \"Mid\"\n",
    )?;

    test.extract_command().args(["-f", "main.go"]).output()?;
    let first = test.read_file("main.go.extracted.json")?;
    test.extract_command().args(["-f", "main.go"]).output()?;
    let second = test.read_file("main.go.extracted.json")?;

    assert_eq!(first, second);
    assert_eq!(values(&first), vec!["Alpha", "Zeta", "Mid"]);

    Ok(())
}

#[test]
fn test_verbose_progress() -> Result<()> {
    let test = CliTest::with_file("app/main.go", HELLO)?;

    let output = test
        .extract_command()
        .args(["-v", "-d", "app"])
        .output()?;

    let log = stderr(&output);
    assert!(log.contains("Extracting strings from file:"));
    assert!(log.contains("Could not find excluded.json"));
    assert!(log.contains("Loaded 0 excluded strings"));
    assert!(log.contains("Extracted 1 strings from file:"));

    let quiet = test.extract_command().args(["-d", "app"]).output()?;
    assert_eq!(stderr(&quiet), "");

    Ok(())
}
