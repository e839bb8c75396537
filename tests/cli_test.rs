//! End-to-end command tests through `execute_command`

use std::fs;

use clap::Parser;
use tempfile::TempDir;

use taxtree::cli::{execute_command, Cli};
use taxtree::exitcode;
use taxtree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn run(args: &[&str]) -> Result<(), i32> {
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    execute_command(&cli).map_err(|e| e.exit_code())
}

const OUTLINE: &str = "1 Animals\n. Mammals\n.. Dogs\n. Birds\n2 Plants\n";

#[test]
fn given_dir_with_default_input_when_running_without_subcommand_then_converts() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("taxhier_MC.txt"), OUTLINE).unwrap();
    let dir = temp.path().to_str().unwrap();

    run(&["taxtree", "-C", dir]).unwrap();

    let json = fs::read_to_string(temp.path().join("taxonomy.json")).unwrap();
    assert!(json.starts_with("[\n  {\n    \"code\": \"1\""));
}

#[test]
fn given_explicit_paths_and_indent_when_converting_then_cli_wins_over_config() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("outline.txt");
    let output = temp.path().join("custom.json");
    fs::write(&input, OUTLINE).unwrap();
    fs::write(temp.path().join(".taxtree.toml"), "indent = 2\n").unwrap();

    run(&[
        "taxtree",
        "-C",
        temp.path().to_str().unwrap(),
        "convert",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--indent",
        "4",
    ])
    .unwrap();

    let json = fs::read_to_string(&output).unwrap();
    assert!(json.starts_with("[\n    {\n        \"code\": \"1\""));
    assert!(!temp.path().join("taxonomy.json").exists());
}

#[test]
fn given_missing_input_when_converting_then_exit_noinput() {
    let temp = TempDir::new().unwrap();

    let code = run(&["taxtree", "-C", temp.path().to_str().unwrap(), "convert"]).unwrap_err();

    assert_eq!(code, exitcode::NOINPUT);
}

#[test]
fn given_undecodable_input_when_converting_then_exit_differs_from_noinput() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("taxhier_MC.txt"), b"1 \xff\n").unwrap();

    let code = run(&["taxtree", "-C", temp.path().to_str().unwrap()]).unwrap_err();

    assert_eq!(code, exitcode::DATAERR);
    assert_ne!(code, exitcode::NOINPUT);
}

#[test]
fn given_zero_indent_argument_when_converting_then_usage_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("taxhier_MC.txt"), OUTLINE).unwrap();

    let code = run(&[
        "taxtree",
        "-C",
        temp.path().to_str().unwrap(),
        "convert",
        "--indent",
        "0",
    ])
    .unwrap_err();

    assert_eq!(code, exitcode::USAGE);
}

#[test]
fn given_outline_or_json_when_showing_tree_and_stats_then_succeeds() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("outline.txt");
    fs::write(&input, OUTLINE).unwrap();
    let dir = temp.path().to_str().unwrap();
    let input = input.to_str().unwrap();

    run(&["taxtree", "-C", dir, "tree", input]).unwrap();
    run(&["taxtree", "-C", dir, "tree", input, "--max-depth", "1"]).unwrap();
    run(&["taxtree", "-C", dir, "stats", input]).unwrap();

    run(&["taxtree", "-C", dir, "convert", input]).unwrap();
    let json = temp.path().join("taxonomy.json");
    run(&["taxtree", "-C", dir, "stats", json.to_str().unwrap()]).unwrap();
}

#[test]
fn given_zero_max_depth_when_showing_tree_then_usage_error() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("outline.txt");
    fs::write(&input, OUTLINE).unwrap();

    let code = run(&[
        "taxtree",
        "-C",
        temp.path().to_str().unwrap(),
        "tree",
        input.to_str().unwrap(),
        "-m",
        "0",
    ])
    .unwrap_err();

    assert_eq!(code, exitcode::USAGE);
}

#[test]
fn given_zero_max_depth_and_missing_input_when_showing_tree_then_usage_error_first() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.txt");

    let code = run(&[
        "taxtree",
        "-C",
        temp.path().to_str().unwrap(),
        "tree",
        missing.to_str().unwrap(),
        "-m",
        "0",
    ])
    .unwrap_err();

    assert_eq!(code, exitcode::USAGE);
}

#[test]
fn given_saved_tree_when_editing_in_place_then_each_edit_is_persisted() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_str().unwrap();
    fs::write(temp.path().join("taxhier_MC.txt"), OUTLINE).unwrap();
    run(&["taxtree", "-C", dir, "convert"]).unwrap();
    let json = temp.path().join("taxonomy.json");
    let json_arg = json.to_str().unwrap();

    run(&["taxtree", "-C", dir, "tree", json_arg, "--paths"]).unwrap();
    run(&["taxtree", "-C", dir, "edit", "rename", json_arg, "1.1", "Mammalia"]).unwrap();
    run(&["taxtree", "-C", dir, "edit", "add", json_arg, "Fish", "--under", "1"]).unwrap();
    run(&["taxtree", "-C", dir, "edit", "add", json_arg, "Fungi", "--code", "3"]).unwrap();
    run(&["taxtree", "-C", dir, "edit", "remove", json_arg, "2"]).unwrap();

    let edited = fs::read_to_string(&json).unwrap();
    let expected = r#"[
  {
    "code": "1",
    "name": "Animals",
    "children": [
      {
        "name": "Mammalia",
        "children": [
          {
            "name": "Dogs",
            "children": []
          }
        ]
      },
      {
        "name": "Birds",
        "children": []
      },
      {
        "name": "Fish",
        "children": []
      }
    ]
  },
  {
    "code": "3",
    "name": "Fungi",
    "children": []
  }
]"#;
    assert_eq!(edited, expected);
}

#[test]
fn given_outline_when_editing_without_output_then_writes_configured_output() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_str().unwrap();
    let outline = temp.path().join("outline.txt");
    fs::write(&outline, OUTLINE).unwrap();

    run(&["taxtree", "-C", dir, "edit", "remove", outline.to_str().unwrap(), "1.1"]).unwrap();

    assert_eq!(fs::read_to_string(&outline).unwrap(), OUTLINE);
    let json = fs::read_to_string(temp.path().join("taxonomy.json")).unwrap();
    assert!(!json.contains("Mammals"));
    assert!(json.contains("Birds"));
}

#[test]
fn given_outline_as_explicit_output_when_editing_then_usage_error_and_outline_kept() {
    let temp = TempDir::new().unwrap();
    let outline = temp.path().join("outline.txt");
    fs::write(&outline, OUTLINE).unwrap();
    let outline_arg = outline.to_str().unwrap();

    let code = run(&[
        "taxtree",
        "-C",
        temp.path().to_str().unwrap(),
        "edit",
        "remove",
        outline_arg,
        "1",
        "-o",
        outline_arg,
    ])
    .unwrap_err();

    assert_eq!(code, exitcode::USAGE);
    assert_eq!(fs::read_to_string(&outline).unwrap(), OUTLINE);
}

#[test]
fn given_path_to_missing_node_when_editing_then_exit_dataerr_and_file_untouched() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_str().unwrap();
    fs::write(temp.path().join("taxhier_MC.txt"), OUTLINE).unwrap();
    run(&["taxtree", "-C", dir, "convert"]).unwrap();
    let json = temp.path().join("taxonomy.json");
    let before = fs::read_to_string(&json).unwrap();

    let code = run(&["taxtree", "-C", dir, "edit", "rename", json.to_str().unwrap(), "1.9", "x"])
        .unwrap_err();

    assert_eq!(code, exitcode::DATAERR);
    assert_eq!(fs::read_to_string(&json).unwrap(), before);
}

#[test]
fn given_malformed_node_path_when_parsing_arguments_then_rejected() {
    let result = Cli::try_parse_from(["taxtree", "edit", "remove", "tree.json", "0.1"]);
    assert!(result.is_err());
}

#[test]
fn given_broken_local_config_when_running_then_exit_config() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".taxtree.toml"), "input = ").unwrap();

    let code = run(&["taxtree", "-C", temp.path().to_str().unwrap(), "config", "show"]).unwrap_err();

    assert_eq!(code, exitcode::CONFIG);
}

#[test]
fn given_config_subcommands_when_running_then_succeed() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_str().unwrap();

    run(&["taxtree", "-C", dir, "config", "show"]).unwrap();
    run(&["taxtree", "-C", dir, "config", "path"]).unwrap();
    run(&["taxtree", "-C", dir, "config", "template"]).unwrap();
}
