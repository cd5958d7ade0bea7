//! Tests for the `generate` CLI command
//!
//! - `generate COMPONENTS` - component reference from src/components
//! - `generate API_ROUTES` - route table from src/app/api
//! - overrides: `--root`, `--include`, `--exclude`, `--format json`, `--output`

use crate::common::{
    assert_contains, assert_not_contains, assert_ordered, assert_valid_json, headings, TestRepo,
};

// ============================================================================
// COMPONENTS
// ============================================================================

#[test]
fn test_generate_components_markdown() {
    let repo = TestRepo::new();
    repo.with_pony_layout();

    let output = repo.run_cli_success(&["generate", "COMPONENTS"]);

    assert_eq!(
        output,
        "# Components\n\n\
         ## Button\n\n\
         ### Props\n\n\
         | Name | Type | Required | Description |\n\
         |------|------|----------|-------------|\n\
         | text | `string` | true | |\n\
         | variant | `'primary' \\| 'secondary'` | false | |\n\
         | onClick | `() => void` | false | |\n\
         \n\
         ## Sidebar\n\n"
    );
}

#[test]
fn test_generate_components_lowercase_target() {
    let repo = TestRepo::new();
    repo.with_pony_layout();

    let output = repo.run_cli_success(&["g", "components"]);
    assert_eq!(headings(&output, 2), vec!["Button", "Sidebar"]);
}

#[test]
fn test_exclude_override_can_be_disabled() {
    let repo = TestRepo::new();
    repo.with_pony_layout();

    let output = repo.run_cli_success(&["generate", "COMPONENTS", "--exclude", ""]);
    assert_contains(&output, "## Harness\n");
}

#[test]
fn test_glob_include_pattern() {
    let repo = TestRepo::new();
    repo.with_pony_layout();

    let output = repo.run_cli_success(&[
        "generate",
        "COMPONENTS",
        "--include",
        "glob:layout/*.tsx",
    ]);
    assert_eq!(headings(&output, 2), vec!["Sidebar"]);
}

#[test]
fn test_components_json_format() {
    let repo = TestRepo::new();
    repo.with_pony_layout();

    let output = repo.run_cli_success(&["generate", "COMPONENTS", "--format", "json"]);
    let json = assert_valid_json(&output, "components json");

    assert_eq!(json["target"], "COMPONENTS");
    let records = json["records"]["components"]
        .as_array()
        .expect("components array");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Button");
    assert_eq!(records[0]["fields"][0]["name"], "text");
    assert_eq!(records[0]["fields"][0]["required"], true);
    assert_eq!(json["warnings"].as_array().map(|w| w.len()), Some(0));
}

// ============================================================================
// API ROUTES
// ============================================================================

#[test]
fn test_generate_api_routes_markdown() {
    let repo = TestRepo::new();
    repo.with_pony_layout();

    let output = repo.run_cli_success(&["generate", "API_ROUTES"]);

    assert!(output.starts_with(
        "# API Routes\n\n| Route | Methods | Description |\n|-------|---------|-------------|\n"
    ));
    assert_contains(&output, "| `/design-systems` | GET, POST | |\n");
    assert_contains(&output, "| `/design-systems/:id` | GET, PUT, DELETE | |\n");
    assert_contains(&output, "| `/auth/:nextauth*` | GET, POST | |\n");
}

#[test]
fn test_text_routes_miss_reexported_handlers() {
    let repo = TestRepo::new();
    repo.with_pony_layout();

    let output = repo.run_cli_success(&["generate", "API_ROUTES", "--text-routes"]);
    assert_contains(&output, "| `/auth/:nextauth*` |  | |\n");
    assert_contains(&output, "| `/design-systems` | GET, POST | |\n");
}

#[test]
fn test_output_file() {
    let repo = TestRepo::new();
    repo.with_pony_layout().add_file("docs/.keep", "");

    let stdout = repo.run_cli_success(&["generate", "API_ROUTES", "-o", "docs/api.md"]);
    assert!(stdout.is_empty());

    let written = repo.read_file("docs/api.md");
    assert_ordered(&written, "# API Routes", "/design-systems");
}

#[test]
fn test_config_file_roots() {
    let repo = TestRepo::new();
    repo.add_file(
        "pony-docgen.toml",
        "[api_routes]\nroot = 'web/app/api'\n\n[extraction]\nparallel = false\n",
    )
    .add_file(
        "web/app/api/tokens/[tokenId]/route.ts",
        "export async function PATCH() {}\n",
    );

    let output = repo.run_cli_success(&["generate", "API_ROUTES"]);
    assert_contains(&output, "| `/tokens/:tokenId` | PATCH | |\n");
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_missing_root_exit_code() {
    let repo = TestRepo::new();

    let (code, stderr) = repo.run_cli_failure(&["generate", "COMPONENTS"]);
    assert_eq!(code, 1);
    assert_contains(&stderr, "Scan root not found");
}

#[test]
fn test_invalid_pattern_exit_code() {
    let repo = TestRepo::new();
    repo.with_pony_layout();

    let (code, stderr) = repo.run_cli_failure(&["generate", "COMPONENTS", "--include", "(["]);
    assert_eq!(code, 2);
    assert_contains(&stderr, "Invalid pattern");
}

#[test]
fn test_invalid_config_exit_code() {
    let repo = TestRepo::new();
    repo.with_pony_layout().add_file("pony-docgen.toml", "[pages]\nroot = 'x'\n");

    let (code, stderr) = repo.run_cli_failure(&["generate", "COMPONENTS"]);
    assert_eq!(code, 2);
    assert_contains(&stderr, "Configuration error");
}

#[test]
fn test_strict_fails_on_skipped_file() {
    let repo = TestRepo::new();
    repo.with_pony_layout()
        .add_file("src/components/Broken.tsx", "export const Broken = (\n");

    let lenient = repo.run_cli_success(&["generate", "COMPONENTS"]);
    assert_not_contains(&lenient, "Broken");
    assert_contains(&lenient, "## Button");

    let (code, stderr) = repo.run_cli_failure(&["--strict", "generate", "COMPONENTS"]);
    assert_eq!(code, 3);
    assert_contains(&stderr, "Broken.tsx");
}
