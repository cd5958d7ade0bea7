//! Tests for the `inject` CLI command

use crate::common::{assert_contains, TestRepo};

const README: &str = "# Storybook Pony\n\n\
## Components\n\n\
<!-- AUTO-GENERATED-CONTENT:START (COMPONENTS) -->\n\
<!-- AUTO-GENERATED-CONTENT:END -->\n\n\
## API\n\n\
<!-- AUTO-GENERATED-CONTENT:START (API_ROUTES) -->\n\
old table\n\
<!-- AUTO-GENERATED-CONTENT:END -->\n\n\
<!-- AUTO-GENERATED-CONTENT:START (TOC) -->\n\
- [Components](#components)\n\
<!-- AUTO-GENERATED-CONTENT:END -->\n";

#[test]
fn test_inject_fills_both_blocks() {
    let repo = TestRepo::new();
    repo.with_pony_layout().add_file("README.md", README);

    let summary = repo.run_cli_success(&["inject", "README.md"]);
    assert_eq!(summary, "updated README.md (2 block(s))\n");

    let readme = repo.read_file("README.md");
    assert_contains(
        &readme,
        "<!-- AUTO-GENERATED-CONTENT:START (COMPONENTS) -->\n# Components\n\n## Button\n",
    );
    assert_contains(&readme, "| `/design-systems` | GET, POST | |\n<!-- AUTO-GENERATED-CONTENT:END -->");
    assert_contains(&readme, "(TOC) -->\n- [Components](#components)\n<!--");
    assert!(!readme.contains("old table"));
}

#[test]
fn test_check_reports_stale_then_clean() {
    let repo = TestRepo::new();
    repo.with_pony_layout().add_file("README.md", README);

    let (code, stderr) = repo.run_cli_failure(&["inject", "--check", "README.md"]);
    assert_eq!(code, 6);
    assert_contains(&stderr, "out of date: README.md");
    assert_eq!(repo.read_file("README.md"), README);

    repo.run_cli_success(&["inject", "README.md"]);
    let summary = repo.run_cli_success(&["inject", "--check", "README.md"]);
    assert_eq!(summary, "unchanged README.md (2 block(s))\n");
}

#[test]
fn test_new_component_makes_docs_stale() {
    let repo = TestRepo::new();
    repo.with_pony_layout().add_file("README.md", README);
    repo.run_cli_success(&["inject", "README.md"]);

    repo.add_component("forms/TokenInput.tsx", "TokenInput", &["value: string", "onChange?: (value: string) => void"]);

    let (code, _) = repo.run_cli_failure(&["inject", "--check", "README.md"]);
    assert_eq!(code, 6);

    repo.run_cli_success(&["inject", "README.md"]);
    assert_contains(
        &repo.read_file("README.md"),
        "| onChange | `(value: string) => void` | false | |\n",
    );
}

#[test]
fn test_unclosed_block_exit_code() {
    let repo = TestRepo::new();
    repo.with_pony_layout().add_file(
        "README.md",
        "# Pony\n<!-- AUTO-GENERATED-CONTENT:START (COMPONENTS) -->\n",
    );

    let (code, stderr) = repo.run_cli_failure(&["inject", "README.md"]);
    assert_eq!(code, 4);
    assert_contains(&stderr, "line 2");
}
