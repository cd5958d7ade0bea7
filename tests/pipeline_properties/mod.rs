//! End-to-end properties of the COMPONENTS and API_ROUTES pipelines,
//! exercised through the library API

use pony_docgen::fs_utils::to_slash;
use pony_docgen::{generate, DocGenError, DocsConfig, HttpMethod, Records, Target};

use crate::common::TestRepo;

fn config_for(repo: &TestRepo) -> DocsConfig {
    DocsConfig::from_toml(&format!(
        "[components]\nroot = '{}'\n[api_routes]\nroot = '{}'\n",
        to_slash(&repo.path().join("src/components")),
        to_slash(&repo.path().join("src/app/api")),
    ))
    .expect("valid config")
}

#[test]
fn test_unchanged_tree_renders_identical_documents() {
    let repo = TestRepo::new();
    repo.with_pony_layout();
    let config = config_for(&repo);

    for target in Target::ALL {
        let first = generate(target, &config).unwrap().markdown();
        let second = generate(target, &config).unwrap().markdown();
        assert_eq!(first, second, "{} output changed between runs", target);
    }
}

#[test]
fn test_excluded_files_produce_no_records() {
    let repo = TestRepo::new();
    repo.with_pony_layout()
        .add_component("common/Card.test.tsx", "CardHarness", &["title: string"]);

    let docs = generate(Target::Components, &config_for(&repo)).unwrap();
    let Records::Components(records) = &docs.records else {
        panic!("expected component records");
    };
    assert!(records
        .iter()
        .all(|r| !r.source_path.contains(".test.")));
    assert!(records.iter().all(|r| r.name != "Harness" && r.name != "CardHarness"));
}

#[test]
fn test_nested_dynamic_segments() {
    let repo = TestRepo::new();
    repo.add_route("users/[id]/posts/[postId]", &["GET"]);

    let docs = generate(Target::ApiRoutes, &config_for(&repo)).unwrap();
    let Records::Routes(routes) = &docs.records else {
        panic!("expected route records");
    };
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].url_path, "/users/:id/posts/:postId");
}

#[test]
fn test_props_fields_and_requiredness() {
    let repo = TestRepo::new();
    repo.add_component("Button.tsx", "Button", &["text: string;", "onClick?: () => void;"]);

    let docs = generate(Target::Components, &config_for(&repo)).unwrap();
    let Records::Components(records) = &docs.records else {
        panic!("expected component records");
    };
    let fields: Vec<(&str, &str, bool)> = records[0]
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.type_expression.as_str(), f.required))
        .collect();
    assert_eq!(
        fields,
        vec![("text", "string", true), ("onClick", "() => void", false)]
    );
}

#[test]
fn test_methods_in_discovery_order_and_empty_cell() {
    let repo = TestRepo::new();
    repo.add_route("design-systems", &["GET", "POST"])
        .add_file("src/app/api/health/route.ts", "export const dynamic = 'force-dynamic'\n");

    let docs = generate(Target::ApiRoutes, &config_for(&repo)).unwrap();
    let Records::Routes(routes) = &docs.records else {
        panic!("expected route records");
    };
    assert_eq!(routes[0].methods, vec![HttpMethod::Get, HttpMethod::Post]);
    assert!(routes[1].methods.is_empty());

    let markdown = docs.markdown();
    assert!(markdown.contains("| `/design-systems` | GET, POST | |\n"));
    assert!(markdown.contains("| `/health` |  | |\n"));
}

#[test]
fn test_missing_root_is_not_found() {
    let repo = TestRepo::new();
    let config = config_for(&repo);

    for target in Target::ALL {
        let err = generate(target, &config).unwrap_err();
        assert!(matches!(err, DocGenError::NotFound { .. }), "{}: {:?}", target, err);
    }
}

#[test]
fn test_unparsable_file_does_not_hide_others() {
    let repo = TestRepo::new();
    repo.with_pony_layout()
        .add_file("src/components/Broken.tsx", "export function Broken( {\n")
        .add_file("src/app/api/broken/route.ts", "export async function GET( {\n");
    let config = config_for(&repo);

    let components = generate(Target::Components, &config).unwrap();
    assert_eq!(components.warnings.len(), 1);
    assert!(components.warnings[0].path.ends_with("Broken.tsx"));
    assert!(components.markdown().contains("## Button\n"));
    assert!(components.markdown().contains("## Sidebar\n"));

    let routes = generate(Target::ApiRoutes, &config).unwrap();
    assert_eq!(routes.warnings.len(), 1);
    assert!(routes.markdown().contains("| `/design-systems` | GET, POST | |\n"));
    assert!(!routes.markdown().contains("/broken"));
}

#[test]
fn test_jsx_text_recovery_keeps_component() {
    let repo = TestRepo::new();
    repo.add_file(
        "src/components/dashboard/ReportCard.tsx",
        r#"interface ReportCardProps {
  title: string
}

export function ReportCard({ title }: ReportCardProps) {
  return (
    <section>
      <h4>Comparison & Reporting</h4>
      <p>{title}</p>
    </section>
  )
}
"#,
    );

    let docs = generate(Target::Components, &config_for(&repo)).unwrap();
    assert!(docs.warnings.is_empty(), "{:?}", docs.warnings);
    assert!(docs
        .markdown()
        .contains("## ReportCard\n\n### Props\n\n| Name | Type | Required | Description |\n|------|------|----------|-------------|\n| title | `string` | true | |\n"));
}
