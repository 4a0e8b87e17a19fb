use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

fn variable<'a>(document: &'a Value, file: &str, name: &str) -> &'a Value {
    document["files"][file]["variables"]
        .as_array()
        .and_then(|vars| vars.iter().find(|v| v["name"] == name))
        .unwrap_or_else(|| panic!("no variable {} in {}", name, file))
}

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "src/App.tsx",
        r#"import { Button } from './Button';

export function App() {
  return <Button label="go" />;
}
"#,
    )?;
    test.write_file(
        "src/Button.tsx",
        r#"interface ButtonProps { label: string }

export const Button = ({ label }: ButtonProps) => <button>{label}</button>;
"#,
    )?;
    Ok(test)
}

#[test]
fn test_analyze_writes_default_outputs() -> Result<()> {
    let test = project()?;

    let output = test.analyze_command().output()?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Analyzed 2 files - 2 components, 0 hooks, 1 edge"));

    let primary = test.read_json(".uigraph/graph.json")?;
    let cached = test.read_json("node_modules/.cache/uigraph/graph.json")?;
    assert_eq!(primary, cached);
    assert_eq!(primary["src"], test.root().to_string_lossy().as_ref());

    Ok(())
}

#[test]
fn test_analyze_records_render_edge() -> Result<()> {
    let test = project()?;
    test.analyze_command().output()?;

    let document = test.read_json(".uigraph/graph.json")?;
    let app = variable(&document, &test.path("src/App.tsx"), "App");
    let button = variable(&document, &test.path("src/Button.tsx"), "Button");

    assert_eq!(app["details"]["kind"], "component");
    assert_eq!(button["details"]["props"][0]["name"], "label");

    let edges = document["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["from"], button["id"]);
    assert_eq!(edges[0]["to"], app["id"]);
    assert_eq!(edges[0]["label"], "render");

    Ok(())
}

#[test]
fn test_analyze_output_flag_replaces_configured_outputs() -> Result<()> {
    let test = project()?;

    let output = test
        .analyze_command()
        .args(["--output", "out/one.json", "-o", "out/two.json"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(test.read_json("out/one.json")?, test.read_json("out/two.json")?);
    assert!(!test.root().join(".uigraph").exists());

    Ok(())
}

#[test]
fn test_analyze_source_root_flag() -> Result<()> {
    let test = CliTest::with_file(
        "web/src/Page.tsx",
        "export default function Page() { return <main />; }\n",
    )?;

    let output = test
        .analyze_command()
        .args(["--source-root", "web"])
        .output()?;

    assert!(output.status.success());
    let document = test.read_json("web/.uigraph/graph.json")?;
    let page = variable(&document, &test.path("web/src/Page.tsx"), "Page");
    assert_eq!(
        document["files"][test.path("web/src/Page.tsx")]["defaultExport"],
        page["id"]
    );

    Ok(())
}

#[test]
fn test_parse_failure_exits_one_and_still_writes() -> Result<()> {
    let test = project()?;
    test.write_file("src/Broken.tsx", "export const = <div>;\n")?;

    let output = test.analyze_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1 file skipped"));
    assert!(stdout.contains("Broken.tsx"));

    let document = test.read_json(".uigraph/graph.json")?;
    assert!(document["files"].get(test.path("src/Broken.tsx")).is_none());
    assert_eq!(document["edges"].as_array().map(Vec::len), Some(1));

    Ok(())
}

#[test]
fn test_invalid_config_exits_two() -> Result<()> {
    let test = project()?;
    test.write_file(".uigraphrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.analyze_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ignores"));
    assert!(!test.root().join(".uigraph").exists());

    Ok(())
}

#[test]
fn test_dependency_render_has_no_edge() -> Result<()> {
    let test = CliTest::with_file(
        "package.json",
        r#"{ "dependencies": { "@mui/material": "^6.0.0" } }"#,
    )?;
    test.write_file(
        "src/Toolbar.tsx",
        r#"import { Button } from '@mui/material';

export const Toolbar = () => <Button variant="text" />;
"#,
    )?;

    let output = test.analyze_command().output()?;

    assert!(output.status.success());
    let document = test.read_json(".uigraph/graph.json")?;
    let toolbar = variable(&document, &test.path("src/Toolbar.tsx"), "Toolbar");
    let renders: Vec<&Value> = toolbar["details"]["renders"]
        .as_object()
        .map(|r| r.values().collect())
        .unwrap_or_default();
    assert_eq!(renders.len(), 1);
    assert_eq!(renders[0]["isDependency"], true);
    assert_eq!(document["edges"].as_array().map(Vec::len), Some(0));

    Ok(())
}

#[test]
fn test_unresolved_reference_is_reported() -> Result<()> {
    let test = CliTest::with_file(
        "src/App.tsx",
        r#"import { Missing } from './Missing';

export const App = () => <Missing />;
"#,
    )?;

    let output = test.analyze_command().output()?;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("left unresolved"));
    let document = test.read_json(".uigraph/graph.json")?;
    let unresolved = document["unresolved"].as_array().unwrap();
    assert!(unresolved.iter().any(|u| u["name"] == "Missing"));

    Ok(())
}

#[test]
fn test_test_files_are_ignored_by_default() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/App.test.tsx",
        "export const AppHarness = () => <App />;\n",
    )?;

    test.analyze_command().output()?;

    let document = test.read_json(".uigraph/graph.json")?;
    assert_eq!(document["files"].as_object().map(|f| f.len()), Some(2));

    Ok(())
}
