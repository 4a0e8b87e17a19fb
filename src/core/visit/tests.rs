use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

use crate::core::analyzer::{Analyzer, AnalyzerOptions};
use crate::core::deferred::UnresolvedKind;
use crate::core::document::{Document, FileRecord, VariableNode};
use crate::core::edges::{DependencyEdge, EdgeLabel};
use crate::core::model::{
    ComponentCategory, EntityId, ExportForm, ExportKind, PropBinding, TypeDeclaration, TypeMember,
    VariableDetails, VariableKind,
};
use crate::core::resolve::{AliasTable, DependencySet, ModuleResolver};
use crate::error::{AnalysisError, AnalysisResult};

struct Project {
    _dir: TempDir,
    root: PathBuf,
    document: Document,
}

fn write_files(files: &[(&str, &str)]) -> (TempDir, PathBuf, Vec<PathBuf>) {
    let dir = tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let mut paths = Vec::new();
    for (rel, code) in files {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, code).unwrap();
        paths.push(path);
    }
    paths.sort();
    (dir, root, paths)
}

fn try_analyze(root: &PathBuf, paths: &[PathBuf]) -> AnalysisResult<Document> {
    let resolver = ModuleResolver::new(
        root,
        AliasTable::new(),
        DependencySet::new(["react", "@mui/material"]),
    );
    let mut analyzer = Analyzer::new(resolver, AnalyzerOptions::default());
    for path in paths {
        let code = fs::read_to_string(path).unwrap();
        analyzer.add_file(path.to_str().unwrap(), code)?;
    }
    Ok(analyzer.finish()?.document)
}

fn analyze(files: &[(&str, &str)]) -> Project {
    let (dir, root, paths) = write_files(files);
    let document = try_analyze(&root, &paths).unwrap();
    Project {
        _dir: dir,
        root,
        document,
    }
}

fn find<'d>(nodes: &'d [VariableNode], name: &str) -> Option<&'d VariableNode> {
    nodes.iter().find_map(|node| {
        if node.name == name {
            Some(node)
        } else {
            find(&node.children, name)
        }
    })
}

impl Project {
    fn key(&self, rel: &str) -> String {
        self.root.join(rel).to_string_lossy().into_owned()
    }

    fn file(&self, rel: &str) -> &FileRecord {
        &self.document.files[&self.key(rel)]
    }

    fn var(&self, rel: &str, name: &str) -> &VariableNode {
        find(&self.file(rel).variables, name)
            .unwrap_or_else(|| panic!("no variable '{name}' in {rel}"))
    }

    fn id(&self, rel: &str, name: &str) -> EntityId {
        self.var(rel, name).id
    }

    fn kind(&self, rel: &str, name: &str) -> VariableKind {
        self.var(rel, name).details.kind()
    }
}

fn component<'v>(node: &'v VariableNode) -> &'v crate::core::model::ComponentInfo {
    match &node.details {
        VariableDetails::Component(info) => info,
        other => panic!("'{}' is not a component: {other:?}", node.name),
    }
}

#[test]
fn test_local_render_produces_one_edge() {
    let project = analyze(&[(
        "src/App.tsx",
        "const A = () => <div />;\nconst B = () => <A />;\n",
    )]);

    let a = project.id("src/App.tsx", "A");
    let b = project.id("src/App.tsx", "B");
    assert_eq!(
        project.document.edges,
        vec![DependencyEdge {
            from: a,
            to: b,
            label: EdgeLabel::Render,
        }]
    );
    assert_eq!(
        component(project.var("src/App.tsx", "A")).category,
        ComponentCategory::Expression
    );
}

#[test]
fn test_use_state_registers_value_and_setter() {
    let project = analyze(&[(
        "src/Counter.tsx",
        r#"
import { useState } from "react";
export function Counter() {
    const [count, setCount] = useState(0);
    const state = React.useReducer(reducer, 0);
    return <p>{count}</p>;
}
"#,
    )]);

    let states = &component(project.var("src/Counter.tsx", "Counter")).states;
    assert_eq!(states.len(), 2);
    assert_eq!(states[0].value, "count");
    assert_eq!(states[0].setter.as_deref(), Some("setCount"));
    assert_eq!(states[1].value, "state");
    assert_eq!(states[1].setter, None);
}

#[test]
fn test_dependency_render_has_no_edge() {
    let project = analyze(&[(
        "src/Toolbar.tsx",
        r#"
import { Button } from "@mui/material";
export const Toolbar = () => <Button variant={kind} />;
"#,
    )]);

    let toolbar = component(project.var("src/Toolbar.tsx", "Toolbar"));
    let render = toolbar.renders.values().next().unwrap();
    assert!(render.is_dependency);
    assert_eq!(render.tag, "Button");
    assert_eq!(
        render.props,
        vec![PropBinding {
            prop: "variant".to_string(),
            identifier: "kind".to_string(),
        }]
    );
    assert!(project.document.edges.is_empty());
}

#[test]
fn test_unexported_hook_is_never_registered() {
    let project = analyze(&[(
        "src/hooks.ts",
        r#"
function useFoo() { return 1; }
export const useBar = () => useFoo();
"#,
    )]);

    assert!(find(&project.file("src/hooks.ts").variables, "useFoo").is_none());
    assert_eq!(project.kind("src/hooks.ts", "useBar"), VariableKind::Hook);
    assert_eq!(project.document.hook_count(), 1);
}

#[test]
fn test_hook_exported_by_specifier_is_registered() {
    let project = analyze(&[(
        "src/hooks.ts",
        "function useLocal() { return 1; }\nexport { useLocal };\n",
    )]);
    assert_eq!(project.kind("src/hooks.ts", "useLocal"), VariableKind::Hook);
}

#[test]
fn test_directory_import_renders_index_component() {
    let project = analyze(&[
        (
            "src/App.tsx",
            "import Foo from './Foo';\nexport const App = () => <Foo />;\n",
        ),
        (
            "src/Foo/index.tsx",
            "export default function Foo() { return <div />; }\n",
        ),
    ]);

    let import = &project.file("src/App.tsx").imports["Foo"];
    assert_eq!(import.source, project.key("src/Foo/index.tsx"));

    let foo = project.id("src/Foo/index.tsx", "Foo");
    assert_eq!(project.file("src/Foo/index.tsx").default_export, Some(foo));
    assert_eq!(
        project.document.edges,
        vec![DependencyEdge {
            from: foo,
            to: project.id("src/App.tsx", "App"),
            label: EdgeLabel::Render,
        }]
    );
}

#[test]
fn test_interface_members_and_optional_flag() {
    let project = analyze(&[(
        "src/types.ts",
        "export interface Props { a: string; b?: number }\n",
    )]);

    let file = project.file("src/types.ts");
    let TypeDeclaration::Interface { members, .. } = &file.types["Props"] else {
        panic!("expected interface");
    };
    assert_eq!(members.len(), 2);
    let optional: Vec<bool> = members
        .iter()
        .map(|member| match member {
            TypeMember::Property { optional, .. } => *optional,
            TypeMember::Index { .. } => panic!("unexpected index signature"),
        })
        .collect();
    assert_eq!(optional, [false, true]);
    assert_eq!(file.exports["Props"].kind, ExportKind::Type);
}

#[test]
fn test_render_inside_nested_data_is_render2() {
    let project = analyze(&[(
        "src/List.tsx",
        r#"
export function List({ data }) {
    const items = data.map((d) => <Item key={d} />);
    return <ul>{items}</ul>;
}
function Item() { return <li />; }
"#,
    )]);

    let list = project.id("src/List.tsx", "List");
    let item = project.id("src/List.tsx", "Item");
    assert_eq!(project.kind("src/List.tsx", "items"), VariableKind::Data);
    assert_eq!(
        project.document.edges,
        vec![DependencyEdge {
            from: item,
            to: list,
            label: EdgeLabel::Render2,
        }]
    );
}

#[test]
fn test_nested_definition_shadows_module_level() {
    let project = analyze(&[(
        "src/Table.tsx",
        r#"
export function Table() {
    const Row = () => <tr />;
    return <Row />;
}
function Row() { return <div />; }
"#,
    )]);

    let table = project.var("src/Table.tsx", "Table");
    let nested = &table.children[0];
    assert_eq!(nested.name, "Row");
    let render = component(table).renders.values().next().unwrap();
    assert_eq!(render.target, nested.id);

    let outer = project
        .file("src/Table.tsx")
        .variables
        .iter()
        .find(|v| v.name == "Row")
        .unwrap();
    assert_ne!(outer.id, nested.id);
}

#[test]
fn test_render_inside_memoized_value_is_render2() {
    let project = analyze(&[(
        "src/App.tsx",
        r#"
import { useMemo } from "react";
export function App({ items }) {
    const rows = useMemo(() => items.map((i) => <Row key={i} />), [items]);
    return <ul>{rows}</ul>;
}
function Row() { return <li />; }
"#,
    )]);

    let app = project.var("src/App.tsx", "App");
    let rows = find(&app.children, "rows").unwrap();
    assert_eq!(rows.details.kind(), VariableKind::Data);
    assert_eq!(
        project.document.edges,
        vec![DependencyEdge {
            from: project.id("src/App.tsx", "Row"),
            to: app.id,
            label: EdgeLabel::Render2,
        }]
    );
}

#[test]
fn test_hoisted_nested_function_shadows_earlier_render() {
    let project = analyze(&[(
        "src/B.tsx",
        r#"
const A = () => <div />;
export function B() {
    return <A />;
    function A() { return <span />; }
}
"#,
    )]);

    let b = project.var("src/B.tsx", "B");
    let nested = find(&b.children, "A").unwrap();
    let render = component(b).renders.values().next().unwrap();
    assert_eq!(render.target, nested.id);
    assert_ne!(project.id("src/B.tsx", "A"), nested.id);
    assert!(project.document.unresolved.is_empty());
}

#[test]
fn test_render_of_module_level_component_ignores_unrelated_nested_names() {
    let project = analyze(&[(
        "src/Page.tsx",
        r#"
function Header() { return <h1 />; }
export function Page() {
    return <Header />;
}
function Other() {
    function Footer() { return <footer />; }
    return <Footer />;
}
"#,
    )]);

    let page = project.var("src/Page.tsx", "Page");
    let render = component(page).renders.values().next().unwrap();
    assert_eq!(render.target, project.id("src/Page.tsx", "Header"));
}

#[test]
fn test_duplicate_component_in_one_scope_is_fatal() {
    let (_dir, root, paths) = write_files(&[(
        "src/Dup.tsx",
        "{ const A = () => <a />; }\n{ const A = () => <b />; }\n",
    )]);
    let err = try_analyze(&root, &paths).unwrap_err();
    assert!(matches!(err, AnalysisError::DuplicateDeclaration { name, .. } if name == "A"));
}

#[test]
fn test_duplicate_data_binding_gets_distinct_id() {
    let project = analyze(&[(
        "src/data.ts",
        "{ const limit = 1; }\n{ const limit = 2; }\n",
    )]);
    let vars = &project.file("src/data.ts").variables;
    assert_eq!(vars.len(), 2);
    assert_ne!(vars[0].id, vars[1].id);
}

#[test]
fn test_namespace_member_tag_resolves_through_import() {
    let project = analyze(&[
        (
            "src/Page.tsx",
            "import * as UI from './ui';\nexport const Page = () => <UI.Card />;\n",
        ),
        ("src/ui.tsx", "export const Card = () => <div />;\n"),
    ]);

    assert_eq!(
        project.document.edges,
        vec![DependencyEdge {
            from: project.id("src/ui.tsx", "Card"),
            to: project.id("src/Page.tsx", "Page"),
            label: EdgeLabel::Render,
        }]
    );
}

#[test]
fn test_forward_hook_reference_through_default_export() {
    let project = analyze(&[
        (
            "src/App.tsx",
            r#"
import useTheme from './useTheme';
export const App = () => {
    const theme = useTheme();
    return <div />;
};
"#,
        ),
        (
            "src/useTheme.ts",
            "export default function useTheme() { return 1; }\n",
        ),
    ]);

    let hook = project.id("src/useTheme.ts", "useTheme");
    assert_eq!(project.kind("src/useTheme.ts", "useTheme"), VariableKind::Hook);
    assert_eq!(component(project.var("src/App.tsx", "App")).hooks, vec![hook]);
    let theme = project.var("src/App.tsx", "theme");
    assert_eq!(theme.details.kind(), VariableKind::Data);
    assert_eq!(theme.dependencies, ["useTheme"]);
    assert!(project.document.unresolved.is_empty());
}

#[test]
fn test_hook_calling_hook_records_reference() {
    let project = analyze(&[(
        "src/hooks.ts",
        r#"
export function useA() { return useB(); }
export function useB() { return 2; }
"#,
    )]);

    let VariableDetails::Hook(hook) = &project.var("src/hooks.ts", "useA").details else {
        panic!("useA is not a hook");
    };
    assert_eq!(hook.hooks, vec![project.id("src/hooks.ts", "useB")]);
}

#[test]
fn test_reexport_is_an_alias_of_target() {
    let project = analyze(&[
        (
            "src/App.tsx",
            "import { PrimaryButton } from './index';\nexport const App = () => <PrimaryButton />;\n",
        ),
        ("src/Button.tsx", "export const Button = () => <button />;\n"),
        ("src/icons.ts", "export const star = 1;\n"),
        (
            "src/index.ts",
            "export { Button as PrimaryButton } from './Button';\nexport * from './icons';\n",
        ),
    ]);

    let button = project.id("src/Button.tsx", "Button");
    let index = project.file("src/index.ts");
    let reexport = &index.exports["PrimaryButton"];
    assert_eq!(reexport.id, button);
    assert_eq!(reexport.kind, ExportKind::Component);
    assert_eq!(reexport.source.as_deref(), Some(project.key("src/Button.tsx").as_str()));

    let star = &index.exports[&format!("*:{}", project.key("src/icons.ts"))];
    assert_eq!(star.form, ExportForm::Namespace);

    assert_eq!(project.document.edges.len(), 1);
    assert_eq!(project.document.edges[0].from, button);
    assert_eq!(project.document.unresolved.len(), 1);
    assert_eq!(project.document.unresolved[0].kind, UnresolvedKind::ExportAll);
}

#[test]
fn test_effects_context_and_props() {
    let project = analyze(&[(
        "src/Panel.tsx",
        r#"
import { useEffect, useContext } from "react";
export function Panel({ id, title }) {
    const theme = useContext(ThemeContext);
    useEffect(() => {
        console.log(id);
    }, [id]);
    React.useLayoutEffect(() => {});
    return <div>{title}</div>;
}
"#,
    )]);

    let panel = component(project.var("src/Panel.tsx", "Panel"));
    assert_eq!(panel.contexts, ["ThemeContext"]);
    assert_eq!(panel.effects.len(), 2);
    assert_eq!(panel.effects[0].dependencies, Some(vec!["id".to_string()]));
    assert!(panel.effects[0].body.is_some());
    assert_eq!(panel.effects[1].dependencies, None);
    let props: Vec<&str> = panel.props.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(props, ["id", "title"]);
}

#[test]
fn test_wrapped_component_and_default_wrapper_export() {
    let project = analyze(&[
        (
            "src/Card.tsx",
            r#"
import { memo, forwardRef } from "react";
const Card = memo(forwardRef((props, ref) => <div ref={ref} />));
export default memo(Card);
"#,
        ),
        (
            "src/Shell.tsx",
            "import Card from './Card';\nexport const Shell = () => <Card />;\n",
        ),
    ]);

    let card = project.var("src/Card.tsx", "Card");
    let info = component(card);
    assert_eq!(info.category, ComponentCategory::Wrapped);
    assert_eq!(info.wrappers, ["memo", "forwardRef"]);
    assert_eq!(project.file("src/Card.tsx").default_export, Some(card.id));
    assert_eq!(project.document.edges[0].from, card.id);
}

#[test]
fn test_dependencies_are_module_level_names() {
    let project = analyze(&[(
        "src/View.tsx",
        r#"
import { format } from "./format";
const LIMIT = 3;
export const View = ({ value }) => <p>{format(value, LIMIT)}</p>;
"#,
    )]);

    assert_eq!(project.var("src/View.tsx", "View").dependencies, ["format", "LIMIT"]);
    let unresolved = &project.document.unresolved;
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].kind, UnresolvedKind::Import);
}

#[test]
fn test_repeated_renders_produce_one_edge() {
    let project = analyze(&[(
        "src/Grid.tsx",
        "const Cell = () => <td />;\nexport const Grid = () => <tr><Cell /><Cell /></tr>;\n",
    )]);

    assert_eq!(component(project.var("src/Grid.tsx", "Grid")).renders.len(), 2);
    assert_eq!(project.document.edges.len(), 1);
}

#[test]
fn test_parse_failure_skips_only_that_file() {
    let (_dir, root, paths) = write_files(&[
        ("src/Broken.tsx", "export const = <;\n"),
        ("src/Ok.tsx", "export const Ok = () => <div />;\n"),
    ]);
    let resolver = ModuleResolver::new(&root, AliasTable::new(), DependencySet::default());
    let mut analyzer = Analyzer::new(resolver, AnalyzerOptions::default());
    for path in &paths {
        let code = fs::read_to_string(path).unwrap();
        analyzer.add_file(path.to_str().unwrap(), code).unwrap();
    }
    let output = analyzer.finish().unwrap();

    assert_eq!(output.analyzed, 1);
    assert_eq!(output.parse_failures.len(), 1);
    assert!(output.parse_failures[0].file.ends_with("Broken.tsx"));
    assert_eq!(output.document.component_count(), 1);
}

#[test]
fn test_document_round_trips_through_json() {
    let project = analyze(&[
        (
            "src/App.tsx",
            r#"
import { useState } from "react";
import { Button } from "@mui/material";
import Foo from "./Foo";
type Mode = "a" | "b" | -1;
export function App({ mode }: { mode: Mode }) {
    const [open, setOpen] = useState(false);
    return <Foo open={open}><Button /></Foo>;
}
"#,
        ),
        ("src/Foo.tsx", "export default () => <section />;\n"),
    ]);

    let json = serde_json::to_string_pretty(&project.document).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, project.document);
}

#[test]
fn test_ids_are_unique_within_a_file() {
    let project = analyze(&[(
        "src/Many.tsx",
        r#"
export const A = () => <div />;
export function B() { const inner = 1; return <A />; }
export const useC = () => 3;
const d = 4;
"#,
    )]);

    fn collect(nodes: &[VariableNode], out: &mut Vec<EntityId>) {
        for node in nodes {
            out.push(node.id);
            collect(&node.children, out);
        }
    }
    let mut ids = Vec::new();
    collect(&project.file("src/Many.tsx").variables, &mut ids);
    let count = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), count);
    assert_eq!(count, 5);
}
