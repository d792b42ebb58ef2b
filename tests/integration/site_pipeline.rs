//! Integration tests for the single-site pipeline

use super::test_utils::{path_arg, write_site};
use sitegen::context::BuildContext;
use sitegen::error::SitegenError;
use sitegen::graph::{BuildGraph, InMemoryGraph};
use sitegen::pipeline::generate_site;
use sitegen::types::{ActionKind, Dependency, Scope};
use sitegen::validate::SiteArgs;
use std::path::PathBuf;
use tempfile::TempDir;

fn site_args(root: &std::path::Path, input: &str, name: &str) -> SiteArgs {
    SiteArgs {
        input: path_arg(&root.join(input)),
        output_world: path_arg(&root.join("out").join(format!("{}.world", name))),
        output_nav_dir: path_arg(&root.join("out").join(format!("{}_nav", name))),
        depends: Vec::new(),
    }
}

#[test]
fn test_site_registers_command_with_input_and_outputs() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let input = write_site(root, "b.yaml");

    let context = BuildContext::new("building_map_generator");
    let mut graph = InMemoryGraph::new();
    let handle = generate_site(&mut graph, &context, &site_args(root, "b.yaml", "b")).unwrap();

    assert_eq!(handle.identifier, "generate_b_site");
    assert_eq!(handle.index, 0);
    assert!(root.join("out").is_dir());
    assert!(root.join("out/b_nav").is_dir());
    // The planner creates directories only; the world file is the generator's job.
    assert!(!root.join("out/b.world").exists());

    let action = graph.get("generate_b_site").unwrap();
    assert_eq!(action.scope, Scope::Site);
    assert_eq!(action.inputs, vec![Dependency::Path(input.clone())]);
    assert_eq!(
        action.outputs,
        vec![root.join("out/b.world"), root.join("out/b_nav")]
    );
    match &action.kind {
        ActionKind::Command { command } => {
            assert_eq!(command.program, PathBuf::from("building_map_generator"));
            assert_eq!(
                command.args,
                vec![
                    input.display().to_string(),
                    "--export-world".to_string(),
                    root.join("out/b.world").display().to_string(),
                    "--export-nav".to_string(),
                    root.join("out/b_nav").display().to_string(),
                ]
            );
        }
        ActionKind::Aggregate => panic!("site action must run a command"),
    }
}

#[test]
fn test_depends_resolve_to_actions_and_paths() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_site(root, "a.yaml");
    write_site(root, "b.yaml");
    let models = root.join("models.yaml");

    let context = BuildContext::new("gen");
    let mut graph = InMemoryGraph::new();
    generate_site(&mut graph, &context, &site_args(root, "a.yaml", "a")).unwrap();

    let mut args = site_args(root, "b.yaml", "b");
    args.depends = vec![
        "generate_a_site".to_string(),
        models.display().to_string(),
        " generate_a_site ".to_string(),
        String::new(),
    ];
    generate_site(&mut graph, &context, &args).unwrap();

    let action = graph.get("generate_b_site").unwrap();
    assert_eq!(
        action.inputs,
        vec![
            Dependency::Path(root.join("b.yaml")),
            Dependency::Action("generate_a_site".to_string()),
            Dependency::Path(models),
        ]
    );
}

#[test]
fn test_missing_input_file_fails_after_planning() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let context = BuildContext::new("gen");
    let mut graph = InMemoryGraph::new();
    let result = generate_site(&mut graph, &context, &site_args(root, "ghost.yaml", "ghost"));

    assert!(matches!(result, Err(SitegenError::InputNotFound { .. })));
    assert!(!graph.contains("generate_ghost_site"));
}

#[test]
fn test_same_stem_twice_is_duplicate() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_site(root, "one/b.yaml");
    write_site(root, "two/b.yaml");

    let context = BuildContext::new("gen");
    let mut graph = InMemoryGraph::new();
    generate_site(&mut graph, &context, &site_args(root, "one/b.yaml", "b1")).unwrap();
    let result = generate_site(&mut graph, &context, &site_args(root, "two/b.yaml", "b2"));

    assert!(matches!(
        result,
        Err(SitegenError::DuplicateActionIdentifier { ref identifier, .. })
            if identifier == "generate_b_site"
    ));
    assert_eq!(graph.len(), 1);
}

#[test]
fn test_repeated_configuration_is_idempotent_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_site(root, "b.yaml");
    let context = BuildContext::new("gen");

    for _ in 0..2 {
        let mut graph = InMemoryGraph::new();
        let handle = generate_site(&mut graph, &context, &site_args(root, "b.yaml", "b")).unwrap();
        assert_eq!(handle.identifier, "generate_b_site");
    }
    assert!(root.join("out/b_nav").is_dir());
}
