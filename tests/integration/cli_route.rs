//! Integration tests for the CLI route table

use super::test_utils::{with_xdg_env, write_site};
use sitegen::cli::{Commands, EmitOptions, RunContext};
use sitegen::config::WORKSPACE_CONFIG_FILE;
use sitegen::error::SitegenError;
use sitegen::graph::emit::{GraphFormat, GraphManifest};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn package_command(root: &std::path::Path, maps_dir: Option<String>) -> Commands {
    Commands::Package {
        input: Some(root.join("maps").display().to_string()),
        output_package_dir: Some(root.join("share").display().to_string()),
        package_name: Some("demo".to_string()),
        maps_dir,
        depends: Vec::new(),
    }
}

#[test]
fn test_package_json_output() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let root = test_dir.path();
        write_site(root, "maps/x.building.yaml");
        write_site(root, "maps/y.building.yaml");

        let ctx = RunContext::new(root.to_path_buf(), None, None)
            .unwrap()
            .with_emit(EmitOptions {
                format: GraphFormat::Json,
                graph_file: None,
            });
        let output = ctx.execute(&package_command(root, None)).unwrap();
        let manifest: GraphManifest = serde_json::from_str(&output).unwrap();

        assert_eq!(manifest.actions.len(), 3);
        assert_eq!(manifest.actions[2].identifier, "generate_demo_package_world");
        let command = manifest.actions[0].command().unwrap();
        assert_eq!(command.program, PathBuf::from("building_map_generator"));
    });
}

#[test]
fn test_package_uses_configured_maps_dir() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let root = test_dir.path();
        write_site(root, "maps/x.building.yaml");
        fs::write(
            root.join(WORKSPACE_CONFIG_FILE),
            "[package]\nmaps_dir = \"levels\"\n",
        )
        .unwrap();

        let ctx = RunContext::new(root.to_path_buf(), None, None).unwrap();
        ctx.execute(&package_command(root, None)).unwrap();
        assert!(root.join("share/levels/x/nav_graphs").is_dir());

        // An explicit MAPS_DIR wins over config.
        let explicit = root.join("explicit").display().to_string();
        ctx.execute(&package_command(root, Some(explicit))).unwrap();
        assert!(root.join("explicit/x/nav_graphs").is_dir());
    });
}

#[test]
fn test_package_without_inputs_fails() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let root = test_dir.path();
        fs::create_dir_all(root.join("maps")).unwrap();

        let ctx = RunContext::new(root.to_path_buf(), None, None).unwrap();
        let result = ctx.execute(&package_command(root, None));
        assert!(matches!(result, Err(SitegenError::NoInputsFound { .. })));
    });
}

#[test]
fn test_discover_lists_world_names() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let root = test_dir.path();
        write_site(root, "maps/b.building.yaml");
        write_site(root, "maps/sub/a.building.yaml");

        let ctx = RunContext::new(root.to_path_buf(), None, None).unwrap();
        let output = ctx
            .execute(&Commands::Discover {
                input: root.join("maps"),
                format: "json".to_string(),
            })
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let names: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["world_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    });
}

#[test]
fn test_config_command_prints_effective_toml() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let root = test_dir.path();
        let ctx =
            RunContext::new(root.to_path_buf(), None, Some(PathBuf::from("custom_gen"))).unwrap();
        let output = ctx.execute(&Commands::Config).unwrap();
        let value: toml::Value = toml::from_str(&output).unwrap();
        assert_eq!(value["tool"]["program"].as_str(), Some("custom_gen"));
        assert_eq!(value["discovery"]["suffix"].as_str(), Some(".building.yaml"));
    });
}
