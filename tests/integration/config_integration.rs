//! Integration tests for layered configuration loading

use super::test_utils::with_xdg_env;
use sitegen::config::{ConfigLoader, WORKSPACE_CONFIG_FILE};
use sitegen::context::BuildContext;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_global_file_applies_without_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let global = ConfigLoader::global_config_path().unwrap();
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(&global, "[tool]\nprogram = \"global_tool\"\n").unwrap();

        let workspace = test_dir.path().join("ws");
        fs::create_dir_all(&workspace).unwrap();
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.tool.program, PathBuf::from("global_tool"));
        assert_eq!(config.discovery.suffix, ".building.yaml");
    });
}

#[test]
fn test_workspace_file_overrides_global_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let global = ConfigLoader::global_config_path().unwrap();
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(
            &global,
            "[tool]\nprogram = \"global_tool\"\n\n[logging]\nlevel = \"warn\"\n",
        )
        .unwrap();

        let workspace = test_dir.path().join("ws");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(
            workspace.join(WORKSPACE_CONFIG_FILE),
            "[tool]\nprogram = \"workspace_tool\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.tool.program, PathBuf::from("workspace_tool"));
        assert_eq!(config.logging.level, "warn");
    });
}

#[test]
fn test_environment_specific_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let workspace = test_dir.path().join("ws");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(
            workspace.join(WORKSPACE_CONFIG_FILE),
            "[package]\nmaps_dir = \"maps\"\n",
        )
        .unwrap();
        fs::write(
            workspace.join("sitegen.ci.toml"),
            "[package]\nmaps_dir = \"ci_maps\"\n",
        )
        .unwrap();

        std::env::set_var("SITEGEN_ENV", "ci");
        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.package.maps_dir, Some(PathBuf::from("ci_maps")));
    });
}

#[test]
fn test_build_context_from_config() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let workspace = test_dir.path().join("ws");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(
            workspace.join(WORKSPACE_CONFIG_FILE),
            r#"
[tool]
program = "/usr/bin/building_map_generator"

[discovery]
suffix = ".site.yaml"
ignore_patterns = ["vendor"]
max_depth = 3
"#,
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        let context = BuildContext::from_config(&config);
        assert_eq!(context.tool, PathBuf::from("/usr/bin/building_map_generator"));
        assert_eq!(context.walker.suffix, ".site.yaml");
        assert_eq!(context.walker.ignore_patterns, vec!["vendor".to_string()]);
        assert_eq!(context.walker.max_depth, Some(3));
    });
}

#[test]
fn test_invalid_workspace_config_fails_validation() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let workspace = test_dir.path().join("ws");
        fs::create_dir_all(&workspace).unwrap();
        fs::write(
            workspace.join(WORKSPACE_CONFIG_FILE),
            "[discovery]\nsuffix = \"yaml\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load(&workspace).unwrap();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("Discovery:"));
    });
}
