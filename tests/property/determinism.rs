//! Property-based tests for determinism guarantees

use proptest::prelude::*;
use sitegen::discover::path::world_name;
use sitegen::graph::emit::fingerprint;
use sitegen::planner::prepare_dir;
use sitegen::registrar::{action_identifier, identifier_for_name, package_world_identifier};
use sitegen::types::{ActionKind, Dependency, GenerationAction, Scope};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn stem() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

fn aggregate(identifier: &str, members: &[String]) -> GenerationAction {
    GenerationAction {
        identifier: identifier.to_string(),
        scope: Scope::Package,
        kind: ActionKind::Aggregate,
        inputs: members
            .iter()
            .map(|m| Dependency::Action(m.clone()))
            .collect(),
        outputs: vec![PathBuf::from(format!("{}.sdf", identifier))],
    }
}

proptest! {
    /// The identifier depends only on the final component's stem.
    #[test]
    fn identifier_ignores_directories(name in stem(), dirs in prop::collection::vec(stem(), 0..4)) {
        let mut path = PathBuf::new();
        for dir in &dirs {
            path.push(dir);
        }
        path.push(format!("{}.yaml", name));

        let id = action_identifier(&path, Scope::Site).unwrap();
        prop_assert_eq!(&id, &format!("generate_{}_site", name));
        prop_assert_eq!(id, action_identifier(Path::new(&format!("{}.yaml", name)), Scope::Site).unwrap());
    }

    /// Site and package identifiers for the same name never collide.
    #[test]
    fn scopes_never_collide(name in stem()) {
        prop_assert_ne!(
            identifier_for_name(&name, Scope::Site),
            identifier_for_name(&name, Scope::Package)
        );
    }

    /// A package aggregate never shares an identifier with any site, whatever the names.
    #[test]
    fn aggregate_never_collides_with_sites(package in stem(), name in "[a-z][a-z0-9_]{0,23}") {
        let aggregate = package_world_identifier(&package);
        prop_assert_ne!(&aggregate, &identifier_for_name(&name, Scope::Site));
        prop_assert_ne!(&aggregate, &identifier_for_name(&name, Scope::Package));
    }

    /// Stripping the compound suffix recovers the original world name.
    #[test]
    fn world_name_strips_exactly_the_suffix(name in "[a-z][a-z0-9_.]{0,15}", dir in stem()) {
        prop_assume!(!name.ends_with('.'));
        let path = Path::new(&dir).join(format!("{}.building.yaml", name));
        prop_assert_eq!(world_name(&path, ".building.yaml"), Some(name));
    }

    /// Same action set, same fingerprint.
    #[test]
    fn fingerprint_is_deterministic(ids in prop::collection::vec(stem(), 1..6)) {
        let actions: Vec<GenerationAction> = ids
            .iter()
            .map(|id| aggregate(id, &ids))
            .collect();
        prop_assert_eq!(fingerprint(&actions), fingerprint(&actions.clone()));
    }
}

/// Preparing the same directory any number of times succeeds and leaves it in place.
#[test]
fn test_prepare_dir_idempotent_property() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(stem(), 1..4), 1usize..4),
            |(segments, repeats)| {
                let mut dir = root.clone();
                for segment in &segments {
                    dir.push(segment);
                }
                for _ in 0..repeats {
                    prepare_dir(&dir).unwrap();
                }
                assert!(dir.is_dir());
                Ok(())
            },
        )
        .unwrap();
}
