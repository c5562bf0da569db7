//! Integration tests for modules-check-deps
//!
//! These tests drive the reader and writer together against real files.

use modules_check_deps::{
    backup, backup_path, merge, write, DependencyType, Error, Manifest, ResolvedDependency,
};
use modules_check_fs::{FileSystem, NativeFileSystem};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_left_pad_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("package.json");
    let original = r#"{"dependencies":{"left-pad":"^1.0.0"},"devDependencies":{}}"#;
    std::fs::write(&path, original).unwrap();

    let fs = Arc::new(NativeFileSystem::new(temp_dir.path()).unwrap());
    let manifest = Manifest::load(&fs, &path).await.unwrap();

    let left_pad = manifest.find_dependency("left-pad").unwrap();
    let resolved = vec![ResolvedDependency::new(left_pad, "^1.3.0")];

    backup(&fs, &path).await.unwrap();
    write(&fs, &path, &merge(&manifest, &resolved)).await.unwrap();

    let rewritten: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        rewritten,
        json!({"dependencies": {"left-pad": "^1.3.0"}, "devDependencies": {}})
    );
    assert_eq!(
        std::fs::read_to_string(backup_path(&path)).unwrap(),
        original
    );
}

#[tokio::test]
async fn test_rewrite_roundtrip_preserves_dependency_types() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("package.json");
    std::fs::write(
        &path,
        r#"{"name":"app","dependencies":{"react":"^17.0.0"},"devDependencies":{"jest":"^27.0.0"}}"#,
    )
    .unwrap();

    let fs = Arc::new(NativeFileSystem::new(temp_dir.path()).unwrap());
    let manifest = Manifest::load(&fs, &path).await.unwrap();
    let resolved: Vec<_> = manifest
        .all_dependencies()
        .map(|d| ResolvedDependency::new(d, format!("^{}.0.0", d.name.len())))
        .collect();

    write(&fs, &path, &merge(&manifest, &resolved)).await.unwrap();

    let reread = Manifest::load(&fs, &path).await.unwrap();
    let runtime = reread.dependencies_of_type(DependencyType::Runtime);
    let dev = reread.dependencies_of_type(DependencyType::Dev);
    assert_eq!(runtime.len(), 1);
    assert_eq!(runtime[0].version_req, "^5.0.0");
    assert_eq!(dev.len(), 1);
    assert_eq!(dev[0].version_req, "^4.0.0");
    assert_eq!(reread.document()["name"], "app");
}

/// Delegates to the native filesystem but fails every write.
struct ReadOnlyFs(NativeFileSystem);

#[async_trait::async_trait]
impl FileSystem for ReadOnlyFs {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        self.0.exists(path).await
    }
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.0.read_to_string(path).await
    }
    async fn write(&self, _path: &Path, _contents: &str) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
    async fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.0.copy(from, to).await
    }
    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.0.rename(from, to).await
    }
    async fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        self.0.remove_dir_all(path).await
    }
    fn project_root(&self) -> &Path {
        self.0.project_root()
    }
}

#[tokio::test]
async fn test_backup_survives_failed_write() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("package.json");
    let original = "{\n  \"dependencies\": {\"a\": \"^1.0.0\"}\n}\n";
    std::fs::write(&path, original).unwrap();

    let fs = Arc::new(ReadOnlyFs(NativeFileSystem::new(temp_dir.path()).unwrap()));
    let manifest = Manifest::load(&fs, &path).await.unwrap();

    backup(&fs, &path).await.unwrap();
    let err = write(&fs, &path, &merge(&manifest, &[])).await.unwrap_err();

    assert!(matches!(err, Error::Write { .. }));
    assert_eq!(std::fs::read_to_string(backup_path(&path)).unwrap(), original);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}

#[tokio::test]
async fn test_rewrite_keeps_float_digits() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("package.json");
    std::fs::write(
        &path,
        r#"{"x":123456789.12345679,"tiny":1.2345678901234567e-300,"dependencies":{}}"#,
    )
    .unwrap();

    let fs = Arc::new(NativeFileSystem::new(temp_dir.path()).unwrap());
    let manifest = Manifest::load(&fs, &path).await.unwrap();
    write(&fs, &path, &merge(&manifest, &[])).await.unwrap();

    let rewritten = std::fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("\"x\": 123456789.12345679"), "{rewritten}");
    assert!(rewritten.contains("\"tiny\": 1.2345678901234567e-300"), "{rewritten}");
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 _./-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn other_keys() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-zA-Z]{1,10}", json_value(), 0..6).prop_map(|m| {
        m.into_iter()
            .filter(|(k, _)| k != "dependencies" && k != "devDependencies")
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn rewrite_preserves_non_dependency_keys(
        others in other_keys(),
        deps in prop::collection::btree_map("[a-z][a-z-]{0,8}", "\\^[0-9]\\.[0-9]\\.[0-9]", 0..4),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        runtime.block_on(async {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("package.json");

            let mut document = others.clone();
            document.insert(
                "dependencies".to_string(),
                Value::Object(deps.iter().map(|(k, v)| (k.clone(), json!(v))).collect()),
            );
            std::fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

            let fs = Arc::new(NativeFileSystem::new(temp_dir.path()).unwrap());
            let manifest = Manifest::load(&fs, &path).await.unwrap();
            let resolved: Vec<_> = manifest
                .all_dependencies()
                .map(|d| ResolvedDependency::new(d, "^9.0.0"))
                .collect();

            write(&fs, &path, &merge(&manifest, &resolved)).await.unwrap();
            let reread = Manifest::load(&fs, &path).await.unwrap();

            for (key, value) in &others {
                prop_assert_eq!(reread.document().get(key), Some(value));
            }
            prop_assert_eq!(
                reread.dependencies_of_type(DependencyType::Runtime).len(),
                deps.len()
            );
            Ok(())
        })?;
    }
}
