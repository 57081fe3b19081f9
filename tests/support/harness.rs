use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// TestHarness provides an isolated directory holding a schema and
/// configuration files, plus access to the apicheck binary.
pub struct TestHarness {
    pub dir: TempDir,
    pub schema_path: PathBuf,
    #[allow(dead_code)]
    pub binary: PathBuf,
}

impl TestHarness {
    /// Creates a harness with the bundled test-config schema.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let schema_path = dir.path().join("schema.json");
        fs::write(&schema_path, load_fixture("schema.json")).expect("Failed to write schema");

        TestHarness {
            dir,
            schema_path,
            binary: PathBuf::from(env!("CARGO_BIN_EXE_apicheck")),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a configuration file and returns its path.
    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Runs apicheck with the harness schema.
    #[allow(dead_code)]
    pub fn run(&self, config: &Path, extra: &[&str]) -> Output {
        Command::new(&self.binary)
            .arg(config)
            .arg(&self.schema_path)
            .args(extra)
            .output()
            .expect("Failed to run apicheck")
    }
}

pub fn load_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture '{}' from {:?}: {}", name, path, e))
}
