#![allow(dead_code)]
//! Test utilities for building a small source tree with built maps.
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SOURCE_ROOT: &str = "https://raw.githubusercontent.com/ampproject/amphtml/1234567890123/";

/// Helper struct for managing test resources
pub struct TestContext {
    /// Temporary directory acting as the working tree
    pub temp_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        TestContext {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// A tree whose classic and module maps both pass every check.
    pub fn valid_tree() -> Self {
        let ctx = Self::new();
        ctx.write_file(
            "src/polyfills/abort-controller.js",
            "class AbortController {\n  constructor() {\n    this.signal = null;\n  }\n}\n",
        );
        ctx.write_file("src/amp.js", "import './polyfills/abort-controller';\n");
        ctx.write_map("dist/v0.js.map", &classic_map());
        ctx.write_map("dist/v0.mjs.map", &module_map());
        ctx
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("Failed to create directories");
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn write_map(&self, relative: &str, map: &serde_json::Value) -> PathBuf {
        self.write_file(relative, &map.to_string())
    }
}

pub fn classic_map() -> serde_json::Value {
    serde_json::json!({
        "version": 3,
        "file": "v0.js",
        "sourceRoot": SOURCE_ROOT,
        "sources": [
            "src/polyfills/abort-controller.js",
            "src/amp.js",
            "[synthetic:runtime]"
        ],
        "names": ["AbortController"],
        "mappings": ";AAAAA,MAAM;ACAN,SAAS"
    })
}

pub fn module_map() -> serde_json::Value {
    serde_json::json!({
        "version": 3,
        "file": "v0.mjs",
        "sourceRoot": SOURCE_ROOT,
        "sources": ["src/polyfills/abort-controller.js", "src/amp.js"],
        "names": [],
        "mappings": ";;AAAA,MAAM,IACN"
    })
}
