//! Shared testing utilities for podgen CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Path to the workspace directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `podgen` binary within the
    /// default workspace, with no API key in the environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("podgen").expect("Failed to locate podgen binary");
        cmd.current_dir(&self.work_dir).env_remove("PODGEN_API_KEY");
        cmd
    }

    /// Write a configuration file into the workspace and return its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("podgen.toml");
        fs::write(&path, content).expect("Failed to write test config");
        path
    }

    /// Write a well-formed prompt bundle file and return its path.
    pub fn write_prompt_bundle(&self) -> PathBuf {
        let path = self.work_dir.join("prompts.json");
        fs::write(&path, SAMPLE_BUNDLE).expect("Failed to write prompt bundle");
        path
    }

    /// Write an arbitrary prompts file and return its path.
    pub fn write_prompts_file(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("prompts.json");
        fs::write(&path, content).expect("Failed to write prompts file");
        path
    }
}

pub const SAMPLE_BUNDLE: &str = r#"{
  "researchPrompt": "Research the topic and gather the figures listeners will want to hear about it.",
  "structurePrompt": "Structure the episode as a guided conversation with a clear arc.",
  "introPrompt": "Open the episode warmly and frame why this topic matters right now.",
  "segmentPrompts": [
    "Explore how the topic emerged and the forces that shaped it.",
    "Discuss where things stand today, with concrete examples."
  ],
  "factCheckPrompt": "Verify every factual claim in the script against reliable sources.",
  "conclusionPrompt": "Summarize the main threads and leave listeners with one takeaway."
}"#;
