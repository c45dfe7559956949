//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;

use whisper_gateway::application::ports::{ProcessError, ProcessOutput, ProcessRunner};
use whisper_gateway::application::TranscriptionPipeline;
use whisper_gateway::infrastructure::{FfmpegNormalizer, FsCacheStore, WhisperCliEngine};

/// Plays FFmpeg (writes its last argument) and whisper-cli (writes `<-f arg>.txt`)
pub struct ScriptedTools {
    pub ffmpeg_calls: AtomicUsize,
    pub whisper_calls: AtomicUsize,
    pub caption: String,
    pub ffmpeg_fails: bool,
    /// Leaves a partial `.txt` behind and exits non-zero while set
    pub whisper_fails: AtomicBool,
}

impl ScriptedTools {
    pub fn saying(caption: &str) -> Self {
        Self {
            ffmpeg_calls: AtomicUsize::new(0),
            whisper_calls: AtomicUsize::new(0),
            caption: caption.to_string(),
            ffmpeg_fails: false,
            whisper_fails: AtomicBool::new(false),
        }
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.ffmpeg_calls.load(Ordering::SeqCst),
            self.whisper_calls.load(Ordering::SeqCst),
        )
    }
}

fn ok() -> ProcessOutput {
    ProcessOutput {
        exit_code: Some(0),
        stdout: String::new(),
        stderr: String::new(),
    }
}

#[async_trait]
impl ProcessRunner for ScriptedTools {
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        _cwd: Option<&Path>,
    ) -> Result<ProcessOutput, ProcessError> {
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if name == "ffmpeg" {
            self.ffmpeg_calls.fetch_add(1, Ordering::SeqCst);
            if self.ffmpeg_fails {
                // Leave a truncated file behind, like an interrupted encode
                std::fs::write(args.last().unwrap(), b"RI").unwrap();
                return Ok(ProcessOutput {
                    exit_code: Some(1),
                    stdout: String::new(),
                    stderr: "Invalid data found when processing input".to_string(),
                });
            }
            std::fs::write(args.last().unwrap(), b"RIFF\0\0\0\0WAVE").unwrap();
            return Ok(ok());
        }

        self.whisper_calls.fetch_add(1, Ordering::SeqCst);
        let audio = args
            .iter()
            .position(|a| a == "-f")
            .map(|i| args[i + 1].clone())
            .unwrap();
        if self.whisper_fails.load(Ordering::SeqCst) {
            std::fs::write(format!("{}.txt", audio), b"[00:00.000 --> ").unwrap();
            return Ok(ProcessOutput {
                exit_code: Some(1),
                stdout: String::new(),
                stderr: "whisper_full_with_state: failed to decode audio".to_string(),
            });
        }
        std::fs::write(format!("{}.txt", audio), &self.caption).unwrap();
        Ok(ok())
    }
}

pub type TestPipeline = TranscriptionPipeline<
    FsCacheStore,
    FfmpegNormalizer<ScriptedTools>,
    WhisperCliEngine<ScriptedTools>,
>;

pub struct Fixture {
    pub root: TempDir,
    pub cache_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub bin_dir: PathBuf,
    pub tools: Arc<ScriptedTools>,
    pub pipeline: TestPipeline,
}

pub fn fixture(tools: ScriptedTools) -> Fixture {
    let root = tempfile::tempdir().unwrap();
    let cache_dir = root.path().join("cache");
    let temp_dir = root.path().join("temp");
    let bin_dir = root.path().join("bin");
    std::fs::create_dir_all(&cache_dir).unwrap();
    std::fs::create_dir_all(&temp_dir).unwrap();
    std::fs::create_dir_all(&bin_dir).unwrap();
    std::fs::write(bin_dir.join("whisper-cli"), b"").unwrap();
    std::fs::write(bin_dir.join("ggml-base.en.bin"), b"").unwrap();

    let tools = Arc::new(tools);
    let pipeline = build_pipeline(&cache_dir, &temp_dir, &bin_dir, &tools);

    Fixture {
        root,
        cache_dir,
        temp_dir,
        bin_dir,
        tools,
        pipeline,
    }
}

fn build_pipeline(
    cache_dir: &Path,
    temp_dir: &Path,
    bin_dir: &Path,
    tools: &Arc<ScriptedTools>,
) -> TestPipeline {
    TranscriptionPipeline::new(
        FsCacheStore::new(cache_dir),
        FfmpegNormalizer::new(Arc::clone(tools), "ffmpeg"),
        WhisperCliEngine::new(
            Arc::clone(tools),
            bin_dir.join("whisper-cli"),
            bin_dir.join("ggml-base.en.bin"),
            temp_dir,
        ),
        temp_dir,
    )
}

/// A second pipeline over the same directories and tools
pub fn fixture_pipeline(fx: &Fixture) -> TestPipeline {
    build_pipeline(&fx.cache_dir, &fx.temp_dir, &fx.bin_dir, &fx.tools)
}

pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

pub const VIDEO: &[u8] = b"\x00\x00\x00\x18ftypmp42 fake video payload";
