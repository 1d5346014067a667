use anyhow::Result;
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::Instant;
use indicatif::{ProgressBar, ProgressStyle, MultiProgress};

use crate::app_config::Config;
use crate::analysis::{ProjectAnalyzer, ProjectContext};
use crate::conversion::StatementTranslator;
use crate::file_utils::{FileManager, FileType};
use crate::recognition::{recognize_or_empty, PatternRecognizer};
use crate::recognition::http::HttpRecognizer;
use crate::source_document::SourceDocument;

// @module: Application controller for source conversion

// @enum: Per-file conversion result
#[derive(Debug, PartialEq, Eq)]
enum ConvertStatus {
    Converted,
    Skipped,
}

/// Main application controller for test-suite conversion
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Optional pattern recognition backend
    recognizer: Option<Box<dyn PatternRecognizer>>,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let recognizer: Option<Box<dyn PatternRecognizer>> = if config.recognition.enabled {
            match HttpRecognizer::new(&config.recognition.endpoint, config.recognition.timeout_secs)
            {
                Ok(client) => Some(Box::new(client)),
                Err(e) => {
                    // The service is an optional collaborator, never fatal
                    warn!("Pattern recognition disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self { config, recognizer })
    }

    /// Create a controller with an explicit recognizer backend
    pub fn with_recognizer(config: Config, recognizer: Box<dyn PatternRecognizer>) -> Self {
        Self {
            config,
            recognizer: Some(recognizer),
        }
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_extensions.is_empty()
    }

    /// Convert a single source file into the output directory
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let start_time = Instant::now();

        // Check if the input file exists
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        // Ensure the output directory exists
        FileManager::ensure_dir(&output_dir)?;

        // Detect file type
        let file_type = FileManager::detect_file_type(&input_file)?;
        if file_type != FileType::JavaSource {
            return Err(anyhow::anyhow!(
                "Input file is not a recognized source file: {:?}",
                input_file
            ));
        }

        // Analysis pass runs even for one file so classification is available
        let project = ProjectAnalyzer::analyze_files(std::slice::from_ref(&input_file))?;

        let status = self
            .convert_file(&input_file, &output_dir, &project, force_overwrite)
            .await?;

        if status == ConvertStatus::Converted {
            info!(
                "Conversion completed in {}.",
                Self::format_duration(start_time.elapsed())
            );
        }

        Ok(())
    }

    /// Convert every recognized source file under a directory.
    ///
    /// Strict two-phase run: the analysis pass covers all files before any
    /// translation starts, because a file's translation may depend on
    /// classification results computed from a different file. A failure on
    /// one file is logged and the batch continues.
    pub async fn run_folder(
        &self,
        input_dir: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        // Start timing the process
        let start_time = Instant::now();

        // Check if the input directory exists
        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        // Find all source files in the directory (recursive)
        let source_files =
            FileManager::find_files(&input_dir, &self.config.source_extensions)?;

        // If no source files found, return error
        if source_files.is_empty() {
            return Err(anyhow::anyhow!(
                "No convertible source files found in directory: {:?}",
                input_dir
            ));
        }

        // Phase 1: full analysis pass over every file
        info!("Analyzing {} source file(s)", source_files.len());
        let project = ProjectAnalyzer::analyze_files(&source_files)?;
        debug!("Project context holds {} class record(s)", project.len());

        // Phase 2: per-file translation
        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(source_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Converting files");

        // Track success and failure counts
        let mut success_count = 0;
        let mut error_count = 0;
        let mut skip_count = 0;

        for input_file in &source_files {
            // Mirror the input tree below the output directory
            let mirrored_dir = input_file
                .strip_prefix(&input_dir)
                .ok()
                .and_then(Path::parent)
                .map_or_else(|| output_dir.clone(), |rel| output_dir.join(rel));

            match self
                .convert_file(input_file, &mirrored_dir, &project, force_overwrite)
                .await
            {
                Ok(ConvertStatus::Converted) => success_count += 1,
                Ok(ConvertStatus::Skipped) => skip_count += 1,
                Err(e) => {
                    error!("Failed to convert {:?}: {}", input_file, e);
                    error_count += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Finished: {} converted, {} skipped, {} failed in {}.",
            success_count,
            skip_count,
            error_count,
            Self::format_duration(start_time.elapsed())
        );

        // Batch record alongside the converted files
        let _ = FileManager::append_to_log_file(
            output_dir.join("conversion.log"),
            &format!(
                "{:?}: {} converted, {} skipped, {} failed",
                input_dir, success_count, skip_count, error_count
            ),
        );

        Ok(())
    }

    // @converts: One source file; write-out plus optional diagnostics
    async fn convert_file(
        &self,
        input_file: &Path,
        output_dir: &Path,
        project: &ProjectContext,
        force_overwrite: bool,
    ) -> Result<ConvertStatus> {
        let document = SourceDocument::load(input_file)?;

        let translator = StatementTranslator::new();
        let mut outcome = translator.translate(&document, Some(project));

        let role_suffix = if outcome.role_flags.is_page_object {
            "page"
        } else {
            "spec"
        };
        let output_path =
            FileManager::generate_output_path(input_file, output_dir, role_suffix, "ts");

        // Check if conversion already exists
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, conversion already exists (use -f to force overwrite)");
            return Ok(ConvertStatus::Skipped);
        }

        // Consult the opaque recognition service; emptiness and failure are fine
        if let Some(recognizer) = &self.recognizer {
            let patterns = recognize_or_empty(recognizer.as_ref(), &outcome.actions).await;
            if let Some(best) = patterns.first() {
                let mut comment =
                    format!("Pattern: {} (confidence {:.2})", best.name, best.confidence);
                if !best.description.is_empty() {
                    comment.push_str(": ");
                    comment.push_str(&best.description);
                }
                outcome.assembler.push_header_comment(&comment);
            }
        }

        let content = outcome.assembler.assemble();
        FileManager::write_to_file(&output_path, &content)?;
        debug!(
            "Converted {:?} ({} skipped line(s))",
            input_file,
            outcome.skipped.len()
        );

        // Diagnostic side files: numbered echo and the skipped-line log
        if self.config.emit_diagnostics {
            let echo_path = FileManager::generate_output_path(input_file, output_dir, "echo", "txt");
            FileManager::write_to_file(&echo_path, &document.numbered_echo())?;

            let skipped_path =
                FileManager::generate_output_path(input_file, output_dir, "skipped", "log");
            let entries: String = outcome
                .skipped
                .iter()
                .map(|entry| {
                    format!("line {}: {}: {}\n", entry.line_number, entry.reason, entry.text)
                })
                .collect();
            FileManager::write_to_file(&skipped_path, &entries)?;
        }

        Ok(ConvertStatus::Converted)
    }

    // @formats: Elapsed time for the summary line
    fn format_duration(duration: std::time::Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{}.{:03}s", total_secs, duration.subsec_millis())
        }
    }
}
