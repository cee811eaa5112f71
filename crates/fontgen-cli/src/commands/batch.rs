//! Batch command implementation
//!
//! Generates one header per font listed in a JSON job file. Stops at the
//! first font that fails or whose header would replace one written earlier
//! in the same run.

use anyhow::{Context, Result};
use colored::Colorize;
use fontgen_core::{FontError, FontJob, GeneratorInfo};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use super::generate::{export_font, open_font, print_header};
use super::json_output::{GenerateOutput, GeneratedHeader, JsonError};

/// Run the batch command
///
/// # Arguments
/// * `job_path` - Path to the job file
/// * `out_dir` - Output directory, overriding the job file's `output_dir`
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(job_path: &str, out_dir: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let info = GeneratorInfo::default();

    if json_output {
        let mut headers = Vec::new();
        let result = run_job(job_path, out_dir, &info, |header| headers.push(header));
        let output = match result {
            Ok(()) => GenerateOutput::success(headers),
            Err(failure) => GenerateOutput::failure(vec![failure.into_json()], headers),
        };
        println!("{}", output.to_json());
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    println!("{} {}", "Batch:".cyan().bold(), job_path);
    let mut written = 0usize;
    run_job(job_path, out_dir, &info, |header| {
        print_header(&header);
        written += 1;
    })
    .map_err(|failure| failure.error)?;

    println!(
        "{} {} header(s) written",
        "SUCCESS".green().bold(),
        written
    );
    Ok(ExitCode::SUCCESS)
}

/// An error, and the font it happened on if it was past job loading.
struct BatchFailure {
    font: Option<PathBuf>,
    error: anyhow::Error,
}

impl BatchFailure {
    fn into_json(self) -> JsonError {
        let json = JsonError::from_anyhow(&self.error);
        match self.font {
            Some(font) => json.with_file(font.display().to_string()),
            None => json,
        }
    }
}

fn run_job(
    job_path: &str,
    out_dir: Option<&str>,
    info: &GeneratorInfo,
    mut on_header: impl FnMut(GeneratedHeader),
) -> std::result::Result<(), BatchFailure> {
    let job = FontJob::load(job_path)
        .with_context(|| format!("Failed to load job file: {}", job_path))
        .map_err(|error| BatchFailure { font: None, error })?;

    let out_dir = output_dir(&job, out_dir);

    // Header file name -> font that produced it
    let mut written: HashMap<String, PathBuf> = HashMap::new();

    for entry in &job.fonts {
        let fail = |error: anyhow::Error| BatchFailure {
            font: Some(entry.path.clone()),
            error,
        };

        let set = open_font(&entry.path, &entry.sizes, entry.name.as_deref()).map_err(fail)?;

        let file_name = set.header_file_name();
        if let Some(earlier) = written.get(&file_name) {
            return Err(fail(anyhow::Error::new(FontError::Configuration(format!(
                "{} would overwrite the header generated from {}",
                file_name,
                earlier.display()
            )))));
        }

        let header = export_font(&set, &entry.path, &out_dir, info).map_err(fail)?;
        written.insert(file_name, entry.path.clone());
        on_header(header);
    }
    Ok(())
}

/// The `--out-dir` flag wins over the job file's `output_dir`.
fn output_dir(job: &FontJob, flag: Option<&str>) -> PathBuf {
    match (flag, &job.output_dir) {
        (Some(flag), _) => PathBuf::from(flag),
        (None, Some(dir)) => dir.clone(),
        (None, None) => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontgen_core::FontJobEntry;
    use pretty_assertions::assert_eq;

    fn job(output_dir: Option<&str>) -> FontJob {
        FontJob {
            output_dir: output_dir.map(PathBuf::from),
            fonts: vec![FontJobEntry {
                path: PathBuf::from("a.ttf"),
                sizes: vec![8],
                name: None,
            }],
        }
    }

    #[test]
    fn test_flag_overrides_job_output_dir() {
        assert_eq!(output_dir(&job(Some("from_job")), Some("flag")), PathBuf::from("flag"));
        assert_eq!(output_dir(&job(Some("from_job")), None), PathBuf::from("from_job"));
        assert_eq!(output_dir(&job(None), None), PathBuf::from("."));
    }

    #[test]
    fn test_missing_job_file_is_an_error() {
        let err = run("/nonexistent/job.json", None, false).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load job file"));
    }

    #[test]
    fn test_invalid_job_file_json_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let job_path = tmp.path().join("job.json");
        std::fs::write(&job_path, r#"{ "fonts": [] }"#).unwrap();

        let code = run(job_path.to_str().unwrap(), None, true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    const FONT_PATH: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../fontgen-core/tests/fixtures/DejaVuSansMono.ttf"
    );

    fn write_job(dir: &std::path::Path, fonts: &str) -> PathBuf {
        let job_path = dir.join("job.json");
        std::fs::write(&job_path, format!(r#"{{ "fonts": {} }}"#, fonts)).unwrap();
        job_path
    }

    #[test]
    fn test_same_header_twice_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let job_path = write_job(
            tmp.path(),
            &format!(
                r#"[ {{ "path": "{0}", "sizes": [8] }}, {{ "path": "{0}", "sizes": [12] }} ]"#,
                FONT_PATH
            ),
        );

        let mut headers = Vec::new();
        let failure = run_job(
            job_path.to_str().unwrap(),
            None,
            &GeneratorInfo::default(),
            |header| headers.push(header),
        )
        .err()
        .unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].tables.len(), 1);
        assert_eq!(headers[0].tables[0].height, 8);
        let json = failure.into_json();
        assert_eq!(json.code, "FONT_003");
        assert!(json.message.contains("would overwrite"));

        // The first header is left untouched.
        let header = std::fs::read_to_string(&headers[0].path).unwrap();
        assert!(header.contains("Data_8px"));
        assert!(!header.contains("Data_12px"));
    }

    #[test]
    fn test_renamed_entries_get_their_own_headers() {
        let tmp = tempfile::tempdir().unwrap();
        let job_path = write_job(
            tmp.path(),
            &format!(
                r#"[ {{ "path": "{0}", "sizes": [8], "name": "Small" }},
                    {{ "path": "{0}", "sizes": [16], "name": "Large" }} ]"#,
                FONT_PATH
            ),
        );

        let code = run(job_path.to_str().unwrap(), None, true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(tmp.path().join("Small.h").is_file());
        assert!(tmp.path().join("Large.h").is_file());
    }

    #[test]
    fn test_stops_at_first_failing_font() {
        let tmp = tempfile::tempdir().unwrap();
        let job_path = write_job(
            tmp.path(),
            r#"[
                { "path": "missing.ttf", "sizes": [8] },
                { "path": "also_missing.ttf", "sizes": [8] }
            ]"#,
        );

        let mut seen = 0;
        let failure = run_job(
            job_path.to_str().unwrap(),
            None,
            &GeneratorInfo::default(),
            |_| seen += 1,
        )
        .err()
        .unwrap();

        assert_eq!(seen, 0);
        assert_eq!(failure.font, Some(tmp.path().join("missing.ttf")));
        let json = failure.into_json();
        assert_eq!(json.code, "FONT_001");
        assert_eq!(
            json.file,
            Some(tmp.path().join("missing.ttf").display().to_string())
        );
    }
}
