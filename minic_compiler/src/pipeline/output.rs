//! Output artifacts of a file compilation: generated code and trace log

use super::error::PipelineError;
use crate::logging::codes;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

pub const PYTHON_EXTENSION: &str = "py";
pub const TRACE_EXTENSION: &str = "log";

/// Input path with its extension replaced by `.py`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(PYTHON_EXTENSION)
}

/// Input path with its extension replaced by `.log`
pub fn default_trace_path(input: &Path) -> PathBuf {
    input.with_extension(TRACE_EXTENSION)
}

/// Trace text preceded by a header naming the input and the time of the run
pub fn render_trace(input: &Path, trace: &str, timestamp: DateTime<Utc>) -> String {
    format!(
        "# minic trace for {}\n# generated {}\n\n{}",
        input.display(),
        timestamp.to_rfc3339(),
        trace
    )
}

pub fn write_artifact(path: &Path, contents: &str) -> Result<(), PipelineError> {
    fs::write(path, contents).map_err(|e| {
        crate::log_error!(codes::driver::OUTPUT_WRITE_FAILURE, "Failed to write output",
            "path" => path.display(),
            "io_error" => &e);
        PipelineError::output_write(path, e)
    })?;

    crate::log_success!(
        codes::success::OUTPUT_WRITTEN,
        "Output written",
        "path" => path.display(),
        "bytes" => contents.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    #[test]
    fn test_default_paths() {
        let input = Path::new("src/prog.c");
        assert_eq!(default_output_path(input), PathBuf::from("src/prog.py"));
        assert_eq!(default_trace_path(input), PathBuf::from("src/prog.log"));
        assert_eq!(
            default_output_path(Path::new("noext")),
            PathBuf::from("noext.py")
        );
    }

    #[test]
    fn test_render_trace_header() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let text = render_trace(Path::new("a.c"), "peek: None\n", timestamp);
        assert_eq!(
            text,
            "# minic trace for a.c\n# generated 2024-05-01T12:00:00+00:00\n\npeek: None\n"
        );
    }

    #[test]
    fn test_write_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.py");
        write_artifact(&path, "print(1)\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "print(1)\n");

        let bad = dir.path().join("missing").join("out.py");
        assert_matches!(
            write_artifact(&bad, "x"),
            Err(PipelineError::OutputWrite { .. })
        );
    }
}
