//! Processing report written by the Blender script.
//!
//! The JSON layout is shared with the generated script (see
//! [`crate::script`]); field names here must stay in step with it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, Result};
use crate::naming;

/// File name of the report inside the output directory.
pub const REPORT_FILE_NAME: &str = "processing_report.json";

/// One exported clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Blender object the action is attached to.
    pub object: String,
    /// Original action name.
    pub action: String,
    pub frame_start: i64,
    pub frame_end: i64,
    /// Length in frames, as Blender reports it (may be fractional).
    pub duration: f64,
    pub converted_name: String,
    pub exported_file: PathBuf,
}

/// Outcome of processing a single scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    pub file: PathBuf,
    #[serde(default)]
    pub animations: Vec<ConversionResult>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Aggregate report for one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingReport {
    pub processed_files: Vec<FileResult>,
    pub total_animations: u64,
    pub total_files: u64,
    /// Kept as a string: the script echoes back whatever it was given.
    pub naming_scheme: String,
}

/// A report entry whose name disagrees with [`naming::convert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMismatch {
    pub action: String,
    pub reported: String,
    pub expected: String,
}

impl ProcessingReport {
    /// Path of the report inside `output_dir`.
    pub fn path_in(output_dir: &Path) -> PathBuf {
        output_dir.join(REPORT_FILE_NAME)
    }

    /// Read a report from disk.
    ///
    /// Returns `Ok(None)` when the file does not exist; Blender does not
    /// always get far enough to write one.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| BatchError::Report {
                path: path.to_path_buf(),
                source,
            })
    }

    /// All per-file errors, paired with the file they came from.
    pub fn errors(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.processed_files.iter().flat_map(|result| {
            result
                .errors
                .iter()
                .map(move |error| (result.file.as_path(), error.as_str()))
        })
    }

    /// Conversions whose name differs from what this crate would produce.
    ///
    /// A non-empty result means the embedded script and [`naming`] disagree.
    pub fn mismatched_names(&self) -> Vec<NameMismatch> {
        self.processed_files
            .iter()
            .flat_map(|result| &result.animations)
            .filter_map(|anim| {
                let expected = naming::convert(&anim.action, &self.naming_scheme);
                (expected != anim.converted_name).then(|| NameMismatch {
                    action: anim.action.clone(),
                    reported: anim.converted_name.clone(),
                    expected,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
  "processed_files": [
    {
      "file": "/scenes/owen_walk.blend",
      "animations": [
        {
          "object": "Armature",
          "action": "Walk_Action.001",
          "frame_start": 1,
          "frame_end": 48,
          "duration": 47.0,
          "converted_name": "Owen_Walk",
          "exported_file": "/out/Owen_Walk.gltf"
        }
      ],
      "errors": []
    },
    {
      "file": "/scenes/props.blend",
      "animations": [],
      "errors": ["No animated objects found"]
    }
  ],
  "total_animations": 1,
  "total_files": 2,
  "naming_scheme": "artist"
}"#;

    fn sample() -> ProcessingReport {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn parses_script_output() {
        let report = sample();
        assert_eq!(report.total_files, 2);
        assert_eq!(report.total_animations, 1);
        assert_eq!(report.naming_scheme, "artist");

        let anim = &report.processed_files[0].animations[0];
        assert_eq!(anim.object, "Armature");
        assert_eq!(anim.frame_end, 48);
        assert!((anim.duration - 47.0).abs() < f64::EPSILON);
        assert_eq!(anim.exported_file, PathBuf::from("/out/Owen_Walk.gltf"));
    }

    #[test]
    fn missing_errors_field_defaults_to_empty() {
        let json = r#"{"file": "a.blend", "animations": []}"#;
        let result: FileResult = serde_json::from_str(json).unwrap();
        assert!(result.errors.is_empty());
    }

    #[test]
    fn errors_are_flattened_with_their_file() {
        let report = sample();
        let errors: Vec<_> = report.errors().collect();
        assert_eq!(
            errors,
            vec![(Path::new("/scenes/props.blend"), "No animated objects found")]
        );
    }

    #[test]
    fn matching_names_report_no_drift() {
        assert!(sample().mismatched_names().is_empty());
    }

    #[test]
    fn drifted_name_is_reported() {
        let mut report = sample();
        report.processed_files[0].animations[0].converted_name = "Owen_Walk_".into();

        let mismatches = report.mismatched_names();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].expected, "Owen_Walk");
        assert_eq!(mismatches[0].reported, "Owen_Walk_");
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ProcessingReport::load(&ProcessingReport::path_in(dir.path())).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_reads_report_from_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(REPORT_FILE_NAME), SAMPLE).unwrap();

        let loaded = ProcessingReport::load(&ProcessingReport::path_in(dir.path()))
            .unwrap()
            .unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(REPORT_FILE_NAME);
        std::fs::write(&path, "{\"processed_files\": ").unwrap();

        let err = ProcessingReport::load(&path).unwrap_err();
        assert!(matches!(err, BatchError::Report { .. }));
    }
}
