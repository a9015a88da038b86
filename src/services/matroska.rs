//! Matroska support via mediainfo and mkvpropedit.

use super::process::ToolCommand;
use super::{Container, MetadataProbe, MetadataWriter, ToolOutput, WriteStatus};
use crate::models::config::AppConfig;
use std::path::Path;

/// mkvpropedit exit code for "done, with warnings".
const MKVPROPEDIT_WARNING: i32 = 1;

/// Matroska container backed by the mediainfo and mkvpropedit binaries.
#[derive(Debug, Clone)]
pub struct Matroska {
    mediainfo: String,
    mkvpropedit: String,
    extensions: Vec<String>,
}

impl Matroska {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            mediainfo: config.tools.mediainfo.clone(),
            mkvpropedit: config.tools.mkvpropedit.clone(),
            extensions: config
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Command reading the segment title.
    pub fn probe_command(&self, path: &Path) -> ToolCommand {
        ToolCommand::new(&self.mediainfo)
            .arg("--Inform=General;%Title%")
            .arg(path)
    }

    /// Command setting the segment title.
    pub fn write_command(&self, path: &Path, title: &str) -> ToolCommand {
        ToolCommand::new(&self.mkvpropedit)
            .arg(path)
            .args(["--edit", "info", "--set"])
            .arg(format!("title={}", title))
    }
}

impl Default for Matroska {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl MetadataProbe for Matroska {
    fn name(&self) -> &'static str {
        "mediainfo"
    }

    fn probe_title(&self, path: &Path) -> std::io::Result<ToolOutput> {
        self.probe_command(path).run()
    }
}

impl MetadataWriter for Matroska {
    fn write_title(&self, path: &Path, title: &str) -> WriteStatus {
        match self.write_command(path, title).run() {
            Ok(output) => classify_write(&output),
            Err(e) => WriteStatus::Failure(format!("could not run {}: {}", self.mkvpropedit, e)),
        }
    }
}

impl Container for Matroska {
    fn extensions(&self) -> Vec<String> {
        self.extensions.clone()
    }
}

/// Map an mkvpropedit exit status onto a write outcome.
fn classify_write(output: &ToolOutput) -> WriteStatus {
    match output.status {
        Some(0) => WriteStatus::Success,
        Some(MKVPROPEDIT_WARNING) => WriteStatus::Warning(output.message()),
        _ => WriteStatus::Failure(output.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_command_keeps_title_as_one_argument() {
        let mkv = Matroska::default();
        let cmd = mkv.write_command(Path::new("/v/a \"b\".mkv"), "It's \"quoted\"; rm -rf");

        assert_eq!(cmd.program().to_string_lossy(), "mkvpropedit");
        let args: Vec<_> = cmd.get_args().iter().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(
            args,
            vec![
                "/v/a \"b\".mkv",
                "--edit",
                "info",
                "--set",
                "title=It's \"quoted\"; rm -rf",
            ]
        );
    }

    #[test]
    fn test_probe_command() {
        let mkv = Matroska::default();
        let cmd = mkv.probe_command(Path::new("/v/a.mkv"));
        assert_eq!(cmd.program().to_string_lossy(), "mediainfo");
        assert_eq!(cmd.get_args().len(), 2);
        assert_eq!(cmd.get_args()[0].to_string_lossy(), "--Inform=General;%Title%");
    }

    #[test]
    fn test_classify_write() {
        let status = |code| ToolOutput {
            status: code,
            stdout: "msg".to_string(),
            stderr: String::new(),
        };
        assert_eq!(classify_write(&status(Some(0))), WriteStatus::Success);
        assert_eq!(
            classify_write(&status(Some(1))),
            WriteStatus::Warning("msg".to_string())
        );
        assert_eq!(
            classify_write(&status(Some(2))),
            WriteStatus::Failure("msg".to_string())
        );
        assert_eq!(
            classify_write(&status(None)),
            WriteStatus::Failure("msg".to_string())
        );
    }

    #[test]
    fn test_supports_extension() {
        let mkv = Matroska::default();
        assert!(mkv.supports(Path::new("/v/a.mkv")));
        assert!(mkv.supports(Path::new("/v/a.MKV")));
        assert!(!mkv.supports(Path::new("/v/a.mp4")));
        assert!(!mkv.supports(Path::new("/v/mkv")));
    }
}
