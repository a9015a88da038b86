//! External tool preflight checks.

use super::CheckResult;
use crate::services::process;

/// Check if mediainfo is installed.
pub fn check_mediainfo(program: &str) -> CheckResult {
    check(
        "mediainfo",
        program,
        "--Version",
        "Install MediaInfo: sudo apt install mediainfo",
    )
}

/// Check if mkvpropedit is installed.
pub fn check_mkvpropedit(program: &str) -> CheckResult {
    check(
        "mkvpropedit",
        program,
        "--version",
        "Install MKVToolNix: sudo apt install mkvtoolnix",
    )
}

fn check(name: &str, program: &str, version_flag: &str, hint: &str) -> CheckResult {
    if process::is_installed(program, version_flag) {
        match process::get_version(program, version_flag) {
            Ok(version) => CheckResult::ok(name, &format!("installed ({})", version)),
            Err(_) => CheckResult::ok(name, "installed"),
        }
    } else {
        CheckResult::fail(name, &format!("{} not found", program), hint)
    }
}
