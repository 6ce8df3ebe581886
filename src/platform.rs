//! Platform-specific configuration

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms (Enter on the submit button also works)
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Quit hint shown at the right of the status bar
/// - macOS: "^C" (Terminal.app convention)
/// - Linux/Windows: "Ctrl+C"
#[cfg(target_os = "macos")]
pub const QUIT_HINT: &str = " ^C:quit ";

#[cfg(not(target_os = "macos"))]
pub const QUIT_HINT: &str = " Ctrl+C:quit ";
