//! Common utilities

/// Check if a command is available in PATH
pub fn command_exists(cmd: &str) -> bool {
    std::process::Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// First non-empty line of a command's output, trimmed
pub fn first_line(output: &[u8]) -> Option<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(
            first_line(b"ripgrep 14.1.0\n\nfeatures:+pcre2\n"),
            Some("ripgrep 14.1.0".to_string())
        );
        assert_eq!(first_line(b"\n  error: bad  \n"), Some("error: bad".to_string()));
        assert_eq!(first_line(b""), None);
    }

    #[test]
    fn test_command_exists_missing() {
        assert!(!command_exists("vaultgrep-definitely-not-a-command"));
    }
}
