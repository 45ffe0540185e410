//! Dotenv-style file parsing.
//!
//! Only parses; merging into a [`RawEnv`](crate::config::loader::RawEnv) and
//! precedence against the process environment live in the loader.

use std::path::Path;

/// Parse a `.env` file into key-value pairs, in file order.
pub fn parse_env_file(path: &Path) -> std::io::Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_env_str(&content))
}

/// Parse `.env` content.
///
/// Accepts `KEY=value` and `export KEY=value`, `#` comment lines, single or
/// double quoted values, and trailing `# comments` after unquoted values.
/// Lines without `=` are ignored.
pub fn parse_env_str(content: &str) -> Vec<(String, String)> {
    let mut vars = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            tracing::debug!(line = line_num + 1, "Skipping env file line without '='");
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            tracing::debug!(line = line_num + 1, "Skipping empty key in env file");
            continue;
        }

        vars.push((key.to_string(), unquote(value.trim())));
    }

    vars
}

fn unquote(value: &str) -> String {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));

    if quoted {
        value[1..value.len() - 1].to_string()
    } else {
        value.split(" #").next().unwrap_or("").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic() {
        let vars = parse_env_str("BACKEND_URL=https://x.test\nBACKEND_ANON_KEY=abc");
        assert_eq!(
            vars,
            vec![
                ("BACKEND_URL".to_string(), "https://x.test".to_string()),
                ("BACKEND_ANON_KEY".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_comments_and_blank_lines() {
        let vars = parse_env_str("# backend\n\nBACKEND_ANON_KEY=abc\n   # indented comment\n");
        assert_eq!(vars, vec![("BACKEND_ANON_KEY".to_string(), "abc".to_string())]);
    }

    #[test]
    fn test_parse_quoted_values_keep_hashes() {
        let vars = parse_env_str("A=\"hello # world\"\nB='single'");
        assert_eq!(vars[0].1, "hello # world");
        assert_eq!(vars[1].1, "single");
    }

    #[test]
    fn test_parse_inline_comment() {
        let vars = parse_env_str("EMAIL_API_KEY=re_123 # staging key");
        assert_eq!(vars[0].1, "re_123");
    }

    #[test]
    fn test_url_fragment_is_not_a_comment() {
        let vars = parse_env_str("APP_URL=https://x.test/#home");
        assert_eq!(vars[0].1, "https://x.test/#home");
    }

    #[test]
    fn test_parse_export_prefix_and_empty_value() {
        let vars = parse_env_str("export APP_URL=https://x.test\nEMAIL_API_KEY=\n=orphan\nnoequals");
        assert_eq!(
            vars,
            vec![
                ("APP_URL".to_string(), "https://x.test".to_string()),
                ("EMAIL_API_KEY".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(".env");
        fs::write(&path, "BACKEND_ANON_KEY=abc\n").unwrap();

        let vars = parse_env_file(&path).unwrap();
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_parse_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(parse_env_file(&tmp.path().join("missing.env")).is_err());
    }
}
