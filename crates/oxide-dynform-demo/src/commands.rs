//! Line commands read from stdin.

use oxide_dynform::driver::FormCommand;
use serde_json::Value;

/// One parsed input line.
#[derive(Debug, PartialEq)]
pub enum Line {
    /// Forward to the form.
    Command(FormCommand),
    /// Stop reading input.
    Quit,
    /// Blank line or comment.
    Skip,
}

/// Parses `name=value`, `:submit`, `:render` or `:quit`.
///
/// Values that parse as JSON (numbers, booleans, quoted strings) keep their
/// type; anything else is taken as a plain string.
pub fn parse_line(line: &str) -> Result<Line, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Skip);
    }

    match line {
        ":submit" => return Ok(Line::Command(FormCommand::Submit)),
        ":render" => return Ok(Line::Command(FormCommand::Render)),
        ":quit" | ":q" => return Ok(Line::Quit),
        _ => {}
    }

    if let Some(other) = line.strip_prefix(':') {
        return Err(format!("unknown command :{other}"));
    }

    let (field, raw) = line
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {line:?}"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err("missing field name".to_string());
    }

    let raw = raw.trim();
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok(Line::Command(FormCommand::Edit {
        field: field.to_string(),
        value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn edit(field: &str, value: Value) -> Line {
        Line::Command(FormCommand::Edit {
            field: field.to_string(),
            value,
        })
    }

    #[test]
    fn test_parse_edits() {
        assert_eq!(parse_line("pricingModel=bid"), Ok(edit("pricingModel", json!("bid"))));
        assert_eq!(parse_line(" clicksPerDay = 200 "), Ok(edit("clicksPerDay", json!(200))));
        assert_eq!(parse_line(r#"name="42""#), Ok(edit("name", json!("42"))));
        assert_eq!(parse_line("note=a=b"), Ok(edit("note", json!("a=b"))));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line(":submit"), Ok(Line::Command(FormCommand::Submit)));
        assert_eq!(parse_line(":render"), Ok(Line::Command(FormCommand::Render)));
        assert_eq!(parse_line(":q"), Ok(Line::Quit));
        assert_eq!(parse_line("   "), Ok(Line::Skip));
        assert_eq!(parse_line("# comment"), Ok(Line::Skip));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line(":frobnicate").is_err());
        assert!(parse_line("no equals sign").is_err());
        assert!(parse_line("=value").is_err());
    }
}
