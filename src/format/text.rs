use crate::diff::{EditType, XmlDiffToken};

/// Format a token slice as plain text, one line per token, using `+`/`-`/`~`
/// markers for INSERT/DELETE/CHANGE (the same convention this codebase's
/// formatter has always used for its diff rows).
pub fn format_text(tokens: &[XmlDiffToken]) -> String {
    let mut lines = Vec::with_capacity(tokens.len());
    for token in tokens {
        let marker = match token.edit_type {
            EditType::Insert => '+',
            EditType::Delete => '-',
            EditType::Change => '~',
        };
        let mut line = format!("{marker} {}", token.xpath);
        if let (Some(old), Some(new)) = (&token.old_value, &token.new_value) {
            line.push_str(&format!(" {old:?} -> {new:?}"));
        } else if let Some(new) = &token.new_value {
            line.push_str(&format!(" {new:?}"));
        } else if let Some(old) = &token.old_value {
            line.push_str(&format!(" {old:?}"));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Format a one-line summary of token counts per edit type.
pub fn format_summary(tokens: &[XmlDiffToken]) -> String {
    let mut insert = 0;
    let mut delete = 0;
    let mut change = 0;
    for token in tokens {
        match token.edit_type {
            EditType::Insert => insert += 1,
            EditType::Delete => delete += 1,
            EditType::Change => change += 1,
        }
    }
    format!("insert={insert} delete={delete} change={change}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::XmlDiffToken;

    #[test]
    fn format_text_uses_edit_type_markers() {
        let tokens = vec![
            XmlDiffToken::element_insert("/a/b".to_string(), "b".to_string()),
            XmlDiffToken::element_delete("/a/c".to_string(), "c".to_string()),
            XmlDiffToken::content_change("/a/text()".to_string(), "x".to_string(), "y".to_string()),
        ];
        let text = format_text(&tokens);
        assert!(text.contains("+ /a/b"));
        assert!(text.contains("- /a/c"));
        assert!(text.contains("~ /a/text()"));
    }

    #[test]
    fn format_summary_counts_each_edit_type() {
        let tokens = vec![
            XmlDiffToken::element_insert("/a/b".to_string(), "b".to_string()),
            XmlDiffToken::element_insert("/a/c".to_string(), "c".to_string()),
            XmlDiffToken::element_delete("/a/d".to_string(), "d".to_string()),
        ];
        assert_eq!(format_summary(&tokens), "insert=2 delete=1 change=0");
    }
}
