use crate::diff::XmlDiffToken;

/// Format a token slice as pretty-printed JSON.
pub fn format_json(tokens: &[XmlDiffToken]) -> String {
    serde_json::to_string_pretty(tokens).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_json_emits_camel_case_schema_fields() {
        let tokens = vec![XmlDiffToken::element_insert(
            "/a/b".to_string(),
            "b".to_string(),
        )];
        let json = format_json(&tokens);
        assert!(json.contains("\"editType\""));
        assert!(json.contains("\"nodeType\""));
        assert!(json.contains("\"xpath\""));
        assert!(!json.contains("oldValue"));
    }

    #[test]
    fn format_json_on_empty_slice_is_empty_array() {
        assert_eq!(format_json(&[]), "[]");
    }
}
