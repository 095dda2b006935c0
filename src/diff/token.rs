use serde::Serialize;

/// The kind of edit a token describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditType {
    #[serde(rename = "INSERT")]
    Insert,
    #[serde(rename = "DELETE")]
    Delete,
    #[serde(rename = "CHANGE")]
    Change,
}

/// What was edited: an element, an attribute, or an element's direct text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeType {
    #[serde(rename = "ELEMENT")]
    Element,
    #[serde(rename = "ATTRIBUTE")]
    Attribute,
    #[serde(rename = "CONTENT")]
    Content,
}

/// One elementary diff between two XML documents, addressed by XPath.
///
/// `name` is required for `ELEMENT` and `ATTRIBUTE` tokens, absent for
/// `CONTENT`. `oldValue` is present on `DELETE`/`CHANGE`; `newValue` is
/// present on `INSERT`/`CHANGE`. `ELEMENT` tokens never carry `CHANGE`;
/// element renames surface as a `DELETE` paired with an `INSERT`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XmlDiffToken {
    pub edit_type: EditType,
    pub node_type: NodeType,
    pub xpath: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
}

impl XmlDiffToken {
    pub fn element_insert(xpath: String, name: String) -> Self {
        Self {
            edit_type: EditType::Insert,
            node_type: NodeType::Element,
            xpath,
            name: Some(name),
            old_value: None,
            new_value: None,
        }
    }

    pub fn element_delete(xpath: String, name: String) -> Self {
        Self {
            edit_type: EditType::Delete,
            node_type: NodeType::Element,
            xpath,
            name: Some(name),
            old_value: None,
            new_value: None,
        }
    }

    pub fn attribute_insert(xpath: String, name: String, new_value: String) -> Self {
        Self {
            edit_type: EditType::Insert,
            node_type: NodeType::Attribute,
            xpath,
            name: Some(name),
            old_value: None,
            new_value: Some(new_value),
        }
    }

    pub fn attribute_delete(xpath: String, name: String, old_value: String) -> Self {
        Self {
            edit_type: EditType::Delete,
            node_type: NodeType::Attribute,
            xpath,
            name: Some(name),
            old_value: Some(old_value),
            new_value: None,
        }
    }

    pub fn attribute_change(
        xpath: String,
        name: String,
        old_value: String,
        new_value: String,
    ) -> Self {
        Self {
            edit_type: EditType::Change,
            node_type: NodeType::Attribute,
            xpath,
            name: Some(name),
            old_value: Some(old_value),
            new_value: Some(new_value),
        }
    }

    pub fn content_insert(xpath: String, new_value: String) -> Self {
        Self {
            edit_type: EditType::Insert,
            node_type: NodeType::Content,
            xpath,
            name: None,
            old_value: None,
            new_value: Some(new_value),
        }
    }

    pub fn content_delete(xpath: String, old_value: String) -> Self {
        Self {
            edit_type: EditType::Delete,
            node_type: NodeType::Content,
            xpath,
            name: None,
            old_value: Some(old_value),
            new_value: None,
        }
    }

    pub fn content_change(xpath: String, old_value: String, new_value: String) -> Self {
        Self {
            edit_type: EditType::Change,
            node_type: NodeType::Content,
            xpath,
            name: None,
            old_value: Some(old_value),
            new_value: Some(new_value),
        }
    }
}
