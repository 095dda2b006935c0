use musicxml_diff_overlay::parse;

#[test]
fn parses_attributes_children_and_text() {
    let tree = parse(br#"<note dynamics="80"><pitch>C4</pitch></note>"#).unwrap();
    assert_eq!(tree.tag, "note");
    assert_eq!(tree.attributes.get("dynamics").map(String::as_str), Some("80"));
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].tag, "pitch");
    assert_eq!(tree.children[0].text, "C4");
}

#[test]
fn rejects_structurally_invalid_documents() {
    assert!(parse(b"<a><b></a>").is_err());
    assert!(parse(b"<a/><b/>").is_err());
    assert!(parse(b"").is_err());
}

#[test]
fn whitespace_only_indentation_between_siblings_is_dropped() {
    let tree = parse(b"<root>\n  <a/>\n  <b/>\n</root>").unwrap();
    assert_eq!(tree.text, "");
    assert_eq!(tree.children.len(), 2);
}
