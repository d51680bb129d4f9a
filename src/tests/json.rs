use super::JsonFormat;
use crate::error::Error;
use crate::formats::Format;
use crate::section::SectionKind;

const DOCKER: &str = r#"{
  "metadata": {
    "id": "docker",
    "title": "Docker",
    "description": "Containers in a nutshell",
    "language": "bash",
    "icon": "🐳",
    "lastUpdated": "2024-03-01"
  },
  "sections": [
    {
      "id": "images",
      "title": "Images",
      "type": "table",
      "table": {
        "title": "Image commands",
        "headers": ["Command", "Purpose"],
        "rows": [{"Command": "docker pull", "Purpose": "fetch an image"}]
      },
      "subsections": [
        {
          "id": "build",
          "title": "Build",
          "type": "code",
          "code": {"title": "Build", "code": "docker build -t app .", "language": "bash"}
        }
      ]
    }
  ]
}"#;

#[test]
fn test_single_object() {
    let docs = JsonFormat.parse("docker", DOCKER).unwrap();

    assert_eq!(docs.len(), 1);
    let doc = &docs[0];
    assert_eq!(doc.metadata.last_updated, "2024-03-01");
    assert_eq!(doc.metadata.icon.as_deref(), Some("🐳"));
    assert_eq!(doc.sections[0].kind, SectionKind::Table);
    let table = doc.sections[0].table.as_ref().unwrap();
    assert_eq!(table.rows[0]["Purpose"], "fetch an image");
    assert_eq!(doc.sections[0].children()[0].kind, SectionKind::Code);
    assert!(doc.find_section("build").is_some());
}

#[test]
fn test_array_and_lines() {
    let one = r#"{"metadata":{"id":"a","title":"A"},"sections":[]}"#;
    let two = r#"{"metadata":{"id":"b","title":"B"}}"#;

    let array = JsonFormat.parse("x", &format!("[{one},{two}]")).unwrap();
    let lines = JsonFormat.parse("x", &format!("{one}\n\n{two}\n")).unwrap();

    assert_eq!(array, lines);
    assert_eq!(array[1].metadata.id, "b");
    assert!(array[1].sections.is_empty());
}

#[test]
fn test_bad_line_reports_position() {
    let one = r#"{"metadata":{"id":"a","title":"A"}}"#;

    let err = JsonFormat
        .parse("broken", &format!("{one}\n{{oops\n"))
        .unwrap_err();

    match err {
        Error::Parse { message, .. } => assert!(message.starts_with("line 2"), "{message}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pretty_object_reports_its_own_error() {
    let source = "{\n  \"metadata\": {\n    \"id\": \"a\"\n  }\n}\n";

    let err = JsonFormat.parse("missing", source).unwrap_err();

    match err {
        Error::Parse { message, .. } => {
            assert!(message.contains("missing field `title`"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_serializes_camel_case() {
    let docs = JsonFormat.parse("docker", DOCKER).unwrap();

    let value = serde_json::to_value(&docs[0]).unwrap();

    assert_eq!(value["metadata"]["lastUpdated"], "2024-03-01");
    assert_eq!(value["sections"][0]["type"], "table");
    assert!(value["metadata"].get("version").is_none());
}
