use super::highlight_code;
use ratatui::text::Line;

#[test]
fn test_one_line_per_source_line() {
    let lines = highlight_code("fn main() {\n    let x = 1;\n}\n", Some("rs"), "base16-ocean.dark");

    assert_eq!(lines.len(), 3);
    let text: String = lines[1].spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(text, "    let x = 1;");
}

#[test]
fn test_unknown_theme_is_plain() {
    let lines = highlight_code("a\nb", None, "no-such-theme");

    assert_eq!(lines, vec![Line::raw("a"), Line::raw("b")]);
}
