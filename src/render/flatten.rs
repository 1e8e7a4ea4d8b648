//! Line layout for character displays.
//!
//! Badges start a new line, columns shift their children right, and rows put
//! their label in front of their first child.

use super::element::{Layout, VisualElement};
use super::style::Rgb;

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
}

impl Segment {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            foreground: None,
            background: None,
        }
    }

    fn styled(element: &VisualElement) -> Self {
        Self {
            text: element.label.clone(),
            foreground: element.foreground,
            background: element.background,
        }
    }
}

/// One display line: leading indent plus styled segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub indent: usize,
    pub segments: Vec<Segment>,
}

impl OutputLine {
    /// Text of the line without styling, indent included.
    pub fn plain_text(&self) -> String {
        let mut text = " ".repeat(self.indent);
        for segment in &self.segments {
            text.push_str(&segment.text);
        }
        text
    }
}

/// Lay out `roots` as display lines, in order.
pub fn flatten<'a>(roots: impl IntoIterator<Item = &'a VisualElement>) -> Vec<OutputLine> {
    let roots: Vec<_> = roots.into_iter().collect();
    let mut lines = Vec::new();
    // (element, indent, segments waiting to prefix the element's first line)
    let mut pending: Vec<(&VisualElement, usize, Vec<Segment>)> = roots
        .into_iter()
        .rev()
        .map(|root| (root, 0, Vec::new()))
        .collect();

    while let Some((element, indent, mut prefix)) = pending.pop() {
        match element.layout {
            Layout::InlineBlock => {
                prefix.push(Segment::styled(element));
                lines.push(OutputLine {
                    indent,
                    segments: prefix,
                });
                for child in element.children.iter().rev() {
                    pending.push((child, indent, Vec::new()));
                }
            }
            Layout::Column => {
                if !prefix.is_empty() {
                    lines.push(OutputLine {
                        indent,
                        segments: prefix,
                    });
                }
                let inner = indent + usize::from(element.indent);
                for child in element.children.iter().rev() {
                    pending.push((child, inner, Vec::new()));
                }
            }
            Layout::Row => {
                prefix.push(Segment::styled(element));
                prefix.push(Segment::plain(" "));
                let Some((first, rest)) = element.children.split_first() else {
                    lines.push(OutputLine {
                        indent,
                        segments: prefix,
                    });
                    continue;
                };
                for child in rest.iter().rev() {
                    pending.push((child, indent, Vec::new()));
                }
                pending.push((first, indent, prefix));
            }
        }
    }

    lines
}

/// Lay out `roots` as plain text, one line per display line.
pub fn to_plain_text<'a>(roots: impl IntoIterator<Item = &'a VisualElement>) -> String {
    let mut out = String::new();
    for line in flatten(roots) {
        out.push_str(line.plain_text().trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ParseOptions, parse};
    use crate::render::render;

    fn text_of(source: &str) -> String {
        let node = parse(source, &ParseOptions::default()).unwrap();
        to_plain_text([&render(&node)])
    }

    #[test]
    fn test_scalar_is_one_line() {
        assert_eq!(text_of("42"), "[Number] 42\n");
    }

    #[test]
    fn test_array_children_are_indented() {
        assert_eq!(
            text_of(r#"[true, null, "a"]"#),
            "[Array]\n  [Bool] true\n  [Null]\n  [String] \"a\"\n"
        );
    }

    #[test]
    fn test_object_keys_prefix_values() {
        let expected = "\
[Object]
  \"name\" [String] \"Bob\"
  \"tags\" [Array]
    [Number] 1
";
        assert_eq!(text_of(r#"{"name": "Bob", "tags": [1]}"#), expected);
    }

    #[test]
    fn test_key_keeps_its_own_style() {
        let node = parse(r#"{"k": false}"#, &ParseOptions::default()).unwrap();
        let element = render(&node);
        let lines = flatten([&element]);
        let row = &lines[1];
        assert_eq!(row.segments.len(), 3);
        assert_eq!(row.segments[0].text, "\"k\"");
        assert_eq!(row.segments[0].background, None);
        assert_eq!(row.segments[2].text, "[Bool] false");
        assert!(row.segments[2].background.is_some());
    }

    #[test]
    fn test_multiple_roots_in_order() {
        let a = render(&parse("1", &ParseOptions::default()).unwrap());
        let b = render(&parse("2", &ParseOptions::default()).unwrap());
        assert_eq!(to_plain_text([&a, &b]), "[Number] 1\n[Number] 2\n");
    }

    #[test]
    fn test_empty_row_still_shows_key() {
        let row = VisualElement::new("\"k\"", Layout::Row);
        assert_eq!(to_plain_text([&row]), "\"k\"\n");
    }
}
