use lazyview::document::{
    DocumentParser, InputFormat, LazyJsonParser, ParseError, ParseOptions, emit_json,
};
use lazyview::editor::InputBuffer;
use lazyview::render::{VisualElement, to_plain_text};
use lazyview::session::{EditSession, OutputSurface, RenderOutcome};

const FIXTURE: &str = include_str!("fixtures/service.ljson");

/// Records every call the session makes.
#[derive(Default)]
struct RecordingSurface {
    mounted: Vec<VisualElement>,
    calls: Vec<&'static str>,
    errors: Vec<ParseError>,
}

impl OutputSurface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push("clear");
        self.mounted.clear();
    }

    fn append(&mut self, element: VisualElement) {
        self.calls.push("append");
        self.mounted.push(element);
    }

    fn report_error(&mut self, error: &ParseError) {
        self.calls.push("report_error");
        self.errors.push(error.clone());
    }
}

fn lenient() -> LazyJsonParser {
    LazyJsonParser::new(ParseOptions {
        allow_trailing_commas: true,
        ..ParseOptions::default()
    })
}

#[test]
fn test_fixture_renders_to_expected_outline() {
    let mut session = EditSession::new(lenient(), InputBuffer::from_text(FIXTURE), 200);
    let mut surface = RecordingSurface::default();

    let outcome = session.render_now(&mut surface);
    assert!(matches!(outcome, RenderOutcome::Rendered { .. }));
    assert_eq!(surface.calls, ["clear", "append"]);

    let text = to_plain_text(&surface.mounted);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("[Object]"));
    assert_eq!(lines.next(), Some(r#"  "name" [String] "billing-api""#));
    assert_eq!(lines.next(), Some(r#"  "enabled" [Bool] true"#));
    assert_eq!(lines.next(), Some(r#"  "owner" [Null]"#));
    assert_eq!(lines.next(), Some(r#"  "region" [String] "eu-west-1""#));
    assert!(text.contains(r#""replicas" [Number] 3"#));
    assert!(text.contains(r#""tier" [String] "backend""#));
}

#[test]
fn test_fixture_needs_trailing_commas() {
    let mut session = EditSession::new(
        LazyJsonParser::default(),
        InputBuffer::from_text(FIXTURE),
        200,
    );
    let mut surface = RecordingSurface::default();

    let outcome = session.render_now(&mut surface);
    assert!(matches!(
        outcome,
        RenderOutcome::Failed(ParseError::TrailingSeparator { .. })
    ));
    assert_eq!(surface.calls, ["report_error"]);
    assert!(surface.mounted.is_empty());
    let message = session.failure_message().unwrap();
    assert!(message.starts_with("trailing separator is not allowed at line 6"));
}

#[test]
fn test_typing_burst_renders_once_with_latest_text() {
    let mut session = EditSession::new(LazyJsonParser::default(), InputBuffer::empty(), 200);
    let mut surface = RecordingSurface::default();

    for (now_ms, ch) in [(0, '['), (50, '7'), (100, ']')] {
        session.input_mut().insert_char(ch);
        session.input_changed(now_ms);
    }

    for now_ms in (0..300).step_by(10) {
        assert_eq!(session.poll(now_ms, &mut surface), None);
    }
    assert!(surface.calls.is_empty());

    let outcome = session.poll(300, &mut surface);
    assert!(matches!(outcome, Some(RenderOutcome::Rendered { .. })));
    assert_eq!(surface.calls, ["clear", "append"]);
    assert_eq!(to_plain_text(&surface.mounted), "[Array]\n  [Number] 7\n");
    assert_eq!(session.poll(1_000, &mut surface), None);
}

#[test]
fn test_render_on_worker_thread() {
    let mut session = EditSession::new(InputFormat::default(), InputBuffer::from_text("[1]"), 200);
    let mut surface = RecordingSurface::default();

    let ticket = session.begin_render();
    let parser = *session.parser();
    let text = ticket.text().to_string();
    let result = std::thread::spawn(move || parser.parse(&text))
        .join()
        .unwrap();

    let outcome = session.complete_render(ticket, result, &mut surface);
    assert_eq!(outcome, RenderOutcome::Rendered { elements: 3 });
}

#[test]
fn test_edit_during_render_discards_result() {
    let mut session = EditSession::new(InputFormat::default(), InputBuffer::from_text("1"), 200);
    let mut surface = RecordingSurface::default();

    let ticket = session.begin_render();
    session.input_mut().insert_char('2');
    session.input_changed(10);
    let result = session.parser().parse(ticket.text());

    let outcome = session.complete_render(ticket, result, &mut surface);
    assert_eq!(outcome, RenderOutcome::Stale);
    assert!(surface.calls.is_empty());

    let outcome = session.poll(210, &mut surface);
    assert!(matches!(outcome, Some(RenderOutcome::Rendered { .. })));
    assert_eq!(to_plain_text(&surface.mounted), "[Number] 21\n");
}

#[test]
fn test_tagged_tree_input() {
    let source = r#"{"typ": "Object", "entries": {
        "when": {"typ": "Date", "val": "2024-01-01"},
        "ok": {"typ": "Bool", "val": false}
    }}"#;
    let format = InputFormat::new(true, ParseOptions::default());
    let node = format.parse(source).unwrap();
    let mut session = EditSession::new(format, InputBuffer::from_text(source), 200);
    let mut surface = RecordingSurface::default();
    session.render_now(&mut surface);

    assert_eq!(
        to_plain_text(&surface.mounted),
        "[Object]\n  \"when\" [Date]\n  \"ok\" [Bool] false\n"
    );
    assert_eq!(emit_json(&node), "{\n    \"when\": null,\n    \"ok\": false\n}");
}

#[test]
fn test_emit_json_expands_fixture_variables() {
    let node = lenient().parse(FIXTURE).unwrap();
    let json = emit_json(&node);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["region"], "eu-west-1");
    assert_eq!(value["instances"][1]["replicas"], 3);
    assert_eq!(value["instances"][2]["probe"]["path"], "/healthz");
    assert_eq!(value["labels"]["tier"], "backend");
}
