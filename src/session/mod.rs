//! The debounced edit/render loop.
//!
//! An [`EditSession`] owns the input text and a parser. Edits arm a
//! [`Debouncer`]; once the input has been quiet for the configured delay the
//! current text is parsed, rendered and mounted into an [`OutputSurface`].
//!
//! Time is passed in as milliseconds so the loop can be driven by a real
//! clock or stepped in tests.

mod debounce;
mod surface;

pub use debounce::Debouncer;
pub use surface::{OutputPane, OutputSurface};

use crate::document::{DocumentNode, DocumentParser, ParseError};
use crate::editor::InputBuffer;
use crate::render::render;

/// Quiet period before a render, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

const TARGET: &str = "lazyview::session";

/// Where the session is in its edit/render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PendingRender { deadline_ms: u64 },
}

/// What happened to a render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The surface now shows the new tree.
    Rendered { elements: usize },
    /// Parsing failed; the surface kept its previous tree.
    Failed(ParseError),
    /// A newer request superseded this one; nothing changed.
    Stale,
}

/// A render request handed out by [`EditSession::begin_render`].
///
/// Holds a snapshot of the input so the parse can happen elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    generation: u64,
    text: String,
}

impl RenderTicket {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Binds one input buffer to an output surface through a parser.
#[derive(Debug)]
pub struct EditSession<P> {
    parser: P,
    input: InputBuffer,
    debouncer: Debouncer,
    /// Bumped on every arm and every render request; only the latest
    /// generation may change the surface.
    generation: u64,
    last_failure: Option<String>,
}

impl<P: DocumentParser> EditSession<P> {
    pub const fn new(parser: P, input: InputBuffer, debounce_ms: u64) -> Self {
        Self {
            parser,
            input,
            debouncer: Debouncer::new(debounce_ms),
            generation: 0,
            last_failure: None,
        }
    }

    pub const fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Mutable access for editing. Call [`Self::input_changed`] after any
    /// change to the text.
    pub const fn input_mut(&mut self) -> &mut InputBuffer {
        &mut self.input
    }

    pub const fn parser(&self) -> &P {
        &self.parser
    }

    pub fn state(&self) -> SessionState {
        match self.debouncer.deadline_ms() {
            Some(deadline_ms) => SessionState::PendingRender { deadline_ms },
            None => SessionState::Idle,
        }
    }

    /// When the pending render is due, if one is armed.
    pub fn deadline(&self) -> Option<u64> {
        self.debouncer.deadline_ms()
    }

    pub const fn debounce_ms(&self) -> u64 {
        self.debouncer.delay_ms()
    }

    /// Description of the latest parse failure, with its location, until a
    /// render succeeds.
    pub fn failure_message(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Record that the input changed at `now_ms` and (re)arm the render.
    pub fn input_changed(&mut self, now_ms: u64) {
        self.generation += 1;
        let cancelled = self.debouncer.queue(now_ms);
        tracing::trace!(
            target: TARGET,
            now_ms,
            generation = self.generation,
            cancelled_timer = cancelled,
            "render armed"
        );
    }

    /// Replace the whole input, e.g. with a file's new contents, and arm the
    /// render. Returns `false` without arming when the text is unchanged.
    pub fn replace_input(&mut self, text: &str, now_ms: u64) -> bool {
        if !self.input.replace_text(text) {
            return false;
        }
        self.input_changed(now_ms);
        true
    }

    /// Run the pending render if it is due.
    pub fn poll(&mut self, now_ms: u64, surface: &mut impl OutputSurface) -> Option<RenderOutcome> {
        let timer = self.debouncer.take_ready(now_ms)?;
        tracing::debug!(target: TARGET, now_ms, timer, "debounce elapsed");
        Some(self.render_now(surface))
    }

    /// Parse and render the current input immediately, dropping any pending
    /// timer.
    pub fn render_now(&mut self, surface: &mut impl OutputSurface) -> RenderOutcome {
        let ticket = self.begin_render();
        let result = self.parser.parse(ticket.text());
        self.complete_render(ticket, result, surface)
    }

    /// Snapshot the input for a render that completes later.
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin_render(&mut self) -> RenderTicket {
        self.debouncer.cancel();
        self.generation += 1;
        RenderTicket {
            generation: self.generation,
            text: self.input.text(),
        }
    }

    /// Apply a parse result to `surface`, unless a newer request exists.
    pub fn complete_render(
        &mut self,
        ticket: RenderTicket,
        result: Result<DocumentNode, ParseError>,
        surface: &mut impl OutputSurface,
    ) -> RenderOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                target: TARGET,
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale render"
            );
            return RenderOutcome::Stale;
        }

        match result {
            Ok(node) => {
                let element = render(&node);
                let elements = element.element_count();
                surface.clear();
                surface.append(element);
                self.last_failure = None;
                tracing::debug!(
                    target: TARGET,
                    generation = ticket.generation,
                    nodes = node.node_count(),
                    elements,
                    "rendered"
                );
                RenderOutcome::Rendered { elements }
            }
            Err(err) => {
                let message = err.describe(&ticket.text);
                tracing::debug!(target: TARGET, generation = ticket.generation, %message, "parse failed");
                surface.report_error(&err);
                self.last_failure = Some(message);
                RenderOutcome::Failed(err)
            }
        }
    }
}
