//! Where rendered output goes.

use crate::document::ParseError;
use crate::render::VisualElement;

/// A container the session mounts rendered trees into.
pub trait OutputSurface {
    /// Remove all mounted elements and any error indicator.
    fn clear(&mut self);

    /// Mount `element` after the existing ones.
    fn append(&mut self, element: VisualElement);

    /// Show that the latest input failed to parse. Mounted elements stay.
    fn report_error(&mut self, error: &ParseError);
}

/// In-memory output pane drawn by the terminal UI.
#[derive(Debug, Default)]
pub struct OutputPane {
    children: Vec<VisualElement>,
    error: Option<ParseError>,
    revision: u64,
}

impl OutputPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[VisualElement] {
        &self.children
    }

    /// The error from the most recent failed render, until a render succeeds.
    pub const fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Bumped on every change, so views can cache their layout.
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

impl OutputSurface for OutputPane {
    fn clear(&mut self) {
        self.children.clear();
        self.error = None;
        self.revision += 1;
    }

    fn append(&mut self, element: VisualElement) {
        self.children.push(element);
        self.revision += 1;
    }

    fn report_error(&mut self, error: &ParseError) {
        self.error = Some(error.clone());
        self.revision += 1;
    }
}
