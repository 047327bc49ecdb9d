//! Runtime state of the document editor page.
//!
//! The document workflow itself (form values, save/generate guards, dirty
//! tracking) lives in `common::editor::DocumentEditor`; this struct adds
//! what only the page needs: load progress, the generation poller, and the
//! busy flags of the file actions.

use common::editor::DocumentEditor;
use common::jobs::GenerationWatch;

pub struct DocumentEditorPage {
    /// `None` until the document and its versions have loaded.
    pub editor: Option<DocumentEditor>,
    pub loading: bool,
    /// Set when the first load failed; the page shows a not-found card.
    pub load_failed: bool,
    pub watch: GenerationWatch,
    pub previewing: bool,
    /// Version id currently being downloaded.
    pub downloading: Option<i64>,
}

impl DocumentEditorPage {
    pub fn new() -> Self {
        Self {
            editor: None,
            loading: true,
            load_failed: false,
            watch: GenerationWatch::default(),
            previewing: false,
            downloading: None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.as_ref().is_some_and(DocumentEditor::is_dirty)
    }
}
