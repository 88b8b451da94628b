use common::extraction::{Extraction, ExtractionError};

pub enum Msg {
    OpenFileDialog,
    /// From the file input or a drop; `None` when nothing was picked.
    FileSelected(Option<web_sys::File>),
    DragOver,
    DragLeave,
    ExtractionFinished(Result<Extraction, ExtractionError>),
    Save,
    Cancel,
    Delete(i64),
}
