//! Component state for the place saver.

use std::rc::Rc;

use common::extraction::{ExtractionClient, IdSequence};
use common::model::place::PlaceRecord;
use common::store::PlaceStore;
use yew::prelude::*;

use crate::storage::BrowserStorage;
use crate::transport::AppTransport;

pub struct PlaceSaverComponent {
    /// Saved places, in display order. Only mutated through the store API.
    pub store: PlaceStore<BrowserStorage>,

    /// Shared with the in-flight extraction task.
    pub client: Rc<ExtractionClient<AppTransport>>,

    /// True while an extraction request is in flight. New files are ignored meanwhile.
    pub uploading: bool,

    /// Result awaiting Save or Cancel.
    pub extracted: Option<PlaceRecord>,

    /// Banner text: validation errors, failures and "no place found".
    pub error: Option<String>,

    pub drag_over: bool,

    /// Set once any extraction round trip succeeded; hides the proxy notice.
    pub proxy_confirmed: bool,

    /// Hidden `<input type="file">` behind the upload zone.
    pub file_input_ref: NodeRef,
}

impl PlaceSaverComponent {
    /// Loads saved places and seeds id allocation past the highest saved id.
    pub fn new() -> Self {
        let store = PlaceStore::load(BrowserStorage::new());
        let ids = store
            .max_id()
            .map(IdSequence::starting_after)
            .unwrap_or_default();
        let client = ExtractionClient::new(AppTransport::from_config()).with_ids(ids);

        Self {
            store,
            client: Rc::new(client),
            uploading: false,
            extracted: None,
            error: None,
            drag_over: false,
            proxy_confirmed: false,
            file_input_ref: NodeRef::default(),
        }
    }

    /// Whether requests carry a key compiled into the page.
    pub fn uses_client_key(&self) -> bool {
        self.client.transport().is_direct()
    }
}
