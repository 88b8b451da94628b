//! Utility functions for the place saver component.
//!
//! - **File reading**: turning the picked `File` into an [`ImagePayload`] and
//!   running it through the extraction client.
//! - **User feedback**: the temporary toast shown after a save.
//! - **Saving**: moving the previewed record into the store.
//! - **Presentation**: small pure helpers used by `view.rs`.

use common::extraction::{Extraction, ExtractionClient, ExtractionError};
use common::model::image::ImagePayload;
use common::model::place::PlaceRecord;
use common::store::{KeyValueStorage, PlaceStore, StoreError};
use gloo_file::futures::read_as_bytes;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::transport::AppTransport;

/// Reads the file, encodes it and sends it for extraction.
pub async fn extract_file(
    client: &ExtractionClient<AppTransport>,
    file: web_sys::File,
    media_type: String,
) -> Result<Extraction, ExtractionError> {
    let file = gloo_file::File::from(file);
    let bytes = read_as_bytes(&file)
        .await
        .map_err(|e| ExtractionError::Transport(format!("could not read file: {}", e)))?;
    let image = ImagePayload::from_bytes(&media_type, &bytes)?;
    client.extract(&image).await
}

/// Appends the previewed record to the store and returns its name.
///
/// `None` when there is nothing to save. A record the store refuses stays
/// in `extracted`, so the preview survives and Save can be tried again.
pub fn save_extracted<S: KeyValueStorage>(
    store: &mut PlaceStore<S>,
    extracted: &mut Option<PlaceRecord>,
) -> Option<Result<String, StoreError>> {
    let record = extracted.take()?;
    let name = record.place_name.clone();
    match store.append(record.clone()) {
        Ok(()) => Some(Ok(name)),
        Err(e) => {
            if e.is_refusal() {
                *extracted = Some(record);
            }
            Some(Err(e))
        }
    }
}

/// The proxy notice is informational; it goes away once the server has
/// answered a request, which proves its key is configured.
pub fn show_setup_notice(uses_client_key: bool, proxy_confirmed: bool) -> bool {
    !uses_client_key && !proxy_confirmed
}

/// CSS classes for a category badge, e.g. `category-badge category-cafe`.
pub fn category_classes(place: &PlaceRecord, small: bool) -> String {
    let mut classes = format!("category-badge category-{}", place.category_kind().as_str());
    if small {
        classes.push_str(" category-small");
    }
    classes
}

/// Badge text: the model's label, or "other" when it gave none.
pub fn category_label(place: &PlaceRecord) -> String {
    let label = place.category.trim();
    if label.is_empty() {
        place.category_kind().as_str().to_string()
    } else {
        label.to_string()
    }
}

/// Displays a temporary notification at the bottom of the screen.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                toast.set_class_name("toast");
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::store::MemoryStorage;

    fn place(category: &str) -> PlaceRecord {
        PlaceRecord {
            place_name: "Blue Bottle".to_string(),
            city: "Tokyo".to_string(),
            country: "Japan".to_string(),
            description: String::new(),
            category: category.to_string(),
            id: 1,
            saved_at: String::new(),
            image: String::new(),
        }
    }

    #[test]
    fn saving_moves_preview_into_store() {
        let storage = MemoryStorage::new();
        let mut store = PlaceStore::load(&storage);
        let mut extracted = Some(place("cafe"));

        assert_eq!(
            save_extracted(&mut store, &mut extracted),
            Some(Ok("Blue Bottle".to_string()))
        );
        assert_eq!(extracted, None);
        assert_eq!(store.len(), 1);
        assert_eq!(save_extracted(&mut store, &mut extracted), None);
    }

    #[test]
    fn refused_save_keeps_preview() {
        let storage = MemoryStorage::new();
        let mut store = PlaceStore::load(&storage);
        store.append(place("cafe")).unwrap();

        let mut extracted = Some(place("bar"));
        let result = save_extracted(&mut store, &mut extracted);
        assert_eq!(result, Some(Err(StoreError::DuplicateId(1))));
        assert_eq!(extracted, Some(place("bar")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_write_does_not_restore_preview() {
        let storage = MemoryStorage::read_only();
        let mut store = PlaceStore::load(&storage);
        let mut extracted = Some(place("cafe"));

        let result = save_extracted(&mut store, &mut extracted);
        assert!(matches!(result, Some(Err(StoreError::Storage(_)))));
        assert_eq!(extracted, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn setup_notice_only_until_proxy_answers() {
        assert!(show_setup_notice(false, false));
        assert!(!show_setup_notice(false, true));
        assert!(!show_setup_notice(true, false));
    }

    #[test]
    fn badge_classes_use_parsed_category() {
        assert_eq!(category_classes(&place("Cafe"), false), "category-badge category-cafe");
        assert_eq!(
            category_classes(&place("rooftop"), true),
            "category-badge category-other category-small"
        );
    }

    #[test]
    fn badge_label_keeps_model_wording() {
        assert_eq!(category_label(&place("Rooftop bar")), "Rooftop bar");
        assert_eq!(category_label(&place("  ")), "other");
    }
}
