//! Update function for the place saver component.
//!
//! Flow: idle -> uploading -> (preview | error) -> idle. A save or cancel
//! clears the preview; every failure leaves the component ready for the
//! next upload.

use common::extraction::{Extraction, ExtractionError, NO_PLACE_MESSAGE};
use common::model::image::is_image_media_type;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{extract_file, save_extracted, show_toast};
use super::messages::Msg;
use super::state::PlaceSaverComponent;

/// Returns `true` when the view should re-render.
pub fn update(
    component: &mut PlaceSaverComponent,
    ctx: &Context<PlaceSaverComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::OpenFileDialog => {
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.set_value("");
                input.click();
            }
            false
        }
        Msg::DragOver => {
            let changed = !component.drag_over;
            component.drag_over = true;
            changed
        }
        Msg::DragLeave => {
            let changed = component.drag_over;
            component.drag_over = false;
            changed
        }
        Msg::FileSelected(file) => {
            component.drag_over = false;
            let Some(file) = file else {
                return true;
            };
            if component.uploading {
                log::debug!("ignoring {} while an extraction is running", file.name());
                return true;
            }

            let media_type = file.type_();
            if !is_image_media_type(&media_type) {
                component.error = Some(ExtractionError::InvalidInput(media_type).user_message());
                return true;
            }

            component.uploading = true;
            component.error = None;
            component.extracted = None;

            let client = component.client.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = extract_file(&client, file, media_type).await;
                link.send_message(Msg::ExtractionFinished(result));
            });
            true
        }
        Msg::ExtractionFinished(result) => {
            component.uploading = false;
            if result.is_ok() {
                component.proxy_confirmed = true;
            }
            match result {
                Ok(Extraction::Found(record)) => {
                    log::info!("extracted {}", record.place_name);
                    component.extracted = Some(record);
                }
                Ok(Extraction::NoPlace) => {
                    component.error = Some(NO_PLACE_MESSAGE.to_string());
                }
                Err(e) => {
                    log::error!("Upload error: {}", e);
                    component.error = Some(e.user_message());
                }
            }
            true
        }
        Msg::Save => match save_extracted(&mut component.store, &mut component.extracted) {
            None => false,
            Some(Ok(name)) => {
                show_toast(&format!("Saved {} to My Places", name));
                true
            }
            Some(Err(e)) => {
                log::error!("Saving place failed: {}", e);
                component.error = Some(format!("Failed to save place: {}", e));
                true
            }
        },
        Msg::Cancel => {
            component.extracted = None;
            component.error = None;
            true
        }
        Msg::Delete(id) => {
            if let Err(e) = component.store.remove_by_id(id) {
                log::error!("Deleting place {} failed: {}", id, e);
                component.error = Some(format!("Failed to delete place: {}", e));
            }
            true
        }
    }
}
