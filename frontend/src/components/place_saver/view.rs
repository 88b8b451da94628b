//! View rendering for the place saver component.
//!
//! Sections, top to bottom: setup notice (proxy mode, until the server has
//! answered once), upload zone,
//! error banner, preview card for an unsaved extraction, saved places grid.

use common::model::place::PlaceRecord;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::{category_classes, category_label, show_setup_notice};
use super::messages::Msg;
use super::state::PlaceSaverComponent;

pub fn view(component: &PlaceSaverComponent, ctx: &Context<PlaceSaverComponent>) -> Html {
    let link = ctx.link();

    html! {
        <>
            { build_setup_notice(component) }
            { build_upload_zone(component, link) }
            {
                match &component.error {
                    Some(error) => html! { <div class="error">{ error.clone() }</div> },
                    None => html! {},
                }
            }
            { build_preview(component, link) }
            { build_saved_places(component, link) }
        </>
    }
}

fn build_setup_notice(component: &PlaceSaverComponent) -> Html {
    if !show_setup_notice(component.uses_client_key(), component.proxy_confirmed) {
        return html! {};
    }
    html! {
        <div class="setup-notice">
            <p>
                {"Screenshots are analyzed by the server. If analysis fails with a missing key error, set "}
                <strong>{"ANTHROPIC_API_KEY"}</strong>
                {" in the server's environment (keys at "}
                <a href="https://console.anthropic.com" target="_blank">{"console.anthropic.com"}</a>
                {")."}
            </p>
        </div>
    }
}

fn build_upload_zone(component: &PlaceSaverComponent, link: &Scope<PlaceSaverComponent>) -> Html {
    let ondrop = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::FileSelected(
            e.data_transfer()
                .and_then(|transfer| transfer.files())
                .and_then(|files| files.get(0)),
        )
    });
    let ondragover = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::DragOver
    });
    let onchange = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::FileSelected(input.files().and_then(|files| files.get(0)))
    });

    html! {
        <div
            class={classes!("upload-zone", component.drag_over.then_some("dragover"))}
            ondrop={ondrop}
            ondragover={ondragover}
            ondragleave={link.callback(|_: DragEvent| Msg::DragLeave)}
            onclick={link.callback(|_: MouseEvent| Msg::OpenFileDialog)}
        >
            <input
                ref={component.file_input_ref.clone()}
                type="file"
                accept="image/*"
                style="display: none"
                onchange={onchange}
            />
            {
                if component.uploading {
                    html! {
                        <div class="loading">
                            <div class="spinner"></div>
                            <p>{"Analyzing screenshot..."}</p>
                        </div>
                    }
                } else {
                    html! {
                        <>
                            <div class="upload-icon">{"📸"}</div>
                            <div class="upload-text">{"Click or drag to upload screenshot"}</div>
                            <div class="upload-hint">{"Instagram, TikTok, or any travel content"}</div>
                        </>
                    }
                }
            }
        </div>
    }
}

fn build_preview(component: &PlaceSaverComponent, link: &Scope<PlaceSaverComponent>) -> Html {
    let Some(place) = &component.extracted else {
        return html! {};
    };

    html! {
        <div class="preview-card">
            <div class="preview-header">
                <div class="preview-title">{"Place Found! ✨"}</div>
                <div class={category_classes(place, false)}>{ category_label(place) }</div>
            </div>
            <div class="preview-grid">
                <img src={place.image.clone()} alt={place.place_name.clone()} class="preview-image" />
                <div class="preview-details">
                    <h3>{ place.place_name.clone() }</h3>
                    <div class="location">
                        <span class="location-icon">{"📍"}</span>
                        { place.location_label() }
                    </div>
                    <p class="description">{ place.description.clone() }</p>
                </div>
            </div>
            <div class="button-actions">
                <button class="button button-primary" onclick={link.callback(|_| Msg::Save)}>
                    {"Save to My Places"}
                </button>
                <button class="button button-secondary" onclick={link.callback(|_| Msg::Cancel)}>
                    {"Cancel"}
                </button>
            </div>
        </div>
    }
}

fn build_saved_places(component: &PlaceSaverComponent, link: &Scope<PlaceSaverComponent>) -> Html {
    let places = component.store.places();

    html! {
        <div class="saved-places">
            <div class="saved-header">
                <h2 class="saved-title">{"Saved Places"}</h2>
                <div class="saved-count">{ places.len() }</div>
            </div>
            {
                if places.is_empty() {
                    html! {
                        <div class="empty-state">
                            <div class="empty-icon">{"🗺️"}</div>
                            <p class="empty-text">{"No saved places yet. Upload a screenshot to get started!"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <div class="places-grid">
                            { for places.iter().map(|place| place_card(place, link)) }
                        </div>
                    }
                }
            }
        </div>
    }
}

fn place_card(place: &PlaceRecord, link: &Scope<PlaceSaverComponent>) -> Html {
    let id = place.id;

    html! {
        <div key={id.to_string()} class="place-card">
            <img src={place.image.clone()} alt={place.place_name.clone()} class="place-image" />
            <div class="place-content">
                <h3 class="place-name">{ place.place_name.clone() }</h3>
                <div class="place-location">
                    <span class="location-icon">{"📍"}</span>
                    { place.location_label() }
                </div>
                <p class="place-description">{ place.description.clone() }</p>
                <div class="place-footer">
                    <span class={category_classes(place, true)}>{ category_label(place) }</span>
                    <button class="delete-button" onclick={link.callback(move |_| Msg::Delete(id))}>
                        {"Delete"}
                    </button>
                </div>
            </div>
        </div>
    }
}
