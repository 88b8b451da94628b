//! Place saver: upload a screenshot, review what the model extracted, keep
//! the places worth keeping.
//!
//! Responsibilities
//! - Own the [`PlaceStore`](common::store::PlaceStore) mirrored to `localStorage`.
//! - Run one extraction at a time through the configured transport.
//! - Delegate state changes to `update::update` and rendering to `view::view`.

use yew::prelude::*;

mod helpers;
mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::PlaceSaverComponent;

impl Component for PlaceSaverComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        PlaceSaverComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
