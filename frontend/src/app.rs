use crate::components::place_saver::PlaceSaverComponent;
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                <h1>{"🌍 Travel Saver"}</h1>
                <p class="subtitle">{"Save your favorite travel destinations from Instagram & TikTok"}</p>
                <PlaceSaverComponent />
            </div>
        }
    }
}
