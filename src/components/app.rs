use super::game_view::GameView;
use crate::config::Settings;
use crate::platform::{self, storage};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let store = use_mut_ref(storage::open_default);
    let settings = {
        let store = store.clone();
        use_state(move || platform::load_settings(&**store.borrow()))
    };

    // Persist settings changes
    {
        let store = store.clone();
        use_effect_with(*settings, move |settings: &Settings| {
            if let Err(err) = platform::save_settings(&mut **store.borrow_mut(), settings) {
                tracing::warn!(%err, "could not save settings");
            }
            || ()
        });
    }

    let on_toggle_sound = {
        let settings = settings.clone();
        Callback::from(move |_| {
            settings.set(Settings {
                sound: !settings.sound,
            })
        })
    };

    html! { <GameView sound={settings.sound} {on_toggle_sound} /> }
}
