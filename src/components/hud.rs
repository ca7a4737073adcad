use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudProps {
    pub score: u64,
    pub high: u64,
    pub pause_label: String,
    pub sound: bool,
    pub on_toggle_pause: Callback<()>,
    pub on_restart: Callback<()>,
    pub on_toggle_sound: Callback<()>,
}

#[function_component(Hud)]
pub fn hud(props: &HudProps) -> Html {
    let pause_cb = {
        let cb = props.on_toggle_pause.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let restart_cb = {
        let cb = props.on_restart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let sound_cb = {
        let cb = props.on_toggle_sound.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let value_style = "min-width:60px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="position:absolute; top:12px; left:12px; right:12px; display:flex; justify-content:space-between; align-items:flex-start; pointer-events:none;">
            <div style="background:rgba(255,255,255,0.85); border:1px solid #cbd5e1; border-radius:8px; padding:8px 12px; display:flex; flex-direction:column; gap:4px; font-size:14px; color:#0f172a;">
                <div style="display:flex; gap:8px;">
                    <span style="flex:1;">{"Score"}</span>
                    <span id="scoreVal" style={value_style}>{ props.score }</span>
                </div>
                <div style="display:flex; gap:8px; opacity:0.75;">
                    <span style="flex:1;">{"High"}</span>
                    <span id="highVal" style={value_style}>{ props.high }</span>
                </div>
            </div>
            <div style="display:flex; gap:6px; pointer-events:auto;">
                <button id="btnPause" onclick={pause_cb}>{ props.pause_label.clone() }</button>
                <button id="btnRestart" onclick={restart_cb}>{"Restart"}</button>
                <button onclick={sound_cb}>{ if props.sound { "Sound: On" } else { "Sound: Off" } }</button>
            </div>
        </div>
    }
}
