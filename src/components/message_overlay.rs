use yew::prelude::*;

use crate::game::Phase;

#[derive(Properties, PartialEq, Clone)]
pub struct MessageOverlayProps {
    pub message: Option<String>,
    pub phase: Phase,
    pub on_play: Callback<()>,
    pub on_share: Callback<()>,
}

#[function_component(MessageOverlay)]
pub fn message_overlay(props: &MessageOverlayProps) -> Html {
    let Some(text) = props.message.clone() else {
        return html! {};
    };
    let play_btn = {
        let cb = props.on_play.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let share_btn = {
        let cb = props.on_share.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let can_play = matches!(props.phase, Phase::Ready | Phase::GameOver);
    let game_over = props.phase == Phase::GameOver;
    let border = if game_over { "#f85149" } else { "#cbd5e1" };
    html! {
        <div id="message" style={format!("position:absolute; top:40%; left:50%; transform:translate(-50%, -50%); background:rgba(255,255,255,0.92); border:2px solid {border}; padding:20px 28px; border-radius:12px; text-align:center; min-width:280px; color:#0f172a;")}>
            <p id="messageText" style="margin:0 0 12px 0; font-size:18px; font-weight:600;">{ text }</p>
            <div style="display:flex; gap:12px; justify-content:center;">
                { if can_play { html!{ <button id="playBtn" onclick={play_btn}>{ if game_over { "Play Again" } else { "Play" } }</button> } } else { html!{} } }
                { if game_over { html!{ <button id="shareBtn" onclick={share_btn}>{"Share"}</button> } } else { html!{} } }
            </div>
            { if props.phase == Phase::Ready {
                html!{ <p style="margin:12px 0 0 0; font-size:12px; opacity:0.7;">{"Space / ↑ to jump, ↓ to duck, P to pause, R to restart."}</p> }
            } else { html!{} } }
        </div>
    }
}
