use yew::prelude::*;

use crate::game::Control;

#[derive(Properties, PartialEq, Clone)]
pub struct TouchControlsProps {
    pub on_press: Callback<Control>,
    pub on_release: Callback<Control>,
}

// Press/release buttons for phones; mouse events let them work on desktop too.
fn hold_button(id: &'static str, label: &'static str, control: Control, props: &TouchControlsProps) -> Html {
    let touch_start = {
        let cb = props.on_press.clone();
        Callback::from(move |e: TouchEvent| {
            e.prevent_default();
            cb.emit(control);
        })
    };
    let touch_end = {
        let cb = props.on_release.clone();
        Callback::from(move |e: TouchEvent| {
            e.prevent_default();
            cb.emit(control);
        })
    };
    let mouse_down = {
        let cb = props.on_press.clone();
        Callback::from(move |_: MouseEvent| cb.emit(control))
    };
    let mouse_up = {
        let cb = props.on_release.clone();
        Callback::from(move |_: MouseEvent| cb.emit(control))
    };
    html! {
        <button {id}
            style="width:72px; height:72px; border-radius:50%; border:1px solid #94a3b8; background:rgba(255,255,255,0.8); font-size:14px; font-weight:600; user-select:none;"
            ontouchstart={touch_start}
            ontouchend={touch_end.clone()}
            ontouchcancel={touch_end}
            onmousedown={mouse_down}
            onmouseup={mouse_up.clone()}
            onmouseleave={mouse_up}
        >{ label }</button>
    }
}

#[function_component(TouchControls)]
pub fn touch_controls(props: &TouchControlsProps) -> Html {
    html! {
        <div style="position:absolute; left:12px; right:12px; bottom:12px; display:flex; justify-content:space-between; pointer-events:none;">
            <div style="pointer-events:auto;">{ hold_button("duckBtn", "Duck", Control::Duck, props) }</div>
            <div style="pointer-events:auto;">{ hold_button("jumpBtn", "Jump", Control::Jump, props) }</div>
        </div>
    }
}
