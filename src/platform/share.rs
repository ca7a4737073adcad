use js_sys::{Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::PlatformError;

/// Native share sheet when the browser has one, clipboard otherwise.
pub fn share_score(text: &str) -> Result<(), PlatformError> {
    let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
    let navigator: JsValue = window.navigator().into();
    let share_err = |err| PlatformError::js(PlatformError::Share, err);

    if let Some(share) = method(&navigator, "share") {
        let data = Object::new();
        Reflect::set(&data, &"title".into(), &"SiteDino Score".into()).map_err(share_err)?;
        Reflect::set(&data, &"text".into(), &text.into()).map_err(share_err)?;
        let promise = share.call1(&navigator, &data).map_err(share_err)?;
        swallow_rejection(promise);
        return Ok(());
    }

    let clipboard = Reflect::get(&navigator, &"clipboard".into()).map_err(share_err)?;
    let write_text = method(&clipboard, "writeText")
        .ok_or_else(|| PlatformError::Share("clipboard unavailable".to_string()))?;
    let promise = write_text
        .call1(&clipboard, &text.into())
        .map_err(share_err)?;
    swallow_rejection(promise);
    let _ = window.alert_with_message("Score copied to clipboard!");
    Ok(())
}

fn method(target: &JsValue, name: &str) -> Option<Function> {
    if target.is_undefined() || target.is_null() {
        return None;
    }
    Reflect::get(target, &name.into())
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
}

// Dismissing the share sheet rejects the promise.
fn swallow_rejection(value: JsValue) {
    if let Ok(promise) = value.dyn_into::<js_sys::Promise>() {
        let on_reject = Closure::wrap(Box::new(move |err: JsValue| {
            tracing::debug!(?err, "share dismissed");
        }) as Box<dyn FnMut(JsValue)>);
        let _ = promise.catch(&on_reject);
        on_reject.forget();
    }
}
