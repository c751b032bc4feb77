//! WASM-compatible Audic wrapper

use audic_core::{validate, AudicError, PlayerEvent};
use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::HtmlAudioElement;

use crate::listeners::ListenerRegistry;

/// Browser audio player
///
/// Same surface and validation rules as the native player, delegating
/// playback to an `HTMLAudioElement`.
#[wasm_bindgen]
pub struct WebAudic {
    element: HtmlAudioElement,
    listeners: ListenerRegistry<Function>,
    destroyed: bool,
}

#[wasm_bindgen]
impl WebAudic {
    /// Create a player with an optional source (`""` is the same as none)
    #[wasm_bindgen(constructor)]
    pub fn new(src: Option<String>) -> Result<WebAudic, JsValue> {
        console_error_panic_hook::set_once();

        let element = match validate::source(src.as_deref()) {
            Some(src) => HtmlAudioElement::new_with_src(src)?,
            None => HtmlAudioElement::new()?,
        };

        Ok(Self {
            element,
            listeners: ListenerRegistry::new(),
            destroyed: false,
        })
    }

    // ===== Playback Control =====

    /// Start playing; the promise settles once the element starts
    pub fn play(&self) -> Result<Promise, JsValue> {
        self.ensure_alive()?;

        let started = JsFuture::from(self.element.play()?);
        Ok(future_to_promise(async move {
            started.await?;
            Ok(JsValue::UNDEFINED)
        }))
    }

    pub fn pause(&self) -> Result<(), JsValue> {
        self.ensure_alive()?;
        self.element.pause()
    }

    // ===== Properties =====

    #[wasm_bindgen(getter)]
    pub fn volume(&self) -> f64 {
        self.element.volume()
    }

    /// Set the volume (`0..=1`)
    #[wasm_bindgen(setter)]
    pub fn set_volume(&self, value: f64) -> Result<(), JsValue> {
        validate::volume(value).map_err(to_js)?;
        self.ensure_alive()?;
        self.element.set_volume(value);
        Ok(())
    }

    /// Duration in seconds, `undefined` until metadata is loaded
    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> Option<f64> {
        known_duration(self.element.duration())
    }

    #[wasm_bindgen(getter)]
    pub fn playing(&self) -> bool {
        !self.element.paused()
    }

    #[wasm_bindgen(getter)]
    pub fn ended(&self) -> bool {
        self.element.ended()
    }

    #[wasm_bindgen(getter)]
    pub fn src(&self) -> Option<String> {
        non_empty(self.element.src())
    }

    /// Replace the source; `""` unloads the current one
    #[wasm_bindgen(setter)]
    pub fn set_src(&self, value: String) -> Result<(), JsValue> {
        self.ensure_alive()?;

        match validate::source(Some(&value)) {
            Some(src) => self.element.set_src(src),
            None => {
                self.element.remove_attribute("src")?;
                self.element.load();
            }
        }
        Ok(())
    }

    /// Playback position in seconds
    #[wasm_bindgen(getter = currentTime)]
    pub fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    /// Seek to a whole number of seconds
    #[wasm_bindgen(setter = currentTime)]
    pub fn set_current_time(&self, value: f64) -> Result<(), JsValue> {
        let target = validate::current_time(value).map_err(to_js)?;
        self.ensure_alive()?;
        self.element.set_current_time(target as f64);
        Ok(())
    }

    #[wasm_bindgen(getter = loop)]
    pub fn looping(&self) -> bool {
        self.element.loop_()
    }

    #[wasm_bindgen(setter = loop)]
    pub fn set_looping(&self, value: bool) -> Result<(), JsValue> {
        self.ensure_alive()?;
        self.element.set_loop(value);
        Ok(())
    }

    // ===== Event Listeners =====

    /// Listen for a media event (`playing`, `pause`, `ended`, ...)
    pub fn on(&mut self, event: &str, callback: Function) -> Result<(), JsValue> {
        let event: PlayerEvent = event.parse().map_err(to_js)?;
        self.ensure_alive()?;

        if self.listeners.add(event, callback.clone()) {
            self.element
                .add_event_listener_with_callback(event.name(), &callback)?;
        }
        Ok(())
    }

    /// Stop listening for a media event
    pub fn off(&mut self, event: &str, callback: Function) -> Result<(), JsValue> {
        let event: PlayerEvent = event.parse().map_err(to_js)?;

        if self.listeners.remove(event, &callback) {
            self.element
                .remove_event_listener_with_callback(event.name(), &callback)?;
        }
        Ok(())
    }

    /// Detach listeners and remove the element
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        for (event, callback) in self.listeners.drain() {
            self.element
                .remove_event_listener_with_callback(event.name(), &callback)
                .ok();
        }

        self.element.pause().ok();
        self.element.remove();
    }

    // ===== Internal =====

    fn ensure_alive(&self) -> Result<(), JsValue> {
        if self.destroyed {
            return Err(to_js(AudicError::Destroyed));
        }
        Ok(())
    }
}

/// Event names accepted by `WebAudic.on`
#[wasm_bindgen(js_name = eventNames)]
pub fn event_names() -> Vec<JsValue> {
    PlayerEvent::ALL
        .iter()
        .map(|event| JsValue::from_str(event.name()))
        .collect()
}

fn to_js(error: AudicError) -> JsValue {
    let message = error.to_string();
    match error {
        AudicError::InvalidArgument(_) => js_sys::TypeError::new(&message).into(),
        _ => js_sys::Error::new(&message).into(),
    }
}

/// Media elements report an unknown duration as `NaN`
fn known_duration(raw: f64) -> Option<f64> {
    raw.is_finite().then_some(raw)
}

/// Media elements report a missing source as `""`
fn non_empty(src: String) -> Option<String> {
    (!src.is_empty()).then_some(src)
}
