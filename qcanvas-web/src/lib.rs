//! Browser bindings for qcanvas
//!
//! Exports one JS class per homepage effect. Each class mounts an animation
//! on the canvas with the given id, wires pointer and resize events, and
//! tears everything down on `destroy()`.

use std::fmt::Display;
use std::rc::Rc;

use qcanvas::{
    CanvasError, CircuitConfig, CircuitDiagram, FieldConfig, ParticleField, Scene, SceneConfig,
    Size,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub mod events;
pub mod scheduler;
pub mod surface;

use events::{Listener, WebAnimator};
use scheduler::WindowScheduler;
use surface::DocumentSurfaces;

/// Canvas ids mounted by [`mount_effects`]
pub const QUANTUM_CANVAS_ID: &str = "quantum-canvas";
pub const HERO_CANVAS_ID: &str = "hero-canvas";
pub const AMBIENT_CANVAS_ID: &str = "particles-canvas";
pub const CIRCUIT_CANVAS_ID: &str = "circuit-canvas";

/// Install the panic hook and route logs to the browser console
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

fn js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn browser_rng() -> SmallRng {
    let seed = js_sys::Date::now().to_bits() ^ js_sys::Math::random().to_bits();
    SmallRng::seed_from_u64(seed)
}

/// An animator plus the DOM listeners feeding it
struct Mount<A: Scene + 'static> {
    animator: Rc<WebAnimator<A>>,
    listeners: Vec<Listener>,
}

impl<A: Scene + 'static> Mount<A> {
    fn new<B>(canvas_id: &str, interactive: bool, build: B) -> Result<Self, JsValue>
    where
        B: FnOnce(Size) -> Result<A, CanvasError>,
    {
        let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
        let surfaces = DocumentSurfaces::current().ok_or_else(|| js_error("no document"))?;
        let scheduler = WindowScheduler::new(window.clone());

        let animator =
            Rc::new(WebAnimator::create(&surfaces, canvas_id, scheduler, build).map_err(js_error)?);

        let mut listeners = vec![events::resize_listener(&window, &animator)?];
        if interactive {
            let canvas = animator.surface().canvas().clone();
            listeners.extend(events::pointer_listeners(&canvas, &animator)?);
        }

        Ok(Self {
            animator,
            listeners,
        })
    }

    fn destroy(&mut self) {
        self.listeners.clear();
        self.animator.destroy();
    }
}

fn mount_field(canvas_id: &str, config: FieldConfig) -> Result<Mount<ParticleField>, JsValue> {
    let interactive = config.interactive;
    Mount::new(canvas_id, interactive, move |size| {
        ParticleField::new(config, size, browser_rng()).map_err(CanvasError::from)
    })
}

macro_rules! field_canvas {
    ($(#[$doc:meta])* $name:ident, $preset:ident) => {
        $(#[$doc])*
        #[wasm_bindgen]
        pub struct $name {
            mount: Mount<ParticleField>,
        }

        #[wasm_bindgen]
        impl $name {
            #[wasm_bindgen(constructor)]
            pub fn new(canvas_id: &str) -> Result<$name, JsValue> {
                Ok(Self {
                    mount: mount_field(canvas_id, FieldConfig::$preset())?,
                })
            }

            /// Mount with a partial JSON config layered over the preset
            #[wasm_bindgen(js_name = withConfig)]
            pub fn with_config(canvas_id: &str, json: &str) -> Result<$name, JsValue> {
                let config = FieldConfig::$preset()
                    .with_overrides(json)
                    .map_err(js_error)?;
                Ok(Self {
                    mount: mount_field(canvas_id, config)?,
                })
            }

            /// Population snapshot as a JSON string
            pub fn stats(&self) -> Result<String, JsValue> {
                serde_json::to_string(&self.mount.animator.scene().stats()).map_err(js_error)
            }

            pub fn destroy(&mut self) {
                self.mount.destroy();
            }
        }
    };
}

field_canvas!(
    /// Section background: colored particles that flee the pointer
    QuantumCanvas,
    quantum
);
field_canvas!(
    /// Hero banner: denser field with glowing waves
    HeroCanvas,
    hero
);
field_canvas!(
    /// Faint floating dots behind the page
    AmbientCanvas,
    ambient
);

/// Replayed gate sequence with a sweeping progress line
#[wasm_bindgen]
pub struct QuantumCircuitCanvas {
    mount: Mount<CircuitDiagram>,
}

#[wasm_bindgen]
impl QuantumCircuitCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<QuantumCircuitCanvas, JsValue> {
        Self::open(canvas_id, CircuitConfig::default())
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(canvas_id: &str, json: &str) -> Result<QuantumCircuitCanvas, JsValue> {
        let config = CircuitConfig::default()
            .with_overrides(json)
            .map_err(js_error)?;
        Self::open(canvas_id, config)
    }

    /// The current gate sequence as a JSON array
    pub fn events(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.mount.animator.scene().events()).map_err(js_error)
    }

    pub fn destroy(&mut self) {
        self.mount.destroy();
    }
}

impl QuantumCircuitCanvas {
    fn open(canvas_id: &str, config: CircuitConfig) -> Result<QuantumCircuitCanvas, JsValue> {
        let mount = Mount::new(canvas_id, false, move |size| {
            CircuitDiagram::new(config, size, browser_rng()).map_err(CanvasError::from)
        })?;
        Ok(Self { mount })
    }
}

/// Handle to the effects started by [`mount_effects`]
#[wasm_bindgen]
#[derive(Default)]
pub struct Effects {
    quantum: Option<QuantumCanvas>,
    hero: Option<HeroCanvas>,
    ambient: Option<AmbientCanvas>,
    circuit: Option<QuantumCircuitCanvas>,
}

#[wasm_bindgen]
impl Effects {
    /// Number of effects that mounted successfully
    pub fn count(&self) -> usize {
        [
            self.quantum.is_some(),
            self.hero.is_some(),
            self.ambient.is_some(),
            self.circuit.is_some(),
        ]
        .into_iter()
        .filter(|mounted| *mounted)
        .count()
    }

    pub fn destroy(&mut self) {
        if let Some(c) = self.quantum.as_mut() {
            c.destroy();
        }
        if let Some(c) = self.hero.as_mut() {
            c.destroy();
        }
        if let Some(c) = self.ambient.as_mut() {
            c.destroy();
        }
        if let Some(c) = self.circuit.as_mut() {
            c.destroy();
        }
    }
}

fn mounted<T>(name: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(effect) => Some(effect),
        Err(err) => {
            let reason = match err.dyn_ref::<js_sys::Error>() {
                Some(error) => String::from(error.message()),
                None => format!("{err:?}"),
            };
            tracing::warn!("skipping {name}: {reason}");
            None
        }
    }
}

/// Mount every standard homepage effect whose canvas is present
///
/// Failures are logged and skipped; the page keeps working without them.
#[wasm_bindgen(js_name = mountEffects)]
pub fn mount_effects() -> Effects {
    let effects = Effects {
        quantum: mounted("quantum canvas", QuantumCanvas::new(QUANTUM_CANVAS_ID)),
        hero: mounted("hero canvas", HeroCanvas::new(HERO_CANVAS_ID)),
        ambient: mounted("ambient canvas", AmbientCanvas::new(AMBIENT_CANVAS_ID)),
        circuit: mounted("circuit canvas", QuantumCircuitCanvas::new(CIRCUIT_CANVAS_ID)),
    };
    tracing::info!("mounted {} canvas effects", effects.count());
    effects
}

const COPIED_LABEL: &str = "Copied!";
const COPIED_BACKGROUND: &str = "#10b981";
const COPIED_RESET_MS: i32 = 2000;

/// Copy the code block around `button` to the clipboard and flash a confirmation
#[wasm_bindgen(js_name = copyCode)]
pub fn copy_code(button: HtmlElement) {
    let Some(code) = button
        .closest(".code-block")
        .ok()
        .flatten()
        .and_then(|block| block.query_selector("code").ok().flatten())
    else {
        return;
    };
    let text = code.text_content().unwrap_or_default();
    let Some(window) = web_sys::window() else {
        return;
    };
    let promise = window.navigator().clipboard().write_text(&text);

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
            tracing::error!("failed to copy: {err:?}");
            return;
        }
        flash_copied(&window, button);
    });
}

fn flash_copied(window: &web_sys::Window, button: HtmlElement) {
    let original = button.text_content();
    button.set_text_content(Some(COPIED_LABEL));
    button.style().set_property("background", COPIED_BACKGROUND).ok();

    let restore = Closure::once(move || {
        button.set_text_content(original.as_deref());
        button.style().remove_property("background").ok();
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            restore.as_ref().unchecked_ref(),
            COPIED_RESET_MS,
        )
        .ok();
    restore.forget();
}
