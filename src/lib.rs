//! qcanvas - decorative canvas animations for the project homepage.
//!
//! The crate holds the browser-independent core: a particle field with
//! pointer interaction and a replayed quantum circuit diagram, both driven by
//! an [`Animator`] through injected [`Surface`] and [`FrameScheduler`]
//! capabilities. The `qcanvas-web` crate binds these to HTML canvases; the
//! [`headless`] module drives them off-screen.

pub mod animator;
pub mod circuit;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod geometry;
pub mod headless;
pub mod particle;
pub mod scheduler;
pub mod surface;
pub mod wave;

pub use animator::{Animator, Scene};
pub use circuit::{CircuitDiagram, GateEvent, GateKind};
pub use color::Rgba;
pub use config::{CircuitConfig, FieldConfig, SceneConfig};
pub use error::{CanvasError, ConfigError};
pub use field::{FieldStats, ParticleField};
pub use geometry::{Point, Size};
pub use scheduler::{FrameCallback, FrameHandle, FrameScheduler};
pub use surface::{Surface, SurfaceProvider};
