//! Platform-agnostic core - shared between the browser build and the CLI

pub mod config;
pub mod contact;
pub mod error;
pub mod particle;
pub mod presence;
pub mod radar;
pub mod render;
pub mod reveal;
pub mod scroll;
pub mod sim;
pub mod surface;
pub mod typewriter;

pub use config::{FieldConfig, PresenceConfig, SiteConfig, TypewriterConfig};
pub use contact::{ContactForm, FormStatus, SubmitOutcome};
pub use error::{FxError, Result};
pub use particle::{FieldContext, Particle, ParticleField};
pub use presence::Presence;
pub use sim::{FrameStats, Simulation};
pub use surface::{device_pixels, DrawCommand, Glow, RecordingSurface, Rgba, Surface};
