//! Platform-agnostic page choreography: visibility triggers, frame
//! coalescing, timelines, the glitch loop and the particle field.
//!
//! Nothing here touches a DOM. Hosts plug in through [`StyleSink`],
//! [`GeometrySource`] and [`Surface`].

pub mod cancel;
pub mod choreography;
pub mod clock;
pub mod config;
pub mod constants;
pub mod easing;
pub mod error;
pub mod frame_loop;
pub mod frame_scheduler;
pub mod geometry;
pub mod glitch;
pub mod interaction;
pub mod particles;
pub mod pointer;
pub mod runner;
pub mod scroll;
pub mod target;
pub mod timeline;
pub mod tween;
pub mod visibility;

pub use cancel::*;
pub use choreography::*;
pub use clock::*;
pub use config::*;
pub use constants::*;
pub use easing::*;
pub use error::*;
pub use frame_loop::*;
pub use frame_scheduler::*;
pub use geometry::*;
pub use glitch::*;
pub use interaction::*;
pub use particles::*;
pub use pointer::*;
pub use runner::*;
pub use scroll::*;
pub use target::*;
pub use timeline::*;
pub use tween::*;
pub use visibility::*;
