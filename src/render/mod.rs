//! Frame rendering: configuration, projection dispatch, and the animation
//! driver.
//!
//! A [`FrameRenderer`] replays an observation sequence one frame at a time
//! through the [`Projection`] selected by the configured [`RenderMode`],
//! issuing all output through the [`Canvas`](crate::canvas::Canvas)
//! capability.

mod config;
mod frame;
mod mode;

pub use config::{ConfigError, RenderConfig};
pub use frame::FrameRenderer;
pub use mode::{
    AeSideProjection, AeUpProjection, GlobeSideProjection, GlobeUpProjection, ParseModeError,
    Projection, RenderMode,
};
