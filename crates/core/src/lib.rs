//! gridfeed core
//!
//! Layout arithmetic, feed growth and scroll/resize coordination for the
//! infinite-scroll box grid. Nothing in this crate touches the DOM: the
//! [`GridController`] measures and mutates its view through [`ViewHost`],
//! so the same logic drives the browser front end and the test harness.

pub mod cell;
pub mod config;
pub mod controller;
pub mod error;
pub mod feed;
pub mod host;
pub mod layout;
pub mod resize;
pub mod scroll;

pub use cell::{Cell, HexColor};
pub use config::{FeedConfig, GridConfig, LayoutConfig, ResizeConfig};
pub use controller::GridController;
pub use error::ConfigError;
pub use feed::BoxFeed;
pub use host::{Deferred, GridView, ViewHost};
pub use layout::{container_height, fill_target, Capacity};
pub use resize::{ResizePipeline, Wake};
pub use scroll::{GrowthState, ScrollCoordinator, ScrollMetrics};
