//! Foundation types for OpenUrbanMap.
//!
//! This crate defines the single persisted [`Document`] and the read-only
//! views used to walk its features. Every other OpenUrbanMap crate depends on
//! `oum-types`.
//!
//! # Key Types
//!
//! - [`Document`]: Root object holding `lines` and `trafficLights`
//! - [`LineFeature`]: Borrowed view over one stored road line
//! - [`TrafficLight`]: Borrowed view over one stored traffic light
//! - [`PropertyValue`]: Scalar lens over open property bags
//! - [`Coordinate`] / [`Geometry`]: Longitude/latitude pairs and typed geometry
//! - [`MapConfig`]: Presentation settings for the drawing tool
//!
//! The document keeps the raw JSON it was loaded from. Features carry no
//! identity of their own, and unknown keys survive a save/load cycle
//! untouched.

pub mod config;
pub mod document;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod property;

pub use config::{Bounds, MapConfig};
pub use document::{Document, LINES_KEY, TRAFFIC_LIGHTS_KEY};
pub use error::{TypeError, TypeResult};
pub use feature::{LineFeature, NewLine, TrafficLight};
pub use geometry::{Coordinate, Geometry};
pub use property::{keys, Properties, PropertyValue, LINE_ATTRIBUTES};
