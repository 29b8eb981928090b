#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Image selection and overlay lifecycle for rich-text editing surfaces.
//!
//! The host editor owns the document and its rendering. This crate owns one
//! piece of state, the currently selected image, and keeps an overlay element
//! and a set of capability modules in sync with it.
//!
//! # Main Types
//!
//! - [`Controller`] - the selection state machine, one per editing surface
//! - [`EditorHost`] - the narrow API the host editor implements
//! - [`CapabilityModule`] - pluggable behavior attached to a selection
//! - [`Config`] - module list and style maps
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──activate(image)──▶ Selected
//!  ▲                          │ record selection, anchor cursor,
//!  │                          │ create overlay, init modules
//!  │                          │
//!  └──click away / key / input / scroll──┘
//!        destroy modules, remove overlay, clear selection
//! ```
//!
//! Every entry point takes the host as `&mut dyn EditorHost`; the controller
//! never stores it.

/// Configuration: module list, style maps and pass-through options.
pub mod config;
/// Selection/event state machine.
pub mod controller;
/// Error types.
pub mod error;
/// Host events, signals and listener sets.
pub mod event;
/// The host editor seam.
pub mod host;
/// In-memory host used by tests and the replay tool.
#[cfg(any(test, feature = "memory-host"))]
pub mod memory;
/// Capability module interface, lifecycle registry and built-in modules.
pub mod modules;
/// Overlay element ownership and positioning.
pub mod overlay;
/// The active selection entity.
pub mod selection;

pub use config::{Config, ModuleEntry};
pub use controller::{Controller, SelectState};
pub use error::{Error, Result};
pub use event::{HostEvent, KeyCode, PointerEvent, Signal, SignalSet};
pub use host::{EditorHost, ElementId, Mount, NodeId, StyleMap};
pub use imgsel_geometry as geometry;
pub use modules::{
	CapabilityModule, ModuleContext, ModuleFactories, ModuleFactory, ModuleKind, ModuleOptions,
	ModuleRegistry,
};
pub use overlay::OverlayManager;
pub use selection::ActiveSelection;
