use serde::Serialize;

use crate::host::{ElementId, NodeId};

/// The one image currently selected on an editing surface.
///
/// Only the [`Controller`](crate::Controller) creates or clears this; modules
/// see it by shared reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveSelection {
	/// Rendered image element that was activated.
	pub element: ElementId,
	/// Content node the element resolved to.
	pub node: NodeId,
	/// Document offset of the node at activation time, if the host knew it.
	pub index: Option<usize>,
}
