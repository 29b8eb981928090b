use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::host::StyleMap;
use crate::modules::{ModuleFactory, ModuleOptions};

/// One entry of the configured module list.
#[derive(Clone)]
pub enum ModuleEntry {
	/// A built-in name, or the name of a factory registered with the controller.
	Named(String),
	/// A module implementation supplied directly.
	External(Arc<dyn ModuleFactory>),
}

impl ModuleEntry {
	pub fn name(&self) -> &str {
		match self {
			Self::Named(name) => name,
			Self::External(factory) => factory.name(),
		}
	}
}

impl fmt::Debug for ModuleEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
			Self::External(factory) => f.debug_tuple("External").field(&factory.name()).finish(),
		}
	}
}

impl PartialEq for ModuleEntry {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Named(a), Self::Named(b)) => a == b,
			(Self::External(a), Self::External(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl From<&str> for ModuleEntry {
	fn from(name: &str) -> Self {
		Self::Named(name.to_string())
	}
}

impl Serialize for ModuleEntry {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.serialize_str(self.name())
	}
}

impl<'de> Deserialize<'de> for ModuleEntry {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
		String::deserialize(deserializer).map(Self::Named)
	}
}

/// Controller configuration.
///
/// Keys are camelCase in both TOML and JSON. Keys not listed here are kept in
/// [`Config::extra`] and handed to every module untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
	/// Modules to instantiate on every selection, in order.
	pub modules: Vec<ModuleEntry>,
	/// Style applied verbatim to the overlay element.
	pub overlay_styles: StyleMap,
	/// Style for resize handles.
	pub handle_styles: StyleMap,
	/// Style for the size label.
	pub display_styles: StyleMap,
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

fn styles<const N: usize>(pairs: [(&str, &str); N]) -> StyleMap {
	pairs
		.into_iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect()
}

impl Default for Config {
	fn default() -> Self {
		Self {
			modules: vec!["DisplaySize".into(), "Resize".into()],
			overlay_styles: styles([
				("position", "absolute"),
				("box-sizing", "border-box"),
				("border", "1px dashed #444"),
			]),
			handle_styles: styles([
				("position", "absolute"),
				("height", "12px"),
				("width", "12px"),
				("background-color", "white"),
				("border", "1px solid #777"),
				("box-sizing", "border-box"),
				("opacity", "0.80"),
			]),
			display_styles: styles([
				("position", "absolute"),
				("font", "12px/1.0 Arial, Helvetica, sans-serif"),
				("padding", "4px 8px"),
				("text-align", "center"),
				("background-color", "white"),
				("color", "#333"),
				("border", "1px solid #777"),
				("box-sizing", "border-box"),
				("opacity", "0.80"),
				("cursor", "default"),
			]),
			extra: BTreeMap::new(),
		}
	}
}

impl Config {
	pub fn from_toml_str(raw: &str) -> Result<Self> {
		Ok(toml::from_str(raw)?)
	}

	pub fn from_json_str(raw: &str) -> Result<Self> {
		Ok(serde_json::from_str(raw)?)
	}

	/// Loads a config file, choosing the format by extension (`.json`, anything
	/// else is TOML).
	pub fn load(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path).map_err(|error| Error::Io {
			path: path.to_path_buf(),
			error,
		})?;
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("json") => Self::from_json_str(&raw),
			_ => Self::from_toml_str(&raw),
		}
	}

	/// Appends a directly supplied module implementation.
	pub fn with_module(mut self, factory: Arc<dyn ModuleFactory>) -> Self {
		self.modules.push(ModuleEntry::External(factory));
		self
	}

	/// Options shared by every module instance.
	pub fn module_options(&self) -> ModuleOptions {
		ModuleOptions {
			handle_styles: self.handle_styles.clone(),
			display_styles: self.display_styles.clone(),
			extra: self.extra.clone(),
		}
	}
}
