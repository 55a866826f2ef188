use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::AuditOptions;
use crate::Category;
use crate::InterfaceMap;
use crate::SymbolKind;

/// A throwaway project with a `modules/` source root and a `docs/modules/`
/// documentation root.
pub(crate) struct Project {
	dir: TempDir,
}

impl Project {
	pub(crate) fn new() -> Self {
		let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
		Self { dir }
	}

	pub(crate) fn root(&self) -> &Path {
		self.dir.path()
	}

	pub(crate) fn source_root(&self) -> PathBuf {
		self.root().join("modules")
	}

	pub(crate) fn docs_root(&self) -> PathBuf {
		self.root().join("docs").join("modules")
	}

	pub(crate) fn source(&self, relative: &str, content: &str) -> PathBuf {
		write_file(&self.source_root(), relative, content)
	}

	pub(crate) fn doc(&self, relative: &str, content: &str) -> PathBuf {
		write_file(&self.docs_root(), relative, content)
	}

	pub(crate) fn options(&self) -> AuditOptions {
		AuditOptions::new(self.source_root(), self.docs_root())
	}
}

pub(crate) fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent).unwrap_or_else(|e| panic!("mkdir {}: {e}", parent.display()));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
	path
}

/// Build an interface map from `(module, category, kind, name, origin)`
/// tuples, inserted in the given order.
pub(crate) fn interface_map(entries: &[(&str, Category, SymbolKind, &str, &str)]) -> InterfaceMap {
	let mut map = InterfaceMap::new();
	for (module, category, kind, name, origin) in entries {
		map.module_mut(module).insert(*category, *kind, *name, *origin);
	}
	map
}

pub(crate) const FUEL_CLIENT: &str = r"local Fuel = {}

---@param vehicle number
function Fuel.GetFuel(vehicle)
	return GetVehicleFuelLevel(vehicle)
end

function Fuel.SetFuel(vehicle, amount)
	SetVehicleFuelLevel(vehicle, amount)
end

return Fuel
";

pub(crate) const CONSOLIDATED_FUNCTIONS: &str = "---
title: Functions
parent: Fuel
---

# Fuel Functions

## 🔹 GetFuel

Returns the fuel level of a vehicle.

---

## `Bridge.Fuel.SetFuel(vehicle, amount)`

### Parameters

- `vehicle`
";
