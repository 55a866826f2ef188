#![allow(dead_code)]

use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn docdrift_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("docdrift"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("DOCDRIFT_LOG");
	cmd
}

/// Write `content` to `root/relative`, creating parent directories.
pub fn write(root: &Path, relative: &str, content: &str) -> std::io::Result<PathBuf> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(&path, content)?;
	Ok(path)
}

pub const FUEL_CLIENT: &str = "local Fuel = {}

function Fuel.GetFuel(vehicle)
	return GetVehicleFuelLevel(vehicle)
end

function Fuel.SetFuel(vehicle, amount)
	SetVehicleFuelLevel(vehicle, amount)
end

return Fuel
";

/// A project whose `fuel` module declares `GetFuel` and `SetFuel` while the
/// documentation covers `GetFuel` and the removed `Refuel`.
pub fn drifted_project(root: &Path) -> std::io::Result<()> {
	write(root, "modules/fuel/client/main.lua", FUEL_CLIENT)?;
	write(
		root,
		"docs/modules/fuel/client/functions/GetFuel.md",
		"# GetFuel\n",
	)?;
	write(
		root,
		"docs/modules/fuel/client/functions/Refuel.md",
		"# Refuel\n",
	)?;
	Ok(())
}

/// A project where source and documentation agree.
pub fn clean_project(root: &Path) -> std::io::Result<()> {
	write(root, "modules/fuel/client/main.lua", FUEL_CLIENT)?;
	write(
		root,
		"docs/modules/fuel/client/functions/GetFuel.md",
		"# GetFuel\n",
	)?;
	write(
		root,
		"docs/modules/fuel/client/functions/SetFuel.md",
		"# SetFuel\n",
	)?;
	Ok(())
}
