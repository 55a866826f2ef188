mod common;

use docdrift_core::AnyEmptyResult;

#[test]
fn extract_prints_file_interface() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(
		tmp.path(),
		"modules/fuel/client/main.lua",
		"function Fuel.GetFuel(vehicle) end\n\nRegisterNetEvent('fuel:refill', function() end)\n",
	)?;

	common::docdrift_cmd()
		.current_dir(tmp.path())
		.arg("extract")
		.arg("modules/fuel/client/main.lua")
		.assert()
		.success()
		.stdout(predicates::str::contains("File: modules/fuel/client/main.lua"))
		.stdout(predicates::str::contains("Category: client"))
		.stdout(predicates::str::contains("Functions (1):\n  GetFuel\n"))
		.stdout(predicates::str::contains("Events (1):\n  fuel:refill\n"));

	Ok(())
}

#[test]
fn extract_classifies_relative_to_module() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	// `client` in the module name must not leak into the category.
	common::write(
		tmp.path(),
		"modules/clientmenu/server/main.lua",
		"function Menu.Open(id) end\n",
	)?;

	common::docdrift_cmd()
		.current_dir(tmp.path())
		.arg("extract")
		.arg("modules/clientmenu/server/main.lua")
		.assert()
		.success()
		.stdout(predicates::str::contains("Category: server"));

	Ok(())
}

#[test]
fn extract_resolves_module_under_relative_project_path() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(
		tmp.path(),
		"project/modules/clientmenu/server/main.lua",
		"function Menu.Open(id) end\n",
	)?;

	common::docdrift_cmd()
		.current_dir(tmp.path())
		.arg("extract")
		.arg("--path")
		.arg("project")
		.arg("project/modules/clientmenu/server/main.lua")
		.assert()
		.success()
		.stdout(predicates::str::contains("Category: server"));

	Ok(())
}

#[test]
fn extract_applies_category_overrides() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(
		tmp.path(),
		"docdrift.toml",
		"[categories]\n\"**/cl_*.lua\" = \"client\"\n",
	)?;
	common::write(
		tmp.path(),
		"modules/fuel/cl_fuel.lua",
		"function Fuel.GetFuel(vehicle) end\n",
	)?;

	common::docdrift_cmd()
		.current_dir(tmp.path())
		.arg("extract")
		.arg("modules/fuel/cl_fuel.lua")
		.assert()
		.success()
		.stdout(predicates::str::contains("Category: client"));

	Ok(())
}

#[test]
fn extract_missing_file_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::docdrift_cmd()
		.current_dir(tmp.path())
		.arg("extract")
		.arg("modules/nope.lua")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("docdrift::io_error"));

	Ok(())
}
