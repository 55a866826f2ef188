mod common;

use docdrift_core::AnyEmptyResult;
use serde_json::Value;
use serde_json::json;

#[test]
fn list_prints_interface_map() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "modules/fuel/client/main.lua", common::FUEL_CLIENT)?;
	common::write(
		tmp.path(),
		"modules/fuel/server.lua",
		"RegisterNetEvent('fuel:refill')\n",
	)?;

	common::docdrift_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"fuel\n  client\n    functions: GetFuel, SetFuel\n  server\n    events: fuel:refill\n",
		))
		.stdout(predicates::str::contains("1 module(s), 2 file(s) scanned."));

	Ok(())
}

#[test]
fn list_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "modules/fuel/client/main.lua", common::FUEL_CLIENT)?;

	let output = common::docdrift_cmd()
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let value: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(
		value,
		json!({
			"fuel": {
				"client": {
					"functions": ["GetFuel", "SetFuel"],
					"events": [],
				}
			}
		})
	);

	Ok(())
}

#[test]
fn list_with_missing_source_root() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::docdrift_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No modules found."))
		.stderr(predicates::str::contains("is inaccessible"));

	Ok(())
}
