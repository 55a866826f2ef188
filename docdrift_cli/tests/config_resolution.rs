mod common;

use docdrift_core::AnyEmptyResult;

#[test]
fn check_resolves_dot_docdrift_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(
		tmp.path(),
		".docdrift.toml",
		"[source]\nroot = \"src\"\n\n[docs]\nroot = \"wiki\"\n",
	)?;
	common::write(tmp.path(), "src/fuel/client.lua", common::FUEL_CLIENT)?;
	common::write(tmp.path(), "wiki/fuel/client/functions/GetFuel.md", "")?;
	common::write(tmp.path(), "wiki/fuel/client/functions/SetFuel.md", "")?;

	common::docdrift_cmd()
		.arg("check")
		.arg("--verbose")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("Using config: .docdrift.toml"));

	Ok(())
}

#[test]
fn check_resolves_dot_config_docdrift_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(
		tmp.path(),
		".config/docdrift.toml",
		"[docs]\nroot = \"wiki\"\n",
	)?;
	common::write(tmp.path(), "modules/fuel/client.lua", common::FUEL_CLIENT)?;

	// `wiki` does not exist, so the configured root must be the one audited.
	common::docdrift_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains("documentation root `wiki` is inaccessible"));

	Ok(())
}

#[test]
fn docdrift_toml_takes_precedence() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "docdrift.toml", "[docs]\nroot = \"docs/modules\"\n")?;
	common::write(tmp.path(), ".docdrift.toml", "[docs]\nroot = \"hidden\"\n")?;
	common::write(tmp.path(), ".config/docdrift.toml", "[docs]\nroot = \"nested\"\n")?;
	common::clean_project(tmp.path())?;

	common::docdrift_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}

#[test]
fn cli_roots_override_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "docdrift.toml", "[docs]\nroot = \"missing\"\n")?;
	common::clean_project(tmp.path())?;

	common::docdrift_cmd()
		.arg("check")
		.arg("--docs")
		.arg("docs/modules")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}

#[test]
fn malformed_config_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(tmp.path(), "docdrift.toml", "[source\nroot = ")?;

	common::docdrift_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("docdrift::config_parse"));

	Ok(())
}

#[test]
fn invalid_category_pattern_is_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write(
		tmp.path(),
		"docdrift.toml",
		"[categories]\n\"**/[cl_*.lua\" = \"client\"\n",
	)?;

	common::docdrift_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("docdrift::invalid_category_pattern"));

	Ok(())
}
