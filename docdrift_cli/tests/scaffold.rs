mod common;

use docdrift_core::AnyEmptyResult;

#[test]
fn scaffold_creates_stub_pages() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::drifted_project(tmp.path())?;
	let stub = tmp.path().join("docs/modules/fuel/client/functions/SetFuel.md");

	common::docdrift_cmd()
		.arg("scaffold")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Created: docs/modules/fuel/client/functions/SetFuel.md",
		))
		.stdout(predicates::str::contains("Created 1 stub page(s)."));

	let content = std::fs::read_to_string(&stub)?;
	assert!(content.starts_with("---\ntitle: SetFuel\nparent: Functions\ngrand_parent: Fuel\n"));
	assert!(content.contains("# SetFuel"));
	assert!(content.contains("Declared in `modules/fuel/client/main.lua`."));
	assert!(content.contains("SetFuel()"));

	// Only the stale record remains.
	common::docdrift_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains(
			"0 undocumented symbols, 1 stale documentation record",
		));

	Ok(())
}

#[test]
fn scaffold_dry_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::drifted_project(tmp.path())?;

	common::docdrift_cmd()
		.arg("scaffold")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Would create: docs/modules/fuel/client/functions/SetFuel.md",
		));

	assert!(
		!tmp.path()
			.join("docs/modules/fuel/client/functions/SetFuel.md")
			.exists()
	);

	Ok(())
}

#[test]
fn scaffold_uses_configured_template() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::drifted_project(tmp.path())?;
	common::write(
		tmp.path(),
		"docdrift.toml",
		"[scaffold]\ntemplate = \"# {{ name }} ({{ category }} {{ kind }})\\n\"\n",
	)?;

	common::docdrift_cmd()
		.arg("scaffold")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let content = std::fs::read_to_string(
		tmp.path()
			.join("docs/modules/fuel/client/functions/SetFuel.md"),
	)?;
	assert_eq!(content, "# SetFuel (client function)\n");

	Ok(())
}

#[test]
fn scaffold_with_nothing_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::clean_project(tmp.path())?;

	common::docdrift_cmd()
		.arg("scaffold")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No undocumented symbols to scaffold."));

	Ok(())
}

#[test]
fn scaffold_reports_invalid_template() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::drifted_project(tmp.path())?;
	common::write(
		tmp.path(),
		"docdrift.toml",
		"[scaffold]\ntemplate = \"{% if name %}unclosed\"\n",
	)?;

	common::docdrift_cmd()
		.arg("scaffold")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("docdrift::template_render"));

	Ok(())
}
