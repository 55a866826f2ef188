mod common;

use docdrift_core::AnyEmptyResult;
use docdrift_core::DocDriftConfig;
use docdrift_core::DocLayout;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::docdrift_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created docdrift.toml"));

	let content = std::fs::read_to_string(tmp.path().join("docdrift.toml"))?;
	let config = DocDriftConfig::parse(&content)?;
	assert_eq!(config.source.root, std::path::PathBuf::from("modules"));
	assert_eq!(config.docs.root, std::path::PathBuf::from("docs/modules"));
	assert_eq!(config.docs.layout, DocLayout::Auto);
	assert!(config.categories.is_empty());

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config_path = common::write(tmp.path(), ".config/docdrift.toml", "existing config")?;

	common::docdrift_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&config_path)?, "existing config");
	assert!(!tmp.path().join("docdrift.toml").exists());

	Ok(())
}

#[test]
fn init_then_check_on_empty_trees() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("modules"))?;
	std::fs::create_dir_all(tmp.path().join("docs/modules"))?;

	common::docdrift_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::docdrift_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Audited 0 source module(s) (0 file(s)) against 0 documented module(s) (0 record(s)).",
		));

	Ok(())
}
