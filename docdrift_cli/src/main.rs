use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use docdrift_cli::Commands;
use docdrift_cli::DocDriftCli;
use docdrift_cli::ListOutputFormat;
use docdrift_cli::OutputFormat;
use docdrift_core::AuditOptions;
use docdrift_core::AuditReport;
use docdrift_core::DocDriftConfig;
use docdrift_core::DocDriftError;
use docdrift_core::InterfaceMap;
use docdrift_core::SourceUnit;
use docdrift_core::apply_prune;
use docdrift_core::load_issue_list;
use docdrift_core::make_relative;
use docdrift_core::plan_prune;
use docdrift_core::plan_scaffold;
use docdrift_core::render_github;
use docdrift_core::render_json;
use docdrift_core::render_text;
use docdrift_core::run_audit;
use docdrift_core::scan_sources;
use docdrift_core::write_scaffold;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV_VAR: &str = "DOCDRIFT_LOG";

const SAMPLE_CONFIG: &str = r##"# docdrift configuration

# Source tree: every top-level directory is a module.
[source]
root = "modules"
extensions = ["lua"]

# Documentation tree: <module>/<client|server|shared>/functions/<Name>.md
# and/or consolidated <module>/<category>/functions.md pages.
[docs]
root = "docs/modules"
layout = "auto" # "files", "consolidated" or "auto"

# Gitignore-style patterns excluded from both trees.
# [exclude]
# patterns = ["**/locales/"]

# Force the category of files the path heuristic gets wrong.
# [categories]
# "**/cl_*.lua" = "client"
# "**/sv_*.lua" = "server"

# Template for `docdrift scaffold` stub pages (minijinja syntax).
# [scaffold]
# template = "# {{ name }}\n"
"##;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = DocDriftCli::parse();

	// Respect NO_COLOR env var, --no-color flag and non-terminal output.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose);

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Check { format }) => run_check(&args, *format),
		Some(Commands::List { format }) => run_list(&args, *format),
		Some(Commands::Extract { file }) => run_extract(&args, file),
		Some(Commands::Prune { dry_run, input }) => run_prune(&args, *dry_run, input.as_deref()),
		Some(Commands::Scaffold { dry_run }) => run_scaffold(&args, *dry_run),
		None => {
			eprintln!("No subcommand specified. Run `docdrift --help` for usage.");
			process::exit(2);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<DocDriftError>() {
			Ok(docdrift_err) => {
				let report: miette::Report = (*docdrift_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `DOCDRIFT_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.without_time()
		.with_ansi(color_enabled())
		.try_init();
}

fn resolve_root(args: &DocDriftCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load the config (or defaults) and build audit options from it and the
/// global flags.
fn load_options(
	args: &DocDriftCli,
) -> Result<(PathBuf, DocDriftConfig, AuditOptions), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = DocDriftConfig::load(&root)?.unwrap_or_default();
	let options = AuditOptions::from_config(
		&root,
		Some(&config),
		args.source.as_deref(),
		args.docs.as_deref(),
	)?;

	if args.verbose {
		match DocDriftConfig::resolve_path(&root) {
			Some(path) => eprintln!("Using config: {}", make_relative(&path, &root).display()),
			None => eprintln!("No config file found, using defaults."),
		}
	}

	Ok((root, config, options))
}

fn run_init(args: &DocDriftCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = DocDriftConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("docdrift.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created docdrift.toml");
	println!();
	println!("Next steps:");
	println!("  1. Point [source] root and [docs] root at your trees");
	println!("  2. Run `docdrift check` to see what has drifted");
	println!("  3. Run `docdrift scaffold` or `docdrift prune` to repair it");

	Ok(())
}

fn run_check(args: &DocDriftCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let (root, _config, options) = load_options(args)?;
	let audit = run_audit(&options)?;
	let report = audit.report.relative_to(&root);

	match format {
		OutputFormat::Json => {
			println!("{}", render_json(&report)?);
		}
		OutputFormat::Github => {
			print!("{}", render_github(&report));
			eprintln!("{}", report.summary());
		}
		OutputFormat::Text => {
			print!("{}", render_text(&report));
			println!();
			print_status(&report);
		}
	}

	if !report.is_clean() {
		process::exit(1);
	}

	Ok(())
}

fn print_status(report: &AuditReport) {
	if report.is_clean() {
		println!(
			"{} documentation matches source.",
			colored!("Check passed:", green)
		);
	} else if !report.compared {
		println!(
			"{} a root is inaccessible, nothing was compared.",
			colored!("Check failed:", red)
		);
	} else {
		println!(
			"{} run `docdrift scaffold` to add missing pages or `docdrift prune` to remove stale \
			 ones.",
			colored!("Check failed:", red)
		);
	}
}

fn run_list(args: &DocDriftCli, format: ListOutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let (_root, _config, options) = load_options(args)?;
	let scan = scan_sources(&options.source_root, &options.source)?;

	match format {
		ListOutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&interface_json(&scan.interfaces))?);
		}
		ListOutputFormat::Text => {
			if scan.interfaces.is_empty() {
				println!("No modules found.");
			}
			for module in scan.interfaces.modules() {
				println!("{}", colored!(module.name, bold));
				for (category, interface) in &module.categories {
					println!("  {category}");
					let functions: Vec<&str> = interface.functions.names().collect();
					let events: Vec<&str> = interface.events.names().collect();
					if !functions.is_empty() {
						println!("    functions: {}", functions.join(", "));
					}
					if !events.is_empty() {
						println!("    events: {}", events.join(", "));
					}
				}
			}
			println!();
			println!(
				"{} module(s), {} file(s) scanned.",
				scan.interfaces.len(),
				scan.files_scanned
			);
		}
	}

	for warning in &scan.warnings {
		eprintln!("{} {warning}", colored!("warning:", yellow));
	}

	Ok(())
}

/// `{ module: { category: { functions: [...], events: [...] } } }`
fn interface_json(map: &InterfaceMap) -> serde_json::Value {
	let mut modules = serde_json::Map::new();

	for module in map.modules() {
		let mut categories = serde_json::Map::new();
		for (category, interface) in &module.categories {
			categories.insert(
				category.to_string(),
				serde_json::json!({
					"functions": interface.functions.names().collect::<Vec<_>>(),
					"events": interface.events.names().collect::<Vec<_>>(),
				}),
			);
		}
		modules.insert(module.name.clone(), serde_json::Value::Object(categories));
	}

	serde_json::Value::Object(modules)
}

fn run_extract(args: &DocDriftCli, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let (_root, _config, options) = load_options(args)?;
	// `--path` may be relative to the cwd, so compare canonical paths.
	let cwd = std::env::current_dir()?.canonicalize()?;
	let absolute = cwd.join(file).canonicalize().map_err(DocDriftError::from)?;
	let content = std::fs::read_to_string(&absolute).map_err(DocDriftError::from)?;
	let source_root = options
		.source_root
		.canonicalize()
		.unwrap_or_else(|_| options.source_root.clone());

	// Classify relative to the owning module when the file is inside the
	// source root.
	let module_dir = absolute
		.strip_prefix(&source_root)
		.ok()
		.and_then(|relative| relative.components().next())
		.map_or_else(|| cwd.clone(), |module| source_root.join(module));

	let unit = SourceUnit::new(
		&module_dir,
		absolute,
		content,
		&options.source.category_overrides,
	);
	let extracted = unit.extract();

	println!("{} {}", colored!("File:", bold), file.display());
	println!("{} {}", colored!("Category:", bold), unit.category);
	println!(
		"{}",
		colored!(format!("Functions ({}):", extracted.functions.len()), bold)
	);
	for name in &extracted.functions {
		println!("  {name}");
	}
	println!(
		"{}",
		colored!(format!("Events ({}):", extracted.events.len()), bold)
	);
	for name in &extracted.events {
		println!("  {name}");
	}

	Ok(())
}

fn run_prune(
	args: &DocDriftCli,
	dry_run: bool,
	input: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let (root, _config, options) = load_options(args)?;

	let discrepancies = if let Some(input) = input {
		load_issue_list(&root.join(input), &root)?
	} else {
		let audit = run_audit(&options)?;
		if !audit.report.compared {
			print_root_warnings(&audit.report, &root);
			return Err("cannot prune: a root is inaccessible".into());
		}
		audit.report.discrepancies
	};

	let plan = plan_prune(&discrepancies, &options.docs_root)?;
	if plan.is_empty() {
		println!("Nothing to prune.");
		return Ok(());
	}

	if dry_run {
		for path in &plan.deletions {
			println!("Would delete: {}", make_relative(path, &root).display());
		}
		for (path, rewrite) in &plan.rewrites {
			println!(
				"Would update: {} (removes {})",
				make_relative(path, &root).display(),
				rewrite.removed.join(", ")
			);
			print_diff(&rewrite.original, &rewrite.updated);
		}
		println!();
		println!(
			"Dry run: {} documentation record(s) would be removed.",
			plan.removed_count()
		);
		return Ok(());
	}

	let result = apply_prune(&plan)?;
	for path in &result.deleted_files {
		println!("Deleted: {}", make_relative(path, &root).display());
	}
	for path in &result.rewritten_files {
		println!("Updated: {}", make_relative(path, &root).display());
	}
	println!();
	println!(
		"{} {} documentation record(s).",
		colored!("Removed", green),
		plan.removed_count()
	);

	Ok(())
}

fn run_scaffold(args: &DocDriftCli, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
	let (root, config, options) = load_options(args)?;
	let audit = run_audit(&options)?;
	if !audit.report.compared {
		print_root_warnings(&audit.report, &root);
		return Err("cannot scaffold: a root is inaccessible".into());
	}

	let plan = plan_scaffold(
		&audit.report.discrepancies,
		&options.docs_root,
		&root,
		config.scaffold.template.as_deref(),
	)?;

	if args.verbose {
		for path in &plan.skipped {
			eprintln!("Skipped existing: {}", make_relative(path, &root).display());
		}
	}
	for rejected in &plan.rejected {
		eprintln!(
			"{} {} `{}` in {}/{} is not a valid page name, skipped.",
			colored!("warning:", yellow),
			rejected.kind,
			rejected.name,
			rejected.module,
			rejected.category
		);
	}

	if plan.pages.is_empty() {
		println!("No undocumented symbols to scaffold.");
		return Ok(());
	}

	if dry_run {
		for page in &plan.pages {
			println!("Would create: {}", make_relative(&page.path, &root).display());
		}
		println!();
		println!("Dry run: {} stub page(s) would be created.", plan.pages.len());
		return Ok(());
	}

	let written = write_scaffold(&plan)?;
	for path in &written {
		println!("Created: {}", make_relative(path, &root).display());
	}
	println!();
	println!(
		"{} {} stub page(s).",
		colored!("Created", green),
		written.len()
	);

	Ok(())
}

fn print_root_warnings(report: &AuditReport, root: &Path) {
	for warning in report.relative_to(root).warnings.iter().filter(|w| w.is_terminal()) {
		eprintln!("{} {warning}", colored!("error:", red));
	}
}

fn print_diff(current: &str, updated: &str) {
	let diff = TextDiff::from_lines(current, updated);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}
}
