use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Find and repair drift between Lua module sources and their documentation.",
	long_about = "docdrift audits a documentation tree against the Lua source tree it \
	              describes.\n\nEvery top-level directory of the source root is a module. Its \
	              declared functions and observed events are compared, per client/server/shared \
	              category, with the records found in the documentation root.\n\nQuick \
	              start:\n  docdrift init      Create a docdrift.toml\n  docdrift check     \
	              Report drift (exit 1 when found)\n  docdrift scaffold  Create stub pages for \
	              undocumented symbols\n  docdrift prune     Remove documentation for symbols \
	              that no longer exist"
)]
pub struct DocDriftCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory. Config discovery and relative
	/// roots are resolved against it.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Source root, overriding `[source] root` from the config.
	#[arg(long, global = true)]
	pub source: Option<PathBuf>,

	/// Documentation root, overriding `[docs] root` from the config.
	#[arg(long, global = true)]
	pub docs: Option<PathBuf>,

	/// Enable verbose output and debug logging.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `docdrift.toml` in the project root.
	///
	/// If any supported config file already exists, this command is a no-op
	/// and exits successfully.
	Init,
	/// Audit the documentation against the source.
	///
	/// Reports symbols declared in source but not documented, documentation
	/// for symbols that no longer exist, and whole modules missing on either
	/// side. Exits with status 1 when any drift is found or a root is
	/// inaccessible.
	Check {
		/// Output format. Use `text` for a grouped report, `json` for an issue
		/// list that `prune --input` accepts, or `github` for GitHub Actions
		/// annotations.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List the interface extracted from the source tree.
	///
	/// Prints every module with its functions and events per category.
	List {
		/// Output format for the interface map.
		#[arg(long, value_enum, default_value_t = ListOutputFormat::Text)]
		format: ListOutputFormat,
	},
	/// Print the interface extracted from a single source file.
	///
	/// Shows the inferred category and the functions and events found. Useful
	/// for checking why a symbol is or is not picked up.
	Extract {
		/// The source file to extract.
		file: PathBuf,
	},
	/// Remove documentation records for symbols missing from source.
	///
	/// File markers are deleted and sections of consolidated pages are cut
	/// out. Only `documented_not_in_source` findings are acted on.
	Prune {
		/// Show what would be removed without touching any file.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Read discrepancies from a JSON issue list (as written by `check
		/// --format json`) instead of running a fresh audit.
		#[arg(long)]
		input: Option<PathBuf>,
	},
	/// Create stub pages for symbols that have no documentation.
	///
	/// Pages are written to `<docs>/<module>/<category>/<functions|events>/`
	/// from the `[scaffold] template` in the config or the built-in template.
	/// Existing files are never overwritten.
	Scaffold {
		/// List the pages that would be created without writing them.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable report grouped by module.
	Text,
	/// JSON report with a flat list of discrepancies.
	Json,
	/// GitHub Actions annotation format. Emits `::warning` annotations that
	/// appear inline on pull request diffs.
	Github,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListOutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
