use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DocDriftError {
	#[error(transparent)]
	#[diagnostic(code(docdrift::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(docdrift::config_parse),
		help("check that docdrift.toml is valid TOML with [source], [docs] and/or [exclude] sections")
	)]
	ConfigParse(String),

	#[error("invalid category override pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(docdrift::invalid_category_pattern),
		help("keys under [categories] must be glob patterns relative to a module directory")
	)]
	InvalidCategoryPattern { pattern: String, reason: String },

	#[error("unknown category: `{0}`")]
	#[diagnostic(
		code(docdrift::unknown_category),
		help("available categories: client, server, shared")
	)]
	UnknownCategory(String),

	#[error("unknown symbol kind: `{0}`")]
	#[diagnostic(
		code(docdrift::unknown_kind),
		help("available kinds: function, event")
	)]
	UnknownKind(String),

	#[error("failed to read issue list `{path}`: {reason}")]
	#[diagnostic(
		code(docdrift::issue_list),
		help("generate an issue list with `docdrift check --format json > issues.json`")
	)]
	IssueList { path: String, reason: String },

	#[error("scaffold template rendering failed: {0}")]
	#[diagnostic(
		code(docdrift::template_render),
		help("check the [scaffold] template in docdrift.toml for minijinja syntax errors")
	)]
	TemplateRender(String),

	#[error("refusing to modify `{path}`: it is outside the documentation root `{root}`")]
	#[diagnostic(
		code(docdrift::outside_docs_root),
		help("issue lists are tied to the documentation root they were generated for")
	)]
	OutsideDocsRoot { path: String, root: String },
}

pub type DocDriftResult<T> = Result<T, DocDriftError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
