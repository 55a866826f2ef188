//! Lexical extraction of declared functions and observed events from Lua
//! source text, and of documented names from consolidated documentation
//! pages.
//!
//! This is pattern matching over loosely structured text, not a parser. It
//! recognizes the declaration idioms used by the scanned code bases and
//! nothing more: comments, long strings and nested scopes are not
//! understood.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::SymbolKind;

/// Words that the generic declaration patterns can capture but which are
/// never function names.
pub const EXCLUDED_KEYWORDS: [&str; 10] = [
	"return", "end", "if", "then", "else", "for", "while", "do", "local", "function",
];

/// Calls whose first string literal argument names an event.
pub const EVENT_FUNCTIONS: [&str; 5] = [
	"RegisterNetEvent",
	"AddEventHandler",
	"TriggerEvent",
	"TriggerServerEvent",
	"TriggerClientEvent",
];

/// Shortest name kept by function extraction, in characters.
const MIN_NAME_LEN: usize = 2;

/// `function Module.Name(`, `function Module:Name(` and deeper tables such
/// as `function Bridge.Fuel.Get(`.
static QUALIFIED_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\bfunction\s+(?:\w+[.:])+(\w+)\s*\(").expect("valid qualified declaration regex")
});

/// `Module.Name = function(`.
static QUALIFIED_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?:\w+\.)+(\w+)\s*=\s*function\s*\(").expect("valid qualified assignment regex")
});

/// `function Name(`, which also covers `local function Name(`.
static BARE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"\bfunction\s+(\w+)\s*\(").expect("valid bare declaration regex")
});

/// `Name = function(`.
static BARE_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(\w+)\s*=\s*function\s*\(").expect("valid bare assignment regex")
});

static EVENT_CALL: LazyLock<Regex> = LazyLock::new(|| {
	let pattern = format!(
		r#"\b(?:{})\s*\(\s*["']([^"']+)["']\s*[,)]"#,
		EVENT_FUNCTIONS.join("|")
	);
	Regex::new(&pattern).expect("valid event call regex")
});

/// A level-2 markdown heading. Leading decoration (emoji, backticks) is
/// skipped; the first token after it is captured.
static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"(?m)^##[ \t]+(?:[^\w\s]+[ \t]*)*(\w[^\s`'"()]*)"#)
		.expect("valid section heading regex")
});

/// The declared interface of a single piece of source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedInterface {
	pub functions: BTreeSet<String>,
	pub events: BTreeSet<String>,
}

impl ExtractedInterface {
	pub fn is_empty(&self) -> bool {
		self.functions.is_empty() && self.events.is_empty()
	}
}

/// Extract the function and event names declared in `content`.
pub fn extract_interface(content: &str) -> ExtractedInterface {
	ExtractedInterface {
		functions: extract_functions(content),
		events: extract_events(content),
	}
}

/// Apply every declaration pattern to `content` and return the union of
/// captured names, minus keywords and one-character noise.
pub fn extract_functions(content: &str) -> BTreeSet<String> {
	let patterns: [&Regex; 4] = [
		&QUALIFIED_DECLARATION,
		&QUALIFIED_ASSIGNMENT,
		&BARE_DECLARATION,
		&BARE_ASSIGNMENT,
	];

	patterns
		.into_iter()
		.flat_map(|pattern| capture_names(pattern, content))
		.filter(|name| is_function_name(name))
		.map(str::to_string)
		.collect()
}

/// Return the event names registered, handled or triggered in `content`.
pub fn extract_events(content: &str) -> BTreeSet<String> {
	capture_names(&EVENT_CALL, content)
		.map(str::to_string)
		.collect()
}

fn capture_names<'a>(pattern: &'a Regex, content: &'a str) -> impl Iterator<Item = &'a str> {
	pattern
		.captures_iter(content)
		.filter_map(|captures| captures.get(1))
		.map(|name| name.as_str())
}

fn is_function_name(name: &str) -> bool {
	name.chars().count() >= MIN_NAME_LEN && !EXCLUDED_KEYWORDS.contains(&name)
}

/// A documented name found as a section heading in a consolidated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading {
	pub name: String,
	/// 1-indexed line of the heading.
	pub line: usize,
}

/// Extract the documented names of a consolidated page, one per level-2
/// heading, in document order.
///
/// Function headings may be qualified (`Bridge.Fuel.Get`) or carry a call
/// signature; the last identifier segment is the name. Event headings are
/// taken verbatim since event names contain `:` separators.
pub fn extract_section_headings(content: &str, kind: SymbolKind) -> Vec<SectionHeading> {
	let mut headings = Vec::new();
	let mut line = 1;
	let mut counted_to = 0;

	for captures in SECTION_HEADING.captures_iter(content) {
		let (Some(whole), Some(token)) = (captures.get(0), captures.get(1)) else {
			continue;
		};
		line += content[counted_to..whole.start()].matches('\n').count();
		counted_to = whole.start();

		let Some(name) = heading_name(token.as_str(), kind) else {
			continue;
		};
		headings.push(SectionHeading {
			name: name.to_string(),
			line,
		});
	}

	headings
}

fn heading_name(token: &str, kind: SymbolKind) -> Option<&str> {
	let name = match kind {
		SymbolKind::Function => {
			let member = token.rsplit(['.', ':']).next().unwrap_or(token);
			member
				.split(|c: char| !(c.is_alphanumeric() || c == '_'))
				.next()
				.unwrap_or_default()
		}
		SymbolKind::Event => token.trim_end_matches([',', ';', '.', ':']),
	};

	(!name.is_empty()).then_some(name)
}
