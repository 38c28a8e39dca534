//! Classification rules for Lua source
//!
//! Rules are compiled once and tried in priority order (earlier in the
//! list = higher priority). The full-buffer set includes the multi-line
//! long-bracket forms; the line-scoped set only carries constructs that
//! are resolvable without cross-line context.

use regex::Regex;

/// Semantic classes the highlighter can assign to a span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Keyword,
    Builtin,
    String,
    Comment,
    Number,
    Operator,
    Default,
}

/// A classified byte range, produced during a pass and immediately
/// consumed to issue color commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub class: TokenClass,
}

/// The 22 reserved Lua keywords
pub const KEYWORDS: [&str; 22] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for",
    "function", "goto", "if", "in", "local", "nil", "not", "or",
    "repeat", "return", "then", "true", "until", "while",
];

/// Standard library tables and global functions
pub const BUILTINS: [&str; 34] = [
    "print", "pairs", "ipairs", "next", "type", "tostring", "tonumber",
    "setmetatable", "getmetatable", "rawget", "rawset", "rawequal",
    "select", "unpack", "pack", "pcall", "xpcall", "error", "assert",
    "collectgarbage", "dofile", "loadfile", "load", "loadstring",
    "require", "module", "string", "table", "math", "io", "os",
    "coroutine", "debug", "package",
];

const STRING_DOUBLE: &str = r#""[^"\\]*(\\.[^"\\]*)*""#;
const STRING_SINGLE: &str = r"'[^'\\]*(\\.[^'\\]*)*'";
const STRING_LONG: &str = r"\[\[[\s\S]*?\]\]";
const COMMENT_LONG: &str = r"--\[\[[\s\S]*?\]\]";
const COMMENT_LINE: &str = r"--[^\r\n]*";
const NUMBER_HEX: &str = r"\b0x[0-9a-fA-F]+\b";
const NUMBER_DECIMAL: &str = r"\b\d+\.?\d*\b";
const OPERATOR: &str = r"[+\-*/%^#=<>~]";
const DOTS: &str = r"\.\.\.?";

/// A compiled classification rule
pub struct Rule {
    /// Name for debugging
    pub name: &'static str,
    pub pattern: Regex,
    pub class: TokenClass,
}

impl Rule {
    /// Compile a rule; a pattern the engine rejects yields None and the
    /// rule is dropped from the set rather than aborting anything
    fn new(name: &'static str, pattern: &str, class: TokenClass) -> Option<Self> {
        Regex::new(pattern).ok().map(|regex| Self {
            name,
            pattern: regex,
            class,
        })
    }

    /// Earliest match at or after `pos`
    ///
    /// Uses find_at so word boundaries see the character preceding `pos`.
    pub fn find_from(&self, text: &str, pos: usize) -> Option<(usize, usize)> {
        self.pattern
            .find_at(text, pos)
            .map(|m| (m.start(), m.end()))
    }
}

fn word_bounded(names: &[&str]) -> String {
    format!(r"\b(?:{})\b", names.join("|"))
}

/// Rules for a full-buffer pass, highest priority first
pub fn full_rules() -> Vec<Rule> {
    [
        Rule::new("string_double", STRING_DOUBLE, TokenClass::String),
        Rule::new("string_single", STRING_SINGLE, TokenClass::String),
        Rule::new("string_long", STRING_LONG, TokenClass::String),
        Rule::new("comment_long", COMMENT_LONG, TokenClass::Comment),
        Rule::new("comment_line", COMMENT_LINE, TokenClass::Comment),
        Rule::new("number_hex", NUMBER_HEX, TokenClass::Number),
        Rule::new("number_decimal", NUMBER_DECIMAL, TokenClass::Number),
        Rule::new("keyword", &word_bounded(&KEYWORDS), TokenClass::Keyword),
        Rule::new("builtin", &word_bounded(&BUILTINS), TokenClass::Builtin),
        Rule::new("operator", OPERATOR, TokenClass::Operator),
        Rule::new("dots", DOTS, TokenClass::Operator),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Rules for a single-line pass
///
/// Long-bracket strings and comments need cross-line context and are not
/// attempted here; the concat/ellipsis rule is also full-buffer only,
/// matching the reference line pass.
pub fn line_rules() -> Vec<Rule> {
    [
        Rule::new("string_double", STRING_DOUBLE, TokenClass::String),
        Rule::new("string_single", STRING_SINGLE, TokenClass::String),
        Rule::new("comment_line", COMMENT_LINE, TokenClass::Comment),
        Rule::new("number_hex", NUMBER_HEX, TokenClass::Number),
        Rule::new("number_decimal", NUMBER_DECIMAL, TokenClass::Number),
        Rule::new("keyword", &word_bounded(&KEYWORDS), TokenClass::Keyword),
        Rule::new("builtin", &word_bounded(&BUILTINS), TokenClass::Builtin),
        Rule::new("operator", OPERATOR, TokenClass::Operator),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Classify `text` with `rules`
///
/// Single pass: at each position the earliest match across all rules
/// wins, ties broken by rule priority, and the matched span is consumed
/// so lower-priority rules never rescan inside it. Unmatched bytes keep
/// the default class (they are not reported).
pub fn scan(rules: &[Rule], text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    // Each rule's earliest match at or after the scan position
    let mut pending: Vec<Option<(usize, usize)>> =
        rules.iter().map(|r| r.find_from(text, 0)).collect();
    let mut pos = 0;

    while pos < text.len() {
        let mut best: Option<(usize, usize, usize)> = None;
        for (idx, rule) in rules.iter().enumerate() {
            if let Some((start, _)) = pending[idx] {
                if start < pos {
                    pending[idx] = rule.find_from(text, pos);
                }
            }
            if let Some((start, end)) = pending[idx] {
                let better = match best {
                    None => true,
                    Some((best_start, _, _)) => start < best_start,
                };
                if better {
                    best = Some((start, end, idx));
                }
            }
        }

        let Some((start, end, idx)) = best else {
            break;
        };
        if end <= start {
            // A zero-width match would never terminate; none of the
            // built-in patterns can produce one, but step past anyway
            pos = start + 1;
            while pos < text.len() && !text.is_char_boundary(pos) {
                pos += 1;
            }
            continue;
        }

        spans.push(Span {
            start,
            end,
            class: rules[idx].class,
        });
        pos = end;
        pending[idx] = rules[idx].find_from(text, pos);
    }

    spans
}
