//! Math span scanner.
//!
//! Finds `$$...$$` (block) and `$...$` (inline) spans in free text, left to
//! right, in a single pass. The block form wins whenever `$$` opens a span.

pub mod lexer;

use crate::ast::MathSpan;
use lexer::Token;
use nom::IResult;
use serde::Deserialize;

/// Configuration for scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Treat `\$` as literal text instead of a delimiter (default: false).
    pub skip_escaped_dollars: bool,
}

/// Scan text for math spans using the default configuration.
pub fn scan(text: &str) -> Vec<MathSpan> {
    scan_with_config(text, &ScanConfig::default())
}

/// Scan text for math spans.
///
/// Never fails: text without delimiters yields an empty list.
pub fn scan_with_config(text: &str, config: &ScanConfig) -> Vec<MathSpan> {
    let lex: fn(&str) -> IResult<&str, Token> = if config.skip_escaped_dollars {
        lexer::math_token_unescaped
    } else {
        lexer::math_token
    };

    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find('$') {
        let start = pos + found;

        if config.skip_escaped_dollars && lexer::is_escaped(text, start) {
            pos = start + 1;
            continue;
        }

        match lex(&text[start..]) {
            Ok((rest, token)) => {
                let (raw_latex, is_block) = match token {
                    Token::DisplayMath(content) => (content, true),
                    Token::InlineMath(content) => (content, false),
                };
                spans.push(MathSpan {
                    raw_latex: raw_latex.to_string(),
                    is_block,
                    source_order: spans.len(),
                    offset: start,
                });
                pos = text.len() - rest.len();
            }
            // Unmatched `$`: resume right after it
            Err(_) => pos = start + 1,
        }
    }

    tracing::debug!(spans = spans.len(), "scanned text for math");
    spans
}
