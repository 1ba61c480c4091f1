//! Macro preprocessor.
//!
//! Lines of the form `Name(p1,…,pk) = RHS` at the top of the input define
//! textual macros; a macro body may only invoke macros defined earlier in
//! the same input (no forward references, hence no cycles). Expanding a
//! call substitutes each formal parameter with the caller's literal
//! argument text and wraps the whole replacement in one pair of
//! parentheses so it stays syntactically atomic.

use regex::Regex;
use std::collections::{BTreeSet, HashMap};

use crate::error::PresburgerError;
use crate::parser;

const RESERVED: &[&str] = &["AND", "OR", "NOT", "E", "EX", "A", "ALL"];

#[derive(Debug, Clone)]
struct MacroDef {
    params: Vec<String>,
    body_src: String,
}

/// Expand every macro definition and call in `input`, returning the plain
/// formula text that remains after the macro header block.
pub fn process_macros(input: &str) -> Result<String, PresburgerError> {
    let lines = strip_comments_and_blanks(input);
    if lines.is_empty() {
        return Err(PresburgerError::Macro("empty input".to_string()));
    }

    let header_re = Regex::new(r"^\s*([A-Za-z]\w*)\s*\(\s*([^)]*)\)\s*=\s*(.+)$")
        .expect("macro header pattern is a fixed valid regex");

    let mut macros: HashMap<String, MacroDef> = HashMap::new();
    let mut idx = 0usize;
    while idx < lines.len() {
        let Some(caps) = header_re.captures(&lines[idx]) else {
            break;
        };
        let name = caps[1].to_string();
        let params: Vec<String> = caps[2]
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        let rhs = caps[3].trim().to_string();

        if RESERVED.contains(&name.as_str()) {
            return Err(PresburgerError::Macro(format!(
                "macro name '{}' collides with a reserved connective/quantifier",
                name
            )));
        }
        if macros.contains_key(&name) {
            return Err(PresburgerError::Macro(format!(
                "duplicate macro '{}' (line {})",
                name,
                idx + 1
            )));
        }

        let expanded_rhs = expand(&rhs, &macros)?;
        let parsed = parser::parse(&expanded_rhs).map_err(|e| {
            PresburgerError::Macro(format!("inside macro '{}' (line {}): {}", name, idx + 1, e))
        })?;
        let free: BTreeSet<String> = parsed.free_vars();
        let declared: BTreeSet<String> = params.iter().cloned().collect();
        if free != declared {
            return Err(PresburgerError::Macro(format!(
                "free variables {:?} of macro '{}' don't match parameter list {:?} (line {})",
                free,
                name,
                declared,
                idx + 1
            )));
        }

        macros.insert(name, MacroDef { params, body_src: rhs });
        idx += 1;
    }

    if idx >= lines.len() {
        return Err(PresburgerError::Macro(
            "no formula line found after macro definitions".to_string(),
        ));
    }

    let formula_src = lines[idx..].join("\n");
    let expanded = expand(&formula_src, &macros)?;
    log::trace!("macro expansion done: {} macro(s) defined, {} bytes out", macros.len(), expanded.len());
    Ok(expanded)
}

/// Recursively expand every macro call in `src`, textually, to a fixpoint.
fn expand(src: &str, macros: &HashMap<String, MacroDef>) -> Result<String, PresburgerError> {
    let call_re = Regex::new(r"[A-Za-z]\w*\s*\(").expect("call pattern is a fixed valid regex");
    let mut out = String::new();
    let mut i = 0usize;
    loop {
        let Some(m) = call_re.find_at(src, i) else {
            out.push_str(&src[i..]);
            break;
        };
        out.push_str(&src[i..m.start()]);
        let full = m.as_str();
        let open_rel = full.rfind('(').expect("pattern always matches a '('");
        let name = full[..open_rel].trim_end();
        let open_idx = m.start() + open_rel;

        let Some(mac) = macros.get(name) else {
            out.push_str(&src[m.start()..=open_idx]);
            i = open_idx + 1;
            continue;
        };
        let mac = mac.clone();

        let (args, after) = parse_args(src, open_idx)?;
        if args.len() != mac.params.len() {
            return Err(PresburgerError::Macro(format!(
                "macro '{}' expects {} args, got {}",
                name,
                mac.params.len(),
                args.len()
            )));
        }

        let mut subst = mac.body_src.clone();
        for (formal, actual) in mac.params.iter().zip(args.iter()) {
            let word_re = Regex::new(&format!(r"\b{}\b", regex::escape(formal)))
                .expect("escaped literal is always a valid regex");
            subst = word_re.replace_all(&subst, actual.as_str()).into_owned();
        }

        let expanded_body = expand(&subst, macros)?;
        out.push('(');
        out.push_str(&expanded_body);
        out.push(')');
        i = after;
    }
    Ok(out)
}

/// Split `src[open_idx..]` (where `src[open_idx] == '('`) into its
/// top-level comma-separated arguments, respecting nested parentheses.
fn parse_args(src: &str, open_idx: usize) -> Result<(Vec<String>, usize), PresburgerError> {
    let bytes = src.as_bytes();
    let mut depth = 0i32;
    let mut last = open_idx + 1;
    let mut args = Vec::new();
    let mut i = last;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                if depth == 0 {
                    args.push(src[last..i].trim().to_string());
                    return Ok((args, i + 1));
                }
                depth -= 1;
            }
            b',' if depth == 0 => {
                args.push(src[last..i].trim().to_string());
                last = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    Err(PresburgerError::Macro(
        "unbalanced parentheses while reading macro call".to_string(),
    ))
}

fn strip_comments_and_blanks(input: &str) -> Vec<String> {
    input
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| {
            let t = l.trim_start();
            !t.is_empty() && !t.starts_with('#')
        })
        .map(|l| l.to_string())
        .collect()
}
