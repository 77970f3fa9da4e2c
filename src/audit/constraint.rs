use std::cmp::Ordering;

use tracing::debug;

use super::version;

/// Comparison operator for a single version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Matches every version (empty range or `*`).
    Any,
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

/// A single comparison: operator plus the version it compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub op: Op,
    pub version: String,
}

impl Constraint {
    pub fn any() -> Self {
        Self {
            op: Op::Any,
            version: String::new(),
        }
    }

    /// Parses a single comparison expression like `>=1.2.3`, `=1.0`, `v2.1`
    /// or `*`. Returns `None` when no version text remains after stripping
    /// the operator.
    pub fn parse(expr: &str) -> Option<Self> {
        let expr = expr.trim();
        if expr.is_empty() || expr == "*" {
            return Some(Self::any());
        }

        // Longest operators first so `<` does not swallow `<=`.
        const OPS: [(&str, Op); 5] = [
            (">=", Op::Ge),
            ("<=", Op::Le),
            (">", Op::Gt),
            ("<", Op::Lt),
            ("=", Op::Eq),
        ];

        let (op, rest) = OPS
            .iter()
            .find_map(|(token, op)| expr.strip_prefix(token).map(|rest| (*op, rest)))
            .unwrap_or((Op::Eq, expr));

        let version = rest.trim_start().trim_start_matches('v');
        if version.is_empty() {
            return None;
        }

        Some(Self {
            op,
            version: version.to_string(),
        })
    }

    /// Tests whether `candidate` satisfies this constraint.
    pub fn matches(&self, candidate: &str) -> bool {
        if self.op == Op::Any {
            return true;
        }
        match version::compare(candidate, &self.version) {
            Ordering::Equal => matches!(self.op, Op::Eq | Op::Ge | Op::Le),
            Ordering::Greater => matches!(self.op, Op::Gt | Op::Ge),
            Ordering::Less => matches!(self.op, Op::Lt | Op::Le),
        }
    }
}

/// An OR-combination of constraints: a version satisfies the set if it
/// satisfies any member. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    /// Parses a compound range: sides separated by `||`, each parsed
    /// independently. Sides that fail to parse are dropped; if every side
    /// fails (or the input is blank) the set degrades to match-all.
    ///
    /// The degrade is intentional: for a compromise audit, over-reporting
    /// on a mistyped range beats silently skipping the record.
    pub fn parse(range: &str) -> Self {
        let mut constraints = Vec::new();

        for side in range.split("||") {
            match Constraint::parse(side) {
                Some(c) => constraints.push(c),
                None => debug!(side = side.trim(), "dropping unparseable range side"),
            }
        }

        if constraints.is_empty() {
            debug!(range, "range yielded no constraints, matching all versions");
            constraints.push(Constraint::any());
        }

        Self { constraints }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.constraints.iter().any(|c| c.matches(candidate))
    }

    /// True when the set is a single match-all constraint.
    pub fn is_any(&self) -> bool {
        self.constraints.len() == 1 && self.constraints[0].op == Op::Any
    }
}

/// Normalizes a raw range before parsing: collapses whitespace right after
/// operator tokens and strips a bare leading `=` so `=1.2.3` and `1.2.3`
/// behave identically.
pub fn normalize_range(range: &str) -> String {
    let trimmed = range.trim();

    let stripped = match trimmed.strip_prefix('=') {
        // `=1.2.3` but not `==` or a second operator char
        Some(rest) if !rest.starts_with(['=', '<', '>']) => rest,
        _ => trimmed,
    };

    // `>= 1.2.3` -> `>=1.2.3`, applied per OR side
    stripped
        .split("||")
        .map(|side| {
            let side = side.trim();
            for token in [">=", "<=", ">", "<", "="] {
                if let Some(rest) = side.strip_prefix(token) {
                    return format!("{token}{}", rest.trim_start());
                }
            }
            side.to_string()
        })
        .collect::<Vec<_>>()
        .join(" || ")
}
