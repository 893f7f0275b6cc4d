//! CNF formulas and the DIMACS text format.

use std::fmt::{self, Write as _};
use std::ops::Not;

/// A propositional literal in DIMACS notation: `v` or `-v` for variable `v >= 1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// Creates a literal from its DIMACS integer.
    ///
    /// Returns `None` for `0`, which DIMACS reserves as the clause terminator.
    #[must_use]
    pub const fn new(dimacs: i32) -> Option<Self> {
        if dimacs == 0 || dimacs == i32::MIN {
            None
        } else {
            Some(Self(dimacs))
        }
    }

    /// Positive literal of `var` (1-based).
    #[must_use]
    pub fn positive(var: u32) -> Self {
        debug_assert!(var > 0 && var <= i32::MAX.unsigned_abs());
        Self(i32::try_from(var).unwrap_or(i32::MAX))
    }

    /// Negative literal of `var` (1-based).
    #[must_use]
    pub fn negative(var: u32) -> Self {
        !Self::positive(var)
    }

    /// The 1-based variable index.
    #[must_use]
    pub const fn var(self) -> u32 {
        self.0.unsigned_abs()
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// The DIMACS integer for this literal.
    #[must_use]
    pub const fn to_dimacs(self) -> i32 {
        self.0
    }

    /// Dense index used for watch lists: `2 * (var - 1)` for positive, `+ 1` for negative.
    #[must_use]
    pub fn code(self) -> usize {
        let base = (self.var() as usize - 1) * 2;
        if self.is_positive() {
            base
        } else {
            base + 1
        }
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

/// A disjunction of literals.
pub type Clause = Vec<Literal>;

/// Largest variable count accepted from a DIMACS header.
///
/// The solver allocates per-variable state up front, so the declared count
/// bounds its memory use.
pub const MAX_VARS: u32 = 1 << 22;

/// Errors produced while reading DIMACS text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimacsError {
    #[error("Missing 'p cnf <vars> <clauses>' header")]
    MissingHeader,

    #[error("Malformed header on line {line}: {text}")]
    MalformedHeader { line: usize, text: String },

    #[error("Invalid literal '{token}' on line {line}")]
    InvalidLiteral { line: usize, token: String },

    #[error("Header on line {line} declares {declared} variables, more than the supported {max}")]
    TooManyVariables { line: usize, declared: u64, max: u32 },

    #[error("Variable {var} on line {line} exceeds declared count {declared}")]
    VariableOutOfRange { line: usize, var: u32, declared: u32 },

    #[error("Last clause is not terminated by 0")]
    UnterminatedClause,
}

/// A formula in conjunctive normal form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cnf {
    num_vars: u32,
    clauses: Vec<Clause>,
}

impl Cnf {
    /// An empty formula over `num_vars` variables.
    #[must_use]
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Appends a clause, widening the variable count if needed.
    pub fn add_clause(&mut self, clause: Clause) {
        if let Some(max) = clause.iter().map(|l| l.var()).max() {
            self.num_vars = self.num_vars.max(max);
        }
        self.clauses.push(clause);
    }

    /// Appends every clause of `other`.
    pub fn extend(&mut self, other: Cnf) {
        self.num_vars = self.num_vars.max(other.num_vars);
        self.clauses.extend(other.clauses);
    }

    #[must_use]
    pub const fn num_vars(&self) -> u32 {
        self.num_vars
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Serializes the formula as DIMACS CNF.
    #[must_use]
    pub fn to_dimacs(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "p cnf {} {}", self.num_vars, self.clauses.len());
        for clause in &self.clauses {
            for lit in clause {
                let _ = write!(out, "{lit} ");
            }
            out.push_str("0\n");
        }
        out
    }

    /// Parses DIMACS CNF text.
    ///
    /// Comment lines (`c ...`) are skipped, clauses may span lines, and a `%`
    /// line ends the formula.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing or malformed header, an unparseable
    /// literal, a variable above the declared count, or an unterminated clause.
    pub fn parse_dimacs(input: &str) -> Result<Self, DimacsError> {
        let mut header: Option<(u32, usize)> = None;
        let mut cnf = Cnf::default();
        let mut current: Clause = Vec::new();

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            if line.starts_with('%') {
                break;
            }
            if line.starts_with('p') {
                header = Some(parse_header(line, line_no)?);
                if let Some((vars, _)) = header {
                    cnf.num_vars = vars;
                }
                continue;
            }
            let Some((declared, _)) = header else {
                return Err(DimacsError::MissingHeader);
            };

            for token in line.split_whitespace() {
                let value: i32 = token.parse().map_err(|_| DimacsError::InvalidLiteral {
                    line: line_no,
                    token: token.to_string(),
                })?;
                match Literal::new(value) {
                    None => cnf.clauses.push(std::mem::take(&mut current)),
                    Some(lit) if lit.var() > declared => {
                        return Err(DimacsError::VariableOutOfRange {
                            line: line_no,
                            var: lit.var(),
                            declared,
                        });
                    }
                    Some(lit) => current.push(lit),
                }
            }
        }

        let Some((_, declared_clauses)) = header else {
            return Err(DimacsError::MissingHeader);
        };
        if !current.is_empty() {
            return Err(DimacsError::UnterminatedClause);
        }
        if declared_clauses != cnf.clauses.len() {
            tracing::warn!(
                declared = declared_clauses,
                actual = cnf.clauses.len(),
                "DIMACS clause count does not match header"
            );
        }
        Ok(cnf)
    }
}

fn parse_header(line: &str, line_no: usize) -> Result<(u32, usize), DimacsError> {
    let malformed = || DimacsError::MalformedHeader {
        line: line_no,
        text: line.to_string(),
    };
    let mut parts = line.split_whitespace();
    if parts.next() != Some("p") || parts.next() != Some("cnf") {
        return Err(malformed());
    }
    let vars: u64 = parts.next().and_then(|v| v.parse().ok()).ok_or_else(malformed)?;
    let vars = u32::try_from(vars)
        .ok()
        .filter(|&v| v <= MAX_VARS)
        .ok_or(DimacsError::TooManyVariables {
            line: line_no,
            declared: vars,
            max: MAX_VARS,
        })?;
    let clauses = parts.next().and_then(|c| c.parse().ok()).ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok((vars, clauses))
}
