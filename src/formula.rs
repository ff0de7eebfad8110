/*!
A module to represent conjunctive normal form formulas and valuations.
*/

use std::{convert::TryFrom, fmt::Display, num::NonZeroU32, str::FromStr};

use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum LiteralParseError {
    #[snafu(display("Failed to parse literal"))]
    ParseIntError { source: std::num::ParseIntError },
    #[snafu(display("Literal must have a non-zero variable ID"))]
    ZeroVariable,
}

/// Newtype wrapper for variable ID.
/// Invariant: 0 < ID <= MAX_VARIABLE_ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable(NonZeroU32);

impl Variable {
    pub const MAX_VARIABLE_ID: usize = std::u32::MAX as usize;

    /// Creates a variable from a raw ID.
    /// Returns `None` if the ID is zero.
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Variable)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl FromStr for Variable {
    type Err = LiteralParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let num = s.parse::<u32>().context(ParseIntError)?;
        let id = NonZeroU32::new(num).context(ZeroVariable)?;
        Ok(Variable(id))
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    id: Variable,
    positive: bool,
}

impl Literal {
    pub fn new(id: Variable, positive: bool) -> Self {
        Literal { id, positive }
    }

    pub fn variable(&self) -> Variable {
        self.id
    }

    pub fn positive(&self) -> bool {
        self.positive
    }
}

impl FromStr for Literal {
    type Err = LiteralParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (positive, digits) = match s.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, s),
        };

        Ok(Literal {
            id: digits.parse()?,
            positive,
        })
    }
}

/// Signed-integer encoding: the sign is the polarity, the magnitude is the
/// variable ID. Zero is not a literal.
impl TryFrom<i32> for Literal {
    type Error = LiteralParseError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let id = NonZeroU32::new(value.unsigned_abs()).context(ZeroVariable)?;
        Ok(Literal {
            id: Variable(id),
            positive: value > 0,
        })
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.positive { "" } else { "¬" }, self.id)
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        Literal {
            id: self.id,
            positive: !self.positive,
        }
    }
}

/// Disjunction of literals
#[derive(Debug, Clone)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn num_literals(&self) -> usize {
        self.literals.len()
    }

    /// An empty clause is a contradiction: no literal is left to satisfy it.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Returns the forced literal if this is a unit clause.
    pub fn unit(&self) -> Option<Literal> {
        if self.literals.len() == 1 {
            Some(self.literals[0])
        } else {
            None
        }
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.contains(&literal)
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;

        let mut iter = self.literals.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for literal in iter {
            write!(f, " ∨ {}", literal)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Formula representation in Conjunctive Normal Form
#[derive(Debug, Clone)]
pub struct Cnf {
    num_variables: usize,
    clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(num_variables: usize) -> Self {
        assert!(num_variables <= Variable::MAX_VARIABLE_ID);

        Cnf {
            num_variables,
            clauses: Vec::new(),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn clauses(&self) -> &Vec<Clause> {
        &self.clauses
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    /// A formula without clauses is vacuously satisfied.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True iff some clause is the empty clause, i.e. a contradiction was
    /// derived on the current path.
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// Finds the first unit clause in clause order and returns its literal.
    /// The first-encountered order is part of the contract: it decides which
    /// forced assignment is applied next.
    pub fn unit_clause(&self) -> Option<Literal> {
        self.clauses.iter().find_map(Clause::unit)
    }

    /// Enumerates the variables of the formula in first-occurrence order,
    /// de-duplicated and sign-stripped. Used to seed the valuation; this is
    /// not a pure-literal check.
    pub fn variables(&self) -> Vec<Variable> {
        let mut seen = Vec::new();
        for clause in &self.clauses {
            for literal in clause.iter() {
                let variable = literal.variable();
                if !seen.contains(&variable) {
                    seen.push(variable);
                }
            }
        }
        seen
    }

    /// Produces a new formula under the assumption that `literal` is true:
    /// clauses containing it are satisfied and dropped, occurrences of its
    /// negation are removed, everything else is copied unchanged. Clause
    /// order and literal order are preserved.
    pub fn simplify(&self, literal: Literal) -> Cnf {
        let mut clauses = Vec::with_capacity(self.clauses.len());

        for clause in &self.clauses {
            if clause.contains(literal) {
                continue;
            }

            if clause.contains(!literal) {
                clauses.push(Clause::new(
                    clause.iter().filter(|&kept| kept != !literal).collect(),
                ));
            } else {
                clauses.push(clause.clone());
            }
        }

        Cnf {
            num_variables: self.num_variables,
            clauses,
        }
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CNF with {} variables (", self.num_variables)?;

        let mut iter = self.clauses.iter();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
        }
        for clause in iter {
            write!(f, " ∧ {}", clause)?;
        }

        write!(f, ")")?;

        Ok(())
    }
}

/// Variable-to-Boolean assignment built up during search.
///
/// One valuation is created per top-level solve from the variables of the
/// initial formula, all entries `false`. Entries are overwritten in place as
/// literals are decided; backtracking overwrites rather than removes, so an
/// entry always reflects the last decision tried for that variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    entries: Vec<(Variable, bool)>,
}

impl Valuation {
    pub fn new(formula: &Cnf) -> Self {
        Valuation {
            entries: formula
                .variables()
                .into_iter()
                .map(|variable| (variable, false))
                .collect(),
        }
    }

    /// Records the decision that `literal` holds.
    ///
    /// # Panics
    ///
    /// Panics when the variable does not occur in the initial formula.
    pub fn assign(&mut self, literal: Literal) {
        let entry = self
            .entries
            .iter_mut()
            .find(|(variable, _)| *variable == literal.variable())
            .expect("assigned variable does not occur in the formula");

        entry.1 = literal.positive();
    }

    pub fn value(&self, variable: Variable) -> bool {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == variable)
            .map_or(false, |(_, value)| *value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.entries.iter().copied()
    }

    /// True iff every clause of `formula` holds at least one literal whose
    /// polarity matches this valuation.
    pub fn satisfies(&self, formula: &Cnf) -> bool {
        formula.clauses().iter().all(|clause| {
            clause
                .iter()
                .any(|literal| self.value(literal.variable()) == literal.positive())
        })
    }
}

impl Display for Valuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;

        let mut iter = self.entries.iter();
        if let Some((variable, value)) = iter.next() {
            write!(f, "{}: {}", variable, value)?;
        }
        for (variable, value) in iter {
            write!(f, ", {}: {}", variable, value)?;
        }

        write!(f, "}}")?;

        Ok(())
    }
}
