use crate::formula::{Cnf, Valuation};

use super::{Branching, FixedOrder, MaxOccurrence, Solver};

/// Search counters, reported at debug level after every solve.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stats {
    /// Forced assignments applied from unit clauses.
    pub propagations: usize,
    /// Literals picked by the branching policy.
    pub decisions: usize,
    /// Failed first branches whose decision was overwritten.
    pub backtracks: usize,
}

/// Classical DPLL search parameterized by a literal-selection policy.
///
/// Every recursion step works on its own simplified copy of the formula,
/// while a single valuation is threaded mutably through the whole tree.
/// Backtracking overwrites the decision entry before trying the opposite
/// polarity; there is no undo stack.
#[derive(Debug)]
pub struct DpllSolver<B> {
    formula: Cnf,
    strategy: B,
    stats: Stats,
}

/// Solver with the fixed-order policy.
pub type FixedOrderSolver = DpllSolver<FixedOrder>;
/// Solver with the frequency-weighted policy.
pub type MaxOccurrenceSolver = DpllSolver<MaxOccurrence>;

impl<B: Branching> DpllSolver<B> {
    pub fn stats(&self) -> Stats {
        self.stats
    }

    fn run(&mut self) -> Option<Valuation> {
        let mut valuation = Valuation::new(&self.formula);

        debug!(
            "solving formula with {} variables and {} clauses",
            valuation.len(),
            self.formula.clauses().len()
        );

        let root = self.formula.clone();
        let sat = self.search(root, &mut valuation);

        debug!(
            "search finished after {} propagations, {} decisions, {} backtracks",
            self.stats.propagations, self.stats.decisions, self.stats.backtracks
        );

        if sat {
            debug_assert!(valuation.satisfies(&self.formula));
            Some(valuation)
        } else {
            None
        }
    }

    fn search(&mut self, mut formula: Cnf, valuation: &mut Valuation) -> bool {
        // Unit propagation chain, flattened into a loop so the call stack
        // only grows with branching decisions.
        loop {
            if formula.is_empty() {
                // Every original clause was satisfied along the way.
                return true;
            }
            if formula.has_empty_clause() {
                // The current partial assignment is contradictory.
                return false;
            }

            match formula.unit_clause() {
                Some(literal) => {
                    trace!("unit clause forces {}", literal);
                    self.stats.propagations += 1;
                    valuation.assign(literal);
                    formula = formula.simplify(literal);
                }
                None => break,
            }
        }

        let literal = match self.strategy.pick(&formula) {
            Some(literal) => literal,
            // Unreachable: every clause here has at least two literals.
            None => unreachable!("no branching literal in a non-empty formula"),
        };

        trace!("branching on {}", literal);
        self.stats.decisions += 1;

        valuation.assign(literal);
        if self.search(formula.simplify(literal), valuation) {
            return true;
        }

        self.stats.backtracks += 1;
        valuation.assign(!literal);
        self.search(formula.simplify(!literal), valuation)
    }
}

impl<B: Branching + Default> Solver for DpllSolver<B> {
    fn new(formula: Cnf) -> Self {
        DpllSolver {
            formula,
            strategy: B::default(),
            stats: Stats::default(),
        }
    }

    fn solve(mut self) -> Option<Valuation> {
        self.run()
    }
}
