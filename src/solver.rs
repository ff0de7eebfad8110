use crate::formula::{Cnf, Valuation};

mod branching;
mod dpll;

pub use branching::{Branching, FixedOrder, MaxOccurrence};
pub use dpll::{DpllSolver, FixedOrderSolver, MaxOccurrenceSolver, Stats};

pub trait Solver {
    /// Creates a new solver instance.
    fn new(formula: Cnf) -> Self;

    /// Solves a CNF SAT problem with the solver.
    /// Returns `Some(Valuation)` if satisfiable, `None` otherwise.
    fn solve(self) -> Option<Valuation>;
}
