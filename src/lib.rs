/*!
An educational DPLL SAT solver: unit propagation interleaved with literal
branching and chronological backtracking over formula copies.
*/

#[macro_use]
extern crate log;

pub mod formula;
pub mod parser;
pub mod prelude;
pub mod report;
pub mod solver;

#[cfg(test)]
mod tests;
