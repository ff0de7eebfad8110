use crate::formula::{Cnf, Literal};

/// Literal-selection policy consulted when unit propagation stalls.
///
/// The returned literal must occur in the current formula so that
/// simplifying with it makes progress. `None` is only possible for a
/// formula without literals, which the solver never branches on.
pub trait Branching {
    fn pick(&self, formula: &Cnf) -> Option<Literal>;
}

/// Branches on the first variable still occurring in the formula, in
/// first-occurrence order, always trying `true` first.
///
/// Variables already decided on the current path have been eliminated from
/// the formula by `simplify`, so the first remaining variable is exactly
/// the first undecided one that still matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedOrder;

impl Branching for FixedOrder {
    fn pick(&self, formula: &Cnf) -> Option<Literal> {
        formula
            .variables()
            .into_iter()
            .next()
            .map(|variable| Literal::new(variable, true))
    }
}

/// Branches on the literal with the most occurrences, counted per signed
/// literal over all clauses of the current formula.
///
/// A simplified MOM-style heuristic: plain occurrence counting without the
/// minimum-clause-size weighting. Ties keep the literal encountered first.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxOccurrence;

impl Branching for MaxOccurrence {
    fn pick(&self, formula: &Cnf) -> Option<Literal> {
        // Counted in encounter order so tie-breaking is deterministic.
        let mut occurrences: Vec<(Literal, usize)> = Vec::new();

        for clause in formula.clauses() {
            for literal in clause.iter() {
                match occurrences.iter_mut().find(|(seen, _)| *seen == literal) {
                    Some((_, count)) => *count += 1,
                    None => occurrences.push((literal, 1)),
                }
            }
        }

        let mut best: Option<(Literal, usize)> = None;
        for &(literal, count) in &occurrences {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((literal, count)),
            }
        }

        best.map(|(literal, _)| literal)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use crate::formula::Clause;

    use super::*;

    fn lit(encoded: i32) -> Literal {
        Literal::try_from(encoded).unwrap()
    }

    fn formula(clauses: &[&[i32]]) -> Cnf {
        let num_variables = clauses
            .iter()
            .flat_map(|clause| clause.iter())
            .map(|literal| literal.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);

        let mut cnf = Cnf::new(num_variables);
        for clause in clauses {
            cnf.add_clause(Clause::new(clause.iter().map(|&l| lit(l)).collect()));
        }
        cnf
    }

    #[test]
    fn fixed_order_picks_first_variable_positively() {
        let cnf = formula(&[&[-2, 1], &[3]]);
        assert_eq!(FixedOrder.pick(&cnf), Some(lit(2)));
    }

    #[test]
    fn fixed_order_on_empty_formula() {
        assert_eq!(FixedOrder.pick(&formula(&[])), None);
    }

    #[test]
    fn max_occurrence_counts_literals_with_sign() {
        // x2 occurs three times positively; ¬x1 is a different key than x1.
        let cnf = formula(&[&[1, 2], &[-1, 2], &[2, 3]]);
        assert_eq!(MaxOccurrence.pick(&cnf), Some(lit(2)));
    }

    #[test]
    fn max_occurrence_can_pick_a_negative_literal() {
        let cnf = formula(&[&[-3, 1], &[-3, 2]]);
        assert_eq!(MaxOccurrence.pick(&cnf), Some(lit(-3)));
    }

    #[test]
    fn max_occurrence_breaks_ties_by_first_encounter() {
        let cnf = formula(&[&[1, 2], &[2, 1]]);
        assert_eq!(MaxOccurrence.pick(&cnf), Some(lit(1)));
    }

    #[test]
    fn max_occurrence_on_empty_formula() {
        assert_eq!(MaxOccurrence.pick(&formula(&[])), None);
    }
}
