use paste::paste;

use crate::{
    parser::parse_file,
    solver::{FixedOrderSolver, MaxOccurrenceSolver, Solver},
};

macro_rules! sat_testcase_with_solver {
    ($solver:ident, $name:ident) => {
        paste! {
            #[test]
            fn [< $solver:lower _ $name >]() {
                let formula = parse_file(
                    concat!("testcases/", stringify!($name), ".cnf")
                ).unwrap();
                let valuation = $solver::new(formula.clone())
                    .solve()
                    .expect("formula should be satisfiable");
                assert!(valuation.satisfies(&formula));
            }
        }
    };
}

macro_rules! unsat_testcase_with_solver {
    ($solver:ident, $name:ident) => {
        paste! {
            #[test]
            fn [< $solver:lower _ $name >]() {
                let formula = parse_file(
                    concat!("testcases/", stringify!($name), ".cnf")
                ).unwrap();
                let solver = $solver::new(formula);
                assert!(solver.solve().is_none());
            }
        }
    };
}

macro_rules! sat_testcase {
    ($name:ident) => {
        sat_testcase_with_solver!(FixedOrderSolver, $name);
        sat_testcase_with_solver!(MaxOccurrenceSolver, $name);
    };
}

macro_rules! unsat_testcase {
    ($name:ident) => {
        unsat_testcase_with_solver!(FixedOrderSolver, $name);
        unsat_testcase_with_solver!(MaxOccurrenceSolver, $name);
    };
}

sat_testcase!(empty);
sat_testcase!(chain);
sat_testcase!(forced);
sat_testcase!(mixed);
sat_testcase!(dup);

unsat_testcase!(xor2);
unsat_testcase!(unit_conflict);
unsat_testcase!(pigeon3x2);
