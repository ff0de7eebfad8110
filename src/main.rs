use std::{env::args, path::Path};

use pretty_env_logger::formatted_builder;

use loveland::{
    formula::Valuation,
    parser::{self, parse_file},
    prelude::*,
    report::Report,
    solver::{FixedOrderSolver, MaxOccurrenceSolver, Solver},
};

fn usage_string() -> String {
    format!(
        "Usage: {} <heuristic> <command>

heuristic: fixed, freq

command:
    check <file_name> - decide satisfiability of the given CNF file",
        args().next().unwrap()
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown heuristic '{}'\n\n{}", name, usage_string()))]
    UnknownHeuristic { name: String },
    #[snafu(display("Unknown command '{}'\n\n{}", name, usage_string()))]
    UnknownCommand { name: String },
    #[snafu(display("Failed to parse CNF"))]
    ParserError { source: parser::Error },
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
}

fn solve_path<T: Solver>(path: &Path) -> Result<Option<Valuation>, Error> {
    let formula = parse_file(path).context(ParserError)?;
    let solver = T::new(formula);
    Ok(solver.solve())
}

fn dispatch_command<T: Solver>(args: Vec<String>) -> Result<(), Error> {
    match args.get(0).map(|s| s.as_str()) {
        Some("check") => {
            let path = args.get(1).context(MissingArgument)?;
            match solve_path::<T>(path.as_ref())? {
                Some(valuation) => {
                    println!("SATISFIABLE");
                    println!("{}", valuation);
                }
                None => println!("UNSATISFIABLE"),
            }
        }
        Some(name) => UnknownCommand {
            name: name.to_owned(),
        }
        .fail()?,
        None => MissingArgument.fail()?,
    }

    Ok(())
}

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        if cfg!(debug_assertions) {
            builder.parse_filters("loveland=debug");
        } else {
            builder.parse_filters("loveland=warn");
        }
    }

    builder.try_init().expect("Failed to initialize the logger");
}

fn main() -> Result<(), Report> {
    init_logger();

    let mut args = args();

    // drop arg[0]
    args.next();

    // heuristic name
    let heuristic_name = args.next();
    let remaining: Vec<_> = args.collect();

    match heuristic_name.as_deref() {
        Some("fixed") => dispatch_command::<FixedOrderSolver>(remaining)?,
        Some("freq") => dispatch_command::<MaxOccurrenceSolver>(remaining)?,
        Some(name) => UnknownHeuristic {
            name: name.to_owned(),
        }
        .fail()?,
        None => {
            println!("{}", usage_string());
        }
    }

    Ok(())
}
