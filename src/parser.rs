use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::formula::{Clause, Cnf, Literal, LiteralParseError};
use crate::prelude::*;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("I/O error occurred while reading CNF file '{}'", path.display()))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse line '{}' as clause", line))]
    MalformedClause { line: String },
    #[snafu(display("Invalid literal found in clause '{}'", line))]
    MalformedLiteral {
        line: String,
        source: LiteralParseError,
    },
    #[snafu(display(
        "Variable x{} is out of range (the problem line declares {} variables)",
        variable,
        num_variables
    ))]
    VariableOutOfRange { variable: u32, num_variables: usize },
    #[snafu(display("Problem line 'p cnf <num_variables> <num_clauses>' is not found"))]
    MalformedProblemDefinition,
    #[snafu(display(
        "The number of clauses ({}) does not match the clauses number in the problem definition ({})",
        found,
        expected,
    ))]
    ClauseCountMismatch { expected: usize, found: usize },
}

/// Parse a line to a clause.
/// The trailing `0` sentinel is stripped here; the formula never sees it.
fn parse_line(line: &str, num_variables: usize) -> Result<Clause, Error> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();

    ensure!(
        !tokens.is_empty() && tokens[tokens.len() - 1] == "0",
        MalformedClause {
            line: line.to_owned(),
        }
    );

    let mut literals = Vec::new();
    for token in &tokens[..tokens.len() - 1] {
        let literal = token
            .parse::<Literal>()
            .with_context(|| MalformedLiteral {
                line: line.to_owned(),
            })?;

        ensure!(
            literal.variable().get() as usize <= num_variables,
            VariableOutOfRange {
                variable: literal.variable().get(),
                num_variables,
            }
        );

        literals.push(literal);
    }

    Ok(Clause::new(literals))
}

/// Parses a CNF formula from DIMACS text.
pub fn parse_str(input: &str) -> Result<Cnf, Error> {
    // skip until we find the problem definition
    let mut lines = input.lines().skip_while(|line| !line.starts_with('p'));

    let problem_line = lines
        .next()
        .ok_or_else(|| MalformedProblemDefinition.build())?;

    let tokens = problem_line.split_whitespace().collect::<Vec<_>>();

    // We only support the CNF flavor of the DIMACS format
    ensure!(
        tokens.len() == 4 && tokens[0] == "p" && tokens[1] == "cnf",
        MalformedProblemDefinition
    );

    let (num_variables, num_clauses) =
        match (tokens[2].parse::<usize>(), tokens[3].parse::<usize>()) {
            (Ok(num_variables), Ok(num_clauses)) => (num_variables, num_clauses),
            _ => return MalformedProblemDefinition.fail(),
        };

    let mut cnf = Cnf::new(num_variables);

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            // empty line, comment
            continue;
        }
        cnf.add_clause(parse_line(trimmed, num_variables)?);
    }

    ensure!(
        cnf.clauses().len() == num_clauses,
        ClauseCountMismatch {
            expected: num_clauses,
            found: cnf.clauses().len(),
        }
    );

    Ok(cnf)
}

/// Parses a CNF formula from a file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Cnf, Error> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).context(IoError {
        path: path.to_owned(),
    })?;

    parse_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_clauses_in_order() {
        let cnf = parse_str(
            "c a comment before the problem line\n\
             p cnf 3 2\n\
             1 -2 0\n\
             \n\
             c interleaved comment\n\
             3 0\n",
        )
        .unwrap();

        assert_eq!(cnf.num_variables(), 3);
        assert_eq!(cnf.clauses().len(), 2);
        assert_eq!(cnf.clauses()[0].num_literals(), 2);
        assert_eq!(cnf.clauses()[1].num_literals(), 1);
    }

    #[test]
    fn lone_sentinel_is_an_empty_clause() {
        let cnf = parse_str("p cnf 1 1\n0\n").unwrap();
        assert!(cnf.has_empty_clause());
    }

    #[test]
    fn missing_sentinel_is_rejected() {
        let result = parse_str("p cnf 2 1\n1 2\n");
        assert!(matches!(result, Err(Error::MalformedClause { .. })));
    }

    #[test]
    fn zero_literal_inside_clause_is_rejected() {
        let result = parse_str("p cnf 2 1\n1 0 2 0\n");
        assert!(matches!(result, Err(Error::MalformedLiteral { .. })));
    }

    #[test]
    fn out_of_range_variable_is_rejected() {
        let result = parse_str("p cnf 2 1\n1 3 0\n");
        assert!(matches!(result, Err(Error::VariableOutOfRange { .. })));
    }

    #[test]
    fn missing_problem_line_is_rejected() {
        let result = parse_str("c only comments here\n");
        assert!(matches!(result, Err(Error::MalformedProblemDefinition)));
    }

    #[test]
    fn clause_count_must_match_problem_line() {
        let result = parse_str("p cnf 2 2\n1 2 0\n");
        assert!(matches!(result, Err(Error::ClauseCountMismatch { .. })));
    }
}
