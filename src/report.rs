/*!
Custom Snafu error printer
*/

use std::error::Error as StdError;

/// Wraps any error for `main` and prints it together with its source chain.
pub struct Report(Box<dyn StdError>);

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.0)?;

        let mut source = self.0.source();
        if source.is_some() {
            writeln!(f, "\nCaused by:")?;
        }

        let mut depth = 0;
        while let Some(error) = source {
            writeln!(f, "  {}: {}", depth, error)?;
            source = error.source();
            depth += 1;
        }

        Ok(())
    }
}

impl<E: Into<Box<dyn StdError>>> From<E> for Report {
    fn from(error: E) -> Self {
        Report(error.into())
    }
}
