/*!
Commonly used error handling imports.
*/

pub use snafu::{ensure, OptionExt, ResultExt, Snafu};
