pub mod cells;
pub mod classify;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod progress;
pub mod scan;
pub mod shell;
pub mod sqldate;
pub mod worker;

pub use error::{ErrorKind, FormatError, Result};
pub use formatter::{FormatRules, reformat};
