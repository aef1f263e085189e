pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";

// The long flag prefix used to negate a toggle field: `--x` vs `--no-x`.
pub(crate) const NEGATION_PREFIX: &str = "no-";
