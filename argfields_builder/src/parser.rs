mod base;
mod interface;
mod middleware;
mod printer;

pub(crate) use base::{ArgumentCapture, OptionCapture, Parser, Untyped};
pub use base::SchemaError;
pub(crate) use interface::ConsoleInterface;
pub(crate) use interface::{ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, TotalWidth};
pub use interface::UserInterface;
pub use middleware::GeneralParser;
pub(crate) use middleware::ParseUnit;
pub(crate) use printer::{ArgumentParameter, OptionParameter, Printer};
pub use printer::ErrorContext;

#[cfg(test)]
pub(crate) use base::test;

/// Test helpers for capturing the parser's terminal output.
#[cfg(any(test, feature = "unit_test"))]
pub mod util {
    pub use crate::parser::base::ParseError;
    pub use crate::parser::interface::util::{
        channel_interface, InMemoryInterface, ReceiverInterface, SenderInterface,
    };
    pub use crate::parser::{ErrorContext, UserInterface};
}
