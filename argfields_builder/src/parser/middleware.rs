use std::env;

use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;
use crate::parser::ErrorContext;

/// The configured command line parser.
/// Built via `RecordParser::build`.
pub struct GeneralParser<'a> {
    command: ParseUnit<'a>,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> std::fmt::Debug for GeneralParser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser{..}").finish()
    }
}

impl<'a> GeneralParser<'a> {
    pub(crate) fn command(command: ParseUnit<'a>, user_interface: Box<dyn UserInterface>) -> Self {
        Self {
            command,
            user_interface,
        }
    }

    #[cfg(test)]
    pub(crate) fn details(&self) -> (String, Option<String>) {
        self.command.printer.details()
    }
}

pub(crate) struct ParseUnit<'a> {
    parser: Parser<'a>,
    printer: Printer,
}

impl<'a> ParseUnit<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Parser::empty(), Printer::empty())
    }

    pub(crate) fn new(parser: Parser<'a>, printer: Printer) -> Self {
        Self { parser, printer }
    }

    fn invoke(
        self,
        tokens: &[&str],
        lenient: bool,
        user_interface: &(impl UserInterface + ?Sized),
    ) -> ParseResult {
        let ParseUnit { parser, printer } = self;

        match parser.consume(tokens, lenient) {
            Ok(Action::Continue { unknown }) => ParseResult::Complete { unknown },
            Ok(Action::PrintHelp) => {
                printer.print_help(user_interface);
                ParseResult::Exit(0)
            }
            Err((offset, parse_error)) => {
                user_interface.print_error(parse_error);
                user_interface.print_error_context(ErrorContext::new(offset, tokens));
                ParseResult::Exit(1)
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ParseResult {
    Complete { unknown: Vec<String> },
    Exit(i32),
}

impl<'a> GeneralParser<'a> {
    /// Run the command line parser against the input tokens.
    ///
    /// The parser will process the input tokens based off the `RecordParser` configuration.
    /// Parsing happens in two phases:
    /// 1. Token matching aligns the tokens to arguments and options.
    /// All tokens must be matched successfully in order to proceed to the next phase.
    /// 2. Token capturing parses the tokens by their respective types `T`.
    /// This phase will actually mutate your program variables.
    ///
    /// If at any point the parser encounters an error (ex: un-matched token, un-capturable token, etc), it will return with `Err(1)`.
    ///
    /// If the help switch (`-h` or `--help`) is encountered, the parser will display the help message and return with `Err(0)`.
    /// This skips the phase #2 capturing.
    pub fn parse_tokens(self, tokens: &[&str]) -> Result<(), i32> {
        let GeneralParser {
            command,
            user_interface,
        } = self;

        match command.invoke(tokens, false, &*user_interface) {
            ParseResult::Complete { .. } => Ok(()),
            ParseResult::Exit(code) => Err(code),
        }
    }

    /// Run the command line parser against the input tokens, ignoring unrecognized ones.
    ///
    /// Works exactly like `parse_tokens`, except tokens which do not align to any configured
    /// field are collected and returned instead of producing a parse error.
    pub fn parse_known_tokens(self, tokens: &[&str]) -> Result<Vec<String>, i32> {
        let GeneralParser {
            command,
            user_interface,
        } = self;

        match command.invoke(tokens, true, &*user_interface) {
            ParseResult::Complete { unknown } => Ok(unknown),
            ParseResult::Exit(code) => Err(code),
        }
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// Behaves like `parse_tokens`, except any `Err` exits the process (via `std::process::exit`).
    pub fn parse(self) {
        let command_input: Vec<String> = env::args().skip(1).collect();
        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(()) => {}
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        };
    }

    /// Run the command line parser against the Cli [`env::args`], ignoring unrecognized tokens.
    ///
    /// Behaves like `parse_known_tokens`, except any `Err` exits the process (via `std::process::exit`).
    pub fn parse_known(self) -> Vec<String> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        match self.parse_known_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(unknown) => unknown,
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Field, Value};
    use crate::matcher::{Bound, OptionConfig};
    use crate::parser::test::BlackHole;
    use crate::parser::util::{channel_interface, InMemoryInterface};
    use crate::test::assert_contains;
    use rstest::rstest;

    #[test]
    fn invoke_lenient() {
        // Setup
        let parser = Parser::new(
            vec![(
                OptionConfig::simple("flag", None, Bound::Range(0, 0)),
                Box::new(BlackHole::default()),
            )],
            Vec::default(),
        )
        .unwrap();
        let parse_unit = ParseUnit::new(parser, Printer::empty());
        let interface = InMemoryInterface::default();

        // Execute
        let result = parse_unit.invoke(&["--flag", "extra", "--moot"], true, &interface);

        // Verify
        assert_eq!(
            result,
            ParseResult::Complete {
                unknown: vec!["extra".to_string(), "--moot".to_string()],
            }
        );

        let (message, error, error_context) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[test]
    fn parse_tokens_empty() {
        // Setup
        let (sender, receiver) = channel_interface();
        let general_parser = GeneralParser::command(ParseUnit::empty(), Box::new(sender));

        // Execute
        general_parser.parse_tokens(&[]).unwrap();

        // Verify
        let (message, error, error_context) = receiver.consume();
        assert_eq!(message, None);
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[rstest]
    #[case(vec!["1"])]
    #[case(vec!["--flag", "1"])]
    fn parse_tokens(#[case] tokens: Vec<&str>) {
        // Setup
        let parse_unit = ParseUnit::new(
            Parser::new(
                vec![(
                    OptionConfig::simple("flag", None, Bound::Range(0, 0)),
                    Box::new(BlackHole::default()),
                )],
                vec![(
                    crate::matcher::ArgumentConfig::new("variable", Bound::Range(1, 1)),
                    Box::new(BlackHole::default()),
                )],
            )
            .unwrap(),
            Printer::empty(),
        );
        let (sender, receiver) = channel_interface();
        let general_parser = GeneralParser::command(parse_unit, Box::new(sender));

        // Execute
        general_parser.parse_tokens(tokens.as_slice()).unwrap();

        // Verify
        let (message, error, error_context) = receiver.consume();
        assert_eq!(message, None);
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[rstest]
    #[case(vec!["--help"])]
    #[case(vec!["-h"])]
    fn parse_tokens_help(#[case] tokens: Vec<&str>) {
        // Setup
        let parse_unit = ParseUnit::empty();
        let (sender, receiver) = channel_interface();
        let general_parser = GeneralParser::command(parse_unit, Box::new(sender));

        // Execute
        let error_code = general_parser.parse_tokens(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error_code, 0);

        let message = receiver.consume_message();
        assert_contains!(message, "usage: program [-h]");
        assert_contains!(message, "-h, --help");
    }

    #[rstest]
    #[case(vec!["not-u32"], 0)]
    #[case(vec!["--flag", "not-u32"], 6)]
    fn parse_tokens_argument_inconvertable(#[case] tokens: Vec<&str>, #[case] offset: usize) {
        // Setup
        let mut variable: u32 = 0;
        let field = Field::argument(Value::new(&mut variable), "variable");
        let parse_unit = ParseUnit::new(
            Parser::new(
                vec![(
                    OptionConfig::simple("flag", None, Bound::Range(0, 0)),
                    Box::new(BlackHole::default()),
                )],
                vec![field.into()],
            )
            .unwrap(),
            Printer::empty(),
        );
        let (sender, receiver) = channel_interface();
        let general_parser = GeneralParser::command(parse_unit, Box::new(sender));

        // Execute
        let error_code = general_parser.parse_tokens(tokens.as_slice()).unwrap_err();

        // Verify
        assert_eq!(error_code, 1);

        let (message, error, error_context) = receiver.consume();
        assert_eq!(message, None);
        let error = error.unwrap();
        assert_contains!(error, "Parse error");
        let error_context = error_context.unwrap();
        assert_eq!(error_context, ErrorContext::new(offset, &tokens));
    }

    #[test]
    fn parse_known_tokens() {
        // Setup
        let parse_unit = ParseUnit::new(
            Parser::new(
                vec![(
                    OptionConfig::simple("flag", None, Bound::Range(0, 0)),
                    Box::new(BlackHole::default()),
                )],
                Vec::default(),
            )
            .unwrap(),
            Printer::empty(),
        );
        let (sender, receiver) = channel_interface();
        let general_parser = GeneralParser::command(parse_unit, Box::new(sender));

        // Execute
        let unknown = general_parser
            .parse_known_tokens(&["--flag", "--moot", "extra"])
            .unwrap();

        // Verify
        assert_eq!(unknown, vec!["--moot".to_string(), "extra".to_string()]);

        let (message, error, error_context) = receiver.consume();
        assert_eq!(message, None);
        assert_eq!(error, None);
        assert_eq!(error_context, None);
    }

    #[test]
    fn parse_known_tokens_still_errors() {
        // Setup
        let mut variable: u32 = 0;
        let field = Field::option(Value::new(&mut variable), "variable", None);
        let parse_unit = ParseUnit::new(
            Parser::new(vec![field.into()], Vec::default()).unwrap(),
            Printer::empty(),
        );
        let (sender, receiver) = channel_interface();
        let general_parser = GeneralParser::command(parse_unit, Box::new(sender));

        // Execute
        let error_code = general_parser
            .parse_known_tokens(&["--variable", "not-u32"])
            .unwrap_err();

        // Verify
        assert_eq!(error_code, 1);

        let (message, error, error_context) = receiver.consume();
        assert_eq!(message, None);
        let error = error.unwrap();
        assert_contains!(error, "Parse error");
        assert!(error_context.is_some());
    }
}
