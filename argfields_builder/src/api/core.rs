use crate::api::{Field, FieldClass};
use crate::parser::{
    ArgumentCapture, ArgumentParameter, ConsoleInterface, GeneralParser, OptionCapture,
    OptionParameter, ParseUnit, Parser, Printer, SchemaError, UserInterface,
};

/// The builder for a record-backed command line parser.
///
/// ### Example
/// ```
/// # use argfields_builder as argfields;
/// use argfields::RecordParser;
///
/// let parser = RecordParser::new("program")
///     // Configure with RecordParser::add.
///     .build();
/// parser.parse_tokens(&[]).unwrap();
/// ```
pub struct RecordParser<'a> {
    program: String,
    about: Option<String>,
    option_parameters: Vec<OptionParameter>,
    argument_parameters: Vec<ArgumentParameter>,
    option_captures: Vec<OptionCapture<'a>>,
    argument_captures: Vec<ArgumentCapture<'a>>,
    // The first invalid field combination, surfaced at build time.
    deferred_error: Option<SchemaError>,
}

impl<'a> RecordParser<'a> {
    /// Create a record parser.
    ///
    /// ### Example
    /// ```
    /// # use argfields_builder as argfields;
    /// use argfields::RecordParser;
    ///
    /// let parser = RecordParser::new("program")
    ///     .build();
    ///
    /// parser.parse_tokens(vec![].as_slice()).unwrap();
    /// ```
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            option_parameters: Vec::default(),
            argument_parameters: Vec::default(),
            option_captures: Vec::default(),
            argument_captures: Vec::default(),
            deferred_error: None,
        }
    }

    /// Document the about message for this parser.
    /// If repeated, only the final about message will apply.
    ///
    /// An about message documents the program in full sentence/paragraph format.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add a field to the record parser.
    ///
    /// The order of positional fields corresponds to their positional order during parsing.
    /// The order of flag based fields does not affect the parser semantics.
    ///
    /// ### Example
    /// ```
    /// # use argfields_builder as argfields;
    /// use argfields::{Field, RecordParser, Value};
    ///
    /// let mut a: u32 = 0;
    /// let mut b: u32 = 0;
    /// let parser = RecordParser::new("program")
    ///     .add(Field::argument(Value::new(&mut a), "a"))
    ///     .add(Field::argument(Value::new(&mut b), "b"))
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["1", "2"].as_slice()).unwrap();
    ///
    /// assert_eq!(a, 1);
    /// assert_eq!(b, 2);
    /// ```
    pub fn add<T>(mut self, field: Field<'a, T>) -> Self {
        if let Some(message) = &field.0.deferred_error {
            self.deferred_error
                .get_or_insert_with(|| SchemaError(message.clone()));
        }

        match field.class() {
            FieldClass::Opt | FieldClass::Toggle | FieldClass::Switch => {
                self.option_parameters.push(OptionParameter::from(&field));
                self.option_captures.push(OptionCapture::from(field));
            }
            FieldClass::Arg => {
                self.argument_parameters
                    .push(ArgumentParameter::from(&field));
                self.argument_captures.push(ArgumentCapture::from(field));
            }
        }

        self
    }

    fn assemble(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser<'a>, SchemaError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let parser = Parser::new(self.option_captures, self.argument_captures)?;
        let command = ParseUnit::new(
            parser,
            Printer::terminal(
                self.program,
                self.about,
                self.option_parameters,
                self.argument_parameters,
            ),
        );
        Ok(GeneralParser::command(command, user_interface))
    }

    /// Build the record parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated field name).
    pub fn build_parser(self) -> Result<GeneralParser<'a>, SchemaError> {
        self.assemble(Box::new(ConsoleInterface::default()))
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Build the record parser against a custom `UserInterface`, for use in testing.
    #[cfg(any(test, feature = "unit_test"))]
    pub fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser<'a>, SchemaError> {
        self.assemble(user_interface)
    }

    /// Build the record parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated field name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser<'a> {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
