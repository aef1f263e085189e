use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::model::Arity;
use crate::parser::interface::UserInterface;
use crate::parser::{ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, TotalWidth};

pub(crate) struct OptionParameter {
    pub(crate) name: String,
    pub(crate) short: Option<char>,
    pub(crate) arity: Arity,
    pub(crate) help: Option<String>,
    pub(crate) metavar: Option<String>,
    pub(crate) negation: Option<String>,
    pub(crate) required: bool,
    pub(crate) choices: Vec<(String, String)>,
}

pub(crate) struct ArgumentParameter {
    pub(crate) name: String,
    pub(crate) arity: Arity,
    pub(crate) help: Option<String>,
    pub(crate) metavar: Option<String>,
    pub(crate) choices: Vec<(String, String)>,
}

fn placeholder(name: &str, metavar: &Option<String>) -> String {
    match metavar {
        Some(metavar) => metavar.clone(),
        None => name.to_ascii_uppercase().replace('-', "_"),
    }
}

fn grammar(example: &str, arity: Arity) -> String {
    match arity {
        Arity::Precisely(n) => (0..n)
            .map(|_| example.to_string())
            .collect::<Vec<String>>()
            .join(" "),
        Arity::Any => format!("[{example} ...]"),
        Arity::AtLeastOne => format!("{example} [...]"),
    }
}

fn choices_prefix(choices: &[(String, String)]) -> String {
    if choices.is_empty() {
        String::default()
    } else {
        let keys: Vec<&str> = choices.iter().map(|(value, _)| value.as_str()).collect();
        format!("{{{}}} ", keys.join(", "))
    }
}

struct OptionLine {
    flags: String,
    summary: String,
    middle: String,
    choices: Vec<(String, String)>,
}

impl From<&OptionParameter> for OptionLine {
    fn from(parameter: &OptionParameter) -> Self {
        let OptionParameter {
            name,
            short,
            arity,
            help,
            metavar,
            negation,
            required,
            choices,
        } = parameter;
        let grammar = match grammar(&placeholder(name, metavar), *arity) {
            g if g.is_empty() => g,
            g => format!(" {g}"),
        };
        let mut flags = match short {
            Some(s) => format!("-{s}{grammar}, --{name}{grammar}"),
            None => format!("--{name}{grammar}"),
        };

        if let Some(negation) = negation {
            flags.push_str(format!(", --{negation}").as_str());
        }

        let item = match short {
            Some(s) => format!("-{s}{grammar}"),
            None => format!("--{name}{grammar}"),
        };
        let summary = if *required { item } else { format!("[{item}]") };
        let middle = format!(
            "{}{}",
            choices_prefix(choices),
            help.clone().unwrap_or_default()
        );

        Self {
            flags,
            summary,
            middle,
            choices: choices.clone(),
        }
    }
}

struct ArgumentLine {
    grammar: String,
    middle: String,
    choices: Vec<(String, String)>,
}

impl From<&ArgumentParameter> for ArgumentLine {
    fn from(parameter: &ArgumentParameter) -> Self {
        let ArgumentParameter {
            name,
            arity,
            help,
            metavar,
            choices,
        } = parameter;
        let grammar = grammar(&placeholder(name, metavar), *arity);
        let middle = format!(
            "{}{}",
            choices_prefix(choices),
            help.clone().unwrap_or_default()
        );

        Self {
            grammar,
            middle,
            choices: choices.clone(),
        }
    }
}

pub(crate) struct Printer {
    program: String,
    about: Option<String>,
    options: Vec<OptionParameter>,
    arguments: Vec<ArgumentParameter>,
    terminal_width: Option<usize>,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;
const CHOICE_INDENT: usize = 2;

// Fallback middle width for when we cannot size against the terminal.
const DEFAULT_MIDDLE_WIDTH: usize = 17;

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new("program", None, Vec::default(), Vec::default(), None)
    }

    pub(crate) fn terminal(
        program: impl Into<String>,
        about: Option<String>,
        options: Vec<OptionParameter>,
        arguments: Vec<ArgumentParameter>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(program, about, options, arguments, terminal_width)
    }

    pub(crate) fn new(
        program: impl Into<String>,
        about: Option<String>,
        mut options: Vec<OptionParameter>,
        arguments: Vec<ArgumentParameter>,
        terminal_width: Option<usize>,
    ) -> Self {
        options.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            program: program.into(),
            about,
            options,
            arguments,
            terminal_width,
        }
    }

    #[cfg(test)]
    pub(crate) fn details(&self) -> (String, Option<String>) {
        (self.program.clone(), self.about.clone())
    }

    pub(crate) fn print_help(&self, user_interface: &(impl UserInterface + ?Sized)) {
        let help_flags = format!("-{HELP_SHORT}, --{HELP_NAME}");
        let mut summary = vec![format!("[-{HELP_SHORT}]")];
        let mut left_column_width = help_flags.len();
        let mut middle_column_width = HELP_MESSAGE.len() + MAIN_INDENT;

        let option_lines: Vec<OptionLine> = self.options.iter().map(OptionLine::from).collect();
        let argument_lines: Vec<ArgumentLine> =
            self.arguments.iter().map(ArgumentLine::from).collect();

        for line in &option_lines {
            summary.push(line.summary.clone());
            left_column_width = std::cmp::max(left_column_width, line.flags.len());
            middle_column_width = std::cmp::max(middle_column_width, line.middle.len() + MAIN_INDENT);

            for (choice, description) in &line.choices {
                left_column_width = std::cmp::max(left_column_width, choice.len() + CHOICE_INDENT);
                middle_column_width =
                    std::cmp::max(middle_column_width, description.len() + MAIN_INDENT);
            }
        }

        for line in &argument_lines {
            summary.push(line.grammar.clone());
            left_column_width = std::cmp::max(left_column_width, line.grammar.len());
            middle_column_width = std::cmp::max(middle_column_width, line.middle.len() + MAIN_INDENT);

            for (choice, description) in &line.choices {
                left_column_width = std::cmp::max(left_column_width, choice.len() + CHOICE_INDENT);
                middle_column_width =
                    std::cmp::max(middle_column_width, description.len() + MAIN_INDENT);
            }
        }

        let column_renderer = match self.terminal_width {
            Some(terminal_width) => ColumnRenderer::guided(
                PaddingWidth::new(PADDING_WIDTH).unwrap(),
                LeftWidth::new(left_column_width).unwrap(),
                MiddleWidth::new(middle_column_width).unwrap(),
                TotalWidth(terminal_width),
            ),
            None => ColumnRenderer::new(
                PaddingWidth::new(PADDING_WIDTH).unwrap(),
                LeftWidth::new(left_column_width).unwrap(),
                MiddleWidth::new(std::cmp::min(middle_column_width, DEFAULT_MIDDLE_WIDTH))
                    .unwrap(),
            ),
        };

        user_interface.print(format!(
            "usage: {p} {s}",
            p = self.program,
            s = summary.join(" ")
        ));

        if let Some(about) = &self.about {
            user_interface.print("".to_string());
            user_interface.print(about.clone());
        }

        if !argument_lines.is_empty() {
            user_interface.print("".to_string());
            user_interface.print("positional arguments:".to_string());

            for line in &argument_lines {
                for rendered in column_renderer.render(MAIN_INDENT, &line.grammar, &line.middle) {
                    user_interface.print(rendered);
                }

                for (choice, description) in &line.choices {
                    for rendered in
                        column_renderer.render(MAIN_INDENT + CHOICE_INDENT, choice, description)
                    {
                        user_interface.print(rendered);
                    }
                }
            }
        }

        user_interface.print("".to_string());
        user_interface.print("options:".to_string());

        for rendered in column_renderer.render(MAIN_INDENT, &help_flags, HELP_MESSAGE) {
            user_interface.print(rendered);
        }

        for line in &option_lines {
            for rendered in column_renderer.render(MAIN_INDENT, &line.flags, &line.middle) {
                user_interface.print(rendered);
            }

            for (choice, description) in &line.choices {
                for rendered in
                    column_renderer.render(MAIN_INDENT + CHOICE_INDENT, choice, description)
                {
                    user_interface.print(rendered);
                }
            }
        }
    }
}

/// Pin-points a parse error within the command line tokens.
#[derive(Debug, PartialEq, Eq)]
pub struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    /// Build the context from the byte `offset` into the (space-less) token stream.
    pub fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens_length = 0;
        let mut projection = String::default();
        // The offset is measured against the tokens without spaces.
        // Account for the spaces we join into the projection.
        let mut projection_offset = 0;

        for (i, token) in self.tokens.iter().enumerate() {
            tokens_length += token.len();
            projection.push_str(token);

            if i + 1 < self.tokens.len() {
                projection.push(' ');

                if tokens_length <= self.offset {
                    projection_offset += 1;
                }
            }
        }

        write!(
            f,
            "{projection}\n{:width$}^",
            "",
            width = std::cmp::min(self.offset, tokens_length.saturating_sub(1)) + projection_offset
        )
    }
}
