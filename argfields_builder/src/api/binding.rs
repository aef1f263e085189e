use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;
use std::str::FromStr;

use crate::api::capture::{AsArgument, AsOption, CaptureError, TypedBinding};
use crate::model::Arity;
use crate::prelude::Gatherable;

type ParseFn<'a, T> = Box<dyn Fn(&str) -> Result<T, CaptureError> + 'a>;

fn from_str_parse<T: FromStr>(token: &str) -> Result<T, CaptureError> {
    T::from_str(token).map_err(|_| CaptureError::InvalidConversion {
        token: token.to_string(),
        type_name: std::any::type_name::<T>(),
    })
}

fn converter_parse<T>(converter: fn(&str) -> Result<T, String>) -> impl Fn(&str) -> Result<T, CaptureError> {
    move |token: &str| {
        converter(token).map_err(|message| CaptureError::ConverterFailure {
            token: token.to_string(),
            message,
        })
    }
}

/// A binding which captures exactly one value into the field `T`.
///
/// ### Example
/// ```
/// # use argfields_builder as argfields;
/// use argfields::{TypedBinding, Value};
///
/// let mut count: u32 = 0;
/// let mut binding = Value::new(&mut count);
///
/// binding.capture("5").unwrap();
/// drop(binding);
///
/// assert_eq!(count, 5);
/// ```
pub struct Value<'a, T> {
    variable: Rc<RefCell<&'a mut T>>,
    parse: ParseFn<'a, T>,
}

impl<'a, T> Value<'a, T> {
    /// Create a value binding which converts tokens via `FromStr`.
    pub fn new(variable: &'a mut T) -> Self
    where
        T: FromStr,
    {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            parse: Box::new(from_str_parse::<T>),
        }
    }

    /// Create a value binding which converts tokens via a custom function.
    pub fn with_converter(variable: &'a mut T, converter: fn(&str) -> Result<T, String>) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            parse: Box::new(converter_parse(converter)),
        }
    }
}

impl<'a, T> TypedBinding<'a, T> for Value<'a, T> {
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, token: &str) -> Result<(), CaptureError> {
        let value: T = (self.parse)(token)?;
        **self.variable.borrow_mut() = value;
        Ok(())
    }

    fn arity(&self) -> Arity {
        Arity::Precisely(1)
    }
}

impl<'a, T> AsOption for Value<'a, T> {}
impl<'a, T> AsArgument for Value<'a, T> {}

/// A binding whose value comes from the flag spelling itself, never from the command line tokens.
/// Toggle pairs (`--x` vs `--no-x`) and fixed-target switches both capture through here.
pub struct Toggle<'a, T> {
    variable: Rc<RefCell<&'a mut T>>,
    parse: ParseFn<'a, T>,
}

impl<'a, T> Toggle<'a, T> {
    /// Create a toggle binding which converts the implicit value via `FromStr`.
    pub fn new(variable: &'a mut T) -> Self
    where
        T: FromStr,
    {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            parse: Box::new(from_str_parse::<T>),
        }
    }
}

impl<'a, T> TypedBinding<'a, T> for Toggle<'a, T> {
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, token: &str) -> Result<(), CaptureError> {
        let value: T = (self.parse)(token)?;
        **self.variable.borrow_mut() = value;
        Ok(())
    }

    fn arity(&self) -> Arity {
        Arity::Precisely(0)
    }
}

impl<'a, T> AsOption for Toggle<'a, T> {}

/// A binding which captures at most one value into the field `Option<T>`.
///
/// ### Example
/// ```
/// # use argfields_builder as argfields;
/// use argfields::{Maybe, TypedBinding};
///
/// let mut nickname: Option<String> = None;
/// let mut binding = Maybe::new(&mut nickname);
///
/// binding.capture("kelsier").unwrap();
/// drop(binding);
///
/// assert_eq!(nickname, Some("kelsier".to_string()));
/// ```
pub struct Maybe<'a, T> {
    variable: Rc<RefCell<&'a mut Option<T>>>,
    parse: ParseFn<'a, T>,
}

impl<'a, T> Maybe<'a, T> {
    /// Create an optional binding which converts tokens via `FromStr`.
    pub fn new(variable: &'a mut Option<T>) -> Self
    where
        T: FromStr,
    {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            parse: Box::new(from_str_parse::<T>),
        }
    }

    /// Create an optional binding which converts tokens via a custom function.
    pub fn with_converter(
        variable: &'a mut Option<T>,
        converter: fn(&str) -> Result<T, String>,
    ) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            parse: Box::new(converter_parse(converter)),
        }
    }
}

impl<'a, T> TypedBinding<'a, T> for Maybe<'a, T> {
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, token: &str) -> Result<(), CaptureError> {
        let value: T = (self.parse)(token)?;
        **self.variable.borrow_mut() = Some(value);
        Ok(())
    }

    fn arity(&self) -> Arity {
        Arity::Precisely(1)
    }
}

impl<'a, T> AsOption for Maybe<'a, T> {}

/// A binding which gathers any number of values into the container field `C`.
///
/// ### Example
/// ```
/// # use argfields_builder as argfields;
/// use argfields::{Arity, Sequence, TypedBinding};
///
/// let mut items: Vec<u32> = Vec::default();
/// let mut binding = Sequence::new(&mut items, Arity::Any);
///
/// binding.capture("1").unwrap();
/// binding.capture("2").unwrap();
/// drop(binding);
///
/// assert_eq!(items, vec![1, 2]);
/// ```
pub struct Sequence<'a, C, T>
where
    C: Gatherable<T>,
{
    variable: Rc<RefCell<&'a mut C>>,
    arity: Arity,
    parse: ParseFn<'a, T>,
}

impl<'a, C, T: 'a> Sequence<'a, C, T>
where
    C: Gatherable<T>,
{
    /// Create a gathering binding which converts tokens via `FromStr`.
    pub fn new(variable: &'a mut C, arity: Arity) -> Self
    where
        T: FromStr,
    {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            arity,
            parse: Box::new(from_str_parse::<T>),
        }
    }

    /// Create a gathering binding which converts tokens via a custom function.
    pub fn with_converter(
        variable: &'a mut C,
        arity: Arity,
        converter: fn(&str) -> Result<T, String>,
    ) -> Self {
        Self {
            variable: Rc::new(RefCell::new(variable)),
            arity,
            parse: Box::new(converter_parse(converter)),
        }
    }
}

impl<'a, C, T> TypedBinding<'a, T> for Sequence<'a, C, T>
where
    C: Gatherable<T>,
{
    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, token: &str) -> Result<(), CaptureError> {
        let value: T = (self.parse)(token)?;
        self.variable.borrow_mut().gather(value);
        Ok(())
    }

    fn arity(&self) -> Arity {
        self.arity
    }
}

impl<'a, C, T> AsOption for Sequence<'a, C, T> where C: Gatherable<T> {}
impl<'a, C, T> AsArgument for Sequence<'a, C, T> where C: Gatherable<T> {}

impl<T> Gatherable<T> for Vec<T> {
    fn gather(&mut self, item: T) {
        self.push(item);
    }
}

impl<T: Eq + Hash> Gatherable<T> for HashSet<T> {
    fn gather(&mut self, item: T) {
        self.insert(item);
    }
}
