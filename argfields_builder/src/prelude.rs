//! Traits which, typically, may be imported without concern: `use argfields::prelude::*`.

/// Behaviour for multiple (0 to many) items T to be gathered together.
// Needs to be imported in order to implement a custom `Gatherable`.
pub trait Gatherable<T> {
    /// Gather a value into this `Gatherable`.
    fn gather(&mut self, item: T);
}

/// Behaviour for restricting (and documenting) the accepted values of a field.
// Needs to be imported in order to declare choices.
pub trait Choices<T> {
    fn choice(self, variant: T, description: impl Into<String>) -> Self;
}
