//! Type-erased values passed to and returned from accessors.

use std::any::{Any, type_name};
use std::fmt;

/// An owned value of any `'static + Debug` type.
///
/// A `Value` remembers the name of the type it was created from and can render itself with `Debug`,
/// which is what invocation diagnostics report when an argument is rejected.
///
/// ## Examples
/// ```rust
/// use introspect::Value;
///
/// let v = Value::new(String::from("Ada"));
/// assert!(v.is::<String>());
/// assert_eq!(format!("{v:?}"), "\"Ada\"");
/// assert_eq!(v.downcast::<String>().ok().as_deref(), Some("Ada"));
/// ```
pub struct Value {
    inner: Box<dyn Any>,
    type_name: &'static str,
    fmt: fn(&dyn Any, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl Value {
    pub fn new<T: Any + fmt::Debug>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: type_name::<T>(),
            fmt: debug_as::<T>,
        }
    }

    /// The value returned by setters.
    pub fn unit() -> Self {
        Self::new(())
    }

    pub fn is_unit(&self) -> bool {
        self.is::<()>()
    }

    /// Full name of the runtime type (`alloc::string::String`).
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.downcast_mut::<T>()
    }

    /// Take the value out as a `T`, or get the `Value` back unchanged.
    pub fn downcast<T: Any>(self) -> Result<T, Value> {
        let Value { inner, type_name, fmt } = self;
        match inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Value { inner, type_name, fmt }),
        }
    }
}

fn debug_as<T: Any + fmt::Debug>(value: &dyn Any, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => fmt::Debug::fmt(value, f),
        None => f.write_str("<opaque>"),
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.fmt)(&*self.inner, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_to_the_wrong_type_returns_the_value() {
        let v = Value::new(42_i64);
        let v = match v.downcast::<i32>() {
            Ok(_) => panic!("i64 must not downcast to i32"),
            Err(v) => v,
        };
        assert_eq!(v.type_name(), "i64");
        assert_eq!(format!("{v:?}"), "42");
        assert_eq!(v.downcast::<i64>().ok(), Some(42));
    }

    #[test]
    fn unit_values() {
        assert!(Value::unit().is_unit());
        assert!(!Value::new(0_u8).is_unit());
        assert_eq!(format!("{:?}", Value::unit()), "()");
    }

    #[test]
    fn downcast_mut_edits_in_place() {
        let mut v = Value::new(vec![1, 2]);
        if let Some(items) = v.downcast_mut::<Vec<i32>>() {
            items.push(3);
        }
        assert_eq!(v.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
    }
}
