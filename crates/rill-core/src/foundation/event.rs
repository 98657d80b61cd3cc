//! The event algebra.
//!
//! Every subscription delivers a sequence of [`Event`]s: zero or more
//! [`Event::Next`] values followed by at most one terminal event, either
//! [`Event::Error`] or [`Event::Completed`].
//!
//! ```rust
//! use rill_core::Event;
//!
//! let event: Event<i32, String> = Event::Next(1);
//! assert!(!event.is_terminal());
//! assert_eq!(event.map(|v| v * 2), Event::Next(2));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Event
// ============================================================================

/// One item of a stream: a value, a failure, or the success terminator.
///
/// Events serialize as `{"kind": "next", "value": ..}`,
/// `{"kind": "error", "value": ..}` or `{"kind": "completed"}`, so a
/// materialized stream can be stored or shipped as plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Event<T, E> {
    /// A produced value.
    Next(T),
    /// Terminal failure.
    Error(E),
    /// Terminal success.
    Completed,
}

impl<T, E> Event<T, E> {
    /// Returns the kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Next(_) => EventKind::Next,
            Self::Error(_) => EventKind::Error,
            Self::Completed => EventKind::Completed,
        }
    }

    /// Returns `true` for `Error` and `Completed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }

    /// Returns `true` for `Next`.
    pub fn is_next(&self) -> bool {
        matches!(self, Self::Next(_))
    }

    /// Returns the carried value, if this is a `Next` event.
    pub fn element(&self) -> Option<&T> {
        match self {
            Self::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the event and returns the carried value, if any.
    pub fn into_element(self) -> Option<T> {
        match self {
            Self::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the carried failure, if this is an `Error` event.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Borrows the payload of this event.
    pub fn as_ref(&self) -> Event<&T, &E> {
        match self {
            Self::Next(value) => Event::Next(value),
            Self::Error(error) => Event::Error(error),
            Self::Completed => Event::Completed,
        }
    }

    /// Transforms the value of a `Next` event, leaving terminals untouched.
    pub fn map<U, F>(self, f: F) -> Event<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Next(value) => Event::Next(f(value)),
            Self::Error(error) => Event::Error(error),
            Self::Completed => Event::Completed,
        }
    }

    /// Transforms the failure of an `Error` event, leaving the rest untouched.
    pub fn map_err<F2, F>(self, f: F) -> Event<T, F2>
    where
        F: FnOnce(E) -> F2,
    {
        match self {
            Self::Next(value) => Event::Next(value),
            Self::Error(error) => Event::Error(f(error)),
            Self::Completed => Event::Completed,
        }
    }

    /// Converts the event into a `Result`, with `None` standing for `Completed`.
    pub fn into_result(self) -> Option<Result<T, E>> {
        match self {
            Self::Next(value) => Some(Ok(value)),
            Self::Error(error) => Some(Err(error)),
            Self::Completed => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for Event<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Next(value),
            Err(error) => Self::Error(error),
        }
    }
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Event<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next(value) => write!(f, "next({value})"),
            Self::Error(error) => write!(f, "error({error})"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

// ============================================================================
// Event Kind
// ============================================================================

/// Payload-free classification of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A value.
    Next,
    /// A failure.
    Error,
    /// Success.
    Completed,
}

impl EventKind {
    /// Returns the lowercase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Error => "error",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` for the terminal kinds.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "next" => Ok(Self::Next),
            "error" => Ok(Self::Error),
            "completed" | "complete" => Ok(Self::Completed),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type E = Event<i32, String>;

    #[test]
    fn test_terminal_classification() {
        assert!(!E::Next(1).is_terminal());
        assert!(E::Error("boom".into()).is_terminal());
        assert!(E::Completed.is_terminal());
        assert!(EventKind::Completed.is_terminal());
        assert!(!EventKind::Next.is_terminal());
    }

    #[test]
    fn test_accessors() {
        let next = E::Next(7);
        assert_eq!(next.element(), Some(&7));
        assert_eq!(next.error(), None);

        let error = E::Error("boom".into());
        assert_eq!(error.error().map(String::as_str), Some("boom"));
        assert_eq!(error.into_element(), None);
    }

    #[test]
    fn test_map_leaves_terminals_untouched() {
        assert_eq!(E::Next(2).map(|v| v + 1), Event::Next(3));
        assert_eq!(E::Completed.map(|v| v + 1), Event::<i32, String>::Completed);
        assert_eq!(
            E::Error("x".into()).map_err(|e| e.len()),
            Event::<i32, usize>::Error(1)
        );
    }

    #[test]
    fn test_result_conversions() {
        assert_eq!(E::from(Ok(3)), Event::Next(3));
        assert_eq!(E::from(Err("bad".to_string())).kind(), EventKind::Error);
        assert_eq!(E::Completed.into_result(), None);
        assert_eq!(E::Next(1).into_result(), Some(Ok(1)));
    }

    #[test]
    fn test_display() {
        assert_eq!(E::Next(1).to_string(), "next(1)");
        assert_eq!(E::Error("boom".into()).to_string(), "error(boom)");
        assert_eq!(E::Completed.to_string(), "completed");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("NEXT".parse::<EventKind>(), Ok(EventKind::Next));
        assert_eq!("complete".parse::<EventKind>(), Ok(EventKind::Completed));
        assert!("other".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_serde_representation() {
        let json = serde_json::to_value(E::Next(5)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "next", "value": 5 }));

        let json = serde_json::to_value(E::Completed).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "completed" }));

        let nested: Event<Event<i32, String>, String> =
            serde_json::from_str(r#"{"kind":"next","value":{"kind":"error","value":"E"}}"#)
                .unwrap();
        assert_eq!(nested, Event::Next(Event::Error("E".into())));
    }
}
