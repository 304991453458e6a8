//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - identity does
/// not matter, only the attribute values do. A computed `DealQuote` or a
/// `DemandForecast` is a value object; an `Alert` (which has an id and a
/// read/unread lifecycle) is an entity.
///
/// To "modify" a value object, create a new one. Immutability keeps these
/// types safe to share across threads and trivially comparable in tests.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
