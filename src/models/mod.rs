pub mod aggregate;
pub mod entry;
pub mod preferences;

pub use aggregate::{AggregateResponse, SparseAggregate};
pub use entry::{Entry, EntryType, HistoryPage, NamedRef, TypeFilter};
pub use preferences::{Preferences, PreferencesPatch, Theme};
