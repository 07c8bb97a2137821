//! Local persistence adapters

mod selections;

pub use selections::FileSelectionStore;
