//! Process-wide session state

mod holder;

pub use holder::SessionHolder;
