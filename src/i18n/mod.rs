//! Static word-substitution translation for display screens.
//!
//! The dictionary is a comma-separated resource, one row per source word,
//! columns ordered by [`Language`] index. It is loaded once at startup into an
//! immutable [`Translator`] that is passed by reference to whatever needs
//! translation; there is no process-global dictionary state.

mod translator;

pub use translator::{Language, Translator, TranslatorError};
