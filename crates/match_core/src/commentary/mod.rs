//! Commentary: template storage, selection policy and the line composer.

mod composer;
mod policy;
mod recency;
mod repository;

#[cfg(test)]
mod policy_tests;

pub use composer::{fill_placeholders, CommentaryComposer};
pub use policy::{CommentaryPolicy, KindPolicy};
pub use recency::RecencyWindow;
pub use repository::{
    NoTemplates, TemplateLibrary, TemplateRepository, EN_FUN_JSON, EN_NEUTRAL_JSON, GENERIC_KEY,
};
