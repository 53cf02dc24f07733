//! Choices offered when an item is granted to a character.
//!
//! A [`Choice`] lists options, some of which are generated from the
//! character (for example, every weapon the character is proficient with
//! but has not focused). [`activate_choices`] answers each choice from
//! preprogrammed answers or by asking a [`ChoicePrompt`], and reports the
//! payloads, attribute changes and granted items that follow.

mod explode;
mod model;
mod workflow;

pub use explode::{
    EmptyCatalog, GmBonus, OptionCatalog, StaticCatalog, explode_options, full_join, inner_join,
    resolve_options,
};
pub use model::{Choice, ChoiceKind, ChoiceOption, ProvidedItem};
pub use workflow::{
    ChoiceContext, ChoiceEnvironment, ChoiceItem, ChoiceOutcome, ChoicePrompt, ChoiceResolution,
    PayloadAssignment, PromptInput, PromptOption, PromptRequest, PromptResponse, activate_choices,
};
