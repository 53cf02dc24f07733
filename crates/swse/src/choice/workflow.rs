//! Walking an item's choices and collecting what the answers grant.

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::choice::explode::{EmptyCatalog, OptionCatalog, explode_options};
use crate::choice::model::{Choice, ChoiceKind, ChoiceOption, ProvidedItem};
use crate::interpreter::{NoVariables, VariableContext};
use crate::reduce::{AttributeSource, NoAttributes};
use crate::types::AttributeChange;

/// An item that carries choices, such as a feat or a species.
#[derive(Debug, Clone, PartialEq, Default, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct ChoiceItem {
    #[builder(default)]
    #[serde(default)]
    pub name: String,

    #[builder(default)]
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// Circumstances of a choice activation.
#[derive(Debug, Clone, Default, Builder)]
pub struct ChoiceContext {
    #[builder(default)]
    pub is_first_level: bool,

    /// Answers meant for this item.
    #[builder(default)]
    pub item_answers: Vec<String>,

    /// Answers that may apply to any item.
    #[builder(default)]
    pub general_answers: Vec<String>,

    /// Importing a character: choices without a preprogrammed answer are
    /// skipped instead of asked.
    #[builder(default)]
    pub is_upload: bool,
}

/// The character-side collaborators used to generate options.
#[derive(Clone, Copy)]
pub struct ChoiceEnvironment<'a> {
    pub attributes: &'a dyn AttributeSource,
    pub variables: &'a dyn VariableContext,
    pub catalog: &'a dyn OptionCatalog,
}

impl<'a> ChoiceEnvironment<'a> {
    pub fn new(
        attributes: &'a dyn AttributeSource,
        variables: &'a dyn VariableContext,
        catalog: &'a dyn OptionCatalog,
    ) -> Self {
        Self {
            attributes,
            variables,
            catalog,
        }
    }
}

impl Default for ChoiceEnvironment<'_> {
    fn default() -> Self {
        Self::new(&NoAttributes, &NoVariables, &EmptyCatalog)
    }
}

/// Asks the player. Implementations block until an answer is given.
pub trait ChoicePrompt {
    fn prompt(&mut self, request: &PromptRequest) -> PromptResponse;
}

impl<F> ChoicePrompt for F
where
    F: FnMut(&PromptRequest) -> PromptResponse,
{
    fn prompt(&mut self, request: &PromptRequest) -> PromptResponse {
        self(request)
    }
}

/// What the player is asked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptRequest {
    pub title: String,
    pub input: PromptInput,
    /// How many answers are expected.
    pub selections: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptInput {
    /// A numeric field.
    Integer,
    /// A pick among named options; empty when nothing is available.
    Options(Vec<PromptOption>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptOption {
    pub name: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// One entry per answered selection.
    Selected(Vec<String>),
    /// The prompt was closed without answering.
    Cancelled,
}

/// A value stored on the item under `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadAssignment {
    pub key: String,
    pub value: String,
}

/// Everything the answers change on the item.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChoiceResolution {
    /// Answers shown in the item's name.
    pub chosen: Vec<String>,
    /// Payloads in assignment order; a later assignment to a key wins.
    pub payloads: Vec<PayloadAssignment>,
    /// Attribute changes appended to the item.
    pub changes: Vec<AttributeChange>,
}

impl ChoiceResolution {
    /// The last value assigned to `key`.
    pub fn payload(&self, key: &str) -> Option<&str> {
        self.payloads
            .iter()
            .rev()
            .find(|assignment| assignment.key == key)
            .map(|assignment| assignment.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOutcome {
    /// False when the player cancelled a prompt.
    pub success: bool,
    /// Items granted by the picked options, to be added afterwards.
    pub items: Vec<ProvidedItem>,
    pub resolution: ChoiceResolution,
}

impl ChoiceOutcome {
    fn cancelled() -> Self {
        Self {
            success: false,
            items: Vec::new(),
            resolution: ChoiceResolution::default(),
        }
    }
}

/// Resolve every choice on `item`.
///
/// Choices are answered in order: first-level-only choices are skipped
/// after first level, preprogrammed answers are applied without asking, and
/// in upload mode anything left unanswered is skipped. Otherwise `prompt`
/// is asked. A cancelled prompt aborts the whole activation.
pub fn activate_choices(
    item: &ChoiceItem,
    context: &ChoiceContext,
    env: &ChoiceEnvironment<'_>,
    prompt: &mut dyn ChoicePrompt,
) -> ChoiceOutcome {
    let mut items = Vec::new();
    let mut resolution = ChoiceResolution::default();

    for choice in &item.choices {
        if choice.first_level_only && !context.is_first_level {
            debug!(item = %item.name, choice = %choice.description, "skipping first level choice");
            continue;
        }

        let (title, input, options) = match choice.kind {
            ChoiceKind::Integer => (choice.description.clone(), PromptInput::Integer, Vec::new()),
            ChoiceKind::Select => {
                let options =
                    explode_options(&choice.options, env.attributes, env.variables, env.catalog);
                if let Some(answer) = preprogrammed_answer(&options, context) {
                    debug!(item = %item.name, %answer, "applying preprogrammed answer");
                    resolve_answer(choice, &answer, &options, &mut resolution, &mut items);
                    continue;
                }
                let title = match options.len() {
                    0 => choice.no_options.as_ref(),
                    1 => choice.one_option.as_ref(),
                    _ => None,
                }
                .unwrap_or(&choice.description)
                .clone();
                let listed = options
                    .iter()
                    .map(|option| PromptOption {
                        name: option.name.clone(),
                        is_default: option.is_default,
                    })
                    .collect();
                (title, PromptInput::Options(listed), options)
            }
        };

        if context.is_upload {
            info!(item = %item.name, choice = %choice.description, "unresolved choice skipped during upload");
            continue;
        }

        let request = PromptRequest {
            title,
            input,
            selections: choice.selections(),
        };
        match prompt.prompt(&request) {
            PromptResponse::Cancelled => {
                debug!(item = %item.name, "choice prompt cancelled");
                return ChoiceOutcome::cancelled();
            }
            PromptResponse::Selected(answers) => {
                for answer in &answers {
                    resolve_answer(choice, answer, &options, &mut resolution, &mut items);
                }
            }
        }
    }

    ChoiceOutcome {
        success: true,
        items,
        resolution,
    }
}

/// A lone item answer wins outright; otherwise the first option named (or
/// valued) by an item answer, then by a general answer.
fn preprogrammed_answer(options: &[ChoiceOption], context: &ChoiceContext) -> Option<String> {
    if let [answer] = context.item_answers.as_slice() {
        return Some(answer.clone());
    }
    [&context.item_answers, &context.general_answers]
        .into_iter()
        .find_map(|answers| {
            options
                .iter()
                .find(|option| answers_option(answers, option))
                .map(|option| option.name.clone())
        })
}

fn answers_option(answers: &[String], option: &ChoiceOption) -> bool {
    answers.iter().any(|answer| {
        *answer == option.name || (!option.value.is_falsy() && *answer == option.value.to_string())
    })
}

fn resolve_answer(
    choice: &Choice,
    answer: &str,
    options: &[ChoiceOption],
    resolution: &mut ChoiceResolution,
    items: &mut Vec<ProvidedItem>,
) {
    if choice.show_selection_in_name {
        resolution.chosen.push(answer.to_string());
    }
    if choice.kind == ChoiceKind::Integer {
        resolution.payloads.push(PayloadAssignment {
            key: choice.payload_key.clone().unwrap_or_else(|| "payload".to_string()),
            value: answer.to_string(),
        });
        return;
    }
    let Some(option) = options.iter().find(|option| option.name == answer) else {
        debug!(%answer, "answer matches no option");
        return;
    };
    resolution.payloads.extend(
        option
            .payload_entries()
            .into_iter()
            .map(|(key, value)| PayloadAssignment { key, value }),
    );
    resolution.changes.extend(option.attributes.iter().cloned());
    items.extend(option.provided_items.iter().cloned());
}
