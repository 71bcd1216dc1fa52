//! Named AnkiConnect actions with typed parameters and results.
//!
//! Every action is written once against [`Invoke`], so the same method
//! returns a future on [`AsyncClient`](crate::AsyncClient), a plain result on
//! [`BlockingClient`](crate::BlockingClient) and a
//! [`Deferred`](crate::Deferred) handle on [`Batch`](crate::Batch).

use crate::invoke::Invoke;
use ankiconnect_core::request::to_param;
use ankiconnect_core::{
    params, AnkiError, CardAnswer, CardId, DeckConfigId, DeckId, Ease, MediaSource, ModelId, Note,
    NoteId, Params, Reordering, Result,
};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// Modification time of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardModTime {
    pub card_id: CardId,
    #[serde(rename = "mod")]
    pub modified: i64,
}

/// Modification time of one note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteModTime {
    pub note_id: NoteId,
    #[serde(rename = "mod")]
    pub modified: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStyling {
    pub css: String,
}

/// Front and back HTML of one card template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSides {
    #[serde(rename = "Front")]
    pub front: String,
    #[serde(rename = "Back")]
    pub back: String,
}

/// A card template as accepted by `createModel` and `modelTemplateAdd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub sides: TemplateSides,
}

impl CardTemplate {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            name: None,
            sides: TemplateSides {
                front: front.into(),
                back: back.into(),
            },
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFont {
    pub font: String,
    pub size: u32,
}

/// Which parts of a model `find_and_replace_in_models` rewrites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceScope {
    pub front: bool,
    pub back: bool,
    pub css: bool,
}

/// One row of the review log, as exchanged by `cardReviews` and
/// `insertReviews`.
///
/// Travels as a 9-element array in the field order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReviewEntry {
    pub review_time: i64,
    pub card_id: CardId,
    pub usn: i64,
    pub button_pressed: i64,
    pub new_interval: i64,
    pub previous_interval: i64,
    pub new_factor: i64,
    pub review_duration: i64,
    pub review_type: i64,
}

impl Serialize for ReviewEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (
            self.review_time,
            self.card_id,
            self.usn,
            self.button_pressed,
            self.new_interval,
            self.previous_interval,
            self.new_factor,
            self.review_duration,
            self.review_type,
        )
            .serialize(serializer)
    }
}

/// One review of a card as returned by `getReviewsOfCards`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardReview {
    pub id: i64,
    pub usn: i64,
    pub ease: i64,
    #[serde(rename = "ivl")]
    pub interval: i64,
    #[serde(rename = "lastIvl")]
    pub last_interval: i64,
    pub factor: i64,
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub permission: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_api_key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

fn deck_query(deck: &str) -> String {
    format!("deck:\"{}\"", deck)
}

/// Add `key` only when `value` is present.
fn with_optional<V: Serialize>(
    params: Result<Params>,
    key: &str,
    value: Option<V>,
) -> Result<Params> {
    let mut params = params?;
    if let Some(value) = value {
        params.insert(key.to_string(), to_param(key, &value)?);
    }
    Ok(params)
}

fn note_params(notes: &[Note]) -> Result<Params> {
    let notes: Vec<_> = notes.iter().map(Note::to_params).collect();
    params! { "notes" => notes }
}

fn media_params(filename: &str, source: &MediaSource, delete_existing: bool) -> Result<Params> {
    let mut params = params! {
        "filename" => filename,
        "deleteExisting" => delete_existing,
    }?;
    match to_param("source", source)? {
        Value::Object(source) => params.extend(source),
        other => {
            return Err(AnkiError::invalid_argument(format!(
                "media source must encode as an object, got {}",
                other
            )))
        }
    }
    Ok(params)
}

/// The AnkiConnect action surface, available on every [`Invoke`].
///
/// One method per AnkiConnect action, grouped as the AnkiConnect reference
/// groups them. Actions without a wrapper can be sent with
/// [`Invoke::invoke`] and a [`Params`] map.
pub trait Actions: Invoke {
    // Cards

    /// Ease factor of each card, `None` for unknown cards.
    fn get_ease_factors(&self, cards: &[CardId]) -> Self::Pending<'_, Vec<Option<i64>>> {
        self.invoke_with("getEaseFactors", params! { "cards" => cards })
    }

    /// Set the ease factor of each card; `ease_factors` must pair with `cards`.
    fn set_ease_factors(
        &self,
        cards: &[CardId],
        ease_factors: &[i64],
    ) -> Self::Pending<'_, Vec<bool>> {
        if cards.len() != ease_factors.len() {
            return self.reject(
                "setEaseFactors",
                AnkiError::invalid_argument(format!(
                    "'cards' and 'easeFactors' must have the same length ({} != {})",
                    cards.len(),
                    ease_factors.len()
                )),
            );
        }
        self.invoke_with(
            "setEaseFactors",
            params! { "cards" => cards, "easeFactors" => ease_factors },
        )
    }

    /// `true` if at least one card was suspended.
    fn suspend(&self, cards: &[CardId]) -> Self::Pending<'_, bool> {
        self.invoke_with("suspend", params! { "cards" => cards })
    }

    fn unsuspend(&self, cards: &[CardId]) -> Self::Pending<'_, bool> {
        self.invoke_with("unsuspend", params! { "cards" => cards })
    }

    fn suspended(&self, card: CardId) -> Self::Pending<'_, bool> {
        self.invoke_with("suspended", params! { "card" => card })
    }

    /// Suspension status of each card, `None` for unknown cards.
    fn are_suspended(&self, cards: &[CardId]) -> Self::Pending<'_, Vec<Option<bool>>> {
        self.invoke_with("areSuspended", params! { "cards" => cards })
    }

    fn are_due(&self, cards: &[CardId]) -> Self::Pending<'_, Vec<bool>> {
        self.invoke_with("areDue", params! { "cards" => cards })
    }

    /// Most recent interval of each card. Negative values are seconds,
    /// positive values days.
    fn get_intervals(&self, cards: &[CardId]) -> Self::Pending<'_, Vec<i64>> {
        self.invoke_with(
            "getIntervals",
            params! { "cards" => cards, "complete" => false },
        )
    }

    /// Every interval of each card.
    fn get_all_intervals(&self, cards: &[CardId]) -> Self::Pending<'_, Vec<Vec<i64>>> {
        self.invoke_with(
            "getIntervals",
            params! { "cards" => cards, "complete" => true },
        )
    }

    fn find_cards(&self, query: &str) -> Self::Pending<'_, Vec<CardId>> {
        self.invoke_with("findCards", params! { "query" => query })
    }

    /// Notes of the given cards, deduplicated.
    fn cards_to_notes(&self, cards: &[CardId]) -> Self::Pending<'_, Vec<NoteId>> {
        self.invoke_with("cardsToNotes", params! { "cards" => cards })
    }

    fn cards_mod_time(&self, cards: &[CardId]) -> Self::Pending<'_, Vec<CardModTime>> {
        self.invoke_with("cardsModTime", params! { "cards" => cards })
    }

    fn cards_info(&self, cards: &[CardId]) -> Self::Pending<'_, Vec<Value>> {
        self.invoke_with("cardsInfo", params! { "cards" => cards })
    }

    /// Reset the cards to new.
    fn forget_cards(&self, cards: &[CardId]) -> Self::Pending<'_, ()> {
        self.invoke_with("forgetCards", params! { "cards" => cards })
    }

    fn relearn_cards(&self, cards: &[CardId]) -> Self::Pending<'_, ()> {
        self.invoke_with("relearnCards", params! { "cards" => cards })
    }

    fn answer_cards(&self, answers: &[CardAnswer]) -> Self::Pending<'_, Vec<bool>> {
        self.invoke_with("answerCards", params! { "answers" => answers })
    }

    // Decks

    fn deck_names(&self) -> Self::Pending<'_, Vec<String>> {
        self.invoke("deckNames", Params::new())
    }

    fn deck_names_and_ids(&self) -> Self::Pending<'_, HashMap<String, DeckId>> {
        self.invoke("deckNamesAndIds", Params::new())
    }

    /// Cards grouped by the name of the deck holding them.
    fn get_decks(&self, cards: &[CardId]) -> Self::Pending<'_, HashMap<String, Vec<CardId>>> {
        self.invoke_with("getDecks", params! { "cards" => cards })
    }

    /// Create a deck, or return the id of the existing one.
    fn create_deck(&self, deck: &str) -> Self::Pending<'_, DeckId> {
        self.invoke_with("createDeck", params! { "deck" => deck })
    }

    fn get_cards_in_deck(&self, deck: &str) -> Self::Pending<'_, Vec<CardId>> {
        self.find_cards(&deck_query(deck))
    }

    fn get_notes_in_deck(&self, deck: &str) -> Self::Pending<'_, Vec<NoteId>> {
        self.find_notes(&deck_query(deck))
    }

    /// Move cards to a deck, creating it if needed.
    fn change_deck(&self, cards: &[CardId], deck: &str) -> Self::Pending<'_, ()> {
        self.invoke_with("changeDeck", params! { "cards" => cards, "deck" => deck })
    }

    fn delete_decks(&self, decks: &[&str], cards_too: bool) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "deleteDecks",
            params! { "decks" => decks, "cardsToo" => cards_too },
        )
    }

    fn get_deck_config(&self, deck: &str) -> Self::Pending<'_, Value> {
        self.invoke_with("getDeckConfig", params! { "deck" => deck })
    }

    fn save_deck_config(&self, config: &Value) -> Self::Pending<'_, bool> {
        self.invoke_with("saveDeckConfig", params! { "config" => config })
    }

    fn set_deck_config_id(
        &self,
        decks: &[&str],
        config_id: DeckConfigId,
    ) -> Self::Pending<'_, bool> {
        self.invoke_with(
            "setDeckConfigId",
            params! { "decks" => decks, "configId" => config_id },
        )
    }

    /// New configuration group named `name`, cloned from `clone_from` or the
    /// default group. Anki answers `false` when the source group is missing.
    fn clone_deck_config_id(
        &self,
        name: &str,
        clone_from: Option<DeckConfigId>,
    ) -> Self::Pending<'_, Value> {
        self.invoke_with(
            "cloneDeckConfigId",
            params! { "name" => name, "cloneFrom" => clone_from },
        )
    }

    fn remove_deck_config_id(&self, config_id: DeckConfigId) -> Self::Pending<'_, bool> {
        self.invoke_with("removeDeckConfigId", params! { "configId" => config_id })
    }

    /// Statistics keyed by deck id.
    fn get_deck_stats(&self, decks: &[&str]) -> Self::Pending<'_, HashMap<String, Value>> {
        self.invoke_with("getDeckStats", params! { "decks" => decks })
    }

    // Graphical

    /// Open the card browser on `query`; returns the ids of the cards found.
    fn gui_browse(
        &self,
        query: &str,
        reorder: Option<Reordering>,
    ) -> Self::Pending<'_, Vec<CardId>> {
        let params = with_optional(params! { "query" => query }, "reorderCards", reorder);
        self.invoke_with("guiBrowse", params)
    }

    fn gui_select_card(&self, card: CardId) -> Self::Pending<'_, bool> {
        self.invoke_with("guiSelectCard", params! { "card" => card })
    }

    fn gui_selected_notes(&self) -> Self::Pending<'_, Vec<NoteId>> {
        self.invoke("guiSelectedNotes", Params::new())
    }

    /// Card under review, `None` when not reviewing.
    fn gui_edit_note(&self, note: NoteId) -> Self::Pending<'_, ()> {
        self.invoke_with("guiEditNote", params! { "note" => note })
    }

    /// Open the import dialog, preselecting `path` when given.
    fn gui_import_file(&self, path: Option<&str>) -> Self::Pending<'_, ()> {
        self.invoke_with("guiImportFile", params! { "path" => path })
    }

    fn gui_current_card(&self) -> Self::Pending<'_, Option<Value>> {
        self.invoke("guiCurrentCard", Params::new())
    }

    fn gui_start_card_timer(&self) -> Self::Pending<'_, bool> {
        self.invoke("guiStartCardTimer", Params::new())
    }

    fn gui_show_question(&self) -> Self::Pending<'_, bool> {
        self.invoke("guiShowQuestion", Params::new())
    }

    fn gui_show_answer(&self) -> Self::Pending<'_, bool> {
        self.invoke("guiShowAnswer", Params::new())
    }

    fn gui_answer_card(&self, ease: Ease) -> Self::Pending<'_, bool> {
        self.invoke_with("guiAnswerCard", params! { "ease" => ease })
    }

    fn gui_undo(&self) -> Self::Pending<'_, bool> {
        self.invoke("guiUndo", Params::new())
    }

    fn gui_deck_overview(&self, name: &str) -> Self::Pending<'_, bool> {
        self.invoke_with("guiDeckOverview", params! { "name" => name })
    }

    fn gui_deck_browser(&self) -> Self::Pending<'_, ()> {
        self.invoke("guiDeckBrowser", Params::new())
    }

    fn gui_deck_review(&self, name: &str) -> Self::Pending<'_, bool> {
        self.invoke_with("guiDeckReview", params! { "name" => name })
    }

    fn gui_exit_anki(&self) -> Self::Pending<'_, ()> {
        self.invoke("guiExitAnki", Params::new())
    }

    fn gui_check_database(&self) -> Self::Pending<'_, bool> {
        self.invoke("guiCheckDatabase", Params::new())
    }

    // Media

    /// Store a file in the media folder; returns the name it was stored under.
    fn store_media_file(
        &self,
        filename: &str,
        source: &MediaSource,
        delete_existing: bool,
    ) -> Self::Pending<'_, String> {
        self.invoke_with(
            "storeMediaFile",
            media_params(filename, source, delete_existing),
        )
    }

    /// Base64-encoded contents of the file, or `false` when it is missing.
    fn retrieve_media_file(&self, filename: &str) -> Self::Pending<'_, Value> {
        self.invoke_with("retrieveMediaFile", params! { "filename" => filename })
    }

    fn get_media_files_names(&self, pattern: &str) -> Self::Pending<'_, Vec<String>> {
        self.invoke_with("getMediaFilesNames", params! { "pattern" => pattern })
    }

    fn get_media_dir_path(&self) -> Self::Pending<'_, String> {
        self.invoke("getMediaDirPath", Params::new())
    }

    fn delete_media_file(&self, filename: &str) -> Self::Pending<'_, ()> {
        self.invoke_with("deleteMediaFile", params! { "filename" => filename })
    }

    // Miscellaneous

    fn request_permission(&self) -> Self::Pending<'_, Permission> {
        self.invoke("requestPermission", Params::new())
    }

    fn version(&self) -> Self::Pending<'_, u32> {
        self.invoke("version", Params::new())
    }

    /// Synchronise the local collection with AnkiWeb.
    /// Describe the API; `actions: None` lists every action.
    fn api_reflect(&self, scopes: &[&str], actions: Option<&[&str]>) -> Self::Pending<'_, Value> {
        self.invoke_with("apiReflect", params! { "scopes" => scopes, "actions" => actions })
    }

    fn sync(&self) -> Self::Pending<'_, ()> {
        self.invoke("sync", Params::new())
    }

    fn get_profiles(&self) -> Self::Pending<'_, Vec<String>> {
        self.invoke("getProfiles", Params::new())
    }

    fn get_active_profile(&self) -> Self::Pending<'_, String> {
        self.invoke("getActiveProfile", Params::new())
    }

    fn load_profile(&self, name: &str) -> Self::Pending<'_, bool> {
        self.invoke_with("loadProfile", params! { "name" => name })
    }

    fn export_package(
        &self,
        deck: &str,
        path: &str,
        include_sched: bool,
    ) -> Self::Pending<'_, bool> {
        self.invoke_with(
            "exportPackage",
            params! { "deck" => deck, "path" => path, "includeSched" => include_sched },
        )
    }

    fn import_package(&self, path: &str) -> Self::Pending<'_, bool> {
        self.invoke_with("importPackage", params! { "path" => path })
    }

    fn reload_collection(&self) -> Self::Pending<'_, ()> {
        self.invoke("reloadCollection", Params::new())
    }

    // Models

    fn model_names(&self) -> Self::Pending<'_, Vec<String>> {
        self.invoke("modelNames", Params::new())
    }

    fn model_names_and_ids(&self) -> Self::Pending<'_, HashMap<String, ModelId>> {
        self.invoke("modelNamesAndIds", Params::new())
    }

    fn model_field_names(&self, model_name: &str) -> Self::Pending<'_, Vec<String>> {
        self.invoke_with("modelFieldNames", params! { "modelName" => model_name })
    }

    fn find_models_by_id(&self, model_ids: &[ModelId]) -> Self::Pending<'_, Vec<Value>> {
        self.invoke_with("findModelsById", params! { "modelIds" => model_ids })
    }

    fn find_models_by_name(&self, model_names: &[&str]) -> Self::Pending<'_, Vec<Value>> {
        self.invoke_with("findModelsByName", params! { "modelNames" => model_names })
    }

    fn model_field_descriptions(&self, model_name: &str) -> Self::Pending<'_, Vec<String>> {
        self.invoke_with("modelFieldDescriptions", params! { "modelName" => model_name })
    }

    fn model_field_fonts(
        &self,
        model_name: &str,
    ) -> Self::Pending<'_, HashMap<String, FieldFont>> {
        self.invoke_with("modelFieldFonts", params! { "modelName" => model_name })
    }

    /// Field names used on the front and back of each template.
    fn model_fields_on_templates(
        &self,
        model_name: &str,
    ) -> Self::Pending<'_, HashMap<String, Vec<Vec<String>>>> {
        self.invoke_with("modelFieldsOnTemplates", params! { "modelName" => model_name })
    }

    fn create_model(
        &self,
        model_name: &str,
        in_order_fields: &[&str],
        card_templates: &[CardTemplate],
        css: Option<&str>,
        is_cloze: bool,
    ) -> Self::Pending<'_, Value> {
        if card_templates.is_empty() {
            return self.reject(
                "createModel",
                AnkiError::invalid_argument("'cardTemplates' must not be empty"),
            );
        }
        self.invoke_with(
            "createModel",
            params! {
                "modelName" => model_name,
                "inOrderFields" => in_order_fields,
                "css" => css,
                "isCloze" => is_cloze,
                "cardTemplates" => card_templates,
            },
        )
    }

    fn model_templates(
        &self,
        model_name: &str,
    ) -> Self::Pending<'_, HashMap<String, TemplateSides>> {
        self.invoke_with("modelTemplates", params! { "modelName" => model_name })
    }

    fn model_styling(&self, model_name: &str) -> Self::Pending<'_, ModelStyling> {
        self.invoke_with("modelStyling", params! { "modelName" => model_name })
    }

    /// Overwrite the named templates of a model; templates not listed keep
    /// their content.
    fn update_model_templates(
        &self,
        model_name: &str,
        templates: &HashMap<String, TemplateSides>,
    ) -> Self::Pending<'_, ()> {
        let model = serde_json::json!({ "name": model_name, "templates": templates });
        self.invoke_with("updateModelTemplates", params! { "model" => model })
    }

    fn update_model_styling(&self, model_name: &str, css: &str) -> Self::Pending<'_, ()> {
        let model = serde_json::json!({ "name": model_name, "css": css });
        self.invoke_with("updateModelStyling", params! { "model" => model })
    }

    /// Number of replacements made.
    fn find_and_replace_in_models(
        &self,
        model_name: &str,
        find_text: &str,
        replace_text: &str,
        scope: ReplaceScope,
    ) -> Self::Pending<'_, u64> {
        let model = serde_json::json!({
            "modelName": model_name,
            "findText": find_text,
            "replaceText": replace_text,
            "front": scope.front,
            "back": scope.back,
            "css": scope.css,
        });
        self.invoke_with("findAndReplaceInModels", params! { "model" => model })
    }

    fn model_template_rename(
        &self,
        model_name: &str,
        old_template_name: &str,
        new_template_name: &str,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "modelTemplateRename",
            params! {
                "modelName" => model_name,
                "oldTemplateName" => old_template_name,
                "newTemplateName" => new_template_name,
            },
        )
    }

    fn model_template_reposition(
        &self,
        model_name: &str,
        template_name: &str,
        index: usize,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "modelTemplateReposition",
            params! {
                "modelName" => model_name,
                "templateName" => template_name,
                "index" => index,
            },
        )
    }

    fn model_template_add(
        &self,
        model_name: &str,
        template: &CardTemplate,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "modelTemplateAdd",
            params! { "modelName" => model_name, "template" => template },
        )
    }

    fn model_template_remove(
        &self,
        model_name: &str,
        template_name: &str,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "modelTemplateRemove",
            params! { "modelName" => model_name, "templateName" => template_name },
        )
    }

    fn model_field_rename(
        &self,
        model_name: &str,
        old_field_name: &str,
        new_field_name: &str,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "modelFieldRename",
            params! {
                "modelName" => model_name,
                "oldFieldName" => old_field_name,
                "newFieldName" => new_field_name,
            },
        )
    }

    fn model_field_reposition(
        &self,
        model_name: &str,
        field_name: &str,
        index: usize,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "modelFieldReposition",
            params! {
                "modelName" => model_name,
                "fieldName" => field_name,
                "index" => index,
            },
        )
    }

    /// Append a field, or insert it at `index` when given.
    fn model_field_add(
        &self,
        model_name: &str,
        field_name: &str,
        index: Option<usize>,
    ) -> Self::Pending<'_, ()> {
        let params = with_optional(
            params! { "modelName" => model_name, "fieldName" => field_name },
            "index",
            index,
        );
        self.invoke_with("modelFieldAdd", params)
    }

    fn model_field_remove(&self, model_name: &str, field_name: &str) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "modelFieldRemove",
            params! { "modelName" => model_name, "fieldName" => field_name },
        )
    }

    fn model_field_set_font(
        &self,
        model_name: &str,
        field_name: &str,
        font: &str,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "modelFieldSetFont",
            params! { "modelName" => model_name, "fieldName" => field_name, "font" => font },
        )
    }

    fn model_field_set_font_size(
        &self,
        model_name: &str,
        field_name: &str,
        font_size: u32,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "modelFieldSetFontSize",
            params! {
                "modelName" => model_name,
                "fieldName" => field_name,
                "fontSize" => font_size,
            },
        )
    }

    /// `false` on Anki versions without field descriptions.
    fn model_field_set_description(
        &self,
        model_name: &str,
        field_name: &str,
        description: &str,
    ) -> Self::Pending<'_, bool> {
        self.invoke_with(
            "modelFieldSetDescription",
            params! {
                "modelName" => model_name,
                "fieldName" => field_name,
                "description" => description,
            },
        )
    }

    // Notes

    fn find_notes(&self, query: &str) -> Self::Pending<'_, Vec<NoteId>> {
        self.invoke_with("findNotes", params! { "query" => query })
    }

    fn notes_info(&self, notes: &[NoteId]) -> Self::Pending<'_, Vec<Value>> {
        self.invoke_with("notesInfo", params! { "notes" => notes })
    }

    fn notes_mod_time(&self, notes: &[NoteId]) -> Self::Pending<'_, Vec<NoteModTime>> {
        self.invoke_with("notesModTime", params! { "notes" => notes })
    }

    fn delete_notes(&self, notes: &[NoteId]) -> Self::Pending<'_, ()> {
        self.invoke_with("deleteNotes", params! { "notes" => notes })
    }

    fn remove_empty_notes(&self) -> Self::Pending<'_, ()> {
        self.invoke("removeEmptyNotes", Params::new())
    }

    fn add_note(&self, note: &Note) -> Self::Pending<'_, NoteId> {
        self.invoke_with("addNote", params! { "note" => note.to_params() })
    }

    /// Id of each added note, `None` where the note could not be added.
    fn add_notes(&self, notes: &[Note]) -> Self::Pending<'_, Vec<Option<NoteId>>> {
        self.invoke_with("addNotes", note_params(notes))
    }

    fn can_add_notes(&self, notes: &[Note]) -> Self::Pending<'_, Vec<bool>> {
        self.invoke_with("canAddNotes", note_params(notes))
    }

    /// Open the Add Cards dialog prefilled with `note`.
    fn gui_add_note(&self, note: &Note) -> Self::Pending<'_, NoteId> {
        self.invoke_with("guiAddCards", params! { "note" => note.to_params() })
    }

    /// Add space-separated `tags` to the notes.
    fn add_tags(&self, notes: &[NoteId], tags: &str) -> Self::Pending<'_, ()> {
        self.invoke_with("addTags", params! { "notes" => notes, "tags" => tags })
    }

    fn remove_tags(&self, notes: &[NoteId], tags: &str) -> Self::Pending<'_, ()> {
        self.invoke_with("removeTags", params! { "notes" => notes, "tags" => tags })
    }

    fn get_tags(&self) -> Self::Pending<'_, Vec<String>> {
        self.invoke("getTags", Params::new())
    }

    fn clear_unused_tags(&self) -> Self::Pending<'_, ()> {
        self.invoke("clearUnusedTags", Params::new())
    }

    fn replace_tags(
        &self,
        notes: &[NoteId],
        tag_to_replace: &str,
        replace_with_tag: &str,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "replaceTags",
            params! {
                "notes" => notes,
                "tag_to_replace" => tag_to_replace,
                "replace_with_tag" => replace_with_tag,
            },
        )
    }

    fn replace_tags_in_all_notes(
        &self,
        tag_to_replace: &str,
        replace_with_tag: &str,
    ) -> Self::Pending<'_, ()> {
        self.invoke_with(
            "replaceTagsInAllNotes",
            params! { "tag_to_replace" => tag_to_replace, "replace_with_tag" => replace_with_tag },
        )
    }

    fn get_note_tags(&self, note: NoteId) -> Self::Pending<'_, Vec<String>> {
        self.invoke_with("getNoteTags", params! { "note" => note })
    }

    /// Replace every tag of the note.
    fn update_note_tags(&self, note: NoteId, tags: &[&str]) -> Self::Pending<'_, ()> {
        self.invoke_with("updateNoteTags", params! { "note" => note, "tags" => tags })
    }

    // Statistics

    fn get_num_cards_reviewed_today(&self) -> Self::Pending<'_, u64> {
        self.invoke("getNumCardsReviewedToday", Params::new())
    }

    /// `(date, count)` pairs, most recent day first.
    fn get_num_cards_reviewed_by_day(&self) -> Self::Pending<'_, Vec<(String, u64)>> {
        self.invoke("getNumCardsReviewedByDay", Params::new())
    }

    fn get_collection_stats_html(&self, whole_collection: bool) -> Self::Pending<'_, String> {
        self.invoke_with(
            "getCollectionStatsHTML",
            params! { "wholeCollection" => whole_collection },
        )
    }

    /// Reviews of `deck` logged after `start_id` (a millisecond timestamp).
    fn card_reviews(&self, deck: &str, start_id: i64) -> Self::Pending<'_, Vec<ReviewEntry>> {
        self.invoke_with("cardReviews", params! { "deck" => deck, "startID" => start_id })
    }

    /// Reviews keyed by card id.
    fn get_reviews_of_cards(
        &self,
        cards: &[CardId],
    ) -> Self::Pending<'_, HashMap<String, Vec<CardReview>>> {
        self.invoke_with("getReviewsOfCards", params! { "cards" => cards })
    }

    /// Time of the latest review of `deck`, 0 when it has none.
    fn get_latest_review_id(&self, deck: &str) -> Self::Pending<'_, i64> {
        self.invoke_with("getLatestReviewID", params! { "deck" => deck })
    }

    fn insert_reviews(&self, reviews: &[ReviewEntry]) -> Self::Pending<'_, ()> {
        self.invoke_with("insertReviews", params! { "reviews" => reviews })
    }
}

impl<I: Invoke> Actions for I {}
