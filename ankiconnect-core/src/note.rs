//! Notes and the media attached to their fields.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where duplicate checks look when adding a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicateScope {
    /// Only the target deck.
    #[serde(rename = "deck")]
    CurrentDeck,
    /// Every deck of the collection.
    #[default]
    #[serde(rename = "all")]
    AllDecks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateScopeOptions {
    pub deck_name: String,
    pub check_children: bool,
    pub check_all_models: bool,
}

impl DuplicateScopeOptions {
    pub fn new(deck_name: impl Into<String>) -> Self {
        DuplicateScopeOptions {
            deck_name: deck_name.into(),
            check_children: true,
            check_all_models: true,
        }
    }
}

/// Note creation options as AnkiConnect expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    pub allow_duplicate: bool,
    pub duplicate_scope: DuplicateScope,
    pub duplicate_scope_options: DuplicateScopeOptions,
}

impl NoteOptions {
    pub fn for_deck(deck_name: impl Into<String>) -> Self {
        NoteOptions {
            allow_duplicate: false,
            duplicate_scope: DuplicateScope::default(),
            duplicate_scope_options: DuplicateScopeOptions::new(deck_name),
        }
    }
}

/// Content source of a media file. Exactly one source is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSource {
    /// Absolute path on the machine running Anki.
    Path(PathBuf),
    /// URL Anki downloads the file from.
    Url(String),
    /// Base64-encoded file contents.
    Data(String),
}

impl MediaSource {
    pub fn data(bytes: impl AsRef<[u8]>) -> Self {
        MediaSource::Data(STANDARD.encode(bytes))
    }
}

/// A media file stored alongside a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    /// Name of the file in the Anki media folder.
    pub filename: String,
    #[serde(flatten)]
    pub source: MediaSource,
    /// Skip storing the file when its MD5 hash matches this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_hash: Option<String>,
    /// Note fields the media is appended to. Filled in by [`Note`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl MediaFile {
    pub fn new(filename: impl Into<String>, source: MediaSource) -> Self {
        MediaFile {
            filename: filename.into(),
            source,
            skip_hash: None,
            fields: Vec::new(),
        }
    }

    pub fn with_skip_hash(mut self, hash: impl Into<String>) -> Self {
        self.skip_hash = Some(hash.into());
        self
    }
}

/// Text of one note field plus the media attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldContent {
    pub text: String,
    pub images: Vec<MediaFile>,
    pub audio: Vec<MediaFile>,
    pub video: Vec<MediaFile>,
}

impl FieldContent {
    pub fn text(text: impl Into<String>) -> Self {
        FieldContent {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_images(mut self, images: Vec<MediaFile>) -> Self {
        self.images = images;
        self
    }
}

impl From<&str> for FieldContent {
    fn from(text: &str) -> Self {
        FieldContent::text(text)
    }
}

/// A note to add to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub deck_name: String,
    pub model_name: String,
    pub options: NoteOptions,
    /// Field name to content, in model order.
    pub fields: IndexMap<String, FieldContent>,
    pub tags: Vec<String>,
}

/// Wire form of a [`Note`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteParams {
    pub deck_name: String,
    pub model_name: String,
    pub fields: IndexMap<String, String>,
    pub tags: Vec<String>,
    pub options: NoteOptions,
    pub audio: Vec<MediaFile>,
    pub video: Vec<MediaFile>,
    pub picture: Vec<MediaFile>,
}

impl Note {
    pub fn new(deck_name: impl Into<String>, model_name: impl Into<String>) -> Self {
        let deck_name = deck_name.into();
        Note {
            options: NoteOptions::for_deck(deck_name.clone()),
            deck_name,
            model_name: model_name.into(),
            fields: IndexMap::new(),
            tags: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, content: impl Into<FieldContent>) -> Self {
        self.fields.insert(name.into(), content.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// A note of the `Basic` model with Front, Back, Image and Examples fields.
    pub fn basic_card(
        deck_name: impl Into<String>,
        front: &str,
        back: &str,
        examples: &str,
        images: Vec<MediaFile>,
        tags: Vec<String>,
    ) -> Self {
        let mut note = Note::new(deck_name, "Basic")
            .field("Front", front)
            .field("Back", back)
            .field("Image", FieldContent::text("").with_images(images))
            .field("Examples", examples);
        note.tags = tags;
        note
    }

    /// Flatten fields and media into the shape `addNote` expects. Each media
    /// file is tagged with the field it belongs to.
    pub fn to_params(&self) -> NoteParams {
        let mut params = NoteParams {
            deck_name: self.deck_name.clone(),
            model_name: self.model_name.clone(),
            fields: IndexMap::with_capacity(self.fields.len()),
            tags: self.tags.clone(),
            options: self.options.clone(),
            audio: Vec::new(),
            video: Vec::new(),
            picture: Vec::new(),
        };

        for (name, content) in &self.fields {
            params.fields.insert(name.clone(), content.text.clone());
            let attach = |files: &[MediaFile], into: &mut Vec<MediaFile>| {
                into.extend(files.iter().cloned().map(|mut file| {
                    file.fields = vec![name.clone()];
                    file
                }));
            };
            attach(&content.audio, &mut params.audio);
            attach(&content.video, &mut params.video);
            attach(&content.images, &mut params.picture);
        }
        params
    }
}
