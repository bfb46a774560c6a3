//! Inflected form → lemma lexicon.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Inflections of the words the directive patterns match on.
const DEFAULT_FORMS: &[(&str, &[&str])] = &[
    (
        "снизить",
        &["снизить", "снизьте", "снизь", "снизим", "снизил", "снизила", "снизили", "снизив"],
    ),
    (
        "уменьшить",
        &[
            "уменьшить", "уменьшите", "уменьшь", "уменьшим", "уменьшил", "уменьшила", "уменьшили",
            "уменьшив",
        ],
    ),
    (
        "повысить",
        &["повысить", "повысьте", "повысь", "повысим", "повысил", "повысила", "повысили", "повысив"],
    ),
    (
        "увеличить",
        &[
            "увеличить", "увеличьте", "увеличь", "увеличим", "увеличил", "увеличила", "увеличили",
            "увеличив",
        ],
    ),
    (
        "база",
        &["база", "базы", "базе", "базу", "базой", "базою", "баз", "базам", "базами", "базах"],
    ),
    (
        "базальный",
        &[
            "базальный", "базального", "базальному", "базальным", "базальном", "базальная",
            "базальной", "базальную", "базальное", "базальные", "базальных", "базальными",
        ],
    ),
    (
        "коэффициент",
        &[
            "коэффициент", "коэффициента", "коэффициенту", "коэффициентом", "коэффициенте",
            "коэффициенты", "коэффициентов",
        ],
    ),
    (
        "завтрак",
        &["завтрак", "завтрака", "завтраку", "завтраком", "завтраке", "завтраки", "завтраков"],
    ),
    ("обед", &["обед", "обеда", "обеду", "обедом", "обеде", "обеды", "обедов"]),
    ("ужин", &["ужин", "ужина", "ужину", "ужином", "ужине", "ужины", "ужинов"]),
];

static DEFAULT_LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::from_entries(DEFAULT_FORMS.iter().flat_map(|(lemma, forms)| {
        forms
            .iter()
            .map(move |form| ((*form).to_string(), (*lemma).to_string()))
    }))
});

/// Built-in lexicon.
#[must_use]
pub fn default_lexicon() -> Lexicon {
    DEFAULT_LEXICON.clone()
}

/// Extra lexicon entries from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Inflected form → lemma.
    #[serde(default)]
    pub extra_lemmas: HashMap<String, String>,
}

/// Maps lowercase inflected forms to lemmas.
///
/// Unknown forms are their own lemma.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    forms: HashMap<String, String>,
}

impl Lexicon {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut lexicon = Self::default();
        lexicon.extend(entries);
        lexicon
    }

    /// Add entries; later entries replace earlier ones for the same form.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        self.forms.extend(
            entries
                .into_iter()
                .map(|(form, lemma)| (form.to_lowercase(), lemma.to_lowercase())),
        );
    }

    #[must_use]
    pub fn lemma<'a>(&'a self, form: &'a str) -> &'a str {
        self.forms.get(form).map_or(form, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
