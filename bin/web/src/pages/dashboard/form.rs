//! Editable document fields shared by the add and edit forms.

use delib_api::{DocumentDetails, DocumentKind, DocumentUpdate, NewDocument};
use leptos::prelude::*;

/// Raw text of every document input, whatever the kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFields {
    /// Title, or magazine name.
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: String,
    pub available_copies: String,
    pub isbn: String,
    pub numpages: String,
    pub edition: String,
    pub month: String,
    pub issue: String,
    pub journal: String,
    pub number: String,
}

fn number<T: std::str::FromStr + Default>(value: &str) -> T {
    value.trim().parse().unwrap_or_default()
}

impl DocumentFields {
    pub fn from_update(update: &DocumentUpdate) -> Self {
        match update {
            DocumentUpdate::Book {
                title,
                publisher,
                isbn,
                edition,
                year,
            } => Self {
                title: title.clone(),
                publisher: publisher.clone(),
                isbn: isbn.clone(),
                edition: edition.to_string(),
                year: year.to_string(),
                ..Self::default()
            },
            DocumentUpdate::Magazine {
                name,
                publisher,
                isbn,
                year,
                month,
            } => Self {
                title: name.clone(),
                publisher: publisher.clone(),
                isbn: isbn.clone(),
                year: year.to_string(),
                month: month.to_string(),
                ..Self::default()
            },
            DocumentUpdate::Journal {
                title,
                journal,
                number,
                year,
                issue,
                publisher,
            } => Self {
                title: title.clone(),
                journal: journal.clone(),
                number: number.to_string(),
                year: year.to_string(),
                issue: issue.clone(),
                publisher: publisher.clone(),
                ..Self::default()
            },
        }
    }

    pub fn to_update(&self, kind: DocumentKind) -> DocumentUpdate {
        match kind {
            DocumentKind::Book => DocumentUpdate::Book {
                title: self.title.clone(),
                publisher: self.publisher.clone(),
                isbn: self.isbn.clone(),
                edition: number(&self.edition),
                year: number(&self.year),
            },
            DocumentKind::Magazine => DocumentUpdate::Magazine {
                name: self.title.clone(),
                publisher: self.publisher.clone(),
                isbn: self.isbn.clone(),
                year: number(&self.year),
                month: number(&self.month),
            },
            DocumentKind::Journal => DocumentUpdate::Journal {
                title: self.title.clone(),
                journal: self.journal.clone(),
                number: number(&self.number),
                year: number(&self.year),
                issue: self.issue.clone(),
                publisher: self.publisher.clone(),
            },
        }
    }

    pub fn to_new_document(&self, kind: DocumentKind, image_url: Option<String>) -> NewDocument {
        let details = match kind {
            DocumentKind::Book => DocumentDetails::Book {
                numpages: number(&self.numpages),
                edition: number(&self.edition),
                isbn: self.isbn.clone(),
            },
            DocumentKind::Magazine => DocumentDetails::Magazine {
                month: number(&self.month),
                isbn: self.isbn.clone(),
                issue: self.issue.clone(),
            },
            DocumentKind::Journal => DocumentDetails::Journal {
                journal: self.journal.clone(),
                number: number(&self.number),
                issue: self.issue.clone(),
            },
        };
        NewDocument {
            title: self.title.clone(),
            author: self.author.clone(),
            publisher: self.publisher.clone(),
            year: number(&self.year),
            available_copies: number(&self.available_copies),
            image_url,
            details,
        }
    }
}

/// One input of [`DocumentFields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Name,
    Author,
    Publisher,
    Year,
    AvailableCopies,
    Isbn,
    Numpages,
    Edition,
    Month,
    Issue,
    Journal,
    Number,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Name => "Name",
            Field::Author => "Author",
            Field::Publisher => "Publisher",
            Field::Year => "Year",
            Field::AvailableCopies => "Available copies",
            Field::Isbn => "ISBN",
            Field::Numpages => "Number of pages",
            Field::Edition => "Edition",
            Field::Month => "Month",
            Field::Issue => "Issue",
            Field::Journal => "Journal",
            Field::Number => "Number",
        }
    }

    fn is_numeric(self) -> bool {
        matches!(
            self,
            Field::Year
                | Field::AvailableCopies
                | Field::Numpages
                | Field::Edition
                | Field::Month
                | Field::Number
        )
    }

    fn slot(self, fields: &mut DocumentFields) -> &mut String {
        match self {
            Field::Title | Field::Name => &mut fields.title,
            Field::Author => &mut fields.author,
            Field::Publisher => &mut fields.publisher,
            Field::Year => &mut fields.year,
            Field::AvailableCopies => &mut fields.available_copies,
            Field::Isbn => &mut fields.isbn,
            Field::Numpages => &mut fields.numpages,
            Field::Edition => &mut fields.edition,
            Field::Month => &mut fields.month,
            Field::Issue => &mut fields.issue,
            Field::Journal => &mut fields.journal,
            Field::Number => &mut fields.number,
        }
    }

    fn get(self, fields: &DocumentFields) -> &str {
        match self {
            Field::Title | Field::Name => &fields.title,
            Field::Author => &fields.author,
            Field::Publisher => &fields.publisher,
            Field::Year => &fields.year,
            Field::AvailableCopies => &fields.available_copies,
            Field::Isbn => &fields.isbn,
            Field::Numpages => &fields.numpages,
            Field::Edition => &fields.edition,
            Field::Month => &fields.month,
            Field::Issue => &fields.issue,
            Field::Journal => &fields.journal,
            Field::Number => &fields.number,
        }
    }
}

/// Inputs of the add form for `kind`: common attributes, then kind fields.
pub fn add_fields(kind: DocumentKind) -> Vec<Field> {
    let mut list = vec![
        Field::Title,
        Field::Author,
        Field::Publisher,
        Field::Year,
        Field::AvailableCopies,
    ];
    list.extend_from_slice(match kind {
        DocumentKind::Book => &[Field::Numpages, Field::Edition, Field::Isbn][..],
        DocumentKind::Magazine => &[Field::Month, Field::Isbn, Field::Issue][..],
        DocumentKind::Journal => &[Field::Journal, Field::Number, Field::Issue][..],
    });
    list
}

/// Inputs of the edit form for `kind`.
pub fn edit_fields(kind: DocumentKind) -> &'static [Field] {
    match kind {
        DocumentKind::Book => &[
            Field::Title,
            Field::Publisher,
            Field::Isbn,
            Field::Edition,
            Field::Year,
        ],
        DocumentKind::Magazine => &[
            Field::Name,
            Field::Publisher,
            Field::Isbn,
            Field::Year,
            Field::Month,
        ],
        DocumentKind::Journal => &[
            Field::Title,
            Field::Journal,
            Field::Number,
            Field::Year,
            Field::Issue,
            Field::Publisher,
        ],
    }
}

/// Renders one labelled input per field, bound to `values`.
#[component]
pub fn FieldInputs(values: RwSignal<DocumentFields>, fields: Vec<Field>) -> impl IntoView {
    fields
        .into_iter()
        .map(|field| {
            let input_type = if field.is_numeric() { "number" } else { "text" };
            view! {
                <div class="form-row">
                    <label>{field.label()}</label>
                    <input
                        type=input_type
                        prop:value=move || values.with(|v| field.get(v).to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            values.update(|v| *field.slot(v) = value);
                        }
                    />
                </div>
            }
        })
        .collect_view()
}
