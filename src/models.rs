use serde::{Deserialize, Serialize};

/// Kind of donation
///
/// The wire format uses `"Cash"` / `"Book"`, with the empty string meaning
/// "not specified" (the server accepts and echoes it back).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DonationKind {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    Cash,
    Book,
}

impl DonationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationKind::Unspecified => "",
            DonationKind::Cash => "Cash",
            DonationKind::Book => "Book",
        }
    }

    /// Next value in display order, wrapping around
    pub fn cycle(&self) -> Self {
        match self {
            DonationKind::Unspecified => DonationKind::Cash,
            DonationKind::Cash => DonationKind::Book,
            DonationKind::Book => DonationKind::Unspecified,
        }
    }
}

/// Form field focus, shared by the donation form and the details dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Isbn,
    BookName,
    Author,
    Kind,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Isbn => FormField::BookName,
            FormField::BookName => FormField::Author,
            FormField::Author => FormField::Kind,
            FormField::Kind => FormField::Isbn,
        }
    }
}

/// Donation record owned by the server; the client holds a cached copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Row key assigned by the server on create, used for delete
    #[serde(default)]
    pub id: Option<i64>,
    /// Lookup key used by the read-by-id endpoint; may be empty
    #[serde(default)]
    pub donation_id: String,
    pub isbn: String,
    pub book_name: String,
    pub author: String,
    #[serde(rename = "donationType", default)]
    pub kind: DonationKind,
}

impl Donation {
    /// One-line list rendering, e.g. `Dune by Herbert (Book) - ISBN: 123`
    pub fn summary_line(&self) -> String {
        format!(
            "{} by {} ({}) - ISBN: {}",
            self.book_name,
            self.author,
            self.kind.as_str(),
            self.isbn
        )
    }

    /// Case-insensitive substring match on the book name only
    pub fn matches(&self, term: &str) -> bool {
        self.book_name
            .to_lowercase()
            .contains(&term.to_lowercase())
    }

    /// Identifier used for the update endpoint: the lookup key when present,
    /// falling back to the server row key
    pub fn update_identifier(&self) -> Option<String> {
        if !self.donation_id.is_empty() {
            Some(self.donation_id.clone())
        } else {
            self.id.map(|id| id.to_string())
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Isbn => Some(&mut self.isbn),
            FormField::BookName => Some(&mut self.book_name),
            FormField::Author => Some(&mut self.author),
            FormField::Kind => None,
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Isbn => &self.isbn,
            FormField::BookName => &self.book_name,
            FormField::Author => &self.author,
            FormField::Kind => self.kind.as_str(),
        }
    }
}

/// Draft state of the donation form: a `Donation` minus the server row key.
/// `donation_id` is carried but never edited by the form; it is submitted
/// empty and the server assigns the real one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DonationDraft {
    pub donation_id: String,
    pub isbn: String,
    pub book_name: String,
    pub author: String,
    #[serde(rename = "donationType")]
    pub kind: DonationKind,
}

impl DonationDraft {
    /// The required fields of the form (everything except the kind)
    pub fn is_complete(&self) -> bool {
        !self.isbn.is_empty() && !self.book_name.is_empty() && !self.author.is_empty()
    }

    pub fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Isbn => Some(&mut self.isbn),
            FormField::BookName => Some(&mut self.book_name),
            FormField::Author => Some(&mut self.author),
            FormField::Kind => None,
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Isbn => &self.isbn,
            FormField::BookName => &self.book_name,
            FormField::Author => &self.author,
            FormField::Kind => self.kind.as_str(),
        }
    }
}
