//! Librarian endpoints: catalog administration, client administration and
//! cover image upload.

use delib_core::{ClientEmail, DocumentId};
use delib_session::AuthToken;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument};

use crate::client::{ApiClient, segment};
use crate::error::ApiError;
use crate::wire::{lenient_string, null_as_default};

/// Catalog document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Book,
    Magazine,
    Journal,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [Self::Book, Self::Magazine, Self::Journal];

    /// Path segment used by the librarian endpoints.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Magazine => "magazine",
            Self::Journal => "journal",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Book => "Book",
            Self::Magazine => "Magazine",
            Self::Journal => "Journal",
        }
    }

    fn add_endpoint(&self) -> &'static str {
        match self {
            Self::Book => "/api/librarian/addbook",
            Self::Magazine => "/api/librarian/addmagazine",
            Self::Journal => "/api/librarian/addjournal",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "book" => Ok(Self::Book),
            "magazine" => Ok(Self::Magazine),
            "journal" => Ok(Self::Journal),
            _ => Err(()),
        }
    }
}

/// Fields specific to a document kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DocumentDetails {
    Book {
        numpages: u32,
        edition: u32,
        isbn: String,
    },
    Magazine {
        month: u32,
        isbn: String,
        issue: String,
    },
    Journal {
        journal: String,
        number: u32,
        issue: String,
    },
}

impl DocumentDetails {
    /// Empty fields for `kind`.
    pub fn blank(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Book => Self::Book {
                numpages: 0,
                edition: 0,
                isbn: String::new(),
            },
            DocumentKind::Magazine => Self::Magazine {
                month: 0,
                isbn: String::new(),
                issue: String::new(),
            },
            DocumentKind::Journal => Self::Journal {
                journal: String::new(),
                number: 0,
                issue: String::new(),
            },
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Book { .. } => DocumentKind::Book,
            Self::Magazine { .. } => DocumentKind::Magazine,
            Self::Journal { .. } => DocumentKind::Journal,
        }
    }
}

/// A document to add to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: i32,
    pub available_copies: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub details: DocumentDetails,
}

impl NewDocument {
    /// A blank form for `kind`.
    pub fn blank(kind: DocumentKind) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            publisher: String::new(),
            year: 0,
            available_copies: 0,
            image_url: None,
            details: DocumentDetails::blank(kind),
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.details.kind()
    }
}

/// A catalog document as the librarian listing returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfDocument {
    #[serde(default)]
    pub copy_id: i64,
    pub document_id: DocumentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub edition: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub issue: Option<String>,
    #[serde(default)]
    pub available_copies: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ShelfDocument {
    /// Title, or name for magazines.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }

    /// Case-insensitive substring match on the display title.
    pub fn matches(&self, term: &str) -> bool {
        self.display_title()
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

/// Editable fields per kind, sent to the update endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DocumentUpdate {
    Book {
        title: String,
        publisher: String,
        isbn: String,
        edition: u32,
        year: i32,
    },
    Magazine {
        name: String,
        publisher: String,
        isbn: String,
        year: i32,
        month: u32,
    },
    Journal {
        title: String,
        journal: String,
        number: u32,
        year: i32,
        issue: String,
        publisher: String,
    },
}

impl DocumentUpdate {
    /// Prefills the edit form from a listed document.
    pub fn from_shelf(kind: DocumentKind, doc: &ShelfDocument) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        match kind {
            DocumentKind::Book => Self::Book {
                title: text(&doc.title),
                publisher: text(&doc.publisher),
                isbn: text(&doc.isbn),
                edition: doc.edition.unwrap_or(0),
                year: doc.year.unwrap_or(0),
            },
            DocumentKind::Magazine => Self::Magazine {
                name: text(&doc.name),
                publisher: text(&doc.publisher),
                isbn: text(&doc.isbn),
                year: doc.year.unwrap_or(0),
                month: doc.month.unwrap_or(0),
            },
            DocumentKind::Journal => Self::Journal {
                title: text(&doc.title),
                journal: text(&doc.journal),
                number: doc.number.unwrap_or(0),
                year: doc.year.unwrap_or(0),
                issue: text(&doc.issue),
                publisher: text(&doc.publisher),
            },
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Book { .. } => DocumentKind::Book,
            Self::Magazine { .. } => DocumentKind::Magazine,
            Self::Journal { .. } => DocumentKind::Journal,
        }
    }
}

#[derive(Debug, Serialize)]
struct CopiesUpdate {
    copies: u32,
}

/// A client account created by a librarian.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

/// A client as listed for librarians.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub name: String,
    pub email: ClientEmail,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
    /// Ids of documents currently on loan.
    #[serde(default, deserialize_with = "null_as_default")]
    pub documents_borrowed: Vec<DocumentId>,
}

impl ClientRecord {
    /// Case-insensitive substring match on name or email.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.email.as_str().to_lowercase().contains(&term)
    }

    /// Local bookkeeping after a successful return.
    pub fn record_return(&mut self, document_id: &DocumentId) {
        self.documents_borrowed.retain(|id| id != document_id);
    }
}

/// Clients matching `term`, in listing order.
pub fn filter_clients(clients: &[ClientRecord], term: &str) -> Vec<ClientRecord> {
    clients.iter().filter(|c| c.matches(term)).cloned().collect()
}

/// Documents matching `term`, in listing order.
pub fn filter_shelf(documents: &[ShelfDocument], term: &str) -> Vec<ShelfDocument> {
    documents
        .iter()
        .filter(|d| d.matches(term))
        .cloned()
        .collect()
}

impl ApiClient {
    /// Uploads a cover image and returns its public URL.
    #[instrument(skip(self, token, bytes), fields(size = bytes.len()))]
    pub async fn upload_image(
        &self,
        token: &AuthToken,
        container: &str,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> delib_core::Result<String, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ApiError::Transport {
                reason: format!("invalid content type {content_type:?}: {e}"),
            })?;
        let form = Form::new()
            .text("containerName", container.to_string())
            .part("file", part);
        let builder = self
            .request(Method::POST, "/api/librarian/images", Some(token))
            .multipart(form);
        let url = self.send_text(builder).await?;
        Ok(url.trim().trim_matches('"').to_string())
    }

    /// Adds a document to the catalog.
    #[instrument(skip(self, token, document), fields(kind = %document.kind()))]
    pub async fn add_document(
        &self,
        token: &AuthToken,
        document: &NewDocument,
    ) -> delib_core::Result<(), ApiError> {
        let builder = self
            .request(Method::POST, document.kind().add_endpoint(), Some(token))
            .json(document);
        self.send_empty(builder).await?;
        info!(title = %document.title, "document added");
        Ok(())
    }

    /// Lists every document of `kind`.
    #[instrument(skip(self, token))]
    pub async fn list_documents(
        &self,
        token: &AuthToken,
        kind: DocumentKind,
    ) -> delib_core::Result<Vec<ShelfDocument>, ApiError> {
        let path = format!("/api/librarian/searchdocuments/{kind}");
        let builder = self.request(Method::GET, &path, Some(token));
        self.send_json(builder).await
    }

    /// Replaces the editable fields of a document.
    #[instrument(skip(self, token, update), fields(document_id = %document_id))]
    pub async fn update_document(
        &self,
        token: &AuthToken,
        document_id: &DocumentId,
        update: &DocumentUpdate,
    ) -> delib_core::Result<(), ApiError> {
        let path = format!(
            "/api/librarian/searchdocuments/{}/{}",
            update.kind(),
            segment(document_id.as_str())
        );
        let builder = self.request(Method::PUT, &path, Some(token)).json(update);
        self.send_empty(builder).await
    }

    /// Removes a document from the catalog.
    #[instrument(skip(self, token), fields(document_id = %document_id))]
    pub async fn delete_document(
        &self,
        token: &AuthToken,
        kind: DocumentKind,
        document_id: &DocumentId,
    ) -> delib_core::Result<(), ApiError> {
        let path = format!(
            "/api/librarian/searchdocuments/{kind}/{}",
            segment(document_id.as_str())
        );
        let builder = self.request(Method::DELETE, &path, Some(token));
        self.send_empty(builder).await
    }

    /// Sets the number of available copies.
    #[instrument(skip(self, token), fields(document_id = %document_id))]
    pub async fn update_copies(
        &self,
        token: &AuthToken,
        kind: DocumentKind,
        document_id: &DocumentId,
        copies: u32,
    ) -> delib_core::Result<(), ApiError> {
        let path = format!(
            "/api/librarian/updatecopies/{kind}/{}",
            segment(document_id.as_str())
        );
        let builder = self
            .request(Method::PUT, &path, Some(token))
            .json(&CopiesUpdate { copies });
        self.send_empty(builder).await
    }

    /// Creates a client account. A 400 means the client already exists.
    #[instrument(skip(self, token, client), fields(email = %client.email))]
    pub async fn register_client(
        &self,
        token: &AuthToken,
        client: &NewClient,
    ) -> delib_core::Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/api/librarian/register", Some(token))
            .json(client);
        self.send_empty(builder).await
    }

    /// Lists all clients with their current loans.
    #[instrument(skip(self, token))]
    pub async fn list_clients(
        &self,
        token: &AuthToken,
    ) -> delib_core::Result<Vec<ClientRecord>, ApiError> {
        let builder = self.request(Method::GET, "/api/librarian/clients", Some(token));
        self.send_json(builder).await
    }

    /// Updates the client currently registered under `email`.
    #[instrument(skip(self, token, client), fields(email = %email))]
    pub async fn update_client(
        &self,
        token: &AuthToken,
        email: &ClientEmail,
        client: &ClientRecord,
    ) -> delib_core::Result<(), ApiError> {
        let path = format!("/api/librarian/clients/{}", segment(email.as_str()));
        let builder = self.request(Method::PUT, &path, Some(token)).json(client);
        self.send_empty(builder).await
    }

    /// Deletes a client account.
    #[instrument(skip(self, token), fields(email = %email))]
    pub async fn delete_client(
        &self,
        token: &AuthToken,
        email: &ClientEmail,
    ) -> delib_core::Result<(), ApiError> {
        let path = format!("/api/librarian/clients/{}", segment(email.as_str()));
        let builder = self.request(Method::DELETE, &path, Some(token));
        self.send_empty(builder).await
    }

    /// Checks a borrowed document back in for a client.
    #[instrument(skip(self, token), fields(email = %email, document_id = %document_id))]
    pub async fn return_document(
        &self,
        token: &AuthToken,
        email: &ClientEmail,
        document_id: &DocumentId,
    ) -> delib_core::Result<(), ApiError> {
        let path = format!(
            "/api/librarian/return/{}/{}",
            segment(email.as_str()),
            segment(document_id.as_str())
        );
        let builder = self
            .request(Method::POST, &path, Some(token))
            .json(&serde_json::json!({}));
        self.send_empty(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{authorization, serve};
    use axum::body::Bytes;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::{Value, json};

    fn token() -> AuthToken {
        AuthToken::new("lib-token")
    }

    fn client_record(name: &str, email: &str) -> ClientRecord {
        ClientRecord {
            name: name.to_string(),
            email: ClientEmail::new(email),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zipcode: String::new(),
            documents_borrowed: vec![DocumentId::new("b-1"), DocumentId::new("m-2")],
        }
    }

    #[test]
    fn new_document_serializes_only_kind_fields() {
        let mut doc = NewDocument::blank(DocumentKind::Journal);
        doc.title = "On Computable Numbers".to_string();
        doc.available_copies = 2;
        let json = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(json["title"], "On Computable Numbers");
        assert_eq!(json["availableCopies"], 2);
        assert_eq!(json["journal"], "");
        assert!(json.get("numpages").is_none());
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn update_prefills_from_listing() {
        let doc: ShelfDocument = serde_json::from_value(json!({
            "copyId": 9,
            "documentId": "m-1",
            "name": "Byte",
            "publisher": "McGraw-Hill",
            "year": 1984,
            "month": 8,
            "availableCopies": 1
        }))
        .expect("decode");
        let update = DocumentUpdate::from_shelf(DocumentKind::Magazine, &doc);
        assert_eq!(update.kind(), DocumentKind::Magazine);
        assert_eq!(
            serde_json::to_value(&update).expect("serialize"),
            json!({"name": "Byte", "publisher": "McGraw-Hill", "isbn": "", "year": 1984, "month": 8})
        );
    }

    #[test]
    fn shelf_filter_matches_title_or_name() {
        let docs: Vec<ShelfDocument> = serde_json::from_value(json!([
            {"documentId": "b-1", "title": "Dune"},
            {"documentId": "m-1", "name": "Dune Digest"},
            {"documentId": "j-1", "title": "Nature"}
        ]))
        .expect("decode");
        let hits = filter_shelf(&docs, "DUNE");
        assert_eq!(hits.len(), 2);
        assert_eq!(filter_shelf(&docs, "").len(), 3);
    }

    #[test]
    fn client_filter_matches_name_or_email() {
        let clients = vec![
            client_record("Ada Lovelace", "ada@example.com"),
            client_record("Alan Turing", "alan@example.org"),
        ];
        assert_eq!(filter_clients(&clients, "love").len(), 1);
        assert_eq!(filter_clients(&clients, "EXAMPLE.ORG").len(), 1);
        assert_eq!(filter_clients(&clients, "example").len(), 2);
        assert!(filter_clients(&clients, "grace").is_empty());
    }

    #[test]
    fn return_bookkeeping_drops_only_that_document() {
        let mut client = client_record("Ada", "ada@example.com");
        client.record_return(&DocumentId::new("b-1"));
        assert_eq!(client.documents_borrowed, vec![DocumentId::new("m-2")]);
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!("Book".parse::<DocumentKind>(), Ok(DocumentKind::Book));
        assert_eq!("journal".parse::<DocumentKind>(), Ok(DocumentKind::Journal));
        assert!("pamphlet".parse::<DocumentKind>().is_err());
    }

    #[tokio::test]
    async fn add_document_posts_to_kind_endpoint() {
        let router = Router::new().route(
            "/api/librarian/addmagazine",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(authorization(&headers).as_deref(), Some("Bearer lib-token"));
                assert_eq!(body["month"], 0);
                StatusCode::CREATED
            }),
        );
        let client = serve(router).await;

        client
            .add_document(&token(), &NewDocument::blank(DocumentKind::Magazine))
            .await
            .expect("add");

        let err = client
            .add_document(&token(), &NewDocument::blank(DocumentKind::Book))
            .await
            .unwrap_err();
        assert!(matches!(
            err.current_context(),
            ApiError::Status { status: 404, .. }
        ));
    }

    #[tokio::test]
    async fn upload_returns_url_text() {
        let router = Router::new().route(
            "/api/librarian/images",
            post(|body: Bytes| async move {
                let body = String::from_utf8_lossy(&body).to_string();
                assert!(body.contains("containerName"));
                assert!(body.contains("delib-image-container"));
                assert!(body.contains("cover.png"));
                "https://cdn.example.com/cover.png"
            }),
        );
        let client = serve(router).await;

        let url = client
            .upload_image(
                &token(),
                "delib-image-container",
                "cover.png",
                "image/png",
                vec![0x89, 0x50, 0x4e, 0x47],
            )
            .await
            .expect("upload");
        assert_eq!(url, "https://cdn.example.com/cover.png");
    }

    #[tokio::test]
    async fn document_maintenance_endpoints() {
        let router = Router::new()
            .route(
                "/api/librarian/searchdocuments/{kind}",
                get(|Path(kind): Path<String>| async move {
                    assert_eq!(kind, "journal");
                    Json(json!([
                        {"copyId": 1, "documentId": "j-1", "title": "Nature", "issue": 12, "availableCopies": 4}
                    ]))
                }),
            )
            .route(
                "/api/librarian/searchdocuments/{kind}/{id}",
                put(|Path((kind, id)): Path<(String, String)>, Json(body): Json<Value>| async move {
                    assert_eq!((kind.as_str(), id.as_str()), ("journal", "j-1"));
                    assert_eq!(body["issue"], "12");
                    StatusCode::OK
                })
                .delete(|Path((_, id)): Path<(String, String)>| async move {
                    if id == "j-1" { StatusCode::OK } else { StatusCode::NOT_FOUND }
                }),
            )
            .route(
                "/api/librarian/updatecopies/{kind}/{id}",
                put(|Json(body): Json<Value>| async move {
                    assert_eq!(body, json!({"copies": 7}));
                    StatusCode::OK
                }),
            );
        let client = serve(router).await;
        let token = token();

        let docs = client
            .list_documents(&token, DocumentKind::Journal)
            .await
            .expect("list");
        assert_eq!(docs[0].issue.as_deref(), Some("12"));

        let update = DocumentUpdate::from_shelf(DocumentKind::Journal, &docs[0]);
        client
            .update_document(&token, &docs[0].document_id, &update)
            .await
            .expect("update");
        client
            .update_copies(&token, DocumentKind::Journal, &docs[0].document_id, 7)
            .await
            .expect("copies");
        client
            .delete_document(&token, DocumentKind::Journal, &docs[0].document_id)
            .await
            .expect("delete");
    }

    #[tokio::test]
    async fn client_administration_endpoints() {
        let router = Router::new()
            .route(
                "/api/librarian/register",
                post(|Json(body): Json<Value>| async move {
                    if body["email"] == "taken@example.com" {
                        Err((StatusCode::BAD_REQUEST, "Client already registered"))
                    } else {
                        Ok(StatusCode::CREATED)
                    }
                }),
            )
            .route(
                "/api/librarian/clients",
                get(|| async {
                    Json(json!([
                        {"name": "Ada", "email": "ada@example.com", "documentsBorrowed": null},
                        {"name": "Alan", "email": "alan@example.com", "documentsBorrowed": ["b-1"]}
                    ]))
                }),
            )
            .route(
                "/api/librarian/clients/{email}",
                put(|Path(email): Path<String>| async move {
                    assert_eq!(email, "ada@example.com");
                    StatusCode::OK
                })
                .delete(|| async { StatusCode::OK }),
            )
            .route(
                "/api/librarian/return/{email}/{id}",
                post(|Path((email, id)): Path<(String, String)>| async move {
                    assert_eq!((email.as_str(), id.as_str()), ("alan@example.com", "b-1"));
                    StatusCode::OK
                }),
            );
        let client = serve(router).await;
        let token = token();

        let new_client = NewClient {
            email: "taken@example.com".to_string(),
            ..NewClient::default()
        };
        let err = client
            .register_client(&token, &new_client)
            .await
            .unwrap_err();
        assert!(err.current_context().is_validation());

        let clients = client.list_clients(&token).await.expect("list");
        assert!(clients[0].documents_borrowed.is_empty());
        assert_eq!(clients[1].documents_borrowed, vec![DocumentId::new("b-1")]);

        client
            .update_client(&token, &clients[0].email, &clients[0])
            .await
            .expect("update");
        client
            .return_document(&token, &clients[1].email, &DocumentId::new("b-1"))
            .await
            .expect("return");
        client
            .delete_client(&token, &clients[0].email)
            .await
            .expect("delete");
    }

    #[tokio::test]
    async fn reserved_characters_stay_inside_their_segment() {
        let router = Router::new().route(
            "/api/librarian/return/{email}/{id}",
            post(|Path((email, id)): Path<(String, String)>| async move {
                assert_eq!((email.as_str(), id.as_str()), ("o'neil#1/x?y@example.com", "j/7"));
                StatusCode::OK
            }),
        );
        let client = serve(router).await;

        let email = ClientEmail::new("o'neil#1/x?y@example.com");
        client
            .return_document(&token(), &email, &DocumentId::new("j/7"))
            .await
            .expect("return reaches the return endpoint");

        let url = client.url(&format!(
            "/api/librarian/clients/{}",
            segment(email.as_str())
        ));
        assert!(url.ends_with("/api/librarian/clients/o%27neil%231%2Fx%3Fy%40example.com"));
    }
}
