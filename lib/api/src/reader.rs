//! Reader endpoints: catalog search, borrowing, account and payment card.

use delib_core::DocumentId;
use delib_session::AuthToken;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

use crate::client::{ApiClient, segment};
use crate::error::ApiError;
use crate::wire::null_as_default;

/// Results per search page.
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Sort key for catalog search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Year,
    Publisher,
    AvailableCopies,
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "year" => Ok(Self::Year),
            "publisher" => Ok(Self::Publisher),
            "availableCopies" => Ok(Self::AvailableCopies),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// Raw values of the search form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub title: String,
    pub isbn: String,
    pub year: String,
    pub publisher: String,
    pub sort_by: String,
    pub sort_direction: String,
    pub only_available: bool,
}

/// Search request body. Absent criteria are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub year: Option<i32>,
    pub publisher: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub only_available: bool,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl From<&SearchForm> for SearchCriteria {
    fn from(form: &SearchForm) -> Self {
        Self {
            title: non_blank(&form.title),
            isbn: non_blank(&form.isbn),
            year: form.year.trim().parse().ok(),
            publisher: non_blank(&form.publisher),
            sort_by: form.sort_by.parse().ok(),
            sort_direction: Some(form.sort_direction.parse().unwrap_or_default()),
            only_available: form.only_available,
        }
    }
}

/// One page of a paged response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub content: Vec<T>,
    /// Zero-based page index.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Returns true if a later page exists.
    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    /// Returns true if an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// Returns true if the pager should be shown at all.
    pub fn is_paged(&self) -> bool {
        self.total_pages > 1
    }

    /// "Page 2 of 5".
    pub fn position(&self) -> String {
        format!("Page {} of {}", self.number + 1, self.total_pages)
    }
}

/// Bibliographic fields of one document variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogEntry {
    pub title: Option<String>,
    /// Magazines carry `name` instead of `title`.
    pub name: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i32>,
    pub image_url: Option<String>,
}

/// A document as the reader endpoints return it: exactly one variant is
/// expected to be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentVariants {
    pub book: Option<CatalogEntry>,
    pub magazine: Option<CatalogEntry>,
    pub journal_article: Option<CatalogEntry>,
}

impl DocumentVariants {
    fn entry(&self) -> Option<&CatalogEntry> {
        self.book
            .as_ref()
            .or(self.magazine.as_ref())
            .or(self.journal_article.as_ref())
    }

    fn field<'a>(&'a self, pick: impl Fn(&'a CatalogEntry) -> Option<&'a str>) -> Option<&'a str> {
        [&self.book, &self.magazine, &self.journal_article]
            .into_iter()
            .flatten()
            .find_map(pick)
    }

    /// Book or article title, or magazine name.
    pub fn title(&self) -> Option<&str> {
        self.book
            .as_ref()
            .and_then(|b| b.title.as_deref())
            .or_else(|| self.magazine.as_ref().and_then(|m| m.name.as_deref()))
            .or_else(|| self.journal_article.as_ref().and_then(|j| j.title.as_deref()))
    }

    pub fn publisher(&self) -> Option<&str> {
        self.field(|e| e.publisher.as_deref())
    }

    pub fn year(&self) -> Option<i32> {
        self.entry().and_then(|e| e.year)
    }

    pub fn image_url(&self) -> Option<&str> {
        self.field(|e| e.image_url.as_deref().filter(|u| !u.is_empty()))
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub document_id: DocumentId,
    #[serde(flatten)]
    pub variants: DocumentVariants,
    #[serde(default)]
    pub available_copies: Option<i32>,
}

impl CatalogDocument {
    /// Copies on the shelf; a missing count reads as zero.
    pub fn copies(&self) -> i32 {
        self.available_copies.unwrap_or(0)
    }

    /// Returns true if the document can be borrowed.
    pub fn is_available(&self) -> bool {
        self.copies() > 0
    }

    /// Local bookkeeping after a successful borrow.
    pub fn record_borrow(&mut self) {
        self.available_copies = Some((self.copies() - 1).max(0));
    }
}

/// Loan length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Days,
    Weeks,
}

/// Requested loan length, written like "4 weeks".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorrowDuration {
    pub value: u32,
    pub unit: DurationUnit,
}

impl BorrowDuration {
    /// The choices offered next to each borrow button.
    pub const CHOICES: [&'static str; 6] =
        ["1 week", "2 weeks", "3 weeks", "4 weeks", "7 days", "14 days"];

    fn unit_str(&self) -> &'static str {
        match (self.unit, self.value) {
            (DurationUnit::Weeks, 1) => "week",
            (DurationUnit::Weeks, _) => "weeks",
            (DurationUnit::Days, 1) => "day",
            (DurationUnit::Days, _) => "days",
        }
    }
}

impl Default for BorrowDuration {
    fn default() -> Self {
        Self {
            value: 4,
            unit: DurationUnit::Weeks,
        }
    }
}

impl fmt::Display for BorrowDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit_str())
    }
}

impl FromStr for BorrowDuration {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let value: u32 = parts.next().ok_or(())?.parse().map_err(|_| ())?;
        let unit = match parts.next().ok_or(())? {
            "day" | "days" => DurationUnit::Days,
            "week" | "weeks" => DurationUnit::Weeks,
            _ => return Err(()),
        };
        if value == 0 || parts.next().is_some() {
            return Err(());
        }
        Ok(Self { value, unit })
    }
}

impl Serialize for BorrowDuration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            value: u32,
            unit: &'a str,
        }
        Wire {
            value: self.value,
            unit: self.unit_str(),
        }
        .serialize(serializer)
    }
}

/// Reader account summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub total_overdue_fees: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub documents_borrowed: Vec<String>,
}

impl AccountInfo {
    /// Overdue fees as "$12.50".
    pub fn overdue_fees(&self) -> String {
        format!("${:.2}", self.total_overdue_fees.unwrap_or(0.0))
    }
}

/// Payment card on file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditCard {
    pub card_no: String,
    pub card_holder_name: String,
}

impl CreditCard {
    /// Returns true if neither field is filled in.
    pub fn is_blank(&self) -> bool {
        self.card_no.trim().is_empty() && self.card_holder_name.trim().is_empty()
    }
}

impl ApiClient {
    /// Runs a paged catalog search. `page` is zero-based.
    #[instrument(skip(self, token, criteria))]
    pub async fn search_documents(
        &self,
        token: &AuthToken,
        criteria: &SearchCriteria,
        page: u32,
    ) -> delib_core::Result<Page<CatalogDocument>, ApiError> {
        let path = format!("/api/client/search?page={page}&size={SEARCH_PAGE_SIZE}");
        let builder = self
            .request(Method::POST, &path, Some(token))
            .json(criteria);
        self.send_json(builder).await
    }

    /// Borrows a document for `duration`. Returns the borrowed document.
    #[instrument(skip(self, token), fields(document_id = %document_id, duration = %duration))]
    pub async fn borrow_document(
        &self,
        token: &AuthToken,
        document_id: &DocumentId,
        duration: BorrowDuration,
    ) -> delib_core::Result<DocumentVariants, ApiError> {
        let path = format!("/api/client/{}/borrow", segment(document_id.as_str()));
        let builder = self
            .request(Method::PUT, &path, Some(token))
            .json(&duration);
        let borrowed: Option<DocumentVariants> = self.send_optional_json(builder).await?;
        Ok(borrowed.unwrap_or_default())
    }

    /// Loads the reader's account summary.
    #[instrument(skip(self, token))]
    pub async fn account_info(
        &self,
        token: &AuthToken,
    ) -> delib_core::Result<AccountInfo, ApiError> {
        let builder = self.request(Method::GET, "/api/client/account-info", Some(token));
        self.send_json(builder).await
    }

    /// Loads the card on file, `None` when there is none.
    #[instrument(skip(self, token))]
    pub async fn credit_card(
        &self,
        token: &AuthToken,
    ) -> delib_core::Result<Option<CreditCard>, ApiError> {
        let builder = self.request(Method::GET, "/api/client/credit-card", Some(token));
        let card: Option<CreditCard> = self.fetch_optional_json(builder).await?;
        Ok(card.filter(|c| !c.is_blank()))
    }

    /// Adds or replaces the card on file.
    #[instrument(skip(self, token, card))]
    pub async fn save_credit_card(
        &self,
        token: &AuthToken,
        card: &CreditCard,
    ) -> delib_core::Result<CreditCard, ApiError> {
        let builder = self
            .request(Method::PUT, "/api/client/credit-card", Some(token))
            .json(card);
        let saved: Option<CreditCard> = self.send_optional_json(builder).await?;
        Ok(saved.unwrap_or_else(|| card.clone()))
    }

    /// Removes the card on file.
    #[instrument(skip(self, token))]
    pub async fn delete_credit_card(
        &self,
        token: &AuthToken,
    ) -> delib_core::Result<(), ApiError> {
        let builder = self.request(Method::DELETE, "/api/client/credit-card", Some(token));
        self.send_empty(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{authorization, serve};
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    fn token() -> AuthToken {
        AuthToken::new("abc123")
    }

    #[test]
    fn blank_form_fields_become_null() {
        let form = SearchForm {
            title: "  ".to_string(),
            year: "1999".to_string(),
            sort_by: String::new(),
            sort_direction: "desc".to_string(),
            ..SearchForm::default()
        };
        let criteria = SearchCriteria::from(&form);
        let json = serde_json::to_value(&criteria).expect("serialize");
        assert_eq!(
            json,
            json!({
                "title": null,
                "isbn": null,
                "year": 1999,
                "publisher": null,
                "sortBy": null,
                "sortDirection": "desc",
                "onlyAvailable": false,
            })
        );
    }

    #[test]
    fn unparsable_year_is_dropped() {
        let form = SearchForm {
            year: "nineteen".to_string(),
            sort_by: "availableCopies".to_string(),
            ..SearchForm::default()
        };
        let criteria = SearchCriteria::from(&form);
        assert_eq!(criteria.year, None);
        assert_eq!(criteria.sort_by, Some(SortField::AvailableCopies));
        assert_eq!(criteria.sort_direction, Some(SortDirection::Asc));
    }

    #[test]
    fn pager_bounds() {
        let page: Page<()> = Page {
            content: vec![],
            number: 0,
            total_pages: 3,
        };
        assert!(page.has_next());
        assert!(!page.has_previous());
        assert_eq!(page.position(), "Page 1 of 3");

        let last: Page<()> = Page {
            content: vec![],
            number: 2,
            total_pages: 3,
        };
        assert!(!last.has_next());
        assert!(last.has_previous());

        let single: Page<()> = Page {
            content: vec![],
            number: 0,
            total_pages: 1,
        };
        assert!(!single.is_paged());
    }

    #[test]
    fn document_fields_resolve_from_any_variant() {
        let doc: CatalogDocument = serde_json::from_value(json!({
            "documentId": "m-1",
            "magazine": {"name": "Byte", "publisher": "McGraw-Hill", "year": 1984, "imageUrl": "https://img/1"},
            "availableCopies": 2
        }))
        .expect("decode");
        assert_eq!(doc.variants.title(), Some("Byte"));
        assert_eq!(doc.variants.publisher(), Some("McGraw-Hill"));
        assert_eq!(doc.variants.year(), Some(1984));
        assert_eq!(doc.variants.image_url(), Some("https://img/1"));
        assert!(doc.is_available());
    }

    #[test]
    fn borrow_bookkeeping_never_goes_negative() {
        let mut doc: CatalogDocument = serde_json::from_value(json!({
            "documentId": "b-1",
            "book": {"title": "Dune"},
            "availableCopies": 1
        }))
        .expect("decode");
        doc.record_borrow();
        assert_eq!(doc.copies(), 0);
        assert!(!doc.is_available());
        doc.record_borrow();
        assert_eq!(doc.copies(), 0);

        let mut unknown: CatalogDocument =
            serde_json::from_value(json!({"documentId": "b-2"})).expect("decode");
        unknown.record_borrow();
        assert_eq!(unknown.available_copies, Some(0));
    }

    #[test]
    fn borrow_durations_parse_and_serialize() {
        for choice in BorrowDuration::CHOICES {
            let duration: BorrowDuration = choice.parse().expect(choice);
            assert_eq!(duration.to_string(), choice);
        }
        assert_eq!(BorrowDuration::default().to_string(), "4 weeks");
        assert!("0 weeks".parse::<BorrowDuration>().is_err());
        assert!("3 fortnights".parse::<BorrowDuration>().is_err());
        assert!("weeks".parse::<BorrowDuration>().is_err());

        let one_week: BorrowDuration = "1 week".parse().expect("parse");
        assert_eq!(
            serde_json::to_value(one_week).expect("serialize"),
            json!({"value": 1, "unit": "week"})
        );
    }

    #[test]
    fn account_fees_format() {
        let info: AccountInfo =
            serde_json::from_value(json!({"totalOverdueFees": 12.5, "documentsBorrowed": null}))
                .expect("decode");
        assert_eq!(info.overdue_fees(), "$12.50");
        assert!(info.documents_borrowed.is_empty());
        assert_eq!(AccountInfo::default().overdue_fees(), "$0.00");
    }

    #[tokio::test]
    async fn search_sends_criteria_and_paging() {
        let router = Router::new().route(
            "/api/client/search",
            post(
                |headers: HeaderMap,
                 Query(query): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    assert_eq!(authorization(&headers).as_deref(), Some("Bearer abc123"));
                    assert_eq!(query.get("page").map(String::as_str), Some("2"));
                    assert_eq!(query.get("size").map(String::as_str), Some("10"));
                    assert_eq!(body["title"], "Dune");
                    assert_eq!(body["onlyAvailable"], true);
                    Json(json!({
                        "content": [
                            {"documentId": "b-1", "book": {"title": "Dune", "year": 1965}, "availableCopies": 3}
                        ],
                        "number": 2,
                        "totalPages": 4
                    }))
                },
            ),
        );
        let client = serve(router).await;

        let criteria = SearchCriteria {
            title: Some("Dune".to_string()),
            only_available: true,
            ..SearchCriteria::default()
        };
        let page = client
            .search_documents(&token(), &criteria, 2)
            .await
            .expect("search");
        assert_eq!(page.number, 2);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.content[0].variants.title(), Some("Dune"));
        assert_eq!(page.content[0].copies(), 3);
    }

    #[tokio::test]
    async fn borrow_puts_duration_and_forwards_rejection() {
        let router = Router::new().route(
            "/api/client/{id}/borrow",
            put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"value": 2, "unit": "weeks"}));
                if id == "b-1" {
                    Ok(Json(json!({"book": {"title": "Dune"}})))
                } else {
                    Err((StatusCode::BAD_REQUEST, "Borrow limit reached"))
                }
            }),
        );
        let client = serve(router).await;
        let two_weeks: BorrowDuration = "2 weeks".parse().expect("parse");

        let borrowed = client
            .borrow_document(&token(), &DocumentId::new("b-1"), two_weeks)
            .await
            .expect("borrow");
        assert_eq!(borrowed.title(), Some("Dune"));

        let err = client
            .borrow_document(&token(), &DocumentId::new("b-2"), two_weeks)
            .await
            .unwrap_err();
        assert_eq!(
            err.current_context().user_message("Error borrowing the document."),
            "Borrow limit reached"
        );
    }

    #[tokio::test]
    async fn credit_card_lifecycle() {
        let router = Router::new()
            .route(
                "/api/client/credit-card",
                get(|| async { Json(json!({"cardNo": "4111", "cardHolderName": "Ada"})) })
                    .put(|Json(card): Json<Value>| async move { Json(card) })
                    .delete(|| async { StatusCode::OK }),
            )
            .route(
                "/api/client/account-info",
                get(|| async {
                    Json(json!({"name": "Ada", "email": "ada@example.com", "documentsBorrowed": ["Dune"]}))
                }),
            );
        let client = serve(router).await;

        let card = client.credit_card(&token()).await.expect("get card");
        assert_eq!(card.as_ref().map(|c| c.card_no.as_str()), Some("4111"));

        let updated = CreditCard {
            card_no: "5500".to_string(),
            card_holder_name: "Ada L".to_string(),
        };
        let saved = client
            .save_credit_card(&token(), &updated)
            .await
            .expect("save card");
        assert_eq!(saved, updated);

        client.delete_credit_card(&token()).await.expect("delete card");

        let info = client.account_info(&token()).await.expect("account");
        assert_eq!(info.name.as_deref(), Some("Ada"));
        assert_eq!(info.documents_borrowed, vec!["Dune".to_string()]);
    }

    #[tokio::test]
    async fn borrow_of_unknown_document_is_an_error() {
        let router = Router::new().route(
            "/api/client/{id}/borrow",
            put(|| async { (StatusCode::NOT_FOUND, "Document not found") }),
        );
        let client = serve(router).await;

        let err = client
            .borrow_document(&token(), &DocumentId::new("gone"), BorrowDuration::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.current_context(),
            &ApiError::Status {
                status: 404,
                message: Some("Document not found".to_string())
            }
        );
    }

    #[tokio::test]
    async fn borrow_escapes_the_document_id() {
        let router = Router::new().route(
            "/api/client/{id}/borrow",
            put(|Path(id): Path<String>| async move { Json(json!({"book": {"title": id}})) }),
        );
        let client = serve(router).await;

        let borrowed = client
            .borrow_document(&token(), &DocumentId::new("a/b?c"), BorrowDuration::default())
            .await
            .expect("borrow");
        assert_eq!(borrowed.title(), Some("a/b?c"));
    }

    #[tokio::test]
    async fn card_not_found_is_absent_on_read_but_fails_a_save() {
        let router = Router::new().route(
            "/api/client/credit-card",
            get(|| async { StatusCode::NOT_FOUND })
                .put(|| async { (StatusCode::NOT_FOUND, "Client not found") }),
        );
        let client = serve(router).await;

        assert_eq!(client.credit_card(&token()).await.expect("get"), None);

        let card = CreditCard {
            card_no: "4111".to_string(),
            card_holder_name: "Ada".to_string(),
        };
        let err = client.save_credit_card(&token(), &card).await.unwrap_err();
        assert_eq!(err.current_context().status(), Some(404));
        assert_eq!(err.current_context().server_message(), Some("Client not found"));
    }

    #[tokio::test]
    async fn missing_card_reads_as_none() {
        let router = Router::new().route(
            "/api/client/credit-card",
            get(|| async { Json(json!({"cardNo": "", "cardHolderName": ""})) }),
        );
        let client = serve(router).await;
        assert_eq!(client.credit_card(&token()).await.expect("get"), None);
    }
}
