use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub credentials: Credentials<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub site: SiteRef<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SiteRef<'a> {
    pub content_url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignInResponse {
    pub credentials: SignedIn,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignedIn {
    pub token: String,
    pub site: IdRef,
    pub user: IdRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Pagination {
    #[serde(deserialize_with = "number_or_string")]
    pub total_available: u64,
}

/// One page of a paged listing.
pub(crate) trait Page {
    type Item;

    fn total_available(&self) -> u64;
    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewsPage {
    pub pagination: Pagination,
    #[serde(default)]
    pub views: ViewList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ViewList {
    #[serde(default)]
    pub view: Vec<WireView>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireView {
    pub name: String,
    pub workbook: IdRef,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Usage {
    #[serde(deserialize_with = "number_or_string")]
    pub total_view_count: u64,
}

impl Page for ViewsPage {
    type Item = WireView;

    fn total_available(&self) -> u64 {
        self.pagination.total_available
    }

    fn into_items(self) -> Vec<WireView> {
        self.views.view
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkbooksPage {
    pub pagination: Pagination,
    #[serde(default)]
    pub workbooks: WorkbookList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WorkbookList {
    #[serde(default)]
    pub workbook: Vec<WireWorkbook>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireWorkbook {
    pub id: String,
    pub name: String,
    pub project: WireProject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireProject {
    pub id: String,
    pub name: String,
}

impl Page for WorkbooksPage {
    type Item = WireWorkbook;

    fn total_available(&self) -> u64 {
        self.pagination.total_available
    }

    fn into_items(self) -> Vec<WireWorkbook> {
        self.workbooks.workbook
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub detail: String,
}

// The REST API encodes counters as JSON strings.
fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
