use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::LogLevel;
use crate::auth::AuthorizationData;
use crate::auth::token::CachedToken;
use crate::bulk::FileType;
use crate::bulk::columns::FORMAT_VERSION;
use crate::bulk::fault::{ApiFault, OperationError};
use crate::error::{Error, Result};

const PRODUCTION_URL: &str = "https://bulk.api.bingads.microsoft.com/Bulk/v13";
const SANDBOX_URL: &str = "https://bulk.api.sandbox.bingads.microsoft.com/Bulk/v13";

/// Service environment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    #[default]
    Production,
    Sandbox,
}

impl ApiEnvironment {
    pub fn bulk_url(self) -> &'static str {
        match self {
            ApiEnvironment::Production => PRODUCTION_URL,
            ApiEnvironment::Sandbox => SANDBOX_URL,
        }
    }
}

/// Entity groups that can be requested in a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadEntity {
    Campaigns,
    AdGroups,
    Ads,
    Keywords,
    CampaignNegativeKeywords,
    AdGroupNegativeKeywords,
    CampaignTargetCriterions,
}

/// Kind of data included in a download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataScope {
    #[default]
    EntityData,
    QualityScoreData,
}

/// What an upload result file contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseMode {
    #[default]
    ErrorsOnly,
    ErrorsAndResults,
}

/// State of a submitted download or upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    FileUploaded,
    PendingFileUpload,
    InProgress,
    Completed,
    CompletedWithErrors,
    Failed,
    FailedFullSyncRequired,
    UploadFileRowCountExceeded,
    UploadFileFormatNotSupported,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RequestStatus {
    /// The result file is ready.
    pub fn is_complete(self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::CompletedWithErrors)
    }

    /// The request ended without a usable result.
    pub fn is_failed(self) -> bool {
        matches!(
            self,
            RequestStatus::Failed
                | RequestStatus::FailedFullSyncRequired
                | RequestStatus::UploadFileRowCountExceeded
                | RequestStatus::UploadFileFormatNotSupported
                | RequestStatus::Expired
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Status snapshot returned while polling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BulkOperationStatus {
    pub request_status: RequestStatus,
    #[serde(default)]
    pub percent_complete: i32,
    #[serde(default)]
    pub result_file_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<OperationError>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where to send an upload file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UploadUrl {
    pub request_id: String,
    pub upload_url: String,
}

/// What to download and where to put the result.
#[derive(Debug, Clone)]
pub struct DownloadParameters {
    pub account_ids: Vec<i64>,
    pub entities: Vec<DownloadEntity>,
    pub data_scope: DataScope,
    pub file_type: FileType,
    /// Only changes since this time when set.
    pub last_sync_time: Option<DateTime<Utc>>,
    /// Defaults to the manager's working directory.
    pub result_file_directory: Option<PathBuf>,
    /// Defaults to the name inside the result archive.
    pub result_file_name: Option<String>,
    pub overwrite_result_file: bool,
    /// Give up polling after this long. Unbounded when unset.
    pub timeout: Option<Duration>,
}

impl DownloadParameters {
    pub fn new(account_id: i64, entities: Vec<DownloadEntity>) -> Self {
        DownloadParameters {
            account_ids: vec![account_id],
            entities,
            data_scope: DataScope::default(),
            file_type: FileType::default(),
            last_sync_time: None,
            result_file_directory: None,
            result_file_name: None,
            overwrite_result_file: false,
            timeout: None,
        }
    }
}

/// An upload file and where to put its result.
#[derive(Debug, Clone)]
pub struct FileUploadParameters {
    pub upload_file_path: PathBuf,
    pub response_mode: ResponseMode,
    /// Zip the file before sending it, unless it already is an archive.
    pub compress_upload_file: bool,
    pub result_file_directory: Option<PathBuf>,
    pub result_file_name: Option<String>,
    pub overwrite_result_file: bool,
    pub timeout: Option<Duration>,
}

impl FileUploadParameters {
    pub fn new(upload_file_path: impl Into<PathBuf>) -> Self {
        FileUploadParameters {
            upload_file_path: upload_file_path.into(),
            response_mode: ResponseMode::default(),
            compress_upload_file: true,
            result_file_directory: None,
            result_file_name: None,
            overwrite_result_file: false,
            timeout: None,
        }
    }
}

/// Operations of the Bulk service used by [`BulkServiceManager`](crate::bulk::BulkServiceManager).
#[allow(async_fn_in_trait)]
pub trait BulkService {
    /// Submit a download. Returns the request id.
    async fn download_campaigns_by_account_ids(
        &self,
        parameters: &DownloadParameters,
    ) -> Result<String>;

    async fn get_bulk_download_status(&self, request_id: &str) -> Result<BulkOperationStatus>;

    /// Reserve an upload slot for the authorized account.
    async fn get_bulk_upload_url(&self, response_mode: ResponseMode) -> Result<UploadUrl>;

    /// Post the file contents to an upload url.
    async fn upload_file(&self, upload_url: &str, file_name: &str, contents: Vec<u8>) -> Result<()>;

    async fn get_bulk_upload_status(&self, request_id: &str) -> Result<BulkOperationStatus>;

    /// Fetch a result file. The url is pre-signed.
    async fn fetch_result_file(&self, url: &str) -> Result<Vec<u8>>;
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct DownloadCampaignsByAccountIdsRequest<'a> {
    account_ids: &'a [i64],
    compression_type: &'static str,
    data_scope: DataScope,
    download_entities: &'a [DownloadEntity],
    download_file_type: FileType,
    format_version: &'static str,
    #[serde(rename = "LastSyncTimeInUTC")]
    last_sync_time_in_utc: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DownloadCampaignsByAccountIdsResponse {
    download_request_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct StatusRequest<'a> {
    request_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UploadUrlRequest {
    account_id: i64,
    response_mode: ResponseMode,
}

/// Bulk service client over the REST JSON endpoints.
pub struct RestBulkService {
    client: Client,
    base_url: String,
    authorization: AuthorizationData,
    tokens: Mutex<HashMap<String, CachedToken>>,
    log_level: LogLevel,
}

impl RestBulkService {
    pub fn new(environment: ApiEnvironment, authorization: AuthorizationData, log_level: LogLevel) -> Self {
        RestBulkService::with_base_url(environment.bulk_url(), authorization, log_level)
    }

    /// Client for a non-standard endpoint, such as a local mock.
    pub fn with_base_url(base_url: &str, authorization: AuthorizationData, log_level: LogLevel) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization,
            tokens: Mutex::new(HashMap::new()),
            log_level,
        }
    }

    pub fn authorization(&self) -> &AuthorizationData {
        &self.authorization
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = {
            let mut tokens = self.tokens.lock().await;
            self.authorization.authentication.access_token(&mut tokens).await?
        };
        let mut request = request
            .header("AuthenticationToken", token)
            .header("DeveloperToken", &self.authorization.developer_token);
        if let Some(customer_id) = self.authorization.customer_id {
            request = request.header("CustomerId", customer_id.to_string());
        }
        if let Some(account_id) = self.authorization.account_id {
            request = request.header("CustomerAccountId", account_id.to_string());
        }
        Ok(request)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        if self.log_level.is_debug() {
            log::debug!("POST {url}");
            log::debug!("Body: {}", serde_json::to_string(body)?);
        }

        let resp = self
            .authorize(self.client.post(&url))
            .await?
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(fault_or_http(status.as_u16(), body));
        }

        let text = resp.text().await?;
        if self.log_level.is_debug() {
            log::debug!("Response: {text}");
        }
        Ok(serde_json::from_str(&text)?)
    }
}

fn fault_or_http(status: u16, body: String) -> Error {
    match ApiFault::from_body(&body) {
        Some(fault) => Error::Service(fault),
        None => Error::Http { status, body },
    }
}

fn upload_mime_type(file_name: &str) -> &'static str {
    if file_name.to_ascii_lowercase().ends_with(".zip") {
        "application/zip"
    } else {
        "text/csv"
    }
}

impl BulkService for RestBulkService {
    async fn download_campaigns_by_account_ids(
        &self,
        parameters: &DownloadParameters,
    ) -> Result<String> {
        let request = DownloadCampaignsByAccountIdsRequest {
            account_ids: &parameters.account_ids,
            compression_type: "Zip",
            data_scope: parameters.data_scope,
            download_entities: &parameters.entities,
            download_file_type: parameters.file_type,
            format_version: FORMAT_VERSION,
            last_sync_time_in_utc: parameters.last_sync_time,
        };
        let response: DownloadCampaignsByAccountIdsResponse = self
            .post("Campaigns/DownloadByAccountIds", &request)
            .await?;
        Ok(response.download_request_id)
    }

    async fn get_bulk_download_status(&self, request_id: &str) -> Result<BulkOperationStatus> {
        self.post("BulkDownloadStatus/Query", &StatusRequest { request_id })
            .await
    }

    async fn get_bulk_upload_url(&self, response_mode: ResponseMode) -> Result<UploadUrl> {
        let account_id = self
            .authorization
            .account_id
            .ok_or_else(|| Error::Config("an account id is required to upload".to_string()))?;
        self.post(
            "BulkUploadUrl/Query",
            &UploadUrlRequest {
                account_id,
                response_mode,
            },
        )
        .await
    }

    async fn upload_file(&self, upload_url: &str, file_name: &str, contents: Vec<u8>) -> Result<()> {
        if self.log_level.is_debug() {
            log::debug!("Uploading {} ({} bytes) to {upload_url}", file_name, contents.len());
        }
        let part = reqwest::multipart::Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(upload_mime_type(file_name))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .authorize(self.client.post(upload_url))
            .await?
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(fault_or_http(status.as_u16(), body));
        }
        Ok(())
    }

    async fn get_bulk_upload_status(&self, request_id: &str) -> Result<BulkOperationStatus> {
        self.post("BulkUploadStatus/Query", &StatusRequest { request_id })
            .await
    }

    async fn fetch_result_file(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}
