use std::fs::File;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::Instant;

use crate::bulk::FileType;
use crate::bulk::entities::BulkEntity;
use crate::bulk::reader::{BulkFileReader, ReaderOptions};
use crate::bulk::service::{
    BulkOperationStatus, BulkService, DownloadParameters, FileUploadParameters, ResponseMode,
};
use crate::bulk::writer::BulkFileWriter;
use crate::error::{Error, Result};

/// Default wait between status checks.
pub const DEFAULT_STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);

const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

#[derive(Debug, Clone, Copy)]
enum Operation {
    Download,
    Upload,
}

/// Runs bulk downloads and uploads end to end: submit, poll, fetch the result.
pub struct BulkServiceManager<S: BulkService> {
    service: S,
    status_poll_interval: Duration,
    working_directory: PathBuf,
}

impl<S: BulkService> BulkServiceManager<S> {
    pub fn new(service: S) -> Self {
        BulkServiceManager {
            service,
            status_poll_interval: DEFAULT_STATUS_POLL_INTERVAL,
            working_directory: std::env::temp_dir().join("bingads-bulk"),
        }
    }

    pub fn with_status_poll_interval(mut self, interval: Duration) -> Self {
        self.status_poll_interval = interval;
        self
    }

    /// Directory for temporary upload files and results without an explicit directory.
    pub fn with_working_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.working_directory = directory.into();
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn status_poll_interval(&self) -> Duration {
        self.status_poll_interval
    }

    /// Download to a local file and return its path.
    pub async fn download_file(&self, parameters: &DownloadParameters) -> Result<PathBuf> {
        let request_id = self
            .service
            .download_campaigns_by_account_ids(parameters)
            .await?;
        log::info!("Submitted bulk download {request_id}");

        let status = self
            .poll(Operation::Download, &request_id, parameters.timeout)
            .await?;
        self.save_result(
            &request_id,
            &status,
            parameters.result_file_directory.as_deref(),
            parameters.result_file_name.as_deref(),
            parameters.overwrite_result_file,
            parameters.file_type,
        )
        .await
    }

    /// Download and open the result for reading.
    pub async fn download_entities(
        &self,
        parameters: &DownloadParameters,
    ) -> Result<BulkFileReader<File>> {
        let path = self.download_file(parameters).await?;
        BulkFileReader::new(File::open(&path)?, parameters.file_type, ReaderOptions::default())
    }

    /// Upload a prepared file and return the path of the result file.
    pub async fn upload_file(&self, parameters: &FileUploadParameters) -> Result<PathBuf> {
        let path = &parameters.upload_file_path;
        let contents = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidFile(format!("{} has no file name", path.display())))?
            .to_string();

        let (file_name, contents) =
            if parameters.compress_upload_file && !contents.starts_with(ZIP_SIGNATURE) {
                let zipped_name = format!("{}.zip", file_stem(&file_name));
                (zipped_name, compress(&file_name, &contents)?)
            } else {
                (file_name, contents)
            };

        let upload = self
            .service
            .get_bulk_upload_url(parameters.response_mode)
            .await?;
        log::info!("Uploading {} as bulk request {}", file_name, upload.request_id);
        self.service
            .upload_file(&upload.upload_url, &file_name, contents)
            .await?;

        let status = self
            .poll(Operation::Upload, &upload.request_id, parameters.timeout)
            .await?;
        self.save_result(
            &upload.request_id,
            &status,
            parameters.result_file_directory.as_deref(),
            parameters.result_file_name.as_deref(),
            parameters.overwrite_result_file,
            FileType::from_path(path),
        )
        .await
    }

    /// Write `entities` to a temporary upload file, upload it and open the result.
    pub async fn upload_entities(
        &self,
        entities: &[BulkEntity],
        response_mode: ResponseMode,
    ) -> Result<BulkFileReader<File>> {
        tokio::fs::create_dir_all(&self.working_directory).await?;
        let upload_path = self
            .working_directory
            .join(format!("{}.{}", uuid::Uuid::new_v4(), FileType::Csv.extension()));

        let result = self
            .write_and_upload(entities, &upload_path, response_mode)
            .await;

        match tokio::fs::remove_file(&upload_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove {}: {}", upload_path.display(), e),
        }

        BulkFileReader::new(File::open(result?)?, FileType::Csv, ReaderOptions::default())
    }

    async fn write_and_upload(
        &self,
        entities: &[BulkEntity],
        upload_path: &Path,
        response_mode: ResponseMode,
    ) -> Result<PathBuf> {
        let mut writer = BulkFileWriter::create(upload_path)?;
        writer.write_entities(entities)?;
        log::debug!(
            "Wrote {} rows to {}",
            writer.rows_written(),
            upload_path.display()
        );
        writer.close()?;

        let mut parameters = FileUploadParameters::new(upload_path);
        parameters.response_mode = response_mode;
        self.upload_file(&parameters).await
    }

    async fn status(&self, operation: Operation, request_id: &str) -> Result<BulkOperationStatus> {
        match operation {
            Operation::Download => self.service.get_bulk_download_status(request_id).await,
            Operation::Upload => self.service.get_bulk_upload_status(request_id).await,
        }
    }

    async fn poll(
        &self,
        operation: Operation,
        request_id: &str,
        timeout: Option<Duration>,
    ) -> Result<BulkOperationStatus> {
        let started = Instant::now();
        loop {
            let status = self.status(operation, request_id).await?;
            log::debug!(
                "{:?} {}: {} ({}%)",
                operation,
                request_id,
                status.request_status,
                status.percent_complete
            );

            if status.request_status.is_complete() {
                log::info!("{:?} {} completed", operation, request_id);
                return Ok(status);
            }
            if status.request_status.is_failed() {
                return Err(Error::OperationFailed {
                    request_id: request_id.to_string(),
                    status: status.request_status.to_string(),
                    errors: status.errors,
                });
            }

            let elapsed = started.elapsed();
            if let Some(timeout) = timeout {
                if elapsed >= timeout {
                    return Err(Error::Timeout {
                        request_id: request_id.to_string(),
                        elapsed,
                    });
                }
            }

            tokio::time::sleep(self.status_poll_interval).await;
        }
    }

    async fn save_result(
        &self,
        request_id: &str,
        status: &BulkOperationStatus,
        directory: Option<&Path>,
        file_name: Option<&str>,
        overwrite: bool,
        file_type: FileType,
    ) -> Result<PathBuf> {
        let url = status.result_file_url.as_deref().ok_or_else(|| {
            Error::InvalidFile(format!("bulk request {request_id} completed without a result file"))
        })?;
        let bytes = self.service.fetch_result_file(url).await?;

        let (entry_name, contents) = if bytes.starts_with(ZIP_SIGNATURE) {
            extract_single_entry(&bytes)?
        } else {
            (format!("{request_id}.{}", file_type.extension()), bytes)
        };

        let directory = directory.unwrap_or(&self.working_directory);
        tokio::fs::create_dir_all(directory).await?;
        let path = directory.join(file_name.unwrap_or(&entry_name));
        if !overwrite && tokio::fs::try_exists(&path).await? {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }
        tokio::fs::write(&path, contents).await?;
        log::info!("Saved result of {} to {}", request_id, path.display());
        Ok(path)
    }
}

fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}

fn compress(entry_name: &str, contents: &[u8]) -> Result<Vec<u8>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    zip.start_file(entry_name, options)?;
    zip.write_all(contents)?;
    Ok(zip.finish()?.into_inner())
}

/// Name and contents of the only file in a result archive.
fn extract_single_entry(bytes: &[u8]) -> Result<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    if archive.len() != 1 {
        return Err(Error::InvalidFile(format!(
            "expected one file in result archive, found {}",
            archive.len()
        )));
    }
    let mut entry = archive.by_index(0)?;
    let name = Path::new(entry.name())
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidFile(format!("bad archive entry name '{}'", entry.name())))?;
    let mut contents = Vec::new();
    entry.read_to_end(&mut contents)?;
    Ok((name, contents))
}
