use bingads_bulk_client::bulk::service::{DownloadEntity, RequestStatus, ResponseMode};
use bingads_bulk_client::bulk::{BulkEntity, BulkService, DownloadParameters};

use bingads_bulk_integration_tests::config::load_secrets;

#[tokio::test]
#[ignore = "needs live credentials in secrets.json"]
async fn download_campaigns_smoke() -> Result<(), String> {
    let config = load_secrets()?;
    let account_id = config.account_id.ok_or("secrets.json has no account_id")?;
    let manager = config.bulk_service_manager();

    let mut parameters = DownloadParameters::new(account_id, vec![DownloadEntity::Campaigns]);
    parameters.overwrite_result_file = true;

    let entities = manager
        .download_entities(&parameters)
        .await
        .map_err(|e| e.to_string())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    assert!(
        entities
            .iter()
            .all(|entity| matches!(entity, BulkEntity::Campaign(_) | BulkEntity::Unknown(_))),
        "Expected only campaign rows"
    );

    Ok(())
}

#[tokio::test]
#[ignore = "needs live credentials in secrets.json"]
async fn upload_url_smoke() -> Result<(), String> {
    let config = load_secrets()?;
    let manager = config.bulk_service_manager();

    let upload = manager
        .service()
        .get_bulk_upload_url(ResponseMode::ErrorsOnly)
        .await
        .map_err(|e| e.to_string())?;
    assert!(!upload.request_id.trim().is_empty());
    assert!(upload.upload_url.starts_with("https://"));

    let status = manager
        .service()
        .get_bulk_upload_status(&upload.request_id)
        .await
        .map_err(|e| e.to_string())?;
    assert_ne!(status.request_status, RequestStatus::Failed);

    Ok(())
}
