use bingads_bulk_client::bulk::fault::ApiFault;
use bingads_bulk_client::bulk::service::{DownloadEntity, ResponseMode};
use bingads_bulk_client::bulk::{
    BulkEntity, BulkServiceManager, DownloadParameters, RestBulkService, SingleRecordEntity,
};
use bingads_bulk_client::campaignmanagement::AdStatus;
use bingads_bulk_client::config::ClientConfig;
use bingads_bulk_client::{Error, Result};

/// Pause every active text ad of the account and print what the service reports back.
pub async fn run(manager: &BulkServiceManager<RestBulkService>, config: &ClientConfig) -> Result<()> {
    log::info!("Scenario: pause ads");

    let account_id = config
        .account_id
        .ok_or_else(|| Error::Config("account_id is required for this scenario".to_string()))?;
    let mut parameters = DownloadParameters::new(account_id, vec![DownloadEntity::Ads]);
    parameters.file_type = config.file_type;
    parameters.overwrite_result_file = true;

    let mut uploads: Vec<BulkEntity> = vec![];
    for entity in manager.download_entities(&parameters).await? {
        let BulkEntity::TextAd(mut ad) = entity? else {
            continue;
        };
        if ad.ad.status != Some(AdStatus::Active) {
            continue;
        }
        ad.ad.status = Some(AdStatus::Paused);
        // A downloaded empty destination url would be sent back as a delete.
        ad.ad.destination_url = None;
        uploads.push(ad.into());
    }

    if uploads.is_empty() {
        log::info!("No active text ads to pause");
        return Ok(());
    }
    log::info!("Pausing {} text ads", uploads.len());

    let results = match manager
        .upload_entities(&uploads, ResponseMode::ErrorsAndResults)
        .await
    {
        Ok(results) => results,
        Err(Error::Service(fault)) => {
            print_fault(&fault);
            return Err(Error::Service(fault));
        }
        Err(e) => return Err(e),
    };

    for entity in results {
        let entity = entity?;
        if let BulkEntity::TextAd(ad) = &entity {
            println!(
                "Text ad {:?} in ad group {:?}: {:?}",
                ad.ad.id, ad.ad_group_id, ad.ad.status
            );
            for error in ad.errors() {
                println!("  Error: {}", error);
                if error.is_editorial() {
                    println!(
                        "  Editorial: term {:?}, location {:?}, reason {:?}, countries {:?}",
                        error.editorial_term,
                        error.editorial_location,
                        error.editorial_reason_code,
                        error.publisher_countries
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_fault(fault: &ApiFault) {
    match fault {
        ApiFault::AdApi { errors, .. } => {
            for error in errors {
                println!("AdApiError: {} {} {}", error.code, error.error_code, error.message);
            }
        }
        ApiFault::Api {
            batch_errors,
            operation_errors,
            ..
        } => {
            for error in batch_errors {
                println!(
                    "BatchError at index {}: {} {} {}",
                    error.index, error.code, error.error_code, error.message
                );
            }
            for error in operation_errors {
                println!("OperationError: {}", error);
            }
        }
    }
    if let Some(tracking_id) = fault.tracking_id() {
        println!("TrackingId: {}", tracking_id);
    }
}
