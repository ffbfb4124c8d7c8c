use bingads_bulk_client::bulk::service::DownloadEntity;
use bingads_bulk_client::bulk::{BulkEntity, BulkServiceManager, DownloadParameters, RestBulkService};
use bingads_bulk_client::config::ClientConfig;
use bingads_bulk_client::{Error, Result};

pub async fn run(manager: &BulkServiceManager<RestBulkService>, config: &ClientConfig) -> Result<()> {
    log::info!("Scenario: download keywords");

    let account_id = config
        .account_id
        .ok_or_else(|| Error::Config("account_id is required for this scenario".to_string()))?;
    let mut parameters = DownloadParameters::new(
        account_id,
        vec![DownloadEntity::Keywords, DownloadEntity::AdGroupNegativeKeywords],
    );
    parameters.file_type = config.file_type;
    parameters.overwrite_result_file = true;

    let mut keywords = 0;
    let mut negatives = 0;
    for entity in manager.download_entities(&parameters).await? {
        match entity? {
            BulkEntity::Keyword(keyword) => {
                keywords += 1;
                println!(
                    "{:?} [{:?}] bid {:?}",
                    keyword.keyword.text, keyword.keyword.match_type, keyword.keyword.bid
                );
            }
            BulkEntity::NegativeKeyword(_) => negatives += 1,
            _ => {}
        }
    }
    println!("Keywords: {}, negative keywords: {}", keywords, negatives);

    Ok(())
}
