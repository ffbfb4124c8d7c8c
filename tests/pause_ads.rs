use std::collections::HashMap;
use std::path::PathBuf;

use bingads_bulk_client::bulk::{
    BulkEntity, BulkFileReader, BulkFileWriter, BulkTextAd, FileType, ReaderOptions,
    SingleRecordEntity,
};
use bingads_bulk_client::campaignmanagement::AdStatus;

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn active_ads_paused() -> Vec<BulkEntity> {
    let reader = BulkFileReader::open(data_file("download_ads.csv"), ReaderOptions::default())
        .expect("fixture opens");

    let mut ads: Vec<BulkTextAd> = vec![];
    for entity in reader {
        if let BulkEntity::TextAd(ad) = entity.expect("fixture parses") {
            assert!(!ad.has_errors(), "unexpected errors: {:?}", ad.errors());
            if ad.ad.status == Some(AdStatus::Active) {
                ads.push(ad);
            }
        }
    }

    ads.into_iter()
        .map(|mut ad| {
            ad.ad.status = Some(AdStatus::Paused);
            ad.ad.destination_url = None;
            BulkEntity::from(ad)
        })
        .collect()
}

fn read_table(data: &[u8]) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').to_string())
        .collect();
    let records = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
    (header, records)
}

#[test]
fn pausing_active_ads_matches_golden_file() {
    let entities = active_ads_paused();
    assert_eq!(entities.len(), 3);

    let mut writer = BulkFileWriter::new(Vec::new(), FileType::Csv).unwrap();
    writer.write_entities(&entities).unwrap();
    let written = writer.close().unwrap();

    let golden = std::fs::read(data_file("paused_ads_golden.csv")).unwrap();
    let (golden_header, golden_rows) = read_table(&golden);
    let (written_header, written_rows) = read_table(&written);
    assert_eq!(written_rows.len(), golden_rows.len());

    let positions: HashMap<&str, usize> = written_header
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    for (line, (golden_row, written_row)) in golden_rows.iter().zip(&written_rows).enumerate() {
        for (column, expected) in golden_header.iter().zip(golden_row.iter()) {
            let position = positions[column.as_str()];
            assert_eq!(
                written_row.get(position).unwrap_or_default(),
                expected,
                "row {} column '{}'",
                line + 1,
                column
            );
        }
    }
}

#[test]
fn paused_ads_never_clear_destination_url() {
    let entities = active_ads_paused();
    let mut writer = BulkFileWriter::new(Vec::new(), FileType::Csv).unwrap();
    writer.write_entities(&entities).unwrap();
    let written = String::from_utf8(writer.close().unwrap()).unwrap();
    assert!(!written.contains("delete_value"));
}
