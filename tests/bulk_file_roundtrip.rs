use std::path::PathBuf;

use bingads_bulk_client::bulk::{
    BulkEntity, BulkFileReader, BulkFileWriter, ColumnHeader, FileType, ReaderOptions,
};
use bingads_bulk_client::campaignmanagement::{AgeRange, Distance};

fn read_fixture() -> Vec<BulkEntity> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/campaign_structure.csv");
    BulkFileReader::open(path, ReaderOptions::default())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

fn raw_rows(entities: &[BulkEntity]) -> Vec<Vec<String>> {
    let header = ColumnHeader::standard();
    entities
        .iter()
        .flat_map(|entity| entity.to_rows(&header).unwrap())
        .map(|row| row.raw_cells().map(str::to_string).collect())
        .collect()
}

#[test]
fn reads_every_supported_entity() {
    let entities = read_fixture();
    let types: Vec<&str> = entities.iter().map(BulkEntity::record_type).collect();
    assert_eq!(
        types,
        vec![
            "Campaign",
            "Ad Group",
            "Keyword",
            "Keyword",
            "Campaign Negative Keyword",
            "Ad Group Negative Keyword",
            "Campaign Age Target",
            "Campaign Radius Target",
        ]
    );
    assert!(entities.iter().all(|entity| !entity.has_errors()));

    let BulkEntity::CampaignAgeTarget(ages) = &entities[6] else {
        panic!("expected grouped age target");
    };
    let ranges: Vec<_> = ages.bids.iter().map(|bid| bid.age_target_bid.age).collect();
    assert_eq!(
        ranges,
        vec![
            Some(AgeRange::EighteenToTwentyFive),
            Some(AgeRange::SixtyFiveAndAbove)
        ]
    );
    assert_eq!(ages.bids[1].age_target_bid.bid_adjustment, Some(-10));

    let BulkEntity::CampaignRadiusTarget(radius) = &entities[7] else {
        panic!("expected grouped radius target");
    };
    let bid = &radius.bids[0].radius_target_bid;
    assert_eq!(bid.name.as_deref(), Some("Seattle"));
    assert_eq!(bid.radius, Some(Distance::Miles(20)));
    assert_eq!(bid.longitude, Some(-122.3321));
}

#[test]
fn written_file_reads_back_to_the_same_rows() {
    let entities = read_fixture();

    let mut writer = BulkFileWriter::new(Vec::new(), FileType::Csv).unwrap();
    writer.write_entities(&entities).unwrap();
    assert_eq!(writer.rows_written(), 9);
    let bytes = writer.close().unwrap();

    let reread: Vec<BulkEntity> =
        BulkFileReader::new(bytes.as_slice(), FileType::Csv, ReaderOptions::default())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

    assert_eq!(raw_rows(&reread), raw_rows(&entities));
}
