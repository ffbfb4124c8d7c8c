use crate::bulk::cell::{
    CellValue, parse_optional, parse_text, parse_url_list, to_cell, to_optional_text,
    to_plain_text, to_url_list_cell,
};
use crate::bulk::columns;
use crate::bulk::entities::{RecordState, SingleRecordEntity};
use crate::bulk::mapping::BulkMapping;
use crate::campaignmanagement::TextAd;
use crate::error::{Error, Result};

/// A text ad row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkTextAd {
    /// Ad group that owns the ad (`Parent Id`).
    pub ad_group_id: Option<i64>,
    pub campaign_name: Option<String>,
    pub ad_group_name: Option<String>,
    pub client_id: Option<String>,
    pub ad: TextAd,
    pub(crate) state: RecordState,
}

impl BulkTextAd {
    pub const RECORD_TYPE: &'static str = "Text Ad";
}

static MAPPINGS: &[BulkMapping<BulkTextAd>] = &[
    BulkMapping::new(
        columns::ID,
        |c: &BulkTextAd| to_cell(c.ad.id),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad.id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::STATUS,
        |c: &BulkTextAd| to_cell(c.ad.status),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad.status = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::PARENT_ID,
        |c: &BulkTextAd| to_cell(c.ad_group_id),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad_group_id = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CAMPAIGN,
        |c: &BulkTextAd| to_plain_text(c.campaign_name.as_deref()),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.campaign_name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::AD_GROUP,
        |c: &BulkTextAd| to_plain_text(c.ad_group_name.as_deref()),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad_group_name = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::TITLE,
        |c: &BulkTextAd| to_plain_text(c.ad.title.as_deref()),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad.title = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::TEXT,
        |c: &BulkTextAd| to_plain_text(c.ad.text.as_deref()),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad.text = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::DISPLAY_URL,
        |c: &BulkTextAd| to_optional_text(c.ad.display_url.as_deref()),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad.display_url = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::DESTINATION_URL,
        |c: &BulkTextAd| to_optional_text(c.ad.destination_url.as_deref()),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad.destination_url = parse_text(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::FINAL_URL,
        |c: &BulkTextAd| to_url_list_cell(c.ad.final_urls.as_deref()),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad.final_urls = parse_url_list(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::MOBILE_FINAL_URL,
        |c: &BulkTextAd| to_url_list_cell(c.ad.final_mobile_urls.as_deref()),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad.final_mobile_urls = parse_url_list(v);
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::EDITORIAL_STATUS,
        |c: &BulkTextAd| to_cell(c.ad.editorial_status),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.ad.editorial_status = parse_optional(v)?;
            Ok(())
        },
    ),
    BulkMapping::new(
        columns::CLIENT_ID,
        |c: &BulkTextAd| to_plain_text(c.client_id.as_deref()),
        |v: &CellValue, c: &mut BulkTextAd| {
            c.client_id = parse_text(v);
            Ok(())
        },
    ),
];

impl SingleRecordEntity for BulkTextAd {
    const ENTITY_NAME: &'static str = "BulkTextAd";

    fn record_type(&self) -> &'static str {
        Self::RECORD_TYPE
    }

    fn mappings() -> &'static [BulkMapping<Self>] {
        MAPPINGS
    }

    fn state(&self) -> &RecordState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut RecordState {
        &mut self.state
    }

    fn validate_for_write(&self) -> Result<()> {
        if self.ad.id.is_none() && self.ad_group_id.is_none() {
            return Err(Error::MissingField {
                entity: Self::ENTITY_NAME,
                field: "TextAd.Id or AdGroupId",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk::row::{ColumnHeader, RowValues};
    use crate::campaignmanagement::AdStatus;

    fn downloaded_ad(destination_url: CellValue) -> BulkTextAd {
        BulkTextAd::from_row(RowValues::from_pairs([
            (columns::TYPE, "Text Ad".into()),
            (columns::STATUS, "Active".into()),
            (columns::ID, "5001".into()),
            (columns::PARENT_ID, "300".into()),
            (columns::TITLE, "Contoso Shoes".into()),
            (columns::DESTINATION_URL, destination_url),
            (columns::MODIFIED_TIME, "10/01/2025 12:00:00.000".into()),
        ]))
    }

    #[test]
    fn empty_destination_url_reads_as_empty_string() {
        let ad = downloaded_ad(CellValue::Empty);
        assert_eq!(ad.ad.destination_url.as_deref(), Some(""));
        assert_eq!(ad.ad.status, Some(AdStatus::Active));
    }

    #[test]
    fn round_tripping_an_empty_destination_url_would_clear_it() {
        let ad = downloaded_ad(CellValue::Empty);
        let row = ad.to_row(&ColumnHeader::standard()).unwrap();
        assert_eq!(
            row.get(columns::DESTINATION_URL),
            &CellValue::Text("delete_value".into())
        );
    }

    #[test]
    fn omitted_destination_url_is_left_untouched_on_upload() {
        let mut ad = downloaded_ad(CellValue::Empty);
        ad.ad.status = Some(AdStatus::Paused);
        ad.ad.destination_url = None;

        let row = ad.to_row(&ColumnHeader::standard()).unwrap();
        assert_eq!(row.get(columns::STATUS), &CellValue::Text("Paused".into()));
        assert_eq!(row.get(columns::DESTINATION_URL), &CellValue::Absent);
        assert_eq!(row.get(columns::TITLE), &CellValue::Text("Contoso Shoes".into()));
    }

    #[test]
    fn unmapped_source_columns_pass_through() {
        let ad = downloaded_ad("https://contoso.example".into());
        let row = ad.to_row(&ColumnHeader::standard()).unwrap();
        assert_eq!(
            row.get(columns::MODIFIED_TIME),
            &CellValue::Text("10/01/2025 12:00:00.000".into())
        );
        assert_eq!(
            row.get(columns::DESTINATION_URL),
            &CellValue::Text("https://contoso.example".into())
        );
    }
}
