pub mod download_keywords;
pub mod pause_ads;
