//! Downloadable JSON report

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

const ROUTINE_PLACEHOLDER: &str = "Your skincare routine tracking data";
const ANALYTICS_PLACEHOLDER: &str = "Your skin improvement analytics";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    #[serde(serialize_with = "iso_millis")]
    pub generated_date: DateTime<Utc>,
    /// Display name of the signed-in user
    pub user: Option<&'a str>,
    pub routine_data: &'static str,
    pub analytics_data: &'static str,
}

fn iso_millis<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl<'a> Report<'a> {
    pub fn new(user: Option<&'a str>, generated: DateTime<Utc>) -> Self {
        Self {
            generated_date: generated,
            user,
            routine_data: ROUTINE_PLACEHOLDER,
            analytics_data: ANALYTICS_PLACEHOLDER,
        }
    }

    /// `skincare-report-YYYY-MM-DD.json`
    pub fn file_name(&self) -> String {
        format!(
            "skincare-report-{}.json",
            self.generated_date.format("%Y-%m-%d")
        )
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
