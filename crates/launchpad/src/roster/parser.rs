use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One raw CSV row. Required-field enforcement happens in the importer so a
/// bad row skips instead of aborting the batch.
#[derive(Debug, Deserialize)]
pub(crate) struct RosterRow {
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    pub(crate) email: Option<String>,
    #[serde(
        rename = "First Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) first_name: Option<String>,
    #[serde(
        rename = "Last Name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) last_name: Option<String>,
    #[serde(
        rename = "Password",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) password: Option<String>,
    #[serde(rename = "Role", default, deserialize_with = "empty_string_as_none")]
    pub(crate) role: Option<String>,
    #[serde(rename = "Cohort", default, deserialize_with = "empty_string_as_none")]
    pub(crate) cohort: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RosterRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<RosterRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
