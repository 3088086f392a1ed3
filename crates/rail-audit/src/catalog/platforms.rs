use once_cell::sync::Lazy;
use regex::Regex;

static PLATFORM_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+[a-z]?").expect("platform pattern is valid"));

/// A catalog platform entry with no platform number in it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("platform label '{raw}' does not contain a platform number")]
pub struct MalformedPlatformLabel {
    pub raw: String,
}

/// Extract the platform number (`"Platform 12a"` -> `"12a"`) from each raw
/// label and sort the results as strings, so `"12a"` sorts before `"3"`.
pub fn normalize_platforms<S: AsRef<str>>(
    raw: &[S],
) -> Result<Vec<String>, MalformedPlatformLabel> {
    let mut labels = raw
        .iter()
        .map(|label| platform_token(label.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    labels.sort();
    Ok(labels)
}

fn platform_token(raw: &str) -> Result<String, MalformedPlatformLabel> {
    PLATFORM_TOKEN
        .find(raw)
        .map(|found| found.as_str().to_string())
        .ok_or_else(|| MalformedPlatformLabel {
            raw: raw.to_string(),
        })
}
