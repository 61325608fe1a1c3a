use crate::error::EcgstageError;

use super::DatasetRef;

/// Parse a user-supplied Kaggle dataset reference.
///
/// Accepts `owner/dataset`, `owner/dataset/versions/<n>` and dataset page
/// URLs such as `https://www.kaggle.com/datasets/owner/dataset`.
pub fn parse_dataset_input(input: &str) -> Result<DatasetRef, EcgstageError> {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        parse_dataset_url(trimmed)
    } else {
        let segments: Vec<&str> = trimmed.split('/').collect();
        parse_segments(input, &segments)
    }
}

fn parse_dataset_url(input: &str) -> Result<DatasetRef, EcgstageError> {
    let url = url::Url::parse(input).map_err(|source| EcgstageError::InvalidReference {
        input: input.to_string(),
        message: format!("invalid URL: {source}"),
    })?;

    let host = url
        .host_str()
        .ok_or_else(|| EcgstageError::InvalidReference {
            input: input.to_string(),
            message: "URL is missing a host".to_string(),
        })?
        .to_ascii_lowercase();

    if host != "kaggle.com" && host != "www.kaggle.com" {
        return Err(EcgstageError::InvalidReference {
            input: input.to_string(),
            message: format!("expected host 'www.kaggle.com', found '{}'", host),
        });
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|iter| iter.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    if segments.first() != Some(&"datasets") {
        return Err(EcgstageError::InvalidReference {
            input: input.to_string(),
            message: "expected dataset URL like https://www.kaggle.com/datasets/<owner>/<dataset>"
                .to_string(),
        });
    }

    parse_segments(input, &segments[1..])
}

fn parse_segments(input: &str, segments: &[&str]) -> Result<DatasetRef, EcgstageError> {
    let invalid = |message: &str| EcgstageError::InvalidReference {
        input: input.to_string(),
        message: message.to_string(),
    };

    let (owner, dataset, rest) = match segments {
        [owner, dataset, rest @ ..] => (*owner, *dataset, rest),
        _ => return Err(invalid("expected reference in '<owner>/<dataset>' form")),
    };

    let version = match rest {
        [] => None,
        ["versions", number] => Some(
            number
                .parse::<u64>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or_else(|| invalid("version must be a positive integer"))?,
        ),
        _ => {
            return Err(invalid(
                "expected '<owner>/<dataset>' or '<owner>/<dataset>/versions/<n>'",
            ))
        }
    };

    let reference = DatasetRef::new(owner, dataset).map_err(|err| match err {
        EcgstageError::InvalidReference { message, .. } => invalid(&message),
        other => other,
    })?;
    Ok(match version {
        Some(version) => reference.with_version(version),
        None => reference,
    })
}

pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
