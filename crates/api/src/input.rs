//! CSV Upload Parsing

use crate::error::ApiError;

/// Extract one numeric column from CSV text with a header row
pub fn parse_channel(body: &str, channel: &str) -> Result<Vec<f64>, ApiError> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body);
    if body.trim().is_empty() {
        return Err(ApiError::EmptyBody);
    }

    let mut lines = body
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let header = match lines.next() {
        Some((_, header)) => header,
        None => return Err(ApiError::EmptyBody),
    };
    let column = split_row(header)
        .position(|name| name == channel)
        .ok_or_else(|| ApiError::MissingChannel(channel.to_string()))?;

    lines
        .map(|(index, line)| {
            let cell = split_row(line).nth(column).unwrap_or("");
            cell.parse::<f64>().map_err(|_| ApiError::InvalidValue {
                channel: channel.to_string(),
                line: index + 1,
                value: cell.to_string(),
            })
        })
        .collect()
}

fn split_row(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|cell| cell.trim().trim_matches('"'))
}
