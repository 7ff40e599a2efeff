//! JSON path lookup over a parsed body.
//!
//! Accepts dotted paths with array indexes, with or without a `$` root:
//! `info.message`, `$.info.message`, `items[0].id`, `matrix[1][0]`.
//! A trailing `[*]` yields the whole array.

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Looks up `path` in `root`.
///
/// Returns `Ok(None)` when a segment is absent or an index is out of range.
///
/// # Errors
///
/// Returns `DomainError::InvalidJsonPath` if the path is malformed.
pub fn lookup<'a>(root: &'a Value, path: &str) -> DomainResult<Option<&'a Value>> {
    let trimmed = path.trim();
    let rest = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    if rest.is_empty() {
        return Ok(Some(root));
    }

    let segments = split_path_segments(rest);
    let last = segments.len() - 1;
    let mut current = root;

    for (position, segment) in segments.iter().enumerate() {
        let (name, indexes) = parse_segment(segment).map_err(|reason| invalid(path, reason))?;

        if !name.is_empty() {
            match current.get(name) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }

        for (i, index) in indexes.iter().enumerate() {
            if *index == "*" {
                if position != last || i != indexes.len() - 1 {
                    return Err(invalid(path, "wildcard is only allowed at the end"));
                }
                return Ok(current.is_array().then_some(current));
            }
            let idx: usize = index
                .parse()
                .map_err(|_| invalid(path, format!("invalid array index: {index}")))?;
            match current.get(idx) {
                Some(v) => current = v,
                None => return Ok(None),
            }
        }
    }

    Ok(Some(current))
}

fn invalid(path: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidJsonPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;

    for (i, ch) in path.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                segments.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&path[start..]);
    segments
}

/// Parse `field[0][1]` into `("field", ["0", "1"])`.
fn parse_segment(segment: &str) -> Result<(&str, Vec<&str>), String> {
    if segment.is_empty() {
        return Err("empty segment".to_string());
    }

    let Some(bracket_start) = segment.find('[') else {
        return Ok((segment, Vec::new()));
    };

    let name = &segment[..bracket_start];
    let mut indexes = Vec::new();
    let mut rest = &segment[bracket_start..];
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('[')
            .and_then(|r| r.find(']').map(|end| (&r[..end], &r[end + 1..])));
        match inner {
            Some((index, tail)) if !index.is_empty() => {
                indexes.push(index);
                rest = tail;
            }
            _ => return Err(format!("unbalanced brackets in '{segment}'")),
        }
    }

    Ok((name, indexes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_field() {
        let doc = json!({"info": {"status": "success", "message": "User created"}});
        assert_eq!(
            lookup(&doc, "info.message").unwrap(),
            Some(&json!("User created"))
        );
        assert_eq!(
            lookup(&doc, "$.info.status").unwrap(),
            Some(&json!("success"))
        );
    }

    #[test]
    fn test_root_path() {
        let doc = json!([1, 2]);
        assert_eq!(lookup(&doc, "$").unwrap(), Some(&doc));
        assert_eq!(lookup(&doc, "").unwrap(), Some(&doc));
    }

    #[test]
    fn test_array_indexes() {
        let doc = json!({"items": [{"id": 1}, {"id": 2}], "matrix": [[1, 2], [3, 4]]});
        assert_eq!(lookup(&doc, "items[1].id").unwrap(), Some(&json!(2)));
        assert_eq!(lookup(&doc, "matrix[1][0]").unwrap(), Some(&json!(3)));
        assert_eq!(lookup(&doc, "[0]").unwrap(), None);
        assert_eq!(lookup(&doc, "items[5]").unwrap(), None);
    }

    #[test]
    fn test_wildcard_returns_array() {
        let doc = json!({"items": [1, 2, 3]});
        assert_eq!(lookup(&doc, "items[*]").unwrap(), Some(&json!([1, 2, 3])));
        assert!(lookup(&doc, "items[*].id").is_err());
    }

    #[test]
    fn test_missing_field() {
        let doc = json!({});
        assert_eq!(lookup(&doc, "info.message").unwrap(), None);
    }

    #[test]
    fn test_malformed_paths() {
        let doc = json!({"a": [1]});
        assert!(matches!(
            lookup(&doc, "a..b"),
            Err(DomainError::InvalidJsonPath { .. })
        ));
        assert!(lookup(&doc, "a[x]").is_err());
        assert!(lookup(&doc, "a[0").is_err());
    }
}
