//! Field-level change summaries for audit entries

use serde_json::Value;

/// Bookkeeping fields that change on every write
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Describe which top-level fields changed between two snapshots,
/// e.g. `monthly_income: 4000.0 -> 5000.0`
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            if changes.is_empty() {
                None
            } else {
                Some(changes.join(", "))
            }
        }
        _ if before != after => Some(format!("{} -> {}", format_value(before), format_value(after))),
        _ => None,
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields() {
        let before = json!({"name": "Family", "monthly_income": 4000.0});
        let after = json!({"name": "Family", "monthly_income": 5000.0});

        assert_eq!(
            generate_diff(&before, &after).unwrap(),
            "monthly_income: 4000.0 -> 5000.0"
        );
    }

    #[test]
    fn test_updated_at_is_ignored() {
        let before = json!({"role": "viewer", "updated_at": "2025-01-01"});
        let after = json!({"role": "viewer", "updated_at": "2025-02-01"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"display_name": "Al"});
        let after = json!({"user_id": "alice"});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("display_name: \"Al\" -> (removed)"));
        assert!(diff.contains("user_id: (added) -> \"alice\""));
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "x".repeat(80);
        let diff = generate_diff(&json!(long), &json!("short")).unwrap();
        assert!(diff.contains("...\" -> \"short\""));
    }
}
