//! redis-cli style rendering of replies

use redis_facade::Value;

/// Render a reply the way `redis-cli` prints it
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Nil => "(nil)".to_string(),
        Value::Int(n) => format!("(integer) {}", n),
        Value::BulkString(bytes) => format!("\"{}\"", String::from_utf8_lossy(bytes)),
        Value::SimpleString(s) => s.clone(),
        Value::Okay => "OK".to_string(),
        Value::Array(items) => format_items(items),
        other => format!("{:?}", other),
    }
}

fn format_items(items: &[Value]) -> String {
    if items.is_empty() {
        return "(empty array)".to_string();
    }

    let width = items.len().to_string().len();
    let mut lines = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let prefix = format!("{:>width$}) ", i + 1, width = width);
        let indent = " ".repeat(prefix.len());
        for (j, line) in format_value(item).lines().enumerate() {
            if j == 0 {
                lines.push(format!("{}{}", prefix, line));
            } else {
                lines.push(format!("{}{}", indent, line));
            }
        }
    }
    lines.join("\n")
}

pub fn int(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

pub fn bulk(s: impl Into<String>) -> Value {
    Value::BulkString(s.into().into_bytes())
}

pub fn optional<T: ToString>(value: Option<T>) -> Value {
    value.map_or(Value::Nil, |v| bulk(v.to_string()))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(format_value(&Value::Nil), "(nil)");
        assert_eq!(format_value(&Value::Int(-3)), "(integer) -3");
        assert_eq!(format_value(&bulk("hello")), "\"hello\"");
        assert_eq!(format_value(&Value::Okay), "OK");
        assert_eq!(format_value(&Value::SimpleString("PONG".into())), "PONG");
    }

    #[test]
    fn test_arrays_are_numbered() {
        let value = Value::Array(vec![bulk("a"), Value::Nil]);
        assert_eq!(format_value(&value), "1) \"a\"\n2) (nil)");
        assert_eq!(format_value(&Value::Array(vec![])), "(empty array)");
    }

    #[test]
    fn test_nested_arrays_are_indented() {
        let entry = Value::Array(vec![
            bulk("1-0"),
            Value::Array(vec![bulk("kind"), bulk("login")]),
        ]);
        let rendered = format_value(&Value::Array(vec![entry]));
        assert_eq!(
            rendered,
            "1) 1) \"1-0\"\n   2) 1) \"kind\"\n      2) \"login\""
        );
    }

    #[test]
    fn test_wide_arrays_align_numbers() {
        let items: Vec<Value> = (0..10).map(Value::Int).collect();
        let rendered = format_value(&Value::Array(items));
        assert!(rendered.starts_with(" 1) (integer) 0"));
        assert!(rendered.ends_with("10) (integer) 9"));
    }

    #[test]
    fn test_helpers() {
        assert_eq!(int(4), Value::Int(4));
        assert_eq!(optional(Some(2.5)), bulk("2.5"));
        assert_eq!(optional::<f64>(None), Value::Nil);
    }
}
