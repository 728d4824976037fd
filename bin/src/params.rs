//! Argument parsing helpers for the BEA CLI.

/// Parse a `KEY=VALUE` dataset parameter.
pub(crate) fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{arg}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty parameter name in `{arg}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        let (key, value) = parse_key_value("TableName=CAINC1").unwrap();
        assert_eq!(key, "TableName");
        assert_eq!(value, "CAINC1");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let (key, value) = parse_key_value("GeoFips=a=b").unwrap();
        assert_eq!(key, "GeoFips");
        assert_eq!(value, "a=b");
    }

    #[test]
    fn test_parse_key_value_invalid() {
        assert!(parse_key_value("TableName").is_err());
        assert!(parse_key_value("=CAINC1").is_err());
    }
}
