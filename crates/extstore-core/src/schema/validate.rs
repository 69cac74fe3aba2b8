use crate::MAX_NAME_LEN;

/// Ensure a schema or field name is a non-empty ASCII identifier within the
/// maximum length.
pub(crate) fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!("name exceeds max length {MAX_NAME_LEN}"));
    }
    if !name.is_ascii() {
        return Err("name must be ASCII".to_string());
    }

    let mut chars = name.chars();
    if chars
        .next()
        .is_some_and(|first| !(first.is_ascii_alphabetic() || first == '_'))
    {
        return Err("name must start with a letter or underscore".to_string());
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(format!("character '{bad}' is not allowed"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_oversized_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN + 1)).is_err());
        assert!(validate_name(&"a".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn rejects_non_identifier_characters() {
        assert!(validate_name("1field").is_err());
        assert!(validate_name("with space").is_err());
        assert!(validate_name("naïve").is_err());
        assert!(validate_name("dash-ed").is_err());
    }

    #[test]
    fn accepts_identifiers() {
        assert!(validate_name("FooEntity").is_ok());
        assert!(validate_name("_private_2").is_ok());
    }
}
