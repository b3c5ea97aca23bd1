//! Name heuristics shared by the Mermaid binder, the normalizer and the
//! category classifier

/// Naive English singular of a lowercase table name
pub fn singular(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    for suffix in ["sses", "shes", "ches", "xes"] {
        if name.ends_with(suffix) {
            return name[..name.len() - 2].to_string();
        }
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') && !stem.ends_with('u') => {
            stem.to_string()
        }
        _ => name.to_string(),
    }
}

/// Split an identifier into lowercase words at punctuation and camelCase
/// boundaries: `UserAccount_roles` → `["user", "account", "roles"]`
pub fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;

    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            continue;
        }
        if c.is_uppercase() && previous_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        previous_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular() {
        assert_eq!(singular("customers"), "customer");
        assert_eq!(singular("categories"), "category");
        assert_eq!(singular("addresses"), "address");
        assert_eq!(singular("boxes"), "box");
        assert_eq!(singular("status"), "status");
        assert_eq!(singular("address"), "address");
        assert_eq!(singular("user"), "user");
        assert_eq!(singular("s"), "s");
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("UserAccount_roles"), vec!["user", "account", "roles"]);
        assert_eq!(split_words("order-items"), vec!["order", "items"]);
        assert_eq!(split_words("OAUTH_tokens"), vec!["oauth", "tokens"]);
        assert!(split_words("__").is_empty());
    }
}
