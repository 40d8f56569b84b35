//! Log-safe rendering of user identifiers.

/// Masks an email or phone identifier for logging.
///
/// - `john.doe@example.com` → `jo***@example.com`
/// - `555-123-4567` → `***4567`
/// - anything else → `***`
pub fn mask_identifier(identifier: &str) -> String {
    let identifier = identifier.trim();

    if let Some((local, domain)) = identifier.split_once('@') {
        let visible: String = local.chars().take(2).collect();
        return format!("{}***@{}", visible, domain);
    }

    let digits: Vec<char> = identifier.chars().filter(char::is_ascii_digit).collect();
    if digits.len() > 4 {
        let tail: String = digits[digits.len() - 4..].iter().collect();
        return format!("***{}", tail);
    }

    "***".to_string()
}
