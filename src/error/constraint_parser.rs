use regex::Regex;
use std::sync::OnceLock;

/// Utility for reading PostgreSQL constraint violations.
///
/// Constraint names are first looked up in a table of the constraints the
/// storefront schema declares. Unknown names fall back to a structural rule:
/// the token right before the `_fkey` / `_key` suffix names the field.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing
struct RegexPatterns {
    key_value: Regex,
    constraint_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            // Matches "Key (field)=(value)" in the message or DETAIL line
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").unwrap(),
            constraint_name: Regex::new(r#"constraint "([^"]+)""#).unwrap(),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

/// Constraints declared by the migrations, mapped to the public field token.
const KNOWN_CONSTRAINTS: &[(&str, &str)] = &[
    ("order_lines_item_fkey", "item"),
    ("order_lines_color_fkey", "color"),
    ("order_lines_order_fkey", "order"),
    ("order_lines_line_key", "line"),
    ("orders_delivery_fkey", "delivery"),
    ("orders_user_fkey", "user"),
    ("orders_status_fkey", "status"),
    ("deliveries_company_fkey", "company"),
    ("delivery_companies_name_key", "name"),
    ("items_category_fkey", "category"),
    ("items_sku_key", "sku"),
    ("item_colors_item_fkey", "item"),
    ("item_colors_color_fkey", "color"),
    ("tags_item_fkey", "item"),
    ("tags_name_key", "name"),
    ("sessions_user_fkey", "user"),
    ("sessions_refresh_token_key", "refresh_token"),
    ("users_login_key", "login"),
    ("users_email_key", "email"),
    ("categories_name_key", "name"),
    ("colors_name_key", "name"),
    ("payment_methods_name_key", "name"),
];

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Resolves the field token for a constraint name.
    pub fn field_for_constraint(constraint: &str) -> Option<String> {
        if let Some((_, field)) = KNOWN_CONSTRAINTS.iter().find(|(name, _)| *name == constraint) {
            return Some((*field).to_string());
        }
        Self::parse_constraint_name(constraint)
    }

    /// Structural fallback for constraint names outside the known table.
    ///
    /// `posts_author_fkey` yields `author`; a trailing `id` token is skipped so
    /// `posts_author_id_fkey` also yields `author`.
    pub fn parse_constraint_name(constraint: &str) -> Option<String> {
        let stem = constraint
            .strip_suffix("_fkey")
            .or_else(|| constraint.strip_suffix("_key"))?;

        let tokens: Vec<&str> = stem.split('_').filter(|t| !t.is_empty()).collect();
        if tokens.len() < 2 {
            return None;
        }

        let mut field = tokens[tokens.len() - 1];
        if field == "id" && tokens.len() > 2 {
            field = tokens[tokens.len() - 2];
        }
        Some(field.to_string())
    }

    /// Field token for a unique violation.
    pub fn parse_unique_violation(message: &str, constraint_name: Option<&str>) -> Option<String> {
        let constraint = constraint_name
            .map(str::to_string)
            .or_else(|| Self::extract_constraint_from_message(message))?;
        Self::field_for_constraint(&constraint)
    }

    /// Field token and referenced id for a foreign key violation.
    ///
    /// The id comes from `Key (col)=(value)`, looked up in the DETAIL text
    /// first and then in the primary message. An unreadable id yields `0`.
    pub fn parse_foreign_key_violation(
        message: &str,
        details: Option<&str>,
        constraint_name: Option<&str>,
    ) -> Option<(String, i64)> {
        let constraint = constraint_name
            .map(str::to_string)
            .or_else(|| Self::extract_constraint_from_message(message))?;
        let field = Self::field_for_constraint(&constraint)?;

        let id = details
            .and_then(Self::extract_key_value_from_message)
            .or_else(|| Self::extract_key_value_from_message(message))
            .and_then(|(_, value)| value.trim().parse::<i64>().ok())
            .unwrap_or(0);

        Some((field, id))
    }

    /// True when a delete or key update was refused because other rows still
    /// point at the row, as opposed to an insert naming an absent referent.
    pub fn is_still_referenced(message: &str, details: Option<&str>) -> bool {
        details.is_some_and(|d| d.contains("is still referenced"))
            || message.contains("is still referenced")
            || message.starts_with("update or delete on table")
    }

    /// Extracts `(column, value)` from a `Key (column)=(value)` fragment.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns()
            .key_value
            .captures(message)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
    }

    pub fn extract_constraint_from_message(message: &str) -> Option<String> {
        Self::patterns()
            .constraint_name
            .captures(message)
            .map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_constraints_map_to_public_tokens() {
        assert_eq!(
            ConstraintParser::field_for_constraint("order_lines_item_fkey"),
            Some("item".to_string())
        );
        assert_eq!(
            ConstraintParser::field_for_constraint("orders_delivery_fkey"),
            Some("delivery".to_string())
        );
        assert_eq!(
            ConstraintParser::field_for_constraint("users_email_key"),
            Some("email".to_string())
        );
        assert_eq!(
            ConstraintParser::field_for_constraint("sessions_refresh_token_key"),
            Some("refresh_token".to_string())
        );
    }

    #[test]
    fn unknown_constraints_use_token_before_suffix() {
        assert_eq!(
            ConstraintParser::field_for_constraint("wishlists_item_fkey"),
            Some("item".to_string())
        );
        assert_eq!(
            ConstraintParser::field_for_constraint("posts_author_id_fkey"),
            Some("author".to_string())
        );
        assert_eq!(
            ConstraintParser::field_for_constraint("coupons_code_key"),
            Some("code".to_string())
        );
        assert_eq!(ConstraintParser::field_for_constraint("nofkey"), None);
        assert_eq!(ConstraintParser::field_for_constraint("items_price_check"), None);
    }

    #[test]
    fn foreign_key_id_is_read_from_details() {
        let message = "insert or update on table \"order_lines\" violates foreign key constraint \"order_lines_item_fkey\"";
        let details = "Key (item_id)=(11) is not present in table \"items\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some(details),
            Some("order_lines_item_fkey"),
        );
        assert_eq!(result, Some(("item".to_string(), 11)));
    }

    #[test]
    fn foreign_key_id_falls_back_to_message_and_zero() {
        let message = "violates foreign key constraint \"orders_status_fkey\"\nDETAIL: Key (status_id)=(9) is not present";
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(message, None, None),
            Some(("status".to_string(), 9))
        );

        let bare = "violates foreign key constraint \"orders_status_fkey\"";
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(bare, None, None),
            Some(("status".to_string(), 0))
        );
    }

    #[test]
    fn still_referenced_is_told_apart_from_absent_referent() {
        let message = "update or delete on table \"deliveries\" violates foreign key constraint \"orders_delivery_fkey\" on table \"orders\"";
        let details = "Key (id)=(15) is still referenced from table \"orders\".";
        assert!(ConstraintParser::is_still_referenced(message, Some(details)));
        assert!(ConstraintParser::is_still_referenced(message, None));
        assert_eq!(
            ConstraintParser::parse_foreign_key_violation(message, Some(details), Some("orders_delivery_fkey")),
            Some(("delivery".to_string(), 15))
        );

        let insert = "insert or update on table \"orders\" violates foreign key constraint \"orders_delivery_fkey\"";
        let absent = "Key (delivery_id)=(15) is not present in table \"deliveries\".";
        assert!(!ConstraintParser::is_still_referenced(insert, Some(absent)));
    }

    #[test]
    fn unique_violation_without_constraint_is_unparsed() {
        assert_eq!(
            ConstraintParser::parse_unique_violation("duplicate key value", None),
            None
        );
    }

    #[test]
    fn test_extract_key_value_from_message() {
        let message = "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(test@example.com) already exists.";
        assert_eq!(
            ConstraintParser::extract_key_value_from_message(message),
            Some(("email".to_string(), "test@example.com".to_string()))
        );
    }
}
