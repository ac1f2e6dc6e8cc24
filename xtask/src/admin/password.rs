//! Temporary password policy (Functional Core - pure checks).

use std::fmt;

/// Minimum length enforced by the admin user pool.
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// A password policy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Number,
    Symbol,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinLength => write!(f, "at least {MIN_PASSWORD_LENGTH} characters"),
            Self::Uppercase => f.write_str("an uppercase letter"),
            Self::Lowercase => f.write_str("a lowercase letter"),
            Self::Number => f.write_str("a number"),
            Self::Symbol => f.write_str("a symbol"),
        }
    }
}

/// Returns the rules `password` breaks. Empty when it satisfies the policy.
pub fn broken_rules(password: &str) -> Vec<PasswordRule> {
    let checks = [
        (PasswordRule::MinLength, password.chars().count() >= MIN_PASSWORD_LENGTH),
        (PasswordRule::Uppercase, password.chars().any(|c| c.is_uppercase())),
        (PasswordRule::Lowercase, password.chars().any(|c| c.is_lowercase())),
        (PasswordRule::Number, password.chars().any(|c| c.is_ascii_digit())),
        (
            PasswordRule::Symbol,
            password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        ),
    ];

    checks
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(rule, _)| rule)
        .collect()
}
