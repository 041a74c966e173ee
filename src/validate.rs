//! Input validation rules, exposed as an opaque rule table.
//!
//! The lookup client enforces only [`REQUIRED`] before a submission; the
//! [`EMAIL`] format rule is provided for form layers that want to reject
//! malformed addresses before calling [`crate::Client::submit`].

use crate::error::Error;

/// A named validation rule: a predicate plus the message shown on failure.
pub struct Rule {
    pub name: &'static str,
    pub message: &'static str,
    predicate: fn(&str) -> bool,
}

impl Rule {
    /// Apply the rule, failing with [`Error::InvalidInput`].
    pub fn check(&self, input: &str) -> Result<(), Error> {
        if (self.predicate)(input) {
            Ok(())
        } else {
            Err(Error::InvalidInput {
                message: self.message.into(),
            })
        }
    }

    #[must_use]
    pub fn passes(&self, input: &str) -> bool {
        (self.predicate)(input)
    }
}

pub const REQUIRED: Rule = Rule {
    name: "required",
    message: "email is required",
    predicate: is_present,
};

pub const EMAIL: Rule = Rule {
    name: "email",
    message: "enter a valid email address",
    predicate: looks_like_email,
};

/// The full rule table for the email field, in evaluation order.
#[must_use]
pub fn email_rules() -> [&'static Rule; 2] {
    [&REQUIRED, &EMAIL]
}

fn is_present(input: &str) -> bool {
    !input.trim().is_empty()
}

fn looks_like_email(input: &str) -> bool {
    let input = input.trim();
    if input.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn required_rejects_whitespace() {
        assert!(REQUIRED.passes("user@example.com"));
        assert!(!REQUIRED.passes("   "));

        let err = REQUIRED.check("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn email_rule_checks_shape() {
        assert!(EMAIL.passes("user@example.com"));
        assert!(EMAIL.passes(" user@example.com "));
        assert!(!EMAIL.passes("user"));
        assert!(!EMAIL.passes("@example.com"));
        assert!(!EMAIL.passes("user@examplecom"));
        assert!(!EMAIL.passes("user@example."));
        assert!(!EMAIL.passes("us er@example.com"));
    }

    #[test]
    fn rule_table_lists_required_first() {
        let names: Vec<&str> = email_rules().iter().map(|rule| rule.name).collect();
        assert_eq!(names, ["required", "email"]);
    }
}
