//! Translation of string rule tokens into validators.
//!
//! Rule files name their rules with short tokens such as `"required"`,
//! `"min:3"` or `"regex:^[a-z]+$:Lowercase only"`. A token that names no
//! known rule, or whose parameter cannot be parsed, becomes a
//! [`RuleEntry::Malformed`] placeholder rather than an error.

use fieldcheck_validation::*;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

/// Why a token could not be turned into a validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("Rule '{0}' requires a parameter")]
    MissingParameter(String),

    #[error("Invalid parameter for rule '{rule}': {value}")]
    InvalidParameter { rule: String, value: String },

    #[error("Rule '{0}' does not take a parameter")]
    UnexpectedParameter(String),
}

/// Translate one token, reporting why it failed.
pub fn try_parse_token(token: &str) -> Result<Validator, TokenError> {
    let token = token.trim();
    let (name, param) = match token.split_once(':') {
        Some((name, param)) => (name, Some(param)),
        None => (token, None),
    };

    match name {
        "required" => no_param(name, param, required()),
        "number" | "numeric" => no_param(name, param, numeric()),
        "email" => no_param(name, param, email()),
        "url" => no_param(name, param, url()),
        "phone" => no_param(name, param, phone()),
        "date" => no_param(name, param, date()),
        "bool" | "boolean" => no_param(name, param, boolean()),
        "min" => Ok(min_length(length(name, param)?).into()),
        "max" => Ok(max_length(length(name, param)?).into()),
        "min_num" => Ok(min_value(bound(name, param)?).into()),
        "max_num" => Ok(max_value(bound(name, param)?).into()),
        "same" => {
            let field = required_param(name, param)?.trim();
            if field.is_empty() {
                return Err(TokenError::MissingParameter(name.to_string()));
            }
            Ok(same_as(field).into())
        }
        "regex" => Ok(regex_rule(required_param(name, param)?).into()),
        _ => Err(TokenError::UnknownRule(name.to_string())),
    }
}

/// Translate one token; failures become a malformed entry.
pub fn parse_token(token: &str) -> RuleEntry {
    match try_parse_token(token) {
        Ok(validator) => RuleEntry::Rule(validator),
        Err(error) => {
            warn!(token, %error, "malformed rule token");
            RuleEntry::Malformed(token.to_string())
        }
    }
}

/// Translate a token list, keeping its order.
pub fn parse_tokens<I, S>(tokens: I) -> RuleList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| parse_token(token.as_ref()))
        .collect()
}

/// Split `pattern[:message]` at the last colon, unless that colon belongs
/// to the pattern (`(?:..)`, `[[:alpha:]]`).
fn regex_rule(rest: &str) -> Matches {
    let Some((source, message)) = rest.rsplit_once(':') else {
        return pattern(rest);
    };

    let rule = match Regex::new(source) {
        Ok(regex) => Matches::from_regex(regex),
        Err(_) => match Regex::new(rest) {
            Ok(whole) => return Matches::from_regex(whole),
            Err(_) => pattern(source),
        },
    };

    if message.is_empty() {
        rule
    } else {
        rule.message(message)
    }
}

fn no_param(
    name: &str,
    param: Option<&str>,
    rule: impl Into<Validator>,
) -> Result<Validator, TokenError> {
    match param {
        Some(_) => Err(TokenError::UnexpectedParameter(name.to_string())),
        None => Ok(rule.into()),
    }
}

fn required_param<'a>(name: &str, param: Option<&'a str>) -> Result<&'a str, TokenError> {
    match param {
        Some(param) if !param.is_empty() => Ok(param),
        _ => Err(TokenError::MissingParameter(name.to_string())),
    }
}

fn length(name: &str, param: Option<&str>) -> Result<usize, TokenError> {
    let param = required_param(name, param)?;
    param
        .trim()
        .parse()
        .map_err(|_| TokenError::InvalidParameter {
            rule: name.to_string(),
            value: param.to_string(),
        })
}

fn bound(name: &str, param: Option<&str>) -> Result<f64, TokenError> {
    let param = required_param(name, param)?;
    parse_number(param.trim()).ok_or_else(|| TokenError::InvalidParameter {
        rule: name.to_string(),
        value: param.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(token: &str) -> &'static str {
        try_parse_token(token).unwrap().name()
    }

    fn check(token: &str, value: &str) -> Option<String> {
        let record = Record::new();
        try_parse_token(token)
            .unwrap()
            .check(&Scalar::from(value), &record)
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(name_of("required"), "required");
        assert_eq!(name_of("number"), "numeric");
        assert_eq!(name_of("numeric"), "numeric");
        assert_eq!(name_of("email"), "email");
        assert_eq!(name_of("url"), "url");
        assert_eq!(name_of("phone"), "phone");
        assert_eq!(name_of("date"), "date");
        assert_eq!(name_of("bool"), "bool");
        assert_eq!(name_of("boolean"), "bool");
        assert_eq!(name_of("  required  "), "required");
    }

    #[test]
    fn test_parameterized_tokens() {
        assert_eq!(check("min:3", "ab"), Some("Minimum length is 3".to_string()));
        assert_eq!(check("max:3", "abcd"), Some("Maximum length is 3".to_string()));
        assert_eq!(check("min_num:18", "17"), Some("Minimum value is 18".to_string()));
        assert_eq!(check("max_num:2.5", "3"), Some("Maximum value is 2.5".to_string()));
        assert_eq!(check("max_num:100", "100"), None);
    }

    #[test]
    fn test_same_token() {
        let record = Record::new().with("password", "abc").with("confirm", "xyz");
        let validator = try_parse_token("same:password").unwrap();
        assert_eq!(
            validator.check(record.get("confirm"), &record),
            Some("This value must match password".to_string())
        );
    }

    #[test]
    fn test_regex_token() {
        assert_eq!(check("regex:^[a-z]+$", "abc"), None);
        assert_eq!(check("regex:^[a-z]+$", "ABC"), Some("Invalid Format".to_string()));
        assert_eq!(
            check("regex:^[a-z]+$:Lowercase only", "ABC"),
            Some("Lowercase only".to_string())
        );
        assert_eq!(check("regex:^[a-z]+$:", "ABC"), Some("Invalid Format".to_string()));
        assert_eq!(check("regex:[", "abc"), Some("Invalid regex pattern".to_string()));
    }

    #[test]
    fn test_regex_token_with_colon_in_pattern() {
        assert_eq!(check("regex:^(?:a|b)$", "a"), None);
        assert_eq!(check("regex:^(?:a|b)$", "c"), Some("Invalid Format".to_string()));
        assert_eq!(check("regex:^[[:alpha:]]+$", "abc"), None);
        assert_eq!(check("regex:^[[:alpha:]]+$", "abc1"), Some("Invalid Format".to_string()));
        assert_eq!(
            check("regex:^(?:a|b)$:Pick a or b", "c"),
            Some("Pick a or b".to_string())
        );
        assert_eq!(check("regex:[:", "abc"), Some("Invalid regex pattern".to_string()));
    }

    #[test]
    fn test_token_errors() {
        assert_eq!(
            try_parse_token("unknown").unwrap_err(),
            TokenError::UnknownRule("unknown".to_string())
        );
        assert_eq!(
            try_parse_token("Required").unwrap_err(),
            TokenError::UnknownRule("Required".to_string())
        );
        assert_eq!(
            try_parse_token("min").unwrap_err(),
            TokenError::MissingParameter("min".to_string())
        );
        assert_eq!(
            try_parse_token("min:").unwrap_err(),
            TokenError::MissingParameter("min".to_string())
        );
        assert!(matches!(
            try_parse_token("min:abc"),
            Err(TokenError::InvalidParameter { .. })
        ));
        assert!(matches!(
            try_parse_token("max:-1"),
            Err(TokenError::InvalidParameter { .. })
        ));
        assert!(matches!(
            try_parse_token("min_num:ten"),
            Err(TokenError::InvalidParameter { .. })
        ));
        assert_eq!(
            try_parse_token("email:strict").unwrap_err(),
            TokenError::UnexpectedParameter("email".to_string())
        );
        assert_eq!(
            try_parse_token("same:  ").unwrap_err(),
            TokenError::MissingParameter("same".to_string())
        );
    }

    #[test]
    fn test_parse_token_malformed() {
        let entry = parse_token("nope:1");
        assert!(entry.is_malformed());
        assert!(matches!(entry, RuleEntry::Malformed(token) if token == "nope:1"));
    }

    #[test]
    fn test_parse_tokens_keeps_order() {
        let rules = parse_tokens(["required", "bogus", "min:3"]);
        assert_eq!(rules.len(), 3);
        assert!(!rules[0].is_malformed());
        assert!(rules[1].is_malformed());
        assert!(!rules[2].is_malformed());

        let record = Record::new().with("name", "ab");
        let rule_map: RuleMap = [("name", rules)].into_iter().collect();
        assert_eq!(
            rule_map.validate(&record).messages("name"),
            ["", "Minimum length is 3"]
        );
    }
}
