use serde::{Deserialize, Serialize};

/// Which payload bucket a workflow field feeds. Encoded as the id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Input,
    Account,
    Password,
}

impl FieldKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Input => "input-",
            Self::Account => "account-",
            Self::Password => "password-",
        }
    }

    /// Splits a field id into its kind and key (parameter name or platform).
    pub fn parse(id: &str) -> Option<(FieldKind, &str)> {
        [Self::Input, Self::Account, Self::Password]
            .into_iter()
            .find_map(|kind| id.strip_prefix(kind.prefix()).map(|key| (kind, key)))
    }
}

fn default_field_type() -> String {
    "string".to_string()
}

fn default_true() -> bool {
    true
}

/// One user-fillable slot for a workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchemaEntry {
    pub id: String,
    pub display_name: String,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default = "default_field_type", rename = "type")]
    pub field_type: String,
    #[serde(default = "default_true")]
    pub display: bool,
    #[serde(default = "default_true")]
    pub default_match: bool,
}

impl FieldSchemaEntry {
    fn new(id: String, display_name: String) -> Self {
        Self {
            id,
            display_name,
            required: true,
            field_type: default_field_type(),
            display: true,
            default_match: true,
        }
    }

    pub fn input(name: &str) -> Self {
        Self::new(format!("{}{}", FieldKind::Input.prefix(), name), name.to_string())
    }

    pub fn account(platform: &str) -> Self {
        Self::new(
            format!("{}{}", FieldKind::Account.prefix(), platform),
            format!("Account: {}", platform),
        )
    }

    pub fn password(platform: &str) -> Self {
        Self::new(
            format!("{}{}", FieldKind::Password.prefix(), platform),
            format!("Password: {}", platform),
        )
    }

    pub fn kind(&self) -> Option<(FieldKind, &str)> {
        FieldKind::parse(&self.id)
    }
}

/// An agent or workflow as listed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub id: String,
    pub name: String,
}

/// Dropdown entry handed to the host, `value` carries the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub name: String,
    pub value: String,
}

impl From<ResourceSummary> for OptionEntry {
    fn from(s: ResourceSummary) -> Self {
        OptionEntry {
            name: s.name,
            value: s.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes_by_prefix() {
        assert_eq!(FieldKind::parse("input-url"), Some((FieldKind::Input, "url")));
        assert_eq!(
            FieldKind::parse("account-github"),
            Some((FieldKind::Account, "github"))
        );
        assert_eq!(
            FieldKind::parse("password-github"),
            Some((FieldKind::Password, "github"))
        );
        assert_eq!(FieldKind::parse("other-x"), None);
    }

    #[test]
    fn test_constructors_set_display_names() {
        assert_eq!(FieldSchemaEntry::input("query").display_name, "query");
        assert_eq!(FieldSchemaEntry::account("x").display_name, "Account: x");
        assert_eq!(FieldSchemaEntry::password("x").id, "password-x");
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let v = serde_json::to_value(FieldSchemaEntry::input("q")).unwrap();
        assert_eq!(v["displayName"], "q");
        assert_eq!(v["type"], "string");
        assert_eq!(v["defaultMatch"], true);
    }
}
