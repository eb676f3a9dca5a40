use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::value::lenient_integer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityAction {
    Copy,
    Print,
}

impl UtilityAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "copy" => Some(Self::Copy),
            "print" => Some(Self::Print),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Print => "print",
        }
    }
}

/// What a menu entry does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    /// Prepends `prefix` to the selection and runs a lookup.
    Query { prefix: String },
    Utility { action: UtilityAction },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionColors {
    pub color_class: Option<String>,
    pub background_color: Option<String>,
    pub accent_color: Option<String>,
    pub font_color: Option<String>,
}

/// One entry of the option menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub kind: OptionKind,
    pub text: Option<String>,
    pub tooltip: Option<String>,
    /// Symbolic icon name, used by utility entries.
    pub icon: Option<String>,
    pub colors: OptionColors,
    pub position: Option<i64>,
}

impl OptionEntry {
    pub fn query(prefix: impl Into<String>) -> Self {
        Self::with_kind(OptionKind::Query {
            prefix: prefix.into(),
        })
    }

    pub fn utility(action: UtilityAction) -> Self {
        Self::with_kind(OptionKind::Utility { action })
    }

    fn with_kind(kind: OptionKind) -> Self {
        Self {
            kind,
            text: None,
            tooltip: None,
            icon: None,
            colors: OptionColors::default(),
            position: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("option defines both a prefix and an action")]
    PrefixAndAction,
    #[error("option defines neither a prefix nor an action")]
    MissingBehavior,
    #[error("unknown utility action: {0}")]
    UnknownAction(String),
    #[error("malformed option descriptor: {0}")]
    Malformed(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOption {
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    tooltip: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    color_class: Option<String>,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    accent_color: Option<String>,
    #[serde(default)]
    font_color: Option<String>,
    #[serde(default)]
    position: Option<Value>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

impl TryFrom<RawOption> for OptionEntry {
    type Error = OptionError;

    fn try_from(raw: RawOption) -> Result<Self, Self::Error> {
        let kind = match (non_empty(raw.prefix), non_empty(raw.action)) {
            (Some(_), Some(_)) => return Err(OptionError::PrefixAndAction),
            (None, None) => return Err(OptionError::MissingBehavior),
            (Some(prefix), None) => OptionKind::Query { prefix },
            (None, Some(action)) => OptionKind::Utility {
                action: UtilityAction::from_name(&action)
                    .ok_or(OptionError::UnknownAction(action))?,
            },
        };

        Ok(Self {
            kind,
            text: non_empty(raw.text),
            tooltip: non_empty(raw.tooltip),
            icon: non_empty(raw.icon),
            colors: OptionColors {
                color_class: non_empty(raw.color_class),
                background_color: non_empty(raw.background_color),
                accent_color: non_empty(raw.accent_color),
                font_color: non_empty(raw.font_color),
            },
            position: lenient_integer(raw.position.as_ref()),
        })
    }
}

pub(crate) fn parse_option(value: &Value) -> Result<OptionEntry, OptionError> {
    if !value.is_object() {
        return Err(OptionError::Malformed("expected an object".to_string()));
    }
    let raw: RawOption = serde_json::from_value(value.clone())
        .map_err(|err| OptionError::Malformed(err.to_string()))?;
    OptionEntry::try_from(raw)
}

/// Parses the host's option list, dropping entries that cannot be acted on.
pub(crate) fn parse_options(value: Option<&Value>) -> Vec<OptionEntry> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match parse_option(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(index, %err, "dropping option descriptor");
                None
            }
        })
        .collect()
}

/// Descending by `position`; a pair where either side lacks one compares equal.
///
/// Higher positions render rightmost because the panel lays out in reverse.
/// Insertion sort keeps this stable without requiring a total order, which the
/// missing-position rule does not provide.
pub fn sort_by_position(options: &[OptionEntry]) -> Vec<OptionEntry> {
    let mut sorted = options.to_vec();
    for index in 1..sorted.len() {
        let mut cursor = index;
        while cursor > 0 && should_follow(&sorted[cursor - 1], &sorted[cursor]) {
            sorted.swap(cursor - 1, cursor);
            cursor -= 1;
        }
    }
    sorted
}

fn should_follow(earlier: &OptionEntry, later: &OptionEntry) -> bool {
    match (earlier.position, later.position) {
        (Some(earlier), Some(later)) => later > earlier,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(options: &[OptionEntry]) -> Vec<&str> {
        options
            .iter()
            .map(|option| option.text.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn sort_by_position_is_descending_and_stable_for_missing_positions() {
        let options = vec![
            OptionEntry::query("a").with_text("A").with_position(1),
            OptionEntry::query("b").with_text("B").with_position(3),
            OptionEntry::query("c").with_text("C").with_position(2),
            OptionEntry::utility(UtilityAction::Copy).with_text("D"),
        ];

        assert_eq!(labels(&sort_by_position(&options)), ["B", "C", "A", "D"]);
    }

    #[test]
    fn sort_by_position_keeps_order_of_equal_positions() {
        let options = vec![
            OptionEntry::query("x").with_text("first").with_position(2),
            OptionEntry::query("y").with_text("second").with_position(2),
            OptionEntry::query("z").with_text("third").with_position(5),
        ];

        assert_eq!(
            labels(&sort_by_position(&options)),
            ["third", "first", "second"]
        );
    }

    #[test]
    fn parse_option_builds_query_and_utility_variants() {
        let query = parse_option(&json!({
            "prefix": "Explain: ",
            "text": "Explain",
            "position": "2",
            "backgroundColor": "#fff"
        }))
        .expect("query option should parse");
        assert_eq!(
            query.kind,
            OptionKind::Query {
                prefix: "Explain: ".to_string()
            }
        );
        assert_eq!(query.position, Some(2));
        assert_eq!(query.colors.background_color.as_deref(), Some("#fff"));

        let copy = parse_option(&json!({ "action": "copy", "icon": "dashicons-clipboard" }))
            .expect("utility option should parse");
        assert_eq!(
            copy.kind,
            OptionKind::Utility {
                action: UtilityAction::Copy
            }
        );
        assert_eq!(copy.icon.as_deref(), Some("dashicons-clipboard"));
    }

    #[test]
    fn parse_option_rejects_ambiguous_and_empty_descriptors() {
        assert_eq!(
            parse_option(&json!({ "prefix": "p", "action": "copy" })),
            Err(OptionError::PrefixAndAction)
        );
        assert_eq!(
            parse_option(&json!({ "prefix": "", "text": "nothing" })),
            Err(OptionError::MissingBehavior)
        );
        assert_eq!(
            parse_option(&json!({ "action": "share" })),
            Err(OptionError::UnknownAction("share".to_string()))
        );
        assert!(matches!(
            parse_option(&json!("not an object")),
            Err(OptionError::Malformed(_))
        ));
    }

    #[test]
    fn parse_options_skips_invalid_entries() {
        let parsed = parse_options(Some(&json!([
            { "prefix": "Define: " },
            { "text": "broken" },
            { "action": "print" }
        ])));

        assert_eq!(parsed.len(), 2);
        assert!(parse_options(Some(&json!({ "prefix": "x" }))).is_empty());
        assert!(parse_options(None).is_empty());
    }
}
