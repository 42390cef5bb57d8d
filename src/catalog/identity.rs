use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const LINK_BASE: &str = "http://800-53.govready.com/control?id=";

/// Control family code (e.g., `AC`, `SI`) taken from the front of a control key.
///
/// Codes are compared exactly; `ac` and `AC` are different families.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyCode(pub String);

impl FamilyCode {
    /// Text before the first `-` of the raw control key, or the whole key when
    /// it has no dash.
    pub fn from_control_key(control_key: &str) -> Self {
        let code = control_key.split('-').next().unwrap_or(control_key);
        FamilyCode(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifiers derived from a component's control key.
///
/// `control_id` is the form used by the standard catalog (`AC-2 (1)`), while
/// `url_id` is the base control used in govready links (`AC-2`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ControlIds {
    pub control_id: String,
    pub url_id: String,
}

impl ControlIds {
    /// Normalize a raw control key.
    ///
    /// Leading zeros after the dash are dropped (`AC-02` becomes `AC-2`) and a
    /// parenthesized enhancement is split off the base with exactly one space
    /// in between, so `AC-2(1)` links to `AC-2`. Feeding `control_id` back in
    /// yields the same ids.
    pub fn from_key(control_key: &str) -> Self {
        let mut control_id = control_key.to_string();
        while control_id.contains("-0") {
            control_id = control_id.replace("-0", "-");
        }

        match enhancement_pattern().captures(&control_id) {
            Some(caps) => {
                let base = caps.get(1).map_or("", |m| m.as_str()).to_string();
                let rest = caps.get(2).map_or("", |m| m.as_str());
                ControlIds {
                    control_id: format!("{base} {rest}"),
                    url_id: base,
                }
            }
            None => ControlIds {
                url_id: control_id.clone(),
                control_id,
            },
        }
    }

    /// Link to the control's page on the govready 800-53 browser.
    pub fn link(&self) -> String {
        format!("{LINK_BASE}{}", self.url_id)
    }
}

fn enhancement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([^ (]*)\s*(\(.*)").unwrap_or_else(|err| panic!("invalid pattern: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_code_stops_at_first_dash() {
        assert_eq!(FamilyCode::from_control_key("AC-2(1)").as_str(), "AC");
        assert_eq!(FamilyCode::from_control_key("SI-04").as_str(), "SI");
        assert_eq!(FamilyCode::from_control_key("PM").as_str(), "PM");
    }

    #[test]
    fn plain_key_keeps_url_id() {
        let ids = ControlIds::from_key("AC-2");
        assert_eq!(ids.control_id, "AC-2");
        assert_eq!(ids.url_id, "AC-2");
        assert_eq!(ids.link(), "http://800-53.govready.com/control?id=AC-2");
    }

    #[test]
    fn leading_zero_is_stripped_before_split() {
        let ids = ControlIds::from_key("AC-02(1)");
        assert_eq!(ids.control_id, "AC-2 (1)");
        assert_eq!(ids.url_id, "AC-2");

        let padded = ControlIds::from_key("AU-002");
        assert_eq!(padded.control_id, "AU-2");
    }

    #[test]
    fn unspaced_enhancement_links_base_control() {
        // `AC-2(1)` is split like `AC-2 (1)`: the link targets the base
        // control page rather than keeping `AC-2(1)` as the link id.
        let ids = ControlIds::from_key("AC-2(1)");
        assert_eq!(ids.url_id, "AC-2");
        assert_ne!(ids.url_id, "AC-2(1)");
        assert_eq!(ids.link(), "http://800-53.govready.com/control?id=AC-2");
        assert_eq!(ids, ControlIds::from_key("AC-02(1)"));
    }

    #[test]
    fn enhancement_spacing_is_normalized() {
        let tight = ControlIds::from_key("AC-2(1)");
        let spaced = ControlIds::from_key("AC-2   (1)");
        assert_eq!(tight, spaced);
        assert_eq!(tight.control_id, "AC-2 (1)");
    }

    #[test]
    fn transform_is_idempotent() {
        for key in ["AC-02(1)", "AC-2 (12)", "SC-07", "CM-2(a)(1)", "PL-1"] {
            let once = ControlIds::from_key(key);
            let twice = ControlIds::from_key(&once.control_id);
            assert_eq!(once.control_id, twice.control_id, "control_id for {key}");
            assert_eq!(once.url_id, twice.url_id, "url_id for {key}");
        }
    }
}
