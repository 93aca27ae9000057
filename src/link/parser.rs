use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::geodesy::{Coordinates, GeoPoint};
use crate::profile::{analyze, AnalysisOptions, AnalysisResult, StationParameters};
use crate::terrain::{FlatSource, ProfileBuilder, DEFAULT_STEP_M};

use super::profile_file::read_profile;
use super::LinkError;

/// Where a plan gets its terrain profile from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSource {
    Inline(Vec<GeoPoint>),
    File(PathBuf),
    Flat {
        from: Coordinates,
        to: Coordinates,
        elevation_m: f64,
        step_m: f64,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct FlatSection {
    from: String,
    to: String,
    #[serde(default)]
    elevation_m: f64,
    #[serde(default = "default_step")]
    step_m: f64,
}

fn default_step() -> f64 {
    DEFAULT_STEP_M
}

/// A point-to-point link: both stations, analysis options and a profile.
///
/// Plans are YAML documents with `near`, `far`, optional `name` and
/// `options`, and exactly one of `profile` (inline points), `profile_file`
/// (JSON, relative to the plan) or `flat`. A top-level `variables:` map can
/// be referenced anywhere below it as `$name`; a value that is only `$name`
/// keeps the variable's type, so `frequency_mhz: $freq` stays a number.
#[derive(Debug, Clone)]
pub struct LinkPlan {
    pub name: Option<String>,
    pub variables: HashMap<String, serde_yaml::Value>,
    pub near: StationParameters,
    pub far: StationParameters,
    pub options: AnalysisOptions,
    pub profile: ProfileSource,
}

impl LinkPlan {
    pub fn from_str(yaml: &str) -> Result<Self, LinkError> {
        let root: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let err = |msg: &str| LinkError::Plan(msg.into());

        let variables: HashMap<String, serde_yaml::Value> = root
            .get("variables")
            .map(|v| serde_yaml::from_value(v.clone()))
            .transpose()?
            .unwrap_or_default();

        let section = |key: &str| -> Result<serde_yaml::Value, LinkError> {
            root.get(key)
                .map(|v| resolve_value(v, &variables))
                .ok_or_else(|| err(&format!("missing '{}'", key)))
        };

        let near: StationParameters = serde_yaml::from_value(section("near")?)
            .map_err(|e| err(&format!("near: {}", e)))?;
        let far: StationParameters = serde_yaml::from_value(section("far")?)
            .map_err(|e| err(&format!("far: {}", e)))?;

        let options: AnalysisOptions = root
            .get("options")
            .map(|v| serde_yaml::from_value(resolve_value(v, &variables)))
            .transpose()
            .map_err(|e| err(&format!("options: {}", e)))?
            .unwrap_or_default();

        let name = root
            .get("name")
            .and_then(|v| resolve_value(v, &variables).as_str().map(String::from));

        let profile = parse_profile_source(&root, &variables)?;

        Ok(LinkPlan {
            name,
            variables,
            near,
            far,
            options,
            profile,
        })
    }

    /// Reads a plan file. Relative profile paths are resolved against the
    /// plan's directory.
    pub fn load(path: &Path) -> Result<Self, LinkError> {
        let yaml = std::fs::read_to_string(path)?;
        let mut plan = Self::from_str(&yaml)?;
        if let ProfileSource::File(file) = &plan.profile {
            if file.is_relative() {
                let base = path.parent().unwrap_or_else(|| Path::new("."));
                plan.profile = ProfileSource::File(base.join(file));
            }
        }
        Ok(plan)
    }

    pub fn resolve_profile(&self) -> Result<Vec<GeoPoint>, LinkError> {
        match &self.profile {
            ProfileSource::Inline(points) => Ok(points.clone()),
            ProfileSource::File(path) => read_profile(path),
            ProfileSource::Flat {
                from,
                to,
                elevation_m,
                step_m,
            } => Ok(ProfileBuilder::default().step_m(*step_m).build(
                *from,
                *to,
                &mut FlatSource(*elevation_m),
            )?),
        }
    }

    pub fn analyze(&self) -> Result<AnalysisResult, LinkError> {
        let profile = self.resolve_profile()?;
        Ok(analyze(&profile, &self.near, &self.far, &self.options)?)
    }
}

fn parse_profile_source(
    root: &serde_yaml::Value,
    vars: &HashMap<String, serde_yaml::Value>,
) -> Result<ProfileSource, LinkError> {
    let err = |msg: &str| LinkError::Plan(msg.into());
    let candidates: Vec<&str> = ["profile", "profile_file", "flat"]
        .into_iter()
        .filter(|k| root.get(*k).is_some())
        .collect();

    let key = match candidates.as_slice() {
        [key] => *key,
        [] => return Err(err("one of 'profile', 'profile_file' or 'flat' is required")),
        _ => return Err(err("only one of 'profile', 'profile_file' or 'flat' may be given")),
    };
    let value = root
        .get(key)
        .map(|v| resolve_value(v, vars))
        .ok_or_else(|| err("missing profile"))?;

    match key {
        "profile" => {
            let points: Vec<GeoPoint> = serde_yaml::from_value(value)
                .map_err(|e| err(&format!("profile: {}", e)))?;
            Ok(ProfileSource::Inline(points))
        }
        "profile_file" => {
            let path = value
                .as_str()
                .ok_or_else(|| err("profile_file must be a string"))?;
            Ok(ProfileSource::File(PathBuf::from(path)))
        }
        _ => {
            let flat: FlatSection =
                serde_yaml::from_value(value).map_err(|e| err(&format!("flat: {}", e)))?;
            let from = Coordinates::from_pair(&flat.from)
                .ok_or_else(|| err("flat.from must be 'lat,lon'"))?;
            let to = Coordinates::from_pair(&flat.to)
                .ok_or_else(|| err("flat.to must be 'lat,lon'"))?;
            Ok(ProfileSource::Flat {
                from,
                to,
                elevation_m: flat.elevation_m,
                step_m: flat.step_m,
            })
        }
    }
}

/// Expands plan variables inside `value`. A string that is exactly `$name`
/// takes the variable's value with its YAML type; `$name` inside a longer
/// string is replaced by the variable's scalar text. Unknown names are kept.
fn resolve_value(
    value: &serde_yaml::Value,
    vars: &HashMap<String, serde_yaml::Value>,
) -> serde_yaml::Value {
    use serde_yaml::Value;

    match value {
        Value::String(s) => {
            let whole = s.trim().strip_prefix('$').and_then(|name| {
                name.chars()
                    .all(is_name_char)
                    .then(|| vars.get(name))
                    .flatten()
            });
            match whole {
                Some(v) => v.clone(),
                None => Value::String(substitute(s, vars)),
            }
        }
        Value::Mapping(m) => Value::Mapping(
            m.iter()
                .map(|(k, v)| (k.clone(), resolve_value(v, vars)))
                .collect(),
        ),
        Value::Sequence(items) => {
            Value::Sequence(items.iter().map(|v| resolve_value(v, vars)).collect())
        }
        other => other.clone(),
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// Reads whole names after each `$`, so `$freq` never matches inside `$freq_hi`.
fn substitute(text: &str, vars: &HashMap<String, serde_yaml::Value>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let len = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
        let name = &after[..len];
        match vars.get(name).and_then(scalar_text) {
            Some(text) if !name.is_empty() => out.push_str(&text),
            _ => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[len..];
    }
    out.push_str(rest);
    out
}

fn scalar_text(v: &serde_yaml::Value) -> Option<String> {
    match v {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ZoneFraction;
    use crate::terrain::Smoothing;

    const PLAN: &str = r#"
name: ridge-hop
variables:
  freq: 915
  site_a: "42.00,45.00"
near:
  name: Ridge
  height_agl_m: 10
  frequency_mhz: $freq
  tx_power_w: 1
far:
  height_agl_m: 12
  frequency_mhz: $freq
  tx_power_w: 0.5
  antenna_gain_dbi: 3
options:
  fresnel_zone: 1
  smoothing: none
flat:
  from: $site_a
  to: "42.05,45.05"
  elevation_m: 300
"#;

    #[test]
    fn parses_plan_with_variables() {
        let plan = LinkPlan::from_str(PLAN).unwrap();
        assert_eq!(plan.name.as_deref(), Some("ridge-hop"));
        assert_eq!(plan.near.frequency_mhz, 915.0);
        assert_eq!(plan.far.antenna_gain_dbi, 3.0);
        assert_eq!(plan.options.fresnel_zone, ZoneFraction::Full);
        assert_eq!(plan.options.smoothing, Smoothing::Disabled);
        assert_eq!(plan.options.k_factor, 4.0 / 3.0);
        match plan.profile {
            ProfileSource::Flat {
                from, elevation_m, ..
            } => {
                assert_eq!(from, Coordinates::new(42.0, 45.0));
                assert_eq!(elevation_m, 300.0);
            }
            other => panic!("unexpected profile source {:?}", other),
        }
    }

    #[test]
    fn flat_plan_analyzes() {
        let plan = LinkPlan::from_str(PLAN).unwrap();
        let result = plan.analyze().unwrap();
        assert!(result.los_clear);
        assert_eq!(result.near.asl_m, 310.0);
    }

    #[test]
    fn inline_profile() {
        let yaml = r#"
near: { height_agl_m: 5, frequency_mhz: 2400, tx_power_w: 0.1 }
far: { height_agl_m: 5, frequency_mhz: 2400, tx_power_w: 0.1 }
profile:
  - { latitude: 0, longitude: 0, elevation: 0 }
  - { latitude: 0, longitude: 0.005, elevation: 2 }
  - { latitude: 0, longitude: 0.01, elevation: 0 }
"#;
        let plan = LinkPlan::from_str(yaml).unwrap();
        assert_eq!(plan.resolve_profile().unwrap().len(), 3);
        assert_eq!(plan.options, AnalysisOptions::default());
    }

    #[test]
    fn profile_source_is_required_and_exclusive() {
        let base = "near: { height_agl_m: 5, frequency_mhz: 2400, tx_power_w: 0.1 }\n\
                    far: { height_agl_m: 5, frequency_mhz: 2400, tx_power_w: 0.1 }\n";
        assert!(matches!(LinkPlan::from_str(base), Err(LinkError::Plan(_))));

        let both = format!(
            "{}profile_file: a.json\nflat: {{ from: \"0,0\", to: \"0,1\" }}\n",
            base
        );
        assert!(matches!(LinkPlan::from_str(&both), Err(LinkError::Plan(_))));
    }

    #[test]
    fn missing_station_is_reported() {
        let yaml = "near: { height_agl_m: 5, frequency_mhz: 2400, tx_power_w: 0.1 }\n\
                    profile_file: p.json\n";
        match LinkPlan::from_str(yaml) {
            Err(LinkError::Plan(msg)) => assert!(msg.contains("far")),
            other => panic!("unexpected {:?}", other.map(|p| p.name)),
        }
    }

    #[test]
    fn load_resolves_relative_profile_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("profile.json"),
            r#"[{"latitude": 0, "longitude": 0, "elevation": 0},
                {"latitude": 0, "longitude": 0.01, "elevation": 0}]"#,
        )
        .unwrap();
        let plan_path = dir.path().join("link.yaml");
        std::fs::write(
            &plan_path,
            "near: { height_agl_m: 5, frequency_mhz: 915, tx_power_w: 1 }\n\
             far: { height_agl_m: 5, frequency_mhz: 915, tx_power_w: 1 }\n\
             profile_file: profile.json\n",
        )
        .unwrap();

        let plan = LinkPlan::load(&plan_path).unwrap();
        assert_eq!(
            plan.profile,
            ProfileSource::File(dir.path().join("profile.json"))
        );
        let result = plan.analyze().unwrap();
        assert!(result.los_clear);
        assert!(result.fresnel_clear);
    }

    #[test]
    fn variables_match_whole_names() {
        let vars: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(
            "freq: 915\nfreq_hi: 2400\nsite: north\n",
        )
        .unwrap();
        let text = |s: &str| resolve_value(&serde_yaml::Value::String(s.into()), &vars);

        assert_eq!(text("$freq"), serde_yaml::Value::from(915u64));
        assert_eq!(text(" $freq_hi "), serde_yaml::Value::from(2400u64));
        assert_eq!(text("$site-$freq_hi MHz"), serde_yaml::Value::from("north-2400 MHz"));
        assert_eq!(text("$unknown at $"), serde_yaml::Value::from("$unknown at $"));
    }
}
