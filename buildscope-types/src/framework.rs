//! Target framework identifiers.
//!
//! A [`TargetFramework`] is the canonical key for everything framework-related in buildscope.
//! Short monikers (`net6.0`, `net48`, `netstandard2.0`), full names
//! (`.NETFramework,Version=v4.8`) and legacy identifier/version pairs all parse into the same
//! structured value, so two spellings of one framework compare equal.

use crate::version::FrameworkVersion;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Well-known framework identifiers, in their canonical casing.
pub mod identifiers {
    pub const NET_FRAMEWORK: &str = ".NETFramework";
    pub const NET_CORE_APP: &str = ".NETCoreApp";
    pub const NET_STANDARD: &str = ".NETStandard";
    pub const NET_PORTABLE: &str = ".NETPortable";
    pub const NET_MICRO_FRAMEWORK: &str = ".NETMicroFramework";
    pub const UAP: &str = "UAP";
    pub const WINDOWS: &str = "Windows";
    pub const WINDOWS_PHONE: &str = "WindowsPhone";
    pub const WINDOWS_PHONE_APP: &str = "WindowsPhoneApp";
    pub const SILVERLIGHT: &str = "Silverlight";
    pub const MONO_ANDROID: &str = "MonoAndroid";
    pub const MONO_TOUCH: &str = "MonoTouch";
    pub const XAMARIN_IOS: &str = "Xamarin.iOS";
    pub const XAMARIN_MAC: &str = "Xamarin.Mac";
    pub const TIZEN: &str = "Tizen";
    pub const NATIVE: &str = "native";
}

use identifiers::*;

/// Short moniker prefix -> canonical identifier.
const SHORT_NAMES: &[(&str, &str)] = &[
    ("net", NET_FRAMEWORK),
    ("netcoreapp", NET_CORE_APP),
    ("netstandard", NET_STANDARD),
    ("portable", NET_PORTABLE),
    ("netmf", NET_MICRO_FRAMEWORK),
    ("uap", UAP),
    ("win", WINDOWS),
    ("wp", WINDOWS_PHONE),
    ("wpa", WINDOWS_PHONE_APP),
    ("sl", SILVERLIGHT),
    ("monoandroid", MONO_ANDROID),
    ("monotouch", MONO_TOUCH),
    ("xamarinios", XAMARIN_IOS),
    ("xamarinmac", XAMARIN_MAC),
    ("tizen", TIZEN),
    ("native", NATIVE),
];

/// Identifier assumed for a legacy `TargetFrameworkVersion` with no `TargetFrameworkIdentifier`.
pub const DEFAULT_LEGACY_IDENTIFIER: &str = NET_FRAMEWORK;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameworkParseError {
    #[error("invalid framework version '{value}'")]
    InvalidVersion { value: String },
}

/// A recognized framework: identifier plus version, with optional platform (`net5.0-windows`)
/// or profile (`net40-client`).
///
/// Field order is the sort order: identifier, then version, then platform, then profile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameworkName {
    pub identifier: String,
    pub version: FrameworkVersion,
    pub platform: Option<String>,
    pub profile: Option<String>,
}

/// Canonical target framework key.
///
/// Variant order is part of the sort order: concrete frameworks first, then unrecognized
/// monikers, then `Any`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetFramework {
    Specific(FrameworkName),
    /// A moniker that could not be recognized; holds the trimmed, lowercased text.
    Unsupported(String),
    /// No particular framework.
    Any,
}

impl TargetFramework {
    /// Build a framework from an identifier and version, canonicalizing identifier casing.
    pub fn new(identifier: &str, version: FrameworkVersion) -> Self {
        Self::Specific(FrameworkName {
            identifier: canonical_identifier(identifier),
            version,
            platform: None,
            profile: None,
        })
    }

    /// Build a framework from a legacy `TargetFrameworkIdentifier`/`TargetFrameworkVersion` pair.
    ///
    /// Leading `v` characters are stripped from the version, which must then have two to four
    /// numeric components.
    pub fn from_legacy(identifier: &str, version: &str) -> Result<Self, FrameworkParseError> {
        let version = FrameworkVersion::parse_strict(version.trim().trim_start_matches('v'))?;
        Ok(Self::new(identifier.trim(), version))
    }

    /// Parse a short moniker or a full framework name. Never fails: unrecognized input becomes
    /// [`TargetFramework::Unsupported`].
    pub fn parse(moniker: &str) -> Self {
        let trimmed = moniker.trim();
        if trimmed.contains(',') {
            return parse_full_name(trimmed);
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower.is_empty() || lower == "any" {
            return Self::Any;
        }

        let (base, suffix) = match lower.split_once('-') {
            Some((base, suffix)) => (base, Some(suffix).filter(|s| !s.is_empty())),
            None => (lower.as_str(), None),
        };

        let alpha_end = base
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(base.len());
        let (prefix, version) = base.split_at(alpha_end);

        let Some(identifier) = short_identifier(prefix) else {
            return Self::Unsupported(lower);
        };
        let Some(version) = FrameworkVersion::parse_moniker(version) else {
            return Self::Unsupported(lower);
        };

        // `net5.0` and later are .NET Core, not .NET Framework.
        let identifier = if identifier == NET_FRAMEWORK && version.major >= 5 {
            NET_CORE_APP
        } else {
            identifier
        };

        let (platform, profile) = match suffix {
            None => (None, None),
            Some(s) if uses_platform_suffix(identifier, &version) => (Some(s.to_string()), None),
            Some(s) => (None, Some(profile_name(s))),
        };

        Self::Specific(FrameworkName {
            identifier: identifier.to_string(),
            version,
            platform,
            profile,
        })
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Specific(name) => Some(&name.identifier),
            _ => None,
        }
    }

    pub fn version(&self) -> Option<FrameworkVersion> {
        match self {
            Self::Specific(name) => Some(name.version),
            _ => None,
        }
    }

    /// Full framework name, e.g. `.NETCoreApp,Version=v6.0`.
    pub fn full_name(&self) -> String {
        match self {
            Self::Specific(name) => {
                let mut out = format!("{},Version=v{}", name.identifier, name.version);
                if let Some(profile) = &name.profile {
                    out.push_str(&format!(",Profile={}", profile));
                }
                out
            }
            Self::Unsupported(raw) => raw.clone(),
            Self::Any => "Any,Version=v0.0".to_string(),
        }
    }
}

fn parse_full_name(value: &str) -> TargetFramework {
    let mut parts = value.split(',');
    let identifier = parts.next().map(str::trim).unwrap_or_default();
    if identifier.is_empty() {
        return TargetFramework::Unsupported(value.to_ascii_lowercase());
    }
    if identifier.eq_ignore_ascii_case("any") {
        return TargetFramework::Any;
    }

    let mut version = FrameworkVersion::default();
    let mut profile = None;
    for part in parts {
        let Some((key, val)) = part.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let val = val.trim();
        if key.eq_ignore_ascii_case("version") {
            match FrameworkVersion::parse_moniker(val.trim_start_matches(['v', 'V'])) {
                Some(v) => version = v,
                None => return TargetFramework::Unsupported(value.to_ascii_lowercase()),
            }
        } else if key.eq_ignore_ascii_case("profile") && !val.is_empty() {
            profile = Some(val.to_string());
        }
    }

    TargetFramework::Specific(FrameworkName {
        identifier: canonical_identifier(identifier),
        version,
        platform: None,
        profile,
    })
}

fn short_identifier(prefix: &str) -> Option<&'static str> {
    SHORT_NAMES
        .iter()
        .find(|(short, _)| *short == prefix)
        .map(|(_, identifier)| *identifier)
}

fn short_prefix(identifier: &str) -> Option<&'static str> {
    SHORT_NAMES
        .iter()
        .find(|(_, id)| *id == identifier)
        .map(|(short, _)| *short)
}

fn canonical_identifier(identifier: &str) -> String {
    SHORT_NAMES
        .iter()
        .map(|(_, id)| *id)
        .find(|id| id.eq_ignore_ascii_case(identifier))
        .unwrap_or(identifier)
        .to_string()
}

fn uses_platform_suffix(identifier: &str, version: &FrameworkVersion) -> bool {
    identifier == NET_CORE_APP && version.major >= 5
}

fn profile_name(suffix: &str) -> String {
    match suffix {
        "client" => "Client".to_string(),
        "full" => "Full".to_string(),
        other => other.to_string(),
    }
}

/// Short moniker for `name`, or `None` when the identifier has no short prefix.
fn short_moniker(name: &FrameworkName) -> Option<String> {
    let modern = uses_platform_suffix(&name.identifier, &name.version);
    let prefix = if modern {
        "net"
    } else {
        short_prefix(&name.identifier)?
    };

    let mut out = prefix.to_string();
    let unversioned = name.version == FrameworkVersion::default()
        && matches!(name.identifier.as_str(), NET_PORTABLE | NATIVE);
    if !unversioned {
        let dotted = modern || matches!(name.identifier.as_str(), NET_CORE_APP | NET_STANDARD);
        match name.version.compact() {
            Some(compact) if !dotted => out.push_str(&compact),
            _ => out.push_str(&name.version.to_string()),
        }
    }
    if let Some(platform) = &name.platform {
        out.push('-');
        out.push_str(platform);
    }
    if let Some(profile) = &name.profile {
        out.push('-');
        out.push_str(&profile.to_ascii_lowercase());
    }
    Some(out)
}

impl fmt::Display for TargetFramework {
    /// Short moniker form where one parses back to the same framework, full name otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => return f.write_str("any"),
            Self::Unsupported(raw) => return f.write_str(raw),
            Self::Specific(name) => name,
        };

        // `.NETFramework` 5+ and profiled .NET 5+ have no short spelling of their own.
        match short_moniker(name) {
            Some(short) if Self::parse(&short) == *self => f.write_str(&short),
            _ => f.write_str(&self.full_name()),
        }
    }
}

impl FromStr for TargetFramework {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for TargetFramework {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for TargetFramework {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<TargetFramework> for String {
    fn from(value: TargetFramework) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specific(identifier: &str, major: u32, minor: u32) -> TargetFramework {
        TargetFramework::new(identifier, FrameworkVersion::new(major, minor))
    }

    #[test]
    fn parses_common_monikers() {
        assert_eq!(TargetFramework::parse("net6.0"), specific(NET_CORE_APP, 6, 0));
        assert_eq!(TargetFramework::parse("net48"), specific(NET_FRAMEWORK, 4, 8));
        assert_eq!(
            TargetFramework::parse("netstandard2.0"),
            specific(NET_STANDARD, 2, 0)
        );
        assert_eq!(
            TargetFramework::parse("netcoreapp3.1"),
            specific(NET_CORE_APP, 3, 1)
        );
    }

    #[test]
    fn spellings_of_one_framework_are_equal() {
        let a = TargetFramework::parse("net6.0");
        assert_eq!(a, TargetFramework::parse("NET6"));
        assert_eq!(a, TargetFramework::parse(".NETCoreApp,Version=v6.0"));
        assert_eq!(a, TargetFramework::parse("netcoreapp6.0"));
        assert_eq!(
            TargetFramework::parse("net48"),
            TargetFramework::from_legacy(".netframework", "v4.8").unwrap()
        );
    }

    #[test]
    fn platform_and_profile_suffixes() {
        let TargetFramework::Specific(win) = TargetFramework::parse("net7.0-windows") else {
            panic!("expected specific framework");
        };
        assert_eq!(win.platform.as_deref(), Some("windows"));
        assert_eq!(win.profile, None);

        let TargetFramework::Specific(client) = TargetFramework::parse("net40-client") else {
            panic!("expected specific framework");
        };
        assert_eq!(client.profile.as_deref(), Some("Client"));
        assert_eq!(client.identifier, NET_FRAMEWORK);
    }

    #[test]
    fn unknown_monikers_keep_raw_text() {
        assert_eq!(
            TargetFramework::parse(" Foo1.0 "),
            TargetFramework::Unsupported("foo1.0".to_string())
        );
        assert_eq!(TargetFramework::parse(""), TargetFramework::Any);
        assert_eq!(TargetFramework::parse("any"), TargetFramework::Any);
        assert!(TargetFramework::parse("foo1.0").is_unsupported());
        assert!(!TargetFramework::parse("net6.0").is_unsupported());
        assert!(!TargetFramework::Any.is_unsupported());
    }

    #[test]
    fn display_uses_short_monikers() {
        for moniker in [
            "net6.0",
            "net48",
            "net472",
            "netstandard2.1",
            "netcoreapp3.1",
            "net8.0-android",
            "net40-client",
            "uap10.0",
            "any",
        ] {
            assert_eq!(TargetFramework::parse(moniker).to_string(), moniker);
        }
        assert_eq!(
            TargetFramework::parse("Custom.Framework,Version=v1.2").to_string(),
            "Custom.Framework,Version=v1.2"
        );
    }

    #[test]
    fn display_falls_back_to_full_name_without_short_spelling() {
        for full_name in [
            ".NETFramework,Version=v5.0",
            ".NETCoreApp,Version=v6.0,Profile=Client",
            ".NETFramework,Version=v4.0,Profile=Custom",
        ] {
            let framework = TargetFramework::parse(full_name);
            assert_eq!(framework.to_string(), full_name);
            assert_eq!(TargetFramework::parse(&framework.to_string()), framework);
        }
        assert_eq!(
            TargetFramework::parse(".NETFramework,Version=v4.0,Profile=Client").to_string(),
            "net40-client"
        );
    }

    #[test]
    fn legacy_version_must_be_numeric() {
        let err = TargetFramework::from_legacy(NET_FRAMEWORK, "vX.Y").unwrap_err();
        assert_eq!(
            err,
            FrameworkParseError::InvalidVersion {
                value: "X.Y".to_string()
            }
        );
    }

    #[test]
    fn ordering_is_identifier_then_version_with_any_last() {
        let mut frameworks = vec![
            TargetFramework::Any,
            TargetFramework::parse("net8.0"),
            TargetFramework::parse("bogus"),
            TargetFramework::parse("net48"),
            TargetFramework::parse("net6.0"),
            TargetFramework::parse("netstandard2.0"),
        ];
        frameworks.sort();
        let rendered: Vec<String> = frameworks.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["net6.0", "net8.0", "net48", "netstandard2.0", "bogus", "any"]
        );
    }

    #[test]
    fn serializes_as_moniker_string() {
        let json = serde_json::to_string(&TargetFramework::parse("net6.0")).unwrap();
        assert_eq!(json, "\"net6.0\"");
        let back: TargetFramework = serde_json::from_str("\"netstandard2.0\"").unwrap();
        assert_eq!(back, specific(NET_STANDARD, 2, 0));
    }
}
