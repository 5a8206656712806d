use crate::domain::BrowserName;
use serde::{Deserialize, Serialize};

/// Capability report supplied by the host environment.
///
/// Each flag mirrors one vendor-specific global the host can observe. Hosts
/// that only know their user-agent string can use [`EnvironmentProbe::from_user_agent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentProbe {
    /// `window.opr.addons` is present
    pub opera_addons: bool,
    /// `window.opera` is present
    pub legacy_opera: bool,
    /// `InstallTrigger` is defined
    pub install_trigger: bool,
    /// `window.safari.pushNotification` reports as `SafariRemoteNotification`
    pub safari_push_notification: bool,
    /// `HTMLElement` stringifies with "constructor"
    pub html_element_constructor: bool,
    /// `document.documentMode` is set
    pub document_mode: bool,
    /// `window.chrome.webstore` or `window.chrome.runtime` is present
    pub chrome_runtime: bool,
    /// `window.StyleMedia` is present
    pub style_media: bool,
    pub user_agent: String,
}

impl EnvironmentProbe {
    pub fn from_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    fn user_agent_contains(&self, needle: &str) -> bool {
        self.user_agent.contains(needle)
    }
}

/// Determines the browser family from an [`EnvironmentProbe`].
///
/// Feature probes are checked first since they are harder to spoof; the
/// user-agent string only fills in when no probe matched.
pub struct BrowserIdentifier;

impl BrowserIdentifier {
    pub fn detect(probe: &EnvironmentProbe) -> BrowserName {
        Self::detect_by_features(probe)
            .or_else(|| Self::detect_by_user_agent(probe))
            .unwrap_or(BrowserName::Unknown)
    }

    fn detect_by_features(probe: &EnvironmentProbe) -> Option<BrowserName> {
        if probe.opera_addons || probe.legacy_opera || probe.user_agent_contains(" OPR/") {
            Some(BrowserName::Opera)
        } else if probe.install_trigger {
            Some(BrowserName::Firefox)
        } else if probe.html_element_constructor || probe.safari_push_notification {
            Some(BrowserName::Safari)
        } else if probe.document_mode {
            Some(BrowserName::Ie)
        } else if probe.chrome_runtime {
            Some(BrowserName::Chrome)
        } else {
            None
        }
    }

    fn detect_by_user_agent(probe: &EnvironmentProbe) -> Option<BrowserName> {
        let is_ie = probe.document_mode;
        let is_edge = !is_ie && probe.style_media;

        if probe.user_agent_contains("Chrome") && !is_edge {
            Some(BrowserName::Chrome)
        } else if probe.user_agent_contains("Safari") && !is_edge {
            Some(BrowserName::Safari)
        } else if probe.user_agent_contains("Firefox") {
            Some(BrowserName::Firefox)
        } else if probe.user_agent_contains("MSIE") || is_ie {
            Some(BrowserName::Ie)
        } else if is_edge {
            Some(BrowserName::Edge)
        } else {
            None
        }
    }
}
