//! Relay endpoint templates.

/// A relay URL template. The percent-encoded target URL is appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub template: String,
}

impl ProxyEndpoint {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Full request URL for `target`.
    #[must_use]
    pub fn request_url(&self, target: &str) -> String {
        format!("{}{}", self.template, urlencoding::encode(target))
    }

    /// Host part of the template, for logs.
    #[must_use]
    pub fn label(&self) -> &str {
        let rest = self
            .template
            .split_once("://")
            .map_or(self.template.as_str(), |(_, rest)| rest);
        rest.split(['/', '?']).next().unwrap_or(rest)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn request_url_percent_encodes_target() {
        let endpoint = ProxyEndpoint::new("https://api.allorigins.win/get?url=");
        assert_eq!(
            endpoint.request_url("https://www.researchgate.net/profile/Brenno-Castro"),
            "https://api.allorigins.win/get?url=https%3A%2F%2Fwww.researchgate.net%2Fprofile%2FBrenno-Castro"
        );
    }

    #[test]
    fn label_is_the_host() {
        assert_eq!(
            ProxyEndpoint::new("https://corsproxy.io/?").label(),
            "corsproxy.io"
        );
        assert_eq!(
            ProxyEndpoint::new("https://cors-anywhere.herokuapp.com/").label(),
            "cors-anywhere.herokuapp.com"
        );
        assert_eq!(ProxyEndpoint::new("relay.local?u=").label(), "relay.local");
    }
}
