//! External links opened in the system browser.

/// Social network shown on the connect screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Social {
    Facebook,
    Github,
    YouTube,
    Twitter,
    Instagram,
    LinkedIn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub network: Social,
    pub name: &'static str,
    pub url: &'static str,
}

pub const SOCIAL_LINKS: [SocialLink; 6] = [
    SocialLink {
        network: Social::Facebook,
        name: "Facebook",
        url: "https://facebook.com/javascriptmastery",
    },
    SocialLink {
        network: Social::Github,
        name: "Github",
        url: "https://github.com/adrianhajdin",
    },
    SocialLink {
        network: Social::YouTube,
        name: "YouTube",
        url: "https://www.youtube.com/c/JavaScriptMastery",
    },
    SocialLink {
        network: Social::Twitter,
        name: "Twitter",
        url: "https://x.com/jsmasterypro",
    },
    SocialLink {
        network: Social::Instagram,
        name: "Instagram",
        url: "https://www.instagram.com/javascriptmastery/",
    },
    SocialLink {
        network: Social::LinkedIn,
        name: "LinkedIn",
        url: "https://www.linkedin.com/company/javascriptmastery/",
    },
];

/// Open `url` outside the app. Only http(s) links are handed to the OS.
pub fn open_link(url: &str) -> Result<(), String> {
    let url = url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        tracing::error!("Refusing to open link: {:?}", url);
        return Err("Failed to open the link.".to_string());
    }
    open::that(url).map_err(|e| {
        tracing::error!("Failed to open browser: {}", e);
        "Failed to open the link.".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_links_are_https() {
        assert!(SOCIAL_LINKS.iter().all(|l| l.url.starts_with("https://")));
    }

    #[test]
    fn test_rejects_non_web_links() {
        assert!(open_link("").is_err());
        assert!(open_link("javascript:alert(1)").is_err());
    }
}
