use super::report::EMERGENCY_HOTLINE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Report,
    Dashboard,
    NotFound,
}

impl Page {
    /// Resolve a browser path; unknown paths are logged and render the 404 page.
    pub fn from_path(path: &str) -> Self {
        let route = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        let route = match route.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match route {
            "/" => Page::Landing,
            "/report" => Page::Report,
            "/dashboard" => Page::Dashboard,
            _ => {
                tracing::warn!(path = %path, "404: route does not exist");
                Page::NotFound
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Landing | Page::NotFound => "/",
            Page::Report => "/report",
            Page::Dashboard => "/dashboard",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Landing => "Home",
            Page::Report => "Report Issue",
            Page::Dashboard => "Dashboard",
            Page::NotFound => "Page Not Found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Header navigation for the current page, ending with the emergency hotline
pub fn header_links(current: Page) -> Vec<NavLink> {
    let mut links: Vec<NavLink> = [Page::Landing, Page::Report, Page::Dashboard]
        .into_iter()
        .map(|page| NavLink {
            label: page.title(),
            href: page.path().to_string(),
            active: page == current,
        })
        .collect();

    links.push(NavLink {
        label: "Emergency",
        href: format!("tel:{}", EMERGENCY_HOTLINE),
        active: false,
    });
    links
}
