//! Plain-text rendering of cards, result summaries and the pagination strip.

use std::fmt::Write;

use crate::browse::{ListBrowser, ResourceFinder};
use crate::page::PageLink;
use crate::resource::{join_values, normalize_website, AssetFeature, Resource};

/// Card for one list resource: name, location, service type and website.
/// With `expanded`, the "learn more" section is included too.
pub fn resource_card(resource: &Resource, expanded: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", resource.name);
    let _ = writeln!(out, "  Location: {}", join_values(&resource.counties));
    let _ = writeln!(out, "  Service type: {}", join_values(&resource.organization_types));
    if resource.has_website() {
        let _ = writeln!(out, "  Website: {}", normalize_website(&resource.website));
    }
    if expanded {
        if !resource.description.is_empty() {
            let _ = writeln!(out, "  Description: {}", resource.description);
        }
        if !resource.populations_served.is_empty() {
            let _ = writeln!(out, "  Populations served: {}", join_values(&resource.populations_served));
        }
        if resource.has_contact() {
            let contact = match (resource.contact_name.as_str(), resource.contact_email.as_str()) {
                (name, "") => name.to_string(),
                ("", email) => email.to_string(),
                (name, email) => format!("{name} <{email}>"),
            };
            let _ = writeln!(out, "  Contact: {contact}");
        }
    }
    out
}

pub fn asset_card(asset: &AssetFeature) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", asset.name);
    for (label, value) in [
        ("Type", &asset.primary_type),
        ("Address", &asset.address),
        ("County", &asset.geography),
        ("Zip code", &asset.zip_code),
        ("Website", &asset.website),
        ("Directions", &asset.maps_link),
        ("Contact", &asset.contact_name),
        ("Email", &asset.contact_email),
        ("Phone", &asset.contact_phone),
    ] {
        if !value.trim().is_empty() {
            let _ = writeln!(out, "  {label}: {value}");
        }
    }
    if !asset.description.is_empty() {
        let _ = writeln!(out, "  {}", asset.description);
    }
    out
}

/// `"< 1 … 4 [5] 6 … 10 >"`. Empty when there is at most one page.
pub fn pagination(links: &[PageLink], current: usize) -> String {
    if links.len() <= 1 { return String::new() }
    let mut parts = vec!["<".to_string()];
    for link in links {
        parts.push(match *link {
            PageLink::Page(n) if n == current => format!("[{n}]"),
            PageLink::Page(n) => n.to_string(),
            PageLink::Gap => "…".to_string(),
        });
    }
    parts.push(">".to_string());
    parts.join(" ")
}

/// Full list view: count line, cards for the current page, pagination strip.
pub fn render_list(browser: &ListBrowser, expanded: bool) -> String {
    let mut out = format!("Showing {} resources\n\n", browser.count());
    let visible = browser.visible();
    if visible.is_empty() {
        out.push_str("No resources match the current filters.\n");
    }
    for resource in visible {
        out.push_str(&resource_card(resource, expanded));
        out.push('\n');
    }
    let strip = pagination(&browser.links(), browser.current_page());
    if !strip.is_empty() {
        let _ = writeln!(out, "{strip}");
    }
    out
}

/// Finder view: summary line, cards for the current page, pagination strip.
pub fn render_finder(finder: &ResourceFinder) -> String {
    let mut out = format!("{} ({} view)\n\n", finder.summary(), finder.mode().to_str());
    for asset in finder.visible() {
        out.push_str(&asset_card(asset));
        out.push('\n');
    }
    let strip = pagination(&finder.links(), finder.current_page());
    if !strip.is_empty() {
        let _ = writeln!(out, "{strip}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_omits_empty_website() {
        let resource = Resource { counties: vec!["Wake".into(), "Durham".into()], ..Resource::named("Library") };
        let card = resource_card(&resource, false);
        assert!(card.starts_with("Library\n"));
        assert!(card.contains("Location: Wake, Durham"));
        assert!(!card.contains("Website"));
    }

    #[test]
    fn expanded_card_shows_contact() {
        let resource = Resource {
            website: "example.org".into(),
            contact_name: "Ana".into(),
            contact_email: "ana@example.org".into(),
            ..Resource::named("Hub")
        };
        let card = resource_card(&resource, true);
        assert!(card.contains("Website: https://example.org"));
        assert!(card.contains("Contact: Ana <ana@example.org>"));
    }

    #[test]
    fn pagination_marks_current() {
        let links = [PageLink::Page(1), PageLink::Gap, PageLink::Page(4), PageLink::Page(5)];
        assert_eq!(pagination(&links, 4), "< 1 … [4] 5 >");
        assert_eq!(pagination(&[PageLink::Page(1)], 1), "");
    }
}
