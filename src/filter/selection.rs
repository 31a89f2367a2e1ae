use std::collections::BTreeMap;

/// A categorical filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    County,
    ZipCode,
    ServiceCategory,
    OrganizationType,
    PopulationServed,
}

impl Dimension {
    pub fn to_str(&self) -> &'static str {
        match self {
            Dimension::County => "county",
            Dimension::ZipCode => "zip_code",
            Dimension::ServiceCategory => "service_category",
            Dimension::OrganizationType => "organization_type",
            Dimension::PopulationServed => "population_served",
        }
    }

    pub fn order() -> [Dimension; 5] {
        [
            Dimension::County,
            Dimension::ZipCode,
            Dimension::ServiceCategory,
            Dimension::OrganizationType,
            Dimension::PopulationServed,
        ]
    }
}

/// Active multi-select options per dimension, plus a free-text query.
/// Options keep their insertion order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    options: BTreeMap<Dimension, Vec<String>>,
    query: String,
}

impl FilterSelection {
    pub fn new() -> Self { Self::default() }

    /// Selected options for a dimension (empty when the dimension is inactive).
    pub fn selected(&self, dim: Dimension) -> &[String] {
        self.options.get(&dim).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline] pub fn is_active(&self, dim: Dimension) -> bool { !self.selected(dim).is_empty() }

    #[inline] pub fn query(&self) -> &str { &self.query }

    /// True when no dimension is active and the query is blank.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.options.values().all(Vec::is_empty)
    }

    /// Replace the options of a dimension. Blank options are dropped.
    pub fn set<I, T>(&mut self, dim: Dimension, options: I)
    where I: IntoIterator<Item = T>, T: Into<String> {
        let options: Vec<String> = options.into_iter()
            .map(Into::into)
            .filter(|o: &String| !o.trim().is_empty())
            .collect();
        if options.is_empty() {
            self.options.remove(&dim);
        } else {
            self.options.insert(dim, options);
        }
    }

    /// Add an option if absent, remove it if present. Returns whether it is now selected.
    /// Presence ignores case and surrounding whitespace, like matching does.
    pub fn toggle(&mut self, dim: Dimension, option: &str) -> bool {
        let wanted = option.trim().to_lowercase();
        let entry = self.options.entry(dim).or_default();
        let selected = match entry.iter().position(|o| o.trim().to_lowercase() == wanted) {
            Some(pos) => { entry.remove(pos); false }
            None => { entry.push(option.to_string()); true }
        };
        if entry.is_empty() { self.options.remove(&dim); }
        selected
    }

    pub fn clear(&mut self, dim: Dimension) { self.options.remove(&dim); }

    pub fn set_query(&mut self, query: impl Into<String>) { self.query = query.into(); }

    pub fn clear_query(&mut self) { self.query.clear(); }

    /// Drop every option and the query.
    pub fn clear_all(&mut self) {
        self.options.clear();
        self.query.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut sel = FilterSelection::new();
        assert!(sel.toggle(Dimension::ServiceCategory, "Device Access"));
        assert!(sel.toggle(Dimension::ServiceCategory, "Digital Navigation"));
        assert_eq!(sel.selected(Dimension::ServiceCategory), ["Device Access", "Digital Navigation"]);
        assert!(!sel.toggle(Dimension::ServiceCategory, "Device Access"));
        assert_eq!(sel.selected(Dimension::ServiceCategory), ["Digital Navigation"]);
        assert!(!sel.toggle(Dimension::ServiceCategory, "Digital Navigation"));
        assert!(!sel.is_active(Dimension::ServiceCategory));
        assert!(sel.is_empty());
    }

    #[test]
    fn toggle_ignores_case_and_padding() {
        let mut sel = FilterSelection::new();
        assert!(sel.toggle(Dimension::ServiceCategory, "Get a device"));
        assert!(!sel.toggle(Dimension::ServiceCategory, " get a DEVICE "));
        assert!(!sel.is_active(Dimension::ServiceCategory));
    }

    #[test]
    fn set_drops_blank_options() {
        let mut sel = FilterSelection::new();
        sel.set(Dimension::County, ["Wake", " ", ""]);
        assert_eq!(sel.selected(Dimension::County), ["Wake"]);
        sel.set(Dimension::County, Vec::<String>::new());
        assert!(!sel.is_active(Dimension::County));
    }

    #[test]
    fn blank_query_is_empty_selection() {
        let mut sel = FilterSelection::new();
        sel.set_query("   ");
        assert!(sel.is_empty());
        sel.set_query("wifi");
        assert!(!sel.is_empty());
        sel.clear_all();
        assert!(sel.is_empty());
        assert_eq!(sel.query(), "");
    }
}
