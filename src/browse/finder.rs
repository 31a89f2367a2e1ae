use anyhow::{anyhow, bail, Result};

use crate::filter::{filter, sort_by_name, Dimension, FilterSelection, FuzzyMatcher};
use crate::map::{marker_collection, Geography, GeographyKind, Key, KeyboardNav, MapCommand, MapEvent, MapSync, NavAction, RegionIndex, Viewport};
use crate::page::{PageLink, PageState};
use crate::resource::AssetFeature;

/// Region name used in the summary when no geography is selected.
pub const DEFAULT_REGION_NAME: &str = "North Carolina";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Map,
    List,
}

impl ViewMode {
    pub fn to_str(&self) -> &'static str {
        match self {
            ViewMode::Map => "map",
            ViewMode::List => "list",
        }
    }
}

/// Map view over asset features: geography, type and query filters, one optional selected asset,
/// paging, and the map viewport kept in step with all of them.
///
/// Every operation returns the map commands the caller has to run on its map engine.
#[derive(Debug, Clone)]
pub struct ResourceFinder {
    assets: Vec<AssetFeature>,
    regions: RegionIndex,
    selection: FilterSelection,
    geography: Option<Geography>,
    selected: Option<usize>,
    page: PageState,
    matcher: FuzzyMatcher,
    sync: MapSync,
    nav: KeyboardNav,
    mode: ViewMode,
}

impl ResourceFinder {
    pub fn new(assets: Vec<AssetFeature>, regions: RegionIndex) -> Self {
        Self {
            assets,
            regions,
            selection: FilterSelection::new(),
            geography: None,
            selected: None,
            page: PageState::default(),
            matcher: FuzzyMatcher::default(),
            sync: MapSync::new(),
            nav: KeyboardNav::new(),
            mode: ViewMode::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page = PageState::new(page_size);
        self
    }

    #[inline] pub fn assets(&self) -> &[AssetFeature] { &self.assets }

    #[inline] pub fn regions(&self) -> &RegionIndex { &self.regions }

    #[inline] pub fn selection(&self) -> &FilterSelection { &self.selection }

    #[inline] pub fn geography(&self) -> Option<&Geography> { self.geography.as_ref() }

    #[inline] pub fn selected_asset(&self) -> Option<&AssetFeature> { self.selected.map(|i| &self.assets[i]) }

    #[inline] pub fn viewport(&self) -> &Viewport { self.sync.viewport() }

    #[inline] pub fn keyboard(&self) -> &KeyboardNav { &self.nav }

    #[inline] pub fn mode(&self) -> ViewMode { self.mode }

    #[inline] pub fn current_page(&self) -> usize { self.page.current() }

    /// Initial map state: whole-region bounds and every marker.
    pub fn init(&mut self) -> Vec<MapCommand> {
        let mut commands = self.sync.apply(MapEvent::Reset);
        commands.extend(self.refresh_markers());
        commands
    }

    /// Assets passing the current selection. Sorted by name, or by relevance while a query is set.
    pub fn filtered(&self) -> Vec<&AssetFeature> {
        let mut results = filter(&self.assets, &self.selection, &self.matcher);
        if self.selection.query().trim().is_empty() {
            sort_by_name(&mut results);
        }
        results
    }

    #[inline] pub fn count(&self) -> usize { self.filtered().len() }

    /// Page count. A selected asset collapses paging to a single page.
    pub fn total_pages(&self) -> usize {
        if self.selected.is_some() { 1 } else { self.page.total_pages(self.count()) }
    }

    /// Assets on the current page, or only the selected asset.
    pub fn visible(&self) -> Vec<&AssetFeature> {
        match self.selected_asset() {
            Some(asset) => vec![asset],
            None => self.page.slice(&self.filtered()).to_vec(),
        }
    }

    pub fn links(&self) -> Vec<PageLink> {
        if self.selected.is_some() { return Vec::new() }
        self.page.links(self.count())
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> Vec<MapCommand> {
        self.deselect_asset();
        self.selection.set_query(query);
        self.page.reset();
        self.refresh_markers()
    }

    /// Toggle one service type. Returns the commands and whether the type is now selected.
    pub fn toggle_type(&mut self, option: &str) -> (Vec<MapCommand>, bool) {
        self.deselect_asset();
        let on = self.selection.toggle(Dimension::ServiceCategory, option);
        self.page.reset();
        (self.refresh_markers(), on)
    }

    /// Bound everything to one county or zip code.
    pub fn select_geography(&mut self, geography: Geography) -> Vec<MapCommand> {
        self.selected = None;
        self.selection.clear(Dimension::County);
        self.selection.clear(Dimension::ZipCode);
        let dim = match geography.kind {
            GeographyKind::County => Dimension::County,
            GeographyKind::ZipCode => Dimension::ZipCode,
        };
        self.selection.set(dim, [geography.value.clone()]);
        self.page.reset();
        self.geography = Some(geography.clone());

        let bounds = self.regions.bounds(&geography);
        let mut commands = self.refresh_markers();
        commands.extend(self.sync.apply(MapEvent::RegionSelected { geography, bounds }));
        commands
    }

    /// Select a geography by user-typed name. Known names resolve through the region index.
    pub fn select_geography_named(&mut self, name: &str) -> Vec<MapCommand> {
        let geography = self.regions.find(name).cloned().unwrap_or_else(|| Geography::parse(name));
        self.select_geography(geography)
    }

    pub fn clear_geography(&mut self) -> Vec<MapCommand> {
        self.selected = None;
        self.clear_region_filter();
        self.page.reset();
        let mut commands = self.refresh_markers();
        commands.extend(self.sync.apply(MapEvent::RegionCleared));
        commands
    }

    /// Center on one asset. Only Point features passing the current filters can be selected.
    pub fn select_asset(&mut self, id: &str) -> Result<Vec<MapCommand>> {
        let index = self.assets.iter().position(|a| a.id == id)
            .ok_or_else(|| anyhow!("Unknown asset: {id}"))?;
        if !self.filtered().iter().any(|a| a.id == id) {
            bail!("Asset {id} is excluded by the current filters");
        }
        let Some(center) = self.assets[index].point() else {
            bail!("Asset {id} has no point geometry");
        };
        self.selected = Some(index);
        Ok(self.sync.apply(MapEvent::AssetSelected { id: id.to_string(), center }))
    }

    /// Deselect the asset. Also drops the geography.
    pub fn clear_asset(&mut self) -> Vec<MapCommand> {
        self.selected = None;
        self.clear_region_filter();
        self.page.reset();
        let mut commands = self.refresh_markers();
        commands.extend(self.sync.apply(MapEvent::AssetCleared));
        commands
    }

    /// Ignored while an asset is selected.
    pub fn go_to_page(&mut self, page: usize) {
        if self.selected.is_some() { return }
        let count = self.count();
        self.page.go_to(page, count);
    }

    pub fn focus_map(&mut self) { self.nav.focus() }

    /// Keyboard navigation over the region list.
    pub fn map_key(&mut self, key: Key) -> Vec<MapCommand> {
        let geographies = self.regions.geographies();
        match self.nav.key(key, geographies.len()) {
            Some(NavAction::Moved(i)) => {
                vec![MapCommand::Announce(format!("Focused on {}", geographies[i].display_name()))]
            }
            Some(NavAction::Commit(i)) => {
                let geography = geographies[i].clone();
                self.select_geography(geography)
            }
            Some(NavAction::Exit) => self.sync.apply(MapEvent::Reset),
            None => Vec::new(),
        }
    }

    /// Global escape: clear filters, query, geography and asset. Ignored while a modal is open.
    pub fn escape(&mut self, modal_open: bool) -> Vec<MapCommand> {
        if modal_open {
            tracing::debug!("escape ignored, modal open");
            return Vec::new();
        }
        self.reset_state();
        let mut commands = self.refresh_markers();
        commands.extend(self.sync.apply(MapEvent::Reset));
        commands
    }

    /// Switch between map and list. Resets like escape; the viewport is only re-fit when showing the map.
    pub fn toggle_view(&mut self, mode: ViewMode) -> Vec<MapCommand> {
        self.mode = mode;
        self.reset_state();
        let mut commands = self.refresh_markers();
        let reset = self.sync.apply(MapEvent::Reset);
        if mode == ViewMode::Map {
            commands.extend(reset);
        }
        commands
    }

    /// One-line description of what is shown.
    pub fn summary(&self) -> String {
        if let Some(asset) = self.selected_asset() {
            return format!("Showing {}", asset.name);
        }
        let region = self.geography.as_ref()
            .map(Geography::display_name)
            .unwrap_or_else(|| DEFAULT_REGION_NAME.to_string());
        let mut summary = format!("Showing {} results for {region}", self.count());
        let types = self.selection.selected(Dimension::ServiceCategory);
        if !types.is_empty() {
            summary.push_str(&format!(" that help you {}", types.join(", ")));
        }
        summary
    }

    fn refresh_markers(&mut self) -> Vec<MapCommand> {
        let markers = marker_collection(self.filtered());
        self.sync.apply(MapEvent::MarkersChanged(markers))
    }

    /// Drop the selected asset without moving the map.
    fn deselect_asset(&mut self) {
        if self.selected.take().is_none() { return }
        let geography = self.geography.clone();
        let bounds = geography.as_ref().and_then(|g| self.regions.bounds(g));
        self.sync.apply(MapEvent::AssetDeselected { geography, bounds });
    }

    fn clear_region_filter(&mut self) {
        self.geography = None;
        self.selection.clear(Dimension::County);
        self.selection.clear(Dimension::ZipCode);
    }

    fn reset_state(&mut self) {
        self.selection.clear_all();
        self.geography = None;
        self.selected = None;
        self.page.reset();
    }
}

#[cfg(test)]
mod tests {
    use geo::{coord, Point, Rect};

    use super::*;
    use crate::map::default_bounds;
    use crate::resource::FeatureGeometry;

    fn asset(id: &str, name: &str, county: &str, types: &str) -> AssetFeature {
        AssetFeature {
            geography: county.into(),
            primary_type: types.into(),
            ..AssetFeature::new(id, name, FeatureGeometry::Point(Point::new(-78.6, 35.8)))
        }
    }

    fn finder() -> ResourceFinder {
        let mut regions = RegionIndex::new();
        regions.insert(Geography::county("Wake"), Rect::new(coord! { x: -79.0, y: 35.5 }, coord! { x: -78.3, y: 36.1 }));
        regions.insert(Geography::county("Durham"), Rect::new(coord! { x: -79.1, y: 35.8 }, coord! { x: -78.7, y: 36.3 }));
        let mut polygon = asset("p", "Parcel", "Wake", "");
        polygon.geometry = FeatureGeometry::Other("Polygon".into());
        let assets = vec![
            asset("a", "Wake Library", "Wake", "Get online, Learn skills"),
            asset("b", "Durham Hub", "Durham", "Get a device"),
            asset("c", "Cary Center", "Wake", "Get a device"),
            polygon,
        ];
        ResourceFinder::new(assets, regions)
    }

    fn fit_default() -> MapCommand {
        MapCommand::FitBounds { bounds: default_bounds(), padding: 20 }
    }

    #[test]
    fn init_fits_default_and_sets_markers() {
        let mut f = finder();
        let cmds = f.init();
        assert_eq!(cmds[0], fit_default());
        let MapCommand::SetMarkers(markers) = &cmds[1] else { panic!("expected markers") };
        assert_eq!(markers["features"].as_array().unwrap().len(), 3);
        assert_eq!(f.count(), 4);
    }

    #[test]
    fn selecting_county_filters_and_fits() {
        let mut f = finder();
        let cmds = f.select_geography(Geography::county("Wake"));
        assert!(matches!(cmds.last(), Some(MapCommand::FitBounds { padding: 20, .. })));
        assert_eq!(f.count(), 3);
        assert_eq!(f.summary(), "Showing 3 results for Wake County");
    }

    #[test]
    fn types_appear_in_summary() {
        let mut f = finder();
        let (_, on) = f.toggle_type("Get a device");
        assert!(on);
        assert_eq!(f.summary(), "Showing 2 results for North Carolina that help you Get a device");
    }

    #[test]
    fn selected_asset_collapses_paging() {
        let mut f = finder().with_page_size(1);
        assert_eq!(f.total_pages(), 4);
        let cmds = f.select_asset("c").unwrap();
        assert_eq!(cmds, vec![MapCommand::FlyTo { center: Point::new(-78.6, 35.8), zoom: 14.0 }]);
        assert_eq!(f.total_pages(), 1);
        assert_eq!(f.visible().len(), 1);
        assert_eq!(f.summary(), "Showing Cary Center");

        f.go_to_page(3);
        assert_eq!(f.current_page(), 1);
    }

    #[test]
    fn filter_change_drops_asset_without_moving_map() {
        let mut f = finder();
        f.select_asset("a").unwrap();
        let cmds = f.set_query("library");
        assert!(cmds.iter().all(|c| matches!(c, MapCommand::SetMarkers(_))));
        assert!(f.selected_asset().is_none());
        assert!(f.viewport().asset().is_none());
        assert!(f.viewport().is_default());

        f.select_geography(Geography::county("Wake"));
        f.select_asset("a").unwrap();
        f.toggle_type("Get a device");
        assert!(f.viewport().asset().is_none());
        assert_eq!(f.viewport().geography(), Some(&Geography::county("Wake")));
    }

    #[test]
    fn filter_changes_reset_page() {
        let mut f = finder().with_page_size(1);
        f.go_to_page(3);
        assert_eq!(f.current_page(), 3);
        f.set_query("");
        assert_eq!(f.current_page(), 1);

        f.go_to_page(3);
        f.toggle_type("Get a device");
        assert_eq!(f.current_page(), 1);
        f.toggle_type("Get a device");

        f.go_to_page(3);
        f.select_geography(Geography::county("Wake"));
        assert_eq!(f.current_page(), 1);

        f.go_to_page(3);
        assert_eq!(f.current_page(), 3);
        f.clear_geography();
        assert_eq!(f.current_page(), 1);
    }

    #[test]
    fn filtered_out_asset_cannot_be_selected() {
        let mut f = finder();
        f.select_geography(Geography::county("Wake"));
        assert!(f.select_asset("b").is_err());
        assert!(f.selected_asset().is_none());
        assert_eq!(f.count(), 3);
    }

    #[test]
    fn polygon_cannot_be_selected() {
        let mut f = finder();
        assert!(f.select_asset("p").is_err());
        assert!(f.select_asset("zzz").is_err());
        assert!(f.selected_asset().is_none());
    }

    #[test]
    fn clear_asset_drops_geography() {
        let mut f = finder();
        f.select_geography(Geography::county("Wake"));
        f.select_asset("a").unwrap();
        let cmds = f.clear_asset();
        assert_eq!(cmds.last(), Some(&fit_default()));
        assert!(f.geography().is_none());
        assert!(f.viewport().is_default());
        assert_eq!(f.count(), 4);
    }

    #[test]
    fn keyboard_commit_selects_region() {
        let mut f = finder();
        assert!(f.map_key(Key::Right).is_empty());
        f.focus_map();
        assert_eq!(f.map_key(Key::Right), vec![MapCommand::Announce("Focused on Durham County".into())]);
        assert_eq!(f.map_key(Key::Right), vec![MapCommand::Announce("Focused on Wake County".into())]);
        assert_eq!(f.map_key(Key::Right), vec![MapCommand::Announce("Focused on Durham County".into())]);
        f.map_key(Key::Enter);
        assert_eq!(f.geography(), Some(&Geography::county("Durham")));
        assert_eq!(f.map_key(Key::Escape), vec![fit_default()]);
        assert!(!f.keyboard().is_focused());
    }

    #[test]
    fn escape_respects_modal() {
        let mut f = finder();
        f.set_query("library");
        assert!(f.escape(true).is_empty());
        assert_eq!(f.selection().query(), "library");
        let cmds = f.escape(false);
        assert_eq!(cmds.last(), Some(&fit_default()));
        assert!(f.selection().is_empty());
    }

    #[test]
    fn list_toggle_does_not_move_map() {
        let mut f = finder();
        f.select_geography(Geography::county("Wake"));
        let cmds = f.toggle_view(ViewMode::List);
        assert!(cmds.iter().all(|c| matches!(c, MapCommand::SetMarkers(_))));
        assert_eq!(f.mode(), ViewMode::List);
        assert!(f.geography().is_none());
        assert!(f.viewport().is_default());

        let cmds = f.toggle_view(ViewMode::Map);
        assert_eq!(cmds.last(), Some(&fit_default()));
    }
}
