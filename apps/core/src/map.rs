use serde::Serialize;

use crate::palette::{self, Rgb};
use crate::pipeline::RenderPort;

pub const MAP_TARGET: &str = "map-container";

pub const MIN_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl MapView {
    /// Metropolitan France at regional zoom.
    pub const HOME: Self = Self {
        center: GeoPoint { lat: 46.5, lng: 2.0 },
        zoom: 6,
    };

    pub fn reset(&mut self) {
        *self = Self::HOME;
    }

    pub fn pan(&mut self, dlat: f64, dlng: f64) {
        self.center.lat = (self.center.lat + dlat).clamp(-85.0, 85.0);
        self.center.lng = (self.center.lng + dlng).clamp(-180.0, 180.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    /// Longitude span in degrees; halves with every zoom level.
    pub fn span(&self) -> f64 {
        720.0 / f64::from(1_u32 << self.zoom)
    }

    /// `([lng_min, lng_max], [lat_min, lat_max])` of the visible window.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let half_lng = self.span() / 2.0;
        let half_lat = half_lng * 0.8;
        (
            [self.center.lng - half_lng, self.center.lng + half_lng],
            [self.center.lat - half_lat, self.center.lat + half_lat],
        )
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        let ([west, east], [south, north]) = self.bounds();
        (west..=east).contains(&point.lng) && (south..=north).contains(&point.lat)
    }

    /// Pan step proportional to the current span.
    pub fn step(&self) -> f64 {
        self.span() / 10.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstallationKind {
    Solar,
    Wind,
    Hydro,
}

impl InstallationKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Solar => "Solar",
            Self::Wind => "Wind",
            Self::Hydro => "Hydro",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Solar => "☀️",
            Self::Wind => "💨",
            Self::Hydro => "💧",
        }
    }

    pub const fn color(self) -> Rgb {
        match self {
            Self::Solar => palette::ORANGE,
            Self::Wind => palette::PURPLE,
            Self::Hydro => palette::CYAN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Installation {
    pub name: &'static str,
    pub kind: InstallationKind,
    pub position: GeoPoint,
    pub capacity_mw: f64,
}

impl Installation {
    pub fn popup(&self) -> String {
        format!(
            "{} {}\nType: {}\nCapacity: {} MW",
            self.kind.icon(),
            self.name,
            self.kind.label(),
            self.capacity_mw
        )
    }
}

pub const INSTALLATIONS: [Installation; 5] = [
    Installation {
        name: "Centrale Solaire Nord",
        kind: InstallationKind::Solar,
        position: GeoPoint { lat: 50.5, lng: 3.5 },
        capacity_mw: 125.5,
    },
    Installation {
        name: "Parc Éolien Est",
        kind: InstallationKind::Wind,
        position: GeoPoint { lat: 48.5, lng: 6.0 },
        capacity_mw: 234.2,
    },
    Installation {
        name: "Barrage Hydro Centre",
        kind: InstallationKind::Hydro,
        position: GeoPoint { lat: 46.0, lng: 2.5 },
        capacity_mw: 156.8,
    },
    Installation {
        name: "Parc Solaire Ouest",
        kind: InstallationKind::Solar,
        position: GeoPoint { lat: 45.0, lng: -0.5 },
        capacity_mw: 198.3,
    },
    Installation {
        name: "Éolien offshore Sud",
        kind: InstallationKind::Wind,
        position: GeoPoint { lat: 43.0, lng: 5.0 },
        capacity_mw: 287.5,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Basemap {
    DarkCoastline,
}

impl Basemap {
    pub const fn attribution(self) -> &'static str {
        match self {
            Self::DarkCoastline => "© OpenStreetMap © CartoDB",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MapControl {
    ResetView,
}

impl MapControl {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ResetView => "🔄 Reset",
        }
    }
}

/// Keyboard-driven view changes; pans move by one [`MapView::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCommand {
    North,
    South,
    East,
    West,
    ZoomIn,
    ZoomOut,
    Control(MapControl),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub label: String,
    pub position: GeoPoint,
    pub color: Rgb,
    pub radius: f64,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    pub view: MapView,
    pub home: MapView,
    pub basemap: Basemap,
    pub markers: Vec<Marker>,
    pub controls: Vec<MapControl>,
}

impl MapConfig {
    pub fn apply(&mut self, control: MapControl) {
        match control {
            MapControl::ResetView => self.view = self.home,
        }
    }

    pub fn handle(&mut self, command: MapCommand) {
        let step = self.view.step();
        match command {
            MapCommand::North => self.view.pan(step, 0.0),
            MapCommand::South => self.view.pan(-step, 0.0),
            MapCommand::East => self.view.pan(0.0, step),
            MapCommand::West => self.view.pan(0.0, -step),
            MapCommand::ZoomIn => self.view.zoom_in(),
            MapCommand::ZoomOut => self.view.zoom_out(),
            MapCommand::Control(control) => self.apply(control),
        }
    }

    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.markers
            .iter()
            .filter(|marker| self.view.contains(marker.position))
    }
}

pub fn build_map_config() -> MapConfig {
    MapConfig {
        view: MapView::HOME,
        home: MapView::HOME,
        basemap: Basemap::DarkCoastline,
        markers: INSTALLATIONS
            .iter()
            .map(|installation| Marker {
                label: installation.name.to_string(),
                position: installation.position,
                color: installation.kind.color(),
                radius: 10.0,
                popup: installation.popup(),
            })
            .collect(),
        controls: vec![MapControl::ResetView],
    }
}

/// Builds the installation map into [`MAP_TARGET`].
///
/// Each call produces a fresh view; the frontends call this once per page load.
pub fn init_map<P: RenderPort>(port: &P) -> Option<P::Handle> {
    let target = port.resolve_target(MAP_TARGET)?;
    Some(port.render_map(&target, build_map_config()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_view_shows_every_installation() {
        let config = build_map_config();
        assert_eq!(config.visible_markers().count(), INSTALLATIONS.len());
    }

    #[test]
    fn reset_control_restores_home() {
        let mut config = build_map_config();
        config.view.pan(3.0, -4.0);
        config.view.zoom_in();
        config.view.zoom_in();
        assert_ne!(config.view, MapView::HOME);

        config.apply(MapControl::ResetView);
        assert_eq!(config.view, MapView::HOME);
    }

    #[test]
    fn keyboard_pans_by_one_step() {
        let mut config = build_map_config();
        let step = config.view.step();
        config.handle(MapCommand::North);
        config.handle(MapCommand::West);
        assert!((config.view.center.lat - (46.5 + step)).abs() < 1e-9);
        assert!((config.view.center.lng - (2.0 - step)).abs() < 1e-9);

        config.handle(MapCommand::ZoomIn);
        assert_eq!(config.view.zoom, 7);
        config.handle(MapCommand::Control(MapControl::ResetView));
        assert_eq!(config.view, MapView::HOME);

        config.view.zoom_in();
        config.view.reset();
        assert_eq!(config.view, MapView::HOME);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = MapView::HOME;
        for _ in 0..20 {
            view.zoom_in();
        }
        assert_eq!(view.zoom, MAX_ZOOM);
        for _ in 0..20 {
            view.zoom_out();
        }
        assert_eq!(view.zoom, MIN_ZOOM);
    }

    #[test]
    fn popup_lists_type_and_capacity() {
        let popup = INSTALLATIONS[4].popup();
        assert!(popup.contains("Éolien offshore Sud"));
        assert!(popup.contains("Type: Wind"));
        assert!(popup.contains("Capacity: 287.5 MW"));
    }
}
