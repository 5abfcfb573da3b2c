//! A frontend's registry of render targets and what was rendered into them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::chart::ChartConfig;
use crate::map::MapConfig;
use crate::pipeline::{RenderPort, RenderTarget};

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Chart(ChartConfig),
    Map(MapConfig),
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    targets: Vec<String>,
    panels: HashMap<String, Panel>,
}

impl Board {
    /// Board with `targets` registered in layout order.
    pub fn with_targets<'a>(targets: impl IntoIterator<Item = &'a str>) -> Self {
        let mut board = Self::default();
        for target in targets {
            board.register(target);
        }
        board
    }

    pub fn register(&mut self, id: &str) {
        if !self.targets.iter().any(|target| target == id) {
            self.targets.push(id.to_string());
        }
    }

    pub fn resolve(&self, id: &str) -> Option<RenderTarget> {
        self.targets
            .iter()
            .position(|target| target == id)
            .map(|slot| RenderTarget {
                id: id.to_string(),
                slot,
            })
    }

    pub fn place(&mut self, target: &RenderTarget, panel: Panel) -> usize {
        self.panels.insert(target.id.clone(), panel);
        target.slot
    }

    pub fn chart(&self, id: &str) -> Option<&ChartConfig> {
        match self.panels.get(id) {
            Some(Panel::Chart(config)) => Some(config),
            _ => None,
        }
    }

    pub fn map(&self, id: &str) -> Option<&MapConfig> {
        match self.panels.get(id) {
            Some(Panel::Map(config)) => Some(config),
            _ => None,
        }
    }

    pub fn map_mut(&mut self, id: &str) -> Option<&mut MapConfig> {
        match self.panels.get_mut(id) {
            Some(Panel::Map(config)) => Some(config),
            _ => None,
        }
    }

    pub fn rendered(&self) -> usize {
        self.panels.len()
    }

    /// Drops every chart; the map keeps its view across refreshes.
    pub fn clear_charts(&mut self) {
        self.panels
            .retain(|_, panel| matches!(panel, Panel::Map(_)));
    }
}

impl RenderPort for RefCell<Board> {
    type Handle = usize;

    fn resolve_target(&self, id: &str) -> Option<RenderTarget> {
        self.borrow().resolve(id)
    }

    fn render_chart(&self, target: &RenderTarget, config: ChartConfig) -> usize {
        self.borrow_mut().place(target, Panel::Chart(config))
    }

    fn render_map(&self, target: &RenderTarget, config: MapConfig) -> usize {
        self.borrow_mut().place(target, Panel::Map(config))
    }
}

impl RenderPort for Mutex<Board> {
    type Handle = usize;

    fn resolve_target(&self, id: &str) -> Option<RenderTarget> {
        self.lock().unwrap_or_else(PoisonError::into_inner).resolve(id)
    }

    fn render_chart(&self, target: &RenderTarget, config: ChartConfig) -> usize {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .place(target, Panel::Chart(config))
    }

    fn render_map(&self, target: &RenderTarget, config: MapConfig) -> usize {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .place(target, Panel::Map(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartKind, Page};
    use crate::map::{init_map, MAP_TARGET};

    #[test]
    fn registration_is_idempotent() {
        let mut board = Board::with_targets(["a", "b"]);
        board.register("a");
        assert_eq!(board.resolve("b").map(|target| target.slot), Some(1));
        assert!(board.resolve("c").is_none());
    }

    #[test]
    fn refresh_keeps_the_map() {
        let board = RefCell::new(Board::with_targets(Page::all_targets()));
        let target = board.resolve_target("growthChart");
        assert!(target.is_some());
        if let Some(target) = target {
            board.render_chart(&target, ChartConfig::new(ChartKind::Bar, "growth"));
        }
        assert!(init_map(&board).is_some());
        assert_eq!(board.borrow().rendered(), 2);

        board.borrow_mut().clear_charts();
        assert!(board.borrow().chart("growthChart").is_none());
        assert!(board.borrow().map(MAP_TARGET).is_some());
    }

    #[test]
    fn mutex_board_renders_too() {
        let board = Mutex::new(Board::with_targets([MAP_TARGET]));
        assert_eq!(init_map(&board), Some(0));
    }
}
