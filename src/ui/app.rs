use crate::config::SymbolSpec;
use crate::models::summary::Summary;
use crate::services::dashboard_service::SlotUpdate;
use crate::ui::card::CardState;
use log::{info, warn};

/// 一张卡片的数据状态
#[derive(Debug, Clone)]
pub enum Slot {
    /// 还没有数据；上次抓取失败时记下错误
    Loading { last_error: Option<String> },
    Ready { summary: Summary, state: CardState },
}

impl Slot {
    pub fn is_ready(&self) -> bool {
        matches!(self, Slot::Ready { .. })
    }
}

/// Dashboard state owned by the UI loop
pub struct App {
    pub specs: Vec<SymbolSpec>,
    pub slots: Vec<Slot>,
    pub focused: usize,
    pub generation: u64,
    pub should_quit: bool,
    pub status: Option<String>,
}

impl App {
    pub fn new(specs: Vec<SymbolSpec>) -> Self {
        let slots = specs
            .iter()
            .map(|_| Slot::Loading { last_error: None })
            .collect();

        Self {
            specs,
            slots,
            focused: 0,
            generation: 0,
            should_quit: false,
            status: None,
        }
    }

    /// 开始新一轮抓取，返回批次号；已有数据保留到新数据到达
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        for slot in &mut self.slots {
            if let Slot::Loading { last_error } = slot {
                *last_error = None;
            }
        }
        self.status = Some("Refreshing...".to_string());
        self.generation
    }

    /// 应用一次抓取结果，过期批次或越界下标直接丢弃
    pub fn apply_update(&mut self, update: SlotUpdate) -> bool {
        if update.generation != self.generation {
            info!(
                "Dropping stale update for {} (batch {}, current {})",
                update.code, update.generation, self.generation
            );
            return false;
        }

        let Some(slot) = self.slots.get_mut(update.index) else {
            warn!("Update for unknown slot {}", update.index);
            return false;
        };

        match update.result {
            Ok(summary) => {
                let state = CardState::from_summary(&summary);
                *slot = Slot::Ready { summary, state };
            }
            Err(e) => {
                // 已有数据时保留旧卡片
                if let Slot::Loading { last_error } = slot {
                    *last_error = Some(e.to_string());
                }
                self.status = Some(format!("{}: {}", update.code, e));
                return true;
            }
        }

        if self.slots.iter().all(Slot::is_ready) {
            self.status = None;
        }
        true
    }

    pub fn focus_next(&mut self) {
        if !self.slots.is_empty() {
            self.focused = (self.focused + 1) % self.slots.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.slots.is_empty() {
            self.focused = (self.focused + self.slots.len() - 1) % self.slots.len();
        }
    }

    fn focused_state(&mut self) -> Option<&mut CardState> {
        match self.slots.get_mut(self.focused) {
            Some(Slot::Ready { state, .. }) => Some(state),
            _ => None,
        }
    }

    pub fn toggle_trend(&mut self) {
        if let Some(state) = self.focused_state() {
            state.toggle_trend();
        }
    }

    pub fn advance_next_day(&mut self) {
        let result = match self.focused_state() {
            Some(state) => state.advance_next_day(),
            None => return,
        };
        if let Err(e) = result {
            warn!("Cannot advance next trading day: {}", e);
            self.status = Some(e.to_string());
        }
    }

    pub fn toggle_backlog(&mut self) {
        if let Some(state) = self.focused_state() {
            state.toggle_backlog();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BoardError;
    use crate::models::summary::tests::sample_summary;
    use crate::models::summary::SymbolKind;

    fn app() -> App {
        App::new(vec![
            SymbolSpec::new("s50z25", SymbolKind::Index),
            SymbolSpec::new("goz25", SymbolKind::Commodity),
        ])
    }

    fn ok(generation: u64, index: usize) -> SlotUpdate {
        SlotUpdate {
            generation,
            index,
            code: "goz25".to_string(),
            result: Ok(sample_summary()),
        }
    }

    fn failed(generation: u64, index: usize) -> SlotUpdate {
        SlotUpdate {
            generation,
            index,
            code: "goz25".to_string(),
            result: Err(BoardError::DataError("boom".to_string())),
        }
    }

    #[test]
    fn slots_fill_independently() {
        let mut app = app();
        let generation = app.begin_refresh();

        assert!(app.apply_update(ok(generation, 1)));
        assert!(!app.slots[0].is_ready());
        assert!(app.slots[1].is_ready());
        assert!(app.status.is_some());

        assert!(app.apply_update(ok(generation, 0)));
        assert!(app.slots.iter().all(Slot::is_ready));
        assert!(app.status.is_none());
    }

    #[test]
    fn stale_and_out_of_range_updates_are_dropped() {
        let mut app = app();
        let old = app.begin_refresh();
        let _current = app.begin_refresh();

        assert!(!app.apply_update(ok(old, 0)));
        assert!(!app.slots[0].is_ready());
        assert!(!app.apply_update(ok(app.generation, 5)));
    }

    #[test]
    fn failure_keeps_slot_loading_with_error() {
        let mut app = app();
        let generation = app.begin_refresh();

        app.apply_update(failed(generation, 0));
        match &app.slots[0] {
            Slot::Loading { last_error } => assert!(last_error.as_deref().unwrap().contains("boom")),
            other => panic!("unexpected slot {:?}", other),
        }

        // 下一轮开始时清掉旧错误
        app.begin_refresh();
        assert!(matches!(&app.slots[0], Slot::Loading { last_error: None }));
    }

    #[test]
    fn failure_after_success_keeps_old_card() {
        let mut app = app();
        let generation = app.begin_refresh();
        app.apply_update(ok(generation, 1));

        let generation = app.begin_refresh();
        app.apply_update(failed(generation, 1));
        assert!(app.slots[1].is_ready());
    }

    #[test]
    fn refetch_resets_cosmetic_state() {
        let mut app = app();
        let generation = app.begin_refresh();
        app.apply_update(ok(generation, 0));
        app.toggle_trend();
        app.toggle_backlog();

        let generation = app.begin_refresh();
        app.apply_update(ok(generation, 0));
        match &app.slots[0] {
            Slot::Ready { state, .. } => {
                assert_eq!(state.trend, "OUT");
                assert!(state.show_backlog);
            }
            other => panic!("unexpected slot {:?}", other),
        }
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut app = app();
        app.focus_prev();
        assert_eq!(app.focused, 1);
        app.focus_next();
        assert_eq!(app.focused, 0);
    }

    #[test]
    fn actions_only_touch_the_focused_card() {
        let mut app = app();
        let generation = app.begin_refresh();
        app.apply_update(ok(generation, 0));
        app.apply_update(ok(generation, 1));

        app.focus_next();
        app.toggle_trend();
        app.advance_next_day();

        let states: Vec<&CardState> = app
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Ready { state, .. } => state,
                other => panic!("unexpected slot {:?}", other),
            })
            .collect();
        assert_eq!(states[0].trend, "OUT");
        assert_eq!(states[1].trend, "In");
        assert_eq!(states[0].next_trading_day.date, "03/11/2025");
        assert_eq!(states[1].next_trading_day.date, "04/11/2025");
        assert_eq!(states[1].next_trading_day.day, "Tue");
    }

    #[test]
    fn actions_on_loading_card_are_noops() {
        let mut app = app();
        app.toggle_trend();
        app.advance_next_day();
        app.toggle_backlog();
        assert!(!app.slots[0].is_ready());
        assert!(app.status.is_none());
    }
}
