use crate::models::{LeaderboardEntry, RankTier, RankedPlayer};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Leaderboard,
    Detail,
    Loading,
}

pub struct App {
    pub current_screen: Screen,
    pub entries: Vec<LeaderboardEntry>,
    pub selected_index: usize,
    /// Only show players in this tier when set.
    pub tier_filter: Option<RankTier>,
    pub detail: Option<RankedPlayer>,
    pub error_message: Option<String>,
    pub loading_message: Option<String>,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            current_screen: Screen::Loading,
            entries: Vec::new(),
            selected_index: 0,
            tier_filter: None,
            detail: None,
            error_message: None,
            loading_message: Some("Loading leaderboard...".to_string()),
            should_quit: false,
        }
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_entries(&self) -> Vec<&LeaderboardEntry> {
        self.entries
            .iter()
            .filter(|e| self.tier_filter.map_or(true, |tier| e.tier == tier))
            .collect()
    }

    pub fn selected_entry(&self) -> Option<&LeaderboardEntry> {
        self.visible_entries().get(self.selected_index).copied()
    }

    pub fn set_entries(&mut self, entries: Vec<LeaderboardEntry>) {
        self.entries = entries;
        self.clamp_selection();
        self.current_screen = Screen::Leaderboard;
        self.loading_message = None;
        self.error_message = None;
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index < self.visible_entries().len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    /// None -> Bronze -> ... -> Legends -> None
    pub fn cycle_tier_filter(&mut self) {
        self.tier_filter = match self.tier_filter {
            None => Some(RankTier::Bronze),
            Some(tier) => tier.next(),
        };
        self.selected_index = 0;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_entries().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn set_loading(&mut self, message: &str) {
        self.current_screen = Screen::Loading;
        self.loading_message = Some(message.to_string());
        self.error_message = None;
    }

    pub fn set_error(&mut self, error: &str) {
        self.error_message = Some(error.to_string());
        self.loading_message = None;
        self.current_screen = Screen::Leaderboard;
    }

    pub fn set_detail(&mut self, player: RankedPlayer) {
        self.detail = Some(player);
        self.current_screen = Screen::Detail;
        self.loading_message = None;
        self.error_message = None;
    }

    pub fn back_to_leaderboard(&mut self) {
        self.current_screen = Screen::Leaderboard;
        self.detail = None;
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, position: u32, tier: RankTier) -> LeaderboardEntry {
        LeaderboardEntry {
            position,
            user_id: id.to_string(),
            username: id.to_string(),
            level: 1,
            score: 0.0,
            tier,
        }
    }

    #[test]
    fn test_selection_bounds() {
        let mut app = App::new();
        app.set_entries(vec![entry("a", 1, RankTier::Gold), entry("b", 2, RankTier::Bronze)]);

        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.selected_entry().map(|e| e.user_id.as_str()), Some("b"));
    }

    #[test]
    fn test_tier_filter_cycle() {
        let mut app = App::new();
        app.set_entries(vec![entry("a", 1, RankTier::Gold), entry("b", 2, RankTier::Bronze)]);

        app.cycle_tier_filter();
        assert_eq!(app.tier_filter, Some(RankTier::Bronze));
        assert_eq!(app.selected_entry().map(|e| e.user_id.as_str()), Some("b"));

        for _ in 0..RankTier::ALL.len() {
            app.cycle_tier_filter();
        }
        assert_eq!(app.tier_filter, None);
        assert_eq!(app.visible_entries().len(), 2);
    }

    #[test]
    fn test_refresh_clamps_selection() {
        let mut app = App::new();
        app.set_entries(vec![entry("a", 1, RankTier::Gold), entry("b", 2, RankTier::Gold)]);
        app.move_selection_down();

        app.set_entries(vec![entry("a", 1, RankTier::Gold)]);
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.current_screen, Screen::Leaderboard);
    }
}
