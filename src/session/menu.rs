//! Vertical list menus

use crate::audio::{AudioSink, SoundEffect};
use crate::input::{Button, InputSnapshot};

/// Main menu rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuItem {
    PlayVsAi,
    PlayVsFriend,
    Settings,
    Exit,
}

impl MainMenuItem {
    pub const ALL: [MainMenuItem; 4] = [
        MainMenuItem::PlayVsAi,
        MainMenuItem::PlayVsFriend,
        MainMenuItem::Settings,
        MainMenuItem::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MainMenuItem::PlayVsAi => "PLAY VS AI",
            MainMenuItem::PlayVsFriend => "PLAY VS FRIEND",
            MainMenuItem::Settings => "SETTINGS",
            MainMenuItem::Exit => "EXIT",
        }
    }
}

/// Pause modal rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseItem {
    Resume,
    Restart,
    MainMenu,
}

impl PauseItem {
    pub const ALL: [PauseItem; 3] = [PauseItem::Resume, PauseItem::Restart, PauseItem::MainMenu];

    pub fn label(self) -> &'static str {
        match self {
            PauseItem::Resume => "RESUME",
            PauseItem::Restart => "RESTART",
            PauseItem::MainMenu => "MAIN MENU",
        }
    }
}

/// Selection cursor over a fixed list of items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMenu<T: Copy + 'static> {
    items: &'static [T],
    selected: usize,
}

impl<T: Copy + 'static> ListMenu<T> {
    pub fn new(items: &'static [T]) -> Self {
        Self { items, selected: 0 }
    }

    pub fn items(&self) -> &'static [T] {
        self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> T {
        self.items[self.selected]
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Up/down with wrap-around; plays the navigation sound per move
    pub fn navigate(&mut self, input: &InputSnapshot, audio: &mut dyn AudioSink) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        if input.is_pressed(Button::NavUp) || input.is_pressed(Button::P1Up) {
            audio.play_effect(SoundEffect::Navigation);
            self.selected = (self.selected + len - 1) % len;
        }
        if input.is_pressed(Button::NavDown) || input.is_pressed(Button::P1Down) {
            audio.play_effect(SoundEffect::Navigation);
            self.selected = (self.selected + 1) % len;
        }
    }
}
