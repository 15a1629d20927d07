use std::path::PathBuf;

use crate::error::{CarThingError, Result};
use crate::model::{PlaybackState, RepeatMode};

/// Default asset directory, relative to the working directory
pub const DEFAULT_ICONS_DIR: &str = "ICONS/PNG";

/// Logical icon names used by the panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Previous,
    Play,
    Pause,
    Next,
    Like,
    Liked,
    ArrowToEnd,
    ArrowsRepeatAll,
    ArrowsRepeat1,
    Shuffle,
    NoShuffle,
}

impl Icon {
    pub const ALL: [Icon; 11] = [
        Icon::Previous,
        Icon::Play,
        Icon::Pause,
        Icon::Next,
        Icon::Like,
        Icon::Liked,
        Icon::ArrowToEnd,
        Icon::ArrowsRepeatAll,
        Icon::ArrowsRepeat1,
        Icon::Shuffle,
        Icon::NoShuffle,
    ];

    /// Asset file stem
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Previous => "previous",
            Icon::Play => "play",
            Icon::Pause => "pause",
            Icon::Next => "next",
            Icon::Like => "like",
            Icon::Liked => "liked",
            Icon::ArrowToEnd => "arrow-to-end",
            Icon::ArrowsRepeatAll => "arrows-repeat-all",
            Icon::ArrowsRepeat1 => "arrows-repeat-1",
            Icon::Shuffle => "shuffle",
            Icon::NoShuffle => "no_shuffle",
        }
    }

    /// Text rendering for terminal front-ends
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Previous => "⏮",
            Icon::Play => "▶",
            Icon::Pause => "⏸",
            Icon::Next => "⏭",
            Icon::Like => "♡",
            Icon::Liked => "♥",
            Icon::ArrowToEnd => "⇥",
            Icon::ArrowsRepeatAll => "🔁",
            Icon::ArrowsRepeat1 => "🔂",
            Icon::Shuffle => "🔀",
            Icon::NoShuffle => "➡",
        }
    }

    /// Icon shown on the repeat button while `mode` is active
    pub fn for_repeat(mode: RepeatMode) -> Self {
        match mode {
            RepeatMode::Off => Icon::ArrowToEnd,
            RepeatMode::Context => Icon::ArrowsRepeatAll,
            RepeatMode::Track => Icon::ArrowsRepeat1,
        }
    }
}

/// Resolves icon names to PNG files under a fixed directory
#[derive(Debug, Clone)]
pub struct IconSet {
    root: PathBuf,
}

impl Default for IconSet {
    fn default() -> Self {
        Self::new(DEFAULT_ICONS_DIR)
    }
}

impl IconSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self, icon: Icon) -> PathBuf {
        self.root.join(format!("{}.png", icon.name()))
    }

    /// Check that every icon resolves to an existing file
    pub fn verify(&self) -> Result<()> {
        for icon in Icon::ALL {
            let path = self.path(icon);
            if !path.is_file() {
                log::error!("Missing icon asset {:?} at {}", icon, path.display());
                return Err(CarThingError::AssetMissing(path));
            }
        }
        log::debug!("All {} icon assets found in {}", Icon::ALL.len(), self.root.display());
        Ok(())
    }
}

/// Icon assignment for every panel button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelIcons {
    pub previous: Icon,
    pub play_pause: Icon,
    pub next: Icon,
    pub like: Icon,
    pub repeat: Icon,
    pub shuffle: Icon,
}

impl PanelIcons {
    /// Pure function of the playback state
    pub fn render(state: &PlaybackState) -> Self {
        Self {
            previous: Icon::Previous,
            play_pause: if state.is_playing { Icon::Pause } else { Icon::Play },
            next: Icon::Next,
            like: if state.liked { Icon::Liked } else { Icon::Like },
            repeat: Icon::for_repeat(state.repeat_mode),
            shuffle: if state.shuffle_on { Icon::Shuffle } else { Icon::NoShuffle },
        }
    }

    /// Buttons in display order
    pub fn in_order(&self) -> [Icon; 6] {
        [
            self.previous,
            self.play_pause,
            self.next,
            self.like,
            self.repeat,
            self.shuffle,
        ]
    }
}

impl Default for PanelIcons {
    fn default() -> Self {
        Self::render(&PlaybackState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    #[test]
    fn test_icon_names_are_unique() {
        let names: HashSet<&str> = Icon::ALL.iter().map(|icon| icon.name()).collect();
        assert_eq!(names.len(), Icon::ALL.len());
    }

    #[test]
    fn test_icon_path() {
        let icons = IconSet::default();
        assert_eq!(
            icons.path(Icon::ArrowsRepeat1),
            PathBuf::from("ICONS").join("PNG").join("arrows-repeat-1.png")
        );
        assert_eq!(icons.path(Icon::Play), PathBuf::from("ICONS/PNG/play.png"));
    }

    #[test]
    fn test_verify_reports_first_missing_asset() {
        let dir = tempfile::tempdir().unwrap();
        for icon in Icon::ALL.iter().filter(|icon| **icon != Icon::Liked) {
            fs::write(dir.path().join(format!("{}.png", icon.name())), b"png").unwrap();
        }

        let icons = IconSet::new(dir.path());
        match icons.verify() {
            Err(CarThingError::AssetMissing(path)) => {
                assert_eq!(path, dir.path().join("liked.png"));
            }
            other => panic!("Expected AssetMissing, got {:?}", other),
        }

        fs::write(dir.path().join("liked.png"), b"png").unwrap();
        assert!(icons.verify().is_ok());
    }

    #[test]
    fn test_render_from_state() {
        let state = PlaybackState {
            is_playing: true,
            shuffle_on: false,
            repeat_mode: RepeatMode::Context,
            liked: true,
            ..PlaybackState::default()
        };

        let icons = PanelIcons::render(&state);

        assert_eq!(icons.play_pause, Icon::Pause);
        assert_eq!(icons.shuffle, Icon::NoShuffle);
        assert_eq!(icons.repeat, Icon::ArrowsRepeatAll);
        assert_eq!(icons.like, Icon::Liked);
        assert_eq!(icons.previous, Icon::Previous);
        assert_eq!(icons.next, Icon::Next);
    }

    #[test]
    fn test_repeat_icons_follow_table() {
        assert_eq!(Icon::for_repeat(RepeatMode::Off), Icon::ArrowToEnd);
        assert_eq!(Icon::for_repeat(RepeatMode::Context), Icon::ArrowsRepeatAll);
        assert_eq!(Icon::for_repeat(RepeatMode::Track), Icon::ArrowsRepeat1);
    }

    #[test]
    fn test_default_icons() {
        let icons = PanelIcons::default();
        assert_eq!(
            icons.in_order(),
            [
                Icon::Previous,
                Icon::Play,
                Icon::Next,
                Icon::Like,
                Icon::ArrowToEnd,
                Icon::NoShuffle
            ]
        );
    }
}
