//! Render rule: which blocks are visible for a presentation state
//!
//! | mode        | block `i` visible iff                                    |
//! |-------------|----------------------------------------------------------|
//! | show all    | always                                                   |
//! | section     | `section_start(current) <= i <= current`, `i` non-empty  |
//! | focus       | `current - focus_mode_count < i <= current`              |
//! | linear      | `i < visible_count`                                      |
//!
//! where `current = visible_count - 1`; with nothing revealed, only "show
//! all" shows anything. The fade effects attached to each update are hints
//! for the host and never change the visible flag.

use crate::{
    document::BlockList, preferences::Preferences, sections::SectionBoundaries,
    state::PresentationState,
};

/// Transition the host should play when applying an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum Effect {
    Instant,
    FadeIn { duration_ms: u32 },
    FadeOut { duration_ms: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct BlockUpdate {
    pub block_id: String,
    pub visible: bool,
    pub effect: Effect,
}

impl BlockUpdate {
    #[must_use]
    pub fn instant(block_id: impl Into<String>, visible: bool) -> Self {
        Self {
            block_id: block_id.into(),
            visible,
            effect: Effect::Instant,
        }
    }
}

/// Fade durations; zero means no fade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fades {
    pub fade_in_ms: u32,
    pub fade_out_ms: u32,
}

impl Fades {
    pub const NONE: Self = Self {
        fade_in_ms: 0,
        fade_out_ms: 0,
    };

    const fn fade_in(self) -> Effect {
        if self.fade_in_ms == 0 {
            Effect::Instant
        } else {
            Effect::FadeIn {
                duration_ms: self.fade_in_ms,
            }
        }
    }

    const fn fade_out(self) -> Effect {
        if self.fade_out_ms == 0 {
            Effect::Instant
        } else {
            Effect::FadeOut {
                duration_ms: self.fade_out_ms,
            }
        }
    }
}

impl From<&Preferences> for Fades {
    fn from(preferences: &Preferences) -> Self {
        Self {
            fade_in_ms: preferences.fade_in_ms(),
            fade_out_ms: preferences.fade_out_ms(),
        }
    }
}

/// Which rule decides visibility. Show-all wins over section mode, which
/// wins over focus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    ShowAll,
    Section,
    Focus { window: usize },
    Linear,
}

impl ViewMode {
    #[must_use]
    pub fn of(state: &PresentationState) -> Self {
        if state.showing_all {
            Self::ShowAll
        } else if state.section_mode {
            Self::Section
        } else if state.focus_mode {
            Self::Focus {
                window: state.focus_mode_count.max(1) as usize,
            }
        } else {
            Self::Linear
        }
    }
}

/// Range of blocks shown for one reveal progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    All,
    Nothing,
    Span {
        start: usize,
        end: usize,
        skip_empty: bool,
    },
}

impl Window {
    fn new(mode: ViewMode, visible_count: usize, sections: Option<&SectionBoundaries>) -> Self {
        if mode == ViewMode::ShowAll {
            return Self::All;
        }
        let Some(current) = visible_count.checked_sub(1) else {
            return Self::Nothing;
        };
        let (start, skip_empty) = match mode {
            ViewMode::ShowAll | ViewMode::Linear => (0, false),
            ViewMode::Section => (sections.map_or(0, |s| s.section_start(current)), true),
            ViewMode::Focus { window } => ((current + 1).saturating_sub(window), false),
        };
        Self::Span {
            start,
            end: current,
            skip_empty,
        }
    }

    fn contains(self, index: usize, blocks: &BlockList) -> bool {
        match self {
            Self::All => true,
            Self::Nothing => false,
            Self::Span {
                start,
                end,
                skip_empty,
            } => start <= index && index <= end && !(skip_empty && blocks.is_empty_at(index)),
        }
    }
}

/// Whether block `index` is visible in `state`
#[must_use]
pub fn is_visible(state: &PresentationState, blocks: &BlockList, index: usize) -> bool {
    let mode = ViewMode::of(state);
    let sections = section_boundaries(mode, blocks);
    Window::new(mode, state.visible_count(), sections.as_ref()).contains(index, blocks)
}

fn section_boundaries(mode: ViewMode, blocks: &BlockList) -> Option<SectionBoundaries> {
    (mode == ViewMode::Section).then(|| SectionBoundaries::from_empty_flags(blocks.empty_flags()))
}

/// Compute the update for every block.
///
/// `previous_count` is the visible count before a reveal or hide; it only
/// selects which blocks get a fade.
#[must_use]
pub fn plan_updates(
    state: &PresentationState,
    blocks: &BlockList,
    previous_count: Option<usize>,
    fades: Fades,
) -> Vec<BlockUpdate> {
    let mode = ViewMode::of(state);
    let sections = section_boundaries(mode, blocks);
    let count = state.visible_count();
    let current = Window::new(mode, count, sections.as_ref());
    let previous = previous_count.map(|prev| Window::new(mode, prev, sections.as_ref()));
    let revealing = previous_count.is_some_and(|prev| count > prev);
    let hiding = previous_count.is_some_and(|prev| count < prev);

    blocks
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let visible = current.contains(index, blocks);
            let was_visible = previous.is_some_and(|window| window.contains(index, blocks));
            let animate = if visible {
                revealing && enters(mode, index, count, current, previous)
            } else {
                match mode {
                    ViewMode::ShowAll => false,
                    ViewMode::Linear => hiding && index == count,
                    ViewMode::Focus { .. } => hiding && was_visible,
                    ViewMode::Section => was_visible,
                }
            };
            let effect = match (animate, visible) {
                (false, _) => Effect::Instant,
                (true, true) => fades.fade_in(),
                (true, false) => fades.fade_out(),
            };
            BlockUpdate {
                block_id: block.id.clone(),
                visible,
                effect,
            }
        })
        .collect()
}

fn enters(
    mode: ViewMode,
    index: usize,
    count: usize,
    current: Window,
    previous: Option<Window>,
) -> bool {
    match mode {
        ViewMode::ShowAll => false,
        ViewMode::Linear | ViewMode::Focus { .. } => index + 1 == count,
        ViewMode::Section => match (current, previous) {
            (
                Window::Span { start, .. },
                Some(Window::Span {
                    start: prev_start,
                    end: prev_end,
                    ..
                }),
            ) => index > prev_end || start != prev_start,
            (_, Some(Window::All)) => false,
            _ => true,
        },
    }
}

/// Updates that make every block visible again, used on teardown
#[must_use]
pub fn reveal_all(blocks: &BlockList) -> Vec<BlockUpdate> {
    blocks
        .blocks()
        .iter()
        .map(|block| BlockUpdate::instant(block.id.clone(), true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, BlockSource};

    struct FakeBlocks(Vec<bool>);

    impl BlockSource for FakeBlocks {
        fn list_blocks(&self) -> Option<Vec<Block>> {
            Some(
                (0..self.0.len())
                    .map(|index| Block {
                        id: format!("b{index}"),
                        index,
                    })
                    .collect(),
            )
        }

        fn is_empty(&self, block: &Block) -> bool {
            self.0[block.index]
        }
    }

    fn blocks(empty: &[bool]) -> BlockList {
        BlockList::collect(&FakeBlocks(empty.to_vec())).unwrap()
    }

    fn state(visible_count: u32) -> PresentationState {
        PresentationState {
            visible_count,
            showing_all: false,
            ..PresentationState::new("page")
        }
    }

    fn visible(state: &PresentationState, list: &BlockList) -> Vec<usize> {
        (0..list.len())
            .filter(|&i| is_visible(state, list, i))
            .collect()
    }

    const FADES: Fades = Fades {
        fade_in_ms: 300,
        fade_out_ms: 300,
    };

    #[test]
    fn linear_shows_prefix() {
        let list = blocks(&[false; 5]);
        assert_eq!(visible(&state(0), &list), Vec::<usize>::new());
        assert_eq!(visible(&state(3), &list), vec![0, 1, 2]);
    }

    #[test]
    fn showing_all_shows_everything() {
        let list = blocks(&[false, true, false]);
        let mut s = state(0);
        s.showing_all = true;
        s.section_mode = true;
        assert_eq!(visible(&s, &list), vec![0, 1, 2]);
    }

    #[test]
    fn focus_window() {
        let list = blocks(&[false; 8]);
        let mut s = state(5);
        s.set_focus_mode(true, Some(2));
        assert_eq!(visible(&s, &list), vec![3, 4]);

        s.visible_count = 1;
        assert_eq!(visible(&s, &list), vec![0]);

        s.visible_count = 0;
        assert!(visible(&s, &list).is_empty());
    }

    #[test]
    fn section_mode_shows_current_section_without_empty_blocks() {
        let list = blocks(&[false, true, false, false, true, true, false]);
        let mut s = state(4);
        s.set_section_mode(true);
        assert_eq!(visible(&s, &list), vec![2, 3]);

        s.visible_count = 2;
        assert_eq!(visible(&s, &list), vec![0]);

        s.visible_count = 7;
        assert_eq!(visible(&s, &list), vec![6]);

        s.visible_count = 0;
        assert!(visible(&s, &list).is_empty());
    }

    #[test]
    fn plan_without_previous_count_is_instant() {
        let list = blocks(&[false; 3]);
        let updates = plan_updates(&state(2), &list, None, FADES);

        assert_eq!(
            updates,
            vec![
                BlockUpdate::instant("b0", true),
                BlockUpdate::instant("b1", true),
                BlockUpdate::instant("b2", false),
            ]
        );
    }

    #[test]
    fn linear_reveal_fades_in_last_block_only() {
        let list = blocks(&[false; 4]);
        let updates = plan_updates(&state(2), &list, Some(1), FADES);

        assert_eq!(updates[0].effect, Effect::Instant);
        assert_eq!(updates[1].effect, Effect::FadeIn { duration_ms: 300 });
        assert_eq!(updates[2].effect, Effect::Instant);
    }

    #[test]
    fn linear_hide_fades_out_boundary_block() {
        let list = blocks(&[false; 4]);
        let updates = plan_updates(&state(1), &list, Some(2), FADES);

        assert!(!updates[1].visible);
        assert_eq!(updates[1].effect, Effect::FadeOut { duration_ms: 300 });
        assert_eq!(updates[2].effect, Effect::Instant);
    }

    #[test]
    fn zero_duration_fades_are_instant() {
        let list = blocks(&[false; 4]);
        let updates = plan_updates(&state(2), &list, Some(1), Fades::NONE);
        assert!(updates.iter().all(|u| u.effect == Effect::Instant));
    }

    #[test]
    fn focus_hide_fades_out_blocks_leaving_the_window() {
        let list = blocks(&[false; 6]);
        let mut s = state(3);
        s.set_focus_mode(true, Some(2));

        let updates = plan_updates(&s, &list, Some(4), FADES);
        let fading: Vec<_> = updates
            .iter()
            .filter(|u| matches!(u.effect, Effect::FadeOut { .. }))
            .map(|u| u.block_id.as_str())
            .collect();
        assert_eq!(fading, vec!["b3"]);
        assert_eq!(visible(&s, &list), vec![1, 2]);
    }

    #[test]
    fn focus_reveal_fades_in_newest_block() {
        let list = blocks(&[false; 6]);
        let mut s = state(4);
        s.set_focus_mode(true, Some(2));

        let updates = plan_updates(&s, &list, Some(3), FADES);
        assert_eq!(updates[3].effect, Effect::FadeIn { duration_ms: 300 });
        assert_eq!(updates[2].effect, Effect::Instant);
        assert_eq!(updates[1].effect, Effect::Instant);
        assert!(!updates[1].visible);
    }

    #[test]
    fn section_crossing_swaps_whole_section() {
        let list = blocks(&[false, false, true, false, false]);
        let mut s = state(4);
        s.set_section_mode(true);

        let updates = plan_updates(&s, &list, Some(2), FADES);

        assert_eq!(updates[0].effect, Effect::FadeOut { duration_ms: 300 });
        assert_eq!(updates[1].effect, Effect::FadeOut { duration_ms: 300 });
        assert_eq!(updates[2].effect, Effect::Instant);
        assert_eq!(updates[3].effect, Effect::FadeIn { duration_ms: 300 });
        assert!(updates[3].visible);
        assert!(!updates[4].visible);
    }

    #[test]
    fn section_reveal_within_section_fades_new_block_only() {
        let list = blocks(&[false, false, false]);
        let mut s = state(2);
        s.set_section_mode(true);

        let updates = plan_updates(&s, &list, Some(1), FADES);
        assert_eq!(updates[0].effect, Effect::Instant);
        assert_eq!(updates[1].effect, Effect::FadeIn { duration_ms: 300 });
    }

    #[test]
    fn section_hide_fades_out_in_either_direction() {
        let list = blocks(&[false, false, true, false]);
        let mut s = state(0);
        s.set_section_mode(true);

        let updates = plan_updates(&s, &list, Some(1), FADES);
        assert_eq!(updates[0].effect, Effect::FadeOut { duration_ms: 300 });
        assert!(updates.iter().all(|u| !u.visible));
    }

    #[test]
    fn reveal_all_is_instant_and_visible() {
        let list = blocks(&[false, true]);
        assert_eq!(
            reveal_all(&list),
            vec![BlockUpdate::instant("b0", true), BlockUpdate::instant("b1", true)]
        );
    }

    #[test]
    fn fades_follow_preferences() {
        let mut preferences = Preferences::default();
        preferences.set_animation_speed(8);
        assert_eq!(
            Fades::from(&preferences),
            Fades {
                fade_in_ms: 800,
                fade_out_ms: 500,
            }
        );
    }
}
