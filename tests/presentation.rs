use std::sync::{Arc, Mutex};

use presenter::{
    PresentationState, PresenterSession,
    command::Command,
    document::{BLOCK_ID_ATTRIBUTE, BlockList, CONTENT_REGION_CLASS, ContentNode, ContentTree},
    host::PageHost,
    sections::SectionBoundaries,
    state::STATE_KEY,
    store::{KeyValueStore, memory::MemoryStore},
    visibility::BlockUpdate,
};

struct RecordingPage {
    root: Mutex<ContentNode>,
    visible: Mutex<Vec<String>>,
}

impl RecordingPage {
    fn new(root: ContentNode) -> Arc<Self> {
        Arc::new(Self {
            root: Mutex::new(root),
            visible: Mutex::default(),
        })
    }

    fn visible(&self) -> Vec<String> {
        self.visible.lock().unwrap().clone()
    }
}

impl PageHost for RecordingPage {
    fn content(&self) -> ContentNode {
        self.root.lock().unwrap().clone()
    }

    fn apply_updates(&self, updates: Vec<BlockUpdate>) {
        *self.visible.lock().unwrap() = updates
            .into_iter()
            .filter(|u| u.visible)
            .map(|u| u.block_id)
            .collect();
    }

    fn click_toggle(&self, _block_id: String) -> bool {
        false
    }

    fn set_chrome_hidden(&self, _hidden: bool) {}
}

fn text_block(id: &str, text: &str) -> ContentNode {
    ContentNode::element("div")
        .with_attribute(BLOCK_ID_ATTRIBUTE, id)
        .with_child(ContentNode::element("span").with_child(ContentNode::text(text)))
}

fn empty_block(id: &str) -> ContentNode {
    ContentNode::element("div")
        .with_attribute(BLOCK_ID_ATTRIBUTE, id)
        .with_child(ContentNode::text(" "))
}

/// `[text, empty, text, text, empty, empty, text]`
fn slides() -> ContentNode {
    ContentNode::element("html").with_child(
        ContentNode::element("main").with_child(
            ContentNode::element("div")
                .with_class(CONTENT_REGION_CLASS)
                .with_children([
                    text_block("title", "Quarterly review"),
                    empty_block("gap1"),
                    text_block("revenue", "Revenue up"),
                    text_block("costs", "Costs flat"),
                    empty_block("gap2"),
                    empty_block("gap3"),
                    text_block("questions", "Questions?"),
                ]),
        ),
    )
}

#[test]
fn section_boundaries_from_page() {
    let root = slides();
    let blocks = BlockList::collect(&ContentTree::new(&root)).unwrap();
    let boundaries = SectionBoundaries::from_empty_flags(blocks.empty_flags());

    assert_eq!(boundaries.as_slice(), &[0, 2, 6]);
}

#[test]
fn stepping_through_a_talk() {
    let page = RecordingPage::new(slides());
    let store = Arc::new(MemoryStore::new());
    let mut session = PresenterSession::new("talk", page.clone(), store.clone());
    session.activate();
    assert_eq!(page.visible().len(), 7);

    session.dispatch(Command::Reset).unwrap();
    assert!(page.visible().is_empty());

    session.dispatch(Command::RevealNext).unwrap();
    assert_eq!(page.visible(), vec!["title"]);

    // the empty spacer is skipped
    session.dispatch(Command::RevealNext).unwrap();
    assert_eq!(session.state().visible_count, 3);
    assert_eq!(page.visible(), vec!["title", "gap1", "revenue"]);

    session.dispatch(Command::HideLast).unwrap();
    assert_eq!(session.state().visible_count, 1);

    for _ in 0..10 {
        session.dispatch(Command::RevealNext).unwrap();
    }
    assert_eq!(session.state().visible_count, 7);
}

#[test]
fn section_mode_presents_one_section_at_a_time() {
    let page = RecordingPage::new(slides());
    let store = Arc::new(MemoryStore::new());
    let mut session = PresenterSession::new("talk", page.clone(), store);
    session.activate();
    session.set_section_mode(true).unwrap();
    session.dispatch(Command::Reset).unwrap();

    session.dispatch(Command::RevealNext).unwrap();
    assert_eq!(page.visible(), vec!["title"]);

    session.dispatch(Command::RevealNext).unwrap();
    assert_eq!(page.visible(), vec!["revenue"]);

    session.dispatch(Command::RevealNext).unwrap();
    assert_eq!(page.visible(), vec!["revenue", "costs"]);

    session.dispatch(Command::RevealNext).unwrap();
    assert_eq!(page.visible(), vec!["questions"]);
}

#[test]
fn progress_survives_a_reload_of_the_same_page() {
    let store = Arc::new(MemoryStore::new());
    {
        let page = RecordingPage::new(slides());
        let mut session = PresenterSession::new("talk", page, store.clone());
        session.activate();
        session.dispatch(Command::Reset).unwrap();
        session.dispatch(Command::RevealNext).unwrap();
        session.dispatch(Command::RevealNext).unwrap();
    }

    let page = RecordingPage::new(slides());
    let mut session = PresenterSession::new("talk", page.clone(), store.clone());
    session.activate();
    assert_eq!(page.visible(), vec!["title", "gap1", "revenue"]);

    let other = PresenterSession::new("another-talk", page, store);
    assert_eq!(other.state(), &PresentationState::new("another-talk"));
}

#[test]
fn corrupt_state_falls_back_to_defaults() {
    let store = Arc::new(MemoryStore::new());
    store.set(
        STATE_KEY.into(),
        "{\"pageId\": \"talk\", \"visibleCount\": \"lots\"}".into(),
    );

    let page = RecordingPage::new(slides());
    let session = PresenterSession::new("talk", page, store);

    assert_eq!(session.state().visible_count, 0);
    assert!(session.state().showing_all);
}
