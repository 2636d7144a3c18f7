//! Page Layout
//!
//! Focusable elements of the reading surface: skip link, main content,
//! one open button per visible article, and the reading-mode modal.

use amp_a11y::{ElementId, ElementRegistry, ModalTargets, TabIndex};

pub const SKIP_LINK: ElementId = ElementId(1);
pub const MAIN_CONTENT: ElementId = ElementId(2);
pub const SEARCH_FIELD: ElementId = ElementId(3);
pub const MODAL: ElementId = ElementId(10);
pub const MODAL_SPEAK: ElementId = ElementId(11);
pub const MODAL_CLOSE: ElementId = ElementId(12);

const ARTICLE_BASE: u64 = 1000;

pub const TARGETS: ModalTargets = ModalTargets {
    surface: MODAL,
    close_control: MODAL_CLOSE,
    main_content: MAIN_CONTENT,
};

/// Open button of the article card at `index`
pub fn article_button(index: usize) -> ElementId {
    ElementId(ARTICLE_BASE + index as u64)
}

/// Page skeleton with `articles` cards
pub fn build_page(articles: usize) -> ElementRegistry {
    let mut page = ElementRegistry::new();
    page.insert(SKIP_LINK, None, TabIndex::Sequential(0));
    page.insert(SEARCH_FIELD, None, TabIndex::Sequential(0));
    page.insert(MAIN_CONTENT, None, TabIndex::Programmatic);
    page.insert(MODAL, None, TabIndex::NotFocusable);
    page.insert(MODAL_SPEAK, Some(MODAL), TabIndex::Sequential(0));
    page.insert(MODAL_CLOSE, Some(MODAL), TabIndex::Sequential(0));
    sync_articles(&mut page, 0, articles);
    page
}

/// Replace `previous` article cards with `current` ones
pub fn sync_articles(page: &mut ElementRegistry, previous: usize, current: usize) {
    for index in 0..previous {
        page.remove(article_button(index));
    }
    for index in 0..current {
        page.insert(article_button(index), Some(MAIN_CONTENT), TabIndex::Sequential(0));
    }
}
