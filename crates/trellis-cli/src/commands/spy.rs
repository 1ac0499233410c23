use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::{anyhow, Result};

use trellis_core::{scrollspy::EVENT_ACTIVATE, AppConfig, NodeId, Page};

/// Replay a sequence of scroll offsets against a page and print each
/// activation the scrollspy reports.
pub fn run(page: Option<&Path>, scroll: &[i64], config: &AppConfig) -> Result<()> {
    let def = super::load_page(page)?;
    let mut doc = def.build();
    let container = doc
        .descendants(doc.root())
        .into_iter()
        .find(|&el| doc.data_attr(el, "spy") == Some("scroll"))
        .ok_or_else(|| anyhow!("page definition has no data-tr-spy=\"scroll\" container"))?;

    if doc.node(container).height() == 0 {
        let offset = doc.node(container).offset_top();
        doc.set_layout(container, offset, config.demo.viewport_height);
    }

    let mut page = Page::new(doc);
    page.load()?;

    let activations: Rc<RefCell<Vec<NodeId>>> = Rc::default();
    let log = Rc::clone(&activations);
    page.on(
        container,
        EVENT_ACTIVATE,
        Box::new(move |event| {
            if let Some(link) = event.related_target {
                log.borrow_mut().push(link);
            }
        }),
    );

    // The initial observation batch is delivered at scroll position 0.
    page.scroll_to(container, 0);
    report(&page, &activations, 0);
    for &offset in scroll {
        page.scroll_to(container, offset);
        report(&page, &activations, offset);
    }

    Ok(())
}

fn report(page: &Page, activations: &Rc<RefCell<Vec<NodeId>>>, offset: i64) {
    let doc = page.document();
    for link in activations.borrow_mut().drain(..) {
        let id = doc.node(link).id().unwrap_or("<anonymous>");
        println!("scroll {offset:>6}  activate #{id}");
    }
}
