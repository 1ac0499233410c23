use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use trellis_core::{
    swipe::SWIPE_THRESHOLD, Document, GestureEvent, Platform, Swipe, SwipeConfig,
};

/// Classify a series of gestures, one per displacement, and print what
/// each one resolves to.
pub fn run(deltas: &[f64]) -> Result<()> {
    let mut doc = Document::new();
    let element = doc.create_element("div");

    let outcome: Rc<RefCell<Option<&'static str>>> = Rc::default();
    let (left, right) = (Rc::clone(&outcome), Rc::clone(&outcome));
    let config = SwipeConfig::default()
        .on_left(move || *left.borrow_mut() = Some("swipe left"))
        .on_right(move || *right.borrow_mut() = Some("swipe right"));
    let mut swipe = Swipe::new(element, &Platform::touch(), config);

    println!("threshold: |dx| > {SWIPE_THRESHOLD}");
    for &delta in deltas {
        swipe.handle(GestureEvent::TouchStart { touches: vec![0.0] });
        swipe.handle(GestureEvent::TouchMove {
            touches: vec![delta],
        });
        swipe.handle(GestureEvent::TouchEnd);
        let label = outcome.borrow_mut().take().unwrap_or("no swipe");
        println!("dx {delta:>8.1}  {label}");
    }

    Ok(())
}
