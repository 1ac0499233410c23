use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{anyhow, Result};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use trellis_core::{
    scrollspy::EVENT_ACTIVATE, AppConfig, GestureEvent, NodeId, Page, PageDef, Platform,
    PointerKind, SwipeConfig,
};

/// Demo application state: a simulated page with a scrollspy-tracked
/// container and a swipe detector fed by mouse drags.
pub struct App {
    page: Page,
    container: NodeId,
    nav: NodeId,
    scroll_step: i64,
    max_scroll: i64,
    pub should_quit: bool,
    /// Links activated so far, newest last.
    activations: Rc<RefCell<Vec<NodeId>>>,
    /// Set by the swipe callbacks, consumed on the next tick: +1 jumps to
    /// the next section, -1 to the previous one.
    section_jump: Rc<Cell<i64>>,
    last_swipe: Rc<RefCell<Option<&'static str>>>,
    drag_origin: Option<f64>,
}

impl App {
    pub fn new(def: &PageDef, config: &AppConfig) -> Result<Self> {
        let mut doc = def.build();
        let container = doc
            .descendants(doc.root())
            .into_iter()
            .find(|&el| doc.data_attr(el, "spy") == Some("scroll"))
            .ok_or_else(|| anyhow!("page definition has no data-tr-spy=\"scroll\" container"))?;

        // Definitions may leave the container height to the configuration.
        if doc.node(container).height() == 0 {
            let offset = doc.node(container).offset_top();
            doc.set_layout(container, offset, config.demo.viewport_height);
        }

        let content_height: i64 = doc
            .node(container)
            .children()
            .iter()
            .map(|&child| doc.node(child).height())
            .sum();
        let max_scroll = (content_height - doc.node(container).height()).max(0);

        // Pointer platform so mouse drags can be replayed as touch pointers.
        let mut page = Page::with_platform(doc, Platform::pointer());
        page.load()?;
        let nav = page
            .spy(container)
            .map(|spy| spy.target())
            .ok_or_else(|| anyhow!("container has no scrollspy target"))?;

        let activations: Rc<RefCell<Vec<NodeId>>> = Rc::default();
        let log = Rc::clone(&activations);
        page.on(
            container,
            EVENT_ACTIVATE,
            Box::new(move |event| {
                if let Some(link) = event.related_target {
                    debug!(?link, "demo link activated");
                    log.borrow_mut().push(link);
                }
            }),
        );

        let section_jump = Rc::new(Cell::new(0));
        let last_swipe: Rc<RefCell<Option<&'static str>>> = Rc::default();
        let (jump_l, jump_r) = (Rc::clone(&section_jump), Rc::clone(&section_jump));
        let (swipe_l, swipe_r) = (Rc::clone(&last_swipe), Rc::clone(&last_swipe));
        page.attach_swipe(
            container,
            SwipeConfig::default()
                .on_left(move || {
                    jump_l.set(1);
                    *swipe_l.borrow_mut() = Some("left");
                })
                .on_right(move || {
                    jump_r.set(-1);
                    *swipe_r.borrow_mut() = Some("right");
                }),
        );

        let mut app = Self {
            page,
            container,
            nav,
            scroll_step: config.demo.scroll_step,
            max_scroll,
            should_quit: false,
            activations,
            section_jump,
            last_swipe,
            drag_origin: None,
        };
        // Initial visibility batch.
        app.scroll_to(0);
        Ok(app)
    }

    pub fn document(&self) -> &trellis_core::Document {
        self.page.document()
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn scroll_top(&self) -> i64 {
        self.document().node(self.container).scroll_top()
    }

    pub fn max_scroll(&self) -> i64 {
        self.max_scroll
    }

    pub fn viewport_height(&self) -> i64 {
        self.document().node(self.container).height()
    }

    pub fn last_swipe(&self) -> Option<&'static str> {
        *self.last_swipe.borrow()
    }

    pub fn activation_count(&self) -> usize {
        self.activations.borrow().len()
    }

    /// Id of the currently active link, if any.
    pub fn active_link(&self) -> Option<String> {
        let spy = self.page.spy(self.container)?;
        let link = spy.active_target()?;
        self.document().node(link).id().map(str::to_string)
    }

    /// `(link id, is active)` for every tracked link, in document order.
    pub fn nav_links(&self) -> Vec<(String, bool)> {
        let Some(spy) = self.page.spy(self.container) else {
            return Vec::new();
        };
        let doc = self.document();
        spy.target_links()
            .iter()
            .map(|&link| {
                let label = doc
                    .node(link)
                    .fragment()
                    .unwrap_or_default()
                    .to_string();
                (label, spy.active_target() == Some(link))
            })
            .collect()
    }

    /// `(section id, offset, height)` for every observed section.
    pub fn sections(&self) -> Vec<(String, i64, i64)> {
        let Some(spy) = self.page.spy(self.container) else {
            return Vec::new();
        };
        let doc = self.document();
        spy.observable_sections()
            .iter()
            .map(|&section| {
                let node = doc.node(section);
                (
                    node.id().unwrap_or_default().to_string(),
                    node.offset_top(),
                    node.height(),
                )
            })
            .collect()
    }

    pub fn scroll_to(&mut self, scroll_top: i64) {
        let clamped = scroll_top.clamp(0, self.max_scroll);
        self.page.scroll_to(self.container, clamped);
    }

    pub fn scroll_by(&mut self, delta: i64) {
        self.scroll_to(self.scroll_top() + delta);
    }

    pub fn scroll_step(&self) -> i64 {
        self.scroll_step
    }

    pub fn half_page(&self) -> i64 {
        (self.viewport_height() / 2).max(1)
    }

    pub fn jump_to_bottom(&mut self) {
        self.scroll_to(self.max_scroll);
    }

    /// Scroll to the first section starting below the current position.
    pub fn next_section(&mut self) {
        let current = self.scroll_top();
        if let Some((_, offset, _)) = self
            .sections()
            .into_iter()
            .find(|&(_, offset, _)| offset > current)
        {
            self.scroll_to(offset);
        }
    }

    /// Scroll to the last section starting above the current position.
    pub fn prev_section(&mut self) {
        let current = self.scroll_top();
        if let Some((_, offset, _)) = self
            .sections()
            .into_iter()
            .rev()
            .find(|&(_, offset, _)| offset < current)
        {
            self.scroll_to(offset);
        }
    }

    /// Re-derive tracked links and sections, e.g. after markup changes.
    pub fn refresh(&mut self) {
        self.page.refresh_spy(self.container);
    }

    /// Translate mouse drags on the content pane into pointer gestures.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let x = f64::from(mouse.column);
                self.drag_origin = Some(x);
                self.page.gesture(
                    self.container,
                    GestureEvent::PointerDown {
                        x,
                        kind: PointerKind::Touch,
                    },
                );
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.drag_origin.take().is_some() {
                    self.page.gesture(
                        self.container,
                        GestureEvent::PointerUp {
                            x: f64::from(mouse.column),
                            kind: PointerKind::Touch,
                        },
                    );
                    self.apply_section_jump();
                }
            }
            _ => {}
        }
    }

    /// Consume a pending swipe-triggered section jump.
    pub fn apply_section_jump(&mut self) {
        match self.section_jump.replace(0) {
            jump if jump > 0 => {
                debug!("swipe left, jumping to next section");
                self.next_section();
            }
            jump if jump < 0 => {
                debug!("swipe right, jumping to previous section");
                self.prev_section();
            }
            _ => {}
        }
    }

    pub fn nav_element(&self) -> NodeId {
        self.nav
    }
}
