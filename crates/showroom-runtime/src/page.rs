#![forbid(unsafe_code)]

//! Page composition: one host, every widget, one declarative view.
//!
//! [`ShowroomPage`] owns the [`Host`] and the interaction widgets of the
//! marketing page. The embedding layer drives it with three calls:
//!
//! - [`ShowroomPage::handle_event`] for ambient input (scroll, resize,
//!   pointer move/leave),
//! - [`ShowroomPage::send`] for discrete user actions ([`PageMsg`]),
//! - [`ShowroomPage::advance`] and [`ShowroomPage::frame`] for timers and
//!   animation frames,
//!
//! and reads the result through [`ShowroomPage::view`]. The page never
//! renders anything.
//!
//! # Invariants
//!
//! 1. Header transitions only ever see accepted scroll samples, including
//!    trailing samples flushed by the host.
//! 2. Nav links and tilt cards only see pointer moves inside their bounds;
//!    leaving the bounds is delivered as a pointer leave.
//! 3. Magnetic buttons and tilt cards are measured at their on-screen
//!    position: every accepted scroll sample re-projects their document
//!    bounds and re-evaluates the last pointer position against them.
//! 4. Nav links only react while the header shows its full bar; collapsing
//!    the header releases them.
//! 5. After [`ShowroomPage::dispose`] the host holds zero listeners and zero
//!    timers, and further input is ignored.

use showroom_core::animation::RangeMap;
use showroom_core::animation::transform::parallax;
use showroom_core::scroll::{ScrollSample, element_visibility};
use showroom_core::{Bounds, DocumentMetrics, Event, Point};
use web_time::{Duration, Instant};

use crate::config::InteractionConfig;
use crate::effects::{CursorFollower, EffectPose, MagneticEffect, TiltEffect};
use crate::form::{ContactForm, FormSchema, FormStatus, SubmissionHook, SubmitError};
use crate::header::{HeaderController, HeaderView};
use crate::host::{Component, Host};
use crate::navigator::{
    Carousel, Categorized, Filter, FilteredCollection, NavigatorState, PositionLabel,
};
use crate::scroll_watch::ScrollWatch;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A gallery image or product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub title: String,
    pub category: String,
}

impl CatalogItem {
    #[must_use]
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
        }
    }
}

impl Categorized for CatalogItem {
    fn category(&self) -> &str {
        &self.category
    }
}

/// A layer that moves at `speed` relative to the scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    /// Bounds in document coordinates.
    pub bounds: Bounds,
    pub speed: f64,
}

/// Geometry of the page as laid out by the rendering layer.
///
/// Nav links sit in the fixed header and are in viewport coordinates.
/// Everything else (`hero`, parallax layers, magnetic buttons, tilt cards) is
/// in document coordinates.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub metrics: DocumentMetrics,
    pub initial_offset: f64,
    pub hero: Bounds,
    pub parallax: Vec<ParallaxLayer>,
    pub magnetic_buttons: Vec<Bounds>,
    pub nav_links: Vec<Bounds>,
    pub tilt_cards: Vec<Bounds>,
}

/// Content counts and catalogs.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub testimonials: usize,
    pub gallery: Vec<CatalogItem>,
    pub products: Vec<CatalogItem>,
}

/// Discrete user actions.
#[derive(Debug, Clone, PartialEq)]
pub enum PageMsg {
    ToggleHeader,
    CloseHeader,
    ToggleSubmenu,
    CloseSubmenu,
    TestimonialNext,
    TestimonialPrevious,
    TestimonialGoTo(usize),
    GalleryFilter(Filter),
    OpenLightbox(usize),
    CloseLightbox,
    LightboxNext,
    LightboxPrevious,
    ProductFilter(Filter),
    EditField { field: String, value: String },
    SubmitForm,
    ResetForm,
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Scroll-linked hero transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroView {
    pub content_y: f64,
    pub content_opacity: f64,
    pub image_scale: f64,
}

/// Gallery grid and lightbox.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView {
    pub filter: Filter,
    /// Original indices of visible items; empty means "render empty state".
    pub visible: Vec<usize>,
    /// Index within `visible` shown by the lightbox.
    pub lightbox: Option<usize>,
    pub label: Option<PositionLabel>,
}

/// Everything the rendering layer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub header: HeaderView,
    pub scroll: ScrollSample,
    pub hero: HeroView,
    pub parallax: Vec<f64>,
    pub testimonials: NavigatorState,
    pub gallery: GalleryView,
    pub products: GalleryView,
    pub magnetic: Vec<EffectPose>,
    pub nav_links: Vec<EffectPose>,
    pub tilt: Vec<EffectPose>,
    pub perspective: f64,
    pub cursor: Option<Point>,
    pub form: FormStatus,
    pub form_failure: Option<String>,
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct HeroMaps {
    content_y: RangeMap,
    content_opacity: RangeMap,
    image_scale: RangeMap,
}

impl Default for HeroMaps {
    fn default() -> Self {
        Self {
            content_y: RangeMap::new((0.0, 1.0), (0.0, 80.0)),
            content_opacity: RangeMap::new((0.0, 0.4), (1.0, 0.0)),
            image_scale: RangeMap::new((0.0, 1.0), (1.0, 1.03)),
        }
    }
}

/// The marketing page's interaction layer.
#[derive(Debug)]
pub struct ShowroomPage {
    host: Host,
    layout: PageLayout,
    scroll: ScrollWatch,
    header: HeaderController,
    testimonials: Carousel,
    gallery: FilteredCollection<CatalogItem>,
    products: FilteredCollection<CatalogItem>,
    magnetic: Vec<MagneticEffect>,
    nav_links: Vec<MagneticEffect>,
    tilt: Vec<TiltEffect>,
    perspective: f64,
    cursor: CursorFollower,
    form: ContactForm,
    hero: HeroMaps,
    parallax: Vec<RangeMap>,
    pointer: Option<Point>,
    mounted: bool,
}

impl ShowroomPage {
    /// Build every widget and mount it on a fresh host.
    #[must_use]
    pub fn new(
        config: &InteractionConfig,
        layout: PageLayout,
        content: PageContent,
        now: Instant,
    ) -> Self {
        let magnetic_config = config.magnetic.to_magnetic_config();
        let nav_config = config.nav_link.to_magnetic_config();
        let tilt_config = config.tilt.to_tilt_config();

        let mut header = HeaderController::new(config.header.to_header_config());
        header.on_scroll(layout.initial_offset);

        let mut page = Self {
            host: Host::new(),
            scroll: ScrollWatch::new(
                config.scroll.to_scroll_config(),
                layout.metrics,
                layout.initial_offset,
            ),
            header,
            testimonials: Carousel::new(content.testimonials, config.carousel.period()),
            gallery: FilteredCollection::new(content.gallery),
            products: FilteredCollection::new(content.products),
            magnetic: layout
                .magnetic_buttons
                .iter()
                .map(|b| MagneticEffect::new(*b, magnetic_config))
                .collect(),
            nav_links: layout
                .nav_links
                .iter()
                .map(|b| MagneticEffect::new(*b, nav_config))
                .collect(),
            tilt: layout
                .tilt_cards
                .iter()
                .map(|b| TiltEffect::new(*b, tilt_config))
                .collect(),
            perspective: tilt_config.perspective,
            cursor: CursorFollower::new(config.cursor.spring),
            form: ContactForm::new(FormSchema::contact(), config.form.latency()),
            hero: HeroMaps::default(),
            parallax: layout.parallax.iter().map(|l| parallax(l.speed)).collect(),
            layout,
            pointer: None,
            mounted: false,
        };
        page.project_pointer_targets();
        page.mount(now);
        page
    }

    /// Replace the form's submission hook.
    #[must_use]
    pub fn with_submission_hook(mut self, hook: impl SubmissionHook + 'static) -> Self {
        self.form.set_hook(Box::new(hook));
        self
    }

    fn mount(&mut self, now: Instant) {
        let host = &mut self.host;
        self.scroll.mount(host, now);
        self.testimonials.mount(host, now);
        self.form.mount(host, now);
        self.cursor.mount(host, now);
        for m in self.magnetic.iter_mut().chain(self.nav_links.iter_mut()) {
            m.mount(host, now);
        }
        for t in &mut self.tilt {
            t.mount(host, now);
        }
        self.mounted = true;
        tracing::debug!(
            target: "showroom.page",
            listeners = host.listeners.len(),
            timers = host.timers.len(),
            "page mounted"
        );
    }

    /// Release every listener and timer. Idempotent.
    pub fn dispose(&mut self) {
        if !self.mounted {
            return;
        }
        let host = &mut self.host;
        self.scroll.dispose(host);
        self.testimonials.dispose(host);
        self.form.dispose(host);
        self.cursor.dispose(host);
        for m in self.magnetic.iter_mut().chain(self.nav_links.iter_mut()) {
            m.dispose(host);
        }
        for t in &mut self.tilt {
            t.dispose(host);
        }
        self.mounted = false;
        tracing::debug!(
            target: "showroom.page",
            listeners = host.listeners.len(),
            timers = host.timers.len(),
            "page disposed"
        );
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[must_use]
    pub fn header(&self) -> &HeaderController {
        &self.header
    }

    #[must_use]
    pub fn scroll(&self) -> &ScrollWatch {
        &self.scroll
    }

    #[must_use]
    pub fn testimonials(&self) -> &Carousel {
        &self.testimonials
    }

    #[must_use]
    pub fn gallery(&self) -> &FilteredCollection<CatalogItem> {
        &self.gallery
    }

    #[must_use]
    pub fn products(&self) -> &FilteredCollection<CatalogItem> {
        &self.products
    }

    #[must_use]
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Route an ambient input event.
    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        if !self.mounted {
            return;
        }
        match *event {
            Event::Scroll { offset } => {
                if let Some(sample) = self.scroll.on_scroll(&mut self.host, offset, now) {
                    self.apply_scroll(sample);
                }
            }
            Event::Resize(metrics) => {
                self.layout.metrics = metrics;
                self.scroll.on_resize(metrics);
            }
            Event::PointerMove(p) => self.pointer_move(p),
            Event::PointerLeave => self.pointer_leave(),
        }
    }

    fn apply_scroll(&mut self, sample: ScrollSample) {
        self.header.on_scroll(sample.raw_offset);
        self.sync_nav_links();
        self.project_pointer_targets();
    }

    /// Place magnetic buttons and tilt cards at their on-screen position for
    /// the current scroll offset, then re-run the last pointer against them.
    fn project_pointer_targets(&mut self) {
        let dy = -self.scroll.sample().raw_offset;
        for (m, doc) in self.magnetic.iter_mut().zip(&self.layout.magnetic_buttons) {
            m.set_bounds(doc.offset_y(dy));
        }
        for (card, doc) in self.tilt.iter_mut().zip(&self.layout.tilt_cards) {
            card.set_bounds(doc.offset_y(dy));
        }
        if let Some(p) = self.pointer {
            self.pointer_targets_move(p);
        }
    }

    fn sync_nav_links(&mut self) {
        if self.header.mode().shows_full_bar() {
            return;
        }
        for link in &mut self.nav_links {
            if link.is_hovered() {
                link.on_pointer_leave();
            }
        }
    }

    fn pointer_move(&mut self, p: Point) {
        self.pointer = Some(p);
        self.cursor.on_pointer_move(p);
        if self.header.mode().shows_full_bar() {
            for link in &mut self.nav_links {
                if link.bounds().contains(p) {
                    link.on_pointer_move(p);
                } else if link.is_hovered() {
                    link.on_pointer_leave();
                }
            }
        }
        self.pointer_targets_move(p);
    }

    fn pointer_targets_move(&mut self, p: Point) {
        for m in &mut self.magnetic {
            m.on_pointer_move(p);
        }
        for card in &mut self.tilt {
            if card.bounds().contains(p) {
                card.on_pointer_move(p);
            } else if card.is_hovered() {
                card.on_pointer_leave();
            }
        }
    }

    fn pointer_leave(&mut self) {
        self.pointer = None;
        self.cursor.on_pointer_leave();
        for m in self.magnetic.iter_mut().chain(self.nav_links.iter_mut()) {
            m.on_pointer_leave();
        }
        for card in &mut self.tilt {
            card.on_pointer_leave();
        }
    }

    /// Apply a user action.
    ///
    /// Only [`PageMsg::SubmitForm`] can fail; every other action is total
    /// (invalid indices are ignored).
    pub fn send(&mut self, msg: PageMsg, now: Instant) -> Result<(), SubmitError> {
        if !self.mounted {
            return Ok(());
        }
        tracing::trace!(target: "showroom.page", msg = ?msg, "message");
        match msg {
            PageMsg::ToggleHeader => {
                self.header.toggle();
                self.sync_nav_links();
            }
            PageMsg::CloseHeader => {
                self.header.close();
                self.sync_nav_links();
            }
            PageMsg::ToggleSubmenu => {
                self.header.toggle_submenu();
            }
            PageMsg::CloseSubmenu => self.header.close_submenu(),
            PageMsg::TestimonialNext => self.testimonials.next(),
            PageMsg::TestimonialPrevious => self.testimonials.previous(),
            PageMsg::TestimonialGoTo(i) => {
                self.testimonials.go_to(i);
            }
            PageMsg::GalleryFilter(filter) => self.gallery.set_filter(filter),
            PageMsg::OpenLightbox(i) => {
                self.gallery.lightbox_mut().open(i);
            }
            PageMsg::CloseLightbox => self.gallery.lightbox_mut().close(),
            PageMsg::LightboxNext => self.gallery.lightbox_mut().next(),
            PageMsg::LightboxPrevious => self.gallery.lightbox_mut().previous(),
            PageMsg::ProductFilter(filter) => self.products.set_filter(filter),
            PageMsg::EditField { field, value } => {
                self.form.edit(&field, value);
            }
            PageMsg::SubmitForm => return self.form.submit(&mut self.host, now),
            PageMsg::ResetForm => self.form.reset(),
        }
        Ok(())
    }

    /// Fire every timer due at or before `now`. Returns how many fired.
    pub fn advance(&mut self, now: Instant) -> usize {
        let mut fired_count = 0;
        while let Some(fired) = self.host.timers.pop_due(now) {
            fired_count += 1;
            let host = &mut self.host;
            if let Some(trailing) = self.scroll.handle_timer(host, fired.id, fired.deadline) {
                if let Some(sample) = trailing {
                    self.apply_scroll(sample);
                }
            } else if !self.testimonials.on_timer(host, fired.id, fired.deadline)
                && !self.form.on_timer(host, fired.id, fired.deadline)
            {
                tracing::debug!(target: "showroom.page", timer = %fired.id, "unowned timer fired");
            }
        }
        fired_count
    }

    /// Step every spring by one animation frame.
    pub fn frame(&mut self, dt: Duration) {
        self.header.tick(dt);
        self.cursor.step(dt);
        for m in self.magnetic.iter_mut().chain(self.nav_links.iter_mut()) {
            m.step(dt);
        }
        for t in &mut self.tilt {
            t.step(dt);
        }
    }

    /// Hero section progress: 0 with the hero at the top of the viewport,
    /// 1 once it has scrolled fully out.
    fn hero_progress(&self) -> f64 {
        let hero = self.layout.hero;
        if hero.height <= 0.0 {
            return 0.0;
        }
        ((self.scroll.sample().raw_offset - hero.top) / hero.height).clamp(0.0, 1.0)
    }

    /// Declarative state for the rendering layer.
    #[must_use]
    pub fn view(&self) -> PageView {
        let scroll = self.scroll.sample();
        let hero_progress = self.hero_progress();
        let viewport_height = self.layout.metrics.viewport.height;

        PageView {
            header: self.header.view(),
            scroll,
            hero: HeroView {
                content_y: self.hero.content_y.apply(hero_progress),
                content_opacity: self.hero.content_opacity.apply(hero_progress),
                image_scale: self.hero.image_scale.apply(hero_progress),
            },
            parallax: self
                .layout
                .parallax
                .iter()
                .zip(&self.parallax)
                .map(|(layer, map)| {
                    let on_screen = layer.bounds.offset_y(-scroll.raw_offset);
                    map.apply(element_visibility(viewport_height, &on_screen))
                })
                .collect(),
            testimonials: self.testimonials.navigator().state(),
            gallery: collection_view(&self.gallery),
            products: collection_view(&self.products),
            magnetic: self.magnetic.iter().map(MagneticEffect::pose).collect(),
            nav_links: self.nav_links.iter().map(MagneticEffect::pose).collect(),
            tilt: self.tilt.iter().map(TiltEffect::pose).collect(),
            perspective: self.perspective,
            cursor: self.cursor.position(),
            form: self.form.status(),
            form_failure: self.form.last_failure().map(str::to_owned),
        }
    }
}

impl Drop for ShowroomPage {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn collection_view(c: &FilteredCollection<CatalogItem>) -> GalleryView {
    GalleryView {
        filter: c.filter().clone(),
        visible: c.visible_indices().to_vec(),
        lightbox: c.lightbox().shown(),
        label: c.lightbox().position_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_core::Viewport;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn layout() -> PageLayout {
        PageLayout {
            metrics: DocumentMetrics::new(5000.0, Viewport::new(1280.0, 800.0)),
            initial_offset: 0.0,
            hero: Bounds::new(0.0, 0.0, 1280.0, 800.0),
            parallax: vec![ParallaxLayer {
                bounds: Bounds::new(0.0, 1600.0, 1280.0, 400.0),
                speed: 0.5,
            }],
            magnetic_buttons: vec![Bounds::new(100.0, 600.0, 160.0, 48.0)],
            nav_links: vec![Bounds::new(400.0, 20.0, 80.0, 24.0)],
            tilt_cards: vec![Bounds::new(600.0, 300.0, 300.0, 400.0)],
        }
    }

    fn content() -> PageContent {
        PageContent {
            testimonials: 4,
            gallery: vec![
                CatalogItem::new("a", "living"),
                CatalogItem::new("b", "bedroom"),
            ],
            products: vec![CatalogItem::new("sofa", "living")],
        }
    }

    #[test]
    fn mount_acquires_listeners_and_carousel_timer() {
        let t0 = Instant::now();
        let page = ShowroomPage::new(&InteractionConfig::default(), layout(), content(), t0);
        // scroll, cursor, 1 magnetic, 1 nav link, 1 tilt
        assert_eq!(page.host().listeners.len(), 5);
        assert_eq!(page.host().timers.len(), 1);
    }

    #[test]
    fn dispose_leaves_host_idle_and_ignores_input() {
        let t0 = Instant::now();
        let mut page = ShowroomPage::new(&InteractionConfig::default(), layout(), content(), t0);
        page.handle_event(&Event::Scroll { offset: 300.0 }, t0);
        page.handle_event(&Event::Scroll { offset: 320.0 }, t0 + ms(1));
        page.dispose();
        assert!(page.host().is_idle());

        page.handle_event(&Event::Scroll { offset: 0.0 }, t0 + ms(500));
        assert!((page.scroll().sample().raw_offset - 300.0).abs() < 1e-9);
        page.dispose();
        assert!(page.host().is_idle());
    }

    #[test]
    fn hero_fades_over_first_forty_percent() {
        let t0 = Instant::now();
        let mut page = ShowroomPage::new(&InteractionConfig::default(), layout(), content(), t0);
        page.handle_event(&Event::Scroll { offset: 160.0 }, t0);
        let hero = page.view().hero;
        // progress 0.2
        assert!((hero.content_y - 16.0).abs() < 1e-9);
        assert!((hero.content_opacity - 0.5).abs() < 1e-9);
        assert!((hero.image_scale - 1.006).abs() < 1e-9);
    }

    #[test]
    fn parallax_tracks_layer_travel() {
        let t0 = Instant::now();
        let mut page = ShowroomPage::new(&InteractionConfig::default(), layout(), content(), t0);
        assert!((page.view().parallax[0] - 50.0).abs() < 1e-9);
        // Layer top at 1600 - 1200 = 400: travel (800 - 400) / 1200 = 1/3.
        page.handle_event(&Event::Scroll { offset: 1200.0 }, t0);
        let expected = 50.0 - 100.0 / 3.0;
        assert!((page.view().parallax[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn tilt_card_hit_test() {
        let t0 = Instant::now();
        let mut page = ShowroomPage::new(&InteractionConfig::default(), layout(), content(), t0);
        page.handle_event(&Event::PointerMove(Point::new(750.0, 500.0)), t0);
        assert!(page.tilt[0].is_hovered());
        page.handle_event(&Event::PointerMove(Point::new(10.0, 10.0)), t0);
        assert!(!page.tilt[0].is_hovered());
        assert_eq!(page.tilt[0].target(), EffectPose::NEUTRAL);
    }

    #[test]
    fn nav_links_follow_header_visibility() {
        let t0 = Instant::now();
        let mut page = ShowroomPage::new(&InteractionConfig::default(), layout(), content(), t0);
        let over_link = Point::new(440.0, 32.0);
        page.handle_event(&Event::PointerMove(over_link), t0);
        assert!(page.nav_links[0].is_hovered());

        page.handle_event(&Event::Scroll { offset: 300.0 }, t0);
        assert!(!page.nav_links[0].is_hovered());
        assert_eq!(page.nav_links[0].target(), EffectPose::NEUTRAL);

        page.handle_event(&Event::PointerMove(over_link), t0 + ms(5));
        assert!(!page.nav_links[0].is_hovered());

        page.send(PageMsg::ToggleHeader, t0 + ms(10)).unwrap();
        page.handle_event(&Event::PointerMove(over_link), t0 + ms(15));
        assert!(page.nav_links[0].is_hovered());

        page.send(PageMsg::CloseHeader, t0 + ms(20)).unwrap();
        assert!(!page.nav_links[0].is_hovered());
    }

    #[test]
    fn scrolling_moves_card_under_a_resting_pointer() {
        let t0 = Instant::now();
        let mut page = ShowroomPage::new(&InteractionConfig::default(), layout(), content(), t0);
        // Card spans y 300..700 in the document; the pointer sits above it.
        page.handle_event(&Event::PointerMove(Point::new(750.0, 250.0)), t0);
        assert!(!page.tilt[0].is_hovered());

        page.handle_event(&Event::Scroll { offset: 100.0 }, t0);
        assert_eq!(page.tilt[0].bounds().top, 200.0);
        assert!(page.tilt[0].is_hovered());

        page.handle_event(&Event::PointerLeave, t0 + ms(5));
        page.handle_event(&Event::Scroll { offset: 1000.0 }, t0 + ms(40));
        assert!(!page.tilt[0].is_hovered());
        assert_eq!(page.tilt[0].bounds().top, -700.0);
    }
}
