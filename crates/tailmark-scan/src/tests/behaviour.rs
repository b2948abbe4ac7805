//! Behavioural tests for decoration, caching and hover.

use std::cell::RefCell;
use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tailmark_core::{DesignSystemVersion, MatchResult, Span};

use super::support::{failing_loader, fixed_loader, source_for};
use crate::{Pipeline, PipelineOptions, ReloadError};

/// State shared across BDD steps.
struct TestWorld {
    pipeline: Option<Pipeline>,
    version: DesignSystemVersion,
    text: String,
    spans: Vec<Span>,
    hover: Option<MatchResult>,
    reload_error: Option<ReloadError>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self {
            pipeline: None,
            version: DesignSystemVersion::V4,
            text: String::new(),
            spans: Vec::new(),
            hover: None,
            reload_error: None,
        }
    }
}

impl TestWorld {
    fn pipeline_mut(&mut self) -> &mut Pipeline {
        self.pipeline.as_mut().expect("design system step missing")
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes from a step argument.
fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

fn parse_spans(value: &str) -> Vec<Span> {
    strip_quotes(value)
        .split(',')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (start, end) = pair.split_once('-').expect("span as start-end");
            Span::new(
                start.parse().expect("span start"),
                end.parse().expect("span end"),
            )
        })
        .collect()
}

#[given("a {version} design system confirming {classes}")]
fn given_design_system(world: &RefCell<TestWorld>, version: String, classes: String) {
    let parsed = DesignSystemVersion::from_str(&version).expect("design system version");
    let confirmed: Vec<&str> = strip_quotes(&classes).split(',').collect();
    let mut pipeline =
        Pipeline::new(fixed_loader(&confirmed), &PipelineOptions::default()).expect("pipeline");
    pipeline.reload(&source_for(parsed)).expect("initial load");

    let mut w = world.borrow_mut();
    w.version = parsed;
    w.pipeline = Some(pipeline);
}

#[given("a design system that fails to load")]
fn given_failing_design_system(world: &RefCell<TestWorld>) {
    let pipeline =
        Pipeline::new(failing_loader(), &PipelineOptions::default()).expect("pipeline");
    world.borrow_mut().pipeline = Some(pipeline);
}

#[given("the text {text}")]
fn given_text(world: &RefCell<TestWorld>, text: String) {
    world.borrow_mut().text = strip_quotes(&text).to_owned();
}

#[when("the text is decorated")]
fn when_decorated(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let text = w.text.clone();
    w.spans = w.pipeline_mut().decorate(&text);
}

#[when("the design system is reloaded")]
fn when_reloaded(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let source = source_for(w.version);
    w.reload_error = w.pipeline_mut().reload(&source).err();
}

#[when("offset {offset} is hovered")]
fn when_hovered(world: &RefCell<TestWorld>, offset: u32) {
    let mut w = world.borrow_mut();
    let text = w.text.clone();
    w.hover = w.pipeline_mut().hover_at(&text, offset);
}

#[then("the decorated spans are {spans}")]
fn then_spans(world: &RefCell<TestWorld>, spans: String) {
    assert_eq!(world.borrow().spans, parse_spans(&spans));
}

#[then("the cache recorded {hits} hit")]
fn then_cache_hits(world: &RefCell<TestWorld>, hits: u64) {
    let mut w = world.borrow_mut();
    assert_eq!(w.pipeline_mut().cache_stats().hits, hits);
}

#[then("the text is not cached")]
fn then_not_cached(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let text = w.text.clone();
    assert!(!w.pipeline_mut().is_cached(&text));
}

#[then("the hover shows {selector}")]
fn then_hover_shows(world: &RefCell<TestWorld>, selector: String) {
    let w = world.borrow();
    let style_text = w
        .hover
        .as_ref()
        .and_then(MatchResult::style_text)
        .expect("hover with style text");
    assert!(
        style_text.starts_with(strip_quotes(&selector)),
        "unexpected hover text: {style_text}"
    );
}

#[then("there is no hover result")]
fn then_no_hover(world: &RefCell<TestWorld>) {
    assert!(world.borrow().hover.is_none());
}

#[then("the reload failed")]
fn then_reload_failed(world: &RefCell<TestWorld>) {
    assert!(world.borrow().reload_error.is_some());
}

#[scenario(
    path = "tests/features/decoration.feature",
    name = "Confirmed classes inside a string literal are decorated"
)]
fn string_literal_classes(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/decoration.feature",
    name = "Pair-list design systems decorate the same spans"
)]
fn pair_list_classes(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/decoration.feature",
    name = "Classes outside included regions are ignored"
)]
fn excluded_regions(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/decoration.feature",
    name = "Classes inside an apply statement are decorated"
)]
fn apply_statement_classes(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/decoration.feature",
    name = "Repeated text is served from the cache"
)]
fn repeated_text_cached(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/decoration.feature",
    name = "Reloading the design system clears cached results"
)]
fn reload_clears_cache(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/decoration.feature",
    name = "Hovering a decorated class shows its rule"
)]
fn hover_decorated_class(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/decoration.feature",
    name = "Hovering text that was never decorated shows nothing"
)]
fn hover_undecorated_text(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/decoration.feature",
    name = "A failed reload leaves the pipeline without a design system"
)]
fn failed_reload(world: RefCell<TestWorld>) {
    drop(world);
}
