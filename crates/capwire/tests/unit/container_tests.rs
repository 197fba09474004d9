//! Tests for the resolution container
//!
//! Covers memoization with call counters, cache sharing across the
//! blocking and suspension-capable paths, rejection of async factories on
//! the blocking path and per-container cache independence.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use futures::future::LocalBoxFuture;

use capwire::{Capability, Container, Descriptor, Error, Factory, Registry, SharedInstance};

enum Widgets {}
impl Capability for Widgets {}

enum Fuel {}
impl Capability for Fuel {}

enum Engine {}
impl Capability for Engine {}

#[derive(Debug)]
struct Widget;

#[derive(Debug)]
struct EngineImpl {
    fuel: Arc<String>,
}

fn counting_sync(calls: &Rc<Cell<usize>>) -> Factory {
    let calls = Rc::clone(calls);
    Factory::sync(move |_container: &Container| {
        calls.set(calls.get() + 1);
        Arc::new(Widget)
    })
}

fn counting_async(calls: &Rc<Cell<usize>>) -> Factory {
    let calls = Rc::clone(calls);
    Factory::async_fn(move |_container: &Container| {
        let calls = Rc::clone(&calls);
        let fut: LocalBoxFuture<'_, SharedInstance> = Box::pin(async move {
            calls.set(calls.get() + 1);
            Arc::new(Widget) as SharedInstance
        });
        fut
    })
}

fn fuel_factory(_container: &Container) -> SharedInstance {
    Arc::new(String::from("diesel"))
}

fn engine_factory(container: &Container) -> SharedInstance {
    let fuel = container
        .find(Descriptor::of::<Fuel>())
        .unwrap()
        .downcast::<String>()
        .unwrap();
    Arc::new(EngineImpl { fuel })
}

fn engine_factory_async(container: &Container) -> LocalBoxFuture<'_, SharedInstance> {
    Box::pin(async move {
        let fuel = container
            .async_find(Descriptor::of::<Fuel>())
            .await
            .unwrap()
            .downcast::<String>()
            .unwrap();
        Arc::new(EngineImpl { fuel }) as SharedInstance
    })
}

#[test]
fn find_memoizes_the_first_resolution() {
    let registry = Registry::new();
    let calls = Rc::new(Cell::new(0));
    registry
        .register_factory(counting_sync(&calls), Descriptor::of::<Widgets>())
        .unwrap();

    let container = registry.create_container();
    let first = container.find(Descriptor::of::<Widgets>()).unwrap();
    let second = container.find(Descriptor::of::<Widgets>()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn async_find_memoizes_the_first_resolution() {
    let registry = Registry::new();
    let calls = Rc::new(Cell::new(0));
    registry
        .register_factory(counting_async(&calls), Descriptor::of::<Widgets>())
        .unwrap();

    let container = registry.create_container();
    let first = container.async_find(Descriptor::of::<Widgets>()).await.unwrap();
    let second = container.async_find(Descriptor::of::<Widgets>()).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn the_two_paths_share_one_cache_entry() {
    let registry = Registry::new();
    let calls = Rc::new(Cell::new(0));
    registry
        .register_factory(counting_sync(&calls), Descriptor::of::<Widgets>())
        .unwrap();

    let container = registry.create_container();
    let blocking = container.find(Descriptor::of::<Widgets>()).unwrap();
    let suspending = container.async_find(Descriptor::of::<Widgets>()).await.unwrap();

    assert!(Arc::ptr_eq(&blocking, &suspending));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn async_find_handles_sync_factories_without_suspension() {
    let registry = Registry::new();
    let calls = Rc::new(Cell::new(0));
    registry
        .register_factory(counting_sync(&calls), Descriptor::of::<Widgets>())
        .unwrap();

    let container = registry.create_container();
    let first = container.async_find(Descriptor::of::<Widgets>()).await.unwrap();
    let second = container.find(Descriptor::of::<Widgets>()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn find_rejects_async_factories_without_invoking_or_caching() {
    let registry = Registry::new();
    let calls = Rc::new(Cell::new(0));
    registry
        .register_factory(counting_async(&calls), Descriptor::of::<Widgets>())
        .unwrap();

    let container = registry.create_container();
    let err = container.find(Descriptor::of::<Widgets>()).unwrap_err();
    assert_eq!(err, Error::does_not_support_awaitable(Descriptor::of::<Widgets>()));
    assert_eq!(calls.get(), 0);

    // The failed blocking attempt left nothing behind; the suspending
    // path still resolves and caches normally.
    let resolved = container.async_find(Descriptor::of::<Widgets>()).await.unwrap();
    let again = container.async_find(Descriptor::of::<Widgets>()).await.unwrap();
    assert!(Arc::ptr_eq(&resolved, &again));
    assert_eq!(calls.get(), 1);
}

#[test]
fn containers_from_one_registry_cache_independently() {
    let registry = Registry::new();
    let calls = Rc::new(Cell::new(0));
    registry
        .register_factory(counting_sync(&calls), Descriptor::of::<Widgets>())
        .unwrap();

    let one = registry.create_container();
    let two = registry.create_container();
    let from_one = one.find(Descriptor::of::<Widgets>()).unwrap();
    let from_two = two.find(Descriptor::of::<Widgets>()).unwrap();

    assert!(!Arc::ptr_eq(&from_one, &from_two));
    assert_eq!(calls.get(), 2);
}

#[test]
fn singleton_factories_resolve_to_the_wrapped_instance() {
    let registry = Registry::new();
    let widget = Arc::new(Widget);
    registry
        .register_instance(widget.clone(), Descriptor::of::<Widgets>())
        .unwrap();

    let container = registry.create_container();
    let found = container
        .find(Descriptor::of::<Widgets>())
        .unwrap()
        .downcast::<Widget>()
        .unwrap();
    assert!(Arc::ptr_eq(&found, &widget));
}

#[test]
fn find_propagates_missing_keys_unchanged() {
    let registry = Registry::new();
    let container = registry.create_container();
    let err = container.find(Descriptor::of::<Widgets>()).unwrap_err();
    assert_eq!(err, Error::does_not_registered(Descriptor::of::<Widgets>()));
}

#[tokio::test]
async fn async_find_propagates_missing_keys_unchanged() {
    let registry = Registry::new();
    let container = registry.create_container();
    let err = container.async_find("primary").await.unwrap_err();
    assert_eq!(err, Error::does_not_registered("primary"));
}

#[test]
fn anonymous_keys_resolve_like_any_other() {
    let registry = Registry::new();
    let calls = Rc::new(Cell::new(0));
    registry.register_factory(counting_sync(&calls), ()).unwrap();

    let container = registry.create_container();
    let first = container.find(()).unwrap();
    let second = container.find(()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 1);
}

#[test]
fn factories_resolve_their_dependencies_through_the_container() {
    let registry = Registry::new();
    registry
        .register_factory(Factory::sync(fuel_factory), Descriptor::of::<Fuel>())
        .unwrap();
    registry
        .register_factory(Factory::sync(engine_factory), Descriptor::of::<Engine>())
        .unwrap();

    let container = registry.create_container();
    let engine = container
        .find(Descriptor::of::<Engine>())
        .unwrap()
        .downcast::<EngineImpl>()
        .unwrap();
    assert_eq!(*engine.fuel, "diesel");

    // The dependency went through the same cache.
    let fuel = container
        .find(Descriptor::of::<Fuel>())
        .unwrap()
        .downcast::<String>()
        .unwrap();
    assert!(Arc::ptr_eq(&fuel, &engine.fuel));
}

#[tokio::test]
async fn async_factories_resolve_their_dependencies_through_the_container() {
    let registry = Registry::new();
    registry
        .register_factory(Factory::sync(fuel_factory), Descriptor::of::<Fuel>())
        .unwrap();
    registry
        .register_factory(Factory::async_fn(engine_factory_async), Descriptor::of::<Engine>())
        .unwrap();

    let container = registry.create_container();
    let engine = container
        .async_find(Descriptor::of::<Engine>())
        .await
        .unwrap()
        .downcast::<EngineImpl>()
        .unwrap();
    assert_eq!(*engine.fuel, "diesel");
}

#[test]
fn resolving_a_value_registration_matches_the_registered_value() {
    let registry = Registry::new();
    let calls = Rc::new(Cell::new(0));
    let factory = {
        let calls = Rc::clone(&calls);
        Factory::sync(move |_container: &Container| {
            calls.set(calls.get() + 1);
            Arc::new(42_u32)
        })
    };
    registry
        .register_factory(factory, Descriptor::of::<Widgets>())
        .unwrap();

    let container = registry.create_container();
    let first = container
        .find(Descriptor::of::<Widgets>())
        .unwrap()
        .downcast::<u32>()
        .unwrap();
    assert_eq!(*first, 42);

    let second = container
        .find(Descriptor::of::<Widgets>())
        .unwrap()
        .downcast::<u32>()
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 1);
}
