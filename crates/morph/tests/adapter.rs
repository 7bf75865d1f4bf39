use morph::{Adapt, AdaptExt, Adapter, AdapterConfig, Defaults, Locator, WeakLocator};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, morph::Object)]
struct Resource {
    #[allow(dead_code)]
    id: u32,
}

#[derive(Debug, Clone, morph::Model)]
struct Foo {
    a: String,
    b: String,
    c: i32,
    #[morph(rename = "Ref")]
    resource: Arc<Resource>,
}

#[morph::view]
trait Bar {
    fn a(&self) -> String;
    fn b(&self) -> String;
    fn c(&self) -> i32;

    #[morph(rename = "Ref")]
    fn resource(&self) -> Arc<Resource>;
}

fn foo(resource: &Arc<Resource>) -> Arc<Foo> {
    Arc::new(Foo {
        a: "x".to_string(),
        b: "y".to_string(),
        c: 1,
        resource: resource.clone(),
    })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    (calls.clone(), calls)
}

// ---------------------------------------------------------------------------
// Convention-based adapters
// ---------------------------------------------------------------------------

#[test]
fn default_adapter_reads_every_member() {
    let resource = Arc::new(Resource { id: 7 });
    let adapter = Adapter::<Foo, dyn Bar>::default();

    let bar = adapter.create(foo(&resource)).unwrap();

    assert_eq!(bar.a(), "x");
    assert_eq!(bar.b(), "y");
    assert_eq!(bar.c(), 1);
    assert!(Arc::ptr_eq(&bar.resource(), &resource));
}

#[test]
fn create_many_adapts_each_source() {
    let resource = Arc::new(Resource { id: 1 });
    let adapter = Adapter::<Foo, dyn Bar>::default();

    let bars = adapter
        .create_many([foo(&resource), foo(&resource)])
        .unwrap();

    assert_eq!(bars.len(), 2);
    assert!(bars.iter().all(|bar| bar.a() == "x"));
}

#[test]
fn members_are_evaluated_on_each_read() {
    let (calls, counted) = counter();

    let adapter = Adapter::<Foo, dyn Bar>::new(move |config: &mut AdapterConfig<Foo>| {
        let counted = counted.clone();
        config.member("c").from(move |foo: &Foo| {
            counted.fetch_add(1, Ordering::SeqCst);
            foo.c * 10
        });
    });

    let bar = adapter.create(foo(&Arc::new(Resource { id: 0 }))).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(bar.c(), 10);
    assert_eq!(bar.c(), 10);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // Reading other members does not run the binding
    bar.a();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[morph::view]
trait Summary {
    fn a(&self) -> String;
    fn missing(&self) -> String;
    fn fallible(&self) -> morph::Result<i32>;
}

#[test]
fn unbound_view_members_fail_validation() {
    let adapter = Adapter::<Foo, dyn Summary>::default();

    let err = adapter.validate().unwrap_err();
    assert!(err.is_invalid_configuration());
    assert_eq!(
        err.diagnostics().unwrap(),
        [
            "mapping for 'Summary.missing' from 'Foo' not provided",
            "mapping for 'Summary.fallible' from 'Foo' not provided",
        ]
    );

    let again = adapter.create(foo(&Arc::new(Resource { id: 0 }))).err().unwrap();
    assert!(again.ptr_eq(&err));
}

#[test]
fn binding_errors_surface_through_result_members() {
    let adapter = Adapter::<Foo, dyn Summary>::new(|config: &mut AdapterConfig<Foo>| {
        config.member("missing").from(|foo: &Foo| foo.b.clone());
        config
            .member("fallible")
            .from_result(|_: &Foo| -> morph::Result<i32> { morph::bail!("not today") });
    });

    let summary = adapter.create(foo(&Arc::new(Resource { id: 0 }))).unwrap();

    assert_eq!(summary.missing(), "y");
    assert_eq!(summary.fallible().unwrap_err().to_string(), "not today");
}

// ---------------------------------------------------------------------------
// Recursive adaptation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, morph::Model)]
struct Person {
    name: String,
    manager: Option<Arc<Person>>,
}

#[morph::view]
trait Employee {
    fn name(&self) -> String;
    fn manager(&self) -> Option<Arc<dyn Employee>>;
}

fn person(name: &str, manager: Option<Arc<Person>>) -> Arc<Person> {
    Arc::new(Person {
        name: name.to_string(),
        manager,
    })
}

#[test]
fn self_referencing_views_are_adapted_recursively() {
    init_tracing();

    let adapter = Adapter::<Person, dyn Employee>::default();
    adapter.validate().unwrap();

    let ceo = person("ceo", None);
    let cto = person("cto", Some(ceo));
    let dev = adapter.create(person("dev", Some(cto))).unwrap();

    let cto = dev.manager().unwrap();
    assert_eq!(cto.name(), "cto");
    assert_eq!(cto.manager().unwrap().name(), "ceo");
    assert!(cto.manager().unwrap().manager().is_none());
}

struct Counting {
    inner: Adapter<Person, dyn Employee>,
    creates: Arc<AtomicUsize>,
}

impl Adapt<Person, dyn Employee> for Counting {
    fn create(&self, source: Arc<Person>) -> morph::Result<Arc<dyn Employee>> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(source)
    }

    fn validate(&self) -> morph::Result<()> {
        self.inner.validate()
    }

    fn is_configuring(&self) -> bool {
        self.inner.is_configuring()
    }
}

#[test]
fn null_nested_members_skip_the_nested_adapter() {
    init_tracing();

    let (creates, counted) = counter();
    let locator = Locator::new();

    locator.register_adapter::<Person, dyn Employee, _>(move |locator: &WeakLocator| Counting {
        inner: Adapter::with_weak_locator(locator, Defaults),
        creates: counted.clone(),
    });

    let adapter = Adapter::<Person, dyn Employee>::with_locator(&locator, Defaults);

    let alone = adapter.create(person("solo", None)).unwrap();
    assert!(alone.manager().is_none());
    assert_eq!(creates.load(Ordering::SeqCst), 0);

    let managed = adapter.create(person("dev", Some(person("lead", None)))).unwrap();
    assert_eq!(managed.manager().unwrap().name(), "lead");
    assert_eq!(creates.load(Ordering::SeqCst), 1);
}

#[morph::view]
trait Boss {
    fn name(&self) -> String;
    fn manager(&self) -> Arc<dyn Employee>;
}

#[test]
fn optional_models_are_not_adapted_to_required_views() {
    init_tracing();

    let adapter = Adapter::<Person, dyn Boss>::default();

    let err = adapter.validate().unwrap_err();
    assert_eq!(
        err.diagnostics().unwrap(),
        ["mapping for 'Boss.manager' from 'Person' not provided"]
    );
}

#[derive(Debug, Clone, morph::Model)]
struct Team {
    name: String,
    lead: Arc<Resource>,
}

#[morph::view]
trait TeamView {
    fn name(&self) -> String;
    fn lead(&self) -> Arc<dyn Employee>;
}

#[test]
fn unadaptable_nested_members_fail_outer_validation() {
    let adapter = Adapter::<Team, dyn TeamView>::default();

    let err = adapter.validate().unwrap_err();
    assert_eq!(
        err.diagnostics().unwrap(),
        ["mapping for 'TeamView.lead' from 'Team' not provided"]
    );
}

// ---------------------------------------------------------------------------
// View inheritance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, morph::Model)]
struct Book {
    name: String,
    title: String,
    pages: u32,
}

#[morph::view]
trait Named {
    fn name(&self) -> String;
}

#[morph::view]
trait Titled: Named {
    fn title(&self) -> String;
    fn pages(&self) -> u32;
}

#[test]
fn inherited_members_are_adapted() {
    let adapter = Adapter::<Book, dyn Titled>::default();

    let book = adapter
        .create(Arc::new(Book {
            name: "dune".to_string(),
            title: "Dune".to_string(),
            pages: 412,
        }))
        .unwrap();

    assert_eq!(book.name(), "dune");
    assert_eq!(book.title(), "Dune");
    assert_eq!(book.pages(), 412);

    let schema = <dyn Titled as morph::View>::schema();
    let names: Vec<_> = schema.members.iter().map(|member| member.name).collect();
    assert_eq!(names, ["name", "title", "pages"]);
}
