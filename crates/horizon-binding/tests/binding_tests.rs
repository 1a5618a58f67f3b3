//! Integration tests for the binding layer, driven the way a list widget would.

use std::sync::Arc;

use horizon_binding::model::{DataSource, SelectableDataSource, SelectableListDataSource};
use horizon_binding::{
    BindError, BindingSetup, Item, ItemContainer, ItemDefinition, ItemType, ViewBindingAdapter,
    ViewHolder, data_source, selectable_data_source,
};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Header;

#[derive(Debug, PartialEq)]
struct Row(&'static str);

#[derive(Default)]
struct RowHolder {
    text: String,
    binds: usize,
}

/// Header without click handling, Row selecting itself on click.
fn header_row_setup() -> BindingSetup {
    let mut setup = BindingSetup::new();
    setup.register::<Header, (), _>(|_| ()).unwrap();
    setup
        .register::<Row, RowHolder, _>(|_| RowHolder::default())
        .unwrap()
        .bind(|holder, _, row| {
            holder.text = row.0.to_string();
            holder.binds += 1;
        })
        .on_click(|selection, _, _| {
            selection.select();
        });
    setup
}

fn attach(setup: BindingSetup) -> ViewBindingAdapter {
    let mut adapter = ViewBindingAdapter::new();
    adapter.attach(setup.build());
    adapter
}

fn create_and_bind(adapter: &mut ViewBindingAdapter, position: usize) -> ViewHolder {
    let view_type = adapter.view_type_at(position).unwrap();
    let mut holder = adapter
        .create_view_holder(view_type, &ItemContainer::named("list"))
        .unwrap();
    adapter.bind_view_holder(&mut holder, position).unwrap();
    holder
}

#[test]
fn test_header_and_rows_end_to_end() {
    init_tracing();
    let source = Arc::new(selectable_data_source![Header, Row("a"), Row("b")]);
    let mut setup = header_row_setup();
    setup.set_data_source(source.clone());
    let mut adapter = attach(setup);

    let header_type = adapter.view_type_at(0).unwrap();
    let row_type = adapter.view_type_at(1).unwrap();
    assert_ne!(header_type, row_type);
    assert_eq!(adapter.view_type_at(2).unwrap(), row_type);
    assert_eq!(adapter.item_count().unwrap(), 3);

    let first = create_and_bind(&mut adapter, 1);
    assert_eq!(first.content::<RowHolder>().unwrap().text, "a");

    let second = create_and_bind(&mut adapter, 2);
    assert!(adapter.perform_click(&second).unwrap());

    assert!(source.is_selected_at(2));
    assert!(!source.is_selected_at(1));
    assert_eq!(source.selected_count(), 1);
}

#[test]
fn test_operations_after_detach_are_illegal() {
    let mut setup = header_row_setup();
    setup.set_data_source(Arc::new(data_source![Row("a")]));
    let mut adapter = attach(setup);
    let mut holder = create_and_bind(&mut adapter, 0);

    adapter.detach();

    let errors = [
        adapter.item_count().unwrap_err(),
        adapter.view_type_at(0).unwrap_err(),
        adapter
            .create_view_holder(holder.view_type(), &ItemContainer::new())
            .unwrap_err(),
        adapter.bind_view_holder(&mut holder, 0).unwrap_err(),
    ];
    for err in errors {
        assert!(matches!(err, BindError::NotAttached));
        assert!(err.is_illegal_state());
    }
}

#[test]
fn test_item_count_follows_data_source() {
    assert_eq!(attach(header_row_setup()).item_count().unwrap(), 0);

    for size in [0usize, 1, 7] {
        let mut setup = header_row_setup();
        let items = (0..size).map(|_| Item::new(Row("x")));
        setup.set_data_source(Arc::new(SelectableListDataSource::from_items(items)));
        assert_eq!(attach(setup).item_count().unwrap(), size);
    }
}

#[test]
fn test_item_handler_runs_before_global_handler() {
    let source = Arc::new(selectable_data_source![Row("a"), Row("b")]);
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut setup = BindingSetup::new();
    let item_log = log.clone();
    setup
        .register::<Row, RowHolder, _>(|_| RowHolder::default())
        .unwrap()
        .on_click(move |selection, position, row| {
            selection.select();
            item_log
                .lock()
                .push(format!("item {} {} {}", row.0, position, selection.is_selected()));
        });
    let global_log = log.clone();
    setup.on_click(move |selection, position, item| {
        let row = item.downcast_ref::<Row>().map_or("?", |row| row.0);
        global_log
            .lock()
            .push(format!("global {} {} {}", row, position, selection.is_selected()));
    });
    setup.set_data_source(source.clone());
    let mut adapter = attach(setup);

    let holder = create_and_bind(&mut adapter, 1);
    assert!(adapter.perform_click(&holder).unwrap());

    assert_eq!(*log.lock(), vec!["item b 1 true", "global b 1 true"]);
}

#[test]
fn test_global_handler_alone_installs_listener() {
    let clicks = Arc::new(Mutex::new(Vec::new()));
    let mut setup = BindingSetup::new();
    setup.register::<Header, (), _>(|_| ()).unwrap();
    let record = clicks.clone();
    setup.on_click(move |_, position, item| {
        assert!(item.is::<Header>());
        record.lock().push(position);
    });
    setup.set_data_source(Arc::new(data_source![Header, Header]));
    let mut adapter = attach(setup);

    let holder = create_and_bind(&mut adapter, 1);
    assert!(holder.root().has_click_listener());
    assert!(holder.root().has_selectable_background());
    assert!(adapter.perform_click(&holder).unwrap());
    assert_eq!(*clicks.lock(), vec![1]);
}

#[test]
fn test_non_selectable_source_ignores_selection() {
    let observed = Arc::new(Mutex::new(Vec::new()));
    let mut setup = BindingSetup::new();
    let record = observed.clone();
    setup
        .register::<Row, RowHolder, _>(|_| RowHolder::default())
        .unwrap()
        .on_click(move |selection, _, _| {
            selection.select();
            selection.toggle_selection();
            record.lock().push((
                selection.is_selectable(),
                selection.is_selected(),
                selection.selected_count(),
            ));
        });
    setup.set_data_source(Arc::new(data_source![Row("a"), Row("b"), Row("c")]));
    let mut adapter = attach(setup);

    for position in 0..3 {
        let holder = create_and_bind(&mut adapter, position);
        assert!(adapter.perform_click(&holder).unwrap());
    }
    assert_eq!(*observed.lock(), vec![(false, false, 0); 3]);
}

#[test]
fn test_rebinding_holder_leaves_no_data_source_reference() {
    let source: Arc<dyn DataSource> = Arc::new(data_source![Row("p"), Row("q"), Row("r")]);
    let mut setup = header_row_setup();
    setup.set_data_source(source.clone());
    let mut adapter = attach(setup);
    let baseline = Arc::strong_count(&source);

    let mut holder = create_and_bind(&mut adapter, 0);
    assert_eq!(Arc::strong_count(&source), baseline);

    adapter.bind_view_holder(&mut holder, 2).unwrap();
    assert_eq!(Arc::strong_count(&source), baseline);
    assert_eq!(adapter.bound_position(&holder), Some(2));

    let content = holder.content::<RowHolder>().unwrap();
    assert_eq!(content.text, "r");
    assert_eq!(content.binds, 2);
}

#[test]
fn test_click_uses_latest_bound_position() {
    let source = Arc::new(selectable_data_source![Row("a"), Row("b"), Row("c")]);
    let mut setup = header_row_setup();
    setup.set_data_source(source.clone());
    let mut adapter = attach(setup);

    let mut holder = create_and_bind(&mut adapter, 0);
    adapter.bind_view_holder(&mut holder, 2).unwrap();
    adapter.perform_click(&holder).unwrap();

    assert_eq!(source.selected_positions(), vec![2]);
}

#[test]
fn test_long_click_is_consumed() {
    let long_clicks = Arc::new(Mutex::new(0));
    let mut setup = BindingSetup::new();
    let count = long_clicks.clone();
    setup
        .register::<Row, RowHolder, _>(|_| RowHolder::default())
        .unwrap()
        .on_long_click(move |selection, _, _| {
            selection.toggle_selection();
            *count.lock() += 1;
        });
    let source = Arc::new(selectable_data_source![Row("a")]);
    setup.set_data_source(source.clone());
    let mut adapter = attach(setup);

    let holder = create_and_bind(&mut adapter, 0);
    assert!(!holder.root().has_click_listener());
    assert!(!adapter.perform_click(&holder).unwrap());
    assert!(adapter.perform_long_click(&holder).unwrap());
    assert!(adapter.perform_long_click(&holder).unwrap());

    assert_eq!(*long_clicks.lock(), 2);
    assert!(!source.is_selected_at(0));
}

#[test]
fn test_unregistered_item_type() {
    struct Stray;

    let mut setup = header_row_setup();
    setup.set_data_source(Arc::new(data_source![Row("a"), Stray]));
    let handle = setup.build();
    let mut adapter = ViewBindingAdapter::new();
    adapter.attach(handle.clone());

    let err = adapter.view_type_at(1).unwrap_err();
    assert!(matches!(err, BindError::UnknownItemType { .. }));
    assert!(err.is_lookup());
    assert!(!handle.registry().contains(ItemType::of::<Stray>()));
    assert_eq!(handle.registry().view_type_count(), 0);
}

#[test]
fn test_source_changes_reach_adapter_signals() {
    let source = Arc::new(selectable_data_source![Row("a"), Row("b")]);
    let mut setup = header_row_setup();
    setup.set_data_source(source.clone());
    let adapter = attach(setup);

    let events = Arc::new(Mutex::new(Vec::new()));
    let signals = adapter.signals();
    let log = events.clone();
    signals
        .item_range_removed
        .connect(move |&(start, count)| log.lock().push(("removed", start, count)));
    let log = events.clone();
    signals
        .item_range_changed
        .connect(move |&(start, count)| log.lock().push(("changed", start, count)));
    let log = events.clone();
    signals
        .data_set_changed
        .connect(move |_| log.lock().push(("reset", 0, 0)));

    source.set(0, Item::new(Row("z")));
    source.remove(1);
    source.clear();

    assert_eq!(
        *events.lock(),
        vec![("changed", 0, 1), ("removed", 1, 1), ("reset", 0, 0)]
    );
    assert_eq!(adapter.item_count().unwrap(), 0);
}

#[test]
fn test_swapped_data_source_needs_reattach() {
    let mut setup = header_row_setup();
    setup.set_data_source(Arc::new(data_source![Row("a")]));
    let handle = setup.build();
    let mut adapter = ViewBindingAdapter::new();
    adapter.attach(handle.clone());

    handle.set_data_source(Some(Arc::new(data_source![Row("a"), Row("b"), Row("c")])));
    assert_eq!(adapter.item_count().unwrap(), 1);

    adapter.attach(handle);
    assert_eq!(adapter.item_count().unwrap(), 3);
}

#[test]
fn test_definition_without_creator_fails_at_holder_creation() {
    struct Divider;

    let mut setup = header_row_setup();
    setup.define(ItemDefinition::new::<Divider>()).unwrap();
    setup.set_data_source(Arc::new(data_source![Row("a"), Divider]));
    let mut adapter = attach(setup);

    let view_type = adapter.view_type_at(1).unwrap();
    let err = adapter
        .create_view_holder(view_type, &ItemContainer::new())
        .unwrap_err();
    assert!(matches!(err, BindError::MissingCreator { .. }));
    assert!(err.is_configuration());

    let holder = create_and_bind(&mut adapter, 0);
    assert_eq!(holder.content::<RowHolder>().unwrap().text, "a");
}

#[test]
fn test_prebuilt_definition_binds_and_clicks() {
    struct Tag(&'static str);

    let mut definition = ItemDefinition::with_creator::<Tag, String, _>(|_| String::new());
    definition
        .configure::<Tag, String>()
        .unwrap()
        .bind(|label, _, tag| *label = tag.0.to_string())
        .on_click(|selection, _, _| {
            selection.toggle_selection();
        });

    let source = Arc::new(selectable_data_source![Tag("x"), Tag("y")]);
    let mut setup = BindingSetup::new();
    setup.define(definition).unwrap();
    setup.set_data_source(source.clone());
    let mut adapter = attach(setup);

    let holder = create_and_bind(&mut adapter, 1);
    assert_eq!(holder.content::<String>().unwrap(), "y");
    assert!(adapter.perform_click(&holder).unwrap());
    assert_eq!(source.selected_positions(), vec![1]);
}
